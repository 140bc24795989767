//! Brand and model option sets backing the cascading selects.

/// Shown when the remote brand list cannot be loaded.
pub const DEFAULT_BRANDS: [&str; 5] = ["Renault", "Peugeot", "Citroën", "Dacia", "Volkswagen"];

/// Ticket for one model load. Only the most recently issued ticket may apply results.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelRequest {
    pub brand: String,
    generation: u64,
}

#[derive(Clone, Debug, Default)]
pub struct CatalogState {
    brands: Vec<String>,
    models: Vec<String>,
    models_loading: bool,
    model_generation: u64,
    /// Whether the brand list came from the fallback set.
    pub brands_fallback: bool,
}

impl CatalogState {
    pub fn brands(&self) -> &[String] {
        &self.brands
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub fn models_loading(&self) -> bool {
        self.models_loading
    }

    pub fn has_brand(&self, brand: &str) -> bool {
        self.brands.iter().any(|candidate| candidate == brand)
    }

    pub fn has_model(&self, model: &str) -> bool {
        self.models.iter().any(|candidate| candidate == model)
    }

    /// Stores the brand list, or the default set when loading failed or came back empty.
    ///
    /// Returns whether the default set was used.
    pub fn apply_brands<E>(&mut self, outcome: Result<Vec<String>, E>) -> bool {
        match outcome {
            Ok(brands) if !brands.is_empty() => {
                self.brands = brands;
                self.brands_fallback = false;
            }
            _ => {
                self.brands = DEFAULT_BRANDS.iter().map(|brand| brand.to_string()).collect();
                self.brands_fallback = true;
            }
        }
        self.brands_fallback
    }

    /// Starts a model load for `brand`, superseding any load still in flight.
    ///
    /// The model set is emptied until the new result arrives so options from the
    /// previous brand can never be picked.
    pub fn begin_model_load(&mut self, brand: &str) -> ModelRequest {
        self.model_generation += 1;
        self.models.clear();
        self.models_loading = true;
        ModelRequest {
            brand: brand.to_string(),
            generation: self.model_generation,
        }
    }

    /// Drops the model set without issuing a request (brand cleared).
    pub fn clear_models(&mut self) {
        self.model_generation += 1;
        self.models.clear();
        self.models_loading = false;
    }

    pub fn is_current(&self, request: &ModelRequest) -> bool {
        request.generation == self.model_generation
    }

    /// Applies a model load outcome. Returns `false` and changes nothing when the
    /// request has been superseded.
    pub fn apply_models<E>(
        &mut self,
        request: &ModelRequest,
        outcome: Result<Vec<String>, E>,
    ) -> bool {
        if !self.is_current(request) {
            return false;
        }
        self.models_loading = false;
        self.models = outcome.unwrap_or_default();
        true
    }
}
