use serde::{Deserialize, Serialize};

/// Gearbox type, serialized with the estimator's categorical vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transmission {
    #[serde(rename = "Manuelle")]
    Manual,
    #[serde(rename = "Automatique")]
    Automatic,
}

impl Transmission {
    pub const ALL: [Transmission; 2] = [Transmission::Manual, Transmission::Automatic];

    pub fn wire_value(&self) -> &'static str {
        match self {
            Transmission::Manual => "Manuelle",
            Transmission::Automatic => "Automatique",
        }
    }

    pub fn label(&self) -> &'static str {
        self.wire_value()
    }

    pub fn from_wire(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.wire_value() == raw.trim())
    }
}

/// Fuel type. `Other` travels as `Hybride` but is shown as "Autres" everywhere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuelType {
    #[serde(rename = "Essence")]
    Gasoline,
    #[serde(rename = "Diesel")]
    Diesel,
    #[serde(rename = "Hybride")]
    Other,
}

impl FuelType {
    pub const ALL: [FuelType; 3] = [FuelType::Gasoline, FuelType::Diesel, FuelType::Other];

    pub fn wire_value(&self) -> &'static str {
        match self {
            FuelType::Gasoline => "Essence",
            FuelType::Diesel => "Diesel",
            FuelType::Other => "Hybride",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FuelType::Gasoline => "Essence",
            FuelType::Diesel => "Diesel",
            FuelType::Other => "Autres",
        }
    }

    pub fn from_wire(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.wire_value() == raw.trim())
    }
}

/// Validated payload sent to the estimator. Field names follow the service contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleQuery {
    #[serde(rename = "marque")]
    pub brand: String,
    #[serde(rename = "modele")]
    pub model: String,
    pub transmission: Transmission,
    #[serde(rename = "puissance_fiscale")]
    pub fiscal_power: u32,
    #[serde(rename = "carburant")]
    pub fuel_type: FuelType,
    #[serde(rename = "kilometrage")]
    pub mileage: u64,
    #[serde(rename = "annee")]
    pub year: i32,
}

/// Price returned by the estimator together with the query that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PredictionResult {
    /// Whole MAD units.
    pub price: u64,
    pub query: VehicleQuery,
}

/// Identifies one input of the estimate form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldName {
    Brand,
    Model,
    Transmission,
    FiscalPower,
    FuelType,
    Mileage,
    Year,
}

impl FieldName {
    pub const ALL: [FieldName; 7] = [
        FieldName::Brand,
        FieldName::Model,
        FieldName::Transmission,
        FieldName::FiscalPower,
        FieldName::FuelType,
        FieldName::Mileage,
        FieldName::Year,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FieldName::Brand => "Marque",
            FieldName::Model => "Modèle",
            FieldName::Transmission => "Transmission",
            FieldName::FiscalPower => "Puissance Fiscale (CV)",
            FieldName::FuelType => "Carburant",
            FieldName::Mileage => "Kilométrage",
            FieldName::Year => "Année",
        }
    }
}

/// Raw form input, exactly as typed or selected.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormDraft {
    pub brand: String,
    pub model: String,
    pub transmission: String,
    pub fiscal_power: String,
    pub fuel_type: String,
    pub mileage: String,
    pub year: String,
}

impl FormDraft {
    pub fn get(&self, field: FieldName) -> &str {
        match field {
            FieldName::Brand => &self.brand,
            FieldName::Model => &self.model,
            FieldName::Transmission => &self.transmission,
            FieldName::FiscalPower => &self.fiscal_power,
            FieldName::FuelType => &self.fuel_type,
            FieldName::Mileage => &self.mileage,
            FieldName::Year => &self.year,
        }
    }

    pub fn set(&mut self, field: FieldName, value: String) {
        let slot = match field {
            FieldName::Brand => &mut self.brand,
            FieldName::Model => &mut self.model,
            FieldName::Transmission => &mut self.transmission,
            FieldName::FiscalPower => &mut self.fiscal_power,
            FieldName::FuelType => &mut self.fuel_type,
            FieldName::Mileage => &mut self.mileage,
            FieldName::Year => &mut self.year,
        };
        *slot = value;
    }

    pub fn is_empty(&self) -> bool {
        FieldName::ALL
            .iter()
            .all(|field| self.get(*field).is_empty())
    }
}
