use thiserror::Error;

use super::catalog::{CatalogState, ModelRequest};
use super::entities::{FieldName, FormDraft, PredictionResult, VehicleQuery};
use super::validation::{validate_draft, ValidationError};

/// Lifecycle of the estimate form.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
    Result(PredictionResult),
    Failed(String),
}

/// Handed out when a submission starts; its outcome only applies while the ticket is current.
#[derive(Clone, Debug, PartialEq)]
pub struct SubmitTicket {
    pub query: VehicleQuery,
    generation: u64,
}

#[derive(Debug, Error, PartialEq)]
#[error("the form is locked while a prediction is in progress")]
pub struct FormLocked;

#[derive(Debug, Error, PartialEq)]
pub enum SubmitRejected {
    #[error("a prediction is already in progress")]
    InProgress,
    #[error("{} field(s) need attention", .0.len())]
    Invalid(Vec<ValidationError>),
}

/// Session state shared by the estimate page: option catalog, draft and lifecycle.
#[derive(Clone, Debug, Default)]
pub struct EstimatorState {
    pub catalog: CatalogState,
    draft: FormDraft,
    phase: Phase,
    field_errors: Vec<ValidationError>,
    submission_generation: u64,
}

impl EstimatorState {
    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, Phase::Submitting)
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        match &self.phase {
            Phase::Result(result) => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn field_error(&self, field: FieldName) -> Option<&str> {
        self.field_errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    /// Updates one field. Editing after a result or failure starts a new cycle.
    ///
    /// Changing the brand returns the model load to dispatch, if any. The current
    /// model is kept until that load resolves so it survives when the new brand
    /// offers it too.
    pub fn set_field(
        &mut self,
        field: FieldName,
        value: impl Into<String>,
    ) -> Result<Option<ModelRequest>, FormLocked> {
        if self.is_submitting() {
            return Err(FormLocked);
        }
        if matches!(self.phase, Phase::Result(_) | Phase::Failed(_)) {
            self.phase = Phase::Idle;
        }

        let value = value.into();
        let brand_changed = field == FieldName::Brand && self.draft.brand != value;
        self.draft.set(field, value);
        self.field_errors.retain(|error| error.field != field);

        if !brand_changed {
            return Ok(None);
        }

        if self.draft.brand.trim().is_empty() {
            self.catalog.clear_models();
            self.draft.model.clear();
            return Ok(None);
        }
        Ok(Some(self.catalog.begin_model_load(self.draft.brand.trim())))
    }

    /// Applies a finished model load. Stale loads are ignored and return `false`.
    pub fn apply_models<E>(
        &mut self,
        request: &ModelRequest,
        outcome: Result<Vec<String>, E>,
    ) -> bool {
        if request.brand != self.draft.brand.trim() {
            return false;
        }
        let failed = outcome.is_err();
        if !self.catalog.apply_models(request, outcome) {
            return false;
        }
        if failed || !self.catalog.has_model(self.draft.model.trim()) {
            self.draft.model.clear();
        }
        true
    }

    /// Validates the draft and moves to `Submitting`.
    ///
    /// Submitting only starts from `Idle`; a shown result or failure is closed
    /// first, so a retry is a fresh cycle even when validation then fails.
    pub fn begin_submit(&mut self, current_year: i32) -> Result<SubmitTicket, SubmitRejected> {
        if self.is_submitting() {
            return Err(SubmitRejected::InProgress);
        }
        self.phase = Phase::Idle;

        match validate_draft(&self.draft, &self.catalog, current_year) {
            Ok(query) => {
                self.field_errors.clear();
                self.submission_generation += 1;
                self.phase = Phase::Submitting;
                Ok(SubmitTicket {
                    query,
                    generation: self.submission_generation,
                })
            }
            Err(errors) => {
                self.field_errors = errors.clone();
                Err(SubmitRejected::Invalid(errors))
            }
        }
    }

    /// Records the outcome of a submission; the error side carries the user-facing message.
    pub fn complete_submit(
        &mut self,
        ticket: &SubmitTicket,
        outcome: Result<PredictionResult, String>,
    ) -> bool {
        if !self.is_submitting() || ticket.generation != self.submission_generation {
            return false;
        }
        self.phase = match outcome {
            Ok(result) => Phase::Result(result),
            Err(message) => Phase::Failed(message),
        };
        true
    }

    /// Clears every field and any result, dropping in-flight submissions and model loads.
    pub fn reset(&mut self) {
        self.draft = FormDraft::default();
        self.field_errors.clear();
        self.phase = Phase::Idle;
        self.submission_generation += 1;
        self.catalog.clear_models();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{FuelType, Transmission};

    fn loaded_state() -> EstimatorState {
        let mut state = EstimatorState::default();
        state
            .catalog
            .apply_brands::<()>(Ok(vec!["Renault".into(), "Peugeot".into(), "Dacia".into()]));
        state
    }

    fn select_brand(state: &mut EstimatorState, brand: &str, models: &[&str]) {
        let request = state
            .set_field(FieldName::Brand, brand)
            .unwrap()
            .expect("brand change issues a model load");
        let models = models.iter().map(|m| m.to_string()).collect();
        assert!(state.apply_models::<()>(&request, Ok(models)));
    }

    fn fill_clio(state: &mut EstimatorState) {
        select_brand(state, "Renault", &["Clio", "Megane"]);
        for (field, value) in [
            (FieldName::Model, "Clio"),
            (FieldName::Transmission, "Manuelle"),
            (FieldName::FiscalPower, "6"),
            (FieldName::FuelType, "Essence"),
            (FieldName::Mileage, "50000"),
            (FieldName::Year, "2018"),
        ] {
            state.set_field(field, value).unwrap();
        }
    }

    fn clio_result(ticket: &SubmitTicket) -> PredictionResult {
        PredictionResult {
            price: 95_000,
            query: ticket.query.clone(),
        }
    }

    #[test]
    fn successful_cycle_reaches_result() {
        let mut state = loaded_state();
        fill_clio(&mut state);

        let ticket = state.begin_submit(2025).unwrap();
        assert!(state.is_submitting());
        assert_eq!(ticket.query.transmission, Transmission::Manual);
        assert_eq!(ticket.query.fuel_type, FuelType::Gasoline);

        assert!(state.complete_submit(&ticket, Ok(clio_result(&ticket))));
        assert_eq!(state.result().map(|r| r.price), Some(95_000));
    }

    #[test]
    fn failure_keeps_fields_for_retry() {
        let mut state = loaded_state();
        fill_clio(&mut state);

        let ticket = state.begin_submit(2025).unwrap();
        state.complete_submit(&ticket, Err("Modèle invalide".into()));

        assert_eq!(state.error_message(), Some("Modèle invalide"));
        assert_eq!(state.draft().model, "Clio");
        assert!(state.begin_submit(2025).is_ok());
    }

    #[test]
    fn invalid_draft_never_starts_submission() {
        let mut state = loaded_state();
        fill_clio(&mut state);
        state.set_field(FieldName::Mileage, "-5").unwrap();

        match state.begin_submit(2025) {
            Err(SubmitRejected::Invalid(errors)) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, FieldName::Mileage);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(state.phase(), &Phase::Idle);
        assert!(state.field_error(FieldName::Mileage).is_some());

        state.set_field(FieldName::Mileage, "5").unwrap();
        assert!(state.field_error(FieldName::Mileage).is_none());
    }

    #[test]
    fn resubmitting_after_failure_starts_from_idle() {
        let mut state = loaded_state();
        fill_clio(&mut state);
        let ticket = state.begin_submit(2025).unwrap();
        state.complete_submit(&ticket, Err("Modèle invalide".into()));

        state.draft.year = "1800".into();
        assert!(matches!(
            state.begin_submit(2025),
            Err(SubmitRejected::Invalid(_))
        ));
        assert_eq!(state.phase(), &Phase::Idle);
        assert!(state.error_message().is_none());
    }

    #[test]
    fn double_submission_and_edits_are_rejected_while_submitting() {
        let mut state = loaded_state();
        fill_clio(&mut state);
        state.begin_submit(2025).unwrap();

        assert_eq!(state.begin_submit(2025), Err(SubmitRejected::InProgress));
        assert_eq!(state.set_field(FieldName::Year, "2019"), Err(FormLocked));
        assert_eq!(state.draft().year, "2018");
    }

    #[test]
    fn brand_change_drops_model_missing_from_new_set() {
        let mut state = loaded_state();
        fill_clio(&mut state);

        select_brand(&mut state, "Peugeot", &["208", "308"]);
        assert_eq!(state.draft().model, "");
    }

    #[test]
    fn brand_change_keeps_model_offered_by_new_brand() {
        let mut state = loaded_state();
        fill_clio(&mut state);

        select_brand(&mut state, "Dacia", &["Sandero", "Clio"]);
        assert_eq!(state.draft().model, "Clio");
    }

    #[test]
    fn failed_model_load_clears_model() {
        let mut state = loaded_state();
        fill_clio(&mut state);

        let request = state.set_field(FieldName::Brand, "Dacia").unwrap().unwrap();
        assert!(state.apply_models(&request, Err("timeout")));
        assert_eq!(state.draft().model, "");
        assert!(state.catalog.models().is_empty());
    }

    #[test]
    fn clearing_brand_clears_models_without_request() {
        let mut state = loaded_state();
        fill_clio(&mut state);

        assert_eq!(state.set_field(FieldName::Brand, ""), Ok(None));
        assert_eq!(state.draft().model, "");
        assert!(state.catalog.models().is_empty());
    }

    #[test]
    fn slow_response_for_previous_brand_is_ignored() {
        let mut state = loaded_state();
        let slow = state.set_field(FieldName::Brand, "Renault").unwrap().unwrap();
        let fast = state.set_field(FieldName::Brand, "Peugeot").unwrap().unwrap();

        assert!(state.apply_models::<()>(&fast, Ok(vec!["208".into()])));
        assert!(!state.apply_models::<()>(&slow, Ok(vec!["Clio".into()])));

        assert_eq!(state.catalog.models(), ["208".to_string()]);
    }

    #[test]
    fn reset_returns_to_empty_idle_from_any_phase() {
        let mut state = loaded_state();
        fill_clio(&mut state);
        let ticket = state.begin_submit(2025).unwrap();
        state.complete_submit(&ticket, Ok(clio_result(&ticket)));
        state.reset();
        assert_eq!(state.phase(), &Phase::Idle);
        assert!(state.draft().is_empty());
        assert!(state.catalog.models().is_empty());

        fill_clio(&mut state);
        let ticket = state.begin_submit(2025).unwrap();
        state.complete_submit(&ticket, Err("boom".into()));
        state.reset();
        assert_eq!(state.phase(), &Phase::Idle);
        assert!(state.draft().is_empty());

        // Brands are loaded once per session and survive resets.
        assert!(state.catalog.has_brand("Renault"));
    }

    #[test]
    fn reset_during_submission_discards_late_outcome() {
        let mut state = loaded_state();
        fill_clio(&mut state);
        let ticket = state.begin_submit(2025).unwrap();

        state.reset();
        assert!(!state.complete_submit(&ticket, Ok(clio_result(&ticket))));
        assert_eq!(state.phase(), &Phase::Idle);
    }

    #[test]
    fn editing_after_result_starts_new_cycle() {
        let mut state = loaded_state();
        fill_clio(&mut state);
        let ticket = state.begin_submit(2025).unwrap();
        state.complete_submit(&ticket, Ok(clio_result(&ticket)));

        state.set_field(FieldName::Mileage, "60000").unwrap();
        assert_eq!(state.phase(), &Phase::Idle);
        assert!(state.result().is_none());
    }
}
