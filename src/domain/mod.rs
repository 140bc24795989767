//! Estimate form state, catalog options and the report model live here.

pub mod app_state;
pub mod catalog;
pub mod entities;
pub mod report;
pub mod validation;

#[allow(unused_imports)]
pub use app_state::{EstimatorState, FormLocked, Phase, SubmitRejected, SubmitTicket};
#[allow(unused_imports)]
pub use catalog::{CatalogState, ModelRequest, DEFAULT_BRANDS};
#[allow(unused_imports)]
pub use entities::{FieldName, FormDraft, FuelType, PredictionResult, Transmission, VehicleQuery};
#[allow(unused_imports)]
pub use report::{format_price, render_report, DetailRow, ReportDocument};
#[allow(unused_imports)]
pub use validation::{validate_draft, ValidationError};
