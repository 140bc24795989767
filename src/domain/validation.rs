//! Client-side gate run before a query may reach the estimator.

use std::{fmt, str::FromStr};

use super::catalog::CatalogState;
use super::entities::{FieldName, FormDraft, FuelType, Transmission, VehicleQuery};

pub const MIN_YEAR: i32 = 1950;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    pub field: FieldName,
    pub message: String,
}

impl ValidationError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.label(), self.message)
    }
}

/// Checks every field and returns either the typed query or all failures at once.
///
/// `current_year` bounds the accepted model year (one year ahead is tolerated
/// for next-season models).
pub fn validate_draft(
    draft: &FormDraft,
    catalog: &CatalogState,
    current_year: i32,
) -> Result<VehicleQuery, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let brand = draft.brand.trim();
    if brand.is_empty() {
        errors.push(ValidationError::new(FieldName::Brand, "Champ requis"));
    } else if !catalog.has_brand(brand) {
        errors.push(ValidationError::new(FieldName::Brand, "Marque inconnue"));
    }

    let model = draft.model.trim();
    if model.is_empty() {
        errors.push(ValidationError::new(FieldName::Model, "Champ requis"));
    } else if !catalog.has_model(model) {
        errors.push(ValidationError::new(
            FieldName::Model,
            "Modèle inconnu pour cette marque",
        ));
    }

    let transmission = required(draft, FieldName::Transmission, &mut errors).and_then(|raw| {
        let parsed = Transmission::from_wire(raw);
        if parsed.is_none() {
            errors.push(ValidationError::new(
                FieldName::Transmission,
                "Transmission inconnue",
            ));
        }
        parsed
    });

    let fuel_type = required(draft, FieldName::FuelType, &mut errors).and_then(|raw| {
        let parsed = FuelType::from_wire(raw);
        if parsed.is_none() {
            errors.push(ValidationError::new(FieldName::FuelType, "Carburant inconnu"));
        }
        parsed
    });

    let fiscal_power = required(draft, FieldName::FiscalPower, &mut errors).and_then(|raw| {
        match parse_digits::<u32>(raw) {
            Some(value) if value > 0 => Some(value),
            _ => {
                errors.push(ValidationError::new(
                    FieldName::FiscalPower,
                    "Doit être un entier positif",
                ));
                None
            }
        }
    });

    let mileage = required(draft, FieldName::Mileage, &mut errors).and_then(|raw| {
        match parse_digits::<u64>(raw) {
            Some(value) => Some(value),
            None => {
                errors.push(ValidationError::new(
                    FieldName::Mileage,
                    "Doit être un entier positif ou nul",
                ));
                None
            }
        }
    });

    let max_year = current_year + 1;
    let year = required(draft, FieldName::Year, &mut errors).and_then(|raw| {
        match parse_digits::<i32>(raw) {
            Some(value) if (MIN_YEAR..=max_year).contains(&value) => Some(value),
            _ => {
                errors.push(ValidationError::new(
                    FieldName::Year,
                    format!("Doit être comprise entre {MIN_YEAR} et {max_year}"),
                ));
                None
            }
        }
    });

    match (transmission, fuel_type, fiscal_power, mileage, year) {
        (Some(transmission), Some(fuel_type), Some(fiscal_power), Some(mileage), Some(year))
            if errors.is_empty() =>
        {
            Ok(VehicleQuery {
                brand: brand.to_string(),
                model: model.to_string(),
                transmission,
                fiscal_power,
                fuel_type,
                mileage,
                year,
            })
        }
        _ => Err(errors),
    }
}

/// Plain decimal digits only; `str::parse` alone would also take a leading `+`.
fn parse_digits<T: FromStr>(raw: &str) -> Option<T> {
    if raw.bytes().all(|byte| byte.is_ascii_digit()) {
        raw.parse().ok()
    } else {
        None
    }
}

fn required<'a>(
    draft: &'a FormDraft,
    field: FieldName,
    errors: &mut Vec<ValidationError>,
) -> Option<&'a str> {
    let raw = draft.get(field).trim();
    if raw.is_empty() {
        errors.push(ValidationError::new(field, "Champ requis"));
        None
    } else {
        Some(raw)
    }
}
