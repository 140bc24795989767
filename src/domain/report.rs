//! Document model shared by the on-screen report and the exported PDF.

use time::Date;

use super::entities::{PredictionResult, VehicleQuery};

pub const REPORT_TITLE: &str = "Rapport d'Estimation Automobile";
pub const REPORT_SUBTITLE: &str = "Votre estimation personnalisée";
pub const DETAILS_HEADING: &str = "Détails du Véhicule";
pub const CURRENCY: &str = "MAD";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportDocument {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub details_heading: &'static str,
    pub details: Vec<DetailRow>,
    pub price_line: String,
    pub footer: String,
    pub file_name: String,
}

/// Lays out a finished estimate. Pure: the same inputs always give the same document.
pub fn render_report(
    query: &VehicleQuery,
    result: &PredictionResult,
    generated_on: Date,
) -> ReportDocument {
    let details = vec![
        DetailRow {
            label: "Marque",
            value: query.brand.clone(),
        },
        DetailRow {
            label: "Modèle",
            value: query.model.clone(),
        },
        DetailRow {
            label: "Année",
            value: query.year.to_string(),
        },
        DetailRow {
            label: "Transmission",
            value: query.transmission.label().to_string(),
        },
        DetailRow {
            label: "Carburant",
            value: query.fuel_type.label().to_string(),
        },
        DetailRow {
            label: "Kilométrage",
            value: format!("{} km", group_thousands(query.mileage)),
        },
    ];

    ReportDocument {
        title: REPORT_TITLE,
        subtitle: REPORT_SUBTITLE,
        details_heading: DETAILS_HEADING,
        details,
        price_line: format!("Prix Estimé: {}", format_price(result.price)),
        footer: format!("Généré le {}", format_date(generated_on)),
        file_name: export_file_name(query),
    }
}

/// `95000` -> `95 000 MAD`.
pub fn format_price(price: u64) -> String {
    format!("{} {CURRENCY}", group_thousands(price))
}

pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    grouped
}

fn format_date(date: Date) -> String {
    format!(
        "{:02}/{:02}/{}",
        date.day(),
        u8::from(date.month()),
        date.year()
    )
}

/// `estimation_<brand>_<model>.pdf`, with characters that cannot appear in a file name replaced.
pub fn export_file_name(query: &VehicleQuery) -> String {
    format!(
        "estimation_{}_{}.pdf",
        sanitize_file_part(&query.brand),
        sanitize_file_part(&query.model)
    )
}

fn sanitize_file_part(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|ch| match ch {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            ch if ch.is_control() => '-',
            ch => ch,
        })
        .collect()
}
