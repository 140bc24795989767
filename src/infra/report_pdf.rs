//! Single-page A4 PDF rendering of a [`ReportDocument`].

use std::path::{Path, PathBuf};

use log::info;
use lopdf::{
    content::{Content, Operation},
    dictionary, Document, Object, Stream,
};
use thiserror::Error;

use crate::domain::ReportDocument;
use crate::util::downloads::export_dir;

const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 40;
const VALUE_COLUMN: i64 = MARGIN + (PAGE_WIDTH - 2 * MARGIN) * 2 / 5;
const ROW_SPACING: i64 = 20;

const PRODUCER: &str = concat!("car-price-estimator ", env!("CARGO_PKG_VERSION"));
const REGULAR: &str = "F1";
const BOLD: &str = "F2";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to encode PDF: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("no directory available for exported reports")]
    DirectoryUnavailable,
}

/// Encodes the report as PDF bytes.
pub fn encode_pdf(report: &ReportDocument) -> Result<Vec<u8>, ExportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(font("Helvetica"));
    let bold_id = doc.add_object(font("Helvetica-Bold"));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            REGULAR => regular_id,
            BOLD => bold_id,
        },
    });

    let content = Content {
        operations: layout(report),
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(encode_win_ansi(report.title)),
        "Producer" => Object::string_literal(PRODUCER),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

/// Exports into the user's download directory.
pub async fn save_report(report: &ReportDocument) -> Result<PathBuf, ExportError> {
    let dir = export_dir().ok_or(ExportError::DirectoryUnavailable)?;
    write_report(report, &dir).await
}

/// Writes the report into `dir` under its deterministic file name, replacing any
/// earlier export of the same vehicle.
pub async fn write_report(report: &ReportDocument, dir: &Path) -> Result<PathBuf, ExportError> {
    let bytes = encode_pdf(report)?;
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(&report.file_name);
    tokio::fs::write(&path, bytes).await?;
    info!("Exported report to {}", path.display());
    Ok(path)
}

fn font(base: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base,
        "Encoding" => "WinAnsiEncoding",
    }
}

fn layout(report: &ReportDocument) -> Vec<Operation> {
    let mut ops = Vec::new();
    let mut y = PAGE_HEIGHT - 62;

    text(&mut ops, BOLD, 24, centered_x(report.title, 24), y, report.title);
    y -= 30;
    text(&mut ops, REGULAR, 16, centered_x(report.subtitle, 16), y, report.subtitle);

    y -= 50;
    text(&mut ops, BOLD, 18, MARGIN, y, report.details_heading);
    y -= 8;
    ops.push(Operation::new("w", vec![Object::Real(0.5)]));
    ops.push(Operation::new("m", vec![MARGIN.into(), y.into()]));
    ops.push(Operation::new("l", vec![(PAGE_WIDTH - MARGIN).into(), y.into()]));
    ops.push(Operation::new("S", vec![]));

    y -= 22;
    for row in &report.details {
        text(&mut ops, REGULAR, 12, MARGIN, y, &format!("{}:", row.label));
        text(&mut ops, BOLD, 12, VALUE_COLUMN, y, &row.value);
        y -= ROW_SPACING;
    }

    y -= 40;
    ops.push(Operation::new(
        "rg",
        vec![Object::Real(0.15), Object::Real(0.68), Object::Real(0.38)],
    ));
    text(&mut ops, BOLD, 28, centered_x(&report.price_line, 28), y, &report.price_line);
    ops.push(Operation::new(
        "rg",
        vec![Object::Real(0.58), Object::Real(0.65), Object::Real(0.65)],
    ));
    text(&mut ops, REGULAR, 10, centered_x(&report.footer, 10), 30, &report.footer);

    ops
}

fn text(ops: &mut Vec<Operation>, font: &str, size: i64, x: i64, y: i64, value: &str) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec![font.into(), size.into()]));
    ops.push(Operation::new("Td", vec![x.into(), y.into()]));
    ops.push(Operation::new(
        "Tj",
        vec![Object::string_literal(encode_win_ansi(value))],
    ));
    ops.push(Operation::new("ET", vec![]));
}

/// Helvetica averages roughly half an em per glyph; close enough to center a line.
fn centered_x(value: &str, size: i64) -> i64 {
    let width = value.chars().count() as i64 * size / 2;
    ((PAGE_WIDTH - width) / 2).max(MARGIN)
}

/// The standard 14 fonts only cover WinAnsi; Latin-1 maps straight through.
fn encode_win_ansi(value: &str) -> Vec<u8> {
    value
        .chars()
        .map(|ch| match ch {
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{20AC}' => 0x80,
            '\u{202F}' => 0xA0,
            ch if (ch as u32) < 0x80 || (0xA0..=0xFF).contains(&(ch as u32)) => ch as u32 as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use time::{Date, Month};

    use super::*;
    use crate::domain::{render_report, FuelType, PredictionResult, Transmission, VehicleQuery};

    fn report() -> ReportDocument {
        let query = VehicleQuery {
            brand: "Citroën".into(),
            model: "C3".into(),
            transmission: Transmission::Automatic,
            fiscal_power: 5,
            fuel_type: FuelType::Diesel,
            mileage: 123_456,
            year: 2020,
        };
        let result = PredictionResult {
            price: 95_000,
            query: query.clone(),
        };
        let date = Date::from_calendar_date(2025, Month::January, 2).unwrap();
        render_report(&query, &result, date)
    }

    fn shown_strings(ops: &[Operation]) -> Vec<Vec<u8>> {
        ops.iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                Some(Object::String(bytes, _)) => Some(bytes.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn layout_follows_document_order() {
        let report = report();
        let mut expected = vec![
            encode_win_ansi(report.title),
            encode_win_ansi(report.subtitle),
            encode_win_ansi(report.details_heading),
        ];
        for row in &report.details {
            expected.push(encode_win_ansi(&format!("{}:", row.label)));
            expected.push(encode_win_ansi(&row.value));
        }
        expected.push(encode_win_ansi(&report.price_line));
        expected.push(encode_win_ansi(&report.footer));

        assert_eq!(shown_strings(&layout(&report)), expected);
    }

    #[test]
    fn accented_text_uses_win_ansi_bytes() {
        assert_eq!(encode_win_ansi("Citroën"), b"Citro\xEBn".to_vec());
        assert_eq!(encode_win_ansi("Modèle"), b"Mod\xE8le".to_vec());
        assert_eq!(encode_win_ansi("日本"), b"??".to_vec());
    }

    #[test]
    fn encoded_pdf_has_a_single_a4_page() {
        let bytes = encode_pdf(&report()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[tokio::test]
    async fn write_report_overwrites_previous_export() {
        let dir = tempfile::tempdir().unwrap();
        let report = report();

        let first = write_report(&report, dir.path()).await.unwrap();
        let second = write_report(&report, dir.path()).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.file_name().unwrap(), "estimation_Citroën_C3.pdf");
        let bytes = std::fs::read(&second).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
