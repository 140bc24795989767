use dioxus::prelude::*;

use crate::domain::ReportDocument;
use crate::ui::theme::{self, ColorScheme};

/// On-screen rendering of the same document the PDF export writes.
#[component]
pub fn ReportPreview(
    report: ReportDocument,
    scheme: ColorScheme,
    exporting: bool,
    on_export: EventHandler<ReportDocument>,
) -> Element {
    let export_copy = report.clone();
    rsx! {
        div { class: "{theme::panel(scheme)} result-box",
            header { class: "report-header",
                h2 { "{report.title}" }
                p { class: theme::text_muted(scheme), "{report.subtitle}" }
            }
            section {
                h3 { class: "report-section-title", "{report.details_heading}" }
                dl { class: "report-rows",
                    for row in report.details.iter() {
                        div { class: "report-row", key: "{row.label}",
                            dt { "{row.label}:" }
                            dd { "{row.value}" }
                        }
                    }
                }
            }
            p { class: "report-price", "{report.price_line}" }
            footer { class: theme::text_muted(scheme), "{report.footer}" }
            div { class: "pdf-download",
                button {
                    class: theme::btn_primary(scheme),
                    disabled: exporting,
                    onclick: move |_| on_export.call(export_copy.clone()),
                    if exporting { "Préparation du PDF..." } else { "Télécharger le Rapport ({report.file_name})" }
                }
            }
        }
    }
}
