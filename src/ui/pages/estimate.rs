use dioxus::prelude::*;
use log::debug;

use crate::{
    app::{export_report, load_models, spawn_app_task, submit_estimate, today, ClientHandle},
    domain::{
        render_report, EstimatorState, FieldName, FuelType, ModelRequest, ReportDocument, Transmission,
    },
    ui::{
        components::{
            form_field::{NumberField, SelectField, SelectOption},
            report_view::ReportPreview,
            toast::ToastMessage,
        },
        theme::{self, ColorScheme},
    },
};

#[component]
pub fn EstimatePage() -> Element {
    let state = use_context::<Signal<EstimatorState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let scheme = use_context::<Signal<ColorScheme>>()();
    let client = use_context::<ClientHandle>();
    let mut exporting = use_signal(|| false);

    let snapshot = state.read().clone();
    let draft = snapshot.draft().clone();
    let submitting = snapshot.is_submitting();
    let field_error = |field: FieldName| snapshot.field_error(field).map(str::to_string);

    let brand_options: Vec<SelectOption> = snapshot
        .catalog
        .brands()
        .iter()
        .map(|brand| (brand.clone(), brand.clone()))
        .collect();
    let model_options: Vec<SelectOption> = snapshot
        .catalog
        .models()
        .iter()
        .map(|model| (model.clone(), model.clone()))
        .collect();
    let transmission_options: Vec<SelectOption> = Transmission::ALL
        .iter()
        .map(|t| (t.wire_value().to_string(), t.label().to_string()))
        .collect();
    let fuel_options: Vec<SelectOption> = FuelType::ALL
        .iter()
        .map(|f| (f.wire_value().to_string(), f.label().to_string()))
        .collect();

    let models_loading = snapshot.catalog.models_loading();
    let model_placeholder = if models_loading {
        "Chargement des modèles..."
    } else {
        "Sélectionnez un modèle"
    };
    let model_disabled = submitting || models_loading || draft.brand.trim().is_empty();

    let report = snapshot
        .result()
        .map(|result| render_report(&result.query, result, today()));

    let on_brand = {
        let client = client.clone();
        move |value: String| {
            if let Some(request) = edit(state, FieldName::Brand, value) {
                spawn_app_task(load_models(state, client.clone(), request));
            }
        }
    };

    let on_submit = {
        let client = client.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            spawn_app_task(submit_estimate(state, client.clone()));
        }
    };

    let on_reset = move |_: MouseEvent| {
        let mut state = state;
        state.with_mut(|st| st.reset());
    };

    rsx! {
        section { class: "form-section",
            form { class: "{theme::panel(scheme)} styled-form estimate-form", onsubmit: on_submit,
                SelectField {
                    label: FieldName::Brand.label(),
                    placeholder: "Sélectionnez une marque",
                    value: draft.brand.clone(),
                    options: brand_options,
                    disabled: submitting,
                    error: field_error(FieldName::Brand),
                    scheme,
                    onchange: on_brand,
                }
                SelectField {
                    label: FieldName::Model.label(),
                    placeholder: model_placeholder,
                    value: draft.model.clone(),
                    options: model_options,
                    disabled: model_disabled,
                    error: field_error(FieldName::Model),
                    scheme,
                    onchange: move |value: String| {
                        edit(state, FieldName::Model, value);
                    },
                }
                SelectField {
                    label: FieldName::Transmission.label(),
                    placeholder: "Sélectionnez une transmission",
                    value: draft.transmission.clone(),
                    options: transmission_options,
                    disabled: submitting,
                    error: field_error(FieldName::Transmission),
                    scheme,
                    onchange: move |value: String| {
                        edit(state, FieldName::Transmission, value);
                    },
                }
                NumberField {
                    label: FieldName::FiscalPower.label(),
                    value: draft.fiscal_power.clone(),
                    disabled: submitting,
                    error: field_error(FieldName::FiscalPower),
                    scheme,
                    oninput: move |value: String| {
                        edit(state, FieldName::FiscalPower, value);
                    },
                }
                SelectField {
                    label: FieldName::FuelType.label(),
                    placeholder: "Sélectionnez un carburant",
                    value: draft.fuel_type.clone(),
                    options: fuel_options,
                    disabled: submitting,
                    error: field_error(FieldName::FuelType),
                    scheme,
                    onchange: move |value: String| {
                        edit(state, FieldName::FuelType, value);
                    },
                }
                NumberField {
                    label: FieldName::Mileage.label(),
                    value: draft.mileage.clone(),
                    disabled: submitting,
                    error: field_error(FieldName::Mileage),
                    scheme,
                    oninput: move |value: String| {
                        edit(state, FieldName::Mileage, value);
                    },
                }
                NumberField {
                    label: FieldName::Year.label(),
                    value: draft.year.clone(),
                    disabled: submitting,
                    error: field_error(FieldName::Year),
                    scheme,
                    oninput: move |value: String| {
                        edit(state, FieldName::Year, value);
                    },
                }
                div { class: "form-buttons",
                    button {
                        class: theme::btn_primary(scheme),
                        r#type: "submit",
                        disabled: submitting,
                        if submitting { "Calcul en cours..." } else { "Estimer le prix" }
                    }
                    button {
                        class: theme::btn_secondary(scheme),
                        r#type: "button",
                        onclick: on_reset,
                        "Réinitialiser"
                    }
                }
            }

            if let Some(message) = snapshot.error_message() {
                div { class: "error-box", "{message}" }
            }

            if let Some(report) = report {
                ReportPreview {
                    report,
                    scheme,
                    exporting: exporting(),
                    on_export: move |report: ReportDocument| {
                        exporting.set(true);
                        spawn_app_task(async move {
                            export_report(report, toasts).await;
                            // The page may be gone by now.
                            if let Ok(mut flag) = exporting.try_write() {
                                *flag = false;
                            }
                        });
                    },
                }
            }
        }
    }
}

/// Applies one edit; a brand change hands back the model load to run.
fn edit(
    mut state: Signal<EstimatorState>,
    field: FieldName,
    value: String,
) -> Option<ModelRequest> {
    match state.with_mut(|st| st.set_field(field, value)) {
        Ok(request) => request,
        Err(err) => {
            debug!("Ignored edit of {field:?}: {err}");
            None
        }
    }
}
