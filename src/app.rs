use std::future::Future;

use dioxus::{core::spawn_forever, prelude::*, signals::Signal};
use log::{error, info, warn};
use time::OffsetDateTime;

use crate::{
    domain::{EstimatorState, ModelRequest, ReportDocument, SubmitRejected},
    infra::{
        estimator::{EstimatorClient, TRANSPORT_FAILURE},
        report_pdf::save_report,
    },
    ui::{
        components::toast::{push_toast, Toast, ToastKind, ToastMessage},
        pages::{EstimatePage, LandingPage},
        shell::Shell,
        theme::ColorScheme,
    },
    util::assets,
};

const CATALOG_FALLBACK_NOTICE: &str =
    "Catalogue des marques indisponible : liste par défaut affichée.";

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Landing {},
    #[route("/estimate")]
    Estimate {},
}

/// Shared estimator handle; `None` when the HTTP client could not be built.
pub type ClientHandle = Option<EstimatorClient>;

#[component]
pub fn App() -> Element {
    let state = use_signal(EstimatorState::default);
    use_context_provider(|| state);

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    let scheme = use_signal(ColorScheme::default);
    use_context_provider(|| scheme);

    let client: ClientHandle = use_hook(|| match EstimatorClient::new() {
        Ok(client) => {
            info!(
                "Estimator client ready (base {}, timeout {:?})",
                client.base_url(),
                client.timeout()
            );
            Some(client)
        }
        Err(err) => {
            warn!("Failed to initialise estimator client: {err}");
            None
        }
    });
    use_context_provider(|| client.clone());

    use_brand_catalog(state, toasts, client);

    rsx! {
        document::Style { "{assets::main_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

pub fn current_year() -> i32 {
    OffsetDateTime::now_utc().year()
}

pub fn today() -> time::Date {
    OffsetDateTime::now_utc().date()
}

/// Starts work that writes app-level state. The task lives on the root scope,
/// so leaving the page that started it does not cancel it.
pub fn spawn_app_task(task: impl Future<Output = ()> + 'static) {
    spawn_forever(task);
}

/// Write access to the estimator state for the async glue below.
///
/// The glue only ever writes, so a task running it never subscribes to the
/// state it updates.
pub trait StateStore {
    fn update<R>(&mut self, f: impl FnOnce(&mut EstimatorState) -> R) -> R;
}

impl StateStore for Signal<EstimatorState> {
    fn update<R>(&mut self, f: impl FnOnce(&mut EstimatorState) -> R) -> R {
        self.with_mut(f)
    }
}

/// Starts the single brand fetch of the session for the calling component.
fn use_brand_catalog(
    state: Signal<EstimatorState>,
    toasts: Signal<Vec<ToastMessage>>,
    client: ClientHandle,
) {
    use_hook(move || {
        spawn(async move {
            if load_brands(state, client).await {
                push_toast(toasts, ToastKind::Warning, CATALOG_FALLBACK_NOTICE);
            }
        });
    });
}

/// Loads the brand list; any failure falls back to the default set.
///
/// Returns whether the fallback was used.
pub async fn load_brands<S: StateStore>(mut state: S, client: ClientHandle) -> bool {
    let outcome = match client {
        Some(client) => client.brands().await,
        None => return state.update(|st| st.catalog.apply_brands::<()>(Err(()))),
    };

    match &outcome {
        Ok(brands) => info!("Loaded {} brands", brands.len()),
        Err(err) => warn!("Brand catalog unavailable, using defaults: {err}"),
    }
    state.update(|st| st.catalog.apply_brands(outcome))
}

/// Fetches the models for `request.brand` and applies them only if no newer
/// brand was selected meanwhile.
pub async fn load_models<S: StateStore>(mut state: S, client: ClientHandle, request: ModelRequest) {
    let outcome = match client {
        Some(client) => client.models(&request.brand).await,
        None => {
            state.update(|st| st.apply_models::<()>(&request, Err(())));
            return;
        }
    };

    if let Err(err) = &outcome {
        warn!("Model catalog unavailable for {}: {err}", request.brand);
    }
    let applied = state.update(|st| st.apply_models(&request, outcome));
    if !applied {
        info!("Discarded stale model list for {}", request.brand);
    }
}

/// Runs one submit cycle: validate, call the estimator, record the outcome.
pub async fn submit_estimate<S: StateStore>(mut state: S, client: ClientHandle) {
    let ticket = match state.update(|st| st.begin_submit(current_year())) {
        Ok(ticket) => ticket,
        Err(SubmitRejected::InProgress) => return,
        Err(SubmitRejected::Invalid(errors)) => {
            info!("Submission blocked by {} invalid field(s)", errors.len());
            return;
        }
    };

    let outcome = match client {
        Some(client) => client
            .predict(&ticket.query)
            .await
            .map_err(|err| err.user_message()),
        None => Err(TRANSPORT_FAILURE.to_string()),
    };

    if let Ok(result) = &outcome {
        info!("Estimated price: {} MAD", result.price);
    }
    let applied = state.update(|st| st.complete_submit(&ticket, outcome));
    if !applied {
        info!("Discarded outcome of a submission that was reset");
    }
}

/// Writes the report PDF and reports the outcome through a toast.
pub async fn export_report(report: ReportDocument, toasts: Signal<Vec<ToastMessage>>) {
    match save_report(&report).await {
        Ok(path) => push_toast(
            toasts,
            ToastKind::Success,
            format!("Rapport enregistré : {}", path.display()),
        ),
        Err(err) => {
            error!("Failed to export report: {err}");
            push_toast(toasts, ToastKind::Error, "Échec de l'export du rapport.");
        }
    }
}

#[component]
pub fn Landing() -> Element {
    rsx! { LandingPage {} }
}

#[component]
pub fn Estimate() -> Element {
    rsx! { Shell { EstimatePage {} } }
}
