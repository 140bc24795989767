use dioxus::prelude::*;

use crate::app::Route;
use crate::ui::theme::{self, ColorScheme};
use crate::util::version::version_label;

#[component]
pub fn LandingPage() -> Element {
    let scheme = use_context::<Signal<ColorScheme>>();
    let nav = use_navigator();
    let scheme = scheme();

    rsx! {
        div { class: scheme.root_class(),
            section { class: "intro-section",
                div { class: "intro-content",
                    h1 { "Simulez le Prix de Votre Prochaine Voiture" }
                    p { "Découvrez combien vaudra votre future voiture en quelques clics." }
                    button {
                        class: theme::btn_primary(scheme),
                        onclick: move |_| {
                            nav.push(Route::Estimate {});
                        },
                        "Estimer le prix de ma future voiture"
                    }
                }
                footer { class: theme::text_muted(scheme), "{version_label()}" }
            }
        }
    }
}
