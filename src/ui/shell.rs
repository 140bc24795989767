use dioxus::prelude::*;

use crate::app::Route;
use crate::ui::theme::{self, ColorScheme};

#[component]
pub fn Shell(children: Element) -> Element {
    let mut scheme = use_context::<Signal<ColorScheme>>();
    let nav = use_navigator();
    let current = scheme();

    rsx! {
        div { class: current.root_class(),
            header { class: "modern-header",
                button {
                    class: theme::btn_secondary(current),
                    onclick: move |_| {
                        nav.push(Route::Landing {});
                    },
                    "← Retour"
                }
                h1 { "Estimez le Prix de Votre Future Voiture" }
                button {
                    class: theme::btn_secondary(current),
                    onclick: move |_| scheme.set(current.toggled()),
                    "{current.toggle_label()}"
                }
            }
            main { class: "modern-main",
                {children}
            }
        }
    }
}
