use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::routes::Route;

#[component]
pub fn ResultsView(score: u32) -> Element {
    let navigator = use_navigator();

    rsx! {
        div { class: "page results",
            div { class: "results-card",
                h2 { "Quiz Completed!" }
                p { class: "score-label", "Your Score" }
                p { class: "score", "{score}" }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| {
                        let _ = navigator.push(Route::Dashboard {});
                    },
                    "Back to Dashboard"
                }
            }
        }
    }
}
