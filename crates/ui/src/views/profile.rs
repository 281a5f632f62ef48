use dioxus::prelude::*;

use crate::context::{AppContext, use_current_user};
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{StatsVm, stats_vm};

#[derive(Clone, Debug, PartialEq)]
struct ProfileData {
    stats: StatsVm,
    offline: bool,
}

#[component]
pub fn ProfileView() -> Element {
    let ctx = use_context::<AppContext>();
    let user = use_current_user();
    let catalog = ctx.catalog();

    let resource = use_resource(move || {
        let catalog = catalog.clone();
        let user_id = user.get().map(|identity| identity.user.id);
        async move {
            let user_id = user_id.ok_or(ViewError::Unknown)?;
            let listing = catalog.user_stats(user_id).await.map_err(ViewError::from)?;
            Ok::<_, ViewError>(ProfileData {
                offline: listing.is_fallback(),
                stats: stats_vm(&listing.items),
            })
        }
    });
    let state = view_state_from_resource(&resource);
    let Some(identity) = user.get() else {
        return rsx! {};
    };

    rsx! {
        div { class: "page profile",
            header { class: "profile-header",
                span { class: "avatar avatar--large", "{identity.user.initial()}" }
                div {
                    h2 { "{identity.user.username}" }
                    p { class: "email", "{identity.user.email}" }
                }
            }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "loading", "Loading statistics..." }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "error-panel", p { "{err.message()}" } }
                },
                ViewState::Ready(data) => rsx! {
                    if data.offline {
                        p { class: "offline-notice", "Statistics are unavailable offline." }
                    }
                    div { class: "stats-grid",
                        div { class: "stat-card",
                            p { class: "stat-label", "Quizzes Taken" }
                            p { class: "stat-value", "{data.stats.total_quizzes}" }
                        }
                        div { class: "stat-card",
                            p { class: "stat-label", "Average Score" }
                            p { class: "stat-value", "{data.stats.average_score}" }
                        }
                        div { class: "stat-card",
                            p { class: "stat-label", "Highest Score" }
                            p { class: "stat-value", "{data.stats.highest_score}" }
                        }
                    }
                    h3 { "Recent Attempts" }
                    if data.stats.attempts.is_empty() {
                        p { class: "empty", "No quizzes taken yet." }
                    } else {
                        table { class: "attempts-table",
                            thead {
                                tr {
                                    th { "Quiz" }
                                    th { "Score" }
                                    th { "Date" }
                                }
                            }
                            tbody {
                                for attempt in data.stats.attempts {
                                    tr {
                                        td { "{attempt.quiz_title}" }
                                        td { "{attempt.score}" }
                                        td { "{attempt.date}" }
                                    }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}
