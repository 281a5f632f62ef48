use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{LeaderboardRowVm, leaderboard_rows};

#[derive(Clone, Debug, PartialEq)]
struct LeaderboardData {
    rows: Vec<LeaderboardRowVm>,
    offline: bool,
}

#[component]
pub fn LeaderboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();

    let resource = use_resource(move || {
        let catalog = catalog.clone();
        async move {
            let listing = catalog.leaderboard().await.map_err(ViewError::from)?;
            Ok::<_, ViewError>(LeaderboardData {
                offline: listing.is_fallback(),
                rows: leaderboard_rows(&listing.items),
            })
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page leaderboard",
            h2 { "Global Leaderboard" }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "loading", "Loading leaderboard..." }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "error-panel", p { "{err.message()}" } }
                },
                ViewState::Ready(data) => rsx! {
                    if data.offline {
                        p { class: "offline-notice", "Showing offline data." }
                    }
                    if data.rows.is_empty() {
                        p { class: "empty", "No rankings yet." }
                    } else {
                        table { class: "leaderboard-table",
                            thead {
                                tr {
                                    th { "Rank" }
                                    th { "User" }
                                    th { "Score" }
                                }
                            }
                            tbody {
                                for row in data.rows {
                                    tr {
                                        key: "{row.rank}-{row.username}",
                                        class: "{row.classes()}",
                                        td { class: "rank", "#{row.rank}" }
                                        td {
                                            span { class: "avatar", "{row.initial}" }
                                            "{row.username}"
                                        }
                                        td { class: "score", "{row.score}" }
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
