use dioxus::prelude::*;
use dioxus_router::use_navigator;
use quiz_core::model::QuizSummary;

use crate::context::{AppContext, use_current_user};
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    ALL_CATEGORIES, ContestBannerVm, category_options, contest_banner, parse_join_id, quiz_cards,
};

#[derive(Clone, Debug, PartialEq)]
struct DashboardData {
    quizzes: Vec<QuizSummary>,
    contest: Option<ContestBannerVm>,
    offline: bool,
}

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let user = use_current_user();
    let navigator = use_navigator();
    let catalog = ctx.catalog();

    let mut category = use_signal(|| ALL_CATEGORIES.to_string());
    let mut join_input = use_signal(String::new);
    let mut join_error = use_signal(|| false);
    let mut reminder_set = use_signal(|| false);

    let resource = use_resource(move || {
        let catalog = catalog.clone();
        async move {
            let quizzes = catalog.quizzes().await.map_err(ViewError::from)?;
            // The contest banner is optional; a failure only hides it.
            let contests = catalog.weekly_contests().await.ok();
            let offline = quizzes.is_fallback()
                || contests.as_ref().is_some_and(|listing| listing.is_fallback());
            Ok::<_, ViewError>(DashboardData {
                contest: contests.and_then(|listing| contest_banner(&listing.items)),
                quizzes: quizzes.items,
                offline,
            })
        }
    });
    let state = view_state_from_resource(&resource);

    let on_join = move |evt: FormEvent| {
        evt.prevent_default();
        match parse_join_id(&join_input.read()) {
            Some(quiz_id) => {
                join_error.set(false);
                let _ = navigator.push(Route::Quiz { quiz_id });
            }
            None => join_error.set(true),
        }
    };

    let greeting = user
        .get()
        .map_or_else(String::new, |identity| identity.user.username);

    rsx! {
        div { class: "page dashboard",
            h2 { "Welcome back, {greeting}" }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "loading", "Loading quizzes..." }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "error-panel",
                        p { "{err.message()}" }
                        button {
                            class: "btn btn-secondary",
                            onclick: move |_| {
                                let mut resource = resource;
                                resource.restart();
                            },
                            "Retry"
                        }
                    }
                },
                ViewState::Ready(data) => {
                    let options = category_options(&data.quizzes);
                    let cards = quiz_cards(&data.quizzes, &category.read());
                    rsx! {
                        if data.offline {
                            p { class: "offline-notice",
                                "Showing offline data. Live content is unavailable right now."
                            }
                        }
                        if let Some(contest) = data.contest {
                            section { class: "contest-banner",
                                div {
                                    h3 { "{contest.title}" }
                                    p { "{contest.window}" }
                                    p { class: "prize", "Prize pool: {contest.prize_pool}" }
                                }
                                div { class: "contest-actions",
                                    button { class: "btn btn-primary", disabled: true, "JOIN NOW" }
                                    button {
                                        class: "btn btn-secondary",
                                        onclick: move |_| reminder_set.toggle(),
                                        if reminder_set() { "Reminder set" } else { "Set reminder" }
                                    }
                                }
                            }
                        }
                        form { class: "join-form", onsubmit: on_join,
                            input {
                                r#type: "text",
                                placeholder: "Enter quiz ID",
                                value: "{join_input}",
                                oninput: move |evt| join_input.set(evt.value()),
                            }
                            button { class: "btn btn-primary", r#type: "submit", "Join" }
                            if join_error() {
                                p { class: "form-error", "Please enter a valid quiz ID." }
                            }
                        }
                        div { class: "category-filter",
                            label { r#for: "category", "Category" }
                            select {
                                id: "category",
                                value: "{category}",
                                onchange: move |evt| category.set(evt.value()),
                                for name in options {
                                    option { value: "{name}", "{name}" }
                                }
                            }
                        }
                        if cards.is_empty() {
                            p { class: "empty", "No quizzes available." }
                        }
                        div { class: "quiz-grid",
                            for card in cards {
                                div { class: "quiz-card", key: "{card.id}",
                                    span { class: "badge", "{card.category}" }
                                    h3 { "{card.title}" }
                                    p { "{card.question_label}" }
                                    button {
                                        class: "btn btn-primary",
                                        onclick: move |_| {
                                            let quiz_id = card.id;
                                            let _ = navigator.push(Route::Quiz { quiz_id });
                                        },
                                        "Start Quiz"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
