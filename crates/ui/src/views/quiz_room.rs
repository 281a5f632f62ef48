use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use dioxus::core::Task;
use dioxus::document::eval;
use dioxus::prelude::*;
use dioxus_router::use_navigator;
use quiz_core::model::QuizId;
use quiz_core::session::{SessionOutcome, SessionPhase, Submission, TickOutcome};
use tracing::{debug, info};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    LegendEntryVm, OptionVm, PaletteButtonVm, QuizEffect, QuizIntent, QuizVm, legend,
};

const TICK: Duration = Duration::from_secs(1);

/// Everything the room renders, copied out of the view model.
#[derive(Clone, Debug, PartialEq)]
struct RoomSnapshot {
    timer: String,
    timer_low: bool,
    progress: String,
    prompt: String,
    options: Vec<OptionVm>,
    palette: Vec<PaletteButtonVm>,
    legend: Vec<LegendEntryVm>,
    mark_label: &'static str,
    can_previous: bool,
    can_next: bool,
    submitting: bool,
}

impl RoomSnapshot {
    fn of(vm: &QuizVm) -> Self {
        Self {
            timer: vm.timer_label(),
            timer_low: vm.timer_is_low(),
            progress: vm.progress_label(),
            prompt: vm.prompt().unwrap_or_default().to_string(),
            options: vm.options(),
            palette: vm.palette(),
            legend: legend(vm.session()),
            mark_label: vm.mark_label(),
            can_previous: vm.can_go_previous(),
            can_next: vm.can_go_next(),
            submitting: vm.is_submitting(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum RoomView {
    Loading,
    Running(RoomSnapshot),
    NoContent,
    Finished,
}

fn room_view(vm: Option<&QuizVm>) -> RoomView {
    let Some(vm) = vm else {
        return RoomView::Loading;
    };
    match vm.phase() {
        SessionPhase::Loading => RoomView::Loading,
        SessionPhase::InProgress | SessionPhase::Submitting => {
            RoomView::Running(RoomSnapshot::of(vm))
        }
        SessionPhase::Terminated(SessionOutcome::NoContent) => RoomView::NoContent,
        SessionPhase::Terminated(_) => RoomView::Finished,
    }
}

/// What the countdown task should do after the view model changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CountdownStep {
    Start,
    Stop,
    Keep,
}

/// Runs the countdown only while the session is in progress.
fn countdown_step(vm: Option<&QuizVm>, armed: bool) -> CountdownStep {
    let running = vm.is_some_and(QuizVm::is_running);
    match (running, armed) {
        (true, false) => CountdownStep::Start,
        (false, true) => CountdownStep::Stop,
        _ => CountdownStep::Keep,
    }
}

#[component]
pub fn QuizRoomView(quiz_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let quiz_sessions = ctx.quiz_sessions();

    let vm = use_signal(|| None::<QuizVm>);
    let countdown = use_hook(|| Rc::new(Cell::new(None::<Task>)));

    let resource = {
        let quiz_sessions = quiz_sessions.clone();
        use_resource(move || {
            let quiz_sessions = quiz_sessions.clone();
            let mut vm = vm;
            async move {
                let session = quiz_sessions.start(QuizId::new(quiz_id)).await;
                info!(
                    "quiz {quiz_id} opened with {} questions",
                    session.question_count()
                );
                vm.set(Some(QuizVm::new(session)));
                Ok::<_, ViewError>(())
            }
        })
    };
    let state = view_state_from_resource(&resource);

    let stop_countdown = {
        let countdown = Rc::clone(&countdown);
        move || {
            if let Some(task) = countdown.take() {
                task.cancel();
            }
        }
    };

    {
        let stop_countdown = stop_countdown.clone();
        use_drop(stop_countdown);
    }

    let finish = use_callback(move |submission: Submission| {
        let quiz_sessions = quiz_sessions.clone();
        let mut vm = vm;
        spawn(async move {
            debug!(
                "scoring quiz {} ({:?}, {} answers)",
                submission.quiz_id,
                submission.trigger,
                submission.answers.len()
            );
            let score = quiz_sessions.score(&submission).await;
            let outcome = vm.write().as_mut().and_then(|vm| vm.finish(score));
            if let Some(SessionOutcome::Scored { score, .. }) = outcome {
                let _ = navigator.push(Route::Results { score });
            }
        });
    });

    {
        let countdown = Rc::clone(&countdown);
        use_effect(move || {
            match countdown_step(vm.read().as_ref(), countdown.get().is_some()) {
                CountdownStep::Keep => return,
                CountdownStep::Stop => {
                    if let Some(task) = countdown.take() {
                        task.cancel();
                    }
                    return;
                }
                CountdownStep::Start => {}
            }
            let mut vm = vm;
            let task = spawn(async move {
                loop {
                    tokio::time::sleep(TICK).await;
                    let outcome = match vm.write().as_mut() {
                        Some(vm) => vm.tick(),
                        None => break,
                    };
                    match outcome {
                        TickOutcome::Running { .. } => {}
                        TickOutcome::Expired(submission) => {
                            info!("time expired, submitting automatically");
                            finish.call(submission);
                            break;
                        }
                        TickOutcome::Stopped => break,
                    }
                }
            });
            countdown.set(Some(task));
        });
    }

    let dispatch = {
        let stop_countdown = stop_countdown.clone();
        use_callback(move |intent: QuizIntent| {
            let mut vm = vm;
            let effect = match vm.write().as_mut() {
                Some(vm) => vm.apply(intent),
                None => return,
            };
            match effect {
                QuizEffect::None => {}
                QuizEffect::Score(submission) => {
                    stop_countdown();
                    finish.call(submission);
                }
                QuizEffect::Left => {
                    stop_countdown();
                    let _ = navigator.push(Route::Dashboard {});
                }
            }
        })
    };

    use_effect(move || {
        let _ = eval("document.getElementById(\"quiz-room\")?.focus();");
    });

    let on_key = move |evt: KeyboardEvent| {
        let key = evt.data.key().to_string();
        if let Some(intent) = QuizIntent::from_key(&key) {
            evt.prevent_default();
            dispatch.call(intent);
        }
    };

    let view = room_view(vm.read().as_ref());

    rsx! {
        div { class: "page quiz-room", id: "quiz-room", tabindex: "0", onkeydown: on_key,
            match (state, view) {
                (ViewState::Error(err), _) => rsx! {
                    div { class: "error-panel", p { "{err.message()}" } }
                },
                (ViewState::Idle | ViewState::Loading, _) | (_, RoomView::Loading) => rsx! {
                    p { class: "loading", "Loading quiz..." }
                },
                (_, RoomView::NoContent) => rsx! {
                    div { class: "terminal-panel",
                        h2 { "No questions available" }
                        p { "This quiz could not be loaded or has no questions yet." }
                        button {
                            class: "btn btn-primary",
                            onclick: move |_| {
                                let _ = navigator.push(Route::Dashboard {});
                            },
                            "Back to Dashboard"
                        }
                    }
                },
                (_, RoomView::Finished) => rsx! {
                    p { class: "loading", "Quiz finished." }
                },
                (_, RoomView::Running(room)) => rsx! {
                    RoomBody { room, dispatch }
                },
            }
        }
    }
}

#[component]
fn RoomBody(room: RoomSnapshot, dispatch: Callback<QuizIntent>) -> Element {
    let timer_class = if room.timer_low { "timer timer--low" } else { "timer" };
    let busy = room.submitting;

    rsx! {
        div { class: "quiz-layout",
            aside { class: "palette",
                div { class: "{timer_class}", "{room.timer}" }
                div { class: "palette-grid",
                    for cell in room.palette {
                        button {
                            key: "{cell.index}",
                            class: "{cell.classes()}",
                            disabled: busy,
                            onclick: move |_| dispatch.call(QuizIntent::GoTo(cell.index)),
                            "{cell.label}"
                        }
                    }
                }
                ul { class: "legend",
                    for entry in room.legend {
                        li { key: "{entry.label}",
                            span { class: "legend-swatch {entry.class}" }
                            "{entry.label} ({entry.count})"
                        }
                    }
                }
            }
            section { class: "question-panel",
                p { class: "progress", "{room.progress}" }
                h2 { class: "question-text", "{room.prompt}" }
                div { class: "options",
                    for choice in room.options {
                        button {
                            key: "{choice.letter}",
                            class: "{choice.classes()}",
                            disabled: busy || !choice.available,
                            onclick: move |_| dispatch.call(QuizIntent::Select(choice.slot)),
                            span { class: "option-letter", "{choice.letter}" }
                            span { class: "option-text", "{choice.text}" }
                        }
                    }
                }
                div { class: "question-actions",
                    button {
                        class: "btn btn-secondary",
                        disabled: busy || !room.can_previous,
                        onclick: move |_| dispatch.call(QuizIntent::Previous),
                        "Previous"
                    }
                    button {
                        class: "btn btn-secondary",
                        disabled: busy,
                        onclick: move |_| dispatch.call(QuizIntent::Clear),
                        "Clear Response"
                    }
                    button {
                        class: "btn btn-warning",
                        disabled: busy,
                        onclick: move |_| dispatch.call(QuizIntent::ToggleMark),
                        "{room.mark_label}"
                    }
                    button {
                        class: "btn btn-secondary",
                        disabled: busy || !room.can_next,
                        onclick: move |_| dispatch.call(QuizIntent::Next),
                        "Next"
                    }
                }
                div { class: "quiz-footer",
                    button {
                        class: "btn btn-danger",
                        disabled: busy,
                        onclick: move |_| dispatch.call(QuizIntent::Exit),
                        "Exit"
                    }
                    button {
                        class: "btn btn-primary",
                        disabled: busy,
                        onclick: move |_| dispatch.call(QuizIntent::Submit),
                        if busy { "Submitting..." } else { "Submit" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use quiz_core::QuizSession;
    use quiz_core::model::{Question, QuestionId};
    use quiz_core::session::TimeBudget;

    use super::*;

    fn session(count: u64) -> QuizSession {
        let mut session = QuizSession::new(QuizId::new(1), TimeBudget::default());
        session.load(
            (1..=count)
                .map(|id| {
                    Question::new(
                        QuestionId::new(id),
                        "Pick one",
                        ["a".into(), "b".into(), "c".into(), "d".into()],
                    )
                    .unwrap()
                })
                .collect(),
        );
        session
    }

    #[test]
    fn room_view_follows_phase() {
        assert_eq!(room_view(None), RoomView::Loading);

        let empty = QuizVm::new(session(0));
        assert_eq!(room_view(Some(&empty)), RoomView::NoContent);

        let mut vm = QuizVm::new(session(2));
        match room_view(Some(&vm)) {
            RoomView::Running(room) => {
                assert_eq!(room.timer, "30:00");
                assert_eq!(room.palette.len(), 2);
                assert!(!room.submitting);
            }
            other => panic!("unexpected view {other:?}"),
        }

        vm.apply(QuizIntent::Exit);
        assert_eq!(room_view(Some(&vm)), RoomView::Finished);
    }

    #[test]
    fn countdown_stops_after_manual_submit() {
        assert_eq!(countdown_step(None, false), CountdownStep::Keep);

        let mut vm = QuizVm::new(session(2));
        assert_eq!(countdown_step(Some(&vm), false), CountdownStep::Start);
        assert_eq!(countdown_step(Some(&vm), true), CountdownStep::Keep);
        assert!(matches!(vm.tick(), TickOutcome::Running { .. }));
        let remaining = vm.session().remaining_secs();

        assert!(matches!(vm.apply(QuizIntent::Submit), QuizEffect::Score(_)));
        assert_eq!(countdown_step(Some(&vm), true), CountdownStep::Stop);
        assert_eq!(countdown_step(Some(&vm), false), CountdownStep::Keep);
        for _ in 0..5 {
            assert_eq!(vm.tick(), TickOutcome::Stopped);
        }
        assert_eq!(vm.session().remaining_secs(), remaining);
    }

    #[test]
    fn countdown_stops_after_exit_and_expiry() {
        let mut vm = QuizVm::new(session(1));
        assert!(matches!(vm.apply(QuizIntent::Exit), QuizEffect::Left));
        assert_eq!(countdown_step(Some(&vm), true), CountdownStep::Stop);
        assert_eq!(vm.tick(), TickOutcome::Stopped);

        let mut short = QuizSession::new(QuizId::new(2), TimeBudget::from_secs(2).unwrap());
        short.load(session(1).questions().to_vec());
        let mut vm = QuizVm::new(short);
        assert!(matches!(vm.tick(), TickOutcome::Running { .. }));
        assert!(matches!(vm.tick(), TickOutcome::Expired(_)));
        assert_eq!(countdown_step(Some(&vm), true), CountdownStep::Stop);
        assert_eq!(vm.tick(), TickOutcome::Stopped);
    }
}
