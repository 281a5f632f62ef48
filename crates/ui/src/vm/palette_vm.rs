use quiz_core::QuizSession;
use quiz_core::session::QuestionStatus;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaletteButtonVm {
    pub index: usize,
    pub label: String,
    pub class: &'static str,
    pub current: bool,
}

impl PaletteButtonVm {
    #[must_use]
    pub fn classes(&self) -> String {
        if self.current {
            format!("palette-btn {} palette-btn--current", self.class)
        } else {
            format!("palette-btn {}", self.class)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegendEntryVm {
    pub label: &'static str,
    pub class: &'static str,
    pub count: usize,
}

#[must_use]
pub fn status_class(status: QuestionStatus) -> &'static str {
    match status {
        QuestionStatus::AnsweredAndMarked => "palette-btn--answered-marked",
        QuestionStatus::MarkedOnly => "palette-btn--marked",
        QuestionStatus::AnsweredOnly => "palette-btn--answered",
        QuestionStatus::VisitedNotAnswered => "palette-btn--not-answered",
        QuestionStatus::NotVisited => "palette-btn--not-visited",
    }
}

#[must_use]
pub fn status_label(status: QuestionStatus) -> &'static str {
    match status {
        QuestionStatus::AnsweredAndMarked => "Answered & Marked",
        QuestionStatus::MarkedOnly => "Marked for Review",
        QuestionStatus::AnsweredOnly => "Answered",
        QuestionStatus::VisitedNotAnswered => "Not Answered",
        QuestionStatus::NotVisited => "Not Visited",
    }
}

#[must_use]
pub fn palette_buttons(session: &QuizSession) -> Vec<PaletteButtonVm> {
    session
        .statuses()
        .into_iter()
        .enumerate()
        .map(|(index, status)| PaletteButtonVm {
            index,
            label: (index + 1).to_string(),
            class: status_class(status),
            current: index == session.current_index(),
        })
        .collect()
}

#[must_use]
pub fn legend(session: &QuizSession) -> Vec<LegendEntryVm> {
    let counts = session.status_counts();
    QuestionStatus::ALL
        .into_iter()
        .map(|status| LegendEntryVm {
            label: status_label(status),
            class: status_class(status),
            count: counts.get(status),
        })
        .collect()
}
