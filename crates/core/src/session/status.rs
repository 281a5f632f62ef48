/// Palette classification of one question, derived from session state.
///
/// Variants are listed in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionStatus {
    AnsweredAndMarked,
    MarkedOnly,
    AnsweredOnly,
    VisitedNotAnswered,
    NotVisited,
}

impl QuestionStatus {
    pub const ALL: [QuestionStatus; 5] = [
        QuestionStatus::AnsweredOnly,
        QuestionStatus::VisitedNotAnswered,
        QuestionStatus::NotVisited,
        QuestionStatus::MarkedOnly,
        QuestionStatus::AnsweredAndMarked,
    ];

    /// Classifies a question from its three independent flags.
    #[must_use]
    pub fn derive(answered: bool, marked: bool, visited: bool) -> Self {
        match (answered, marked, visited) {
            (true, true, _) => QuestionStatus::AnsweredAndMarked,
            (false, true, _) => QuestionStatus::MarkedOnly,
            (true, false, _) => QuestionStatus::AnsweredOnly,
            (false, false, true) => QuestionStatus::VisitedNotAnswered,
            (false, false, false) => QuestionStatus::NotVisited,
        }
    }
}

/// Number of questions per status, for the palette legend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub answered_and_marked: usize,
    pub marked_only: usize,
    pub answered_only: usize,
    pub visited_not_answered: usize,
    pub not_visited: usize,
}

impl StatusCounts {
    #[must_use]
    pub fn tally(statuses: &[QuestionStatus]) -> Self {
        let mut counts = Self::default();
        for status in statuses {
            match status {
                QuestionStatus::AnsweredAndMarked => counts.answered_and_marked += 1,
                QuestionStatus::MarkedOnly => counts.marked_only += 1,
                QuestionStatus::AnsweredOnly => counts.answered_only += 1,
                QuestionStatus::VisitedNotAnswered => counts.visited_not_answered += 1,
                QuestionStatus::NotVisited => counts.not_visited += 1,
            }
        }
        counts
    }

    #[must_use]
    pub fn get(&self, status: QuestionStatus) -> usize {
        match status {
            QuestionStatus::AnsweredAndMarked => self.answered_and_marked,
            QuestionStatus::MarkedOnly => self.marked_only,
            QuestionStatus::AnsweredOnly => self.answered_only,
            QuestionStatus::VisitedNotAnswered => self.visited_not_answered,
            QuestionStatus::NotVisited => self.not_visited,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answered_and_marked_wins_over_everything() {
        assert_eq!(
            QuestionStatus::derive(true, true, true),
            QuestionStatus::AnsweredAndMarked
        );
        assert_eq!(
            QuestionStatus::derive(true, true, false),
            QuestionStatus::AnsweredAndMarked
        );
    }

    #[test]
    fn precedence_table() {
        assert_eq!(QuestionStatus::derive(false, true, false), QuestionStatus::MarkedOnly);
        assert_eq!(QuestionStatus::derive(true, false, true), QuestionStatus::AnsweredOnly);
        assert_eq!(
            QuestionStatus::derive(false, false, true),
            QuestionStatus::VisitedNotAnswered
        );
        assert_eq!(QuestionStatus::derive(false, false, false), QuestionStatus::NotVisited);
    }

    #[test]
    fn tally_counts_each_status() {
        let counts = StatusCounts::tally(&[
            QuestionStatus::AnsweredOnly,
            QuestionStatus::AnsweredOnly,
            QuestionStatus::NotVisited,
        ]);
        assert_eq!(counts.get(QuestionStatus::AnsweredOnly), 2);
        assert_eq!(counts.get(QuestionStatus::NotVisited), 1);
        assert_eq!(counts.get(QuestionStatus::MarkedOnly), 0);
    }
}
