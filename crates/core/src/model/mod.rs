mod answer;
pub mod catalog;
mod ids;
mod question;
mod user;

pub use answer::AnswerRecord;
pub use catalog::{LeaderboardEntry, QuizAttempt, QuizSummary, UserStats, WeeklyContest};
pub use ids::{ParseIdError, QuestionId, QuizId, UserId};
pub use question::{OptionSlot, Question, QuestionError};
pub use user::{AuthToken, Credentials, Identity, Registration, User, UserError, initial_of};
