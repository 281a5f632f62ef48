mod dashboard;
mod leaderboard;
mod login;
mod profile;
mod quiz_room;
mod register;
mod results;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use dashboard::DashboardView;
pub use leaderboard::LeaderboardView;
pub use login::LoginView;
pub use profile::ProfileView;
pub use quiz_room::QuizRoomView;
pub use register::RegisterView;
pub use results::ResultsView;
pub use state::{ViewError, ViewState, view_state_from_resource};
