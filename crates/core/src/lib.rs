pub mod error;
pub mod model;
pub mod session;
pub mod time;

pub use error::Error;
pub use session::QuizSession;
pub use time::Clock;
