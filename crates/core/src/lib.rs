#![forbid(unsafe_code)]

pub mod catalog;
pub mod model;
pub mod quiz_bank;
pub mod quiz_session;
pub mod time;

pub use catalog::Catalog;
pub use quiz_bank::builtin_quiz_bank;
pub use quiz_session::{QuestionView, QuizScore, QuizSession, QuizSessionError};
pub use time::Clock;
