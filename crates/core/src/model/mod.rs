mod course;
mod identity;
mod ids;
mod progress;
mod quiz;

pub use course::{Category, Course, Level, ParseCategoryError};
pub use identity::{CredentialsError, Email, MIN_PASSWORD_LEN, UserIdentity};
pub use ids::{CourseId, ParseIdError};
pub use progress::{EnrollOutcome, ProgressEntry, ProgressError, STUDY_HOURS_PER_QUIZ, UserProgress};
pub use quiz::{OPTION_COUNT, QuizBank, QuizError, QuizQuestion, Subject};
