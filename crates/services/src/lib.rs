#![forbid(unsafe_code)]

pub mod account_service;
pub mod app_state;
pub mod dashboard;
pub mod error;
pub mod notifications;

pub use edu_core::Clock;

pub use account_service::{AccountService, Restored, SignedIn};
pub use app_state::{AppState, EnrollAction};
pub use dashboard::{DashboardView, EMPTY_PROGRESS_MESSAGE, ProgressItemView};
pub use error::{AccountError, AppError, ErrorKind};
pub use notifications::{Notification, Notifications, Severity, sanitize_markup};
