//! Shared error types for the services crate.

use thiserror::Error;

use edu_core::QuizSessionError;
use edu_core::model::{CourseId, CredentialsError};
use storage::StorageError;

use crate::notifications::Severity;

/// Errors emitted by `AccountService::login`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AccountError {
    #[error(transparent)]
    Credentials(#[from] CredentialsError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Broad class of a failed UI action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input (login form, missing quiz answer). Recovered locally.
    Validation,
    /// Unknown subject or course. Treated as an empty result.
    NotFound,
    /// Storage or serialization failure. In-memory state stays authoritative.
    Persistence,
}

/// Errors emitted by `AppState` actions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error(transparent)]
    Credentials(#[from] CredentialsError),
    #[error(transparent)]
    Quiz(#[from] QuizSessionError),
    #[error("course {0} does not exist")]
    UnknownCourse(CourseId),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Credentials(e) => AppError::Credentials(e),
            AccountError::Storage(e) => AppError::Storage(e),
        }
    }
}

impl AppError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Credentials(_) => ErrorKind::Validation,
            AppError::Quiz(QuizSessionError::UnknownSubject(_)) | AppError::UnknownCourse(_) => {
                ErrorKind::NotFound
            }
            AppError::Quiz(_) => ErrorKind::Validation,
            AppError::Storage(_) => ErrorKind::Persistence,
        }
    }

    /// Severity used when the error is reported back for a failed action.
    /// Background save failures are downgraded to warnings by the caller.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self.kind() {
            ErrorKind::Validation | ErrorKind::NotFound => Severity::Warning,
            ErrorKind::Persistence => Severity::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_onto_the_three_kinds() {
        assert_eq!(
            AppError::from(CredentialsError::InvalidEmail).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            AppError::from(QuizSessionError::NoAnswerSelected).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            AppError::from(QuizSessionError::UnknownSubject("x".into())).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(AppError::UnknownCourse(CourseId::new(9)).kind(), ErrorKind::NotFound);
        assert_eq!(
            AppError::from(StorageError::NotFound).kind(),
            ErrorKind::Persistence
        );
    }

    #[test]
    fn account_errors_keep_their_cause() {
        let err = AppError::from(AccountError::Credentials(CredentialsError::WeakPassword));
        assert!(matches!(err, AppError::Credentials(CredentialsError::WeakPassword)));
        assert_eq!(err.severity(), Severity::Warning);
        assert_eq!(
            AppError::from(StorageError::Connection("down".into())).severity(),
            Severity::Error
        );
    }
}
