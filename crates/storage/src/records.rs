//! Persisted shapes for identity and progress.
//!
//! These mirror the domain types so the key-value layer can serialize them
//! without leaking storage concerns (field naming, JSON) into `edu-core`.

use chrono::{DateTime, Utc};
use edu_core::model::{CourseId, ProgressEntry, UserIdentity, UserProgress};
use serde::{Deserialize, Serialize};

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityRecord {
    pub email: String,
    pub display_name: String,
    pub login_timestamp: DateTime<Utc>,
}

impl IdentityRecord {
    #[must_use]
    pub fn from_identity(identity: &UserIdentity) -> Self {
        Self {
            email: identity.email().as_str().to_string(),
            display_name: identity.display_name().to_string(),
            login_timestamp: identity.login_at(),
        }
    }

    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the stored email no longer validates.
    pub fn into_identity(self) -> Result<UserIdentity, StorageError> {
        UserIdentity::from_persisted(self.email, self.display_name, self.login_timestamp).map_err(ser)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntryRecord {
    pub course_id: CourseId,
    pub course_title: String,
    pub progress_percent: u32,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub courses_enrolled: u32,
    pub quiz_score_average: u32,
    pub study_time_hours: f64,
    pub certificates: u32,
    pub progress: Vec<ProgressEntryRecord>,
}

impl ProgressRecord {
    #[must_use]
    pub fn from_progress(progress: &UserProgress) -> Self {
        Self {
            courses_enrolled: progress.courses_enrolled(),
            quiz_score_average: u32::from(progress.quiz_score_average()),
            study_time_hours: progress.study_time_hours(),
            certificates: progress.certificates(),
            progress: progress
                .entries()
                .iter()
                .map(|e| ProgressEntryRecord {
                    course_id: e.course_id,
                    course_title: e.course_title.clone(),
                    progress_percent: u32::from(e.progress_percent),
                    started_at: e.started_at,
                })
                .collect(),
        }
    }

    /// Convert back into domain progress, enforcing its invariants.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for out-of-range or duplicate entries.
    pub fn into_progress(self) -> Result<UserProgress, StorageError> {
        let entries = self
            .progress
            .into_iter()
            .map(|e| {
                let progress_percent = u8::try_from(e.progress_percent).map_err(|_| {
                    StorageError::Serialization(format!(
                        "progress for course {} is {}%",
                        e.course_id, e.progress_percent
                    ))
                })?;
                Ok(ProgressEntry {
                    course_id: e.course_id,
                    course_title: e.course_title,
                    progress_percent,
                    started_at: e.started_at,
                })
            })
            .collect::<Result<Vec<_>, StorageError>>()?;

        UserProgress::from_persisted(
            self.courses_enrolled,
            self.quiz_score_average,
            self.study_time_hours,
            self.certificates,
            entries,
        )
        .map_err(ser)
    }
}

/// # Errors
///
/// Returns `StorageError::Serialization` if JSON encoding fails.
pub fn encode_identity(identity: &UserIdentity) -> Result<String, StorageError> {
    serde_json::to_string(&IdentityRecord::from_identity(identity)).map_err(ser)
}

/// # Errors
///
/// Returns `StorageError::Serialization` for malformed JSON or an invalid identity.
pub fn decode_identity(raw: &str) -> Result<UserIdentity, StorageError> {
    serde_json::from_str::<IdentityRecord>(raw)
        .map_err(ser)?
        .into_identity()
}

/// # Errors
///
/// Returns `StorageError::Serialization` if JSON encoding fails.
pub fn encode_progress(progress: &UserProgress) -> Result<String, StorageError> {
    serde_json::to_string(&ProgressRecord::from_progress(progress)).map_err(ser)
}

/// # Errors
///
/// Returns `StorageError::Serialization` for malformed JSON or violated invariants.
pub fn decode_progress(raw: &str) -> Result<UserProgress, StorageError> {
    serde_json::from_str::<ProgressRecord>(raw)
        .map_err(ser)?
        .into_progress()
}
