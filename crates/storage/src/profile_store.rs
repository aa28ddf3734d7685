use std::sync::Arc;

use edu_core::model::{Email, UserIdentity, UserProgress};
use tracing::debug;

use crate::records::{decode_identity, decode_progress, encode_identity, encode_progress};
use crate::repository::{KeyValueStore, Storage, StorageError};

/// Slot holding the signed-in identity.
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Key under which `email`'s progress is stored.
#[must_use]
pub fn progress_key(email: &Email) -> String {
    format!("progress_{email}")
}

/// Typed access to identity and per-user progress on top of a `KeyValueStore`.
#[derive(Clone)]
pub struct ProfileStore {
    kv: Arc<dyn KeyValueStore>,
}

impl ProfileStore {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    #[must_use]
    pub fn from_storage(storage: &Storage) -> Self {
        Self::new(Arc::clone(&storage.kv))
    }

    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if a stored identity cannot be decoded,
    /// or a backend error if it cannot be read.
    pub async fn load_identity(&self) -> Result<Option<UserIdentity>, StorageError> {
        let Some(raw) = self.kv.get(CURRENT_USER_KEY).await? else {
            return Ok(None);
        };
        decode_identity(&raw).map(Some)
    }

    /// # Errors
    ///
    /// Returns `StorageError` if encoding or the write fails.
    pub async fn save_identity(&self, identity: &UserIdentity) -> Result<(), StorageError> {
        let raw = encode_identity(identity)?;
        self.kv.set(CURRENT_USER_KEY, &raw).await?;
        debug!(email = %identity.email(), "identity saved");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend rejects the delete.
    pub async fn clear_identity(&self) -> Result<(), StorageError> {
        self.kv.remove(CURRENT_USER_KEY).await
    }

    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the stored record is malformed,
    /// or a backend error if it cannot be read.
    pub async fn load_progress(&self, email: &Email) -> Result<Option<UserProgress>, StorageError> {
        let Some(raw) = self.kv.get(&progress_key(email)).await? else {
            return Ok(None);
        };
        decode_progress(&raw).map(Some)
    }

    /// # Errors
    ///
    /// Returns `StorageError` if encoding or the write fails.
    pub async fn save_progress(
        &self,
        email: &Email,
        progress: &UserProgress,
    ) -> Result<(), StorageError> {
        let raw = encode_progress(progress)?;
        self.kv.set(&progress_key(email), &raw).await?;
        debug!(%email, bytes = raw.len(), "progress saved");
        Ok(())
    }
}
