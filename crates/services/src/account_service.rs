use edu_core::Clock;
use edu_core::model::{UserIdentity, UserProgress};
use storage::{ProfileStore, StorageError};
use tracing::{info, warn};

use crate::error::AccountError;

/// State recovered at startup.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Restored {
    pub identity: Option<UserIdentity>,
    pub progress: UserProgress,
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedIn {
    pub identity: UserIdentity,
    pub progress: UserProgress,
    /// True when stored progress existed but was unreadable and was replaced by zero progress.
    pub progress_reset: bool,
}

/// Mock login plus identity/progress persistence.
///
/// Nothing here talks to a remote authority; any well-formed email and long
/// enough password is accepted.
#[derive(Clone)]
pub struct AccountService {
    clock: Clock,
    profiles: ProfileStore,
}

impl AccountService {
    #[must_use]
    pub fn new(clock: Clock, profiles: ProfileStore) -> Self {
        Self { clock, profiles }
    }

    /// Recover the previous session.
    ///
    /// Any read or decode failure yields the anonymous default; partially
    /// restored state is never returned.
    pub async fn restore(&self) -> Restored {
        match self.try_restore().await {
            Ok(restored) => restored,
            Err(err) => {
                warn!(error = %err, "failed to restore saved session, starting anonymous");
                Restored::default()
            }
        }
    }

    async fn try_restore(&self) -> Result<Restored, StorageError> {
        let Some(identity) = self.profiles.load_identity().await? else {
            return Ok(Restored::default());
        };
        let progress = self
            .profiles
            .load_progress(identity.email())
            .await?
            .unwrap_or_default();
        Ok(Restored {
            identity: Some(identity),
            progress,
        })
    }

    /// Validate credentials, persist the identity, and load that user's progress.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::Credentials` for a malformed email or short password
    /// (nothing is written), or `AccountError::Storage` if the identity cannot be saved.
    pub async fn login(&self, email: &str, password: &str) -> Result<SignedIn, AccountError> {
        let identity = UserIdentity::sign_in(email, password, self.clock.now())?;
        self.profiles.save_identity(&identity).await?;

        let (progress, progress_reset) = match self.profiles.load_progress(identity.email()).await
        {
            Ok(progress) => (progress.unwrap_or_default(), false),
            Err(err) => {
                warn!(email = %identity.email(), error = %err, "stored progress unreadable, starting fresh");
                (UserProgress::default(), true)
            }
        };

        info!(email = %identity.email(), "logged in");
        Ok(SignedIn {
            identity,
            progress,
            progress_reset,
        })
    }

    /// Forget the stored identity. Progress records are left in place.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the identity slot cannot be cleared.
    pub async fn logout(&self) -> Result<(), StorageError> {
        self.profiles.clear_identity().await?;
        info!("logged out");
        Ok(())
    }

    /// Write `progress` under `identity`'s email.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on encoding or backend failure; callers treat it as non-fatal.
    pub async fn save(
        &self,
        identity: &UserIdentity,
        progress: &UserProgress,
    ) -> Result<(), StorageError> {
        self.profiles.save_progress(identity.email(), progress).await
    }
}
