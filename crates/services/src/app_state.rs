//! The application context handed to every UI action.
//!
//! `AppState` owns the current identity, progress, and quiz session and is
//! passed by `&mut` into each handler; there is no process-wide state. Every
//! handler returns a typed result and queues user-facing notifications, which
//! the presentation layer drains with `take_notifications`.

use std::sync::Arc;

use edu_core::model::{Course, CourseId, CredentialsError, EnrollOutcome, QuizBank, UserIdentity, UserProgress};
use edu_core::{Catalog, Clock, QuestionView, QuizScore, QuizSession, QuizSessionError, builtin_quiz_bank};
use storage::{ProfileStore, Storage};
use tracing::warn;

use crate::account_service::AccountService;
use crate::dashboard::DashboardView;
use crate::error::AppError;
use crate::notifications::{Notification, Notifications};

const SAVE_FAILED: &str = "Unable to save progress. Storage may be full.";

/// What an enroll action led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrollAction {
    Enrolled { title: String },
    AlreadyEnrolled { title: String },
    /// Nobody is signed in; the UI should show its login prompt.
    LoginRequired,
}

pub struct AppState {
    catalog: Arc<Catalog>,
    bank: Arc<QuizBank>,
    accounts: AccountService,
    clock: Clock,
    user: Option<UserIdentity>,
    progress: UserProgress,
    quiz: QuizSession,
    outbox: Notifications,
}

impl AppState {
    /// Wire the builtin catalog and quiz bank over `storage` and restore any
    /// saved session.
    pub async fn from_storage(storage: &Storage, clock: Clock) -> Self {
        let accounts = AccountService::new(clock, ProfileStore::from_storage(storage));
        Self::load(
            Arc::new(Catalog::builtin()),
            Arc::new(builtin_quiz_bank()),
            accounts,
            clock,
        )
        .await
    }

    /// Build the context and restore any saved session.
    pub async fn load(
        catalog: Arc<Catalog>,
        bank: Arc<QuizBank>,
        accounts: AccountService,
        clock: Clock,
    ) -> Self {
        let restored = accounts.restore().await;
        Self {
            catalog,
            bank,
            accounts,
            clock,
            user: restored.identity,
            progress: restored.progress,
            quiz: QuizSession::new(),
            outbox: Notifications::default(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn quiz_bank(&self) -> &QuizBank {
        &self.bank
    }

    #[must_use]
    pub fn current_user(&self) -> Option<&UserIdentity> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn progress(&self) -> &UserProgress {
        &self.progress
    }

    #[must_use]
    pub fn quiz(&self) -> &QuizSession {
        &self.quiz
    }

    #[must_use]
    pub fn dashboard(&self) -> DashboardView {
        DashboardView::from_progress(&self.progress)
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.outbox.take()
    }

    fn notify(&mut self, notification: Notification) {
        self.outbox.push(notification);
    }

    fn report(&mut self, err: AppError, message: impl AsRef<str>) -> AppError {
        self.notify(Notification::new(message, err.severity()));
        err
    }

    /// Best-effort save of the current progress. A failure is logged and
    /// surfaced as a warning; in-memory state is kept as is.
    async fn persist(&mut self) {
        let Some(user) = &self.user else {
            return;
        };
        if let Err(err) = self.accounts.save(user, &self.progress).await {
            warn!(email = %user.email(), error = %err, "failed to save user progress");
            self.notify(Notification::warning(SAVE_FAILED));
        }
    }

    //
    // ─── CATALOG ───────────────────────────────────────────────────────────────
    //

    /// Courses for a raw filter value from the UI (`"all"`, a category name,
    /// or anything else for an empty list).
    #[must_use]
    pub fn filter_courses(&self, category: &str) -> Vec<&Course> {
        self.catalog.list_courses_named(category)
    }

    /// # Errors
    ///
    /// Returns `AppError::UnknownCourse` if the id is not in the catalog.
    pub async fn enroll(&mut self, course_id: CourseId) -> Result<EnrollAction, AppError> {
        if self.user.is_none() {
            return Ok(EnrollAction::LoginRequired);
        }
        let Some(course) = self.catalog.course(course_id).cloned() else {
            let err = AppError::UnknownCourse(course_id);
            let message = format!("Course {course_id} was not found");
            return Err(self.report(err, message));
        };

        let title = course.title().to_string();
        match self.progress.enroll(&course, self.clock.now()) {
            EnrollOutcome::AlreadyEnrolled => {
                self.notify(Notification::info(format!(
                    "You are already enrolled in {title}"
                )));
                Ok(EnrollAction::AlreadyEnrolled { title })
            }
            EnrollOutcome::Enrolled => {
                self.notify(Notification::success(format!(
                    "Successfully enrolled in {title}!"
                )));
                self.persist().await;
                Ok(EnrollAction::Enrolled { title })
            }
        }
    }

    //
    // ─── QUIZ ──────────────────────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// Returns `AppError::Quiz` with `UnknownSubject` if the bank has no such quiz.
    pub fn start_quiz(&mut self, subject: &str) -> Result<QuestionView, AppError> {
        let bank = Arc::clone(&self.bank);
        self.quiz.start(&bank, subject).map_err(|err| {
            let message = format!("No quiz found for {}", subject.trim());
            self.report(err.into(), message)
        })
    }

    /// # Errors
    ///
    /// Returns `AppError::Quiz` when no quiz is running or the option is out of range.
    pub fn select_answer(&mut self, option: usize) -> Result<(), AppError> {
        self.quiz.select_answer(option).map_err(|err| self.report_quiz(err, "continuing"))
    }

    /// # Errors
    ///
    /// Returns `AppError::Quiz` with `NoAnswerSelected` when the current question is
    /// unanswered; the cursor does not move.
    pub fn next_question(&mut self) -> Result<QuestionView, AppError> {
        self.quiz.advance().map_err(|err| self.report_quiz(err, "continuing"))
    }

    /// # Errors
    ///
    /// Returns `AppError::Quiz` on the first question or outside a quiz.
    pub fn previous_question(&mut self) -> Result<QuestionView, AppError> {
        self.quiz.retreat().map_err(|err| self.report_quiz(err, "continuing"))
    }

    /// Score the quiz; a signed-in user's stats are updated and saved.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Quiz` if the quiz cannot be submitted yet.
    pub async fn submit_quiz(&mut self) -> Result<QuizScore, AppError> {
        let score = self
            .quiz
            .submit()
            .map_err(|err| self.report_quiz(err, "submitting"))?;
        if self.user.is_some() {
            self.progress.record_quiz_score(score.percentage);
            self.persist().await;
        }
        Ok(score)
    }

    pub fn reset_quiz(&mut self) {
        self.quiz.reset();
    }

    fn report_quiz(&mut self, err: QuizSessionError, action: &str) -> AppError {
        let message = match &err {
            QuizSessionError::NoAnswerSelected => {
                format!("Please select an answer before {action}")
            }
            other => {
                let text = other.to_string();
                let mut chars = text.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => text,
                }
            }
        };
        self.report(err.into(), message)
    }

    //
    // ─── SESSION ───────────────────────────────────────────────────────────────
    //

    /// Mock login. On success the user's saved progress replaces the in-memory one.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Credentials` for bad input (no state change) or
    /// `AppError::Storage` if the identity could not be saved.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<UserIdentity, AppError> {
        let signed_in = match self.accounts.login(email, password).await {
            Ok(signed_in) => signed_in,
            Err(err) => {
                let err = AppError::from(err);
                let message = match &err {
                    AppError::Credentials(CredentialsError::InvalidEmail) => {
                        "Please enter a valid email address"
                    }
                    AppError::Credentials(_) => "Password must be at least 6 characters",
                    _ => "Login failed. Please try again.",
                };
                return Err(self.report(err, message));
            }
        };

        if signed_in.progress_reset {
            self.notify(Notification::warning(
                "Saved progress could not be read and was reset.",
            ));
        }
        self.user = Some(signed_in.identity.clone());
        self.progress = signed_in.progress;
        self.notify(Notification::success("Successfully logged in!"));
        Ok(signed_in.identity)
    }

    /// Sign out. Returns `false` if nobody was signed in.
    ///
    /// The in-memory progress goes back to zero; the saved record stays.
    pub async fn logout(&mut self) -> bool {
        if self.user.take().is_none() {
            return false;
        }
        self.progress = UserProgress::default();
        if let Err(err) = self.accounts.logout().await {
            warn!(error = %err, "failed to clear saved login");
            self.notify(Notification::warning("Unable to clear saved login."));
        }
        self.notify(Notification::info("Successfully logged out!"));
        true
    }
}
