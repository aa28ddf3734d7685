use std::collections::HashSet;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::course::Course;
use crate::model::ids::CourseId;

/// Mock study time credited for every completed quiz.
pub const STUDY_HOURS_PER_QUIZ: f64 = 0.5;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Raised when a persisted progress record violates an invariant.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("progress for course {course_id} is {percent}%, expected 0..=100")]
    PercentOutOfRange { course_id: CourseId, percent: u32 },

    #[error("quiz score average {0} is outside 0..=100")]
    AverageOutOfRange(u32),

    #[error("study time must be a finite, non-negative number of hours (got {0})")]
    InvalidStudyTime(f64),

    #[error("course {0} appears more than once")]
    DuplicateCourse(CourseId),
}

//
// ─── ENTRY ─────────────────────────────────────────────────────────────────────
//

/// One enrolled course in a user's progress list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEntry {
    pub course_id: CourseId,
    pub course_title: String,
    pub progress_percent: u8,
    pub started_at: DateTime<Utc>,
}

/// What `UserProgress::enroll` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollOutcome {
    Enrolled,
    AlreadyEnrolled,
}

//
// ─── AGGREGATE ─────────────────────────────────────────────────────────────────
//

/// A user's learning stats and enrolled courses.
///
/// The zero value (`Default`) is what an anonymous or brand-new user sees.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserProgress {
    courses_enrolled: u32,
    quiz_score_average: u8,
    study_time_hours: f64,
    certificates: u32,
    progress: Vec<ProgressEntry>,
}

impl UserProgress {
    /// Rehydrate progress from storage, checking the invariants `enroll` and
    /// `record_quiz_score` maintain.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` describing the first violated invariant.
    pub fn from_persisted(
        courses_enrolled: u32,
        quiz_score_average: u32,
        study_time_hours: f64,
        certificates: u32,
        progress: Vec<ProgressEntry>,
    ) -> Result<Self, ProgressError> {
        let quiz_score_average = u8::try_from(quiz_score_average)
            .ok()
            .filter(|avg| *avg <= 100)
            .ok_or(ProgressError::AverageOutOfRange(quiz_score_average))?;
        if !study_time_hours.is_finite() || study_time_hours < 0.0 {
            return Err(ProgressError::InvalidStudyTime(study_time_hours));
        }

        let mut seen = HashSet::with_capacity(progress.len());
        for entry in &progress {
            if entry.progress_percent > 100 {
                return Err(ProgressError::PercentOutOfRange {
                    course_id: entry.course_id,
                    percent: u32::from(entry.progress_percent),
                });
            }
            if !seen.insert(entry.course_id) {
                return Err(ProgressError::DuplicateCourse(entry.course_id));
            }
        }

        Ok(Self {
            courses_enrolled,
            quiz_score_average,
            study_time_hours,
            certificates,
            progress,
        })
    }

    #[must_use]
    pub fn courses_enrolled(&self) -> u32 {
        self.courses_enrolled
    }

    #[must_use]
    pub fn quiz_score_average(&self) -> u8 {
        self.quiz_score_average
    }

    #[must_use]
    pub fn study_time_hours(&self) -> f64 {
        self.study_time_hours
    }

    #[must_use]
    pub fn certificates(&self) -> u32 {
        self.certificates
    }

    #[must_use]
    pub fn entries(&self) -> &[ProgressEntry] {
        &self.progress
    }

    #[must_use]
    pub fn is_enrolled(&self, course_id: CourseId) -> bool {
        self.progress.iter().any(|p| p.course_id == course_id)
    }

    /// Add `course` at 0% unless it is already in the list.
    pub fn enroll(&mut self, course: &Course, now: DateTime<Utc>) -> EnrollOutcome {
        if self.is_enrolled(course.id()) {
            return EnrollOutcome::AlreadyEnrolled;
        }
        self.progress.push(ProgressEntry {
            course_id: course.id(),
            course_title: course.title().to_string(),
            progress_percent: 0,
            started_at: now,
        });
        self.courses_enrolled = self.courses_enrolled.saturating_add(1);
        EnrollOutcome::Enrolled
    }

    /// Fold a finished quiz into the stats and return the new average.
    ///
    /// A zero average is replaced outright; otherwise the new value is
    /// `round((average + score) / 2)`, rounding halves up. This is a two-term
    /// blend, not a cumulative mean. Scores above 100 are clamped.
    pub fn record_quiz_score(&mut self, score: u8) -> u8 {
        let score = score.min(100);
        self.quiz_score_average = if self.quiz_score_average == 0 {
            score
        } else {
            let sum = u16::from(self.quiz_score_average) + u16::from(score);
            // sum <= 200, so the halved value always fits.
            u8::try_from(sum.div_ceil(2)).unwrap_or(100)
        };
        self.study_time_hours += STUDY_HOURS_PER_QUIZ;
        self.quiz_score_average
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::course::{Category, Level};
    use crate::time::fixed_now;

    fn course(id: u32, title: &str) -> Course {
        Course::new(
            CourseId::new(id),
            title,
            "desc",
            Category::Programming,
            Level::Beginner,
            "6 weeks",
            "fab fa-js",
        )
    }

    #[test]
    fn enroll_appends_entry_at_zero_percent() {
        let mut progress = UserProgress::default();
        let outcome = progress.enroll(&course(1, "Intro"), fixed_now());

        assert_eq!(outcome, EnrollOutcome::Enrolled);
        assert_eq!(progress.courses_enrolled(), 1);
        let entry = &progress.entries()[0];
        assert_eq!(entry.course_id, CourseId::new(1));
        assert_eq!(entry.course_title, "Intro");
        assert_eq!(entry.progress_percent, 0);
        assert_eq!(entry.started_at, fixed_now());
    }

    #[test]
    fn enrolling_twice_is_a_no_op() {
        let mut progress = UserProgress::default();
        progress.enroll(&course(1, "Intro"), fixed_now());
        let outcome = progress.enroll(&course(1, "Intro"), fixed_now());

        assert_eq!(outcome, EnrollOutcome::AlreadyEnrolled);
        assert_eq!(progress.courses_enrolled(), 1);
        assert_eq!(progress.entries().len(), 1);
    }

    #[test]
    fn first_score_sets_average_directly() {
        let mut progress = UserProgress::default();
        assert_eq!(progress.record_quiz_score(67), 67);
        assert!((progress.study_time_hours() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn later_scores_blend_with_half_up_rounding() {
        let mut progress = UserProgress::default();
        progress.record_quiz_score(100);
        assert_eq!(progress.record_quiz_score(33), 67);
        assert_eq!(progress.record_quiz_score(100), 84);
        assert!((progress.study_time_hours() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn blend_is_not_a_true_mean() {
        let mut progress = UserProgress::default();
        for score in [100, 0, 0] {
            progress.record_quiz_score(score);
        }
        // true mean would be 33
        assert_eq!(progress.quiz_score_average(), 25);
    }

    #[test]
    fn zero_average_is_overwritten_by_next_score() {
        let mut progress = UserProgress::default();
        progress.record_quiz_score(0);
        assert_eq!(progress.record_quiz_score(80), 80);
    }

    #[test]
    fn from_persisted_rejects_duplicate_courses() {
        let entry = ProgressEntry {
            course_id: CourseId::new(2),
            course_title: "Design".into(),
            progress_percent: 10,
            started_at: fixed_now(),
        };
        let err = UserProgress::from_persisted(2, 50, 1.0, 0, vec![entry.clone(), entry]).unwrap_err();
        assert_eq!(err, ProgressError::DuplicateCourse(CourseId::new(2)));
    }

    #[test]
    fn from_persisted_rejects_out_of_range_numbers() {
        assert_eq!(
            UserProgress::from_persisted(0, 101, 0.0, 0, Vec::new()).unwrap_err(),
            ProgressError::AverageOutOfRange(101)
        );
        assert!(matches!(
            UserProgress::from_persisted(0, 0, -0.5, 0, Vec::new()).unwrap_err(),
            ProgressError::InvalidStudyTime(_)
        ));
        let entry = ProgressEntry {
            course_id: CourseId::new(1),
            course_title: "Intro".into(),
            progress_percent: 120,
            started_at: fixed_now(),
        };
        assert!(matches!(
            UserProgress::from_persisted(1, 0, 0.0, 0, vec![entry]).unwrap_err(),
            ProgressError::PercentOutOfRange { percent: 120, .. }
        ));
    }
}
