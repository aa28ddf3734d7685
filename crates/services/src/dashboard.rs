use edu_core::model::UserProgress;

/// Shown in place of the progress list when nothing is enrolled.
pub const EMPTY_PROGRESS_MESSAGE: &str =
    "No courses enrolled yet. Browse our courses to get started!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressItemView {
    pub title: String,
    pub percent: u8,
}

/// Display-ready stats for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub courses_enrolled: String,
    pub quiz_score: String,
    pub study_time: String,
    pub certificates: String,
    pub items: Vec<ProgressItemView>,
}

impl DashboardView {
    #[must_use]
    pub fn from_progress(progress: &UserProgress) -> Self {
        Self {
            courses_enrolled: progress.courses_enrolled().to_string(),
            quiz_score: format!("{}%", progress.quiz_score_average()),
            study_time: format!("{}h", progress.study_time_hours()),
            certificates: progress.certificates().to_string(),
            items: progress
                .entries()
                .iter()
                .map(|e| ProgressItemView {
                    title: e.course_title.clone(),
                    percent: e.progress_percent,
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn empty_message(&self) -> Option<&'static str> {
        self.items.is_empty().then_some(EMPTY_PROGRESS_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edu_core::Catalog;
    use edu_core::model::CourseId;
    use edu_core::time::fixed_now;

    #[test]
    fn zero_progress_renders_empty_state() {
        let view = DashboardView::from_progress(&UserProgress::default());
        assert_eq!(view.courses_enrolled, "0");
        assert_eq!(view.quiz_score, "0%");
        assert_eq!(view.study_time, "0h");
        assert_eq!(view.empty_message(), Some(EMPTY_PROGRESS_MESSAGE));
    }

    #[test]
    fn study_time_keeps_half_hours() {
        let catalog = Catalog::builtin();
        let mut progress = UserProgress::default();
        progress.enroll(catalog.course(CourseId::new(4)).unwrap(), fixed_now());
        progress.record_quiz_score(100);
        let view = DashboardView::from_progress(&progress);
        assert_eq!(view.study_time, "0.5h");
        assert_eq!(view.quiz_score, "100%");

        progress.record_quiz_score(100);
        assert_eq!(DashboardView::from_progress(&progress).study_time, "1h");

        assert_eq!(
            view.items,
            [ProgressItemView {
                title: "Data Science Fundamentals".into(),
                percent: 0,
            }]
        );
        assert_eq!(view.empty_message(), None);
    }
}
