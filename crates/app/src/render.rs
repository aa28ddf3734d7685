//! Plain-text rendering of service views.

use std::fmt::Write as _;

use edu_core::QuestionView;
use edu_core::model::Course;
use services::{DashboardView, EMPTY_PROGRESS_MESSAGE, Notification};

pub fn course(course: &Course) -> String {
    format!(
        "{:>2}. {} {} [{} | {} | {}]\n    {}",
        course.id().value(),
        course.icon(),
        course.title(),
        course.category(),
        course.level(),
        course.duration(),
        course.description()
    )
}

pub fn question(view: &QuestionView) -> String {
    let mut out = format!(
        "{}  (question {} of {})\n{}\n",
        view.title, view.number, view.total, view.question
    );
    for (i, option) in view.options.iter().enumerate() {
        let marker = if view.selected == Some(i) { '*' } else { ' ' };
        let _ = writeln!(out, " {marker} {}) {option}", i + 1);
    }
    let mut hints = Vec::new();
    if view.can_retreat {
        hints.push("prev");
    }
    if view.can_advance {
        hints.push("next");
    }
    if view.can_submit {
        hints.push("submit");
    }
    let _ = write!(out, "[{}]", hints.join(" / "));
    out
}

pub fn dashboard(view: &DashboardView) -> String {
    let mut out = format!(
        "Courses enrolled: {}\nQuiz average:     {}\nStudy time:       {}\nCertificates:     {}\n",
        view.courses_enrolled, view.quiz_score, view.study_time, view.certificates
    );
    if view.items.is_empty() {
        out.push_str(EMPTY_PROGRESS_MESSAGE);
    } else {
        for item in &view.items {
            let _ = writeln!(out, "  {:<40} {:>3}%", item.title, item.percent);
        }
    }
    out.trim_end().to_string()
}

pub fn notification(note: &Notification) -> String {
    format!("[{}] {}", note.severity(), note.message())
}

#[cfg(test)]
mod tests {
    use super::*;
    use edu_core::model::UserProgress;
    use services::Severity;

    #[test]
    fn question_marks_selection_and_affordances() {
        let view = QuestionView {
            title: "History Quiz".into(),
            number: 1,
            total: 3,
            question: "Q?".into(),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            selected: Some(1),
            can_retreat: false,
            can_advance: true,
            can_submit: false,
        };
        let text = question(&view);
        assert!(text.starts_with("History Quiz  (question 1 of 3)"));
        assert!(text.contains(" * 2) b"));
        assert!(text.contains("   1) a"));
        assert!(text.ends_with("[next]"));
    }

    #[test]
    fn empty_dashboard_shows_hint() {
        let text = dashboard(&DashboardView::from_progress(&UserProgress::default()));
        assert!(text.contains("Quiz average:     0%"));
        assert!(text.contains("Study time:       0h"));
        assert!(text.ends_with(EMPTY_PROGRESS_MESSAGE));
    }

    #[test]
    fn notification_is_tagged() {
        let note = Notification::new("Saved <ok>", Severity::Success);
        assert_eq!(notification(&note), "[success] Saved &lt;ok&gt;");
    }
}
