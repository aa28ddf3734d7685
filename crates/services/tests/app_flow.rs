use edu_core::model::{CourseId, UserProgress};
use edu_core::time::fixed_now;
use services::{AppState, Clock, EnrollAction, Severity};
use storage::profile_store::{CURRENT_USER_KEY, progress_key};
use storage::{InMemoryStore, KeyValueStore, Storage};

async fn open(kv: &InMemoryStore) -> AppState {
    AppState::from_storage(&Storage::from_store(kv.clone()), Clock::fixed(fixed_now())).await
}

async fn take_math_quiz(state: &mut AppState, answers: [usize; 3]) -> u8 {
    state.start_quiz("Mathematics").unwrap();
    for (i, answer) in answers.into_iter().enumerate() {
        state.select_answer(answer).unwrap();
        if i < 2 {
            state.next_question().unwrap();
        }
    }
    state.submit_quiz().await.unwrap().percentage
}

#[tokio::test]
async fn signed_in_progress_survives_restart() {
    let kv = InMemoryStore::new();
    let mut state = open(&kv).await;

    state.login("learner@example.com", "secret1").await.unwrap();
    state.enroll(CourseId::new(1)).await.unwrap();
    assert_eq!(take_math_quiz(&mut state, [0, 2, 1]).await, 100);
    state.reset_quiz();
    assert_eq!(take_math_quiz(&mut state, [0, 0, 0]).await, 33);

    let before = state.progress().clone();
    assert_eq!(before.quiz_score_average(), 67);
    assert!((before.study_time_hours() - 1.0).abs() < f64::EPSILON);

    let restarted = open(&kv).await;
    let user = restarted.current_user().expect("session restored");
    assert_eq!(user.email().as_str(), "learner@example.com");
    assert_eq!(user.display_name(), "learner");
    assert_eq!(restarted.progress(), &before);

    let dashboard = restarted.dashboard();
    assert_eq!(dashboard.courses_enrolled, "1");
    assert_eq!(dashboard.quiz_score, "67%");
    assert_eq!(dashboard.study_time, "1h");
    assert_eq!(dashboard.items.len(), 1);
    assert_eq!(dashboard.items[0].percent, 0);
}

#[tokio::test]
async fn logout_then_login_reloads_saved_progress() {
    let kv = InMemoryStore::new();
    let mut state = open(&kv).await;

    state.login("learner@example.com", "secret1").await.unwrap();
    state.enroll(CourseId::new(3)).await.unwrap();
    assert!(state.logout().await);
    assert_eq!(state.progress(), &UserProgress::default());
    assert_eq!(kv.get(CURRENT_USER_KEY).await.unwrap(), None);

    let restarted = open(&kv).await;
    assert!(restarted.current_user().is_none());

    state.login("learner@example.com", "secret1").await.unwrap();
    assert_eq!(state.progress().courses_enrolled(), 1);
    assert!(state.progress().is_enrolled(CourseId::new(3)));
}

#[tokio::test]
async fn full_storage_keeps_in_memory_progress() {
    // Room for the login record but not for a progress record with an entry.
    let kv = InMemoryStore::new().with_quota(120);
    let mut state = open(&kv).await;
    state.login("a@b.co", "secret1").await.unwrap();
    let _ = state.take_notifications();

    let action = state.enroll(CourseId::new(1)).await.unwrap();
    assert!(matches!(action, EnrollAction::Enrolled { .. }));
    assert_eq!(state.progress().courses_enrolled(), 1);

    let notes = state.take_notifications();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].severity(), Severity::Success);
    assert_eq!(notes[1].severity(), Severity::Warning);
    assert_eq!(notes[1].message(), "Unable to save progress. Storage may be full.");
}

#[tokio::test]
async fn unreadable_progress_is_reset_on_login() {
    let kv = InMemoryStore::new();
    let email = edu_core::model::Email::parse("learner@example.com").unwrap();
    kv.set(&progress_key(&email), "{not json").await.unwrap();

    let mut state = open(&kv).await;
    state.login("learner@example.com", "secret1").await.unwrap();
    assert_eq!(state.progress(), &UserProgress::default());

    let notes = state.take_notifications();
    assert!(notes.iter().any(|n| n.severity() == Severity::Warning));
    assert_eq!(
        notes.last().map(|n| n.message().to_string()),
        Some("Successfully logged in!".to_string())
    );
}

#[tokio::test]
async fn corrupt_login_record_starts_anonymous() {
    let kv = InMemoryStore::new();
    kv.set(CURRENT_USER_KEY, "[]").await.unwrap();
    let state = open(&kv).await;
    assert!(state.current_user().is_none());
    assert_eq!(state.progress(), &UserProgress::default());
}

#[tokio::test]
async fn course_filter_accepts_raw_names() {
    let kv = InMemoryStore::new();
    let state = open(&kv).await;
    assert_eq!(state.filter_courses("all").len(), 8);
    assert_eq!(state.filter_courses("design").len(), 2);
    assert!(state.filter_courses("cooking").is_empty());
}
