//! The quiz state machine: `Idle` → `Active` → `Completed`.
//!
//! A session shares the question list with the `QuizBank` and only owns the
//! cursor and the answers recorded so far. Every transition either succeeds
//! or leaves the session untouched and reports a `QuizSessionError`.

use std::sync::Arc;

use thiserror::Error;

use crate::model::{OPTION_COUNT, QuizBank, QuizQuestion, Subject};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizSessionError {
    #[error("no quiz named {0}")]
    UnknownSubject(String),

    #[error("no quiz is in progress")]
    NotActive,

    #[error("no answer selected for the current question")]
    NoAnswerSelected,

    #[error("option {0} does not exist")]
    InvalidOption(usize),

    #[error("already at the first question")]
    AtFirstQuestion,

    #[error("already at the last question; submit instead")]
    AtLastQuestion,

    #[error("the quiz can only be submitted from the last question")]
    NotFinalQuestion,
}

/// Outcome of a submitted quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizScore {
    pub subject: Subject,
    pub correct: usize,
    pub total: usize,
    pub percentage: u8,
}

impl QuizScore {
    fn tally(subject: Subject, questions: &[QuizQuestion], answers: &[Option<usize>]) -> Self {
        let correct = questions
            .iter()
            .zip(answers)
            .filter(|(q, a)| a.is_some_and(|a| q.is_correct(a)))
            .count();
        let total = questions.len();
        Self {
            subject,
            correct,
            total,
            percentage: percentage(correct, total),
        }
    }

    /// Result line shown once the quiz is submitted.
    #[must_use]
    pub fn message(&self) -> String {
        let (correct, total, pct) = (self.correct, self.total, self.percentage);
        if pct >= 80 {
            format!("Excellent! You got {correct} out of {total} questions correct ({pct}%)")
        } else if pct >= 60 {
            format!("Good job! You got {correct} out of {total} questions correct ({pct}%)")
        } else {
            format!("You got {correct} out of {total} questions correct ({pct}%). Keep practicing!")
        }
    }
}

/// `round(100 * correct / total)` with halves rounded up, in integer math.
#[must_use]
pub fn percentage(correct: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let correct = correct.min(total);
    let pct = (200 * correct + total) / (2 * total);
    u8::try_from(pct).unwrap_or(100)
}

/// Snapshot of the question under the cursor, for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub title: String,
    /// 1-based.
    pub number: usize,
    pub total: usize,
    pub question: String,
    pub options: Vec<String>,
    pub selected: Option<usize>,
    pub can_retreat: bool,
    pub can_advance: bool,
    pub can_submit: bool,
}

#[derive(Debug, Clone, Default)]
enum State {
    #[default]
    Idle,
    Active {
        subject: Subject,
        questions: Arc<[QuizQuestion]>,
        index: usize,
        answers: Vec<Option<usize>>,
    },
    Completed(QuizScore),
}

#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    state: State,
}

impl QuizSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self.state, State::Idle)
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.state, State::Active { .. })
    }

    /// The score, once the session has been submitted.
    #[must_use]
    pub fn score(&self) -> Option<&QuizScore> {
        match &self.state {
            State::Completed(score) => Some(score),
            _ => None,
        }
    }

    #[must_use]
    pub fn subject(&self) -> Option<&Subject> {
        match &self.state {
            State::Idle => None,
            State::Active { subject, .. } => Some(subject),
            State::Completed(score) => Some(&score.subject),
        }
    }

    /// Zero-based cursor while active.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        match &self.state {
            State::Active { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Recorded answer at `position`, if that question was answered.
    #[must_use]
    pub fn answer_at(&self, position: usize) -> Option<usize> {
        match &self.state {
            State::Active { answers, .. } => answers.get(position).copied().flatten(),
            _ => None,
        }
    }

    /// Begin `name` from its first question. Accepted in any state; a running
    /// quiz is discarded.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::UnknownSubject` if the bank has no such subject.
    pub fn start(&mut self, bank: &QuizBank, name: &str) -> Result<QuestionView, QuizSessionError> {
        let (subject, questions) = bank
            .get(name)
            .ok_or_else(|| QuizSessionError::UnknownSubject(name.trim().to_string()))?;
        self.state = State::Active {
            subject: subject.clone(),
            answers: vec![None; questions.len()],
            questions,
            index: 0,
        };
        self.current_question().ok_or(QuizSessionError::NotActive)
    }

    /// Record (or overwrite) the answer for the current question.
    ///
    /// # Errors
    ///
    /// `NotActive` outside a running quiz, `InvalidOption` for an index past the options.
    pub fn select_answer(&mut self, option: usize) -> Result<(), QuizSessionError> {
        let State::Active { index, answers, .. } = &mut self.state else {
            return Err(QuizSessionError::NotActive);
        };
        if option >= OPTION_COUNT {
            return Err(QuizSessionError::InvalidOption(option));
        }
        answers[*index] = Some(option);
        Ok(())
    }

    /// Move to the next question. Requires an answer for the current one and
    /// never steps past the last question.
    ///
    /// # Errors
    ///
    /// `NotActive`, `NoAnswerSelected`, or `AtLastQuestion`.
    pub fn advance(&mut self) -> Result<QuestionView, QuizSessionError> {
        let State::Active {
            questions,
            index,
            answers,
            ..
        } = &mut self.state
        else {
            return Err(QuizSessionError::NotActive);
        };
        if answers[*index].is_none() {
            return Err(QuizSessionError::NoAnswerSelected);
        }
        if *index + 1 >= questions.len() {
            return Err(QuizSessionError::AtLastQuestion);
        }
        *index += 1;
        self.current_question().ok_or(QuizSessionError::NotActive)
    }

    /// Step back one question; the view carries the answer recorded there.
    ///
    /// # Errors
    ///
    /// `NotActive` or `AtFirstQuestion`.
    pub fn retreat(&mut self) -> Result<QuestionView, QuizSessionError> {
        let State::Active { index, .. } = &mut self.state else {
            return Err(QuizSessionError::NotActive);
        };
        if *index == 0 {
            return Err(QuizSessionError::AtFirstQuestion);
        }
        *index -= 1;
        self.current_question().ok_or(QuizSessionError::NotActive)
    }

    /// Score the quiz and move to `Completed`.
    ///
    /// # Errors
    ///
    /// `NotActive`, `NotFinalQuestion` before the last question, or
    /// `NoAnswerSelected` if the last question is unanswered.
    pub fn submit(&mut self) -> Result<QuizScore, QuizSessionError> {
        let State::Active {
            subject,
            questions,
            index,
            answers,
        } = &self.state
        else {
            return Err(QuizSessionError::NotActive);
        };
        if *index + 1 != questions.len() {
            return Err(QuizSessionError::NotFinalQuestion);
        }
        if answers[*index].is_none() {
            return Err(QuizSessionError::NoAnswerSelected);
        }
        let score = QuizScore::tally(subject.clone(), questions, answers);
        self.state = State::Completed(score.clone());
        Ok(score)
    }

    /// Back to `Idle`, discarding any answers.
    pub fn reset(&mut self) {
        self.state = State::Idle;
    }

    #[must_use]
    pub fn current_question(&self) -> Option<QuestionView> {
        let State::Active {
            subject,
            questions,
            index,
            answers,
        } = &self.state
        else {
            return None;
        };
        let question = questions.get(*index)?;
        let last = questions.len() - 1;
        Some(QuestionView {
            title: subject.quiz_title(),
            number: index + 1,
            total: questions.len(),
            question: question.question().to_string(),
            options: question.options().to_vec(),
            selected: answers[*index],
            can_retreat: *index > 0,
            can_advance: *index < last,
            can_submit: *index == last,
        })
    }
}
