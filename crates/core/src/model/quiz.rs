use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Every question offers exactly this many options.
pub const OPTION_COUNT: usize = 4;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("subject name cannot be empty")]
    EmptySubject,

    #[error("question must have exactly 4 options, got {0}")]
    OptionCount(usize),

    #[error("correct option index {0} is out of range")]
    CorrectIndexOutOfRange(usize),

    #[error("subject {0} has no questions")]
    NoQuestions(String),

    #[error("subject {0} is already in the bank")]
    DuplicateSubject(String),
}

//
// ─── SUBJECT ───────────────────────────────────────────────────────────────────
//

/// Quiz subject key, trimmed and lowercased (e.g. `mathematics`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Subject(String);

impl Subject {
    /// # Errors
    ///
    /// Returns `QuizError::EmptySubject` if the name is blank.
    pub fn new(value: impl AsRef<str>) -> Result<Self, QuizError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(QuizError::EmptySubject);
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Heading shown above a running quiz, e.g. "Mathematics Quiz".
    #[must_use]
    pub fn quiz_title(&self) -> String {
        let mut chars = self.0.chars();
        let capitalized: String = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        format!("{capitalized} Quiz")
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    question: String,
    options: [String; OPTION_COUNT],
    correct_index: usize,
}

impl QuizQuestion {
    /// # Errors
    ///
    /// Returns `QuizError::OptionCount` unless exactly four options are given, and
    /// `QuizError::CorrectIndexOutOfRange` if `correct_index` does not point at one.
    pub fn new<I, S>(
        question: impl Into<String>,
        options: I,
        correct_index: usize,
    ) -> Result<Self, QuizError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        let options: [String; OPTION_COUNT] = options
            .try_into()
            .map_err(|rejected: Vec<String>| QuizError::OptionCount(rejected.len()))?;
        if correct_index >= OPTION_COUNT {
            return Err(QuizError::CorrectIndexOutOfRange(correct_index));
        }
        Ok(Self {
            question: question.into(),
            options,
            correct_index,
        })
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn is_correct(&self, answer: usize) -> bool {
        answer == self.correct_index
    }
}

//
// ─── BANK ──────────────────────────────────────────────────────────────────────
//

/// Read-only mapping from subject to its ordered questions.
///
/// Subjects keep their insertion order. Question lists are shared with running
/// sessions through `Arc`, so starting a quiz never copies the bank.
#[derive(Debug, Clone, Default)]
pub struct QuizBank {
    subjects: Vec<(Subject, Arc<[QuizQuestion]>)>,
}

impl QuizBank {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a subject to the bank.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoQuestions` for an empty list and
    /// `QuizError::DuplicateSubject` if the subject is already present.
    pub fn with_subject(
        mut self,
        subject: Subject,
        questions: Vec<QuizQuestion>,
    ) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::NoQuestions(subject.0));
        }
        if self.subjects.iter().any(|(s, _)| *s == subject) {
            return Err(QuizError::DuplicateSubject(subject.0));
        }
        self.subjects.push((subject, questions.into()));
        Ok(self)
    }

    /// Look up a subject by name; the name is normalized like `Subject::new`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<(&Subject, Arc<[QuizQuestion]>)> {
        let wanted = name.trim().to_lowercase();
        self.subjects
            .iter()
            .find(|(s, _)| s.as_str() == wanted)
            .map(|(s, questions)| (s, Arc::clone(questions)))
    }

    pub fn subjects(&self) -> impl Iterator<Item = &Subject> {
        self.subjects.iter().map(|(s, _)| s)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct: usize) -> QuizQuestion {
        QuizQuestion::new("2 + 2?", ["3", "4", "5", "6"], correct).unwrap()
    }

    #[test]
    fn subject_is_normalized() {
        let subject = Subject::new("  History ").unwrap();
        assert_eq!(subject.as_str(), "history");
        assert_eq!(subject.quiz_title(), "History Quiz");
        assert_eq!(Subject::new("   ").unwrap_err(), QuizError::EmptySubject);
    }

    #[test]
    fn question_requires_four_options() {
        let err = QuizQuestion::new("?", ["a", "b", "c"], 0).unwrap_err();
        assert_eq!(err, QuizError::OptionCount(3));
    }

    #[test]
    fn question_rejects_out_of_range_answer() {
        let err = QuizQuestion::new("?", ["a", "b", "c", "d"], 4).unwrap_err();
        assert_eq!(err, QuizError::CorrectIndexOutOfRange(4));
        assert!(question(1).is_correct(1));
        assert!(!question(1).is_correct(0));
    }

    #[test]
    fn bank_lookup_is_case_insensitive_and_ordered() {
        let bank = QuizBank::new()
            .with_subject(Subject::new("zoology").unwrap(), vec![question(0)])
            .unwrap()
            .with_subject(Subject::new("art").unwrap(), vec![question(1), question(2)])
            .unwrap();

        let names: Vec<&str> = bank.subjects().map(Subject::as_str).collect();
        assert_eq!(names, ["zoology", "art"]);

        let (subject, questions) = bank.get("ART").unwrap();
        assert_eq!(subject.as_str(), "art");
        assert_eq!(questions.len(), 2);
        assert!(bank.get("music").is_none());
    }

    #[test]
    fn bank_rejects_empty_and_duplicate_subjects() {
        let err = QuizBank::new()
            .with_subject(Subject::new("art").unwrap(), Vec::new())
            .unwrap_err();
        assert_eq!(err, QuizError::NoQuestions("art".into()));

        let err = QuizBank::new()
            .with_subject(Subject::new("art").unwrap(), vec![question(0)])
            .unwrap()
            .with_subject(Subject::new("Art").unwrap(), vec![question(0)])
            .unwrap_err();
        assert_eq!(err, QuizError::DuplicateSubject("art".into()));
    }
}
