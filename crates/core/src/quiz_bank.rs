//! Questions shipped with the demo: four subjects, three questions each.

use crate::model::{QuizBank, QuizError, QuizQuestion, Subject};

type RawQuestion = (&'static str, [&'static str; 4], usize);

const MATHEMATICS: [RawQuestion; 3] = [
    ("What is 15 × 8?", ["120", "110", "115", "125"], 0),
    ("What is the square root of 144?", ["10", "11", "12", "13"], 2),
    ("What is 25% of 80?", ["15", "20", "25", "30"], 1),
];

const SCIENCE: [RawQuestion; 3] = [
    ("What is the chemical symbol for gold?", ["Go", "Gd", "Au", "Ag"], 2),
    ("What planet is known as the Red Planet?", ["Venus", "Mars", "Jupiter", "Saturn"], 1),
    (
        "What is the speed of light?",
        ["299,792 km/s", "150,000 km/s", "500,000 km/s", "1,000,000 km/s"],
        0,
    ),
];

const HISTORY: [RawQuestion; 3] = [
    ("In which year did World War II end?", ["1943", "1944", "1945", "1946"], 2),
    (
        "Who was the first President of the United States?",
        ["Thomas Jefferson", "George Washington", "John Adams", "Benjamin Franklin"],
        1,
    ),
    (
        "Which ancient wonder of the world still stands today?",
        [
            "Colossus of Rhodes",
            "Hanging Gardens",
            "Great Pyramid of Giza",
            "Lighthouse of Alexandria",
        ],
        2,
    ),
];

const GEOGRAPHY: [RawQuestion; 3] = [
    ("What is the capital of Australia?", ["Sydney", "Melbourne", "Canberra", "Brisbane"], 2),
    ("Which is the longest river in the world?", ["Amazon", "Nile", "Yangtze", "Mississippi"], 1),
    ("How many continents are there?", ["5", "6", "7", "8"], 2),
];

fn try_builtin() -> Result<QuizBank, QuizError> {
    let subjects: [(&str, &[RawQuestion]); 4] = [
        ("mathematics", &MATHEMATICS),
        ("science", &SCIENCE),
        ("history", &HISTORY),
        ("geography", &GEOGRAPHY),
    ];
    subjects
        .into_iter()
        .try_fold(QuizBank::new(), |bank, (name, raw)| {
            let questions = raw
                .iter()
                .map(|(q, options, correct)| QuizQuestion::new(*q, *options, *correct))
                .collect::<Result<Vec<_>, _>>()?;
            bank.with_subject(Subject::new(name)?, questions)
        })
}

/// The built-in quiz bank.
///
/// # Panics
///
/// Panics if the static question table is malformed, which the tests rule out.
#[must_use]
pub fn builtin_quiz_bank() -> QuizBank {
    try_builtin().expect("built-in quiz bank is well formed")
}
