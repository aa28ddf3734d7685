use std::fmt;

use edu_core::model::{CourseId, OPTION_COUNT};

/// One line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Courses(Option<String>),
    Enroll(CourseId),
    Quiz(String),
    /// 0-based option index; the user types 1..=4.
    Answer(usize),
    Next,
    Prev,
    Submit,
    Reset,
    Login { email: String, password: String },
    Logout,
    Dashboard,
    Subjects,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Empty,
    Unknown(String),
    MissingArgument { command: &'static str, what: &'static str },
    InvalidCourseId(String),
    InvalidOption(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Empty => f.write_str("type a command, or `help`"),
            CommandError::Unknown(word) => write!(f, "unknown command: {word}"),
            CommandError::MissingArgument { command, what } => {
                write!(f, "{command} needs {what}")
            }
            CommandError::InvalidCourseId(raw) => write!(f, "invalid course id: {raw}"),
            CommandError::InvalidOption(raw) => {
                write!(f, "answer must be a number from 1 to {OPTION_COUNT}, got {raw}")
            }
        }
    }
}

impl std::error::Error for CommandError {}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::Empty);
        };

        let command = match head.to_ascii_lowercase().as_str() {
            "courses" => Command::Courses(words.next().map(str::to_string)),
            "enroll" => {
                let raw = words.next().ok_or(CommandError::MissingArgument {
                    command: "enroll",
                    what: "a course id",
                })?;
                let id = raw
                    .parse::<CourseId>()
                    .map_err(|_| CommandError::InvalidCourseId(raw.to_string()))?;
                Command::Enroll(id)
            }
            "quiz" => {
                let subject = words.next().ok_or(CommandError::MissingArgument {
                    command: "quiz",
                    what: "a subject",
                })?;
                Command::Quiz(subject.to_string())
            }
            "answer" => {
                let raw = words.next().ok_or(CommandError::MissingArgument {
                    command: "answer",
                    what: "an option number",
                })?;
                match raw.parse::<usize>() {
                    Ok(n) if (1..=OPTION_COUNT).contains(&n) => Command::Answer(n - 1),
                    _ => return Err(CommandError::InvalidOption(raw.to_string())),
                }
            }
            "next" => Command::Next,
            "prev" => Command::Prev,
            "submit" => Command::Submit,
            "reset" => Command::Reset,
            "login" => {
                let missing = CommandError::MissingArgument {
                    command: "login",
                    what: "an email and a password",
                };
                let email = words.next().ok_or(missing.clone())?;
                let password = words.next().ok_or(missing)?;
                Command::Login {
                    email: email.to_string(),
                    password: password.to_string(),
                }
            }
            "logout" => Command::Logout,
            "dashboard" => Command::Dashboard,
            "subjects" => Command::Subjects,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(CommandError::Unknown(head.to_string())),
        };
        Ok(command)
    }
}

pub const HELP: &str = "\
Commands:
  courses [all|<category>]     list courses
  enroll <id>                  enroll in a course (login first)
  subjects                     list quiz subjects
  quiz <subject>               start a quiz
  answer <1-4>                 pick an option for the current question
  next | prev                  move between questions
  submit                       score the quiz (last question only)
  reset                        leave the quiz
  login <email> <password>     sign in
  logout                       sign out
  dashboard                    show your progress
  help | quit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(Command::parse("courses").unwrap(), Command::Courses(None));
        assert_eq!(
            Command::parse("courses Design").unwrap(),
            Command::Courses(Some("Design".into()))
        );
        assert_eq!(Command::parse(" enroll 3 ").unwrap(), Command::Enroll(CourseId::new(3)));
        assert_eq!(Command::parse("ANSWER 1").unwrap(), Command::Answer(0));
        assert_eq!(
            Command::parse("login a@b.co secret1").unwrap(),
            Command::Login {
                email: "a@b.co".into(),
                password: "secret1".into()
            }
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(Command::parse("   "), Err(CommandError::Empty));
        assert_eq!(Command::parse("fly"), Err(CommandError::Unknown("fly".into())));
        assert_eq!(
            Command::parse("answer 5"),
            Err(CommandError::InvalidOption("5".into()))
        );
        assert_eq!(
            Command::parse("answer 0"),
            Err(CommandError::InvalidOption("0".into()))
        );
        assert_eq!(
            Command::parse("enroll x"),
            Err(CommandError::InvalidCourseId("x".into()))
        );
        assert!(matches!(
            Command::parse("login a@b.co"),
            Err(CommandError::MissingArgument { command: "login", .. })
        ));
    }
}
