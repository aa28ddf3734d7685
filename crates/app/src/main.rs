mod command;
mod render;

use std::fmt;

use services::{AppState, Clock, EnrollAction};
use storage::Storage;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use command::{Command, HELP};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

#[derive(Debug, PartialEq, Eq)]
enum Backend {
    Sqlite(String),
    Memory,
}

#[derive(Debug)]
struct Args {
    backend: Backend,
    help: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  edu [--db <sqlite_url>] [--memory]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://edu.sqlite3");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  EDU_DB_URL, RUST_LOG");
}

impl Args {
    fn parse(
        args: impl IntoIterator<Item = String>,
        env_db_url: Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut args = args.into_iter();
        let mut db_url = env_db_url
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| "sqlite://edu.sqlite3".into(), normalize_sqlite_url);
        let mut memory = false;
        let mut help = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--memory" => memory = true,
                "--help" | "-h" => help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let backend = if memory {
            Backend::Memory
        } else {
            Backend::Sqlite(db_url)
        };
        Ok(Self { backend, help })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }
    Ok(())
}

/// Apply one command and collect the lines to print. The flag is `false`
/// once the shell should exit.
async fn dispatch(state: &mut AppState, command: Command) -> (bool, Vec<String>) {
    let mut out = Vec::new();
    match command {
        Command::Courses(filter) => {
            let filter = filter.unwrap_or_else(|| "all".to_string());
            let courses = state.filter_courses(&filter);
            if courses.is_empty() {
                out.push(format!("No courses in \"{filter}\"."));
            }
            out.extend(courses.into_iter().map(render::course));
        }
        Command::Enroll(id) => {
            if let Ok(EnrollAction::LoginRequired) = state.enroll(id).await {
                out.push("Please log in to enroll (login <email> <password>).".to_string());
            }
        }
        Command::Subjects => {
            out.extend(state.quiz_bank().subjects().map(|s| s.quiz_title()));
        }
        Command::Quiz(subject) => {
            if let Ok(view) = state.start_quiz(&subject) {
                out.push(render::question(&view));
            }
        }
        Command::Answer(option) => {
            if state.select_answer(option).is_ok() {
                if let Some(view) = state.quiz().current_question() {
                    out.push(render::question(&view));
                }
            }
        }
        Command::Next => {
            if let Ok(view) = state.next_question() {
                out.push(render::question(&view));
            }
        }
        Command::Prev => {
            if let Ok(view) = state.previous_question() {
                out.push(render::question(&view));
            }
        }
        Command::Submit => {
            if let Ok(score) = state.submit_quiz().await {
                out.push(score.message());
            }
        }
        Command::Reset => state.reset_quiz(),
        Command::Login { email, password } => {
            let _ = state.login(&email, &password).await;
        }
        Command::Logout => {
            if !state.logout().await {
                out.push("Nobody is logged in.".to_string());
            }
        }
        Command::Dashboard => {
            match state.current_user() {
                Some(user) => out.push(format!("Welcome back, {}!", user.display_name())),
                None => out.push("Not logged in.".to_string()),
            }
            out.push(render::dashboard(&state.dashboard()));
        }
        Command::Help => out.push(HELP.to_string()),
        Command::Quit => return (false, out),
    }
    out.extend(state.take_notifications().iter().map(render::notification));
    (true, out)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse(std::env::args().skip(1), std::env::var("EDU_DB_URL").ok())
        .inspect_err(|_| print_usage())?;
    if args.help {
        print_usage();
        return Ok(());
    }

    // Open + migrate SQLite at startup so services stay backend-agnostic.
    let storage = match &args.backend {
        Backend::Memory => Storage::in_memory(),
        Backend::Sqlite(db_url) => {
            prepare_sqlite_file(db_url)?;
            Storage::sqlite(db_url).await?
        }
    };
    info!(backend = ?args.backend, "storage ready");

    let mut state = AppState::from_storage(&storage, Clock::system()).await;
    let mut stdout = tokio::io::stdout();
    if let Some(user) = state.current_user() {
        let greeting = format!("Welcome back, {}!\n", user.display_name());
        stdout.write_all(greeting.as_bytes()).await?;
    }
    stdout.write_all(b"Type `help` for commands.\n> ").await?;
    stdout.flush().await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let keep_going = match Command::parse(&line) {
            Ok(command) => {
                debug!(?command, "dispatch");
                let (keep_going, output) = dispatch(&mut state, command).await;
                for text in output {
                    stdout.write_all(text.as_bytes()).await?;
                    stdout.write_all(b"\n").await?;
                }
                keep_going
            }
            Err(command::CommandError::Empty) => true,
            Err(err) => {
                stdout.write_all(format!("{err}\n").as_bytes()).await?;
                true
            }
        };
        if !keep_going {
            break;
        }
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn defaults_to_sqlite_file() {
        let parsed = Args::parse(args(&[]), None).unwrap();
        assert_eq!(parsed.backend, Backend::Sqlite("sqlite://edu.sqlite3".into()));
        assert!(!parsed.help);
    }

    #[test]
    fn flag_overrides_env_and_memory_wins() {
        let parsed = Args::parse(
            args(&["--db", "sqlite:///tmp/x.db"]),
            Some("sqlite:///tmp/env.db".into()),
        )
        .unwrap();
        assert_eq!(parsed.backend, Backend::Sqlite("sqlite:///tmp/x.db".into()));

        let parsed = Args::parse(args(&["--db", "sqlite:///tmp/x.db", "--memory"]), None).unwrap();
        assert_eq!(parsed.backend, Backend::Memory);
    }

    #[test]
    fn rejects_bad_args() {
        assert!(matches!(
            Args::parse(args(&["--db"]), None),
            Err(ArgsError::MissingValue { flag: "--db" })
        ));
        assert!(matches!(
            Args::parse(args(&["--db", " "]), None),
            Err(ArgsError::InvalidDbUrl { .. })
        ));
        assert!(matches!(
            Args::parse(args(&["--verbose"]), None),
            Err(ArgsError::UnknownArg(_))
        ));
    }

    #[test]
    fn relative_paths_become_absolute() {
        let url = normalize_sqlite_url("sqlite:data/edu.db".into());
        assert!(url.starts_with("sqlite:///"));
        assert!(url.ends_with("data/edu.db"));
    }

    #[tokio::test]
    async fn dispatch_runs_a_short_session() {
        let mut state = AppState::from_storage(&Storage::in_memory(), Clock::system()).await;

        let (_, out) = dispatch(&mut state, Command::Enroll(edu_core::model::CourseId::new(1))).await;
        assert_eq!(out, ["Please log in to enroll (login <email> <password>)."]);

        let (_, out) = dispatch(
            &mut state,
            Command::Login {
                email: "pat@example.com".into(),
                password: "secret1".into(),
            },
        )
        .await;
        assert_eq!(out, ["[success] Successfully logged in!"]);

        let (_, out) = dispatch(&mut state, Command::Quiz("science".into())).await;
        assert!(out[0].starts_with("Science Quiz"));

        let (_, out) = dispatch(&mut state, Command::Next).await;
        assert_eq!(out, ["[warning] Please select an answer before continuing"]);

        let (keep_going, _) = dispatch(&mut state, Command::Quit).await;
        assert!(!keep_going);
    }
}
