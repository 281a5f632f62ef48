use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::session::TimeBudget;
use services::{
    AppServices, AuthService, CatalogService, Clock, ClientConfig, QuizSessionService,
    SessionStore,
};
use storage::repository::{IdentityRepository, Storage};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidTimeLimit { raw: String },
    InvalidDbUrl { raw: String },
    InvalidBackendUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidTimeLimit { raw } => {
                write!(f, "invalid --time-limit value: {raw} (expected seconds > 0)")
            }
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidBackendUrl { raw } => {
                write!(f, "invalid --backend-url value: {raw}")
            }
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

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn session_store(&self) -> Arc<SessionStore> {
        self.services.session_store()
    }

    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }

    fn catalog(&self) -> Arc<CatalogService> {
        self.services.catalog()
    }

    fn quiz_sessions(&self) -> Arc<QuizSessionService> {
        self.services.quiz_sessions()
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  quiz-client [ui] [--backend-url <url>] [--db <sqlite_url>] [--time-limit <secs>] [--no-fallback]"
    );
    eprintln!("  quiz-client logout [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --backend-url {}", services::config::DEFAULT_BACKEND_URL);
    eprintln!("  --db {}", services::config::DEFAULT_DATABASE_URL);
    eprintln!("  --time-limit 1800");
    eprintln!();
    eprintln!("Environment (a .env file is read if present):");
    eprintln!(
        "  QUIZ_BACKEND_URL, QUIZ_DB_URL, QUIZ_TIME_LIMIT_SECS, QUIZ_REQUEST_TIMEOUT_SECS, QUIZ_OFFLINE_FALLBACK, RUST_LOG"
    );
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Logout,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "logout" => Some(Self::Logout),
            _ => None,
        }
    }
}

/// Applies command-line flags on top of the environment configuration.
fn apply_args(
    command: Command,
    mut config: ClientConfig,
    args: &mut impl Iterator<Item = String>,
) -> Result<ClientConfig, ArgsError> {
    while let Some(arg) = args.next() {
        match (command, arg.as_str()) {
            (_, "--db") => {
                let value = require_value(args, "--db")?;
                if value.trim().is_empty() {
                    return Err(ArgsError::InvalidDbUrl { raw: value });
                }
                config.database_url = value;
            }
            (Command::Ui, "--backend-url") => {
                let value = require_value(args, "--backend-url")?;
                let trimmed = value.trim();
                if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
                    return Err(ArgsError::InvalidBackendUrl { raw: value });
                }
                config.backend_url = trimmed.trim_end_matches('/').to_string();
            }
            (Command::Ui, "--time-limit") => {
                let value = require_value(args, "--time-limit")?;
                config.time_budget = value
                    .trim()
                    .parse::<u32>()
                    .ok()
                    .and_then(|secs| TimeBudget::from_secs(secs).ok())
                    .ok_or(ArgsError::InvalidTimeLimit { raw: value })?;
            }
            (Command::Ui, "--no-fallback") => config.offline_fallback = false,
            (_, "--help" | "-h") => {
                print_usage();
                std::process::exit(0);
            }
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }
    config.database_url = normalize_sqlite_url(config.database_url);
    Ok(config)
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

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();
    init_tracing();

    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: launching UI when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let config = apply_args(cmd, ClientConfig::from_env()?, &mut argv.into_iter()).map_err(
        |e| {
            eprintln!("{e}");
            print_usage();
            e
        },
    )?;

    prepare_sqlite_file(&config.database_url)?;

    match cmd {
        Command::Ui => {
            let services = AppServices::new_sqlite(&config, Clock::default()).await?;
            info!(
                "starting quiz client (time limit {}s, offline fallback {})",
                config.time_budget.secs(),
                config.offline_fallback
            );

            let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
            let context = build_app_context(&app);

            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Quiz Platform")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Logout => {
            let storage = Storage::sqlite(&config.database_url).await?;
            storage.identity.clear_identity().await?;
            info!("saved session cleared");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
