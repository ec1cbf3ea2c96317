mod logging;

use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use fahm_core::model::{ExamId, LearnerId, Tier};
use services::{AccountService, AppServices, Clock, DashboardService};
use storage::catalog::{CatalogConfig, builtin_catalog, load_catalog_file};
use thiserror::Error;
use tracing::info;
use ui::vm::{DashboardVm, map_dashboard};
use ui::{App, UiApp, build_app_context};

#[derive(Debug, Error)]
enum ArgsError {
    #[error("{flag} requires a value")]
    MissingValue { flag: &'static str },
    #[error("unknown argument: {0}")]
    UnknownArg(String),
    #[error("invalid --learner value: {raw}")]
    InvalidLearnerId { raw: String },
    #[error("invalid --db value: {raw}")]
    InvalidDbUrl { raw: String },
    #[error("invalid --exam value: {raw}")]
    InvalidExamId { raw: String },
    #[error("invalid --tier value: {raw} (expected free, basic or premium)")]
    InvalidTier { raw: String },
    #[error("seed requires --tier")]
    MissingTier,
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    learner_id: LearnerId,
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn learner_id(&self) -> LearnerId {
        self.learner_id
    }

    fn dashboard(&self) -> Arc<DashboardService> {
        self.services.dashboard()
    }

    fn accounts(&self) -> Arc<AccountService> {
        self.services.accounts()
    }
}

#[derive(Debug)]
struct Args {
    db_url: String,
    learner_id: LearnerId,
    catalog: Option<PathBuf>,
    exam: Option<ExamId>,
    tier: Option<Tier>,
    name: Option<String>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui   [--db <sqlite_url>] [--learner <id>] [--catalog <path>]");
    eprintln!("  cargo run -p app -- show [--db <sqlite_url>] [--learner <id>] [--exam <id>]");
    eprintln!("  cargo run -p app -- seed --tier <free|basic|premium> [--learner <id>] [--name <text>] [--exam <id>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:fahm.sqlite3");
    eprintln!("  --learner 1");
    eprintln!("  --catalog <built-in>");
    eprintln!();
    eprintln!("Environment (also read from .env):");
    eprintln!("  FAHM_DB_URL, FAHM_LEARNER_ID, FAHM_CATALOG, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Show,
    Seed,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "show" => Some(Self::Show),
            "seed" => Some(Self::Seed),
            _ => None,
        }
    }
}

impl Args {
    fn from_env() -> Self {
        let db_url = std::env::var("FAHM_DB_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| "sqlite://fahm.sqlite3".into(), normalize_sqlite_url);
        let learner_id = std::env::var("FAHM_LEARNER_ID")
            .ok()
            .and_then(|value| value.parse::<LearnerId>().ok())
            .unwrap_or_else(|| LearnerId::new(1));
        let catalog = std::env::var_os("FAHM_CATALOG").map(PathBuf::from);

        Self {
            db_url,
            learner_id,
            catalog,
            exam: None,
            tier: None,
            name: None,
        }
    }

    fn parse(cmd: Command, args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::from_env();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    parsed.db_url = normalize_sqlite_url(value);
                }
                "--learner" => {
                    let value = require_value(args, "--learner")?;
                    parsed.learner_id = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidLearnerId { raw: value.clone() })?;
                }
                "--catalog" => {
                    parsed.catalog = Some(PathBuf::from(require_value(args, "--catalog")?));
                }
                "--exam" if cmd != Command::Ui => {
                    let value = require_value(args, "--exam")?;
                    parsed.exam = Some(
                        value
                            .parse()
                            .map_err(|_| ArgsError::InvalidExamId { raw: value.clone() })?,
                    );
                }
                "--tier" if cmd == Command::Seed => {
                    let value = require_value(args, "--tier")?;
                    parsed.tier = Some(
                        value
                            .parse()
                            .map_err(|_| ArgsError::InvalidTier { raw: value.clone() })?,
                    );
                }
                "--name" if cmd == Command::Seed => {
                    parsed.name = Some(require_value(args, "--name")?);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        if cmd == Command::Seed && parsed.tier.is_none() {
            return Err(ArgsError::MissingTier);
        }
        Ok(parsed)
    }

    fn catalog_config(&self) -> Result<CatalogConfig, storage::repository::StorageError> {
        match &self.catalog {
            Some(path) => load_catalog_file(path),
            None => builtin_catalog(),
        }
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

fn prepare_sqlite_file(db_url: &str) -> Result<(), ArgsError> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let invalid = || ArgsError::InvalidDbUrl {
        raw: db_url.to_string(),
    };
    let path = db_url.strip_prefix("sqlite://").ok_or_else(invalid)?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(invalid());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|_| invalid())?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)
            .map_err(|_| invalid())?;
    }

    Ok(())
}

/// Plain-text dashboard for the `show` subcommand.
fn render_text(vm: &DashboardVm) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", vm.exam_name);
    let _ = writeln!(out, "Your subscription: {} · {}", vm.tier_label, vm.access_line);
    let _ = writeln!(out, "{}", vm.completed_line);
    if let Some(notice) = &vm.notice {
        let _ = writeln!(out, "{notice}");
    }
    let _ = writeln!(out);
    for world in &vm.worlds {
        let status = world
            .progress_label
            .as_deref()
            .or(world.unlock_hint.as_deref())
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{:<9} {:<24} {:<28} {:<20} {}",
            world.label,
            world.title,
            world.subject_line,
            world.action.label(),
            status
        );
    }
    if let Some(prompt) = &vm.upgrade_prompt {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}: {}", prompt.heading, prompt.body);
    }
    out
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
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

    let mut iter = argv.into_iter();
    let parsed = Args::parse(cmd, &mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let config = parsed.catalog_config()?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    let services = AppServices::new_sqlite(&parsed.db_url, config, Clock::system()).await?;
    info!(db = %parsed.db_url, learner = %parsed.learner_id, ?cmd, "services ready");

    match cmd {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                learner_id: parsed.learner_id,
                services,
            });
            let context = build_app_context(&app);

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Dr Fahm")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Show => {
            let dashboard = services
                .dashboard()
                .load(parsed.learner_id, parsed.exam.as_ref())
                .await?;
            print!("{}", render_text(&map_dashboard(&dashboard)));
            Ok(())
        }
        Command::Seed => {
            let accounts = services.accounts();
            let learner = parsed.learner_id;
            if let Some(tier) = parsed.tier {
                accounts.change_tier(learner, tier).await?;
            }
            if parsed.name.is_some() {
                accounts.set_display_name(learner, parsed.name).await?;
            }
            if let Some(exam) = &parsed.exam {
                accounts.select_exam(learner, exam).await?;
            }
            eprintln!("seeded learner {learner} in {}", parsed.db_url);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    logging::init_tracing("info");

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(cmd: Command, args: &[&str]) -> Result<Args, ArgsError> {
        let mut iter = args.iter().map(|s| (*s).to_string());
        Args::parse(cmd, &mut iter)
    }

    #[test]
    fn seed_requires_valid_tier() {
        assert!(matches!(
            parse(Command::Seed, &["--learner", "4"]),
            Err(ArgsError::MissingTier)
        ));
        assert!(matches!(
            parse(Command::Seed, &["--tier", "gold"]),
            Err(ArgsError::InvalidTier { .. })
        ));

        let args = parse(Command::Seed, &["--tier", "Premium", "--learner", "4"]).unwrap();
        assert_eq!(args.tier, Some(Tier::Premium));
        assert_eq!(args.learner_id, LearnerId::new(4));
    }

    #[test]
    fn flags_are_scoped_to_subcommands() {
        assert!(matches!(
            parse(Command::Ui, &["--tier", "basic"]),
            Err(ArgsError::UnknownArg(_))
        ));
        let show = parse(Command::Show, &["--exam", "Tahsili"]).unwrap();
        assert_eq!(show.exam.unwrap().as_str(), "tahsili");
        assert!(matches!(
            parse(Command::Show, &["--learner"]),
            Err(ArgsError::MissingValue { flag: "--learner" })
        ));
    }

    #[test]
    fn sqlite_urls_are_normalized() {
        assert_eq!(normalize_sqlite_url("sqlite::memory:".into()), "sqlite::memory:");
        assert_eq!(
            normalize_sqlite_url("sqlite:///tmp/fahm.db".into()),
            "sqlite:///tmp/fahm.db"
        );
        assert_eq!(normalize_sqlite_url("/tmp/fahm.db".into()), "sqlite:///tmp/fahm.db");
    }

    #[test]
    fn prepare_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("fahm.db");
        let url = format!("sqlite://{}", path.display());
        prepare_sqlite_file(&url).unwrap();
        assert!(path.exists());
        assert!(prepare_sqlite_file("postgres://nope").is_err());
    }

    #[tokio::test]
    async fn show_renders_free_dashboard() {
        let services = AppServices::in_memory(builtin_catalog().unwrap(), Clock::system());
        let dashboard = services
            .dashboard()
            .load(LearnerId::new(1), None)
            .await
            .unwrap();
        let text = render_text(&map_dashboard(&dashboard));
        assert!(text.starts_with("Qudurat"));
        assert!(text.contains("Access to worlds 1-2"));
        assert!(text.contains("0 of 10 worlds completed"));
        assert_eq!(text.matches("Upgrade to unlock").count(), 8);
        assert!(text.contains("Unlock all 10 worlds"));
    }
}
