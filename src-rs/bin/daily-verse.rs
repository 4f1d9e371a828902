use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use daily_verse_rs::helpers::{build_mailer, build_scripture_client, load_env_file, load_recipients};
use daily_verse_rs::mail::MailTransport;
use daily_verse_rs::scripture::ScriptureSource;
use daily_verse_rs::verses::{FileStateStore, Selector, StateSource, VerseStore};
use daily_verse_rs::{AppConfig, DailyVerse, MailSetup, RunOptions};

/// Picks today's verse, looks up its text and mails it out.
#[derive(Parser)]
#[command(name = "daily-verse", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Verse list, one reference per line
    #[arg(long, global = true)]
    verses: Option<PathBuf>,

    /// Rotation state file
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Recipient list, one address per line
    #[arg(long, global = true)]
    recipients: Option<PathBuf>,

    /// Append log output to this file ("-" for stderr, default app.log)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Credentials file loaded before reading the environment (default: .env)
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Select, look up and mail today's verse (default).
    Run {
        /// Skip sending mail
        #[arg(long)]
        no_mail: bool,

        /// Do not write the advanced rotation back
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the rotation position without advancing it.
    Status,
    /// Rebuild the rotation from the verse list and start a new cycle.
    Reset,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let env_file = load_env_file(cli.env_file.as_deref());
    let mut cfg = AppConfig::from_env();
    if let Some(path) = cli.verses {
        cfg.verses_file = path;
    }
    if let Some(path) = cli.state {
        cfg.state_file = path;
    }
    if let Some(path) = cli.recipients {
        cfg.recipients_file = path;
    }
    if cli.log_file.is_some() {
        cfg.log_file = cli.log_file;
    }

    init_logging(cfg.log_path())?;
    match env_file {
        Ok(Some(path)) => log::debug!("loaded environment from {}", path.display()),
        Ok(None) => log::debug!("no env file found, using process environment"),
        Err(err) => log::warn!("could not load env file: {}", err),
    }

    let command = cli.command.unwrap_or(Command::Run {
        no_mail: false,
        dry_run: false,
    });
    match command {
        Command::Run { no_mail, dry_run } => run(&cfg, no_mail, dry_run),
        Command::Status => status(&cfg),
        Command::Reset => reset(&cfg),
    }
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn build_job(cfg: &AppConfig) -> DailyVerse {
    let scripture = build_scripture_client(cfg).map(|c| Box::new(c) as Box<dyn ScriptureSource>);
    DailyVerse::new(
        Box::new(VerseStore::new(&cfg.verses_file)),
        Box::new(FileStateStore::new(&cfg.state_file)),
        Selector::random(),
        scripture,
    )
}

fn mail_setup(cfg: &AppConfig) -> MailSetup {
    let transport = match build_mailer(cfg) {
        Ok(mailer) => Box::new(mailer) as Box<dyn MailTransport>,
        Err(err) => return MailSetup::Unavailable(err),
    };
    let recipients = match load_recipients(&cfg.recipients_file) {
        Ok(list) => list,
        Err(err) => {
            log::error!(
                "could not read recipient list {}: {}",
                cfg.recipients_file.display(),
                err
            );
            Vec::new()
        }
    };
    MailSetup::Ready {
        transport,
        recipients,
    }
}

fn run(cfg: &AppConfig, no_mail: bool, dry_run: bool) -> Result<()> {
    let mail = if no_mail {
        MailSetup::Disabled
    } else {
        mail_setup(cfg)
    };
    let mut job = build_job(cfg)
        .with_mail(mail)
        .with_options(RunOptions { persist: !dry_run });

    let today = chrono::Local::now().date_naive();
    let report = job.run(today).context("daily verse run failed")?;

    println!("Verse of the day: {}", report.verse);
    println!("Scripture text:");
    println!(
        "{}",
        report
            .scripture
            .as_deref()
            .unwrap_or("Could not fetch verse of the day")
    );
    if !report.deliveries.is_empty() {
        println!(
            "Mail: {} delivered, {} failed",
            report.delivered_count(),
            report.failed_count()
        );
    }
    Ok(())
}

fn status(cfg: &AppConfig) -> Result<()> {
    let loaded = build_job(cfg)
        .status()
        .context("could not read rotation state")?;
    let state = &loaded.state;
    match loaded.source {
        StateSource::Persisted => println!(
            "Rotation at {}/{} ({} remaining in this cycle)",
            state.cursor(),
            state.len(),
            state.remaining()
        ),
        StateSource::Fresh => println!(
            "No usable rotation state at {}; next run starts a fresh cycle of {} verses",
            cfg.state_file.display(),
            state.len()
        ),
    }
    Ok(())
}

fn reset(cfg: &AppConfig) -> Result<()> {
    let state = build_job(cfg)
        .reset()
        .context("could not reset rotation")?;
    println!("Rotation reset: {} verses reshuffled", state.len());
    Ok(())
}
