//! Tarjoman - English/Persian phrase translator
//!
//! Command line front end: translates typed phrases through a LibreTranslate
//! server, falls back to the built-in phrase dictionary when the server is
//! unavailable, and keeps a history of everything translated.

use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;
use tracing::{info, Level};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tarjoman::cli::{Args, Commands, ConfigAction, HistoryAction};
use tarjoman::config::Config;
use tarjoman::error::TarjomanError;
use tarjoman::history::TranslationHistory;
use tarjoman::language::Direction;
use tarjoman::session::TranslationSession;
use tarjoman::speech::{LineCapture, SilentPlayback};
use tarjoman::translate::TranslationEngine;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(args.verbose)?;

    let mut config = Config::load_or_default(args.config.as_deref())?;

    match args.command {
        Commands::Translate { from, offline, mute, text } => {
            let direction: Direction = from.parse()?;
            let text = text.join(" ");

            if offline {
                config.remote.enabled = false;
            }
            let mut session = build_session(&config, mute)?;

            let entry = with_progress("Translating...", session.submit(&text, direction)).await;
            match entry {
                Some(entry) => {
                    println!("{}", entry.translation);
                    session.save_history()?;
                }
                None => info!("Nothing to translate"),
            }
        }
        Commands::Listen { from, mute } => {
            let direction: Direction = from.parse()?;
            let mut session = build_session(&config, mute)?;

            eprintln!(
                "Type {} phrases, one per line (Ctrl-D to finish)",
                direction.source().name()
            );
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut capture = LineCapture::new(stdin);

            let entries = session.listen(&mut capture, direction).await?;
            for entry in &entries {
                println!("{} → {}", entry.text, entry.translation);
            }
            session.save_history()?;
        }
        Commands::Lookup { from, text } => {
            let direction: Direction = from.parse()?;
            let text = text.join(" ");

            config.remote.enabled = false;
            let engine = TranslationEngine::from_config(&config)?;
            let resolution = engine.translate_offline(&text, direction);

            println!("{:<10} {}", "Direction", direction);
            println!("{:<10} {:?}", "Kind", resolution.kind());
            println!("{:<10} {}", "Result", resolution);
        }
        Commands::History { action } => {
            let mut history = TranslationHistory::load(&config.history.path, config.history.max_entries)?;

            match action {
                HistoryAction::List { limit } => {
                    if history.is_empty() {
                        println!("No translations recorded.");
                    } else {
                        println!("\n{:<20} {:<6} {:<12} {}", "Time", "Dir", "Kind", "Text → Translation");
                        println!("{}", "-".repeat(80));

                        for entry in history.recent(limit) {
                            println!(
                                "{:<20} {:<6} {:<12} {} → {}",
                                entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                                entry.direction.to_string(),
                                format!("{:?}", entry.kind),
                                entry.text,
                                entry.translation
                            );
                        }
                    }
                }
                HistoryAction::Speak { n } => {
                    let engine = TranslationEngine::from_config(&config)?;
                    let session = TranslationSession::new(engine, history)
                        .with_playback(Box::new(SilentPlayback));
                    let entry = session.replay(n).await?;
                    println!("{}", entry.translation);
                }
                HistoryAction::Clear => {
                    let removed = history.clear();
                    history.save()?;
                    println!("Cleared {} history entries", removed);
                }
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::Init { output, force } => {
                if output.exists() && !force {
                    return Err(TarjomanError::Config(format!(
                        "{} already exists (use --force to overwrite)",
                        output.display()
                    ))
                    .into());
                }
                Config::default().save_to_file(&output)?;
                println!("Wrote default configuration to {}", output.display());
            }
            ConfigAction::Show => {
                let content = toml::to_string_pretty(&config)?;
                println!("{}", content);
            }
        },
    }

    Ok(())
}

fn build_session(config: &Config, mute: bool) -> Result<TranslationSession> {
    let engine = TranslationEngine::from_config(config)?;
    let history = TranslationHistory::load(&config.history.path, config.history.max_entries)?;

    let session = TranslationSession::new(engine, history);
    if config.speech.playback && !mute {
        Ok(session.with_playback(Box::new(SilentPlayback)))
    } else {
        Ok(session)
    }
}

/// Await `future`, showing a spinner if it takes longer than a second
async fn with_progress<F: Future>(message: &'static str, future: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    let delayed = {
        let spinner = spinner.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
                spinner.set_style(style);
            }
            spinner.set_message(message);
            spinner.enable_steady_tick(Duration::from_millis(120));
        })
    };

    let output = future.await;
    delayed.abort();
    spinner.finish_and_clear();
    output
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<()> {
    let log_dir = std::env::current_dir()?.join(".tarjoman").join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Daily rotation
    let file_appender = rolling::daily(&log_dir, "tarjoman.log");
    let (non_blocking_file, _guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(_guard);

    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    // Console output goes to stderr so translations on stdout stay clean
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(verbose)
        .with_line_number(verbose);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false);

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer);

    subscriber.try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Logging initialized - console: {}, file: {}",
          log_level, log_dir.join("tarjoman.log").display());

    Ok(())
}
