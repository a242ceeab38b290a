//! Entry point for the headless flipbook reader.
//!
//! Responsibilities here are intentionally minimal:
//! - Parse command-line arguments.
//! - Load user configuration from `conf/config.toml`.
//! - Load and paginate the book document via `book_loader`.
//! - Drive a reader session from stdin, printing one JSON event per command.

mod book_loader;
mod cache;
mod commands;

use crate::book_loader::load_book;
use crate::cache::{load_bookmark, save_bookmark};
use crate::commands::{ReaderInput, USAGE, parse_line};
use anyhow::{Context, Result, anyhow};
use flipbook_core::config::load_config;
use flipbook_core::{ReaderSession, SessionCommand};
use std::env;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;

struct Args {
    book_path: PathBuf,
    config_path: PathBuf,
    viewport_width: u32,
}

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let args = parse_args()?;
    let config = load_config(&args.config_path);
    set_log_level(reload_handle, config.log_level.as_filter_str());
    info!(
        path = %args.book_path.display(),
        level = %config.log_level,
        viewport_width = args.viewport_width,
        "Starting flipbook reader"
    );

    let cache_dir = PathBuf::from(&config.cache_dir);
    let book = load_book(&args.book_path, config.pagination_budget())?;
    let bookmark = load_bookmark(&cache_dir, &args.book_path);
    if let Some(bm) = &bookmark {
        info!(slot = bm.slot_index, "Resuming from cached position");
    }
    let mut session = ReaderSession::open(
        args.book_path.clone(),
        book,
        config,
        args.viewport_width,
        bookmark,
    )
    .context("Failed to open book for reading")?;

    let started = Instant::now();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let initial = session.apply_command(SessionCommand::GetSnapshot, 0);
    emit(&mut out, &initial)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read command")?;
        let now_ms = started.elapsed().as_millis() as u64;
        session.tick(now_ms);
        match parse_line(&line) {
            Ok(None) => continue,
            Ok(Some(ReaderInput::Quit)) => break,
            Ok(Some(ReaderInput::Command(command))) => {
                let before = session.to_bookmark();
                let event = session.apply_command(command, now_ms);
                emit(&mut out, &event)?;
                let after = session.to_bookmark();
                if after != before {
                    save_bookmark(&cache_dir, &args.book_path, &after);
                }
            }
            Err(err) => {
                warn!("{err:#}");
                eprintln!("{err:#}");
            }
        }
    }

    // a transition still pending at this point is dropped with the session
    save_bookmark(&cache_dir, &args.book_path, &session.to_bookmark());
    info!("Reader closed");
    Ok(())
}

fn emit(out: &mut impl Write, event: &flipbook_core::SessionEvent) -> Result<()> {
    let json = serde_json::to_string(event).context("Failed to serialize reader event")?;
    writeln!(out, "{json}").context("Failed to write reader event")?;
    out.flush().context("Failed to flush stdout")
}

fn parse_args() -> Result<Args> {
    let mut book_path: Option<PathBuf> = None;
    let mut config_path = PathBuf::from("conf/config.toml");
    let mut viewport_width = DEFAULT_VIEWPORT_WIDTH;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args.next().ok_or_else(|| anyhow!("--config expects a path"))?;
                config_path = PathBuf::from(value);
            }
            "--width" => {
                let value = args.next().ok_or_else(|| anyhow!("--width expects pixels"))?;
                viewport_width = value
                    .parse()
                    .with_context(|| format!("Invalid viewport width: {value}"))?;
            }
            "--help" | "-h" => {
                return Err(anyhow!(
                    "Usage: flipbook-reader [--config <path>] [--width <px>] <book.toml|book.json>\n{USAGE}"
                ));
            }
            _ => book_path = Some(PathBuf::from(arg)),
        }
    }

    let book_path = book_path.ok_or_else(|| {
        anyhow!("Usage: flipbook-reader [--config <path>] [--width <px>] <book.toml|book.json>")
    })?;
    if !Path::new(&book_path).exists() {
        return Err(anyhow!("File not found: {}", book_path.display()));
    }
    Ok(Args {
        book_path,
        config_path,
        viewport_width,
    })
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    warn!("Logging initialized; override level with config.log_level or RUST_LOG");
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("debug"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}
