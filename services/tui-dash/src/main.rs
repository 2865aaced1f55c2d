// services/tui-dash/src/main.rs
//
// TUI Dashboard for NIRIKSHAN
// Upload a CSV, send it for analysis, browse the returned report
//
// Run with: cargo run --bin tui-dash -- --demo

use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use dashkit::{load_config, AnalysisService, DashboardConfig, Theme};
use futures::StreamExt;
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod mock;
mod palette;
mod state;
mod ui;

use state::{AppState, Command};

#[derive(Parser, Debug)]
#[command(name = "tui-dash")]
#[command(about = "Terminal dashboard for NIRIKSHAN CSV analysis")]
#[command(version = "0.1.0")]
struct Args {
    /// YAML config file (defaults, then this file, then NIRIKSHAN__* env vars)
    #[arg(long, short)]
    config: Option<String>,

    /// Analysis service base URL; overrides analysis.base_url
    #[arg(long)]
    api_url: Option<String>,

    /// CSV file to select at startup
    #[arg(long, short)]
    file: Option<String>,

    /// Initial theme: light or dark
    #[arg(long)]
    theme: Option<Theme>,

    /// Run with an in-process mock analysis service (no server required)
    #[arg(long, short)]
    demo: bool,

    /// Refresh interval in milliseconds
    #[arg(long)]
    refresh_ms: Option<u64>,

    /// Write tracing output to this file instead of discarding it
    #[arg(long)]
    log_file: Option<String>,
}

impl Args {
    fn settings(&self) -> Result<DashboardConfig> {
        let mut config = load_config(self.config.as_deref())?;

        if let Some(url) = &self.api_url {
            config.analysis.base_url = url.clone();
        }
        if let Some(theme) = self.theme {
            config.ui.default_theme = theme;
        }
        if let Some(refresh_ms) = self.refresh_ms {
            config.ui.refresh_ms = refresh_ms;
        }

        config.analysis.validate()?;
        Ok(config)
    }
}

// The alternate screen owns stdout, so tracing goes to a file or nowhere.
fn init_tracing(config: &DashboardConfig, log_file: Option<&str>) -> Result<()> {
    let writer = match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new().create(true).append(true).open(path)?;
            BoxMakeWriter::new(std::sync::Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::sink),
    };

    let level = &config.observability.log_level;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tui_dash={},dashkit={}", level, level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()?;

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.settings()?;
    init_tracing(&config, args.log_file.as_deref())?;

    let refresh = Duration::from_millis(config.ui.refresh_ms.max(10));
    let handle = api::build_service(&config, args.demo, Duration::from_millis(900))?;

    let mut state = AppState::new(config.ui.default_theme, handle.mode_label.clone());
    state.add_log("INFO", format!("Dashboard started [{}]", handle.mode_label));
    if let Some(path) = &args.file {
        state.select_path(path);
    }
    info!(mode = %handle.mode_label, "tui-dash started");

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_app(&mut terminal, &mut state, handle.service, refresh).await;

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    state: &mut AppState,
    service: Arc<dyn AnalysisService>,
    refresh: Duration,
) -> Result<()> {
    let (outcome_tx, mut outcomes) = mpsc::unbounded_channel();
    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(refresh);

    loop {
        terminal.draw(|frame| ui::draw(frame, state))?;

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    match state.handle_key(key) {
                        Command::Quit => return Ok(()),
                        Command::Analyze => {
                            if let Some(ticket) = state.request_analysis() {
                                api::spawn_analysis(service.clone(), ticket, outcome_tx.clone());
                            }
                        }
                        Command::None => {}
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => return Ok(()),
            },
            Some(outcome) = outcomes.recv() => state.complete(outcome),
            _ = ticker.tick() => state.tick(),
        }
    }
}
