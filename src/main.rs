mod config;
mod controller;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};

use config::Cli;
use controller::AppController;
use model::{Action, AppModel, AppState, HttpSongApi};
use view::AppView;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(&cli.log_dir) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== Song Search Client Starting ===");

    let api_url = cli.validated_api_url()?;
    let api = Arc::new(HttpSongApi::new(&api_url).context("Failed to build HTTP client")?);
    tracing::info!(api_url = %api_url, strategy = cli.initial_strategy().key(), "Configuration loaded");

    let model = AppModel::new(AppState::with_strategy(cli.initial_strategy()));
    let controller = AppController::new(model.clone(), api.clone());

    // Probe the API root in background
    let model_for_ping = model.clone();
    let api_for_ping = api.clone();
    tokio::spawn(async move {
        match api_for_ping.ping().await {
            Ok(banner) => {
                model_for_ping.apply(Action::ApiReachable(banner)).await;
            }
            Err(e) => tracing::warn!(error = %e, "API root not reachable"),
        }
    });

    // Initial statistics load
    let controller_for_stats = controller.clone();
    tokio::spawn(async move {
        controller_for_stats.refresh_stats().await;
    });

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model, controller, &api_url).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("Song Search Client shutting down");
    Ok(())
}

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: AppModel,
    controller: AppController,
    api_url: &str,
) -> io::Result<()> {
    loop {
        let state = model.snapshot().await;

        // Draw UI
        let completed = terminal.draw(|f| {
            AppView::render(f, &state, api_url);
        })?;
        let area: Rect = completed.area;

        if state.should_quit {
            break;
        }

        // Non-blocking check for input; otherwise sleep so request tasks can run
        if event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => {
                    if let Err(e) = controller.handle_key_event(key).await {
                        tracing::warn!(error = %e, "Key handling failed");
                    }
                }
                Event::Mouse(mouse) => controller.handle_mouse_event(mouse, area).await,
                _ => {}
            }
        } else {
            tokio::time::sleep(INPUT_POLL_INTERVAL).await;
        }
    }

    Ok(())
}
