mod catalog;
mod config;
mod controller;
mod engine;
mod error;
mod logging;
mod model;
mod store;
mod view;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use config::Args;
use controller::PlayerController;
use engine::ClockEngine;
use model::Favorites;
use store::{JsonFileStore, KeyValueStore, MemoryStore};
use view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Err(e) = logging::init_logging(&args.log_dir) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== upnext starting ===");

    let store: Arc<dyn KeyValueStore> = if args.ephemeral {
        tracing::info!("Ephemeral session, nothing will be saved");
        Arc::new(MemoryStore::new())
    } else {
        let store = JsonFileStore::new(args.state_dir.clone());
        tracing::info!(dir = %store.dir().display(), "Using state directory");
        Arc::new(store)
    };

    let favorites = Favorites::new(store.clone());
    favorites.load().await;

    let (engine, status_rx) = ClockEngine::spawn(args.track_duration(), args.status_interval());
    let controller = PlayerController::new(Arc::new(engine), store, favorites);

    controller.restore().await;

    if let Some(path) = &args.playlist {
        match catalog::load_playlist(path).await {
            Ok(tracks) => controller.set_library(tracks).await,
            Err(e) => {
                tracing::error!(error = ?e, "Could not load playlist");
                eprintln!("Warning: {:#}", e);
            }
        }
    }

    let listener = controller.start_status_listener(status_rx);

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, controller.clone()).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    controller.shutdown().await;
    listener.abort();

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("upnext shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: PlayerController,
) -> io::Result<()> {
    loop {
        let playback = controller.snapshot().await;

        terminal.draw(|f| {
            AppView::render(f, &playback);
        })?;

        // Short poll keeps the progress bar moving between key presses
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = controller.handle_key_event(key).await {
                    tracing::warn!(error = %e, "Key handling failed");
                }
            }
        }

        if controller.should_quit().await {
            break;
        }
    }

    Ok(())
}
