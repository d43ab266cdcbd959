mod config;
mod controller;
mod host;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use anyhow::Result;
use tokio::sync::Mutex;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};

use config::SiteConfig;
use controller::AppController;
use host::{NoNativeShare, SystemClipboard};
use model::AppModel;
use view::{AppView, FrameState};

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== Pressroom Starting ===");

    let (site_config, config_error) = match SiteConfig::load() {
        Ok(config) => (config, None),
        Err(e) => {
            tracing::warn!(error = %e, "Could not load site configuration, using defaults");
            (SiteConfig::default(), Some(e))
        }
    };

    let app_model = AppModel::new(site_config);
    if let Some(e) = config_error {
        app_model
            .set_error(AppController::format_error("Site configuration ignored", &e))
            .await;
    }
    app_model.sync_metadata().await;

    let model = Arc::new(Mutex::new(app_model));
    let controller = AppController::new(
        model.clone(),
        Arc::new(NoNativeShare),
        Arc::new(SystemClipboard),
    );

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model, controller.clone()).await;

    controller.shutdown().await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("Pressroom shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
) -> io::Result<()> {
    loop {
        // Get current state
        let (state, should_quit) = {
            let model_guard = model.lock().await;

            // Expire notices, copied flags and simulated loads
            model_guard.run_timers(Instant::now()).await;

            (
                FrameState {
                    playback: model_guard.get_playback().await,
                    ui_state: model_guard.get_ui_state().await,
                    widgets: model_guard.get_widgets().await,
                    head: model_guard.get_head().await,
                },
                model_guard.should_quit().await,
            )
        };

        if should_quit {
            break;
        }

        terminal.draw(|f| {
            AppView::render(f, &state);
        })?;

        // Short poll keeps the playback clock and shimmer smooth
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    if let Err(e) = controller.handle_key_event(key).await {
                        tracing::warn!(error = %e, "Key handling failed");
                    }
                }
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    let screen = Rect::new(0, 0, size.width, size.height);
                    if let Err(e) = controller.handle_mouse_event(mouse, screen).await {
                        tracing::warn!(error = %e, "Mouse handling failed");
                    }
                }
                _ => {}
            }
        }
    }

    Ok(())
}
