use std::io;
use std::sync::Arc;
use anyhow::Result;
use std::time::Duration;
use tokio::sync::Mutex;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use hc7_hub::backend::{InMemoryBackend, PlaceholderPicker};
use hc7_hub::config::{self, SecretSource};
use hc7_hub::controller::AppController;
use hc7_hub::logging;
use hc7_hub::model::{AccessGate, AccessLevel, AppModel, Route, Screen};
use hc7_hub::view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    let config = match config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Failed to load settings, using defaults: {}", e);
            config::Config::default()
        }
    };

    if let Err(e) = logging::init_logging(config.log_filter.as_deref()) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== HC7 Editing Hub Starting ===");

    let (secret, source) = config.admin_secret()?;
    match source {
        SecretSource::BuiltIn => tracing::warn!(
            "No admin key configured, using the built-in key. Set {} or admin_key in settings.toml",
            config::ADMIN_KEY_ENV
        ),
        source => tracing::info!(source = ?source, "Admin key configured"),
    }
    let gate = AccessGate::new(&secret);
    drop(secret);

    let media_backend = Arc::new(InMemoryBackend::load(config.catalog_path.as_deref())?);
    let model = Arc::new(Mutex::new(AppModel::new()));
    let controller = AppController::new(model.clone(), gate, media_backend, Arc::new(PlaceholderPicker));

    // Optional start path, e.g. `/overlays?userType=visitor`
    if let Some(path) = std::env::args().nth(1) {
        if let Some(route) = start_route(&path) {
            controller.navigate_to(route).await;
        }
    }

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("HC7 Editing Hub shutting down");
    Ok(())
}

/// Route to open on start. Admin access is only granted through the key dialog.
fn start_route(path: &str) -> Option<Route> {
    let route = Route::parse(path);
    if route.screen == Screen::Landing {
        return None;
    }
    if route.access.is_admin() {
        tracing::warn!(path, "Admin start path ignored, entering as visitor");
        return Some(Route { access: AccessLevel::Visitor, ..route });
    }
    Some(route)
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
) -> io::Result<()> {
    loop {
        let should_quit = {
            let mut model_guard = model.lock().await;

            // Auto-clear old errors and status messages (after 5 seconds)
            model_guard.auto_clear_old_notices();

            // Draw UI
            terminal.draw(|f| {
                AppView::render(f, &model_guard);
            })?;

            model_guard.should_quit()
        };

        if should_quit {
            break;
        }

        // Handle input with shorter poll time for smoother UI updates
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = controller.handle_key_event(key).await {
                    tracing::error!(error = %e, "Key handling failed");
                }
            }
        }
    }

    controller.cancel_pending_task().await;
    Ok(())
}
