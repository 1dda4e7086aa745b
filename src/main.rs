mod audio;
mod config;
mod controller;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableFocusChange, EnableFocusChange, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver};

use audio::PreviewPlayerFactory;
use config::{Config, INPUT_POLL_INTERVAL};
use controller::{AppController, AppEvent};
use model::SearchClient;
use view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    if let Err(e) = logging::init_logging(&config.log_dir) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!(
        base_url = %config.base_url,
        entity = ?config.entity,
        debounce_ms = config.debounce_ms,
        audio = !config.no_audio,
        "=== tunescout starting ==="
    );

    let search = SearchClient::new(&config.base_url, config.entity.clone())?;
    tracing::debug!(endpoint = %search.endpoint(), "Search client ready");

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let mut controller = AppController::new(
        Arc::new(search),
        Box::new(PreviewPlayerFactory::new(!config.no_audio)),
        config.debounce(),
        events_tx,
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    controller.on_visible(Instant::now());

    let res = run_app(&mut terminal, &mut controller, events_rx);

    controller.on_hidden();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableFocusChange, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("tunescout shutting down");
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: &mut AppController,
    mut events: UnboundedReceiver<AppEvent>,
) -> io::Result<()> {
    let mut spinner_frame = 0usize;

    loop {
        let now = Instant::now();

        let size = terminal.size()?;
        let results_area = AppView::results_area(Rect::new(0, 0, size.width, size.height));
        controller.set_viewport(results_area.width, results_area.height);

        controller.model.auto_clear_expired_toast(now);

        terminal.draw(|f| AppView::render(f, controller.model(), spinner_frame))?;
        spinner_frame = spinner_frame.wrapping_add(1);

        // Wake up in time for a pending debounce deadline
        let timeout = controller
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now).min(INPUT_POLL_INTERVAL))
            .unwrap_or(INPUT_POLL_INTERVAL);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => controller.handle_key_event(key, Instant::now()),
                Event::FocusGained => {
                    tracing::debug!("Terminal focus gained");
                    controller.on_visible(Instant::now());
                }
                Event::FocusLost => {
                    tracing::debug!("Terminal focus lost");
                    controller.on_hidden();
                }
                _ => {}
            }
        }

        while let Ok(event) = events.try_recv() {
            controller.handle_app_event(event, Instant::now());
        }

        controller.tick(Instant::now());
        controller.poll_playback(Instant::now());

        if controller.should_quit() {
            break;
        }
    }

    Ok(())
}
