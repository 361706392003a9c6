//! Verse TUI entry point.

use crossterm::{
    event::{self, Event as CrosstermEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;
use verse_client::RestClient;
use verse_tui::config::TuiConfig;
use verse_tui::error::TuiError;
use verse_tui::events::TuiEvent;
use verse_tui::keys::map_key;
use verse_tui::persistence;
use verse_tui::state::App;
use verse_tui::theme::ClinicTheme;
use verse_tui::views::render_view;

/// Redraw cadence for expiring notifications.
const TICK_MS: u64 = 500;

type Term = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    let config = TuiConfig::load()?;
    verse_tui::logging::init(&config.log_path)?;
    let store = RestClient::new(&config.client_config())?;
    tracing::info!(base_url = store.base_url(), "starting verse-tui");

    let mut app = App::new(store, ClinicTheme::clinic());
    match persistence::load(&config.persistence_path) {
        Ok(Some(state)) => app.active_view = state.active_view,
        Ok(None) => {}
        Err(err) => tracing::warn!(error = %err, "ignoring unreadable UI state"),
    }

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard;

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);
    spawn_input_reader(event_tx);

    app.in_flight = true;
    terminal.draw(|f| render_view(f, &app))?;
    app.refresh().await;
    app.in_flight = false;

    let mut ticker = tokio::time::interval(Duration::from_millis(TICK_MS));

    loop {
        terminal.draw(|f| render_view(f, &app))?;

        tokio::select! {
            _ = ticker.tick() => app.prune_notifications(),
            event = event_rx.recv() => {
                let Some(event) = event else { break };
                if handle_event(&mut terminal, &mut app, event).await? {
                    break;
                }
            }
        }
    }

    if let Err(err) = persistence::save(&config.persistence_path, &app.persisted_state()) {
        tracing::warn!(error = %err, "failed to persist UI state");
    }
    tracing::info!("verse-tui exiting");
    Ok(())
}

fn setup_terminal() -> Result<Term, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            if let Ok(evt) = event::read() {
                let sent = match evt {
                    CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                        sender.blocking_send(TuiEvent::Input(key))
                    }
                    CrosstermEvent::Resize(width, height) => {
                        sender.blocking_send(TuiEvent::Resize { width, height })
                    }
                    _ => Ok(()),
                };
                if sent.is_err() {
                    break;
                }
            }
        }
    });
}

async fn handle_event(
    terminal: &mut Term,
    app: &mut App<RestClient>,
    event: TuiEvent,
) -> Result<bool, TuiError> {
    match event {
        TuiEvent::Input(key) => {
            let Some(action) = map_key(key, app.key_context()) else {
                return Ok(false);
            };
            if action.may_call_store() {
                app.in_flight = true;
                terminal.draw(|f| render_view(f, app))?;
            }
            let quit = app.apply(action).await;
            app.in_flight = false;
            Ok(quit)
        }
        TuiEvent::Resize { .. } => Ok(false),
    }
}
