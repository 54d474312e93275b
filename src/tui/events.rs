use anyhow::Result;
use arboard::Clipboard;
use crossterm::{
    event::{
        DisableBracketedPaste, EnableBracketedPaste, Event, EventStream, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, path::PathBuf, time::Duration};

use crate::config::FileStore;
use crate::tui::draw::draw;
use crate::tui::input::handle_text_input_key;
use crate::tui::state::{App, Focus};

// ── Entry point ───────────────────────────────────────────────────────────────

pub async fn run(store_path: PathBuf) -> Result<()> {
    let label = store_path.display().to_string();
    let mut app = App::new(Box::new(FileStore::new(store_path)), label)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableBracketedPaste)?;
    terminal.show_cursor()?;
    result
}

// ── Event loop ────────────────────────────────────────────────────────────────

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let mut event_stream = EventStream::new();
    let mut tick = tokio::time::interval(Duration::from_millis(250));

    while !app.should_quit {
        terminal.draw(|f| draw(f, app))?;

        tokio::select! {
            // clears success messages after a few seconds; errors stay until the next action
            _ = tick.tick() => {
                if let Some(at) = app.status_at {
                    if !app.status_is_error && at.elapsed() >= Duration::from_secs(3) {
                        app.clear_status();
                    }
                }
            }

            maybe_event = event_stream.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => handle_key(app, key),
                Some(Ok(Event::Paste(text))) => paste(app, &text),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            }
        }
    }
    Ok(())
}

fn paste(app: &mut App, text: &str) {
    if let Focus::Field(field) = app.focus {
        app.input_mut(field).insert_str(text);
        app.commit_input(field);
    }
}

fn paste_from_clipboard(app: &mut App) {
    match Clipboard::new().and_then(|mut cb| cb.get_text()) {
        Ok(text) => paste(app, &text),
        Err(e) => app.set_status(&format!("Clipboard unavailable: {e}"), true),
    }
}

// ── Key handling ──────────────────────────────────────────────────────────────

/// Applies one key press to the app. All controller calls happen here and
/// finish before the next event is read.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c') if ctrl => app.should_quit = true,
        KeyCode::Char('s') if ctrl => app.save(),
        KeyCode::Char('d') if ctrl => app.remove(),
        KeyCode::Char('t') if ctrl => app.reveal_key = !app.reveal_key,
        KeyCode::Char('v') if ctrl => paste_from_clipboard(app),
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Tab => app.cycle_focus(true),
        KeyCode::BackTab => app.cycle_focus(false),
        _ => match app.focus {
            Focus::ProviderList => handle_provider_key(app, key),
            Focus::Field(field) => match key.code {
                KeyCode::Enter => app.save(),
                KeyCode::Up => app.cycle_focus(false),
                KeyCode::Down => app.cycle_focus(true),
                _ => {
                    if handle_text_input_key(app.input_mut(field), key) {
                        app.commit_input(field);
                    }
                }
            },
        },
    }
}

fn handle_provider_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_provider(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_provider(),
        KeyCode::Enter => app.cycle_focus(true),
        _ => {}
    }
}
