use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;
use std::time::Duration;

use crate::app::App;

const POLL_INTERVAL: Duration = Duration::from_millis(250);
const PAGE_LINES: usize = 10;

enum KeyAction {
    Submit,
    Backspace,
    Insert(char),
    HistoryPrevious,
    HistoryNext,
    PageUp,
    PageDown,
    ScrollToEnd,
    ToggleAutoScroll,
    Quit,
}

impl KeyAction {
    fn from_key(key: KeyEvent) -> Option<Self> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') | KeyCode::Char('C') => Some(Self::Quit),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Enter => Some(Self::Submit),
            KeyCode::Backspace => Some(Self::Backspace),
            KeyCode::Char(c) => Some(Self::Insert(c)),
            KeyCode::Up => Some(Self::HistoryPrevious),
            KeyCode::Down => Some(Self::HistoryNext),
            KeyCode::PageUp => Some(Self::PageUp),
            KeyCode::PageDown => Some(Self::PageDown),
            KeyCode::End => Some(Self::ScrollToEnd),
            KeyCode::F(2) => Some(Self::ToggleAutoScroll),
            KeyCode::Esc => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Waits up to one poll interval for input so the status line can expire between keys.
pub fn handle_events(app: &mut App) -> Result<()> {
    if !event::poll(POLL_INTERVAL).context("Failed to poll terminal events")? {
        return Ok(());
    }

    if let Event::Key(key) = event::read().context("Failed to read keyboard event")?
        && key.kind == KeyEventKind::Press
    {
        handle_key_press(app, key);
    }
    Ok(())
}

fn handle_key_press(app: &mut App, key: KeyEvent) {
    let Some(action) = KeyAction::from_key(key) else {
        return;
    };

    match action {
        KeyAction::Submit => app.submit_input(),
        KeyAction::Backspace => {
            app.input.pop();
        }
        KeyAction::Insert(c) => app.input.push(c),
        KeyAction::HistoryPrevious => app.recall_previous(),
        KeyAction::HistoryNext => app.recall_next(),
        KeyAction::PageUp => app.scroll_up(PAGE_LINES),
        KeyAction::PageDown => app.scroll_down(PAGE_LINES),
        KeyAction::ScrollToEnd => app.scroll_to_end(),
        KeyAction::ToggleAutoScroll => {
            app.toggle_auto_scroll();
            debug!("Auto-scroll set to {}", app.auto_scroll);
        }
        KeyAction::Quit => {
            debug!("Quit requested from keyboard");
            app.quit();
        }
    }
}
