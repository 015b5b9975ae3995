use std::io;

use chrono::Local;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{backend::Backend, Terminal};
use tracing::debug;

use locwx::date::CLOCK;
use locwx::ui;
use locwx::LocationWeatherWidget;

fn is_quit(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Redraws on state changes and clock ticks until the user quits.
pub async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    widget: &LocationWeatherWidget,
) -> io::Result<()> {
    let mut events = EventStream::new();
    let mut state = widget.subscribe();
    let mut clock = tokio::time::interval(CLOCK.interval);

    loop {
        let snapshot = state.borrow_and_update().clone();
        terminal.draw(|f| ui::draw(f, &snapshot, Local::now()))?;

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if is_quit(&key) {
                        return Ok(());
                    }
                    if key.code == KeyCode::Char('r') {
                        let started = widget.refresh();
                        debug!(started, "manual refresh");
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err),
                None => return Ok(()),
            },
            changed = state.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
            }
            _ = clock.tick() => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_keys() {
        assert!(is_quit(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_quit(&KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE)));
    }
}
