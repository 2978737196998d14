use hatch_core::Action;
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map a crossterm terminal event to a browser action.
///
/// Plain characters always go to the filter, so there are no single-letter
/// shortcuts; commands live on Ctrl chords and the arrow keys.
pub fn map_event(event: &Event) -> Option<Action> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => map_key(key),
        Event::Resize(w, h) => Some(Action::Resize(*w, *h)),
        _ => None,
    }
}

fn map_key(key: &KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Cancel),
            KeyCode::Char('p') => Some(Action::MoveUp),
            KeyCode::Char('n') => Some(Action::MoveDown),
            KeyCode::Char('a') => Some(Action::RequestArchive),
            KeyCode::Char('r') => Some(Action::RequestRemove),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Up => Some(Action::MoveUp),
        KeyCode::Down => Some(Action::MoveDown),
        KeyCode::Enter => Some(Action::Accept),
        KeyCode::Backspace | KeyCode::Delete => Some(Action::Backspace),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => Some(Action::Input(c)),
        _ => None,
    }
}
