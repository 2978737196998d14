pub mod browser;
pub mod confirm;

use hatch_core::Browser;
use ratatui::Frame;

use crate::theme::Theme;

/// Draw one frame. Rendering only reads the browser state.
pub fn render(f: &mut Frame, state: &Browser, theme: &Theme) {
    browser::render(f, state, theme);
    if let Some(action) = state.confirm {
        let name = state
            .current_project()
            .map(|p| p.name.as_str())
            .unwrap_or_default();
        confirm::render(f, action, name, theme);
    }
}

/// Truncate a string to fit in `max_width` columns, appending "\u{2026}" if truncated.
pub fn truncate(s: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if s.chars().count() <= max_width {
        return s.to_string();
    }
    let mut truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
    truncated.push('\u{2026}');
    truncated
}
