use hatch_core::ConfirmAction;
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::theme::Theme;
use crate::view::truncate;

/// Render the archive/remove confirmation as a centered popup.
pub fn render(f: &mut Frame, action: ConfirmAction, name: &str, theme: &Theme) {
    let area = f.area();
    let prompt = format!("{} {}?", action.label(), name);
    let width = (prompt.chars().count() as u16 + 6).max(44).min(area.width);
    let popup = centered_rect(width, 5, area);
    let inner_width = popup.width.saturating_sub(4) as usize;

    let key = |k: &'static str| {
        Span::styled(
            k,
            Style::default()
                .fg(theme.prompt)
                .add_modifier(Modifier::BOLD),
        )
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!(" {}", truncate(&prompt, inner_width)),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::raw(" "),
            key("[y/Enter]"),
            Span::styled(" confirm  ", theme.dim_style()),
            key("[n/Esc]"),
            Span::styled(" cancel", theme.dim_style()),
        ]),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.danger))
            .title(format!(" {} ", action.label())),
    );

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}

/// Create a centered rectangle of the given width (columns) and height (rows).
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .split(area);
    Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .split(vertical[0])[0]
}
