use hatch_core::{Browser, project_dir_name};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::theme::Theme;
use crate::view::truncate;

/// Key hints, split so each line fits an 80-column terminal.
pub const HELP_LINES: [&str; 2] = [
    "\u{2191}/\u{2193} move \u{2022} type to filter \u{2022} Enter open/create",
    "Ctrl+A archive \u{2022} Ctrl+R remove \u{2022} Esc quit",
];

const SELECTED_PREFIX: &str = "\u{25B8} ";
const MIN_VISIBLE_ROWS: usize = 8;
/// Lines of chrome around the list, as counted against the terminal height.
const CHROME_ROWS: usize = 14;

/// Render the whole browser screen.
pub fn render(f: &mut Frame, state: &Browser, theme: &Theme) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // header
        Constraint::Length(1),
        Constraint::Length(1), // filter
        Constraint::Length(1),
        Constraint::Min(1), // rows
        Constraint::Length(1),
        Constraint::Length(1), // detail
        Constraint::Length(1), // status
        Constraint::Length(2), // help
    ])
    .split(f.area());

    render_header(f, chunks[0], theme);
    render_filter(f, chunks[2], state, theme);
    render_rows(f, chunks[4], state, theme);
    render_detail(f, chunks[6], state, theme);

    let status = Paragraph::new(Span::styled(
        truncate(&state.status, chunks[7].width as usize),
        theme.status_style(),
    ));
    f.render_widget(status, chunks[7]);

    let help: Vec<Line> = HELP_LINES
        .iter()
        .map(|line| {
            Line::from(Span::styled(
                truncate(line, chunks[8].width as usize),
                theme.dim_style(),
            ))
        })
        .collect();
    f.render_widget(Paragraph::new(help), chunks[8]);
}

fn render_header(f: &mut Frame, area: Rect, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled("hatch", theme.title_style()),
        Span::styled("  Project hatchery", Style::default().fg(theme.subtitle)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_filter(f: &mut Frame, area: Rect, state: &Browser, theme: &Theme) {
    let mut spans = vec![
        Span::styled("Filter ", theme.dim_style()),
        Span::styled(
            "\u{203A} ",
            Style::default()
                .fg(theme.prompt)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if state.query.is_empty() {
        spans.push(Span::styled("type to search", theme.dim_style()));
    } else {
        spans.push(Span::styled(
            state.query.as_str(),
            Style::default().fg(theme.text),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_rows(f: &mut Frame, area: Rect, state: &Browser, theme: &Theme) {
    let rows = state.row_count();
    // A non-blank query always offers the create row, so an empty list
    // only happens with an empty hatchery and a blank query.
    if rows == 0 {
        let empty = Span::styled("No projects yet. Run: hatch <name>", theme.dim_style());
        f.render_widget(Paragraph::new(empty), area);
        return;
    }

    let (start, end) = visible_window(state.cursor, rows, state.height, area.height as usize);
    let width = (area.width as usize).saturating_sub(SELECTED_PREFIX.chars().count());

    let lines: Vec<Line> = (start..end)
        .map(|row| {
            let selected = row == state.cursor;
            let (label, style) = if state.is_create_row(row) {
                (
                    format!("Create New: {}", state.create_input()),
                    theme.create_style(),
                )
            } else {
                let name = state
                    .filtered
                    .get(row)
                    .and_then(|&i| state.projects.get(i))
                    .map(|p| p.name.clone())
                    .unwrap_or_default();
                (name, Style::default().fg(theme.text))
            };

            if selected {
                Line::from(Span::styled(
                    format!("{SELECTED_PREFIX}{}", truncate(&label, width)),
                    style.patch(theme.highlight_style()),
                ))
            } else {
                Line::from(Span::styled(format!("  {}", truncate(&label, width)), style))
            }
        })
        .collect();

    f.render_widget(Paragraph::new(lines), area);
}

fn render_detail(f: &mut Frame, area: Rect, state: &Browser, theme: &Theme) {
    let detail = if state.is_create_row(state.cursor) {
        match project_dir_name(state.create_input(), &state.now()) {
            Ok(dir) => state.root.join(dir).display().to_string(),
            Err(_) => "Invalid project name".to_string(),
        }
    } else {
        state
            .current_project()
            .map(|p| p.path.display().to_string())
            .unwrap_or_default()
    };

    f.render_widget(
        Paragraph::new(Span::styled(
            truncate(&detail, area.width as usize),
            theme.dim_style(),
        )),
        area,
    );
}

/// Half-open range of rows to draw so the cursor stays on screen.
///
/// `capacity` is the number of lines actually available for rows; the
/// window never exceeds it even when the terminal height suggests more.
pub fn visible_window(cursor: usize, rows: usize, height: u16, capacity: usize) -> (usize, usize) {
    let visible = (height as usize)
        .saturating_sub(CHROME_ROWS)
        .max(MIN_VISIBLE_ROWS)
        .min(capacity)
        .max(1);
    let start = if cursor >= visible {
        cursor + 1 - visible
    } else {
        0
    };
    (start, (start + visible).min(rows))
}
