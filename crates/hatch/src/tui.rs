use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use anyhow::{Context, anyhow};
use hatch_core::{Action, Browser, Outcome};
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::crossterm::event::{self, Event};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::CrosstermBackend;

use crate::input;
use crate::theme::Theme;
use crate::view;

/// Where terminal events come from. The real terminal in production, a
/// scripted queue in tests.
pub trait EventSource {
    fn next_event(&mut self) -> anyhow::Result<Event>;
}

struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn next_event(&mut self) -> anyhow::Result<Event> {
        event::read().context("read terminal event")
    }
}

impl EventSource for VecDeque<Event> {
    fn next_event(&mut self) -> anyhow::Result<Event> {
        self.pop_front().ok_or_else(|| anyhow!("event source exhausted"))
    }
}

/// Take over the terminal, run the browser to completion and give the
/// terminal back, whatever the outcome.
pub fn run(browser: Browser, theme: &Theme) -> anyhow::Result<Outcome> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e).context("enter alternate screen");
    }

    // Install panic hook that restores terminal before printing panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = Terminal::new(CrosstermBackend::new(stdout))
        .context("create terminal")
        .and_then(|mut terminal| {
            // Drain any stray input events (e.g. Enter keypress from launching the command)
            while event::poll(Duration::from_millis(20)).unwrap_or(false) {
                let _ = event::read();
            }
            let outcome = drive(&mut terminal, &mut CrosstermEvents, browser, theme);
            let _ = terminal.show_cursor();
            outcome
        });

    // Restore terminal
    let restored = disable_raw_mode()
        .and_then(|()| execute!(io::stdout(), LeaveAlternateScreen))
        .context("restore terminal");
    let outcome = result?;
    restored?;
    Ok(outcome)
}

/// Event loop: draw, wait for one event, feed it to the browser, repeat.
pub fn drive<B: Backend>(
    terminal: &mut Terminal<B>,
    events: &mut impl EventSource,
    mut browser: Browser,
    theme: &Theme,
) -> anyhow::Result<Outcome> {
    let size = terminal.size().context("query terminal size")?;
    browser.update(Action::Resize(size.width, size.height));

    loop {
        terminal
            .draw(|f| view::render(f, &browser, theme))
            .context("draw browser")?;

        let event = events.next_event()?;
        if let Some(action) = input::map_event(&event)
            && browser.update(action)
        {
            break;
        }
    }

    let outcome = browser.into_outcome();
    tracing::debug!(?outcome, "browser session ended");
    Ok(outcome)
}
