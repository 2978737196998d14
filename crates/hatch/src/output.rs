use std::io::IsTerminal;
use std::path::Path;

use owo_colors::OwoColorize;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    /// Color only when writing to a terminal and `NO_COLOR` is unset.
    pub fn detect(stream: &impl IsTerminal) -> Self {
        Self(stream.is_terminal() && std::env::var_os("NO_COLOR").is_none())
    }

    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// `Created: <path>` and friends, printed after a successful command.
pub fn success_line(label: &str, path: &Path, color: ColorMode) -> String {
    let label = format!("{label}:");
    if color.enabled() {
        format!("{} {}", label.green().bold(), path.display())
    } else {
        format!("{label} {}", path.display())
    }
}

/// `error: <message>` with the full cause chain on one line.
pub fn error_line(err: &anyhow::Error, color: ColorMode) -> String {
    if color.enabled() {
        format!("{} {err:#}", "error:".red().bold())
    } else {
        format!("error: {err:#}")
    }
}
