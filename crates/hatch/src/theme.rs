use ratatui::style::{Color, Modifier, Style};

/// Color theme for the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub title: Color,
    pub subtitle: Color,
    pub prompt: Color,
    pub text: Color,
    pub dim: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub create: Color,
    pub status: Color,
    pub danger: Color,
    pub border: Color,
}

impl Theme {
    /// Pastel accents on the terminal's own background.
    pub fn default_theme() -> Self {
        Self {
            title: Color::Rgb(255, 135, 215),
            subtitle: Color::Rgb(138, 138, 138),
            prompt: Color::Rgb(135, 215, 255),
            text: Color::Reset,
            dim: Color::Rgb(108, 108, 108),
            highlight_fg: Color::Rgb(255, 255, 255),
            highlight_bg: Color::Rgb(58, 58, 88),
            create: Color::Rgb(135, 255, 175),
            status: Color::Rgb(255, 215, 135),
            danger: Color::Rgb(255, 95, 95),
            border: Color::Rgb(88, 88, 110),
        }
    }

    /// No colors at all; emphasis comes from modifiers only.
    pub fn mono() -> Self {
        Self {
            title: Color::Reset,
            subtitle: Color::Reset,
            prompt: Color::Reset,
            text: Color::Reset,
            dim: Color::Reset,
            highlight_fg: Color::Reset,
            highlight_bg: Color::Reset,
            create: Color::Reset,
            status: Color::Reset,
            danger: Color::Reset,
            border: Color::Reset,
        }
    }

    /// Look a theme up by its config name. Unknown names fall back to the default.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "mono" => Self::mono(),
            "default" => Self::default_theme(),
            other => {
                tracing::warn!(theme = other, "unknown theme, using default");
                Self::default_theme()
            }
        }
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.title).add_modifier(Modifier::BOLD)
    }

    pub fn dim_style(&self) -> Style {
        let style = Style::default().fg(self.dim);
        if self.dim == Color::Reset {
            style.add_modifier(Modifier::DIM)
        } else {
            style
        }
    }

    pub fn highlight_style(&self) -> Style {
        let style = Style::default()
            .fg(self.highlight_fg)
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD);
        if self.highlight_bg == Color::Reset {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style
        }
    }

    pub fn create_style(&self) -> Style {
        Style::default()
            .fg(self.create)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn status_style(&self) -> Style {
        Style::default().fg(self.status)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }
}
