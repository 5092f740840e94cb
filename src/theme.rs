use std::io::IsTerminal;

use anstyle::{AnsiColor, Color, RgbColor, Style};

pub const ACCENT: Style = Style::new()
    .fg_color(Some(Color::Rgb(RgbColor(207, 106, 76))))
    .bold();
pub const FAILURE: Style = Style::new()
    .fg_color(Some(Color::Ansi(AnsiColor::Red)))
    .bold();
pub const WARNING: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow)));
pub const INFO: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue)));
pub const DIM: Style = Style::new().dimmed();

/// Applies styles only when the output stream is a terminal
#[derive(Debug, Clone, Copy)]
pub struct Paint {
    enabled: bool,
}

impl Paint {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Paint { enabled }
    }

    #[must_use]
    pub fn stdout() -> Self {
        Paint::new(std::io::stdout().is_terminal())
    }

    #[must_use]
    pub fn stderr() -> Self {
        Paint::new(std::io::stderr().is_terminal())
    }

    #[must_use]
    pub fn paint(&self, style: Style, text: &str) -> String {
        if self.enabled {
            format!("{}{text}{}", style.render(), style.render_reset())
        } else {
            text.to_string()
        }
    }
}
