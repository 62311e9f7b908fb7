use crossterm::style::{Color, Stylize};

/// Design tokens for the Stagehand console.
///
/// Design constraints:
/// - Only 5 semantic colors (`colors::*`)
/// - All icons must be sourced from this module
pub mod colors {
    use super::Color;

    /// #22C55E
    pub const SUCCESS: Color = Color::Green;
    /// #EF4444
    pub const ERROR: Color = Color::Red;
    /// #F59E0B
    pub const WARNING: Color = Color::Yellow;
    /// #06B6D4
    pub const INFO: Color = Color::Cyan;
    /// #6B7280
    pub const DIM: Color = Color::DarkGrey;
}

pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const ERROR: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const ARROW: &str = "↳";
    pub const REMOTE: &str = "📡";
}

pub mod icons_ascii {
    pub const SUCCESS: &str = "[OK]";
    pub const ERROR: &str = "[FAIL]";
    pub const WARNING: &str = "[WARN]";
    pub const ARROW: &str = "[>]";
    pub const REMOTE: &str = "[REMOTE]";
}

/// Which icon set and whether to emit ANSI colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub color: bool,
    pub unicode: bool,
}

impl Palette {
    pub const PLAIN: Palette = Palette {
        color: false,
        unicode: false,
    };

    pub fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn success_icon(&self) -> &'static str {
        if self.unicode {
            icons::SUCCESS
        } else {
            icons_ascii::SUCCESS
        }
    }

    pub fn error_icon(&self) -> &'static str {
        if self.unicode {
            icons::ERROR
        } else {
            icons_ascii::ERROR
        }
    }

    pub fn warning_icon(&self) -> &'static str {
        if self.unicode {
            icons::WARNING
        } else {
            icons_ascii::WARNING
        }
    }

    pub fn arrow_icon(&self) -> &'static str {
        if self.unicode {
            icons::ARROW
        } else {
            icons_ascii::ARROW
        }
    }

    pub fn remote_icon(&self) -> &'static str {
        if self.unicode {
            icons::REMOTE
        } else {
            icons_ascii::REMOTE
        }
    }
}
