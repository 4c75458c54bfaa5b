//! Dark and light palettes, switched with `theme <dark|light>`.

use ratatui::style::Color;
use termfolio::dispatch::ThemeName;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    /// Transcript text
    pub text: Color,
    /// Hints, footers
    pub text_dim: Color,
    pub prompt: Color,
    pub border: Color,
    /// Status bar label and boot gauge
    pub accent: Color,
    pub code: Color,
    pub banner: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background: Color::Black,
            text: Color::Green,
            text_dim: Color::DarkGray,
            prompt: Color::LightGreen,
            border: Color::Green,
            accent: Color::Yellow,
            code: Color::Cyan,
            banner: Color::LightGreen,
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::White,
            text: Color::Black,
            text_dim: Color::Gray,
            prompt: Color::Blue,
            border: Color::DarkGray,
            accent: Color::Magenta,
            code: Color::Blue,
            banner: Color::DarkGray,
        }
    }

    pub fn named(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
        }
    }
}
