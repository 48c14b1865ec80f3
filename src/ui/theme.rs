//! # Theme Resolution
//!
//! Turns the four persisted color strings into `ratatui` colors.
//!
//! Accepted forms, tried in order: an ANSI-256 index (`"205"`), a hex
//! triplet (`"#ff87d7"`), or a `ratatui` color name (`"magenta"`). A slot
//! that fails to parse falls back to the corresponding entry of the default
//! palette, so a hand-edited config can never leave the UI unreadable.

use crate::config::ThemeColors;
use ratatui::style::Color;
use std::str::FromStr;

/// Resolved colors for the four UI slots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// List panel title.
    pub title: Color,
    /// Line under the cursor.
    pub selected: Color,
    /// Panel borders.
    pub border: Color,
    /// Output panel title.
    pub output_title: Color,
}

/// Default palette, matching `ThemeColors::default()`.
const DEFAULT: Theme = Theme {
    title: Color::Indexed(205),
    selected: Color::Indexed(199),
    border: Color::Indexed(168),
    output_title: Color::Indexed(212),
};

impl Default for Theme {
    fn default() -> Self {
        DEFAULT
    }
}

impl Theme {
    pub fn from_colors(colors: &ThemeColors) -> Self {
        Self {
            title: parse_color(&colors.title).unwrap_or(DEFAULT.title),
            selected: parse_color(&colors.selected).unwrap_or(DEFAULT.selected),
            border: parse_color(&colors.border).unwrap_or(DEFAULT.border),
            output_title: parse_color(&colors.output_title).unwrap_or(DEFAULT.output_title),
        }
    }
}

fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(index) = value.parse::<u8>() {
        return Some(Color::Indexed(index));
    }
    // Color::from_str understands names and "#rrggbb".
    Color::from_str(value).ok()
}
