//! Light/dark theme
//!
//! `ThemeMode` lives in `AppState` and is the only source of truth for the
//! current theme. Renderers never look at it directly; they receive the
//! `Palette` derived from it.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            ThemeMode::Dark => Palette::DARK,
            ThemeMode::Light => Palette::LIGHT,
        }
    }
}

/// Colors used by every renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub primary: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub focused_border: Color,
    pub surface: Color,
    /// Background of pinned table cells and the header row
    pub pinned: Color,
    pub highlight: Color,
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
}

impl Palette {
    pub const DARK: Palette = Palette {
        primary: Color::Rgb(20, 184, 166),
        text: Color::Rgb(226, 232, 240),
        muted: Color::Rgb(148, 163, 184),
        border: Color::Rgb(51, 65, 85),
        focused_border: Color::Cyan,
        surface: Color::Rgb(15, 23, 42),
        pinned: Color::Rgb(30, 41, 59),
        highlight: Color::DarkGray,
        success: Color::Rgb(52, 211, 153),
        warning: Color::Rgb(251, 191, 36),
        danger: Color::Rgb(251, 113, 133),
    };

    pub const LIGHT: Palette = Palette {
        primary: Color::Rgb(13, 148, 136),
        text: Color::Rgb(15, 23, 42),
        muted: Color::Rgb(100, 116, 139),
        border: Color::Rgb(203, 213, 225),
        focused_border: Color::Blue,
        surface: Color::Rgb(248, 250, 252),
        pinned: Color::Rgb(226, 232, 240),
        highlight: Color::Rgb(203, 213, 225),
        success: Color::Rgb(5, 150, 105),
        warning: Color::Rgb(217, 119, 6),
        danger: Color::Rgb(225, 29, 72),
    };
}
