//! Theme color definitions for the UI
//!
//! Provides dark and light color palettes that can be switched at runtime.

use crate::config::Theme;
use ratatui::style::Color;

/// Complete color palette for the UI
#[derive(Debug, Clone, Copy)]
pub struct ThemeColors {
    /// Main background
    pub bg: Color,
    /// Primary foreground text
    pub fg: Color,
    /// Dimmed/secondary text
    pub dim: Color,
    /// Accent color (titles, borders)
    pub accent: Color,
    /// READY status
    pub ready: Color,
    /// BUSY status and in-flight badge
    pub busy: Color,
    /// Key idle background
    pub key_off: Color,
    /// Key waiting in the queue
    pub key_queued: Color,
    /// Key currently being applied
    pub key_processing: Color,
    /// Key label text (idle)
    pub key_text: Color,
    /// Key label text on a highlighted cap
    pub key_text_on: Color,
}

impl ThemeColors {
    /// Create a color palette for the given theme variant
    pub fn from_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }

    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(22, 22, 30),
            fg: Color::Rgb(200, 200, 210),
            dim: Color::Rgb(90, 90, 110),
            accent: Color::Rgb(80, 200, 220),
            ready: Color::Rgb(80, 200, 120),
            busy: Color::Rgb(240, 90, 100),
            key_off: Color::Rgb(40, 40, 50),
            key_queued: Color::Rgb(240, 180, 80),
            key_processing: Color::Rgb(240, 90, 100),
            key_text: Color::Rgb(180, 180, 190),
            key_text_on: Color::Rgb(20, 20, 25),
        }
    }

    /// High contrast for bright terminals
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb(245, 245, 248),
            fg: Color::Rgb(30, 30, 40),
            dim: Color::Rgb(130, 130, 150),
            accent: Color::Rgb(0, 130, 160),
            ready: Color::Rgb(30, 150, 70),
            busy: Color::Rgb(200, 50, 60),
            key_off: Color::Rgb(220, 220, 228),
            key_queued: Color::Rgb(250, 230, 160),
            key_processing: Color::Rgb(250, 190, 190),
            key_text: Color::Rgb(50, 50, 60),
            key_text_on: Color::Rgb(30, 30, 40),
        }
    }
}
