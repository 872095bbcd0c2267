//! Virtual keyboard rendering with queued and in-flight highlights

use super::ThemeColors;
use crate::keyboard::{KeyEvent, SlowKeyboard};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

/// Character rows of the virtual keyboard
pub const KEY_ROWS: [&str; 4] = ["1234567890", "QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

/// Visual state of a single key cap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCapState {
    Idle,
    Queued,
    Processing,
}

/// Virtual keyboard showing which keys are waiting or being applied
pub struct KeyboardVisual<'a> {
    keyboard: &'a SlowKeyboard,
    colors: ThemeColors,
}

impl<'a> KeyboardVisual<'a> {
    pub fn new(keyboard: &'a SlowKeyboard, colors: ThemeColors) -> Self {
        Self { keyboard, colors }
    }

    /// Key caps show upper case, so a lower-case key lights the same cap
    fn cap_matches(cap: KeyEvent, event: KeyEvent) -> bool {
        match (cap, event) {
            (KeyEvent::Char(a), KeyEvent::Char(b)) => a.eq_ignore_ascii_case(&b),
            (a, b) => a == b,
        }
    }

    pub fn cap_state(&self, cap: KeyEvent) -> KeyCapState {
        if self
            .keyboard
            .currently_processing()
            .is_some_and(|e| Self::cap_matches(cap, e))
        {
            KeyCapState::Processing
        } else if self
            .keyboard
            .pending_keys()
            .any(|e| Self::cap_matches(cap, e))
        {
            KeyCapState::Queued
        } else {
            KeyCapState::Idle
        }
    }

    fn render_key(&self, buf: &mut Buffer, x: u16, y: u16, label: &str, cap: KeyEvent, w: u16) {
        let style = match self.cap_state(cap) {
            KeyCapState::Processing => Style::default()
                .fg(self.colors.key_text_on)
                .bg(self.colors.key_processing)
                .add_modifier(Modifier::BOLD),
            KeyCapState::Queued => Style::default()
                .fg(self.colors.key_text_on)
                .bg(self.colors.key_queued),
            KeyCapState::Idle => Style::default()
                .fg(self.colors.key_text)
                .bg(self.colors.key_off),
        };
        if y < buf.area.y + buf.area.height && x + w <= buf.area.x + buf.area.width {
            buf.set_string(x, y, format!("{:^w$}", label, w = w as usize), style);
        }
    }
}

impl<'a> Widget for KeyboardVisual<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 56 || area.height < 5 {
            buf.set_string(
                area.x,
                area.y,
                "⌨ Window too small",
                Style::default().fg(self.colors.dim),
            );
            return;
        }

        let w = 4u16;
        let x0 = area.x + 1;

        for (row, keys) in KEY_ROWS.iter().enumerate() {
            // Stagger each row like a physical board
            let mut x = x0 + row as u16 * 2;
            let y = area.y + row as u16;
            for c in keys.chars() {
                self.render_key(buf, x, y, &c.to_string(), KeyEvent::Char(c), w);
                x += w + 1;
            }
        }

        let y = area.y + 4;
        let sp_w = (w + 1) * 6;
        self.render_key(buf, x0 + 6, y, "Space", KeyEvent::Space, sp_w);
        let ex = x0 + 6 + sp_w + 1;
        self.render_key(buf, ex, y, "Enter", KeyEvent::Enter, w + 3);
        self.render_key(buf, ex + w + 4, y, "⌫", KeyEvent::Backspace, w);
    }
}
