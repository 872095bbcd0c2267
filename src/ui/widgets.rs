//! Custom TUI widgets

use super::ThemeColors;
use crate::keyboard::{KeyEvent, KeyboardStatus, SlowKeyboard};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

fn panel<'a>(title: Line<'a>, colors: &ThemeColors) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(colors.dim))
}

/// Committed text with an in-flight badge in the title
pub struct OutputPanel<'a> {
    keyboard: &'a SlowKeyboard,
    colors: ThemeColors,
}

impl<'a> OutputPanel<'a> {
    pub fn new(keyboard: &'a SlowKeyboard, colors: ThemeColors) -> Self {
        Self { keyboard, colors }
    }
}

impl<'a> Widget for OutputPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut title = vec![Span::styled(
            " Output ",
            Style::default().fg(self.colors.accent).add_modifier(Modifier::BOLD),
        )];
        if let Some(key) = self.keyboard.currently_processing() {
            title.push(Span::styled(
                format!(" Processing: {} ", key.label()),
                Style::default()
                    .fg(self.colors.key_text_on)
                    .bg(self.colors.busy)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        let block = panel(Line::from(title), &self.colors);
        let text = self.keyboard.committed_text();
        let body = if text.is_empty() {
            Paragraph::new(Span::styled(
                "Start typing - each key is applied slowly...",
                Style::default().fg(self.colors.dim),
            ))
        } else {
            // Show a caret after the committed text
            Paragraph::new(format!("{}▏", text)).style(Style::default().fg(self.colors.fg))
        };

        body.block(block).wrap(Wrap { trim: false }).render(area, buf);
    }
}

/// Pending keys in submission order
pub struct QueuePanel<'a> {
    pending: &'a [KeyEvent],
    processing: Option<KeyEvent>,
    colors: ThemeColors,
}

impl<'a> QueuePanel<'a> {
    pub fn new(pending: &'a [KeyEvent], processing: Option<KeyEvent>, colors: ThemeColors) -> Self {
        Self {
            pending,
            processing,
            colors,
        }
    }
}

impl<'a> Widget for QueuePanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = Line::from(Span::styled(
            format!(" Queue ({}) ", self.pending.len()),
            Style::default().fg(self.colors.accent).add_modifier(Modifier::BOLD),
        ));
        let block = panel(title, &self.colors);
        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans = Vec::with_capacity(self.pending.len());
        for (i, key) in self.pending.iter().enumerate() {
            // Head of the queue is the key in flight
            let style = if i == 0 && self.processing.is_some() {
                Style::default().fg(self.colors.key_text_on).bg(self.colors.key_processing)
            } else {
                Style::default().fg(self.colors.key_text_on).bg(self.colors.key_queued)
            };
            spans.push(Span::styled(format!(" {} ", key.label()), style));
            spans.push(Span::raw(" "));
        }

        Paragraph::new(Line::from(spans))
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

/// Status bar widget
pub struct StatusBar<'a> {
    status: KeyboardStatus,
    delay_ms: u64,
    queued: usize,
    chars: usize,
    message: Option<&'a str>,
    colors: ThemeColors,
}

impl<'a> StatusBar<'a> {
    pub fn new(keyboard: &SlowKeyboard, colors: ThemeColors) -> Self {
        Self {
            status: keyboard.status(),
            delay_ms: keyboard.delay_ms(),
            queued: keyboard.pending_len(),
            chars: keyboard.committed_text().chars().count(),
            message: None,
            colors,
        }
    }

    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }
}

impl<'a> Widget for StatusBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bg_style = Style::default().bg(self.colors.dim).fg(self.colors.bg);
        for x in area.x..area.x + area.width {
            buf.set_string(x, area.y, " ", bg_style);
        }

        // Left side: status
        let status_color = match self.status {
            KeyboardStatus::Ready => self.colors.ready,
            KeyboardStatus::Busy => self.colors.busy,
        };
        let left = format!(" {} ", self.status.label());
        buf.set_string(
            area.x,
            area.y,
            &left,
            Style::default()
                .bg(status_color)
                .fg(self.colors.key_text_on)
                .add_modifier(Modifier::BOLD),
        );

        if let Some(msg) = self.message {
            let msg_x = area.x + (area.width / 2).saturating_sub(msg.chars().count() as u16 / 2);
            buf.set_string(msg_x, area.y, msg, bg_style.add_modifier(Modifier::BOLD));
        }

        let right = format!(
            " Delay: {}ms | Queue: {} pending | Characters: {} ",
            self.delay_ms, self.queued, self.chars
        );
        let right_x = area.x + area.width.saturating_sub(right.chars().count() as u16);
        buf.set_string(right_x, area.y, &right, bg_style);
    }
}

/// Widget for the help screen
pub struct HelpPanel {
    colors: ThemeColors,
}

impl HelpPanel {
    pub fn new(colors: ThemeColors) -> Self {
        Self { colors }
    }
}

impl Widget for HelpPanel {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = panel(Line::from(" Help - Slow Keyboard "), &self.colors);
        let inner = block.inner(area);
        block.render(area, buf);

        let help_text = [
            "",
            " TYPING",
            " -----------",
            " Any printable key  : Queue that character",
            " Enter / Backspace  : Queue a newline / a deletion",
            " Ctrl+T             : Type the canned phrase",
            "",
            " CONTROLS",
            " -----------",
            " Up / Down          : Increase / decrease delay by 50ms",
            " Ctrl+L             : Clear text and queue",
            " Ctrl+E             : Export session report to JSON",
            " F2                 : Toggle dark/light theme",
            " F1                 : Toggle this help",
            " Esc / Ctrl+C       : Quit",
            "",
            " Keys are applied one at a time after the delay.",
        ];

        for (i, line) in help_text.iter().enumerate() {
            if i as u16 >= inner.height {
                break;
            }
            let style = if line.contains("---") {
                Style::default().fg(self.colors.dim)
            } else if line.len() > 1 && line[1..].chars().all(|c| c.is_ascii_uppercase()) {
                Style::default().fg(self.colors.key_queued).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.colors.fg)
            };
            buf.set_string(inner.x, inner.y + i as u16, line, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn output_panel_shows_processing_badge() {
        let mut kb = SlowKeyboard::new(100).unwrap();
        kb.submit_at(KeyEvent::Char('Z'), Instant::now()).unwrap();

        let area = Rect::new(0, 0, 40, 5);
        let mut buf = Buffer::empty(area);
        OutputPanel::new(&kb, ThemeColors::dark()).render(area, &mut buf);

        assert!(buffer_text(&buf).contains("Processing: Z"));
    }

    #[test]
    fn status_bar_shows_counts() {
        let t0 = Instant::now();
        let mut kb = SlowKeyboard::new(300).unwrap();
        kb.submit_text_at("ab", t0).unwrap();

        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        StatusBar::new(&kb, ThemeColors::dark()).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("BUSY"));
        assert!(text.contains("Delay: 300ms"));
        assert!(text.contains("Queue: 2 pending"));
    }

    #[test]
    fn queue_panel_lists_keys() {
        let pending = [KeyEvent::Char('a'), KeyEvent::Space];
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        QueuePanel::new(&pending, Some(KeyEvent::Char('a')), ThemeColors::dark()).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Queue (2)"));
        assert!(text.contains(" a "));
    }
}
