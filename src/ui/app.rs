//! Main application state and key handling

use super::ThemeColors;
use crate::config::Config;
use crate::keyboard::{KeyEvent, SlowKeyboard};
use crate::report::SessionReport;
use crossterm::event::{KeyCode, KeyEvent as TermKeyEvent, KeyEventKind, KeyModifiers};
use std::path::Path;
use std::time::{Duration, Instant};

/// How long a status message stays visible
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppView {
    Typing,
    Help,
}

/// Application running state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Running,
    Quitting,
}

/// Main application
pub struct App {
    /// Current view
    pub view: AppView,
    /// Application state
    pub state: AppState,
    /// Configuration (delay and theme changes are written back here)
    pub config: Config,
    /// The simulated keyboard
    pub keyboard: SlowKeyboard,
    /// Application start time
    pub start_time: Instant,
    /// Set when the config differs from what was loaded
    pub config_dirty: bool,
    /// Last status message
    pub status_message: Option<String>,
    /// Status message timestamp
    pub status_time: Option<Instant>,
}

impl App {
    /// Build the app; an out-of-range delay in `config` falls back to the default
    pub fn new(mut config: Config) -> Self {
        let keyboard = match SlowKeyboard::new(config.typing.delay_ms) {
            Ok(keyboard) => keyboard,
            Err(e) => {
                log::warn!("{}; using default delay", e);
                let keyboard = SlowKeyboard::default();
                config.typing.delay_ms = keyboard.delay_ms();
                keyboard
            }
        };

        Self {
            view: AppView::Typing,
            state: AppState::Running,
            config,
            keyboard,
            start_time: Instant::now(),
            config_dirty: false,
            status_message: None,
            status_time: None,
        }
    }

    /// Advance the keyboard to the current time
    pub fn tick(&mut self) {
        self.keyboard.tick();
    }

    /// How long the event loop may block before the next commit is due
    pub fn poll_timeout(&self, max: Duration) -> Duration {
        match self.keyboard.next_deadline() {
            Some(deadline) => deadline.saturating_duration_since(Instant::now()).min(max),
            None => max,
        }
    }

    /// Handle a terminal key press
    pub fn handle_key(&mut self, key: TermKeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.quit(),
            KeyCode::Char('c') if ctrl => self.quit(),
            KeyCode::Char('l') if ctrl => self.clear(),
            KeyCode::Char('t') if ctrl => self.type_canned_phrase(),
            KeyCode::Char('e') if ctrl => {
                let filename = format!(
                    "slow_keyboard_report_{}.json",
                    chrono::Utc::now().format("%Y%m%d_%H%M%S")
                );
                if let Err(e) = self.export_report(&filename) {
                    self.set_status(format!("Export failed: {}", e));
                }
            }
            KeyCode::F(1) => self.toggle_help(),
            KeyCode::F(2) => self.toggle_theme(),
            KeyCode::Up => self.step_delay(1),
            KeyCode::Down => self.step_delay(-1),
            KeyCode::Enter => self.submit(KeyEvent::Enter),
            KeyCode::Backspace => self.submit(KeyEvent::Backspace),
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                match KeyEvent::from_char(c) {
                    Ok(event) => self.submit(event),
                    Err(e) => self.set_status(e.to_string()),
                }
            }
            _ => {}
        }
    }

    fn submit(&mut self, event: KeyEvent) {
        if let Err(e) = self.keyboard.submit(event) {
            self.set_status(e.to_string());
        }
    }

    /// Type the configured phrase, only while the keyboard is ready
    pub fn type_canned_phrase(&mut self) {
        if self.keyboard.is_busy() {
            self.set_status("Busy - wait for the queue to drain".to_string());
            return;
        }
        let phrase = self.config.typing.canned_phrase.clone();
        match self.keyboard.submit_text(&phrase) {
            Ok(()) => self.set_status(format!("Typing \"{}\"", phrase)),
            Err(e) => self.set_status(e.to_string()),
        }
    }

    pub fn clear(&mut self) {
        self.keyboard.clear();
        self.set_status("Cleared".to_string());
    }

    pub fn step_delay(&mut self, steps: i64) {
        let delay_ms = self.keyboard.step_delay(steps);
        if delay_ms != self.config.typing.delay_ms {
            self.config.typing.delay_ms = delay_ms;
            self.config_dirty = true;
        }
        self.set_status(format!("Delay: {}ms", delay_ms));
    }

    pub fn toggle_help(&mut self) {
        self.view = match self.view {
            AppView::Typing => AppView::Help,
            AppView::Help => AppView::Typing,
        };
    }

    pub fn toggle_theme(&mut self) {
        self.config.ui.theme = self.config.ui.theme.toggled();
        self.config_dirty = true;
    }

    pub fn colors(&self) -> ThemeColors {
        ThemeColors::from_theme(self.config.ui.theme)
    }

    /// Request quit
    pub fn quit(&mut self) {
        self.state = AppState::Quitting;
    }

    /// Set a status message
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_time = Some(Instant::now());
    }

    /// Get status message if still valid
    pub fn get_status(&self) -> Option<&str> {
        match (&self.status_message, self.status_time) {
            (Some(msg), Some(time)) if time.elapsed() < STATUS_TIMEOUT => Some(msg),
            _ => None,
        }
    }

    /// Get elapsed time formatted
    pub fn elapsed_formatted(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    /// Generate a session report
    pub fn generate_report(&self) -> SessionReport {
        SessionReport::new(self.start_time, &self.keyboard)
    }

    /// Export session report to JSON file
    pub fn export_report(&mut self, filename: &str) -> Result<String, std::io::Error> {
        let report = self.generate_report();
        report.export_json(Path::new(filename))?;
        let msg = format!("Exported to {}", filename);
        self.set_status(msg.clone());
        Ok(msg)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
