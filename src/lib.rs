//! Slow Keyboard - keyboard simulator with artificial per-keystroke latency
//!
//! Keys are queued as fast as they are submitted and committed to the text
//! one at a time, each after a configurable delay.

pub mod config;
pub mod keyboard;
pub mod report;
pub mod ui;

pub use config::Config;
pub use keyboard::{KeyEvent, KeyboardError, SlowKeyboard};
