//! Key queue, delayed processor and the slow keyboard built on them

mod error;
mod event;
mod processor;
mod queue;
mod simulator;
mod stats;
mod timer;

pub use error::{KeyboardError, Result};
pub use event::KeyEvent;
pub use processor::{
    validate_delay, Commit, DelayedProcessor, InFlight, ProcessorState, DEFAULT_DELAY_MS,
    DELAY_STEP_MS, MAX_DELAY_MS, MIN_DELAY_MS,
};
pub use queue::{KeyQueue, QueuedKey};
pub use simulator::{KeyboardSnapshot, KeyboardStatus, SlowKeyboard};
pub use stats::SessionStats;
pub use timer::CommitTimer;
