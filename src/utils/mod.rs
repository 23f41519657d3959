//! Shared helpers

mod logger;
mod timer;

pub use logger::{init_logger, resolve_level, LogLevel};
pub use timer::Timer;
