/*!
 * POSIX Timer Library
 * Kernel interval timers with signal and thread-relay notification
 */

pub mod core;
pub mod monitoring;
pub mod signals;
pub mod timer;

// Re-exports
pub use crate::core::errors::{ErrorKind, TimerError, TimerResult};
pub use monitoring::init_tracing;
pub use signals::{real_time_signal_index, resolve, SignalId};
pub use timer::{ClockId, Notify, NotificationMode, PosixTimer, TimerConfig, TimerSnapshot};
