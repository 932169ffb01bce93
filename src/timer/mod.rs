/*!
 * Timer Module
 * POSIX interval timers with none / signal / thread-relay notification
 */

mod config;
mod duration;
mod schedule;
pub mod types;

#[cfg(any(target_os = "linux", target_os = "android"))]
mod posix;
#[cfg(any(target_os = "linux", target_os = "android"))]
mod relay;
#[cfg(any(target_os = "linux", target_os = "android"))]
mod sigevent;

#[cfg(not(any(target_os = "linux", target_os = "android")))]
mod unsupported;

// Re-export public API
pub use config::{Notify, TimerConfig};
pub use duration::{ItimerSpec, TimeSpec};
pub use schedule::Schedule;
pub use types::{ClockId, NotificationMode, RelayTarget, TimerSnapshot, DEFAULT_ALARM_SIGNAL};

#[cfg(any(target_os = "linux", target_os = "android"))]
pub use posix::PosixTimer;

#[cfg(not(any(target_os = "linux", target_os = "android")))]
pub use unsupported::PosixTimer;

/// True when this build has a working interval-timer backend
pub const fn is_supported() -> bool {
    cfg!(any(target_os = "linux", target_os = "android"))
}
