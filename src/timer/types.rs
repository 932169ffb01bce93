/*!
 * Timer Types
 * Clock selectors, notification modes and status snapshots
 */

use crate::core::limits::NSEC_PER_SEC;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

#[cfg(unix)]
use nix::libc;

/// Thread that receives relayed expiry signals
#[cfg(unix)]
pub type RelayTarget = nix::sys::pthread::Pthread;

#[cfg(not(unix))]
pub type RelayTarget = usize;

/// Signal reported for timers created without a notification request
#[cfg(unix)]
pub const DEFAULT_ALARM_SIGNAL: i32 = libc::SIGALRM;

#[cfg(not(unix))]
pub const DEFAULT_ALARM_SIGNAL: i32 = 14;

/// Clock a timer measures against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClockId(i32);

impl ClockId {
    /// Settable system-wide wall clock
    #[cfg(unix)]
    pub const REALTIME: ClockId = ClockId(libc::CLOCK_REALTIME as i32);
    /// Monotonic clock, not affected by wall clock jumps
    #[cfg(unix)]
    pub const MONOTONIC: ClockId = ClockId(libc::CLOCK_MONOTONIC as i32);
    /// CPU time consumed by the calling process
    #[cfg(unix)]
    pub const PROCESS_CPUTIME_ID: ClockId = ClockId(libc::CLOCK_PROCESS_CPUTIME_ID as i32);
    /// CPU time consumed by the calling thread
    #[cfg(unix)]
    pub const THREAD_CPUTIME_ID: ClockId = ClockId(libc::CLOCK_THREAD_CPUTIME_ID as i32);

    #[cfg(not(unix))]
    pub const REALTIME: ClockId = ClockId(0);
    #[cfg(not(unix))]
    pub const MONOTONIC: ClockId = ClockId(1);
    #[cfg(not(unix))]
    pub const PROCESS_CPUTIME_ID: ClockId = ClockId(2);
    #[cfg(not(unix))]
    pub const THREAD_CPUTIME_ID: ClockId = ClockId(3);

    /// Monotonic clock that keeps counting across suspend
    #[cfg(any(target_os = "linux", target_os = "android"))]
    pub const BOOTTIME: ClockId = ClockId(libc::CLOCK_BOOTTIME);
    /// Wall clock able to wake the system (needs CAP_WAKE_ALARM)
    #[cfg(any(target_os = "linux", target_os = "android"))]
    pub const REALTIME_ALARM: ClockId = ClockId(libc::CLOCK_REALTIME_ALARM);
    /// Boot clock able to wake the system (needs CAP_WAKE_ALARM)
    #[cfg(any(target_os = "linux", target_os = "android"))]
    pub const BOOTTIME_ALARM: ClockId = ClockId(libc::CLOCK_BOOTTIME_ALARM);

    #[inline]
    pub const fn from_raw(raw: i32) -> Self {
        ClockId(raw)
    }

    #[inline]
    pub const fn as_raw(self) -> i32 {
        self.0
    }

    /// Every clock selector the platform exports, with its conventional name
    pub fn all() -> &'static [(&'static str, ClockId)] {
        EXPORTED_CLOCKS
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
const EXPORTED_CLOCKS: &[(&str, ClockId)] = &[
    ("CLOCK_REALTIME", ClockId::REALTIME),
    ("CLOCK_MONOTONIC", ClockId::MONOTONIC),
    ("CLOCK_PROCESS_CPUTIME_ID", ClockId::PROCESS_CPUTIME_ID),
    ("CLOCK_THREAD_CPUTIME_ID", ClockId::THREAD_CPUTIME_ID),
    ("CLOCK_BOOTTIME", ClockId::BOOTTIME),
    ("CLOCK_REALTIME_ALARM", ClockId::REALTIME_ALARM),
    ("CLOCK_BOOTTIME_ALARM", ClockId::BOOTTIME_ALARM),
];

#[cfg(not(any(target_os = "linux", target_os = "android")))]
const EXPORTED_CLOCKS: &[(&str, ClockId)] = &[
    ("CLOCK_REALTIME", ClockId::REALTIME),
    ("CLOCK_MONOTONIC", ClockId::MONOTONIC),
    ("CLOCK_PROCESS_CPUTIME_ID", ClockId::PROCESS_CPUTIME_ID),
    ("CLOCK_THREAD_CPUTIME_ID", ClockId::THREAD_CPUTIME_ID),
];

impl Default for ClockId {
    fn default() -> Self {
        ClockId::REALTIME
    }
}

impl fmt::Display for ClockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match ClockId::all().iter().find(|(_, id)| id == self) {
            Some((name, _)) => f.write_str(name),
            None => write!(f, "clock({})", self.0),
        }
    }
}

/// How a timer reports expiry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationMode {
    /// Fires silently; poll with `status`/`is_running`
    None,
    /// Kernel delivers the signal to the process
    Signal(i32),
    /// Helper thread sends `signal` to `target`
    ThreadRelay { target: RelayTarget, signal: i32 },
}

impl NotificationMode {
    /// Signal delivered on expiry, if any
    pub fn signal(&self) -> Option<i32> {
        match *self {
            NotificationMode::None => None,
            NotificationMode::Signal(signo) => Some(signo),
            NotificationMode::ThreadRelay { signal, .. } => Some(signal),
        }
    }
}

/// Kernel view of a timer: time to next expiry and reload interval
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub value_sec: i64,
    pub value_nsec: i64,
    pub interval_sec: i64,
    pub interval_nsec: i64,
}

impl TimerSnapshot {
    /// Armed iff the time to next expiry is nonzero
    #[inline]
    pub fn is_running(&self) -> bool {
        self.value_sec != 0 || self.value_nsec != 0
    }

    pub fn remaining(&self) -> Duration {
        to_duration(self.value_sec, self.value_nsec)
    }

    pub fn interval(&self) -> Duration {
        to_duration(self.interval_sec, self.interval_nsec)
    }
}

fn to_duration(sec: i64, nsec: i64) -> Duration {
    Duration::new(sec.max(0) as u64, nsec.clamp(0, NSEC_PER_SEC - 1) as u32)
}
