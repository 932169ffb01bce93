/*!
 * Unsupported Platform Stub
 *
 * Same surface as the POSIX handle; every kernel operation reports
 * [`TimerError::Unsupported`].
 */

use super::config::TimerConfig;
use super::schedule::Schedule;
use super::types::{ClockId, NotificationMode, TimerSnapshot};
use crate::core::errors::{TimerError, TimerResult};
use crate::core::guard::{Guard, GuardDrop, GuardError, GuardMetadata, GuardResult};
use std::time::Duration;
use tracing::warn;

/// POSIX interval timer (unavailable on this platform)
#[derive(Debug)]
pub struct PosixTimer {
    clock: ClockId,
    mode: NotificationMode,
    metadata: GuardMetadata,
}

impl PosixTimer {
    pub fn new(config: TimerConfig) -> TimerResult<Self> {
        warn!(clock = %config.clock, "POSIX timers are not available on this platform");
        Err(TimerError::Unsupported)
    }

    pub fn with_defaults() -> TimerResult<Self> {
        Self::new(TimerConfig::default())
    }

    pub fn reconfigure(&mut self, _config: TimerConfig) -> TimerResult<()> {
        Err(TimerError::Unsupported)
    }

    pub fn arm(&mut self, _start_ms: i64, _interval_ms: Option<i64>) -> TimerResult<()> {
        Err(TimerError::Unsupported)
    }

    pub fn arm_duration(&mut self, _start: Duration, _interval: Option<Duration>) -> TimerResult<()> {
        Err(TimerError::Unsupported)
    }

    pub fn schedule(&mut self) -> Schedule<'_> {
        Schedule::new(self)
    }

    pub fn disarm(&mut self) -> TimerResult<()> {
        Err(TimerError::Unsupported)
    }

    pub fn status(&self) -> TimerResult<TimerSnapshot> {
        Err(TimerError::Unsupported)
    }

    pub fn is_running(&self) -> TimerResult<bool> {
        Err(TimerError::Unsupported)
    }

    pub fn overrun(&self) -> TimerResult<u32> {
        Err(TimerError::Unsupported)
    }

    pub fn signal_number(&self) -> Option<i32> {
        self.mode.signal()
    }

    pub fn clock_id(&self) -> ClockId {
        self.clock
    }

    pub fn mode(&self) -> &NotificationMode {
        &self.mode
    }

    pub fn destroy(&mut self) {}
}

impl Guard for PosixTimer {
    fn resource_type(&self) -> &'static str {
        "posix_timer"
    }

    fn metadata(&self) -> &GuardMetadata {
        &self.metadata
    }

    fn is_active(&self) -> bool {
        false
    }

    fn release(&mut self) -> GuardResult<()> {
        Err(GuardError::AlreadyReleased)
    }
}

impl GuardDrop for PosixTimer {
    fn on_drop(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_everything_unsupported() {
        let err = PosixTimer::new(TimerConfig::silent()).unwrap_err();
        assert_eq!(err, TimerError::Unsupported);
        assert_eq!(
            crate::signals::real_time_signal_index(0).unwrap_err(),
            TimerError::Unsupported
        );
    }
}
