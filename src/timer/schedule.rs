/*!
 * Timer Schedule Builder
 */

use super::PosixTimer;
use crate::core::errors::TimerResult;

/// Pending arm request for a [`PosixTimer`]
///
/// ```rust,no_run
/// use posix_timer::timer::{PosixTimer, TimerConfig};
///
/// let mut timer = PosixTimer::new(TimerConfig::silent())?;
/// timer.schedule().initial(100).interval(50).arm()?;
/// # Ok::<(), posix_timer::TimerError>(())
/// ```
#[must_use = "a schedule does nothing until `arm` is called"]
pub struct Schedule<'a> {
    timer: &'a mut PosixTimer,
    initial_ms: i64,
    interval_ms: Option<i64>,
}

impl<'a> Schedule<'a> {
    pub(crate) fn new(timer: &'a mut PosixTimer) -> Self {
        Self {
            timer,
            initial_ms: 0,
            interval_ms: None,
        }
    }

    /// Delay before the first expiry
    pub fn initial(mut self, ms: i64) -> Self {
        self.initial_ms = ms;
        self
    }

    /// Period after the first expiry
    pub fn interval(mut self, ms: i64) -> Self {
        self.interval_ms = Some(ms);
        self
    }

    pub fn arm(self) -> TimerResult<()> {
        self.timer.arm(self.initial_ms, self.interval_ms)
    }
}
