/*!
 * Timer Durations
 * Millisecond schedules decomposed into seconds + nanoseconds
 */

use crate::core::errors::{TimerError, TimerResult};
use crate::core::limits::{MSEC_PER_SEC, NSEC_PER_MSEC};
use std::time::Duration;

/// Seconds + nanoseconds pair, mirrors `struct timespec`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeSpec {
    pub sec: i64,
    pub nsec: i64,
}

impl TimeSpec {
    pub const ZERO: TimeSpec = TimeSpec { sec: 0, nsec: 0 };

    /// Whole seconds by truncating division, remainder scaled to nanoseconds
    ///
    /// Callers reject negative input first.
    #[inline]
    pub const fn from_millis(ms: i64) -> Self {
        TimeSpec {
            sec: ms / MSEC_PER_SEC,
            nsec: (ms % MSEC_PER_SEC) * NSEC_PER_MSEC,
        }
    }

    pub fn from_duration(field: &'static str, d: Duration) -> TimerResult<Self> {
        let sec = i64::try_from(d.as_secs()).map_err(|_| TimerError::InvalidDuration {
            field,
            value: i64::try_from(d.as_millis()).unwrap_or(i64::MAX),
        })?;
        Ok(TimeSpec {
            sec,
            nsec: i64::from(d.subsec_nanos()),
        })
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.sec == 0 && self.nsec == 0
    }
}

/// Start delay + reload interval, mirrors `struct itimerspec`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItimerSpec {
    pub value: TimeSpec,
    pub interval: TimeSpec,
}

impl ItimerSpec {
    /// All-zero schedule; committing it disarms the timer
    pub const DISARMED: ItimerSpec = ItimerSpec {
        value: TimeSpec::ZERO,
        interval: TimeSpec::ZERO,
    };

    /// Validate and convert a millisecond schedule
    ///
    /// `interval_ms = None` means one-shot.
    pub fn from_millis(start_ms: i64, interval_ms: Option<i64>) -> TimerResult<Self> {
        let start_ms = non_negative("start", start_ms)?;
        let interval_ms = interval_ms
            .map(|ms| non_negative("interval", ms))
            .transpose()?
            .unwrap_or(0);

        Ok(ItimerSpec {
            value: TimeSpec::from_millis(start_ms),
            interval: TimeSpec::from_millis(interval_ms),
        })
    }

    pub fn from_durations(start: Duration, interval: Option<Duration>) -> TimerResult<Self> {
        Ok(ItimerSpec {
            value: TimeSpec::from_duration("start", start)?,
            interval: interval
                .map(|d| TimeSpec::from_duration("interval", d))
                .transpose()?
                .unwrap_or(TimeSpec::ZERO),
        })
    }
}

fn non_negative(field: &'static str, ms: i64) -> TimerResult<i64> {
    if ms < 0 {
        return Err(TimerError::InvalidDuration { field, value: ms });
    }
    Ok(ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_from_millis_decomposition() {
        assert_eq!(TimeSpec::from_millis(0), TimeSpec::ZERO);
        assert_eq!(TimeSpec::from_millis(999), TimeSpec { sec: 0, nsec: 999_000_000 });
        assert_eq!(TimeSpec::from_millis(1000), TimeSpec { sec: 1, nsec: 0 });
        assert_eq!(TimeSpec::from_millis(2500), TimeSpec { sec: 2, nsec: 500_000_000 });
    }

    #[test]
    fn test_one_shot_has_zero_interval() {
        let spec = ItimerSpec::from_millis(500, None).unwrap();
        assert_eq!(spec.value, TimeSpec { sec: 0, nsec: 500_000_000 });
        assert!(spec.interval.is_zero());
    }

    #[test]
    fn test_negative_rejected() {
        match ItimerSpec::from_millis(-1, None) {
            Err(TimerError::InvalidDuration { field, value }) => {
                assert_eq!(field, "start");
                assert_eq!(value, -1);
            }
            other => panic!("unexpected: {other:?}"),
        }
        match ItimerSpec::from_millis(10, Some(-20)) {
            Err(TimerError::InvalidDuration { field, .. }) => assert_eq!(field, "interval"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_from_durations_keeps_nanos() {
        let spec = ItimerSpec::from_durations(
            Duration::from_nanos(1_000_000_123),
            Some(Duration::from_micros(1500)),
        )
        .unwrap();
        assert_eq!(spec.value, TimeSpec { sec: 1, nsec: 123 });
        assert_eq!(spec.interval, TimeSpec { sec: 0, nsec: 1_500_000 });
    }

    proptest! {
        #[test]
        fn prop_millis_roundtrip(ms in 0i64..=i64::MAX / 2) {
            let ts = TimeSpec::from_millis(ms);
            prop_assert!(ts.nsec >= 0 && ts.nsec < 1_000_000_000);
            prop_assert_eq!(ts.nsec % NSEC_PER_MSEC, 0);
            prop_assert_eq!(ts.sec * MSEC_PER_SEC + ts.nsec / NSEC_PER_MSEC, ms);
        }
    }
}
