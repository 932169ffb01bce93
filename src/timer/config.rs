/*!
 * Timer Configuration
 *
 * Construction options and their resolution into a notification mode
 */

use super::types::{ClockId, NotificationMode, RelayTarget, DEFAULT_ALARM_SIGNAL};
use crate::core::errors::{TimerError, TimerResult};
use crate::signals::{self, SignalId};

/// Notification requested by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Notify {
    /// Nothing requested: silent timer, reported signal is SIGALRM
    #[default]
    Unspecified,
    /// Explicit "no notification" marker, also silences a relay target
    Disabled,
    /// Deliver this signal on expiry
    Signal(SignalId),
}

/// Options accepted by [`PosixTimer::new`](super::PosixTimer::new)
///
/// # Example
///
/// ```rust
/// use posix_timer::timer::{ClockId, TimerConfig};
///
/// let config = TimerConfig::new()
///     .with_signal("SIGUSR1")
///     .with_clock(ClockId::MONOTONIC);
/// assert_eq!(config.clock, ClockId::MONOTONIC);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimerConfig {
    pub notify: Notify,
    pub clock: ClockId,
    /// Switches the timer to thread-relay mode
    pub relay_target: Option<RelayTarget>,
}

/// Validated notification settings, computed before any kernel call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NotifyPlan {
    pub mode: NotificationMode,
    /// What `signal_number()` reports
    pub reported_signal: Option<i32>,
}

impl TimerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timer with notification explicitly disabled
    pub fn silent() -> Self {
        Self::new().with_notify(Notify::Disabled)
    }

    pub fn with_notify(mut self, notify: Notify) -> Self {
        self.notify = notify;
        self
    }

    pub fn with_signal(self, signal: impl Into<SignalId>) -> Self {
        self.with_notify(Notify::Signal(signal.into()))
    }

    pub fn with_clock(mut self, clock: ClockId) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_relay_target(mut self, target: RelayTarget) -> Self {
        self.relay_target = Some(target);
        self
    }

    /// Resolve the request into the mode the kernel timer will use
    pub(crate) fn plan(&self) -> TimerResult<NotifyPlan> {
        let explicit = match &self.notify {
            Notify::Signal(id) => Some(deliverable(id)?),
            Notify::Unspecified | Notify::Disabled => None,
        };

        // An explicit Disabled overrides the relay target
        let relay_target = self.relay_target.filter(|_| self.notify != Notify::Disabled);
        if let Some(target) = relay_target {
            let signal = explicit.unwrap_or(DEFAULT_ALARM_SIGNAL);
            return Ok(NotifyPlan {
                mode: NotificationMode::ThreadRelay { target, signal },
                reported_signal: Some(signal),
            });
        }

        Ok(match (&self.notify, explicit) {
            (_, Some(signo)) => NotifyPlan {
                mode: NotificationMode::Signal(signo),
                reported_signal: Some(signo),
            },
            (Notify::Disabled, None) => NotifyPlan {
                mode: NotificationMode::None,
                reported_signal: None,
            },
            (_, None) => NotifyPlan {
                mode: NotificationMode::None,
                reported_signal: Some(DEFAULT_ALARM_SIGNAL),
            },
        })
    }
}

/// Resolve and reject the EXIT pseudo-signal / signal 0
fn deliverable(id: &SignalId) -> TimerResult<i32> {
    match signals::resolve(id)? {
        signo if signo > 0 => Ok(signo),
        _ => Err(TimerError::invalid_signal(format!(
            "invalid value for signal ({})",
            id
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unspecified_reports_alarm() {
        let plan = TimerConfig::new().plan().unwrap();
        assert_eq!(plan.mode, NotificationMode::None);
        assert_eq!(plan.reported_signal, Some(DEFAULT_ALARM_SIGNAL));
    }

    #[test]
    fn test_disabled_reports_nothing() {
        let plan = TimerConfig::silent().plan().unwrap();
        assert_eq!(plan.mode, NotificationMode::None);
        assert_eq!(plan.reported_signal, None);
    }

    #[test]
    fn test_exit_and_zero_rejected() {
        let err = TimerConfig::new().with_signal("EXIT").plan().unwrap_err();
        assert!(err.is_argument());
        let err = TimerConfig::new().with_signal(SignalId::Number(0)).plan().unwrap_err();
        assert!(err.is_argument());
    }

    #[cfg(unix)]
    #[test]
    fn test_named_signal() {
        let plan = TimerConfig::new().with_signal("SIGUSR2").plan().unwrap();
        assert_eq!(plan.mode, NotificationMode::Signal(nix::libc::SIGUSR2));
        assert_eq!(plan.reported_signal, Some(nix::libc::SIGUSR2));
    }

    #[cfg(unix)]
    #[test]
    fn test_relay_defaults_to_alarm() {
        let target = nix::sys::pthread::pthread_self();
        let plan = TimerConfig::new().with_relay_target(target).plan().unwrap();
        assert_eq!(
            plan.mode,
            NotificationMode::ThreadRelay {
                target,
                signal: DEFAULT_ALARM_SIGNAL
            }
        );
        assert_eq!(plan.reported_signal, Some(DEFAULT_ALARM_SIGNAL));
    }

    #[cfg(unix)]
    #[test]
    fn test_disabled_relay_stays_silent() {
        let target = nix::sys::pthread::pthread_self();
        let plan = TimerConfig::silent().with_relay_target(target).plan().unwrap();
        assert_eq!(plan.mode, NotificationMode::None);
        assert_eq!(plan.reported_signal, None);
    }

    #[cfg(unix)]
    #[test]
    fn test_relay_with_explicit_signal() {
        let target = nix::sys::pthread::pthread_self();
        let plan = TimerConfig::new()
            .with_signal("USR1")
            .with_relay_target(target)
            .plan()
            .unwrap();
        assert_eq!(plan.reported_signal, Some(nix::libc::SIGUSR1));
    }
}
