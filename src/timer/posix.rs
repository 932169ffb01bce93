/*!
 * POSIX Timer Handle
 *
 * Owns one kernel interval timer (`timer_create`) and, in relay mode, the
 * record the kernel passes to the relay callback.
 */

use super::config::TimerConfig;
use super::duration::{ItimerSpec, TimeSpec};
use super::relay::{RelayBox, RelayRecord};
use super::schedule::Schedule;
use super::sigevent::{self, Delivery};
use super::types::{ClockId, NotificationMode, TimerSnapshot};
use crate::core::errors::{TimerError, TimerResult};
use crate::core::guard::{Guard, GuardDrop, GuardError, GuardMetadata, GuardResult};
use nix::errno::Errno;
use nix::libc;
use std::mem::{self, MaybeUninit};
use std::ptr;
use std::time::Duration;
use tracing::{debug, error, trace};

/// Kernel timer plus the relay record it references
///
/// Field order matters: `Drop` deletes the timer, then `relay` is freed.
struct RawTimer {
    id: libc::timer_t,
    relay: Option<RelayBox>,
}

// SAFETY: `timer_t` is an opaque kernel id usable from any thread
unsafe impl Send for RawTimer {}
unsafe impl Sync for RawTimer {}

impl RawTimer {
    fn create(clock: ClockId, mode: &NotificationMode) -> TimerResult<Self> {
        let relay = match *mode {
            NotificationMode::ThreadRelay { target, signal } => {
                Some(RelayBox::new(RelayRecord { target, signal }))
            }
            _ => None,
        };

        let delivery = match (mode, relay.as_ref()) {
            (_, Some(relay)) => Delivery::Relay(relay),
            (NotificationMode::Signal(signo), None) => Delivery::Signal(*signo),
            _ => Delivery::Silent,
        };
        let mut sev = sigevent::build(&delivery);

        let mut id = MaybeUninit::<libc::timer_t>::uninit();
        // SAFETY: sev and id are valid for the duration of the call
        let ret = unsafe {
            libc::timer_create(
                clock.as_raw() as libc::clockid_t,
                &mut sev,
                id.as_mut_ptr(),
            )
        };
        // On failure `relay` drops here; the kernel never saw a timer using it
        Errno::result(ret).map_err(|e| TimerError::os("timer_create", e))?;

        Ok(RawTimer {
            // SAFETY: timer_create succeeded and wrote the id
            id: unsafe { id.assume_init() },
            relay,
        })
    }

    fn settime(&self, spec: &ItimerSpec) -> TimerResult<()> {
        let its = to_itimerspec(spec)?;
        // SAFETY: id is live while self exists
        let ret = unsafe { libc::timer_settime(self.id, 0, &its, ptr::null_mut()) };
        Errno::result(ret)
            .map(drop)
            .map_err(|e| TimerError::os("timer_settime", e))
    }

    fn gettime(&self) -> TimerResult<TimerSnapshot> {
        let mut its = MaybeUninit::<libc::itimerspec>::uninit();
        // SAFETY: id is live; its is written on success
        let ret = unsafe { libc::timer_gettime(self.id, its.as_mut_ptr()) };
        Errno::result(ret).map_err(|e| TimerError::os("timer_gettime", e))?;
        // SAFETY: timer_gettime succeeded
        let its = unsafe { its.assume_init() };

        Ok(TimerSnapshot {
            value_sec: its.it_value.tv_sec as i64,
            value_nsec: its.it_value.tv_nsec as i64,
            interval_sec: its.it_interval.tv_sec as i64,
            interval_nsec: its.it_interval.tv_nsec as i64,
        })
    }

    fn overrun(&self) -> TimerResult<u32> {
        // SAFETY: id is live while self exists
        let ret = unsafe { libc::timer_getoverrun(self.id) };
        Errno::result(ret)
            .map(|count| count as u32)
            .map_err(|e| TimerError::os("timer_getoverrun", e))
    }
}

impl Drop for RawTimer {
    fn drop(&mut self) {
        // SAFETY: id came from timer_create and is deleted only here
        let ret = unsafe { libc::timer_delete(self.id) };
        if let Err(e) = Errno::result(ret) {
            error!(error = %e, "timer_delete failed, kernel timer leaked");
        }
    }
}

fn to_timespec(field: &'static str, ts: TimeSpec) -> TimerResult<libc::timespec> {
    // SAFETY: plain C data; zeroing also clears padding fields on 32-bit targets
    let mut out: libc::timespec = unsafe { mem::zeroed() };
    out.tv_sec = libc::time_t::try_from(ts.sec).map_err(|_| TimerError::InvalidDuration {
        field,
        value: ts.sec,
    })?;
    out.tv_nsec = ts.nsec as _;
    Ok(out)
}

fn to_itimerspec(spec: &ItimerSpec) -> TimerResult<libc::itimerspec> {
    Ok(libc::itimerspec {
        it_interval: to_timespec("interval", spec.interval)?,
        it_value: to_timespec("start", spec.value)?,
    })
}

/// POSIX interval timer
///
/// The kernel timer is deleted exactly once: by [`PosixTimer::destroy`], by
/// [`PosixTimer::reconfigure`] before re-creating, or on drop.
///
/// # Example
///
/// ```rust,no_run
/// use posix_timer::timer::{PosixTimer, TimerConfig};
///
/// let mut timer = PosixTimer::new(TimerConfig::silent())?;
/// timer.arm(500, None)?;
/// assert!(timer.is_running()?);
/// timer.disarm()?;
/// # Ok::<(), posix_timer::TimerError>(())
/// ```
pub struct PosixTimer {
    raw: Option<RawTimer>,
    clock: ClockId,
    mode: NotificationMode,
    reported_signal: Option<i32>,
    metadata: GuardMetadata,
}

impl PosixTimer {
    /// Create a kernel timer
    ///
    /// Signal validation happens before any kernel call. On failure nothing
    /// stays allocated.
    pub fn new(config: TimerConfig) -> TimerResult<Self> {
        let plan = config.plan()?;
        let raw = RawTimer::create(config.clock, &plan.mode)?;
        debug!(clock = %config.clock, mode = ?plan.mode, "Timer created");

        Ok(Self {
            raw: Some(raw),
            clock: config.clock,
            mode: plan.mode,
            reported_signal: plan.reported_signal,
            metadata: GuardMetadata::new("posix_timer"),
        })
    }

    /// Timer with every option at its default
    pub fn with_defaults() -> TimerResult<Self> {
        Self::new(TimerConfig::default())
    }

    /// Replace the kernel timer with one built from `config`
    ///
    /// Invalid options leave the current timer untouched. Otherwise the
    /// current timer is deleted first; if creating the new one fails the
    /// handle stays released.
    pub fn reconfigure(&mut self, config: TimerConfig) -> TimerResult<()> {
        let plan = config.plan()?;
        self.destroy();

        let raw = RawTimer::create(config.clock, &plan.mode)?;
        debug!(clock = %config.clock, mode = ?plan.mode, "Timer reconfigured");

        self.raw = Some(raw);
        self.clock = config.clock;
        self.mode = plan.mode;
        self.reported_signal = plan.reported_signal;
        self.metadata = GuardMetadata::new("posix_timer");
        Ok(())
    }

    fn raw(&self) -> TimerResult<&RawTimer> {
        self.raw.as_ref().ok_or(TimerError::Released)
    }

    /// Arm for `start_ms`, then every `interval_ms` (one-shot when `None`)
    ///
    /// Replaces any pending schedule. Negative values are rejected before
    /// the kernel is touched.
    pub fn arm(&mut self, start_ms: i64, interval_ms: Option<i64>) -> TimerResult<()> {
        let spec = ItimerSpec::from_millis(start_ms, interval_ms)?;
        self.commit(&spec)?;
        trace!(start_ms, interval_ms = interval_ms.unwrap_or(0), "Timer armed");
        Ok(())
    }

    /// [`arm`](Self::arm) with sub-millisecond precision
    pub fn arm_duration(&mut self, start: Duration, interval: Option<Duration>) -> TimerResult<()> {
        let spec = ItimerSpec::from_durations(start, interval)?;
        self.commit(&spec)?;
        trace!(?start, ?interval, "Timer armed");
        Ok(())
    }

    /// Builder-style arming
    pub fn schedule(&mut self) -> Schedule<'_> {
        Schedule::new(self)
    }

    /// Stop the timer; a disarmed timer reports not running
    pub fn disarm(&mut self) -> TimerResult<()> {
        self.commit(&ItimerSpec::DISARMED)?;
        trace!("Timer disarmed");
        Ok(())
    }

    fn commit(&self, spec: &ItimerSpec) -> TimerResult<()> {
        self.raw()?.settime(spec)
    }

    /// Time to next expiry and reload interval, read atomically by the kernel
    pub fn status(&self) -> TimerResult<TimerSnapshot> {
        self.raw()?.gettime()
    }

    pub fn is_running(&self) -> TimerResult<bool> {
        Ok(self.status()?.is_running())
    }

    /// Expirations missed since the last delivered notification
    pub fn overrun(&self) -> TimerResult<u32> {
        self.raw()?.overrun()
    }

    /// Signal tied to this timer, `None` when notification is disabled
    ///
    /// Timers created without a request report SIGALRM.
    pub fn signal_number(&self) -> Option<i32> {
        self.reported_signal
    }

    pub fn clock_id(&self) -> ClockId {
        self.clock
    }

    pub fn mode(&self) -> &NotificationMode {
        &self.mode
    }

    /// Delete the kernel timer; later calls are no-ops
    pub fn destroy(&mut self) {
        if let Some(raw) = self.raw.take() {
            drop(raw);
            debug!(
                clock = %self.clock,
                lifetime_micros = self.metadata.lifetime_micros(),
                "Timer destroyed"
            );
        }
    }
}

impl std::fmt::Debug for PosixTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PosixTimer")
            .field("active", &self.raw.is_some())
            .field("clock", &self.clock)
            .field("mode", &self.mode)
            .field("signal", &self.reported_signal)
            .finish()
    }
}

impl Guard for PosixTimer {
    fn resource_type(&self) -> &'static str {
        "posix_timer"
    }

    fn metadata(&self) -> &GuardMetadata {
        &self.metadata
    }

    fn is_active(&self) -> bool {
        self.raw.is_some()
    }

    fn release(&mut self) -> GuardResult<()> {
        if !self.is_active() {
            return Err(GuardError::AlreadyReleased);
        }
        self.destroy();
        Ok(())
    }
}

impl GuardDrop for PosixTimer {
    fn on_drop(&mut self) {
        self.destroy();
    }
}

impl Drop for PosixTimer {
    fn drop(&mut self) {
        self.on_drop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_silent_timer_is_idle() {
        let timer = PosixTimer::new(TimerConfig::silent()).unwrap();
        assert!(!timer.is_running().unwrap());
        assert_eq!(timer.status().unwrap(), TimerSnapshot::default());
        assert_eq!(timer.overrun().unwrap(), 0);
    }

    #[test]
    fn test_operations_after_destroy() {
        let mut timer = PosixTimer::new(TimerConfig::silent()).unwrap();
        timer.destroy();
        timer.destroy();
        assert_eq!(timer.status().unwrap_err(), TimerError::Released);
        assert_eq!(timer.arm(10, None).unwrap_err(), TimerError::Released);
        assert_eq!(timer.disarm().unwrap_err(), TimerError::Released);
        // Configuration stays readable
        assert_eq!(timer.clock_id(), ClockId::REALTIME);
    }

    #[test]
    fn test_bad_clock_is_os_error() {
        let err = PosixTimer::new(TimerConfig::silent().with_clock(ClockId::from_raw(4242)))
            .unwrap_err();
        match err {
            TimerError::Os { op, code, .. } => {
                assert_eq!(op, "timer_create");
                assert_eq!(code, libc::EINVAL);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_to_itimerspec() {
        let its = to_itimerspec(&ItimerSpec::from_millis(1500, Some(20)).unwrap()).unwrap();
        assert_eq!(its.it_value.tv_sec, 1);
        assert_eq!(its.it_value.tv_nsec, 500_000_000);
        assert_eq!(its.it_interval.tv_sec, 0);
        assert_eq!(its.it_interval.tv_nsec, 20_000_000);
    }
}
