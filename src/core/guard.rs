/*!
 * Kernel Resource Guards
 *
 * A guard owns one kernel object and releases it exactly once: through
 * [`Guard::release`], or from `Drop` via [`GuardDrop::on_drop`].
 *
 * ```rust,no_run
 * use posix_timer::core::guard::Guard;
 * use posix_timer::timer::{PosixTimer, TimerConfig};
 *
 * let mut timer = PosixTimer::new(TimerConfig::silent())?;
 * assert!(timer.is_active());
 * timer.release().ok();
 * assert!(!timer.is_active());
 * # Ok::<(), posix_timer::TimerError>(())
 * ```
 */

use std::time::Instant;

pub type GuardResult<T> = Result<T, GuardError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GuardError {
    #[error("Resource already released")]
    AlreadyReleased,
}

/// Creation record kept alongside the kernel object
#[derive(Debug, Clone)]
pub struct GuardMetadata {
    pub resource_type: &'static str,
    pub created_at: Instant,
}

impl GuardMetadata {
    #[inline]
    pub fn new(resource_type: &'static str) -> Self {
        Self {
            resource_type,
            created_at: Instant::now(),
        }
    }

    /// Time since the kernel object was created, for lifecycle logs
    #[inline]
    pub fn lifetime_micros(&self) -> u64 {
        self.created_at.elapsed().as_micros() as u64
    }
}

/// Owner of a kernel object that can be released ahead of drop
pub trait Guard: Send {
    fn resource_type(&self) -> &'static str;

    fn metadata(&self) -> &GuardMetadata;

    /// False once the kernel object is gone
    fn is_active(&self) -> bool;

    /// Release now; `Err(AlreadyReleased)` on a second call
    fn release(&mut self) -> GuardResult<()>;
}

/// Cleanup run from `Drop`. Must not panic; failures are logged.
pub trait GuardDrop: Guard {
    fn on_drop(&mut self);
}
