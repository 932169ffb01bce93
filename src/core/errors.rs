/*!
 * Error Types
 * Centralized error handling with thiserror and miette
 */

use miette::Diagnostic;
use thiserror::Error;

/// Timer operation result
pub type TimerResult<T> = Result<T, TimerError>;

/// Coarse classification of a [`TimerError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Caller-supplied value out of domain
    Argument,
    /// Underlying system call failed
    Os,
    /// Platform lacks interval-timer support
    Unsupported,
    /// The handle no longer owns a kernel timer
    Released,
}

/// Timer and signal errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum TimerError {
    #[error("Invalid signal: {0}")]
    #[diagnostic(
        code(timer::invalid_signal),
        help("Use a signal number below SIGRTMAX, a name such as \"USR1\" or \"SIGUSR1\", or \"RT<n>\".")
    )]
    InvalidSignal(String),

    #[error("Invalid {field} duration: {value}ms")]
    #[diagnostic(
        code(timer::invalid_duration),
        help("Durations are millisecond counts and must be 0 or positive.")
    )]
    InvalidDuration { field: &'static str, value: i64 },

    #[error("{op} failed: {message} (errno {code})")]
    #[diagnostic(
        code(timer::os_error),
        help("The kernel rejected the request. Check the clock id and process limits.")
    )]
    Os {
        op: &'static str,
        code: i32,
        message: String,
    },

    #[error("Unsupported platform")]
    #[diagnostic(
        code(timer::unsupported),
        help("POSIX interval timers are only available on Linux and Android.")
    )]
    Unsupported,

    #[error("Timer already released")]
    #[diagnostic(
        code(timer::released),
        help("The kernel timer was destroyed. Reconfigure the handle before using it again.")
    )]
    Released,
}

impl TimerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TimerError::InvalidSignal(_) | TimerError::InvalidDuration { .. } => {
                ErrorKind::Argument
            }
            TimerError::Os { .. } => ErrorKind::Os,
            TimerError::Unsupported => ErrorKind::Unsupported,
            TimerError::Released => ErrorKind::Released,
        }
    }

    #[inline]
    pub fn is_argument(&self) -> bool {
        self.kind() == ErrorKind::Argument
    }

    pub(crate) fn invalid_signal(what: impl std::fmt::Display) -> Self {
        TimerError::InvalidSignal(what.to_string())
    }

    /// Wrap a failed system call
    #[cfg(any(target_os = "linux", target_os = "android"))]
    pub(crate) fn os(op: &'static str, errno: nix::errno::Errno) -> Self {
        TimerError::Os {
            op,
            code: errno as i32,
            message: errno.desc().to_string(),
        }
    }
}
