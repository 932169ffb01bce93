/*!
 * Signal Resolver
 * Turns caller-supplied identifiers into validated signal numbers
 */

use super::catalog;
use super::types::SignalId;
use crate::core::errors::{TimerError, TimerResult};
use crate::core::limits::{EXIT_PSEUDO_SIGNAL, SIGNAL_NAME_PREFIX};

/// Resolve a signal identifier to a signal number
///
/// - Numbers must satisfy `0 <= n < SIGRTMAX`.
/// - Names may carry the "SIG" prefix. "EXIT" resolves to 0; any other name
///   the catalog does not know (or maps to 0) is rejected.
pub fn resolve(id: &SignalId) -> TimerResult<i32> {
    match id {
        SignalId::Number(n) => resolve_number(*n),
        SignalId::Name(name) => resolve_name(name),
    }
}

fn resolve_number(n: i64) -> TimerResult<i32> {
    let upper = upper_bound();
    if n < 0 || n >= i64::from(upper) {
        return Err(TimerError::invalid_signal(format!(
            "invalid signal number ({})",
            n
        )));
    }
    Ok(n as i32)
}

/// Exclusive upper bound of the numeric path
fn upper_bound() -> i32 {
    match catalog::rt_range() {
        Some((_, max)) => max,
        // Without real-time signals, bound by the largest catalogued number
        None => catalog_max() + 1,
    }
}

#[cfg(unix)]
fn catalog_max() -> i32 {
    nix::sys::signal::Signal::iterator()
        .map(|s| s as i32)
        .max()
        .unwrap_or(0)
}

#[cfg(not(unix))]
fn catalog_max() -> i32 {
    0
}

fn resolve_name(name: &str) -> TimerResult<i32> {
    let bare = name.strip_prefix(SIGNAL_NAME_PREFIX).unwrap_or(name);
    match catalog::lookup(bare) {
        Some(0) if bare != EXIT_PSEUDO_SIGNAL => Err(unsupported_name(name)),
        Some(signo) => Ok(signo),
        None => Err(unsupported_name(name)),
    }
}

fn unsupported_name(name: &str) -> TimerError {
    TimerError::invalid_signal(format!("unsupported signal ({})", name))
}

/// Real-time signal by index: `SIGRTMIN + n`
///
/// Fails when `n` is negative or the result would exceed SIGRTMAX.
pub fn real_time_signal_index(n: i64) -> TimerResult<i32> {
    let (min, max) = catalog::rt_range().ok_or(TimerError::Unsupported)?;
    if n < 0 {
        return Err(TimerError::invalid_signal(format!(
            "negative real-time signal index ({})",
            n
        )));
    }
    i64::from(min)
        .checked_add(n)
        .filter(|&signo| signo <= i64::from(max))
        .map(|signo| signo as i32)
        .ok_or_else(|| {
            TimerError::invalid_signal(format!("real-time signal index too large ({})", n))
        })
}
