/*!
 * Timer Limits and Constants
 *
 * Unit conversions and the fixed tokens used by signal name resolution.
 */

// =============================================================================
// TIME UNITS
// =============================================================================

/// Milliseconds per second
/// Divisor for the whole-seconds part of a millisecond duration
pub const MSEC_PER_SEC: i64 = 1_000;

/// Nanoseconds per millisecond
/// Scales the sub-second millisecond remainder into `tv_nsec`
pub const NSEC_PER_MSEC: i64 = 1_000_000;

/// Nanoseconds per second
pub const NSEC_PER_SEC: i64 = 1_000_000_000;

// =============================================================================
// SIGNAL NAMES
// =============================================================================

/// Conventional prefix stripped from textual signal names ("SIGUSR1" -> "USR1")
pub const SIGNAL_NAME_PREFIX: &str = "SIG";

/// Prefix of the real-time signal naming scheme ("RT0", "RT5", ...)
pub const RT_SIGNAL_PREFIX: &str = "RT";

/// Name of the process exit pseudo-signal
/// [LINUX-COMPAT] Resolves to 0, which is never delivered
pub const EXIT_PSEUDO_SIGNAL: &str = "EXIT";
