/*!
 * timerctl Configuration
 *
 * Environment-driven settings for the demo binary
 */

use crate::signals::SignalId;
use crate::timer::ClockId;
use tracing::warn;

/// Start delay used when TIMER_START_MS is unset (ms)
pub const DEFAULT_START_MS: i64 = 500;

/// Repeat interval used when TIMER_INTERVAL_MS is unset (ms)
pub const DEFAULT_INTERVAL_MS: i64 = 250;

/// Expirations to observe before exiting
pub const DEFAULT_TICKS: u32 = 4;

/// Signal delivered on expiry when TIMER_SIGNAL is unset
pub const DEFAULT_SIGNAL: &str = "USR1";

/// Settings read by `timerctl`
///
/// Environment variables:
/// - TIMER_START_MS: first expiry delay in ms (default: 500)
/// - TIMER_INTERVAL_MS: repeat interval in ms, 0 for one-shot (default: 250)
/// - TIMER_SIGNAL: signal number or name (default: USR1)
/// - TIMER_CLOCK: raw clock id (default: CLOCK_REALTIME)
/// - TIMER_TICKS: expirations to wait for (default: 4)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerctlConfig {
    pub start_ms: i64,
    pub interval_ms: i64,
    pub signal: SignalId,
    pub clock: ClockId,
    pub ticks: u32,
}

impl Default for TimerctlConfig {
    fn default() -> Self {
        Self {
            start_ms: DEFAULT_START_MS,
            interval_ms: DEFAULT_INTERVAL_MS,
            signal: SignalId::from(DEFAULT_SIGNAL),
            clock: ClockId::REALTIME,
            ticks: DEFAULT_TICKS,
        }
    }
}

impl TimerctlConfig {
    /// Load from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let signal = lookup("TIMER_SIGNAL")
            .and_then(|raw| raw.trim().parse::<SignalId>().ok())
            .unwrap_or(defaults.signal);

        Self {
            start_ms: parse_or(&lookup, "TIMER_START_MS", defaults.start_ms),
            interval_ms: parse_or(&lookup, "TIMER_INTERVAL_MS", defaults.interval_ms),
            signal,
            clock: ClockId::from_raw(parse_or(&lookup, "TIMER_CLOCK", defaults.clock.as_raw())),
            ticks: parse_or(&lookup, "TIMER_TICKS", defaults.ticks),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, fallback = %default, "Unparsable setting, using default");
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = TimerctlConfig::from_lookup(|_| None);
        assert_eq!(config, TimerctlConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = TimerctlConfig::from_lookup(lookup_from(&[
            ("TIMER_START_MS", "100"),
            ("TIMER_INTERVAL_MS", "0"),
            ("TIMER_SIGNAL", "12"),
            ("TIMER_CLOCK", "1"),
            ("TIMER_TICKS", "1"),
        ]));
        assert_eq!(config.start_ms, 100);
        assert_eq!(config.interval_ms, 0);
        assert_eq!(config.signal, SignalId::Number(12));
        assert_eq!(config.clock.as_raw(), 1);
        assert_eq!(config.ticks, 1);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = TimerctlConfig::from_lookup(lookup_from(&[
            ("TIMER_START_MS", "soon"),
            ("TIMER_TICKS", "-3"),
        ]));
        assert_eq!(config.start_ms, DEFAULT_START_MS);
        assert_eq!(config.ticks, DEFAULT_TICKS);
    }
}
