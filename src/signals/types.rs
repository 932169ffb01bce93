/*!
 * Signal Types
 * Caller-facing signal identifiers
 */

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A signal as supplied by a caller, before validation
///
/// Numbers are checked against the real-time range; names go through the
/// signal catalog. Use [`crate::signals::resolve`] to obtain a signal number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SignalId {
    /// Raw signal number
    Number(i64),
    /// Textual name, with or without the "SIG" prefix ("USR1", "SIGUSR1", "RT3")
    Name(String),
}

impl From<i32> for SignalId {
    fn from(n: i32) -> Self {
        SignalId::Number(n.into())
    }
}

impl From<i64> for SignalId {
    fn from(n: i64) -> Self {
        SignalId::Number(n)
    }
}

impl From<&str> for SignalId {
    fn from(name: &str) -> Self {
        SignalId::Name(name.to_string())
    }
}

impl From<String> for SignalId {
    fn from(name: String) -> Self {
        SignalId::Name(name)
    }
}

/// Integers parse as [`SignalId::Number`], anything else as [`SignalId::Name`]
impl FromStr for SignalId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<i64>() {
            Ok(n) => SignalId::Number(n),
            Err(_) => SignalId::Name(s.to_string()),
        })
    }
}

impl fmt::Display for SignalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalId::Number(n) => write!(f, "{}", n),
            SignalId::Name(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("10".parse::<SignalId>(), Ok(SignalId::Number(10)));
        assert_eq!("-1".parse::<SignalId>(), Ok(SignalId::Number(-1)));
        assert_eq!(
            "SIGUSR1".parse::<SignalId>(),
            Ok(SignalId::Name("SIGUSR1".into()))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(SignalId::from(14).to_string(), "14");
        assert_eq!(SignalId::from("ALRM").to_string(), "ALRM");
    }
}
