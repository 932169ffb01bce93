/*!
 * Signal Catalog
 * Static name -> number table for the host platform
 */

use crate::core::limits::{EXIT_PSEUDO_SIGNAL, RT_SIGNAL_PREFIX};
use ahash::RandomState;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Canonical names without the "SIG" prefix, built once and never mutated
static SIGNAL_TABLE: LazyLock<HashMap<&'static str, i32, RandomState>> =
    LazyLock::new(build_table);

#[cfg(unix)]
fn build_table() -> HashMap<&'static str, i32, RandomState> {
    use nix::libc;

    let mut table = HashMap::with_capacity_and_hasher(48, RandomState::new());
    table.insert(EXIT_PSEUDO_SIGNAL, 0);
    table.insert("HUP", libc::SIGHUP);
    table.insert("INT", libc::SIGINT);
    table.insert("QUIT", libc::SIGQUIT);
    table.insert("ILL", libc::SIGILL);
    table.insert("TRAP", libc::SIGTRAP);
    table.insert("ABRT", libc::SIGABRT);
    #[cfg(any(target_os = "linux", target_os = "android", target_vendor = "apple"))]
    table.insert("IOT", libc::SIGIOT);
    #[cfg(any(
        target_vendor = "apple",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd",
        target_os = "dragonfly"
    ))]
    table.insert("EMT", libc::SIGEMT);
    table.insert("FPE", libc::SIGFPE);
    table.insert("KILL", libc::SIGKILL);
    table.insert("BUS", libc::SIGBUS);
    table.insert("SEGV", libc::SIGSEGV);
    table.insert("SYS", libc::SIGSYS);
    table.insert("PIPE", libc::SIGPIPE);
    table.insert("ALRM", libc::SIGALRM);
    table.insert("TERM", libc::SIGTERM);
    table.insert("URG", libc::SIGURG);
    table.insert("STOP", libc::SIGSTOP);
    table.insert("TSTP", libc::SIGTSTP);
    table.insert("CONT", libc::SIGCONT);
    table.insert("CHLD", libc::SIGCHLD);
    // No SIGCLD in libc; it is an alias of SIGCHLD wherever it exists
    table.insert("CLD", libc::SIGCHLD);
    table.insert("TTIN", libc::SIGTTIN);
    table.insert("TTOU", libc::SIGTTOU);
    table.insert("IO", libc::SIGIO);
    table.insert("XCPU", libc::SIGXCPU);
    table.insert("XFSZ", libc::SIGXFSZ);
    table.insert("VTALRM", libc::SIGVTALRM);
    table.insert("PROF", libc::SIGPROF);
    table.insert("WINCH", libc::SIGWINCH);
    table.insert("USR1", libc::SIGUSR1);
    table.insert("USR2", libc::SIGUSR2);
    #[cfg(any(target_os = "linux", target_os = "android"))]
    {
        table.insert("PWR", libc::SIGPWR);
        table.insert("POLL", libc::SIGPOLL);
    }
    #[cfg(any(
        target_vendor = "apple",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd",
        target_os = "dragonfly"
    ))]
    table.insert("INFO", libc::SIGINFO);
    table
}

#[cfg(not(unix))]
fn build_table() -> HashMap<&'static str, i32, RandomState> {
    let mut table = HashMap::with_hasher(RandomState::new());
    table.insert(EXIT_PSEUDO_SIGNAL, 0);
    table
}

/// Real-time signal bounds as (SIGRTMIN, SIGRTMAX)
///
/// `None` when the platform has no real-time signals
#[cfg(any(target_os = "linux", target_os = "android"))]
pub fn rt_range() -> Option<(i32, i32)> {
    Some((nix::libc::SIGRTMIN(), nix::libc::SIGRTMAX()))
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
pub fn rt_range() -> Option<(i32, i32)> {
    None
}

/// Look up a canonical signal name (no "SIG" prefix)
///
/// Covers the platform's standard names, "EXIT" (0) and the "RT<n>" scheme.
pub fn lookup(name: &str) -> Option<i32> {
    if let Some(&signo) = SIGNAL_TABLE.get(name) {
        return Some(signo);
    }
    lookup_rt(name)
}

/// "RT<n>" -> SIGRTMIN + n, decimal n only
fn lookup_rt(name: &str) -> Option<i32> {
    let index = name.strip_prefix(RT_SIGNAL_PREFIX)?;
    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (min, max) = rt_range()?;
    let offset: i32 = index.parse().ok()?;
    min.checked_add(offset).filter(|&signo| signo <= max)
}

/// Number of entries in the static name table, including "EXIT"
pub fn len() -> usize {
    SIGNAL_TABLE.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_is_zero() {
        assert_eq!(lookup("EXIT"), Some(0));
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(lookup("NOPE"), None);
        assert_eq!(lookup(""), None);
        // Case sensitive, prefix already stripped by callers
        assert_eq!(lookup("usr1"), None);
        assert_eq!(lookup("SIGUSR1"), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_standard_names() {
        use nix::libc;

        assert_eq!(lookup("HUP"), Some(libc::SIGHUP));
        assert_eq!(lookup("ALRM"), Some(libc::SIGALRM));
        assert_eq!(lookup("USR2"), Some(libc::SIGUSR2));
        assert_eq!(lookup("CLD"), lookup("CHLD"));
        assert!(len() > 30);
    }

    #[cfg(any(target_os = "linux", target_os = "android"))]
    #[test]
    fn test_rt_names() {
        let (min, max) = rt_range().unwrap();
        assert_eq!(lookup("RT0"), Some(min));
        assert_eq!(lookup("RT1"), Some(min + 1));
        assert_eq!(lookup(&format!("RT{}", max - min)), Some(max));
        assert_eq!(lookup(&format!("RT{}", max - min + 1)), None);
    }

    #[cfg(any(target_os = "linux", target_os = "android"))]
    #[test]
    fn test_malformed_rt_names() {
        assert_eq!(lookup("RT"), None);
        assert_eq!(lookup("RT-1"), None);
        assert_eq!(lookup("RT+1"), None);
        assert_eq!(lookup("RTx"), None);
        assert_eq!(lookup("RT1x"), None);
        assert_eq!(lookup("RT99999999999999999999"), None);
    }
}
