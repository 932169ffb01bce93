/*!
 * Thread-Relay Callback
 *
 * In relay mode the C library runs [`relay_expiry`] on a helper thread it
 * owns, once per expiry. The callback forwards the expiry as a signal sent to
 * one thread of this process.
 */

use nix::libc;
use std::ptr::NonNull;

/// Parameters the kernel carries by address for the life of the timer
///
/// Written once at construction, read-only afterwards.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RelayRecord {
    pub target: libc::pthread_t,
    pub signal: libc::c_int,
}

/// Sole owner of a heap-allocated [`RelayRecord`]
///
/// The address stays fixed until drop. Drop it only after the kernel timer
/// holding the address has been deleted.
#[derive(Debug)]
pub(crate) struct RelayBox(NonNull<RelayRecord>);

// SAFETY: the record is immutable after construction and only read elsewhere.
unsafe impl Send for RelayBox {}
unsafe impl Sync for RelayBox {}

impl RelayBox {
    pub fn new(record: RelayRecord) -> Self {
        RelayBox(NonNull::from(Box::leak(Box::new(record))))
    }

    /// Address handed to the kernel as `sigev_value.sival_ptr`
    #[inline]
    pub fn as_sival_ptr(&self) -> *mut libc::c_void {
        self.0.as_ptr().cast()
    }

    #[inline]
    pub fn record(&self) -> &RelayRecord {
        // SAFETY: allocated in `new`, freed only in `drop`
        unsafe { self.0.as_ref() }
    }
}

impl Drop for RelayBox {
    fn drop(&mut self) {
        // SAFETY: pointer came from `Box::leak` and is released exactly once here
        unsafe { drop(Box::from_raw(self.0.as_ptr())) };
    }
}

/// `sigev_notify_function` for relay-mode timers
///
/// Must not allocate, block, log or unwind. Delivery failures are ignored.
pub(crate) extern "C" fn relay_expiry(value: libc::sigval) {
    let record = value.sival_ptr as *const RelayRecord;
    // SAFETY: the pointer is the `RelayBox` address registered with this timer,
    // which outlives the kernel timer object
    if let Some(record) = unsafe { record.as_ref() } {
        unsafe {
            libc::pthread_kill(record.target, record.signal);
        }
    }
}
