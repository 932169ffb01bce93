/*!
 * sigevent Construction
 *
 * libc only exposes `sigev_notify_thread_id` out of the sigevent union, so
 * SIGEV_THREAD fields are written through a layout overlay matching the
 * glibc/musl/bionic definition.
 */

use super::relay::{relay_expiry, RelayBox};
use nix::libc;
use std::mem;
use std::ptr;

/// Leading fields of `struct sigevent` with the `_sigev_thread` union arm
#[repr(C)]
struct SigevThreadLayout {
    sigev_value: libc::sigval,
    sigev_signo: libc::c_int,
    sigev_notify: libc::c_int,
    sigev_notify_function: Option<extern "C" fn(libc::sigval)>,
    sigev_notify_attributes: *mut libc::pthread_attr_t,
}

const _: () = assert!(mem::size_of::<SigevThreadLayout>() <= mem::size_of::<libc::sigevent>());
const _: () = assert!(mem::align_of::<SigevThreadLayout>() <= mem::align_of::<libc::sigevent>());

/// Kernel-facing delivery, borrowed from the timer being built
pub(crate) enum Delivery<'a> {
    Silent,
    Signal(libc::c_int),
    Relay(&'a RelayBox),
}

pub(crate) fn build(delivery: &Delivery<'_>) -> libc::sigevent {
    // SAFETY: sigevent is plain C data, all-zero is a valid starting value
    let mut sev: libc::sigevent = unsafe { mem::zeroed() };

    match *delivery {
        Delivery::Silent => {
            sev.sigev_notify = libc::SIGEV_NONE;
        }
        Delivery::Signal(signo) => {
            sev.sigev_notify = libc::SIGEV_SIGNAL;
            sev.sigev_signo = signo;
        }
        Delivery::Relay(relay) => {
            sev.sigev_notify = libc::SIGEV_THREAD;
            sev.sigev_signo = relay.record().signal;
            sev.sigev_value = libc::sigval {
                sival_ptr: relay.as_sival_ptr(),
            };
            let layout = ptr::addr_of_mut!(sev).cast::<SigevThreadLayout>();
            // SAFETY: size and alignment checked above; the union starts right
            // after sigev_notify in every supported libc
            unsafe {
                (*layout).sigev_notify_function = Some(relay_expiry);
                (*layout).sigev_notify_attributes = ptr::null_mut();
            }
        }
    }

    sev
}

#[cfg(test)]
mod tests {
    use super::super::relay::RelayRecord;
    use super::*;

    #[test]
    fn test_silent_and_signal() {
        let sev = build(&Delivery::Silent);
        assert_eq!(sev.sigev_notify, libc::SIGEV_NONE);

        let sev = build(&Delivery::Signal(libc::SIGUSR1));
        assert_eq!(sev.sigev_notify, libc::SIGEV_SIGNAL);
        assert_eq!(sev.sigev_signo, libc::SIGUSR1);
    }

    #[test]
    fn test_relay_overlay() {
        let relay = RelayBox::new(RelayRecord {
            target: nix::sys::pthread::pthread_self(),
            signal: libc::SIGALRM,
        });
        let mut sev = build(&Delivery::Relay(&relay));
        assert_eq!(sev.sigev_notify, libc::SIGEV_THREAD);
        assert_eq!(sev.sigev_value.sival_ptr, relay.as_sival_ptr());

        let layout = ptr::addr_of_mut!(sev).cast::<SigevThreadLayout>();
        let function = unsafe { (*layout).sigev_notify_function };
        assert_eq!(
            function.map(|f| f as usize),
            Some(relay_expiry as extern "C" fn(libc::sigval) as usize)
        );
    }
}
