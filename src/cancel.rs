//! Ambient, process-wide cooperative cancellation.
//!
//! The core engines only ever touch [`request_interrupt`] and
//! [`check_interrupt`] — a single `AtomicBool` consulted at the top of the
//! driver loop. Installing an actual OS signal handler is an external,
//! out-of-scope concern (see the crate's module docs); the optional
//! `signal-shim` feature below is the thin wrapper that does it, kept
//! physically separate so embeddings with their own cancellation source
//! never need to pull in `libc`.

use crate::error::KCliqueError;
use std::sync::atomic::{AtomicBool, Ordering};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Requests that the next cancellation checkpoint abort the running search.
/// Safe to call from any thread, a signal handler, or a `Ctrl-C` callback.
pub fn request_interrupt() {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

/// Consults and clears the ambient interrupt flag. Called once per driver
/// loop iteration by both engines.
pub(crate) fn check_interrupt() -> Result<(), KCliqueError> {
    if INTERRUPTED.swap(false, Ordering::SeqCst) {
        Err(KCliqueError::Cancelled)
    } else {
        Ok(())
    }
}

#[cfg(feature = "signal-shim")]
mod signal_shim {
    use super::request_interrupt;
    use std::mem::MaybeUninit;

    extern "C" fn handle_interrupt_signal(_signal: libc::c_int) {
        request_interrupt();
    }

    /// RAII guard that installs `SIGINT`/`SIGALRM` handlers for its
    /// lifetime, setting the ambient interrupt flag, and restores whatever
    /// handlers were previously installed on drop.
    ///
    /// This is the out-of-scope "process-level signal-handling wrapper"
    /// named in the crate's module docs, scoped around a sequence of
    /// `next()` calls (or a whole `for clique in engine` loop) rather than
    /// re-installed on every single call.
    pub struct SignalScope {
        prev_sigint: libc::sigaction,
        prev_sigalrm: libc::sigaction,
    }

    impl SignalScope {
        // Installing a raw libc signal handler has no safe equivalent.
        #[allow(unsafe_code)]
        pub fn install() -> Self {
            let mut action: libc::sigaction = unsafe { MaybeUninit::zeroed().assume_init() };
            action.sa_sigaction = handle_interrupt_signal as usize;
            unsafe {
                libc::sigemptyset(&mut action.sa_mask);
            }
            action.sa_flags = 0;

            let mut prev_sigint: libc::sigaction = unsafe { MaybeUninit::zeroed().assume_init() };
            let mut prev_sigalrm: libc::sigaction = unsafe { MaybeUninit::zeroed().assume_init() };
            unsafe {
                libc::sigaction(libc::SIGINT, &action, &mut prev_sigint);
                libc::sigaction(libc::SIGALRM, &action, &mut prev_sigalrm);
            }
            SignalScope {
                prev_sigint,
                prev_sigalrm,
            }
        }
    }

    impl Drop for SignalScope {
        // Restoring the previous sigaction has no safe equivalent.
        #[allow(unsafe_code)]
        fn drop(&mut self) {
            unsafe {
                libc::sigaction(libc::SIGINT, &self.prev_sigint, std::ptr::null_mut());
                libc::sigaction(libc::SIGALRM, &self.prev_sigalrm, std::ptr::null_mut());
            }
        }
    }
}

#[cfg(feature = "signal-shim")]
pub use signal_shim::SignalScope;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interrupt_flag_is_observed_once_then_clears() {
        // Run serially: the flag is process-wide, so a parallel test runner
        // interleaving with this one would be flaky by construction.
        request_interrupt();
        assert_eq!(check_interrupt(), Err(KCliqueError::Cancelled));
        assert_eq!(check_interrupt(), Ok(()));
    }
}
