//! Signal handling for interruption-safe brightness changes.
//!
//! SIGHUP, SIGINT and SIGTERM only set a [`CancellationToken`]; the ramp engine
//! polls the token between steps and restores the original brightness when it
//! finds it set. Each backend submission runs inside a [`CriticalSection`]
//! that holds those signals pending, so a call to logind is never abandoned
//! halfway and the local view of the device never diverges from the device.

use anyhow::{Context, Result};
use nix::sys::signal::{SigSet, SigmaskHow, Signal, pthread_sigmask};
use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGTERM};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::error::BrightnessError;
use crate::logger::Log;

/// Signals that cancel a running ramp.
pub const TERMINATION_SIGNALS: [Signal; 3] = [Signal::SIGHUP, Signal::SIGINT, Signal::SIGTERM];

/// Write-once cancellation flag shared with the signal handlers.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. There is no way to clear the flag again.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Route the termination signals to `token`.
///
/// The installed handlers do nothing but store `true` into the token's flag.
pub fn setup_signal_handler(token: &CancellationToken) -> Result<()> {
    for signal in [SIGHUP, SIGINT, SIGTERM] {
        signal_hook::flag::register(signal, Arc::clone(&token.flag))
            .with_context(|| format!("failed to register handler for signal {}", signal))?;
    }
    Log::log_debug("Termination signals will restore the original brightness");
    Ok(())
}

fn termination_set() -> SigSet {
    let mut set = SigSet::empty();
    for signal in TERMINATION_SIGNALS {
        set.add(signal);
    }
    set
}

/// Scope in which the termination signals are held pending for this thread.
///
/// Dropping the guard restores the previous signal mask, at which point any
/// signal that arrived in the meantime is delivered.
pub struct CriticalSection {
    previous: SigSet,
}

impl CriticalSection {
    pub fn enter() -> nix::Result<Self> {
        let mut previous = SigSet::empty();
        pthread_sigmask(
            SigmaskHow::SIG_BLOCK,
            Some(&termination_set()),
            Some(&mut previous),
        )?;
        Ok(Self { previous })
    }
}

impl Drop for CriticalSection {
    fn drop(&mut self) {
        if let Err(e) = pthread_sigmask(SigmaskHow::SIG_SETMASK, Some(&self.previous), None) {
            Log::log_warning(&format!("Failed to restore signal mask: {}", e));
        }
    }
}

/// Run `call` with the termination signals held pending.
pub fn critical<T>(call: impl FnOnce() -> T) -> Result<T, BrightnessError> {
    let _guard = CriticalSection::enter().map_err(|e| {
        BrightnessError::Io(format!("failed to block termination signals: {}", e))
    })?;
    Ok(call())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_shared_between_clones() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!token.is_cancelled());
        clone.cancel();
        assert!(token.is_cancelled());
        clone.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_critical_section_masks_and_restores() {
        let before = SigSet::thread_get_mask().unwrap();
        assert!(!before.contains(Signal::SIGTERM));

        let value = critical(|| {
            let inside = SigSet::thread_get_mask().unwrap();
            TERMINATION_SIGNALS.iter().all(|s| inside.contains(*s))
        })
        .unwrap();
        assert!(value);

        let after = SigSet::thread_get_mask().unwrap();
        assert!(!after.contains(Signal::SIGTERM));
        assert!(!after.contains(Signal::SIGINT));
        assert!(!after.contains(Signal::SIGHUP));
    }

    #[test]
    fn test_nested_critical_sections_keep_outer_mask() {
        let outer = CriticalSection::enter().unwrap();
        {
            let _inner = CriticalSection::enter().unwrap();
        }
        let mask = SigSet::thread_get_mask().unwrap();
        assert!(mask.contains(Signal::SIGINT));
        drop(outer);
        let mask = SigSet::thread_get_mask().unwrap();
        assert!(!mask.contains(Signal::SIGINT));
    }
}
