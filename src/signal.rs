//! Ctrl-C handling.
//!
//! While a capture session is running the interrupt is *armed*: Ctrl-C only
//! raises a flag, so the dwell ends early and the session guard still stops
//! the session. When disarmed, Ctrl-C terminates the process with the
//! failure status.

use crate::gate::EXIT_FAILURE;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct Flags {
    armed: AtomicBool,
    raised: AtomicBool,
}

/// Shared Ctrl-C state.
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    flags: Arc<Flags>,
}

impl Interrupt {
    /// Creates an interrupt that is never raised by a signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the process-wide Ctrl-C handler.
    ///
    /// Can only succeed once per process.
    pub fn install() -> Result<Self, ctrlc::Error> {
        let interrupt = Self::new();
        let handler = interrupt.clone();
        ctrlc::set_handler(move || handler.raise())?;
        Ok(interrupt)
    }

    /// Delivers an interrupt as the signal handler would.
    pub fn raise(&self) {
        if self.flags.armed.load(Ordering::SeqCst) {
            tracing::warn!("Interrupt received, stopping capture session");
            self.flags.raised.store(true, Ordering::SeqCst);
        } else {
            tracing::warn!("Interrupt received, exiting");
            std::process::exit(i32::from(EXIT_FAILURE));
        }
    }

    /// Arms the interrupt until the returned guard is dropped.
    pub fn arm(&self) -> Armed<'_> {
        self.flags.raised.store(false, Ordering::SeqCst);
        self.flags.armed.store(true, Ordering::SeqCst);
        Armed { interrupt: self }
    }

    /// Returns true while a guard from [`Interrupt::arm`] is alive.
    pub fn is_armed(&self) -> bool {
        self.flags.armed.load(Ordering::SeqCst)
    }

    /// Returns true if an interrupt arrived while armed.
    pub fn is_raised(&self) -> bool {
        self.flags.raised.load(Ordering::SeqCst)
    }
}

/// Keeps an [`Interrupt`] armed.
#[must_use = "the interrupt is disarmed when this guard is dropped"]
pub struct Armed<'a> {
    interrupt: &'a Interrupt,
}

impl Drop for Armed<'_> {
    fn drop(&mut self) {
        self.interrupt.flags.armed.store(false, Ordering::SeqCst);
    }
}
