//! Scoped ownership of a started capture session.

use super::{CaptureError, CaptureSession};

/// A capture session that is stopped when this guard goes out of scope.
///
/// The guard takes ownership before `start` is called, so a session whose
/// start fails part-way is stopped too.
pub struct RunningSession<S: CaptureSession> {
    session: S,
}

impl<S: CaptureSession> RunningSession<S> {
    /// Starts `session` and confirms it reports running.
    pub fn start(session: S) -> Result<Self, CaptureError> {
        let mut guard = Self { session };
        guard.session.start()?;
        if !guard.session.is_running() {
            return Err(CaptureError::SessionStart(
                "session did not report running".into(),
            ));
        }
        tracing::debug!("Capture session running");
        Ok(guard)
    }

    /// Checks if the underlying session is still running.
    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    /// Stops the session now instead of at end of scope.
    pub fn stop(self) {
        drop(self);
    }
}

impl<S: CaptureSession> Drop for RunningSession<S> {
    fn drop(&mut self) {
        self.session.stop();
        tracing::debug!("Capture session stopped");
    }
}
