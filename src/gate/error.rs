//! Failure outcomes of a gate run and their exit statuses.

use crate::authorization::AuthorizationStatus;
use crate::capture::CaptureError;
use thiserror::Error;

/// Exit status when access is confirmed and the session smoke test passed.
pub const EXIT_SUCCESS: u8 = 0;
/// Exit status for every other outcome.
pub const EXIT_FAILURE: u8 = 1;

/// Why the gate could not confirm camera access.
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("camera access refused ({0})")]
    PermissionDenied(AuthorizationStatus),
    #[error("camera authorization state not recognised ({0})")]
    PermissionUnknown(AuthorizationStatus),
    #[error("no camera device found")]
    DeviceUnavailable,
    #[error(transparent)]
    Session(#[from] CaptureError),
    #[error("interrupted while the capture session was running")]
    Interrupted,
}

impl AccessError {
    /// Maps a refusal to the matching error.
    pub fn refused(status: AuthorizationStatus) -> Self {
        match status {
            AuthorizationStatus::Unknown(_) => Self::PermissionUnknown(status),
            _ => Self::PermissionDenied(status),
        }
    }

    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        EXIT_FAILURE
    }
}
