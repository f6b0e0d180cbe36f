//! OS collaborators for the gate.
//!
//! macOS uses AVFoundation for both the permission check and the capture
//! session. Other platforms have no camera permission gate; with the
//! `camera` feature they open a session through nokhwa, otherwise no
//! device is ever found.

#[cfg(target_os = "macos")]
mod macos;
#[cfg(all(not(target_os = "macos"), feature = "camera"))]
mod native;

use crate::authorization::{AuthorizationStatus, PermissionProvider};
use crate::capture::{CaptureBackend, CaptureDevice, CaptureError, CaptureSession};
use std::convert::Infallible;

#[cfg(target_os = "macos")]
pub use macos::{AvDevice, AvFoundationBackend, AvFoundationPermissions, AvSession};
#[cfg(all(not(target_os = "macos"), feature = "camera"))]
pub use native::{NokhwaBackend, NokhwaDevice, NokhwaSession};

#[cfg(target_os = "macos")]
pub type SystemPermissions = AvFoundationPermissions;
#[cfg(not(target_os = "macos"))]
pub type SystemPermissions = ImplicitPermissions;

#[cfg(target_os = "macos")]
pub type SystemBackend = AvFoundationBackend;
#[cfg(all(not(target_os = "macos"), feature = "camera"))]
pub type SystemBackend = NokhwaBackend;
#[cfg(all(not(target_os = "macos"), not(feature = "camera")))]
pub type SystemBackend = NoBackend;

/// Returns the permission provider and capture backend for this platform.
pub fn system() -> (SystemPermissions, SystemBackend) {
    (SystemPermissions::default(), SystemBackend::default())
}

/// Permission provider for platforms without a camera permission gate.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImplicitPermissions;

impl PermissionProvider for ImplicitPermissions {
    fn status(&self) -> AuthorizationStatus {
        AuthorizationStatus::Authorized
    }

    fn request_access(&self) -> bool {
        true
    }
}

/// Capture backend used when no camera backend is compiled in.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoBackend;

impl CaptureDevice for Infallible {
    fn name(&self) -> String {
        match *self {}
    }
}

impl CaptureSession for Infallible {
    fn start(&mut self) -> Result<(), CaptureError> {
        match *self {}
    }

    fn is_running(&self) -> bool {
        match *self {}
    }

    fn stop(&mut self) {
        match *self {}
    }
}

impl CaptureBackend for NoBackend {
    type Device = Infallible;
    type Session = Infallible;

    fn default_video_device(&self) -> Option<Infallible> {
        tracing::warn!("No camera backend available on this platform");
        None
    }

    fn open_session(&self, device: &Infallible) -> Result<Infallible, CaptureError> {
        match *device {}
    }
}
