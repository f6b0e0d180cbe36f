//! Capture devices and sessions.
//!
//! This module provides abstractions for discovering the default video
//! device and running a capture session against it. The session is only
//! opened to prove access works; no frames are consumed.

mod camera;
mod running;

pub use camera::{
    CaptureBackend, CaptureDevice, CaptureError, CaptureSession, MockBackend, MockDevice,
    MockFault, MockSession,
};
pub use running::RunningSession;
