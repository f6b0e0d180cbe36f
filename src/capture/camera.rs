//! Camera capture abstraction.
//!
//! This module provides a trait-based abstraction over the OS capture
//! subsystem, allowing for both real camera sessions and mock
//! implementations for testing.

use std::cell::Cell;
use std::rc::Rc;
use thiserror::Error;

/// Errors that can occur while building or running a capture session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("failed to create capture input: {0}")]
    DeviceInput(String),
    #[error("failed to configure capture session: {0}")]
    SessionConfiguration(String),
    #[error("failed to start capture session: {0}")]
    SessionStart(String),
    #[error("capture session stopped unexpectedly")]
    SessionStopped,
}

/// A discovered video capture device.
pub trait CaptureDevice {
    /// Human-readable device name.
    fn name(&self) -> String;
}

/// A capture session with one device input attached.
pub trait CaptureSession {
    /// Starts the flow of data from the input.
    fn start(&mut self) -> Result<(), CaptureError>;

    /// Checks if the session is currently running.
    fn is_running(&self) -> bool;

    /// Stops the session. Calling this on a stopped session is a no-op.
    fn stop(&mut self);
}

/// Trait for capture subsystem implementations.
pub trait CaptureBackend {
    /// Device handle type.
    type Device: CaptureDevice;
    /// Session type produced for a device.
    type Session: CaptureSession;

    /// Resolves the default video capture device, if any.
    fn default_video_device(&self) -> Option<Self::Device>;

    /// Builds an input from `device` and attaches it to a new session.
    fn open_session(&self, device: &Self::Device) -> Result<Self::Session, CaptureError>;
}

impl<B: CaptureBackend + ?Sized> CaptureBackend for &B {
    type Device = B::Device;
    type Session = B::Session;

    fn default_video_device(&self) -> Option<Self::Device> {
        (**self).default_video_device()
    }

    fn open_session(&self, device: &Self::Device) -> Result<Self::Session, CaptureError> {
        (**self).open_session(device)
    }
}

/// Failure injected by [`MockBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MockFault {
    #[default]
    Healthy,
    /// No default device is available.
    NoDevice,
    /// Building the device input fails.
    InputFails,
    /// Starting the session fails.
    StartFails,
    /// The session stops on its own after the first running check.
    DiesAfterStart,
}

#[derive(Debug, Default)]
struct MockCounters {
    lookups: Cell<u32>,
    sessions: Cell<u32>,
    starts: Cell<u32>,
    stops: Cell<u32>,
}

fn bump(cell: &Cell<u32>) {
    cell.set(cell.get() + 1);
}

/// Mock capture backend for testing.
///
/// Records device lookups and session lifecycle calls so tests can assert
/// that a started session is always stopped.
#[derive(Debug, Default)]
pub struct MockBackend {
    fault: MockFault,
    counters: Rc<MockCounters>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend that injects `fault`.
    pub fn with_fault(fault: MockFault) -> Self {
        Self {
            fault,
            ..Self::default()
        }
    }

    /// Number of default-device lookups.
    pub fn lookups(&self) -> u32 {
        self.counters.lookups.get()
    }

    /// Number of sessions constructed.
    pub fn sessions(&self) -> u32 {
        self.counters.sessions.get()
    }

    /// Number of `start` calls across all sessions.
    pub fn starts(&self) -> u32 {
        self.counters.starts.get()
    }

    /// Number of `stop` calls across all sessions.
    pub fn stops(&self) -> u32 {
        self.counters.stops.get()
    }
}

/// Device returned by [`MockBackend`].
#[derive(Debug, Clone)]
pub struct MockDevice;

impl CaptureDevice for MockDevice {
    fn name(&self) -> String {
        "Mock Camera".to_string()
    }
}

/// Session returned by [`MockBackend`].
#[derive(Debug)]
pub struct MockSession {
    fault: MockFault,
    running: bool,
    checks: Cell<u32>,
    counters: Rc<MockCounters>,
}

impl CaptureSession for MockSession {
    fn start(&mut self) -> Result<(), CaptureError> {
        bump(&self.counters.starts);
        if self.fault == MockFault::StartFails {
            return Err(CaptureError::SessionStart("mock start failure".into()));
        }
        self.running = true;
        Ok(())
    }

    fn is_running(&self) -> bool {
        bump(&self.checks);
        if self.fault == MockFault::DiesAfterStart && self.checks.get() > 1 {
            return false;
        }
        self.running
    }

    fn stop(&mut self) {
        bump(&self.counters.stops);
        self.running = false;
    }
}

impl CaptureBackend for MockBackend {
    type Device = MockDevice;
    type Session = MockSession;

    fn default_video_device(&self) -> Option<MockDevice> {
        bump(&self.counters.lookups);
        match self.fault {
            MockFault::NoDevice => None,
            _ => Some(MockDevice),
        }
    }

    fn open_session(&self, _device: &MockDevice) -> Result<MockSession, CaptureError> {
        if self.fault == MockFault::InputFails {
            return Err(CaptureError::DeviceInput("mock device is busy".into()));
        }
        bump(&self.counters.sessions);
        Ok(MockSession {
            fault: self.fault,
            running: false,
            checks: Cell::new(0),
            counters: Rc::clone(&self.counters),
        })
    }
}
