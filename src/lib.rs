//! Camera Access Gate
//!
//! Determines whether the process may use the camera, asks the user for
//! consent when the OS has not yet recorded a decision, and proves access
//! by briefly running a capture session.
//!
//! # Architecture
//!
//! The flow is strictly linear:
//!
//! ```text
//! authorization status → (consent prompt) → decision
//!     ├─ granted → default device → session start → dwell → stop
//!     └─ refused → remediation guide
//! ```
//!
//! The OS permission subsystem and capture subsystem sit behind the
//! [`PermissionProvider`] and [`CaptureBackend`] traits; [`platform`]
//! supplies the real implementations and the `Mock*` types the test
//! doubles.
//!
//! # Example
//!
//! ```no_run
//! use camera_gate::{platform, CameraAccessGate};
//!
//! let (permissions, backend) = platform::system();
//! let mut gate = CameraAccessGate::new(permissions, backend, std::io::stdout());
//!
//! match gate.run() {
//!     Ok(()) => println!("camera verified"),
//!     Err(e) => eprintln!("camera unavailable: {}", e),
//! }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod authorization;
pub mod capture;
pub mod gate;
pub mod platform;
pub mod signal;

// Re-export commonly used types at crate root
pub use authorization::{AccessDecision, AuthorizationStatus, MockPermissions, PermissionProvider};
pub use capture::{CaptureBackend, CaptureError, CaptureSession, MockBackend, RunningSession};
pub use gate::{AccessError, CameraAccessGate, DWELL_TIME, EXIT_FAILURE, EXIT_SUCCESS};
pub use signal::Interrupt;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
