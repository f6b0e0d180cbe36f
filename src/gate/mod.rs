//! Camera access gate: permission decision, session smoke test and
//! process outcome.

mod access;
mod error;
pub mod report;

pub use access::{CameraAccessGate, DWELL_TIME};
pub use error::{AccessError, EXIT_FAILURE, EXIT_SUCCESS};
