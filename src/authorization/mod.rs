//! Camera authorization state and the permission capability.
//!
//! The OS owns the authorization state. This module exposes it through the
//! [`PermissionProvider`] trait so the gate can be driven by the real OS
//! or by a scripted test double.

mod provider;
mod status;

pub use provider::{MockPermissions, PermissionProvider};
pub use status::{AccessDecision, AuthorizationStatus};
