//! Permission capability abstraction.
//!
//! This abstraction allows swapping between the OS permission subsystem
//! and a scripted implementation for testing.

use super::AuthorizationStatus;
use std::cell::Cell;

/// Access to the OS permission subsystem for the video category.
pub trait PermissionProvider {
    /// Reads the current authorization state.
    fn status(&self) -> AuthorizationStatus;

    /// Shows the consent prompt and blocks until the user answers.
    ///
    /// Only meaningful while the state is
    /// [`AuthorizationStatus::NotDetermined`]. There is no timeout; a human
    /// must respond. Returns true if access was granted.
    fn request_access(&self) -> bool;
}

impl<P: PermissionProvider + ?Sized> PermissionProvider for &P {
    fn status(&self) -> AuthorizationStatus {
        (**self).status()
    }

    fn request_access(&self) -> bool {
        (**self).request_access()
    }
}

/// Scripted permission provider for testing.
///
/// Reports a fixed state and answers the consent prompt with a preset
/// result. Counts how often the prompt was requested.
#[derive(Debug)]
pub struct MockPermissions {
    status: Cell<AuthorizationStatus>,
    grant: bool,
    requests: Cell<u32>,
}

impl MockPermissions {
    /// Creates a provider reporting `status` whose prompt would grant access.
    pub fn new(status: AuthorizationStatus) -> Self {
        Self {
            status: Cell::new(status),
            grant: true,
            requests: Cell::new(0),
        }
    }

    /// Creates an undetermined provider whose prompt answers with `grant`.
    pub fn prompting(grant: bool) -> Self {
        Self {
            grant,
            ..Self::new(AuthorizationStatus::NotDetermined)
        }
    }

    /// Number of times the consent prompt was requested.
    pub fn requests(&self) -> u32 {
        self.requests.get()
    }
}

impl PermissionProvider for MockPermissions {
    fn status(&self) -> AuthorizationStatus {
        self.status.get()
    }

    fn request_access(&self) -> bool {
        self.requests.set(self.requests.get() + 1);
        // The OS only moves NotDetermined forward.
        if self.status.get().is_undetermined() {
            self.status.set(if self.grant {
                AuthorizationStatus::Authorized
            } else {
                AuthorizationStatus::Denied
            });
        }
        self.status.get() == AuthorizationStatus::Authorized
    }
}
