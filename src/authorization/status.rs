//! Authorization state for the video capture category.

use std::fmt;

/// OS-tracked permission level for camera use.
///
/// Raw values follow AVFoundation's `AVAuthorizationStatus`. Values the
/// crate does not recognise are kept in [`AuthorizationStatus::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationStatus {
    /// The user has not yet been asked.
    NotDetermined,
    /// Parental controls or MDM policy forbid camera use.
    Restricted,
    /// The user refused access.
    Denied,
    /// The process may use the camera.
    Authorized,
    /// A state introduced by a newer OS release.
    Unknown(i64),
}

impl AuthorizationStatus {
    /// Maps a raw OS status value.
    pub fn from_raw(raw: i64) -> Self {
        match raw {
            0 => Self::NotDetermined,
            1 => Self::Restricted,
            2 => Self::Denied,
            3 => Self::Authorized,
            other => Self::Unknown(other),
        }
    }

    /// Returns the raw OS value.
    pub fn raw(self) -> i64 {
        match self {
            Self::NotDetermined => 0,
            Self::Restricted => 1,
            Self::Denied => 2,
            Self::Authorized => 3,
            Self::Unknown(raw) => raw,
        }
    }

    /// Returns true if the state can still change through a prompt.
    #[inline]
    pub fn is_undetermined(self) -> bool {
        matches!(self, Self::NotDetermined)
    }
}

impl fmt::Display for AuthorizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotDetermined => write!(f, "not_determined"),
            Self::Restricted => write!(f, "restricted"),
            Self::Denied => write!(f, "denied"),
            Self::Authorized => write!(f, "authorized"),
            Self::Unknown(raw) => write!(f, "unknown({})", raw),
        }
    }
}

/// Effective camera access after any consent prompt has been answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// The camera may be used.
    Granted,
    /// Access was refused; carries the state the refusal came from.
    Refused(AuthorizationStatus),
}

impl AccessDecision {
    /// Returns true if access was granted.
    #[inline]
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_raw_values() {
        assert_eq!(AuthorizationStatus::from_raw(0), AuthorizationStatus::NotDetermined);
        assert_eq!(AuthorizationStatus::from_raw(1), AuthorizationStatus::Restricted);
        assert_eq!(AuthorizationStatus::from_raw(2), AuthorizationStatus::Denied);
        assert_eq!(AuthorizationStatus::from_raw(3), AuthorizationStatus::Authorized);
    }

    #[test]
    fn test_unrecognised_raw_value_is_kept() {
        let status = AuthorizationStatus::from_raw(7);
        assert_eq!(status, AuthorizationStatus::Unknown(7));
        assert_eq!(status.raw(), 7);
        assert_eq!(status.to_string(), "unknown(7)");
    }

    #[test]
    fn test_only_not_determined_is_undetermined() {
        assert!(AuthorizationStatus::NotDetermined.is_undetermined());
        assert!(!AuthorizationStatus::Denied.is_undetermined());
        assert!(!AuthorizationStatus::Unknown(-1).is_undetermined());
    }
}
