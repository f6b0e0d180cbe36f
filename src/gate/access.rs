//! The camera access gate.
//!
//! Determines whether the process may use the camera, obtaining consent
//! when the state is undetermined, and proves access by starting and
//! stopping a capture session.

use super::error::AccessError;
use super::report::{self, Console};
use crate::authorization::{AccessDecision, AuthorizationStatus, PermissionProvider};
use crate::capture::{CaptureBackend, CaptureDevice, CaptureError, RunningSession};
use crate::signal::Interrupt;
use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

/// How long the capture session is held open before it is stopped.
pub const DWELL_TIME: Duration = Duration::from_secs(2);

/// Granularity at which the dwell checks for an interrupt.
const DWELL_POLL: Duration = Duration::from_millis(50);

/// Runs the permission check and capture-session smoke test.
pub struct CameraAccessGate<P, B, W: Write> {
    permissions: P,
    backend: B,
    console: Console<W>,
    interrupt: Interrupt,
    dwell: Duration,
}

impl<P, B, W> CameraAccessGate<P, B, W>
where
    P: PermissionProvider,
    B: CaptureBackend,
    W: Write,
{
    /// Creates a gate writing status lines to `out`.
    pub fn new(permissions: P, backend: B, out: W) -> Self {
        Self {
            permissions,
            backend,
            console: Console::new(out),
            interrupt: Interrupt::new(),
            dwell: DWELL_TIME,
        }
    }

    /// Uses `interrupt` to cut the dwell short on Ctrl-C.
    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    #[cfg(test)]
    pub(crate) fn with_dwell(mut self, dwell: Duration) -> Self {
        self.dwell = dwell;
        self
    }

    /// Reads the authorization state and, if undetermined, asks the user.
    ///
    /// Prints one line for the state and, after a prompt, one line for the
    /// answer. The consent prompt is requested at most once.
    pub fn decide(&mut self) -> AccessDecision {
        let status = self.permissions.status();
        tracing::info!(%status, "Read camera authorization status");

        match status {
            AuthorizationStatus::Authorized => {
                self.console.line(report::AUTHORIZED);
                AccessDecision::Granted
            }
            AuthorizationStatus::NotDetermined => {
                self.console.line(report::NOT_DETERMINED);
                let granted = self.permissions.request_access();
                tracing::info!(granted, "Consent prompt answered");
                if granted {
                    self.console.line(report::GRANTED);
                    AccessDecision::Granted
                } else {
                    self.console.line(report::PROMPT_DENIED);
                    AccessDecision::Refused(AuthorizationStatus::Denied)
                }
            }
            AuthorizationStatus::Denied => {
                self.console.line(report::DENIED);
                AccessDecision::Refused(status)
            }
            AuthorizationStatus::Restricted => {
                self.console.line(report::RESTRICTED);
                AccessDecision::Refused(status)
            }
            AuthorizationStatus::Unknown(_) => {
                self.console.line(report::UNKNOWN);
                AccessDecision::Refused(status)
            }
        }
    }

    /// Returns true iff the process may use the camera.
    pub fn ensure_camera_access(&mut self) -> bool {
        self.decide().is_granted()
    }

    /// Opens a session on the default device, holds it for the dwell time
    /// and stops it.
    pub fn verify_session(&mut self) -> Result<(), AccessError> {
        self.console.line(report::ACCESSING);

        let Some(device) = self.backend.default_video_device() else {
            tracing::warn!("No default video capture device");
            self.console.line(report::NO_DEVICE);
            return Err(AccessError::DeviceUnavailable);
        };
        tracing::info!(device = %device.name(), "Using default video device");

        match self.hold_session(&device) {
            Ok(()) => {
                self.console.line(report::SESSION_STOPPED);
                Ok(())
            }
            Err(AccessError::Session(e)) => {
                tracing::error!(error = %e, "Capture session failed");
                self.console.line(format!("{} {}", report::SESSION_FAILED, e));
                Err(AccessError::Session(e))
            }
            Err(e) => {
                self.console.line(report::INTERRUPTED);
                Err(e)
            }
        }
    }

    fn hold_session(&mut self, device: &B::Device) -> Result<(), AccessError> {
        let _armed = self.interrupt.arm();
        let session = self.backend.open_session(device)?;
        let running = RunningSession::start(session)?;
        self.console.line(report::SESSION_STARTED);

        tracing::debug!(dwell_ms = self.dwell.as_millis() as u64, "Holding session open");
        hold_for(self.dwell, &self.interrupt)?;

        if !running.is_running() {
            return Err(CaptureError::SessionStopped.into());
        }
        running.stop();
        Ok(())
    }

    /// Runs the whole flow: decide, then verify or print remediation.
    pub fn run(&mut self) -> Result<(), AccessError> {
        match self.decide() {
            AccessDecision::Granted => self.verify_session(),
            AccessDecision::Refused(status) => {
                tracing::warn!(%status, "Camera access not granted");
                self.console.remediation();
                Err(AccessError::refused(status))
            }
        }
    }

    /// Consumes the gate and returns the status-line writer.
    pub fn into_output(self) -> W {
        self.console.into_inner()
    }
}

fn hold_for(period: Duration, interrupt: &Interrupt) -> Result<(), AccessError> {
    let deadline = Instant::now() + period;
    loop {
        if interrupt.is_raised() {
            return Err(AccessError::Interrupted);
        }
        let now = Instant::now();
        if now >= deadline {
            return Ok(());
        }
        thread::sleep((deadline - now).min(DWELL_POLL));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authorization::MockPermissions;
    use crate::capture::{MockBackend, MockFault};
    use proptest::prelude::*;

    const STATE_LINES: [&str; 5] = [
        report::AUTHORIZED,
        report::NOT_DETERMINED,
        report::DENIED,
        report::RESTRICTED,
        report::UNKNOWN,
    ];

    fn run_gate(
        permissions: &MockPermissions,
        backend: &MockBackend,
    ) -> (Result<(), AccessError>, String) {
        let mut gate =
            CameraAccessGate::new(permissions, backend, Vec::new()).with_dwell(Duration::ZERO);
        let result = gate.run();
        let output = String::from_utf8(gate.into_output()).unwrap();
        (result, output)
    }

    fn remediation_text() -> String {
        report::REMEDIATION.join("\n")
    }

    #[test]
    fn test_default_dwell_is_two_seconds() {
        let permissions = MockPermissions::new(AuthorizationStatus::Authorized);
        let gate = CameraAccessGate::new(&permissions, MockBackend::new(), Vec::new());
        assert_eq!(gate.dwell, Duration::from_secs(2));
    }

    #[test]
    fn test_authorized_session_succeeds() {
        let permissions = MockPermissions::new(AuthorizationStatus::Authorized);
        let backend = MockBackend::new();
        let (result, output) = run_gate(&permissions, &backend);

        assert!(result.is_ok());
        assert!(output.contains("Camera access is authorized.\n"));
        assert!(output.contains("Camera session started.\n"));
        assert!(!output.contains(REMEDIATION_HEAD));
        assert_eq!(permissions.requests(), 0);
        assert_eq!(backend.starts(), 1);
        assert_eq!(backend.stops(), 1);
    }

    const REMEDIATION_HEAD: &str = "Camera access was not granted.";

    #[test]
    fn test_denied_prints_remediation() {
        let permissions = MockPermissions::new(AuthorizationStatus::Denied);
        let backend = MockBackend::new();
        let (result, output) = run_gate(&permissions, &backend);

        let err = result.unwrap_err();
        assert!(matches!(err, AccessError::PermissionDenied(AuthorizationStatus::Denied)));
        assert_eq!(err.exit_code(), 1);
        assert!(output.contains(&remediation_text()));
        assert_eq!(permissions.requests(), 0);
        assert_eq!(backend.lookups(), 0);
    }

    #[test]
    fn test_prompt_granted_proceeds_like_authorized() {
        let permissions = MockPermissions::prompting(true);
        let backend = MockBackend::new();
        let (result, output) = run_gate(&permissions, &backend);

        assert!(result.is_ok());
        assert_eq!(permissions.requests(), 1);
        let granted = output.find("Camera access granted.").unwrap();
        let started = output.find("Camera session started.").unwrap();
        assert!(granted < started);
        assert_eq!(backend.stops(), 1);
    }

    #[test]
    fn test_prompt_denied_proceeds_like_denied() {
        let permissions = MockPermissions::prompting(false);
        let backend = MockBackend::new();
        let (result, output) = run_gate(&permissions, &backend);

        assert!(matches!(
            result,
            Err(AccessError::PermissionDenied(AuthorizationStatus::Denied))
        ));
        assert!(output.contains("Camera access denied.\n"));
        assert!(output.contains(&remediation_text()));
        assert_eq!(backend.lookups(), 0);
    }

    #[test]
    fn test_no_device_skips_session() {
        let permissions = MockPermissions::new(AuthorizationStatus::Authorized);
        let backend = MockBackend::with_fault(MockFault::NoDevice);
        let (result, output) = run_gate(&permissions, &backend);

        assert!(matches!(result, Err(AccessError::DeviceUnavailable)));
        assert!(output.contains("No camera device found.\n"));
        assert!(!output.contains("session"));
        assert!(!output.contains(REMEDIATION_HEAD));
        assert_eq!(backend.sessions(), 0);
    }

    #[test]
    fn test_restricted_prints_remediation() {
        let permissions = MockPermissions::new(AuthorizationStatus::Restricted);
        let backend = MockBackend::new();
        let (result, output) = run_gate(&permissions, &backend);

        assert_eq!(result.unwrap_err().exit_code(), 1);
        assert!(output.contains("Camera access is restricted.\n"));
        assert!(output.contains(&remediation_text()));
    }

    #[test]
    fn test_unknown_is_treated_as_refusal() {
        let permissions = MockPermissions::new(AuthorizationStatus::Unknown(42));
        let backend = MockBackend::new();
        let (result, output) = run_gate(&permissions, &backend);

        assert!(matches!(result, Err(AccessError::PermissionUnknown(_))));
        assert!(output.contains("Unknown camera access status.\n"));
        assert!(output.contains(&remediation_text()));
    }

    #[test]
    fn test_input_failure_is_reported() {
        let permissions = MockPermissions::new(AuthorizationStatus::Authorized);
        let backend = MockBackend::with_fault(MockFault::InputFails);
        let (result, output) = run_gate(&permissions, &backend);

        assert!(matches!(
            result,
            Err(AccessError::Session(CaptureError::DeviceInput(_)))
        ));
        assert!(output.contains(
            "Failed to start camera session: failed to create capture input: mock device is busy\n"
        ));
        assert!(!output.contains(REMEDIATION_HEAD));
        assert_eq!(backend.starts(), 0);
    }

    #[test]
    fn test_start_failure_still_stops_session() {
        let permissions = MockPermissions::new(AuthorizationStatus::Authorized);
        let backend = MockBackend::with_fault(MockFault::StartFails);
        let (result, output) = run_gate(&permissions, &backend);

        assert!(matches!(
            result,
            Err(AccessError::Session(CaptureError::SessionStart(_)))
        ));
        assert!(!output.contains("Camera session started."));
        assert_eq!(backend.stops(), 1);
    }

    #[test]
    fn test_failure_after_start_still_stops_session() {
        let permissions = MockPermissions::new(AuthorizationStatus::Authorized);
        let backend = MockBackend::with_fault(MockFault::DiesAfterStart);
        let (result, output) = run_gate(&permissions, &backend);

        assert!(matches!(
            result,
            Err(AccessError::Session(CaptureError::SessionStopped))
        ));
        assert!(output.contains("Camera session started.\n"));
        assert!(output.contains("Failed to start camera session: capture session stopped unexpectedly\n"));
        assert_eq!(backend.starts(), 1);
        assert_eq!(backend.stops(), 1);
    }

    #[test]
    fn test_interrupt_during_dwell_stops_session() {
        let permissions = MockPermissions::new(AuthorizationStatus::Authorized);
        let backend = MockBackend::new();
        let interrupt = Interrupt::new();

        let handler = interrupt.clone();
        let signaller = thread::spawn(move || {
            while !handler.is_armed() {
                thread::sleep(Duration::from_millis(1));
            }
            handler.raise();
        });

        let mut gate = CameraAccessGate::new(&permissions, &backend, Vec::new())
            .with_interrupt(interrupt.clone())
            .with_dwell(Duration::from_secs(30));
        let result = gate.run();
        signaller.join().unwrap();

        assert!(matches!(result, Err(AccessError::Interrupted)));
        let output = String::from_utf8(gate.into_output()).unwrap();
        assert!(output.contains("Camera session interrupted.\n"));
        assert_eq!(backend.stops(), 1);
        assert!(!interrupt.is_armed());
    }

    #[test]
    fn test_ensure_camera_access_reports_decision() {
        let permissions = MockPermissions::new(AuthorizationStatus::Authorized);
        let mut gate = CameraAccessGate::new(&permissions, MockBackend::new(), Vec::new());
        assert!(gate.ensure_camera_access());

        let permissions = MockPermissions::new(AuthorizationStatus::Restricted);
        let mut gate = CameraAccessGate::new(&permissions, MockBackend::new(), Vec::new());
        assert!(!gate.ensure_camera_access());
    }

    proptest! {
        #[test]
        fn prop_prompt_only_when_undetermined(raw in -3i64..8, grant in any::<bool>()) {
            let status = AuthorizationStatus::from_raw(raw);
            let permissions = MockPermissions::new(status);
            let permissions = if status.is_undetermined() {
                MockPermissions::prompting(grant)
            } else {
                permissions
            };
            let backend = MockBackend::new();
            let (result, output) = run_gate(&permissions, &backend);

            let expected_requests = u32::from(status.is_undetermined());
            prop_assert_eq!(permissions.requests(), expected_requests);

            let state_lines = STATE_LINES
                .iter()
                .map(|line| output.matches(line).count())
                .sum::<usize>();
            prop_assert_eq!(state_lines, 1);

            let granted = status == AuthorizationStatus::Authorized
                || (status.is_undetermined() && grant);
            prop_assert_eq!(result.is_ok(), granted);
            prop_assert_eq!(backend.starts(), backend.stops());
        }
    }
}
