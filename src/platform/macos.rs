//! AVFoundation permission and capture backend.

#![allow(unsafe_code)]

use crate::authorization::{AuthorizationStatus, PermissionProvider};
use crate::capture::{CaptureBackend, CaptureDevice, CaptureError, CaptureSession};
use block2::RcBlock;
use objc2::rc::Retained;
use objc2::runtime::Bool;
use objc2_av_foundation::{
    AVCaptureDevice, AVCaptureDeviceInput, AVCaptureSession, AVMediaType, AVMediaTypeVideo,
};

fn video() -> Option<&'static AVMediaType> {
    // SAFETY: immutable framework constant.
    unsafe { AVMediaTypeVideo }
}

/// Reads and requests camera authorization through `AVCaptureDevice`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AvFoundationPermissions;

impl PermissionProvider for AvFoundationPermissions {
    fn status(&self) -> AuthorizationStatus {
        let Some(media) = video() else {
            tracing::warn!("AVMediaTypeVideo is unavailable");
            return AuthorizationStatus::Unknown(-1);
        };
        let status = unsafe { AVCaptureDevice::authorizationStatusForMediaType(media) };
        AuthorizationStatus::from_raw(status.0 as i64)
    }

    fn request_access(&self) -> bool {
        let Some(media) = video() else {
            return false;
        };

        // The completion handler runs on an arbitrary queue; block here
        // until it reports.
        let (tx, rx) = flume::bounded(1);
        let handler = RcBlock::new(move |granted: Bool| {
            let _ = tx.send(granted.as_bool());
        });
        unsafe {
            AVCaptureDevice::requestAccessForMediaType_completionHandler(media, &handler);
        }

        match rx.recv() {
            Ok(granted) => granted,
            Err(e) => {
                tracing::error!(error = %e, "Consent handler released without answering");
                false
            }
        }
    }
}

/// Default video device.
#[derive(Debug)]
pub struct AvDevice {
    device: Retained<AVCaptureDevice>,
}

impl CaptureDevice for AvDevice {
    fn name(&self) -> String {
        unsafe { self.device.localizedName() }.to_string()
    }
}

/// `AVCaptureSession` with one device input.
#[derive(Debug)]
pub struct AvSession {
    session: Retained<AVCaptureSession>,
}

impl CaptureSession for AvSession {
    fn start(&mut self) -> Result<(), CaptureError> {
        // startRunning blocks until the session is running or has failed;
        // failure shows up as is_running() == false.
        unsafe { self.session.startRunning() };
        Ok(())
    }

    fn is_running(&self) -> bool {
        unsafe { self.session.isRunning() }
    }

    fn stop(&mut self) {
        if self.is_running() {
            unsafe { self.session.stopRunning() };
        }
    }
}

/// Capture backend built on `AVCaptureSession`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AvFoundationBackend;

impl CaptureBackend for AvFoundationBackend {
    type Device = AvDevice;
    type Session = AvSession;

    fn default_video_device(&self) -> Option<AvDevice> {
        let media = video()?;
        let device = unsafe { AVCaptureDevice::defaultDeviceWithMediaType(media) }?;
        Some(AvDevice { device })
    }

    fn open_session(&self, device: &AvDevice) -> Result<AvSession, CaptureError> {
        let input = unsafe { AVCaptureDeviceInput::deviceInputWithDevice_error(&device.device) }
            .map_err(|e| {
                CaptureError::DeviceInput(unsafe { e.localizedDescription() }.to_string())
            })?;

        let session = unsafe { AVCaptureSession::new() };
        if !unsafe { session.canAddInput(&input) } {
            return Err(CaptureError::SessionConfiguration(
                "session rejected the device input".into(),
            ));
        }
        unsafe { session.addInput(&input) };

        Ok(AvSession { session })
    }
}
