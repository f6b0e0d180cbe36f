//! nokhwa capture backend for platforms without a permission gate.

use crate::capture::{CaptureBackend, CaptureDevice, CaptureError, CaptureSession};
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{ApiBackend, CameraInfo, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;

/// First camera reported by the native API.
#[derive(Debug, Clone)]
pub struct NokhwaDevice {
    info: CameraInfo,
}

impl CaptureDevice for NokhwaDevice {
    fn name(&self) -> String {
        self.info.human_name()
    }
}

/// An opened nokhwa camera whose stream acts as the session.
pub struct NokhwaSession {
    camera: Camera,
}

impl CaptureSession for NokhwaSession {
    fn start(&mut self) -> Result<(), CaptureError> {
        self.camera
            .open_stream()
            .map_err(|e| CaptureError::SessionStart(e.to_string()))
    }

    fn is_running(&self) -> bool {
        self.camera.is_stream_open()
    }

    fn stop(&mut self) {
        if !self.camera.is_stream_open() {
            return;
        }
        if let Err(e) = self.camera.stop_stream() {
            tracing::warn!(error = %e, "Failed to stop camera stream");
        }
    }
}

/// Capture backend using nokhwa's native input.
#[derive(Debug, Default, Clone, Copy)]
pub struct NokhwaBackend;

impl CaptureBackend for NokhwaBackend {
    type Device = NokhwaDevice;
    type Session = NokhwaSession;

    fn default_video_device(&self) -> Option<NokhwaDevice> {
        match nokhwa::query(ApiBackend::Auto) {
            Ok(devices) => devices.into_iter().next().map(|info| NokhwaDevice { info }),
            Err(e) => {
                tracing::warn!(error = %e, "Camera discovery failed");
                None
            }
        }
    }

    fn open_session(&self, device: &NokhwaDevice) -> Result<NokhwaSession, CaptureError> {
        let format = RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
        let camera = Camera::new(device.info.index().clone(), format)
            .map_err(|e| CaptureError::DeviceInput(e.to_string()))?;
        Ok(NokhwaSession { camera })
    }
}
