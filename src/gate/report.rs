//! Human-readable status lines written to standard output.

use std::fmt::Display;
use std::io::Write;

pub const AUTHORIZED: &str = "Camera access is authorized.";
pub const NOT_DETERMINED: &str = "Camera access is not determined. Requesting access...";
pub const GRANTED: &str = "Camera access granted.";
pub const PROMPT_DENIED: &str = "Camera access denied.";
pub const DENIED: &str = "Camera access is denied. Please enable it in System Settings.";
pub const RESTRICTED: &str = "Camera access is restricted.";
pub const UNKNOWN: &str = "Unknown camera access status.";
pub const ACCESSING: &str = "Accessing the camera...";
pub const NO_DEVICE: &str = "No camera device found.";
pub const SESSION_STARTED: &str = "Camera session started.";
pub const SESSION_STOPPED: &str = "Camera session stopped.";
pub const SESSION_FAILED: &str = "Failed to start camera session:";
pub const INTERRUPTED: &str = "Camera session interrupted.";

/// Printed whenever camera access ends up refused.
pub const REMEDIATION: [&str; 6] = [
    "Camera access was not granted.",
    "To manually enable camera access:",
    "1. Open 'System Settings' (or 'System Preferences' on older macOS versions).",
    "2. Go to 'Privacy & Security' > 'Camera'.",
    "3. Find your terminal application (e.g., Terminal, iTerm).",
    "4. Ensure the checkbox next to your terminal application is checked.",
];

/// Line-oriented writer for status text.
///
/// Write failures are logged and otherwise ignored; the exit status is the
/// authoritative result.
#[derive(Debug)]
pub struct Console<W: Write> {
    out: W,
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Writes one status line.
    pub fn line(&mut self, text: impl Display) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            tracing::warn!(error = %e, "Failed to write status line");
        }
    }

    /// Writes the manual remediation guide.
    pub fn remediation(&mut self) {
        for text in REMEDIATION {
            self.line(text);
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}
