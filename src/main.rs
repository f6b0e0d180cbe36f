//! Camera Access Gate CLI
//!
//! Checks camera permission, requests it if undetermined, and confirms
//! access with a short capture session. Exits 0 on confirmed access and 1
//! otherwise.

use camera_gate::{platform, CameraAccessGate, Interrupt, EXIT_SUCCESS};
use clap::Parser;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::filter::LevelFilter;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for status text
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(cli.log_level().into())
                .from_env_lossy(),
        )
        .init();

    info!("Camera Access Gate v{}", camera_gate::VERSION);

    let interrupt = match Interrupt::install() {
        Ok(interrupt) => interrupt,
        Err(e) => {
            warn!(error = %e, "Failed to install Ctrl-C handler");
            Interrupt::new()
        }
    };

    let (permissions, backend) = platform::system();
    let mut gate =
        CameraAccessGate::new(permissions, backend, std::io::stdout()).with_interrupt(interrupt);

    match gate.run() {
        Ok(()) => {
            info!("Camera access confirmed");
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            warn!(error = %e, "Camera access not confirmed");
            ExitCode::from(e.exit_code())
        }
    }
}
