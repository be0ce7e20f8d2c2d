//! `finalcd` — a thin job runner around the FinalCD command-line tool.
//!
//! This crate provides:
//! - Input/output path validation
//! - Argument construction for the tool
//! - Child-process launching with captured stdout and no console window
//! - Cleanup of carriage-return progress output
//!
//! The audio processing itself happens inside the external tool; we only drive it and
//! report what happened. Frontends (GUI or CLI) call [`run_job`] or a [`Runner`].

// High-level API (most consumers should start here).
pub mod job;
pub mod opts;

// Crate-wide error taxonomy.
pub mod error;

// Job steps, usable on their own.
pub mod args;
pub mod flags;
pub mod launcher;
pub mod normalize;
pub mod validate;

// Rendering results for people or scripts.
pub mod report;

// Logging configuration.
#[cfg(feature = "logging")]
pub mod logging;

pub use error::{Error, ErrorKind, Result};
pub use job::{JobRequest, JobResult, Runner, default_output_directory, run_job};
pub use launcher::{Capture, Launcher, SystemLauncher};
pub use opts::{Opts, ToolLocation};

#[cfg(feature = "logging")]
pub use logging::init as init_logging;
