//! High-level API for running FinalCD jobs.
//!
//! A job is one input WAV file turned into one output file by the external tool. The
//! [`Runner`] wires the pieces together:
//! validate paths → locate the tool → build argv → launch → normalize output.
//!
//! Every failure along the way ends up as data on the returned [`JobResult`]; nothing
//! here panics or returns `Err` to the caller.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

use crate::args::{build_args, command_line};
use crate::error::{ErrorKind, Result};
use crate::launcher::{Launcher, SystemLauncher};
use crate::normalize::normalize;
use crate::opts::Opts;
use crate::validate::validate_paths;

/// Name of the directory [`default_output_directory`] places next to the input.
pub const DEFAULT_OUTPUT_DIR_NAME: &str = "finalcd_output";

/// One unit of work, as handed over by a frontend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRequest {
    pub input_file_path: String,
    pub output_directory: String,
    /// Tool switches in order. Empty strings are allowed and ignored.
    pub options: Vec<String>,
}

impl JobRequest {
    pub fn new<I, S>(
        input_file_path: impl Into<String>,
        output_directory: impl Into<String>,
        options: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input_file_path: input_file_path.into(),
            output_directory: output_directory.into(),
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    /// Base name of the input file; the output keeps the same name.
    pub fn input_file_name(&self) -> String {
        Path::new(&self.input_file_path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// `output_directory` joined with the input's base name.
    pub fn output_file_path(&self) -> String {
        Path::new(&self.output_directory)
            .join(self.input_file_name())
            .to_string_lossy()
            .into_owned()
    }
}

/// What happened to a job.
///
/// Exactly one of `success` or a non-empty `error` holds. `stdout` carries the tool's
/// normalized output whenever it ran, including failed runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobResult {
    pub input_file_name: String,
    pub output_file_path: String,
    pub success: bool,
    pub stdout: String,
    pub error: String,
    pub error_kind: Option<ErrorKind>,
}

/// Runs jobs against the external tool.
///
/// Holds no per-job state, so one runner can serve many jobs, and jobs on different
/// threads don't interfere (each gets its own process and buffer).
#[derive(Debug, Clone, Default)]
pub struct Runner<L: Launcher = SystemLauncher> {
    opts: Opts,
    launcher: L,
}

impl Runner<SystemLauncher> {
    /// Create a runner that spawns real processes.
    pub fn new(opts: Opts) -> Self {
        Self::with_launcher(opts, SystemLauncher)
    }
}

impl<L: Launcher> Runner<L> {
    /// Create a runner using a custom launcher.
    pub fn with_launcher(opts: Opts, launcher: L) -> Self {
        Self { opts, launcher }
    }

    pub fn opts(&self) -> &Opts {
        &self.opts
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Run one job to completion.
    ///
    /// Blocks for as long as the tool runs.
    pub fn run(&self, request: &JobRequest) -> JobResult {
        let job_id = Uuid::new_v4();
        let span = info_span!("job", %job_id, input = %request.input_file_path);
        let _guard = span.enter();

        let mut result = JobResult {
            input_file_name: request.input_file_name(),
            output_file_path: request.output_file_path(),
            success: false,
            stdout: String::new(),
            error: String::new(),
            error_kind: None,
        };

        match self.execute(request, &result.output_file_path, &mut result.stdout) {
            Ok(()) => {
                result.success = true;
                info!(output = %result.output_file_path, "job finished");
            }
            Err(err) => {
                warn!(kind = %err.kind(), error = %err, "job failed");
                result.error = err.to_string();
                result.error_kind = Some(err.kind());
            }
        }
        result
    }

    /// Run several inputs into the same directory, one after another.
    ///
    /// A failed job doesn't stop the rest; results come back in input order.
    pub fn run_batch<S: AsRef<str>>(
        &self,
        inputs: &[S],
        output_directory: &str,
        options: &[String],
    ) -> Vec<JobResult> {
        inputs
            .iter()
            .map(|input| {
                let request = JobRequest::new(input.as_ref(), output_directory, options.to_vec());
                self.run(&request)
            })
            .collect()
    }

    /// The command line a job would run, for echoing before it starts.
    ///
    /// Doesn't validate anything or check that the tool exists.
    pub fn preview(&self, request: &JobRequest) -> Result<String> {
        let program = self.opts.tool.resolve()?;
        let args = build_args(
            &request.input_file_path,
            &request.output_file_path(),
            &request.options,
        );
        Ok(command_line(&program, &args))
    }

    fn execute(&self, request: &JobRequest, output_file_path: &str, stdout: &mut String) -> Result<()> {
        validate_paths(&request.input_file_path, &request.output_directory, &self.opts)?;

        let program = self.opts.tool.locate()?;
        let args = build_args(&request.input_file_path, output_file_path, &request.options);
        debug!(program = %program.display(), ?args, "launching tool");

        let capture = self.launcher.run(&program, &args);
        *stdout = normalize(&capture.stdout);
        capture.result
    }
}

/// Run one job with default options and a real process launcher.
pub fn run_job<S: Into<String>>(
    input_file_path: &str,
    output_directory: &str,
    options: impl IntoIterator<Item = S>,
) -> JobResult {
    let request = JobRequest::new(input_file_path, output_directory, options);
    Runner::new(Opts::default()).run(&request)
}

/// Where output goes when the user hasn't picked a directory: `finalcd_output` next to the input.
pub fn default_output_directory(input_file_path: impl AsRef<Path>) -> PathBuf {
    let dir = input_file_path
        .as_ref()
        .parent()
        .unwrap_or_else(|| Path::new(""));
    dir.join(DEFAULT_OUTPUT_DIR_NAME)
}
