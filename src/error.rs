use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// The crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while running a single job.
///
/// None of these are fatal: [`crate::job::Runner::run`] turns every variant into the
/// `error` field of a [`crate::job::JobResult`], so nothing here ever crosses the
/// library boundary as a panic.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Input file path is empty")]
    EmptyInputPath,

    #[error("Input file does not exist: '{}'", path.display())]
    InputNotFound { path: PathBuf },

    #[error("Input file is not a supported type ({reason}): '{}'", path.display())]
    UnsupportedInputType { path: PathBuf, reason: String },

    #[error("No output directory selected")]
    EmptyOutputDirectory,

    #[error("Failed to create output directory '{}': {source}", path.display())]
    OutputDirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} not found", path.display())]
    ToolNotFound {
        path: PathBuf,
        #[source]
        source: Option<io::Error>,
    },

    #[error("Failed to launch '{}': {source}", program.display())]
    LaunchFailed {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to run command: {0}")]
    ExecutionFailed(#[from] ExecutionFailure),
}

/// Why a child process that did start is still considered a failed run.
#[derive(Debug, Error)]
pub enum ExecutionFailure {
    #[error("{0}")]
    Status(ExitStatus),

    #[error("failed reading tool output: {0}")]
    Drain(#[source] io::Error),

    #[error("failed waiting for tool to exit: {0}")]
    Wait(#[source] io::Error),
}

/// A field-less discriminant for [`Error`], handy for matching without string compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    EmptyInputPath,
    InputNotFound,
    UnsupportedInputType,
    EmptyOutputDirectory,
    OutputDirectoryCreateFailed,
    ToolNotFound,
    LaunchFailed,
    ExecutionFailed,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyInputPath => ErrorKind::EmptyInputPath,
            Self::InputNotFound { .. } => ErrorKind::InputNotFound,
            Self::UnsupportedInputType { .. } => ErrorKind::UnsupportedInputType,
            Self::EmptyOutputDirectory => ErrorKind::EmptyOutputDirectory,
            Self::OutputDirectoryCreateFailed { .. } => ErrorKind::OutputDirectoryCreateFailed,
            Self::ToolNotFound { .. } => ErrorKind::ToolNotFound,
            Self::LaunchFailed { .. } => ErrorKind::LaunchFailed,
            Self::ExecutionFailed(_) => ErrorKind::ExecutionFailed,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::EmptyInputPath => "empty input path",
            Self::InputNotFound => "input not found",
            Self::UnsupportedInputType => "unsupported input type",
            Self::EmptyOutputDirectory => "empty output directory",
            Self::OutputDirectoryCreateFailed => "output directory create failed",
            Self::ToolNotFound => "tool not found",
            Self::LaunchFailed => "launch failed",
            Self::ExecutionFailed => "execution failed",
        };
        f.write_str(name)
    }
}
