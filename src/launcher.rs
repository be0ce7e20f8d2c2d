//! Running the external tool as a child process.
//!
//! [`Launcher`] is the seam between the job runner and the operating system. The default
//! [`SystemLauncher`] spawns a real process; tests and embedders can swap in their own.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{Error, ExecutionFailure, Result};

#[cfg(not(windows))]
mod portable;
#[cfg(windows)]
mod windows;

#[cfg(not(windows))]
use portable::hide_window;
#[cfg(windows)]
use windows::hide_window;

/// Launch a program with captured standard output and no visible console window.
///
/// Implementations block until the program exits. There is no timeout and no way to cancel:
/// a program that never exits blocks the caller forever.
pub trait Launcher {
    /// Run `program` with `args` once.
    ///
    /// Whatever was captured from stdout is returned even when the run failed.
    fn run(&self, program: &Path, args: &[String]) -> Capture;
}

/// The outcome of a single [`Launcher::run`].
#[derive(Debug)]
pub struct Capture {
    /// Raw bytes the program wrote to stdout (possibly partial on failure).
    pub stdout: Vec<u8>,

    /// `Err(LaunchFailed)` if the program never started, `Err(ExecutionFailed)` if it did
    /// but exited non-zero or its output couldn't be drained.
    pub result: Result<()>,
}

impl Capture {
    pub fn success(stdout: Vec<u8>) -> Self {
        Self {
            stdout,
            result: Ok(()),
        }
    }

    pub fn failure(stdout: Vec<u8>, err: Error) -> Self {
        Self {
            stdout,
            result: Err(err),
        }
    }
}

/// Spawns real child processes via `std::process`.
///
/// stdin is closed, stdout is captured, and stderr goes wherever the host's stderr goes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn run(&self, program: &Path, args: &[String]) -> Capture {
        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        hide_window(&mut command);

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(source) => {
                return Capture::failure(
                    Vec::new(),
                    Error::LaunchFailed {
                        program: program.to_path_buf(),
                        source,
                    },
                );
            }
        };
        debug!(pid = child.id(), "tool started");

        // The pipe is dropped at the end of this block so a child still writing after a read
        // error gets EPIPE instead of blocking our `wait`.
        let mut stdout = Vec::new();
        let drained = match child.stdout.take() {
            Some(mut pipe) => pipe.read_to_end(&mut stdout).map(|_| ()),
            None => Ok(()),
        };
        let waited = child.wait();

        let result = match (drained, waited) {
            (Err(err), _) => Err(ExecutionFailure::Drain(err).into()),
            (Ok(()), Err(err)) => Err(ExecutionFailure::Wait(err).into()),
            (Ok(()), Ok(status)) if status.success() => Ok(()),
            (Ok(()), Ok(status)) => Err(ExecutionFailure::Status(status).into()),
        };
        debug!(bytes = stdout.len(), ok = result.is_ok(), "tool exited");

        Capture { stdout, result }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn sh(script: &str) -> Capture {
        SystemLauncher.run(Path::new("/bin/sh"), &["-c".to_owned(), script.to_owned()])
    }

    #[test]
    fn captures_stdout_verbatim() {
        let capture = sh("printf 'a\\rb\\r\\n'");
        assert!(capture.result.is_ok());
        assert_eq!(capture.stdout, b"a\rb\r\n");
    }

    #[test]
    fn stderr_is_not_captured() {
        let capture = sh("echo oops 1>&2");
        assert!(capture.result.is_ok());
        assert!(capture.stdout.is_empty());
    }

    #[test]
    fn non_zero_exit_keeps_partial_output() -> anyhow::Result<()> {
        let capture = sh("printf partial; exit 3");
        let err = capture
            .result
            .err()
            .ok_or_else(|| anyhow::anyhow!("exit 3 reported success"))?;
        assert_eq!(err.kind(), ErrorKind::ExecutionFailed);
        assert!(err.to_string().contains('3'), "{err}");
        assert_eq!(capture.stdout, b"partial");
        Ok(())
    }

    #[test]
    fn missing_program_fails_to_launch() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let capture = SystemLauncher.run(&dir.path().join("finalcd"), &[]);
        assert_eq!(
            capture.result.err().map(|err| err.kind()),
            Some(ErrorKind::LaunchFailed)
        );
        assert!(capture.stdout.is_empty());
        Ok(())
    }
}
