use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Error, Result};
use crate::opts::Opts;

/// Check a job's input file and output directory, creating the directory if needed.
///
/// Checks run in a fixed order and the first failure wins:
/// 1. the input path is non-empty
/// 2. the input exists
/// 3. its extension is in `opts.accepted_extensions` and it is a regular file
/// 4. the output directory is non-empty
/// 5. the output directory (and any missing parents) can be created
///
/// Only step 5 changes the filesystem, and it is idempotent.
pub fn validate_paths(input: &str, output_dir: &str, opts: &Opts) -> Result<()> {
    validate_input(input, opts)?;
    prepare_output_dir(output_dir)
}

fn validate_input(input: &str, opts: &Opts) -> Result<()> {
    if input.is_empty() {
        return Err(Error::EmptyInputPath);
    }

    let path = Path::new(input);
    // Only a definite "not found" counts as missing; anything else (permissions, a file
    // used as a directory) is reported once we know the extension is acceptable.
    let metadata = match fs::metadata(path) {
        Ok(metadata) => Ok(metadata),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(Error::InputNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(err) => Err(err),
    };

    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_default();
    if !opts.accepts_extension(&extension) {
        return Err(Error::UnsupportedInputType {
            path: path.to_path_buf(),
            reason: format!("extension '{extension}'"),
        });
    }

    let reason = match metadata {
        Ok(metadata) if metadata.is_file() => return Ok(()),
        Ok(_) => "not a regular file".to_owned(),
        Err(err) => format!("cannot read metadata: {err}"),
    };
    Err(Error::UnsupportedInputType {
        path: path.to_path_buf(),
        reason,
    })
}

fn prepare_output_dir(output_dir: &str) -> Result<()> {
    if output_dir.is_empty() {
        return Err(Error::EmptyOutputDirectory);
    }

    // Mode comes from the process umask, same as `mkdir -p`.
    fs::create_dir_all(output_dir).map_err(|source| Error::OutputDirectoryCreateFailed {
        path: output_dir.into(),
        source,
    })
}
