use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Base name of the external tool, without the platform executable suffix.
pub const TOOL_BASE_NAME: &str = "finalcd";

/// Options that control how jobs are validated and where the tool is found.
///
/// This struct represents *library-level configuration*, not CLI flags directly.
/// The CLI (or a GUI frontend) maps user input into this type so the runner stays
/// reusable and can be constructed programmatically in tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Opts {
    /// File extensions accepted as job input, compared case-insensitively.
    ///
    /// A leading dot is tolerated, so `"wav"` and `".WAV"` mean the same thing.
    pub accepted_extensions: Vec<String>,

    /// Where the external tool lives.
    pub tool: ToolLocation,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            accepted_extensions: vec!["wav".to_owned()],
            tool: ToolLocation::default(),
        }
    }
}

impl Opts {
    /// Parse options from JSON. Missing fields fall back to their defaults.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Whether `extension` (with or without its leading dot) is in the accepted set.
    pub fn accepts_extension(&self, extension: &str) -> bool {
        let extension = extension.trim_start_matches('.');
        self.accepted_extensions
            .iter()
            .any(|accepted| accepted.trim_start_matches('.').eq_ignore_ascii_case(extension))
    }
}

/// How the external tool's path is determined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolLocation {
    /// A file named `file_name` in the same directory as the running program.
    ///
    /// Resolved again on every job, so moving the host binary between jobs is fine.
    BesideCurrentExe { file_name: String },

    /// A fixed path.
    Explicit(PathBuf),
}

impl Default for ToolLocation {
    fn default() -> Self {
        Self::BesideCurrentExe {
            file_name: format!("{TOOL_BASE_NAME}{}", std::env::consts::EXE_SUFFIX),
        }
    }
}

impl ToolLocation {
    /// Compute the expected tool path without touching it.
    pub fn resolve(&self) -> Result<PathBuf> {
        match self {
            Self::BesideCurrentExe { file_name } => {
                let exe = std::env::current_exe().map_err(|err| Error::ToolNotFound {
                    path: PathBuf::from(file_name),
                    source: Some(err),
                })?;
                let dir = exe.parent().unwrap_or_else(|| Path::new("."));
                Ok(dir.join(file_name))
            }
            Self::Explicit(path) => Ok(path.clone()),
        }
    }

    /// Resolve the tool path and make sure something is there.
    pub fn locate(&self) -> Result<PathBuf> {
        let path = self.resolve()?;
        match fs::metadata(&path) {
            Ok(_) => Ok(path),
            Err(err) => Err(Error::ToolNotFound {
                path,
                source: Some(err),
            }),
        }
    }
}
