use std::io::Write;

use anyhow::Result;

use crate::job::JobResult;

/// How finished jobs are printed.
///
/// `ValueEnum` lets the CLI take this directly as a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ReportFormat {
    /// Tool output followed by a one-line verdict.
    #[default]
    Text,

    /// One JSON object per job, one per line.
    Json,
}

/// Write a single job's result to `w`.
pub fn write_report<W: Write>(w: &mut W, result: &JobResult, format: ReportFormat) -> Result<()> {
    match format {
        ReportFormat::Text => {
            w.write_all(result.stdout.as_bytes())?;
            if result.success {
                writeln!(
                    w,
                    "Processed {} -> {}",
                    result.input_file_name, result.output_file_path
                )?;
            } else {
                writeln!(
                    w,
                    "Error processing {}: {}",
                    result.input_file_name,
                    result.error.trim_end()
                )?;
            }
        }
        ReportFormat::Json => {
            serde_json::to_writer(&mut *w, result)?;
            writeln!(w)?;
        }
    }
    Ok(())
}
