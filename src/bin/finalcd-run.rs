use anyhow::{Result, bail};
use clap::Parser;

use std::io::{self, Write};
use std::path::PathBuf;

use finalcd::flags::ToolFlags;
use finalcd::report::{ReportFormat, write_report};
use finalcd::{JobRequest, Opts, Runner, ToolLocation, default_output_directory};

fn main() -> Result<()> {
    finalcd::init_logging();
    let params = get_params()?;

    let mut opts = Opts::default();
    if let Some(tool) = &params.tool_path {
        opts.tool = ToolLocation::Explicit(tool.clone());
    }
    if !params.accepted_extensions.is_empty() {
        opts.accepted_extensions = params.accepted_extensions.clone();
    }
    let runner = Runner::new(opts);

    let output_dir = match &params.output_dir {
        Some(dir) => dir.to_string_lossy().into_owned(),
        None => default_output_directory(&params.inputs[0])
            .to_string_lossy()
            .into_owned(),
    };

    let mut options = params.flags().to_options();
    options.extend(params.raw_options.iter().cloned());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failures = 0usize;

    for input in &params.inputs {
        let request = JobRequest::new(input, output_dir.as_str(), options.clone());
        if params.format == ReportFormat::Text {
            writeln!(out, "Processing {}...", request.input_file_name())?;
            writeln!(out, "{}", runner.preview(&request)?)?;
            out.flush()?;
        }

        let result = runner.run(&request);
        if !result.success {
            failures += 1;
        }
        write_report(&mut out, &result, params.format)?;
    }
    out.flush()?;

    if failures > 0 {
        bail!("{failures} of {} job(s) failed", params.inputs.len());
    }
    Ok(())
}

#[derive(Parser, Debug)]
#[command(name = "finalcd-run")]
#[command(about = "Run FinalCD over one or more WAV files")]
struct Params {
    /// Input WAV files, processed in order.
    #[arg(required = true, num_args = 1..)]
    pub inputs: Vec<String>,

    /// Output directory (created if missing). Defaults to `finalcd_output` next to the first input.
    #[arg(short = 'o', long = "output-dir")]
    pub output_dir: Option<PathBuf>,

    /// Path to the FinalCD executable. Defaults to the one next to this program.
    #[arg(long = "tool")]
    pub tool_path: Option<PathBuf>,

    /// Accepted input extension; repeat to accept several. Defaults to `wav`.
    #[arg(long = "accept-ext")]
    pub accepted_extensions: Vec<String>,

    /// Write 32-bit output.
    #[arg(long = "thirty-two-bit", default_value_t = false)]
    pub thirty_two_bit: bool,

    /// Filter switch passed to the tool as-is.
    #[arg(long = "filter", allow_hyphen_values = true)]
    pub filter: Option<String>,

    /// Dither switch passed to the tool as-is.
    #[arg(long = "dither", allow_hyphen_values = true)]
    pub dither: Option<String>,

    /// Output gain.
    #[arg(short = 'g', long = "gain", default_value_t = 1.0)]
    pub gain: f32,

    #[arg(long = "format", value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Extra tool options, after `--`.
    #[arg(last = true)]
    pub raw_options: Vec<String>,
}

impl Params {
    fn flags(&self) -> ToolFlags {
        ToolFlags {
            thirty_two_bit: self.thirty_two_bit,
            filter: self.filter.clone(),
            dither: self.dither.clone(),
            gain: self.gain,
        }
    }
}

fn get_params() -> Result<Params> {
    Ok(Params::parse())
}
