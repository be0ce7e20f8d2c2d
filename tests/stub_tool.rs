//! Runs jobs against small shell scripts standing in for the real tool.
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use finalcd::flags::ToolFlags;
use finalcd::{ErrorKind, JobRequest, Opts, Runner, ToolLocation};

// Forking while another thread holds a freshly written script open makes exec fail with
// ETXTBSY, so script creation and execution take turns.
static SERIAL: Mutex<()> = Mutex::new(());

struct Workspace {
    _dir: tempfile::TempDir,
    root: PathBuf,
    input: PathBuf,
}

fn workspace() -> anyhow::Result<Workspace> {
    let dir = tempfile::tempdir()?;
    let root = dir.path().to_path_buf();
    let input = root.join("take1.wav");

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 48_000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&input, spec)?;
    for i in 0..480i16 {
        writer.write_sample(i)?;
    }
    writer.finalize()?;

    Ok(Workspace {
        _dir: dir,
        root,
        input,
    })
}

fn stub(dir: &Path, body: &str) -> anyhow::Result<Runner> {
    let path = dir.join("finalcd");
    fs::write(&path, format!("#!/bin/sh\n{body}\n"))?;
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
    Ok(Runner::new(Opts {
        tool: ToolLocation::Explicit(path),
        ..Opts::default()
    }))
}

fn request(ws: &Workspace, options: Vec<String>) -> JobRequest {
    JobRequest::new(
        ws.input.to_string_lossy(),
        ws.root.join("out").to_string_lossy(),
        options,
    )
}

#[test]
fn failing_tool_keeps_normalized_output() -> anyhow::Result<()> {
    let _serial = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let ws = workspace()?;
    let runner = stub(&ws.root, r"printf 'partial\r\ndone\r'; exit 1")?;

    let result = runner.run(&request(&ws, vec![]));

    assert!(!result.success);
    assert_eq!(result.error_kind, Some(ErrorKind::ExecutionFailed));
    assert!(!result.error.is_empty());
    assert_eq!(result.stdout, "partial\ndone\n");
    Ok(())
}

#[test]
fn silent_tool_succeeds() -> anyhow::Result<()> {
    let _serial = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let ws = workspace()?;
    let runner = stub(&ws.root, "exit 0")?;

    let result = runner.run(&request(&ws, vec![]));

    assert!(result.success, "{}", result.error);
    assert_eq!(result.stdout, "");
    assert_eq!(result.error, "");
    assert_eq!(result.error_kind, None);
    Ok(())
}

#[test]
fn tool_receives_options_then_paths() -> anyhow::Result<()> {
    let _serial = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let ws = workspace()?;
    let script = r#"
while [ $# -gt 2 ]; do echo "opt $1"; shift; done
cp "$1" "$2" || exit 2
printf ' 50%%\r100%%\r\n'
"#;
    let runner = stub(&ws.root, script)?;
    let flags = ToolFlags {
        thirty_two_bit: true,
        gain: 0.5,
        ..ToolFlags::default()
    };

    let result = runner.run(&request(&ws, flags.to_options()));

    assert!(result.success, "{}", result.error);
    assert_eq!(result.stdout, "opt /32\nopt /x0.5\n100%\n");

    let written = PathBuf::from(&result.output_file_path);
    assert_eq!(written, ws.root.join("out").join("take1.wav"));
    let reader = hound::WavReader::open(&written)?;
    assert_eq!(reader.spec().sample_rate, 48_000);
    assert_eq!(reader.len(), 480);
    Ok(())
}

#[test]
fn non_executable_tool_fails_to_launch() -> anyhow::Result<()> {
    let _serial = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let ws = workspace()?;
    let path = ws.root.join("finalcd");
    fs::write(&path, "#!/bin/sh\nexit 0\n")?;
    fs::set_permissions(&path, fs::Permissions::from_mode(0o644))?;
    let runner = Runner::new(Opts {
        tool: ToolLocation::Explicit(path),
        ..Opts::default()
    });

    let result = runner.run(&request(&ws, vec![]));

    assert!(!result.success);
    assert_eq!(result.error_kind, Some(ErrorKind::LaunchFailed));
    assert!(result.stdout.is_empty());
    Ok(())
}

#[test]
fn batch_continues_past_failures() -> anyhow::Result<()> {
    let _serial = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let ws = workspace()?;
    let runner = stub(&ws.root, "echo ok")?;
    let inputs = [
        ws.root.join("nope.wav").to_string_lossy().into_owned(),
        ws.input.to_string_lossy().into_owned(),
    ];
    let out = ws.root.join("batch").to_string_lossy().into_owned();

    let results = runner.run_batch(&inputs, &out, &[String::new()]);

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].error_kind, Some(ErrorKind::InputNotFound));
    assert!(results[1].success);
    assert_eq!(results[1].stdout, "ok\n");
    Ok(())
}

#[test]
fn directory_input_is_rejected_before_launch() -> anyhow::Result<()> {
    let _serial = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let ws = workspace()?;
    let album = ws.root.join("album.wav");
    fs::create_dir(&album)?;
    let runner = stub(&ws.root, r#"echo "ran $@""#)?;

    let result = runner.run(&JobRequest::new(
        album.to_string_lossy(),
        ws.root.join("o").to_string_lossy(),
        Vec::<String>::new(),
    ));

    assert!(!result.success);
    assert_eq!(result.error_kind, Some(ErrorKind::UnsupportedInputType));
    assert!(result.stdout.is_empty(), "tool ran: {}", result.stdout);
    Ok(())
}
