use std::path::Path;

/// Build the argument vector for the external tool.
///
/// Empty options are dropped (frontends pass them for switches that are off), the rest keep
/// their order, and the input and output paths always come last.
pub fn build_args<S: AsRef<str>>(input: &str, output: &str, options: &[S]) -> Vec<String> {
    options
        .iter()
        .map(AsRef::as_ref)
        .filter(|option| !option.is_empty())
        .chain([input, output])
        .map(str::to_owned)
        .collect()
}

/// Render a command as a single shell-ish line, e.g. `> finalcd /32 in.wav out/in.wav`.
///
/// Display only; nothing is quoted.
pub fn command_line(program: &Path, args: &[String]) -> String {
    let name = program
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_else(|| program.to_string_lossy());

    let mut line = format!("> {name}");
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}
