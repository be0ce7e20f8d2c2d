//! Clean up console output captured from a tool that draws progress with carriage returns.
//!
//! Progress bars rewrite the current line by emitting `\r` and printing again. Captured
//! verbatim that becomes one physical line full of overwritten fragments. We keep only
//! what a terminal would show once the line settles.

/// Collapse carriage-return overwrites so each line holds its final visible text.
///
/// - `\r\n` is treated as a plain newline.
/// - Within a line, only the text after the last `\r` survives. Trailing `\r`s return the
///   cursor without writing anything, so they don't clear what came before them.
/// - Every line in the result ends with exactly one `\n`; empty input stays empty.
///
/// Invalid UTF-8 is replaced rather than rejected; this function never fails.
pub fn normalize(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw).replace("\r\n", "\n");

    let mut out = String::with_capacity(text.len());
    for line in text.split_terminator('\n') {
        out.push_str(visible_text(line));
        out.push('\n');
    }
    out
}

fn visible_text(line: &str) -> &str {
    let line = line.trim_end_matches('\r');
    match line.rfind('\r') {
        Some(idx) => &line[idx + 1..],
        None => line,
    }
}
