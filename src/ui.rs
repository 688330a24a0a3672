//! User-facing progress output

use std::io::Write;

/// Print a progress line to stdout and flush it.
///
/// Subprocesses inherit the same terminal, so the line has to be out before
/// the child starts writing.
pub fn say(message: impl AsRef<str>) {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let _ = writeln!(out, "{}", message.as_ref());
    let _ = out.flush();
}
