//! # Dispatcher
//!
//! Routes decorated lines to their sinks:
//!
//! - every line goes to the console writer (stdout by default), colored by severity
//! - WARNING and ERROR lines are also appended to `warning_log.txt` / `error_log.txt`
//!
//! Files are opened, appended to, and closed on every write. Nothing is kept
//! open between calls.
//!
//! ## Failure policy
//!
//! Sink failures never reach the caller. A console or file error is reported
//! as a `tracing` diagnostic at DEBUG level and otherwise dropped; a missing
//! log directory therefore costs the file copy and nothing else.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use parking_lot::Mutex;
use tracing::debug;

use crate::decorate::format_timestamp;
use crate::error::{LogError, LogResult};
use crate::severity::Severity;

/// Prefix of the header written into an empty log file.
pub const FILE_HEADER_PREFIX: &str = "Log file created at: ";

/// Sink router. Not synchronized on its own; the facility holds it behind its mutex.
pub struct Dispatcher
{
    console: Box<dyn Write + Send>,
    ansi: bool,
    log_dir: PathBuf,
}

impl Dispatcher
{
    /// Dispatcher writing to `console`, with per-severity files under `log_dir`.
    #[must_use]
    pub fn new(console: Box<dyn Write + Send>, ansi: bool, log_dir: PathBuf) -> Self
    {
        Self { console, ansi, log_dir }
    }

    /// Where lines of `level` are mirrored on disk, if anywhere.
    #[must_use]
    pub fn file_path(&self, level: Severity) -> Option<PathBuf>
    {
        level.file_name().map(|name| self.log_dir.join(name))
    }

    /// Write `line` to every sink `level` routes to. Never fails.
    pub fn dispatch(&mut self, level: Severity, line: &str)
    {
        if let Err(err) = self.write_console(level, line) {
            debug!(error = %err, "console sink failed; line dropped");
        }

        if let Some(path) = self.file_path(level) {
            if let Err(err) = append_to_file(&path, line) {
                debug!(error = %err, path = %path.display(), "file sink unavailable; skipping");
            }
        }
    }

    fn write_console(&mut self, level: Severity, line: &str) -> LogResult<()>
    {
        self.console.write_all(console_line(level, line, self.ansi).as_bytes())?;
        self.console.flush()?;
        Ok(())
    }
}

/// In-memory console. Clones share one buffer, so a clone handed to a
/// facility can be read back through the original.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer
{
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer
{
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    #[must_use]
    pub fn contents(&self) -> String
    {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    /// Completed lines written so far, without their newlines.
    #[must_use]
    pub fn lines(&self) -> Vec<String>
    {
        self.contents().lines().map(str::to_string).collect()
    }

    /// Drop everything written so far.
    pub fn clear(&self)
    {
        self.bytes.lock().clear();
    }
}

impl Write for SharedBuffer
{
    fn write(&mut self, buf: &[u8]) -> io::Result<usize>
    {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()>
    {
        Ok(())
    }
}

/// The exact bytes the console receives for `line`, newline included.
#[must_use]
pub fn console_line(level: Severity, line: &str, ansi: bool) -> String
{
    match level.color() {
        Some(color) if ansi => format!("{}\n", color.paint(line)),
        _ => format!("{line}\n"),
    }
}

/// Append `line` to `path`, writing the creation header first if the file is empty.
///
/// ## Errors
///
/// Returns [`LogError::SinkUnavailable`] if the file can't be opened or written.
pub fn append_to_file(path: &Path, line: &str) -> LogResult<()>
{
    let unavailable = |source: io::Error| LogError::SinkUnavailable {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(unavailable)?;

    let mut chunk = String::with_capacity(line.len() + 48);
    if file.metadata().map_err(unavailable)?.len() == 0 {
        chunk.push_str(FILE_HEADER_PREFIX);
        chunk.push_str(&format_timestamp(&Local::now()));
        chunk.push('\n');
    }
    chunk.push_str(line);
    chunk.push('\n');

    file.write_all(chunk.as_bytes()).map_err(unavailable)
}
