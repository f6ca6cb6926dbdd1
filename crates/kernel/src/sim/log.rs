//! Execution log and sinks.
//!
//! The engine appends structured [`LogEntry`] records; text is produced only when the
//! finished [`ExecutionLog`] is handed to a [`LogSink`]. Every rendered line has the form
//! `"<timestamp>, <duration>, <description>"` and is newline-terminated.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::common::{Result, SimError};

/// One step of simulated work.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    /// Clock value before the step's cost is applied.
    pub timestamp: u64,
    /// Cost of the step in ms.
    pub duration: u64,
    /// Human-readable description.
    pub description: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.timestamp, self.duration, self.description)
    }
}

/// Append-only sequence of log entries in emission order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecutionLog {
    entries: Vec<LogEntry>,
}

impl ExecutionLog {
    /// Creates an empty log.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an entry.
    pub fn push(&mut self, timestamp: u64, duration: u64, description: impl Into<String>) {
        self.entries.push(LogEntry {
            timestamp,
            duration,
            description: description.into(),
        });
    }

    /// All entries in emission order.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Number of entries.
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been logged.
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Costs of every entry, in order.
    pub fn durations(&self) -> Vec<u64> {
        self.entries.iter().map(|e| e.duration).collect()
    }

    /// Renders the whole log as text, one newline-terminated line per entry.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ExecutionLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}

/// Destination for a finished execution log.
pub trait LogSink {
    /// Writes the complete log. Called once per run, after the trace is consumed.
    fn write_log(&mut self, log: &ExecutionLog) -> Result<()>;
}

/// Writes the log to a file, replacing any previous contents.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Creates a sink for `path`. Nothing is written until [`LogSink::write_log`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Destination path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for FileSink {
    fn write_log(&mut self, log: &ExecutionLog) -> Result<()> {
        fs::write(&self.path, log.render()).map_err(|e| SimError::io(&self.path, e))?;
        tracing::info!(path = %self.path.display(), entries = log.len(), "wrote execution log");
        Ok(())
    }
}

/// Writes the log to any [`Write`] implementor (stdout, a buffer, a socket).
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    /// Wraps a writer.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> LogSink for WriterSink<W> {
    fn write_log(&mut self, log: &ExecutionLog) -> Result<()> {
        self.writer
            .write_all(log.render().as_bytes())
            .and_then(|()| self.writer.flush())
            .map_err(|e| SimError::io("<writer>", e))
    }
}
