//! Trace Reader.
//!
//! This module turns a line-oriented trace into [`TraceRecord`]s. It provides:
//! 1. **Grammar:** `ACTIVITY ARG`, separated by a comma, whitespace, or both
//!    (`CPU, 50`, `SYSCALL 3`, `END_IO,7`).
//! 2. **Line Parsing:** Keyword and argument validation with 1-based line numbers.
//! 3. **Lazy Iteration:** A reader that yields one record per non-blank line.
//!
//! A malformed line is fatal. The reader yields the error and the engine aborts the run,
//! since every later timestamp would depend on the bad record.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use crate::common::{Result, SimError};

/// Kind of activity a trace record describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Activity {
    /// A CPU burst; the argument is its duration in ms.
    Cpu,
    /// A system call; the argument is the interrupt number.
    Syscall,
    /// A device completion; the argument is the device number.
    EndIo,
}

impl Activity {
    /// Parses a case-sensitive trace keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "CPU" => Some(Self::Cpu),
            "SYSCALL" => Some(Self::Syscall),
            "END_IO" => Some(Self::EndIo),
            _ => None,
        }
    }

    /// The trace keyword for this activity.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Cpu => "CPU",
            Self::Syscall => "SYSCALL",
            Self::EndIo => "END_IO",
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One trace line: an activity and its numeric argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// What happens.
    pub activity: Activity,
    /// Burst duration for `Cpu`, interrupt/device number otherwise.
    pub argument: u64,
}

impl TraceRecord {
    /// A CPU burst of `duration` ms.
    pub const fn cpu(duration: u64) -> Self {
        Self {
            activity: Activity::Cpu,
            argument: duration,
        }
    }

    /// A system call through vector `n`.
    pub const fn syscall(n: u64) -> Self {
        Self {
            activity: Activity::Syscall,
            argument: n,
        }
    }

    /// A completion interrupt from device `n`.
    pub const fn end_io(n: u64) -> Self {
        Self {
            activity: Activity::EndIo,
            argument: n,
        }
    }
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.activity, self.argument)
    }
}

/// Parses one non-blank trace line.
///
/// # Arguments
///
/// * `line` - Raw line text, without the trailing newline.
/// * `line_no` - 1-based line number used in error reports.
pub fn parse_line(line: &str, line_no: usize) -> Result<TraceRecord> {
    let mut tokens = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty());

    let keyword = tokens.next().unwrap_or_default();
    let activity = Activity::from_keyword(keyword).ok_or_else(|| SimError::UnknownActivity {
        line: line_no,
        activity: keyword.to_string(),
    })?;

    let raw = tokens.next().unwrap_or_default();
    let argument = raw.parse::<u64>().map_err(|_| SimError::InvalidArgument {
        line: line_no,
        value: raw.to_string(),
    })?;

    if let Some(extra) = tokens.next() {
        return Err(SimError::InvalidArgument {
            line: line_no,
            value: extra.to_string(),
        });
    }

    Ok(TraceRecord { activity, argument })
}

/// Lazy iterator over the records of a trace.
///
/// Blank lines are skipped. Each call to `next` reads at most up to the next record, so
/// the trace is never held in memory as a whole.
#[derive(Debug)]
pub struct TraceReader<R> {
    lines: Lines<R>,
    line_no: usize,
    source: Option<PathBuf>,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps any buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            source: None,
        }
    }

    /// Number of lines consumed so far.
    pub const fn line_no(&self) -> usize {
        self.line_no
    }
}

impl TraceReader<BufReader<File>> {
    /// Opens a trace file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| SimError::io(path, e))?;
        let mut reader = Self::new(BufReader::new(file));
        reader.source = Some(path.to_path_buf());
        Ok(reader)
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    let path = self
                        .source
                        .clone()
                        .unwrap_or_else(|| PathBuf::from("<reader>"));
                    return Some(Err(SimError::io(path, e)));
                }
            };
            self.line_no += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            return Some(parse_line(trimmed, self.line_no));
        }
    }
}
