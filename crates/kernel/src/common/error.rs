//! Simulator error definitions.
//!
//! Every error in this crate is fatal. The execution log is strictly cumulative, so a run
//! that hits any of these stops and its partial log is discarded. The taxonomy covers:
//! 1. **I/O:** Trace, table, configuration, or output files that cannot be read or written.
//! 2. **Configuration:** Malformed JSON, invalid layout values, and short vector tables.
//! 3. **Trace Data:** Unknown activity keywords, unparsable arguments, out-of-range devices.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal simulator errors.
#[derive(Debug, Error)]
pub enum SimError {
    /// A file could not be opened, read, or written.
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        /// Path of the file involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid JSON for [`Config`](crate::config::Config).
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A configuration value is outside its permitted range.
    #[error("invalid configuration value for `{field}`: {reason}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },

    /// A trace line starts with a keyword other than `CPU`, `SYSCALL`, or `END_IO`.
    #[error("trace line {line}: unknown activity '{activity}'")]
    UnknownActivity {
        /// 1-based trace line number.
        line: usize,
        /// The unrecognised keyword.
        activity: String,
    },

    /// A trace line's argument is missing, not a non-negative integer, or followed by junk.
    #[error("trace line {line}: invalid argument '{value}'")]
    InvalidArgument {
        /// 1-based trace line number.
        line: usize,
        /// The offending text (empty if the argument is missing).
        value: String,
    },

    /// A device table line is not a non-negative integer delay.
    #[error("device table line {line}: invalid delay '{value}'")]
    InvalidDelay {
        /// 1-based device table line number.
        line: usize,
        /// The offending text.
        value: String,
    },

    /// A record names a device beyond the device table.
    #[error("device {device} is out of range (device table holds {limit} devices)")]
    DeviceOutOfRange {
        /// Device number from the trace.
        device: u64,
        /// Number of device slots.
        limit: usize,
    },

    /// A record names an interrupt the vector table has no entry for.
    #[error("no vector table entry for interrupt {device} (table holds {len} entries)")]
    MissingVector {
        /// Interrupt number from the trace.
        device: u64,
        /// Number of populated vector table entries.
        len: usize,
    },
}

impl SimError {
    /// Wraps an I/O error together with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SimError>;
