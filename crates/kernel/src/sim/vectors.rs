//! Vector Table Provider.
//!
//! Loads the two lookup tables the engine consults for every interrupt:
//! 1. **Vector table file:** One ISR address string per line (e.g. `0X01E3`), index = line.
//! 2. **Device table file:** One service delay in ms per line, index = line.
//!
//! Blank lines are ignored in both files. The table is immutable once built.

use std::fs;
use std::path::Path;

use crate::common::{Result, SimError};

/// ISR addresses and per-device delays keyed by interrupt/device number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VectorTable {
    addresses: Vec<String>,
    delays: Vec<u64>,
}

impl VectorTable {
    /// Builds a table from parallel lists.
    ///
    /// If the lists differ in length, only indices present in both are usable.
    pub const fn new(addresses: Vec<String>, delays: Vec<u64>) -> Self {
        Self { addresses, delays }
    }

    /// Loads the vector table and device table files.
    ///
    /// # Arguments
    ///
    /// * `vector_path` - File of ISR address strings, one per line.
    /// * `device_path` - File of decimal delays, one per line.
    pub fn load(vector_path: impl AsRef<Path>, device_path: impl AsRef<Path>) -> Result<Self> {
        let vector_path = vector_path.as_ref();
        let device_path = device_path.as_ref();

        let vectors =
            fs::read_to_string(vector_path).map_err(|e| SimError::io(vector_path, e))?;
        let devices =
            fs::read_to_string(device_path).map_err(|e| SimError::io(device_path, e))?;

        let table = Self::new(parse_addresses(&vectors), parse_delays(&devices)?);
        tracing::info!(
            vectors = table.addresses.len(),
            delays = table.delays.len(),
            "loaded vector table"
        );
        Ok(table)
    }

    /// Number of indices holding both an address and a delay.
    pub fn len(&self) -> usize {
        self.addresses.len().min(self.delays.len())
    }

    /// Returns `true` if no index is usable.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// ISR address string for interrupt `n`.
    pub fn address(&self, n: u64) -> Result<&str> {
        let idx = self.index(n)?;
        Ok(&self.addresses[idx])
    }

    /// Service delay in ms for device `n`.
    pub fn delay(&self, n: u64) -> Result<u64> {
        let idx = self.index(n)?;
        Ok(self.delays[idx])
    }

    fn index(&self, n: u64) -> Result<usize> {
        let len = self.len();
        usize::try_from(n)
            .ok()
            .filter(|&idx| idx < len)
            .ok_or(SimError::MissingVector { device: n, len })
    }
}

/// Splits vector table text into trimmed, non-blank address strings.
pub fn parse_addresses(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses device table text into delays, reporting the first bad line.
pub fn parse_delays(text: &str) -> Result<Vec<u64>> {
    text.lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty())
        .map(|(line, l)| {
            l.parse::<u64>().map_err(|_| SimError::InvalidDelay {
                line,
                value: l.to_string(),
            })
        })
        .collect()
}
