//! Device Busy Table.
//!
//! Tracks, for every device slot, the simulated time at which an in-flight operation
//! completes. A slot is either idle (`None`) or busy until a timestamp (`Some(t)`).
//!
//! No trace record dispatches a device, so slots only become busy through
//! [`DeviceTable::mark_busy`]. The engine still honours a busy slot when the matching
//! END_IO arrives.

use crate::common::{Result, SimError};

/// Fixed-size table of busy-until timestamps indexed by device number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceTable {
    slots: Vec<Option<u64>>,
}

impl DeviceTable {
    /// Creates a table of `count` idle devices.
    pub fn new(count: usize) -> Self {
        Self {
            slots: vec![None; count],
        }
    }

    /// Number of device slots.
    pub const fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the table has no slots.
    pub const fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the busy-until timestamp of device `n`, or `None` if it is idle.
    pub fn busy_until(&self, n: u64) -> Result<Option<u64>> {
        let idx = self.index(n)?;
        Ok(self.slots[idx])
    }

    /// Marks device `n` busy until simulated time `until`.
    pub fn mark_busy(&mut self, n: u64, until: u64) -> Result<()> {
        let idx = self.index(n)?;
        self.slots[idx] = Some(until);
        Ok(())
    }

    /// Returns device `n` to idle, yielding the timestamp it was busy until.
    pub fn clear(&mut self, n: u64) -> Result<Option<u64>> {
        let idx = self.index(n)?;
        Ok(self.slots[idx].take())
    }

    /// Returns `true` if every device is idle.
    pub fn all_idle(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Bounds-checks a device number and converts it to a slot index.
    pub fn index(&self, n: u64) -> Result<usize> {
        usize::try_from(n)
            .ok()
            .filter(|&idx| idx < self.slots.len())
            .ok_or(SimError::DeviceOutOfRange {
                device: n,
                limit: self.slots.len(),
            })
    }
}
