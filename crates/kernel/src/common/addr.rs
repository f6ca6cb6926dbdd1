//! Vector address type.
//!
//! An ISR start position is computed from the vector base and slot size. Keeping it as a
//! strong type separates the numeric position from its `0x`-prefixed rendering used in the
//! execution log.

use std::fmt;

use super::constants::ADDR_HEX_WIDTH;

/// Memory position of an interrupt vector table slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VectorAddr(pub u64);

impl VectorAddr {
    /// Computes the slot position for vector `n`: `base + n * vector_size`.
    ///
    /// Returns `None` if the position does not fit in a `u64`.
    ///
    /// # Arguments
    ///
    /// * `base` - Address of the first vector table slot.
    /// * `vector_size` - Size in bytes of each slot.
    /// * `n` - Interrupt/device number.
    #[inline]
    pub const fn for_vector(base: u64, vector_size: u64, n: u64) -> Option<Self> {
        match n.checked_mul(vector_size) {
            Some(offset) => match base.checked_add(offset) {
                Some(addr) => Some(Self(addr)),
                None => None,
            },
            None => None,
        }
    }

    /// Returns the raw address value.
    #[inline]
    pub const fn val(self) -> u64 {
        self.0
    }
}

impl fmt::Display for VectorAddr {
    /// Renders as `0x` followed by at least four zero-padded uppercase hex digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:0width$X}", self.0, width = ADDR_HEX_WIDTH)
    }
}
