//! Global Model Constants.
//!
//! Default values for the vector table layout and device count. The engine never reads
//! these directly; they seed [`SystemConfig`](crate::config::SystemConfig) so tests and
//! configuration files can override them.

/// Base address of the interrupt vector table in memory.
pub const ADDR_BASE: u64 = 0x0000;

/// Size in bytes of a single vector table slot.
pub const VECTOR_SIZE: u64 = 2;

/// Number of device slots tracked by the device table.
pub const DEVICE_COUNT: usize = 32;

/// Minimum number of hex digits used when rendering a vector address.
pub const ADDR_HEX_WIDTH: usize = 4;

/// Default file name the command-line front end writes the execution log to.
pub const DEFAULT_OUTPUT: &str = "execution.txt";
