//! Common utilities and types used throughout the simulator.
//!
//! This module provides the building blocks shared by the engine and the I/O glue:
//! 1. **Vector Addresses:** A strong type for computed ISR vector positions.
//! 2. **Constants:** Model-wide defaults for the vector layout and device count.
//! 3. **Error Handling:** The fatal error taxonomy for configuration and trace problems.

/// Vector address type.
pub mod addr;

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types.
pub mod error;

pub use addr::VectorAddr;
pub use constants::{ADDR_BASE, DEVICE_COUNT, VECTOR_SIZE};
pub use error::{Result, SimError};
