//! Device state.
//!
//! The only device state in the model is when each device will next be free. The engine
//! consults it before servicing an END_IO completion.

/// Per-device busy-until table.
pub mod devices;

pub use devices::DeviceTable;
