//! Interrupt-handling trace interpreter library.
//!
//! This crate replays a trace of CPU bursts and interrupts against a fixed cost model and
//! produces a timestamped execution log. It is organised as follows:
//! 1. **Common:** Error type, vector addresses, and model constants.
//! 2. **Configuration:** Fixed kernel-entry costs and the memory layout of the vector table.
//! 3. **Core:** The simulation engine (clock, CPU burst, SYSCALL and END_IO handlers).
//! 4. **Devices:** Per-device busy-until tracking.
//! 5. **Simulation I/O:** Trace reader, vector table provider, execution log and sinks.
//! 6. **Statistics:** Per-run time accounting.

/// Common types and constants (errors, vector addresses).
pub mod common;
/// Simulator configuration (cost model, vector layout, device count).
pub mod config;
/// Simulation engine and interrupt handlers.
pub mod core;
/// Trace reader, vector table provider, and execution log sinks.
pub mod sim;
/// Device table (busy-until slots).
pub mod soc;
/// Run statistics collection and reporting.
pub mod stats;

/// Crate-wide error type.
pub use crate::common::{Result, SimError};
/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// The simulation engine; construct with `Engine::new`.
pub use crate::core::{Engine, run};
/// Structured execution log produced by a run.
pub use crate::sim::log::{ExecutionLog, LogEntry};
