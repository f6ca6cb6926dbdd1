//! Simulation inputs and outputs.
//!
//! Provides the I/O glue around the engine: reading trace records, loading the vector
//! and device tables, and writing the finished execution log.

/// Execution log entries and sinks.
pub mod log;
/// Trace grammar and lazy record reader.
pub mod trace;
/// Vector and device table provider.
pub mod vectors;

pub use log::{ExecutionLog, FileSink, LogEntry, LogSink, WriterSink};
pub use trace::{Activity, TraceReader, TraceRecord};
pub use vectors::VectorTable;
