//! Interrupt Simulation Engine.
//!
//! The engine owns the simulation clock, the device table, the execution log, and the run
//! statistics. It performs:
//! 1. **Replay:** Consumes trace records strictly in order, one to completion at a time.
//! 2. **CPU Bursts:** Logs the burst and advances the clock by its duration.
//! 3. **Interrupts:** Runs the kernel-entry sequence for SYSCALL and END_IO (see [`interrupt`]).
//!
//! Every log entry carries the clock value before its own cost is applied, so timestamps
//! never decrease and the final clock equals the sum of all costs plus device waits.

/// SYSCALL and END_IO handlers.
pub mod interrupt;

use crate::common::Result;
use crate::config::Config;
use crate::sim::log::ExecutionLog;
use crate::sim::trace::{Activity, TraceRecord};
use crate::sim::vectors::VectorTable;
use crate::soc::DeviceTable;
use crate::stats::RunStats;

/// Trace replay engine.
#[derive(Debug)]
pub struct Engine<'a> {
    config: &'a Config,
    vectors: &'a VectorTable,
    devices: DeviceTable,
    now_ms: u64,
    log: ExecutionLog,
    stats: RunStats,
}

impl<'a> Engine<'a> {
    /// Creates an engine at time zero with all devices idle.
    ///
    /// # Arguments
    ///
    /// * `config` - Cost model and layout; `config.system.device_count` sizes the device table.
    /// * `vectors` - Populated vector table for every interrupt the trace references.
    pub fn new(config: &'a Config, vectors: &'a VectorTable) -> Self {
        Self::with_devices(config, vectors, DeviceTable::new(config.system.device_count))
    }

    /// Creates an engine at time zero using an existing device table.
    pub fn with_devices(
        config: &'a Config,
        vectors: &'a VectorTable,
        devices: DeviceTable,
    ) -> Self {
        Self {
            config,
            vectors,
            devices,
            now_ms: 0,
            log: ExecutionLog::new(),
            stats: RunStats::default(),
        }
    }

    /// Current simulated time in ms.
    pub const fn now(&self) -> u64 {
        self.now_ms
    }

    /// Device busy-until state.
    pub const fn devices(&self) -> &DeviceTable {
        &self.devices
    }

    /// Marks device `n` busy until simulated time `until`.
    ///
    /// No trace record does this; it lets a caller model an operation already in flight.
    pub fn mark_busy(&mut self, n: u64, until: u64) -> Result<()> {
        self.devices.mark_busy(n, until)
    }

    /// The log accumulated so far.
    pub const fn log(&self) -> &ExecutionLog {
        &self.log
    }

    /// Statistics accumulated so far.
    pub const fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Processes one record to completion.
    ///
    /// On error nothing is appended for the record and the clock is unchanged.
    pub fn step(&mut self, record: TraceRecord) -> Result<()> {
        tracing::debug!(now = self.now_ms, %record, "processing record");
        match record.activity {
            Activity::Cpu => {
                self.cpu_burst(record.argument);
                Ok(())
            }
            Activity::Syscall => self.syscall(record.argument),
            Activity::EndIo => self.end_io(record.argument),
        }
    }

    /// Replays every record in order, stopping at the first error.
    pub fn run<I>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = TraceRecord>,
    {
        self.run_trace(records.into_iter().map(Ok))
    }

    /// Replays records from a fallible source such as a
    /// [`TraceReader`](crate::sim::TraceReader), stopping at the first read or lookup error.
    pub fn run_trace<I>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = Result<TraceRecord>>,
    {
        tracing::info!(start = self.now_ms, "replaying trace");
        for record in records {
            self.step(record?)?;
        }
        tracing::info!(
            end = self.now_ms,
            records = self.stats.records(),
            entries = self.log.len(),
            "trace replay finished"
        );
        Ok(())
    }

    /// Consumes the engine, returning the finished log.
    pub fn into_log(self) -> ExecutionLog {
        self.log
    }

    /// Consumes the engine, returning the finished log and the run statistics.
    pub fn into_parts(self) -> (ExecutionLog, RunStats) {
        (self.log, self.stats)
    }

    /// Logs a CPU burst and advances the clock by its duration.
    fn cpu_burst(&mut self, duration: u64) {
        self.emit(duration, "CPU burst");
        self.stats.cpu_bursts += 1;
        self.stats.cpu_ms += duration;
    }

    /// Appends an entry stamped with the current clock, then advances the clock by `cost`.
    fn emit(&mut self, cost: u64, description: impl Into<String>) {
        let description = description.into();
        tracing::trace!(at = self.now_ms, cost, %description, "log entry");
        self.log.push(self.now_ms, cost, description);
        self.now_ms += cost;
        self.stats.entries += 1;
    }
}

/// Replays `records` against `vectors` starting from `devices` and returns the log.
///
/// Equivalent to building an [`Engine`] with [`Engine::with_devices`], calling
/// [`Engine::run`], and taking the log.
pub fn run<I>(
    records: I,
    vectors: &VectorTable,
    devices: DeviceTable,
    config: &Config,
) -> Result<ExecutionLog>
where
    I: IntoIterator<Item = TraceRecord>,
{
    let mut engine = Engine::with_devices(config, vectors, devices);
    engine.run(records)?;
    Ok(engine.into_log())
}
