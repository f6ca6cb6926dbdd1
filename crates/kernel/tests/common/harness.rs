use isrsim_core::config::Config;
use isrsim_core::sim::{TraceReader, TraceRecord, VectorTable};
use isrsim_core::stats::RunStats;
use isrsim_core::{Engine, ExecutionLog, Result};

/// Result of replaying a trace through a fresh engine.
#[derive(Debug)]
pub struct Outcome {
    pub log: ExecutionLog,
    pub stats: RunStats,
    pub now: u64,
}

/// Owns everything an engine borrows so tests can build runs fluently.
pub struct TestContext {
    pub config: Config,
    addresses: Vec<String>,
    delays: Vec<u64>,
    vectors: VectorTable,
    busy: Vec<(u64, u64)>,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// ISR address the default fixture stores for vector `n`.
pub fn sample_address(n: u64) -> String {
    format!("0X{:04X}", 0x01E3 + n * 0x20)
}

/// Delay the default fixture stores for device `n`.
pub const fn sample_delay(n: u64) -> u64 {
    100 + n * 10
}

impl TestContext {
    /// 32 vectors with [`sample_address`] / [`sample_delay`] and the default cost model.
    pub fn new() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter("isrsim_core=trace")
            .try_init();

        let addresses: Vec<String> = (0..32).map(sample_address).collect();
        let delays: Vec<u64> = (0..32).map(sample_delay).collect();
        Self {
            config: Config::default(),
            vectors: VectorTable::new(addresses.clone(), delays.clone()),
            addresses,
            delays,
            busy: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Overrides the delay of device `n`.
    pub fn with_delay(mut self, n: usize, delay: u64) -> Self {
        self.delays[n] = delay;
        self.rebuild();
        self
    }

    /// Truncates the vector table to its first `len` entries.
    pub fn with_vector_len(mut self, len: usize) -> Self {
        self.addresses.truncate(len);
        self.delays.truncate(len);
        self.rebuild();
        self
    }

    /// Marks device `n` busy until `until` before the run starts.
    pub fn with_busy(mut self, n: u64, until: u64) -> Self {
        self.busy.push((n, until));
        self
    }

    /// Builds a fresh engine with any configured busy devices.
    pub fn engine(&self) -> Engine<'_> {
        let mut engine = Engine::new(&self.config, &self.vectors);
        for &(n, until) in &self.busy {
            engine.mark_busy(n, until).unwrap();
        }
        engine
    }

    /// Replays structured records.
    pub fn replay(&self, records: &[TraceRecord]) -> Result<Outcome> {
        let mut engine = self.engine();
        engine.run(records.iter().copied())?;
        let now = engine.now();
        let (log, stats) = engine.into_parts();
        Ok(Outcome { log, stats, now })
    }

    /// Replays trace text through a [`TraceReader`].
    pub fn replay_text(&self, trace: &str) -> Result<Outcome> {
        let mut engine = self.engine();
        engine.run_trace(TraceReader::new(trace.as_bytes()))?;
        let now = engine.now();
        let (log, stats) = engine.into_parts();
        Ok(Outcome { log, stats, now })
    }

    fn rebuild(&mut self) {
        self.vectors = VectorTable::new(self.addresses.clone(), self.delays.clone());
    }
}
