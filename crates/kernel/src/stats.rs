//! Run statistics collection and reporting.
//!
//! This module tracks where simulated time went during a run. It provides:
//! 1. **Record mix:** Counts of CPU bursts, SYSCALLs, and END_IO completions.
//! 2. **Time breakdown:** Milliseconds spent in user bursts, kernel handling, and device waits.
//! 3. **Conservation:** The three time buckets always sum to the final clock.

/// Per-run statistics accumulated by the engine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Number of CPU burst records processed.
    pub cpu_bursts: u64,
    /// Number of SYSCALL records processed.
    pub syscalls: u64,
    /// Number of END_IO records processed.
    pub end_ios: u64,

    /// Simulated time spent in CPU bursts.
    pub cpu_ms: u64,
    /// Simulated time spent in kernel entry, ISR bodies, and IRET.
    pub kernel_ms: u64,
    /// Simulated time skipped while waiting for a busy device.
    pub wait_ms: u64,
    /// Number of END_IO records that had to wait for a busy device.
    pub device_waits: u64,

    /// Number of log entries emitted.
    pub entries: u64,
}

impl RunStats {
    /// Total number of trace records processed.
    pub const fn records(&self) -> u64 {
        self.cpu_bursts + self.syscalls + self.end_ios
    }

    /// Total simulated time accounted for; equals the engine clock.
    pub const fn total_ms(&self) -> u64 {
        self.cpu_ms + self.kernel_ms + self.wait_ms
    }

    /// Formats the statistics report.
    pub fn report(&self) -> String {
        let total = self.total_ms();
        let pct = |ms: u64| {
            if total == 0 {
                0.0
            } else {
                (ms as f64 / total as f64) * 100.0
            }
        };

        let mut out = String::new();
        out.push_str("\n==========================================================\n");
        out.push_str("INTERRUPT SIMULATION STATISTICS\n");
        out.push_str("==========================================================\n");
        out.push_str(&format!("sim_ms                   {total}\n"));
        out.push_str(&format!("sim_records              {}\n", self.records()));
        out.push_str(&format!("sim_entries              {}\n", self.entries));
        out.push_str("----------------------------------------------------------\n");
        out.push_str("RECORD MIX\n");
        out.push_str(&format!("  rec.cpu                {}\n", self.cpu_bursts));
        out.push_str(&format!("  rec.syscall            {}\n", self.syscalls));
        out.push_str(&format!("  rec.end_io             {}\n", self.end_ios));
        out.push_str("----------------------------------------------------------\n");
        out.push_str("TIME BREAKDOWN\n");
        out.push_str(&format!(
            "  time.cpu               {} ({:.2}%)\n",
            self.cpu_ms,
            pct(self.cpu_ms)
        ));
        out.push_str(&format!(
            "  time.kernel            {} ({:.2}%)\n",
            self.kernel_ms,
            pct(self.kernel_ms)
        ));
        out.push_str(&format!(
            "  time.device_wait       {} ({:.2}%) over {} waits\n",
            self.wait_ms,
            pct(self.wait_ms),
            self.device_waits
        ));
        out.push_str("==========================================================\n");
        out
    }
}
