//! Interrupt Handling Logic.
//!
//! This module implements the kernel side of the two interrupt records. It performs:
//! 1. **Validation:** Bounds-checks the device number and resolves the vector table entry
//!    before anything is logged, so a bad record never leaves a partial sequence behind.
//! 2. **Kernel Entry:** Mode switch, context save, vector position, and PC load.
//! 3. **ISR Body:** Driver execution plus the device-specific step (error check or status check).
//! 4. **Return:** IRET.
//!
//! END_IO additionally honours a busy device by jumping the clock to its busy-until time.
//! The jump is silent: it produces no log entry.

use super::Engine;
use crate::common::{Result, SimError, VectorAddr};

/// Vector table entry resolved for one interrupt.
struct Vector<'v> {
    n: u64,
    position: VectorAddr,
    address: &'v str,
    delay: u64,
}

impl<'a> Engine<'a> {
    /// Handles a system call through vector `n`.
    ///
    /// Cost sequence: kernel mode, context save, vector position, PC load, ISR body,
    /// data transfer, error check (device delay), IRET.
    pub(super) fn syscall(&mut self, n: u64) -> Result<()> {
        let vector = self.resolve(n)?;
        let costs = self.config.costs;
        let start = self.now_ms;

        self.enter_kernel(&vector);
        self.emit(costs.exec_isr, "SYSCALL: run the ISR (device driver)");
        self.emit(costs.exec_isr, "transfer data from device to memory");
        self.emit(vector.delay, "check for errors");
        self.emit(costs.exec_iret, "executing IRET");

        self.stats.syscalls += 1;
        self.stats.kernel_ms += self.now_ms - start;
        Ok(())
    }

    /// Handles a completion interrupt from device `n`.
    ///
    /// Waits for the device if it is still busy, marks it idle, then runs the kernel-entry
    /// sequence with a single ISR segment and a device status check.
    pub(super) fn end_io(&mut self, n: u64) -> Result<()> {
        let vector = self.resolve(n)?;
        let costs = self.config.costs;

        if let Some(until) = self.devices.clear(n)?
            && self.now_ms < until
        {
            tracing::debug!(device = n, from = self.now_ms, until, "waiting for device");
            self.stats.wait_ms += until - self.now_ms;
            self.stats.device_waits += 1;
            self.now_ms = until;
        }

        let start = self.now_ms;
        self.enter_kernel(&vector);
        self.emit(costs.exec_isr, "ENDIO: run the ISR (device driver)");
        self.emit(vector.delay, "check device status");
        self.emit(costs.exec_iret, "executing IRET");

        self.stats.end_ios += 1;
        self.stats.kernel_ms += self.now_ms - start;
        Ok(())
    }

    /// Checks `n` against the device table, computes its slot position, and looks up its
    /// vector table entry.
    fn resolve(&self, n: u64) -> Result<Vector<'a>> {
        let _ = self.devices.index(n)?;
        let system = &self.config.system;
        let position = VectorAddr::for_vector(system.addr_base, system.vector_size, n).ok_or(
            SimError::InvalidConfig {
                field: "system.vector_size",
                reason: "vector position overflows the address space",
            },
        )?;
        let vectors = self.vectors;
        Ok(Vector {
            n,
            position,
            address: vectors.address(n)?,
            delay: vectors.delay(n)?,
        })
    }

    /// Emits the four steps shared by every interrupt before the ISR body runs.
    fn enter_kernel(&mut self, vector: &Vector<'_>) {
        let costs = self.config.costs;

        self.emit(costs.kernel_mode, "switch to kernel mode");
        self.emit(costs.context_save, "context saved");
        self.emit(
            costs.isr_start_addr,
            format!(
                "find vector {} in memory position {}",
                vector.n, vector.position
            ),
        );
        self.emit(
            costs.get_isr_addr,
            format!("load address {} into the PC", vector.address),
        );
    }
}
