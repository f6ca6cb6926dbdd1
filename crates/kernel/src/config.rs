//! Configuration system for the interrupt simulator.
//!
//! This module defines the structures used to parameterize a run. It provides:
//! 1. **Defaults:** Baseline costs for each kernel-entry step and the vector table layout.
//! 2. **Structures:** `SystemConfig` (memory layout, device count) and `CostModel` (fixed costs).
//! 3. **Loading:** JSON deserialization with per-field defaults and range validation.
//!
//! The engine receives the configuration by reference and never mutates it.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::constants;
use crate::common::{Result, SimError, VectorAddr};

/// Default configuration constants for the simulator.
///
/// These values apply when a field is not present in a JSON configuration file.
mod defaults {
    /// Switch to or from kernel mode (1 ms).
    pub const KERNEL_MODE: u64 = 1;

    /// Save or restore the interrupted context (10 ms).
    pub const CONTEXT_SAVE: u64 = 10;

    /// Calculate the memory position of the ISR start address (1 ms).
    pub const ISR_START_ADDR: u64 = 1;

    /// Fetch the ISR address from the vector table into the PC (1 ms).
    pub const GET_ISR_ADDR: u64 = 1;

    /// Execute one segment of the ISR body (40 ms).
    pub const EXEC_ISR: u64 = 40;

    /// Execute the return-from-interrupt instruction (1 ms).
    pub const EXEC_IRET: u64 = 1;
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use isrsim_core::config::Config;
///
/// let json = r#"{
///     "system": { "vector_size": 4 },
///     "costs": { "context_save": 20 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.system.vector_size, 4);
/// assert_eq!(config.system.device_count, 32);
/// assert_eq!(config.costs.context_save, 20);
/// assert_eq!(config.costs.exec_isr, 40);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Vector table layout and device table size
    #[serde(default)]
    pub system: SystemConfig,
    /// Fixed costs of each kernel-entry step
    #[serde(default)]
    pub costs: CostModel,
}

impl Config {
    /// Parses a configuration from JSON text and validates it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| SimError::io(path, e))?;
        Self::from_json(&text)
    }

    /// Rejects values that would make vector addressing or device lookup meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.system.vector_size == 0 {
            return Err(SimError::InvalidConfig {
                field: "system.vector_size",
                reason: "must be greater than zero",
            });
        }
        if self.system.device_count == 0 {
            return Err(SimError::InvalidConfig {
                field: "system.device_count",
                reason: "must be greater than zero",
            });
        }
        let system = &self.system;
        let last = u64::try_from(system.device_count - 1).unwrap_or(u64::MAX);
        if VectorAddr::for_vector(system.addr_base, system.vector_size, last).is_none() {
            return Err(SimError::InvalidConfig {
                field: "system.vector_size",
                reason: "last vector position overflows the address space",
            });
        }
        Ok(())
    }
}

/// Vector table layout and device table size.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SystemConfig {
    /// Address of the first vector table slot
    #[serde(default = "SystemConfig::default_addr_base")]
    pub addr_base: u64,

    /// Size in bytes of one vector table slot
    #[serde(default = "SystemConfig::default_vector_size")]
    pub vector_size: u64,

    /// Number of device slots; device numbers must lie in `[0, device_count)`
    #[serde(default = "SystemConfig::default_device_count")]
    pub device_count: usize,
}

impl SystemConfig {
    const fn default_addr_base() -> u64 {
        constants::ADDR_BASE
    }

    const fn default_vector_size() -> u64 {
        constants::VECTOR_SIZE
    }

    const fn default_device_count() -> usize {
        constants::DEVICE_COUNT
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            addr_base: constants::ADDR_BASE,
            vector_size: constants::VECTOR_SIZE,
            device_count: constants::DEVICE_COUNT,
        }
    }
}

/// Fixed cost, in milliseconds, of each step of kernel entry and exit.
///
/// The variable step of each handler ("check for errors", "check device status") is not
/// part of the model; it comes from the per-device delay in the vector table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CostModel {
    /// Switch to kernel mode
    #[serde(default = "CostModel::default_kernel_mode")]
    pub kernel_mode: u64,

    /// Save context
    #[serde(default = "CostModel::default_context_save")]
    pub context_save: u64,

    /// Compute the ISR start address
    #[serde(default = "CostModel::default_isr_start_addr")]
    pub isr_start_addr: u64,

    /// Load the ISR address into the PC
    #[serde(default = "CostModel::default_get_isr_addr")]
    pub get_isr_addr: u64,

    /// One segment of the ISR body
    #[serde(default = "CostModel::default_exec_isr")]
    pub exec_isr: u64,

    /// Return from interrupt
    #[serde(default = "CostModel::default_exec_iret")]
    pub exec_iret: u64,
}

impl CostModel {
    const fn default_kernel_mode() -> u64 {
        defaults::KERNEL_MODE
    }

    const fn default_context_save() -> u64 {
        defaults::CONTEXT_SAVE
    }

    const fn default_isr_start_addr() -> u64 {
        defaults::ISR_START_ADDR
    }

    const fn default_get_isr_addr() -> u64 {
        defaults::GET_ISR_ADDR
    }

    const fn default_exec_isr() -> u64 {
        defaults::EXEC_ISR
    }

    const fn default_exec_iret() -> u64 {
        defaults::EXEC_IRET
    }

    /// Fixed overhead of a SYSCALL, excluding the device delay.
    pub const fn syscall_overhead(&self) -> u64 {
        self.kernel_mode
            + self.context_save
            + self.isr_start_addr
            + self.get_isr_addr
            + 2 * self.exec_isr
            + self.exec_iret
    }

    /// Fixed overhead of an END_IO, excluding the device delay and any device wait.
    pub const fn end_io_overhead(&self) -> u64 {
        self.kernel_mode
            + self.context_save
            + self.isr_start_addr
            + self.get_isr_addr
            + self.exec_isr
            + self.exec_iret
    }
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            kernel_mode: defaults::KERNEL_MODE,
            context_save: defaults::CONTEXT_SAVE,
            isr_start_addr: defaults::ISR_START_ADDR,
            get_isr_addr: defaults::GET_ISR_ADDR,
            exec_isr: defaults::EXEC_ISR,
            exec_iret: defaults::EXEC_IRET,
        }
    }
}
