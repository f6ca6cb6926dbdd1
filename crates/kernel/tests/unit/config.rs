//! # Configuration Tests
//!
//! Defaults, JSON deserialization with partial overrides, file loading, and validation.

use std::io::Write;

use isrsim_core::SimError;
use isrsim_core::config::*;
use tempfile::NamedTempFile;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.system, SystemConfig::default());
    assert_eq!(config.costs, CostModel::default());
}

#[test]
fn test_system_config_defaults() {
    let system = SystemConfig::default();
    assert_eq!(system.addr_base, 0x0000);
    assert_eq!(system.vector_size, 2);
    assert_eq!(system.device_count, 32);
}

#[test]
fn test_cost_model_defaults() {
    let costs = CostModel::default();
    assert_eq!(costs.kernel_mode, 1);
    assert_eq!(costs.context_save, 10);
    assert_eq!(costs.isr_start_addr, 1);
    assert_eq!(costs.get_isr_addr, 1);
    assert_eq!(costs.exec_isr, 40);
    assert_eq!(costs.exec_iret, 1);
}

#[test]
fn test_handler_overheads() {
    let costs = CostModel::default();
    assert_eq!(costs.syscall_overhead(), 94);
    assert_eq!(costs.end_io_overhead(), 54);
}

#[test]
fn test_empty_json_yields_defaults() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_partial_json_keeps_other_defaults() {
    let json = r#"{
        "system": { "addr_base": 256 },
        "costs": { "exec_isr": 25, "exec_iret": 3 }
    }"#;
    let config = Config::from_json(json).unwrap();
    assert_eq!(config.system.addr_base, 256);
    assert_eq!(config.system.vector_size, 2);
    assert_eq!(config.costs.exec_isr, 25);
    assert_eq!(config.costs.exec_iret, 3);
    assert_eq!(config.costs.context_save, 10);
}

#[test]
fn test_malformed_json_is_config_error() {
    let err = Config::from_json(r#"{ "costs": { "exec_isr": "forty" } }"#).unwrap_err();
    assert!(matches!(err, SimError::Config(_)));
}

#[test]
fn test_zero_vector_size_rejected() {
    let err = Config::from_json(r#"{ "system": { "vector_size": 0 } }"#).unwrap_err();
    assert!(matches!(
        err,
        SimError::InvalidConfig {
            field: "system.vector_size",
            ..
        }
    ));
}

#[test]
fn test_zero_device_count_rejected() {
    let err = Config::from_json(r#"{ "system": { "device_count": 0 } }"#).unwrap_err();
    assert!(matches!(
        err,
        SimError::InvalidConfig {
            field: "system.device_count",
            ..
        }
    ));
}

#[test]
fn test_vector_layout_overflow_rejected() {
    let err = Config::from_json(r#"{ "system": { "vector_size": 1000000000000000000 } }"#)
        .unwrap_err();
    assert!(matches!(
        err,
        SimError::InvalidConfig {
            field: "system.vector_size",
            ..
        }
    ));
}

#[test]
fn test_vector_layout_base_overflow_rejected() {
    let json = format!(r#"{{ "system": {{ "addr_base": {} }} }}"#, u64::MAX);
    assert!(Config::from_json(&json).is_err());
}

#[test]
fn test_vector_layout_ending_at_address_space_edge_accepted() {
    // 31 devices past the base at 2 bytes each lands exactly on u64::MAX.
    let json = format!(r#"{{ "system": {{ "addr_base": {} }} }}"#, u64::MAX - 62);
    let config = Config::from_json(&json).unwrap();
    assert_eq!(config.system.addr_base, u64::MAX - 62);
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{ "system": {{ "device_count": 8 }} }}"#).unwrap();
    file.flush().unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.system.device_count, 8);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, SimError::Io { .. }));
}
