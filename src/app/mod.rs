//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the business rules for the SmartBin controller:
//! command interpretation, fill estimation, the alert policy, actuator
//! state ownership and status formatting.  All interaction with hardware
//! happens through **port traits** defined in [`ports`], keeping this
//! layer fully testable without real peripherals.

pub mod actuators;
pub mod alert;
pub mod commands;
pub mod events;
pub mod fill;
pub mod model;
pub mod ports;
pub mod service;
pub mod status;
