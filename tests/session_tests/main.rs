//! Session test suite
//!
//! Command execution and session lifecycle against a mock device.

#[path = "../common/mod.rs"]
mod common;

mod lifecycle_tests;
