//! Authentication test suite
//!
//! Challenge digest and the login state machine against a mock device.

#[path = "../common/mod.rs"]
mod common;

mod challenge_tests;
