//! Network Module
//!
//! TCP plumbing between the session and the device.
//!
//! ## Model
//! - One blocking socket per session
//! - Connect, read and write all bounded by timeouts
//! - Replies decoded into [`crate::protocol::Reply`] on arrival

mod connection;

pub use connection::Connection;
