//! # rosapi
//!
//! A blocking client for the RouterOS binary management API with:
//! - Length-prefixed word / sentence codec
//! - Plain and legacy challenge-response login, picked per device
//! - Synchronous command execution returning key/value records
//! - Bounded timeouts on every network operation
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Session                              │
//! │            connect() / execute() / disconnect()              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  Login Handshake (auth)                      │
//! │        plain credentials ──fail──► challenge-response        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                 Connection (network)                         │
//! │            buffered TcpStream, read/write timeouts           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  Protocol (protocol)                         │
//! │        words ─► sentences ─► Reply { !re !done !trap }       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use rosapi::{Config, Session};
//!
//! let config = Config::builder()
//!     .host("10.9.8.1")
//!     .username("admin")
//!     .password("secret")
//!     .build();
//!
//! let mut session = Session::open(config)?;
//! let users = session.execute("/user/print", [("?name", "admin")])?;
//! for user in &users {
//!     println!("{:?} {:?}", user.get("name"), user.get("group"));
//! }
//! session.disconnect();
//! # Ok::<(), rosapi::RosError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod auth;
pub mod session;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{RosError, Result};
pub use config::{Config, LoginMethod};
pub use protocol::{Command, Record};
pub use session::Session;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of rosapi
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
