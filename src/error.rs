//! Error types for rosapi
//!
//! Provides a unified error type for all client operations.
//!
//! I/O errors are classified on conversion: timeouts become [`RosError::Timeout`]
//! and peer closes become [`RosError::ConnectionClosed`], so callers can match
//! on what happened without digging into `std::io::ErrorKind`.

use std::io;

use thiserror::Error;

/// Result type alias using RosError
pub type Result<T> = std::result::Result<T, RosError>;

/// Unified error type for rosapi operations
#[derive(Debug, Error)]
pub enum RosError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("Failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("Timed out waiting for the device")]
    Timeout,

    #[error("Connection closed by the device")]
    ConnectionClosed,

    #[error("IO error: {0}")]
    Io(io::Error),

    // -------------------------------------------------------------------------
    // Framing Errors
    // -------------------------------------------------------------------------
    #[error("Protocol framing error: {0}")]
    Framing(String),

    #[error("Word too long: {len} bytes")]
    WordTooLong { len: usize },

    #[error("Empty word at position {index} of a sentence")]
    EmptyWord { index: usize },

    // -------------------------------------------------------------------------
    // Session Errors
    // -------------------------------------------------------------------------
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Session is not connected")]
    NotConnected,

    // -------------------------------------------------------------------------
    // Remote Errors
    // -------------------------------------------------------------------------
    #[error("Command failed: {message}")]
    RemoteCommand {
        message: String,
        category: Option<u32>,
    },

    #[error("Device closed the session: {0}")]
    RemoteFatal(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<io::Error> for RosError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            // Unix reports an expired SO_RCVTIMEO as WouldBlock, Windows as TimedOut
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => RosError::Timeout,
            io::ErrorKind::UnexpectedEof
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::BrokenPipe => RosError::ConnectionClosed,
            _ => RosError::Io(err),
        }
    }
}

impl From<serde_json::Error> for RosError {
    fn from(err: serde_json::Error) -> Self {
        RosError::Serialization(err.to_string())
    }
}

impl RosError {
    /// Whether the connection that produced this error can no longer be used.
    ///
    /// Remote command errors leave the session intact, as do sentences
    /// refused before any byte was written. Everything else on the transport
    /// or framing level means the byte stream is out of sync.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            RosError::RemoteCommand { .. }
                | RosError::NotConnected
                | RosError::Config(_)
                | RosError::EmptyWord { .. }
        )
    }
}
