//! Authentication Module
//!
//! The two login handshakes of the API service:
//! - plain credentials (firmware 6.43 and later)
//! - MD5 challenge-response (legacy firmware)
//!
//! Which one the device speaks is discovered at connect time, see
//! [`Handshake`].

mod challenge;
mod handshake;

pub use challenge::challenge_response;
pub use handshake::{AuthMethod, Handshake, LoginState, Outcome};
