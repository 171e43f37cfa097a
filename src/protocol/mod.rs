//! Protocol Module
//!
//! Defines the wire protocol spoken by the device's API service.
//!
//! ## Words
//! Every field is a word: a variable-length length prefix followed by raw
//! bytes (see [`word`] for the prefix layout).
//!
//! ## Sentences
//! ```text
//! ┌──────────┬──────────────┬─────┬──────────────┬──────┐
//! │   tag    │  attr word   │ ... │  attr word   │ 0x00 │
//! └──────────┴──────────────┴─────┴──────────────┴──────┘
//! ```
//!
//! ### Outgoing tags
//! - command path, e.g. `/login`, `/user/print`
//!
//! ### Reply tags
//! - `!re`    - one result row
//! - `!done`  - end of reply
//! - `!trap`  - command error (`=message=`, `=category=`)
//! - `!fatal` - device closes the connection
//! - `!empty` - no rows
//!
//! ### Attribute words
//! - `=key=value` - attribute / result field
//! - `?key=value` - query filter
//! - `.tag=value` - API attribute

pub mod word;
mod sentence;
mod reply;
mod command;

pub use word::{encode_word, read_word, write_word, encode_length, read_length, Word};
pub use sentence::{encode_sentence, read_sentence, write_sentence, Sentence};
pub use reply::{Record, Reply, TAG_DONE, TAG_EMPTY, TAG_FATAL, TAG_RE, TAG_TRAP};
pub use command::Command;
