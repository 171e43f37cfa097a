//! Reply definitions
//!
//! Replies from the device, decoded once at the sentence boundary.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Result, RosError};
use super::sentence::Sentence;

/// Reply tags
pub const TAG_RE: &str = "!re";
pub const TAG_DONE: &str = "!done";
pub const TAG_TRAP: &str = "!trap";
pub const TAG_FATAL: &str = "!fatal";
pub const TAG_EMPTY: &str = "!empty";

/// One decoded row: attribute name to attribute value
///
/// Keys are kept sorted so serialized output is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, String>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from the attribute words of a sentence
    ///
    /// Only `=key=value` words contribute; the split happens on the first `=`
    /// after the leading one, so values may contain `=`. Words that are not
    /// attributes (`.tag=`, `.section=`) or that carry no `=` separator are
    /// skipped.
    pub fn from_words<W: AsRef<[u8]>>(words: &[W]) -> Self {
        let mut record = Record::new();
        for word in words {
            let text = String::from_utf8_lossy(word.as_ref());
            let Some(attr) = text.strip_prefix('=') else {
                continue;
            };
            match attr.split_once('=') {
                Some((key, value)) => {
                    record.insert(key, value);
                }
                None => tracing::trace!("Skipping attribute word without value: {}", text),
            }
        }
        record
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Record(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Reply kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// One result row
    Re(Record),

    /// End of the reply; may carry attributes (e.g. `ret` on login)
    Done(Record),

    /// Command failed; at least `message` is set
    Trap(Record),

    /// Device is about to close the connection
    Fatal(String),

    /// Command produced no rows
    Empty,
}

impl Reply {
    /// Decode a sentence read from the device
    ///
    /// An empty sentence means the device closed the connection.
    pub fn from_sentence(sentence: &Sentence) -> Result<Reply> {
        let Some((tag, words)) = sentence.split_first() else {
            return Err(RosError::ConnectionClosed);
        };

        match tag.as_slice() {
            t if t == TAG_RE.as_bytes() => Ok(Reply::Re(Record::from_words(words))),
            t if t == TAG_DONE.as_bytes() => Ok(Reply::Done(Record::from_words(words))),
            t if t == TAG_TRAP.as_bytes() => Ok(Reply::Trap(Record::from_words(words))),
            t if t == TAG_FATAL.as_bytes() => {
                // !fatal carries its reason as a bare word
                let reason = words
                    .iter()
                    .map(|w| String::from_utf8_lossy(w).into_owned())
                    .collect::<Vec<_>>()
                    .join(" ");
                Ok(Reply::Fatal(reason))
            }
            t if t == TAG_EMPTY.as_bytes() => Ok(Reply::Empty),
            other => Err(RosError::Framing(format!(
                "Unexpected reply tag: {:?}",
                String::from_utf8_lossy(other)
            ))),
        }
    }

    /// Tag of this reply as it appears on the wire
    pub fn tag(&self) -> &'static str {
        match self {
            Reply::Re(_) => TAG_RE,
            Reply::Done(_) => TAG_DONE,
            Reply::Trap(_) => TAG_TRAP,
            Reply::Fatal(_) => TAG_FATAL,
            Reply::Empty => TAG_EMPTY,
        }
    }

    /// Turn a `!trap` record into the matching error
    pub fn trap_error(record: &Record) -> RosError {
        RosError::RemoteCommand {
            message: record.get("message").unwrap_or("unknown error").to_string(),
            category: record.get("category").and_then(|c| c.parse().ok()),
        }
    }
}
