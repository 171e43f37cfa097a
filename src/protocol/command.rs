//! Command definitions
//!
//! Outgoing command sentences: a path followed by attribute, query and API
//! words.

use super::word::Word;

/// A command to send to the device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Command path, e.g. `/user/print`
    path: String,

    /// Words after the path, already in wire form
    words: Vec<String>,
}

impl Command {
    /// Start a command for the given path
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            words: Vec::new(),
        }
    }

    /// Build a command from caller-supplied parameters
    ///
    /// Each entry becomes one `key=value` word. Keys starting with `?`, `=`
    /// or `.` are taken verbatim; bare keys get the `=` attribute prefix.
    pub fn with_params<I, K, V>(path: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        params
            .into_iter()
            .fold(Self::new(path), |cmd, (k, v)| cmd.param(k.as_ref(), v.as_ref()))
    }

    /// Add a parameter word using the prefix rules of [`Command::with_params`]
    pub fn param(mut self, key: &str, value: &str) -> Self {
        let word = match key.chars().next() {
            Some('?') | Some('=') | Some('.') => format!("{}={}", key, value),
            _ => format!("={}={}", key, value),
        };
        self.words.push(word);
        self
    }

    /// Add an `=name=value` attribute word
    pub fn attribute(mut self, name: &str, value: &str) -> Self {
        self.words.push(format!("={}={}", name, value));
        self
    }

    /// Add a `?name=value` query word
    pub fn query(mut self, name: &str, value: &str) -> Self {
        self.words.push(format!("?{}={}", name, value));
        self
    }

    /// Add a raw word as-is (e.g. `?#|` query operators)
    pub fn word(mut self, word: impl Into<String>) -> Self {
        self.words.push(word.into());
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// All words of the sentence, path first
    pub fn to_words(&self) -> Vec<Word> {
        std::iter::once(self.path.as_bytes().to_vec())
            .chain(self.words.iter().map(|w| w.as_bytes().to_vec()))
            .collect()
    }

    /// Words for trace logging, with secrets masked
    pub(crate) fn redacted(&self) -> Vec<String> {
        std::iter::once(self.path.clone())
            .chain(self.words.iter().map(|w| {
                if w.starts_with("=password=") || w.starts_with("=response=") {
                    let end = w[1..].find('=').map(|i| i + 2).unwrap_or(w.len());
                    format!("{}***", &w[..end])
                } else {
                    w.clone()
                }
            }))
            .collect()
    }
}
