//! Sentence framing
//!
//! A sentence is a run of words closed by a zero-length word.
//!
//! ```text
//! ┌────────┬──────┬────────┬─────────────┬─────┬──────┐
//! │ Len(n) │ tag  │ Len(n) │ =key=value  │ ... │ 0x00 │
//! └────────┴──────┴────────┴─────────────┴─────┴──────┘
//! ```

use std::io::{Read, Write};

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{Result, RosError};
use super::word::{put_length, read_word_opt, Word};

/// An ordered list of words, without the terminator
pub type Sentence = Vec<Word>;

/// Encode a full sentence, terminator included, into one buffer
///
/// A zero-length word would read back as the terminator, so it is refused
/// with `EmptyWord`.
pub fn encode_sentence<I, W>(words: I) -> Result<Bytes>
where
    I: IntoIterator<Item = W>,
    W: AsRef<[u8]>,
{
    let mut buf = BytesMut::with_capacity(64);
    for (index, word) in words.into_iter().enumerate() {
        let word = word.as_ref();
        if word.is_empty() {
            return Err(RosError::EmptyWord { index });
        }
        put_length(&mut buf, word.len())?;
        buf.put_slice(word);
    }
    buf.put_u8(0x00);
    Ok(buf.freeze())
}

/// Write a sentence to a stream and flush it
pub fn write_sentence<W, I, S>(writer: &mut W, words: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = S>,
    S: AsRef<[u8]>,
{
    let bytes = encode_sentence(words)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Read a sentence from a stream
///
/// Blocks until the zero-length terminator arrives. If the stream is already
/// closed before the first word, an empty sentence is returned; a close in
/// the middle of a sentence is `ConnectionClosed`.
pub fn read_sentence<R: Read>(reader: &mut R, max_word_len: usize) -> Result<Sentence> {
    let mut sentence = Sentence::new();

    loop {
        match read_word_opt(reader, max_word_len)? {
            Some(word) if word.is_empty() => return Ok(sentence),
            Some(word) => sentence.push(word),
            None if sentence.is_empty() => return Ok(sentence),
            None => return Err(RosError::ConnectionClosed),
        }
    }
}
