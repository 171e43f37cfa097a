//! Word codec
//!
//! Encoding and decoding of single length-prefixed words.
//!
//! ## Length Prefix
//! ```text
//!   length range              prefix bytes
//!   < 0x80                    0xxxxxxx
//!   < 0x4000                  10xxxxxx xxxxxxxx
//!   < 0x20_0000               110xxxxx xxxxxxxx xxxxxxxx
//!   < 0x1000_0000             1110xxxx xxxxxxxx xxxxxxxx xxxxxxxx
//!   <= u32::MAX               11110000 xxxxxxxx xxxxxxxx xxxxxxxx xxxxxxxx
//! ```
//! First bytes `0xF8..=0xFF` are reserved control bytes and never start a word.

use std::io::{Read, Write};

use bytes::BufMut;

use crate::error::{Result, RosError};

/// A single protocol word (raw bytes, usually UTF-8)
pub type Word = Vec<u8>;

/// Largest length the 5-byte prefix can carry
pub const MAX_ENCODABLE_LEN: usize = u32::MAX as usize;

// =============================================================================
// Length Prefix
// =============================================================================

/// Append the length prefix for a word of `len` bytes
///
/// Fails with `WordTooLong` rather than emitting a corrupt prefix.
pub fn put_length<B: BufMut>(buf: &mut B, len: usize) -> Result<()> {
    if len > MAX_ENCODABLE_LEN {
        return Err(RosError::WordTooLong { len });
    }
    let n = len as u32;

    if n < 0x80 {
        buf.put_u8(n as u8);
    } else if n < 0x4000 {
        buf.put_u16((n | 0x8000) as u16);
    } else if n < 0x20_0000 {
        let v = n | 0xC0_0000;
        buf.put_u8((v >> 16) as u8);
        buf.put_u16(v as u16);
    } else if n < 0x1000_0000 {
        buf.put_u32(n | 0xE000_0000);
    } else {
        buf.put_u8(0xF0);
        buf.put_u32(n);
    }
    Ok(())
}

/// Encode a length prefix into a fresh buffer
pub fn encode_length(len: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(5);
    put_length(&mut buf, len)?;
    Ok(buf)
}

/// Read a length prefix from a stream
///
/// Returns `Ok(None)` when the stream is already at EOF, so the sentence
/// layer can tell a closed connection apart from a truncated word.
pub fn read_length<R: Read>(reader: &mut R) -> Result<Option<usize>> {
    let mut first = [0u8; 1];
    loop {
        match reader.read(&mut first) {
            Ok(0) => return Ok(None),
            Ok(_) => break,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    let b = first[0];

    // Number of extra bytes following the first one
    let (extra, head) = if b & 0x80 == 0x00 {
        (0, b as u32)
    } else if b & 0xC0 == 0x80 {
        (1, (b & 0x3F) as u32)
    } else if b & 0xE0 == 0xC0 {
        (2, (b & 0x1F) as u32)
    } else if b & 0xF0 == 0xE0 {
        (3, (b & 0x0F) as u32)
    } else if b == 0xF0 {
        (4, 0)
    } else {
        return Err(RosError::Framing(format!(
            "Reserved control byte in length prefix: 0x{:02x}",
            b
        )));
    };

    let mut rest = [0u8; 4];
    reader.read_exact(&mut rest[..extra])?;

    let len = rest[..extra]
        .iter()
        .fold(head, |acc, byte| (acc << 8) | *byte as u32);

    Ok(Some(len as usize))
}

// =============================================================================
// Word Encoding/Decoding
// =============================================================================

/// Encode a word: length prefix followed by the raw bytes
pub fn encode_word(word: &[u8]) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(word.len() + 5);
    put_length(&mut buf, word.len())?;
    buf.extend_from_slice(word);
    Ok(buf)
}

/// Read one word from a stream
///
/// A zero-length word is returned as an empty `Vec`; it is up to the caller
/// to treat it as a sentence terminator. Words longer than `max_len` are
/// rejected before any allocation happens.
pub fn read_word<R: Read>(reader: &mut R, max_len: usize) -> Result<Word> {
    match read_word_opt(reader, max_len)? {
        Some(word) => Ok(word),
        None => Err(RosError::ConnectionClosed),
    }
}

/// Like [`read_word`], but returns `Ok(None)` on a clean EOF
pub(crate) fn read_word_opt<R: Read>(reader: &mut R, max_len: usize) -> Result<Option<Word>> {
    let len = match read_length(reader)? {
        Some(len) => len,
        None => return Ok(None),
    };

    if len > max_len {
        return Err(RosError::Framing(format!(
            "Word too large: {} bytes (max {})",
            len, max_len
        )));
    }

    let mut word = vec![0u8; len];
    if len > 0 {
        // read_exact loops over partial reads; EOF becomes ConnectionClosed
        reader.read_exact(&mut word)?;
    }
    Ok(Some(word))
}

/// Write one word to a stream (without flushing)
pub fn write_word<W: Write>(writer: &mut W, word: &[u8]) -> Result<()> {
    let prefix = encode_length(word.len())?;
    writer.write_all(&prefix)?;
    writer.write_all(word)?;
    Ok(())
}
