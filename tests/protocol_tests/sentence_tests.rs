//! Tests for sentence framing
//!
//! These tests verify:
//! - Write then read yields exactly the written words
//! - Terminator handling and refusal of empty words
//! - EOF before and inside a sentence

use std::io::Cursor;

use rosapi::protocol::{encode_sentence, read_sentence, write_sentence};
use rosapi::RosError;

const MAX: usize = 1 << 20;

// =============================================================================
// Framing Tests
// =============================================================================

#[test]
fn test_write_read_sentence() {
    let mut buffer = Vec::new();
    write_sentence(&mut buffer, ["!re", "=name=alice"]).unwrap();

    let mut cursor = Cursor::new(buffer);
    let sentence = read_sentence(&mut cursor, MAX).unwrap();

    assert_eq!(sentence, vec![b"!re".to_vec(), b"=name=alice".to_vec()]);
    // Terminator consumed, nothing left over
    assert_eq!(cursor.position() as usize, cursor.get_ref().len());
}

#[test]
fn test_encoded_sentence_wire_format() {
    let bytes = encode_sentence(["/login"]).unwrap();

    // Expected: [0x06][/ l o g i n][0x00]
    assert_eq!(bytes[0], 0x06);
    assert_eq!(&bytes[1..7], b"/login");
    assert_eq!(bytes[7], 0x00);
    assert_eq!(bytes.len(), 8);
}

#[test]
fn test_sentence_with_long_word() {
    let long = "=comment=".to_string() + &"x".repeat(500);
    let mut buffer = Vec::new();
    write_sentence(&mut buffer, ["!re", long.as_str()]).unwrap();

    let sentence = read_sentence(&mut Cursor::new(buffer), MAX).unwrap();
    assert_eq!(sentence.len(), 2);
    assert_eq!(sentence[1], long.as_bytes());
}

#[test]
fn test_multiple_sentences_in_stream() {
    let mut buffer = Vec::new();
    write_sentence(&mut buffer, ["!re", "=name=a"]).unwrap();
    write_sentence(&mut buffer, ["!re", "=name=b"]).unwrap();
    write_sentence(&mut buffer, ["!done"]).unwrap();

    let mut cursor = Cursor::new(buffer);
    let first = read_sentence(&mut cursor, MAX).unwrap();
    let second = read_sentence(&mut cursor, MAX).unwrap();
    let third = read_sentence(&mut cursor, MAX).unwrap();

    assert_eq!(first[1], b"=name=a");
    assert_eq!(second[1], b"=name=b");
    assert_eq!(third, vec![b"!done".to_vec()]);
}

#[test]
fn test_empty_word_is_refused() {
    let result = encode_sentence(["/a", "", "=b=c"]);
    match result {
        Err(RosError::EmptyWord { index }) => assert_eq!(index, 1),
        other => panic!("Expected EmptyWord, got {:?}", other),
    }
}

#[test]
fn test_empty_word_writes_nothing() {
    let mut buffer = Vec::new();
    let result = write_sentence(&mut buffer, ["", "=name=a"]);

    assert!(matches!(result, Err(RosError::EmptyWord { index: 0 })));
    assert!(buffer.is_empty());
}

// =============================================================================
// Connection Closure Tests
// =============================================================================

#[test]
fn test_empty_stream_yields_empty_sentence() {
    let sentence = read_sentence(&mut Cursor::new(Vec::new()), MAX).unwrap();
    assert!(sentence.is_empty());
}

#[test]
fn test_eof_inside_sentence_is_connection_closed() {
    // "!re" word without a terminator
    let bytes = vec![0x03, b'!', b'r', b'e'];
    let result = read_sentence(&mut Cursor::new(bytes), MAX);
    assert!(matches!(result, Err(RosError::ConnectionClosed)));
}

#[test]
fn test_reserved_byte_inside_sentence_is_framing_error() {
    let bytes = vec![0x03, b'!', b'r', b'e', 0xF9];
    let result = read_sentence(&mut Cursor::new(bytes), MAX);
    assert!(matches!(result, Err(RosError::Framing(_))));
}
