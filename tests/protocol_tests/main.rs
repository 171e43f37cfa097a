//! Protocol test suite
//!
//! Word codec, sentence framing, reply decoding and command building.

mod sentence_tests;
mod command_tests;
