//! BML tree decoder for kart track descriptors
//!
//! BML is the binary markup used by the game's resource packages to store
//! XML-like documents. There is no magic number, version field or checksum;
//! a file is a single encoded root node.
//!
//! # Format Overview
//!
//! All integers are little-endian.
//!
//! - `Int32`: 4 bytes, signed
//! - `Str`: `Int32` character count `n`, then `2n` bytes of UTF-16LE.
//!   `n <= 0` is the empty string with no payload.
//! - `Node`: `Str` name, `Str` text, `Int32` attribute count, that many
//!   (`Str` key, `Str` value) pairs, `Int32` child count, that many `Node`s.
//!
//! A node with an empty name decodes to "no node". Parents count it as a
//! child but do not keep it.

mod decode;
mod node;
mod reader;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use decode::{decode, decode_document, read_document, Decoder};
pub use node::{Attributes, Descendants, Node};

/// Errors from BML decoding
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected end of data at offset {offset}: need {needed} bytes, {available} available")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Negative {field} count {count} at offset {offset}")]
    NegativeCount {
        field: &'static str,
        count: i32,
        offset: usize,
    },

    #[error("Declared {field} count {count} at offset {offset} exceeds the {remaining} remaining bytes")]
    CountTooLarge {
        field: &'static str,
        count: usize,
        offset: usize,
        remaining: usize,
    },

    #[error("Invalid UTF-16 string at offset {offset}")]
    InvalidUtf16 { offset: usize },

    #[error("Empty document: root node has no name")]
    EmptyDocument,
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnexpectedEof {
            offset: 8,
            needed: 4,
            available: 1,
        };
        assert!(err.to_string().contains("Unexpected end of data at offset 8"));

        let err = Error::NegativeCount {
            field: "child",
            count: -2,
            offset: 0,
        };
        assert!(err.to_string().contains("Negative child count -2"));

        let err = Error::CountTooLarge {
            field: "string",
            count: 1000,
            offset: 4,
            remaining: 6,
        };
        assert!(err.to_string().contains("exceeds the 6 remaining bytes"));

        let err = Error::InvalidUtf16 { offset: 12 };
        assert!(err.to_string().contains("Invalid UTF-16"));

        assert!(Error::EmptyDocument.to_string().contains("Empty document"));
    }
}
