//! Little-endian primitive reading for BML decoding
//!
//! Every read is bounds-checked against the remaining input before any
//! allocation happens, since the format carries no checksum or length
//! signalling beyond the declared counts themselves.

use byteorder::{ByteOrder, LittleEndian};

use crate::{Error, Result};

/// Size of an encoded `Int32`
pub const INT32_SIZE: usize = 4;

/// Cursor over an in-memory BML byte buffer
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current byte offset
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Take the next `n` bytes, failing on a short read
    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(Error::UnexpectedEof {
                offset: self.pos,
                needed: n,
                available: self.remaining(),
            });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Read a signed little-endian 32-bit integer
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(LittleEndian::read_i32(self.take(INT32_SIZE)?))
    }

    /// Read a non-negative element count whose elements each occupy at
    /// least `min_element_size` bytes.
    ///
    /// Negative counts and counts that cannot possibly fit in the remaining
    /// input are rejected before the caller allocates anything.
    pub fn read_count(&mut self, field: &'static str, min_element_size: usize) -> Result<usize> {
        let offset = self.pos;
        let count = self.read_i32()?;
        if count < 0 {
            return Err(Error::NegativeCount {
                field,
                count,
                offset,
            });
        }

        let count = count as usize;
        let remaining = self.remaining();
        if count.saturating_mul(min_element_size) > remaining {
            return Err(Error::CountTooLarge {
                field,
                count,
                offset,
                remaining,
            });
        }

        Ok(count)
    }

    /// Read a length-prefixed UTF-16LE string
    ///
    /// The prefix is a character count, not a byte count. Counts `<= 0`
    /// denote the empty string and consume only the prefix.
    pub fn read_string(&mut self) -> Result<String> {
        let offset = self.pos;
        let chars = self.read_i32()?;
        if chars <= 0 {
            return Ok(String::new());
        }

        let byte_len = (chars as usize) * 2;
        let remaining = self.remaining();
        if byte_len > remaining {
            return Err(Error::CountTooLarge {
                field: "string",
                count: chars as usize,
                offset,
                remaining,
            });
        }

        let bytes = self.take(byte_len)?;
        let units = bytes.chunks_exact(2).map(LittleEndian::read_u16);
        char::decode_utf16(units)
            .collect::<std::result::Result<String, _>>()
            .map_err(|_| Error::InvalidUtf16 { offset })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16(s: &str) -> Vec<u8> {
        let mut out = Vec::new();
        let units: Vec<u16> = s.encode_utf16().collect();
        out.extend_from_slice(&(units.len() as i32).to_le_bytes());
        for unit in units {
            out.extend_from_slice(&unit.to_le_bytes());
        }
        out
    }

    #[test]
    fn test_read_i32_little_endian() {
        let data = [0x01, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0xff];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.read_i32().unwrap(), 1);
        assert_eq!(reader.read_i32().unwrap(), -1);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_read_i32_short() {
        let data = [0x01, 0x00];
        let mut reader = Reader::new(&data);
        assert!(matches!(
            reader.read_i32(),
            Err(Error::UnexpectedEof {
                offset: 0,
                needed: 4,
                available: 2
            })
        ));
    }

    #[test]
    fn test_read_string_utf16() {
        let data = utf16("森林 track");
        let mut reader = Reader::new(&data);
        assert_eq!(reader.read_string().unwrap(), "森林 track");
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_non_positive_string_length_consumes_only_prefix() {
        for count in [0i32, -1, i32::MIN] {
            let mut data = count.to_le_bytes().to_vec();
            data.extend_from_slice(&[0x41, 0x00]);
            let mut reader = Reader::new(&data);
            assert_eq!(reader.read_string().unwrap(), "");
            assert_eq!(reader.position(), 4);
        }
    }

    #[test]
    fn test_string_length_is_in_code_units() {
        // 2 characters declared, only 3 bytes present
        let data = [0x02, 0x00, 0x00, 0x00, 0x41, 0x00, 0x42];
        let mut reader = Reader::new(&data);
        assert!(matches!(
            reader.read_string(),
            Err(Error::CountTooLarge { field: "string", count: 2, .. })
        ));
    }

    #[test]
    fn test_huge_string_length_fails_fast() {
        let data = i32::MAX.to_le_bytes();
        let mut reader = Reader::new(&data);
        assert!(matches!(
            reader.read_string(),
            Err(Error::CountTooLarge { .. })
        ));
    }

    #[test]
    fn test_unpaired_surrogate() {
        let mut data = 1i32.to_le_bytes().to_vec();
        data.extend_from_slice(&0xd800u16.to_le_bytes());
        let mut reader = Reader::new(&data);
        assert!(matches!(
            reader.read_string(),
            Err(Error::InvalidUtf16 { offset: 0 })
        ));
    }

    #[test]
    fn test_read_count_rejects_negative() {
        let data = (-3i32).to_le_bytes();
        let mut reader = Reader::new(&data);
        assert!(matches!(
            reader.read_count("attribute", 8),
            Err(Error::NegativeCount {
                field: "attribute",
                count: -3,
                offset: 0
            })
        ));
    }

    #[test]
    fn test_read_count_rejects_oversized() {
        let mut data = 3i32.to_le_bytes().to_vec();
        data.extend_from_slice(&[0u8; 8]);
        let mut reader = Reader::new(&data);
        // Three children need at least 12 bytes, only 8 remain
        assert!(matches!(
            reader.read_count("child", 4),
            Err(Error::CountTooLarge {
                count: 3,
                remaining: 8,
                ..
            })
        ));
    }
}
