//! Slice-threading read/write helpers.
//!
//! Each reader takes the remaining input and hands back the decoded value
//! together with the unread tail.

use crate::{BufferError, Reader, Writer};

/// Reads a little-endian `i32` from the front of `buf`.
///
/// ```
/// use docwire_buffers::read_i32_le;
///
/// let (len, rest) = read_i32_le(&[5, 0, 0, 0, 0]).unwrap();
/// assert_eq!(len, 5);
/// assert_eq!(rest, &[0]);
/// ```
pub fn read_i32_le(buf: &[u8]) -> Result<(i32, &[u8]), BufferError> {
    let mut reader = Reader::new(buf);
    let val = reader.i32_le()?;
    Ok((val, reader.rest()))
}

/// Reads a zero-terminated UTF-8 string from the front of `buf`.
///
/// The terminator is consumed and not part of the returned text.
pub fn read_cstring(buf: &[u8]) -> Result<(&str, &[u8]), BufferError> {
    let mut reader = Reader::new(buf);
    let text = reader.cstr()?;
    Ok((text, reader.rest()))
}

/// Encodes `text` as UTF-8 followed by a single zero byte.
pub fn write_cstring(text: &str) -> Result<Vec<u8>, BufferError> {
    let mut writer = Writer::with_capacity(text.len() + 1);
    writer.cstring(text)?;
    Ok(writer.flush())
}
