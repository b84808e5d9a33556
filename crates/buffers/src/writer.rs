//! Binary buffer writer with auto-growing capacity.

use crate::BufferError;

/// A binary buffer writer that grows automatically as needed.
///
/// # Example
///
/// ```
/// use docwire_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u8(0x10);
/// writer.i32_le(100);
/// let data = writer.flush();
/// assert_eq!(data, [0x10, 0x64, 0x00, 0x00, 0x00]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Writer {
    /// The underlying byte buffer.
    pub uint8: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self { uint8: Vec::new() }
    }

    /// Creates a writer with room for `capacity` bytes before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            uint8: Vec::with_capacity(capacity),
        }
    }

    /// Current cursor position, which is also the number of bytes written.
    pub fn len(&self) -> usize {
        self.uint8.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uint8.is_empty()
    }

    /// Returns the written data and resets the writer.
    pub fn flush(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.uint8)
    }

    /// Writes an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.uint8.push(val);
    }

    /// Writes a signed 32-bit integer (little-endian).
    #[inline]
    pub fn i32_le(&mut self, val: i32) {
        self.uint8.extend_from_slice(&val.to_le_bytes());
    }

    /// Writes a 64-bit floating point number (little-endian).
    #[inline]
    pub fn f64_le(&mut self, val: f64) {
        self.uint8.extend_from_slice(&val.to_le_bytes());
    }

    /// Writes raw bytes.
    pub fn buf(&mut self, data: &[u8]) {
        self.uint8.extend_from_slice(data);
    }

    /// Writes UTF-8 text followed by a zero terminator.
    ///
    /// Nothing is written if `text` contains a zero byte.
    pub fn cstring(&mut self, text: &str) -> Result<(), BufferError> {
        if text.as_bytes().contains(&0) {
            return Err(BufferError::EmbeddedNul);
        }
        self.uint8.extend_from_slice(text.as_bytes());
        self.uint8.push(0);
        Ok(())
    }

    /// Overwrites four previously written bytes at `pos` with `val`.
    ///
    /// Used to back-fill a length prefix once the framed content is known.
    pub fn patch_i32_le(&mut self, pos: usize, val: i32) -> Result<(), BufferError> {
        let slot = self
            .uint8
            .get_mut(pos..pos + 4)
            .ok_or(BufferError::EndOfBuffer)?;
        slot.copy_from_slice(&val.to_le_bytes());
        Ok(())
    }
}
