//! BSON document encoder.
//!
//! All multi-byte integers are written in little-endian byte order. Elements
//! are emitted in the mapping's iteration order, so encoding the same
//! [`BsonDocument`] always yields the same bytes.

use docwire_buffers::Writer;

use crate::error::BsonError;
use crate::options::CodecOptions;
use crate::value::{BsonDocument, BsonValue};

/// Encodes a [`BsonDocument`] to bytes.
///
/// The top level is always a document; BSON has no scalar top-level encoding.
#[derive(Debug, Clone, Default)]
pub struct BsonEncoder {
    pub options: CodecOptions,
}

impl BsonEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CodecOptions) -> Self {
        Self { options }
    }

    /// Encodes a BSON document to bytes.
    pub fn encode(&self, fields: &BsonDocument) -> Result<Vec<u8>, BsonError> {
        let mut writer = Writer::new();
        self.write_document(&mut writer, fields.iter().map(|(k, v)| (k.as_str(), v)), 0)?;
        tracing::trace!(len = writer.len(), fields = fields.len(), "encoded BSON document");
        Ok(writer.flush())
    }

    fn write_document<'v>(
        &self,
        writer: &mut Writer,
        fields: impl Iterator<Item = (&'v str, &'v BsonValue)>,
        depth: usize,
    ) -> Result<(), BsonError> {
        self.options.check_depth(depth)?;
        let start = writer.len();
        // Reserve space for total length
        writer.i32_le(0);
        for (key, value) in fields {
            self.write_key_value(writer, key, value, depth)?;
        }
        writer.u8(0x00);
        let size = writer.len() - start;
        let declared = i32::try_from(size).map_err(|_| BsonError::DocumentTooLarge(size))?;
        writer.patch_i32_le(start, declared)?;
        Ok(())
    }

    fn write_key_value(
        &self,
        writer: &mut Writer,
        key: &str,
        value: &BsonValue,
        depth: usize,
    ) -> Result<(), BsonError> {
        writer.u8(value.element_type().tag());
        writer.cstring(key)?;
        match value {
            BsonValue::Double(f) => writer.f64_le(*f),
            BsonValue::String(s) => write_string(writer, s)?,
            BsonValue::Document(fields) => {
                let fields = fields.iter().map(|(k, v)| (k.as_str(), v));
                self.write_document(writer, fields, depth + 1)?;
            }
            BsonValue::Array(items) => {
                // Encode array as a document with numeric string keys
                let keys: Vec<String> = (0..items.len()).map(|i| i.to_string()).collect();
                let fields = keys.iter().map(String::as_str).zip(items.iter());
                self.write_document(writer, fields, depth + 1)?;
            }
            BsonValue::Boolean(b) => writer.u8(u8::from(*b)),
            BsonValue::Int32(i) => writer.i32_le(*i),
        }
        Ok(())
    }
}

/// Writes a BSON string: little-endian i32 (byte_count+1) + UTF-8 bytes + null byte.
fn write_string(writer: &mut Writer, s: &str) -> Result<(), BsonError> {
    let bytes = s.as_bytes();
    let len = bytes.len() + 1;
    let declared = i32::try_from(len).map_err(|_| BsonError::DocumentTooLarge(len))?;
    writer.i32_le(declared);
    writer.buf(bytes);
    writer.u8(0x00);
    Ok(())
}

/// Encodes `fields` with default options.
pub fn encode(fields: &BsonDocument) -> Result<Vec<u8>, BsonError> {
    BsonEncoder::new().encode(fields)
}
