//! BSON document decoder.
//!
//! BSON is a little-endian binary format. The decoder expects input that
//! already passed [`validate`](crate::validate); it still bounds-checks every
//! read, so hostile input produces an error rather than a panic, but the
//! framing checks it performs are not a substitute for validation.

use docwire_buffers::Reader;

use crate::element_type::ElementType;
use crate::error::BsonError;
use crate::options::CodecOptions;
use crate::value::{BsonDocument, BsonValue};

/// BSON document decoder.
#[derive(Debug, Clone, Default)]
pub struct BsonDecoder {
    pub options: CodecOptions,
}

impl BsonDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CodecOptions) -> Self {
        Self { options }
    }

    /// Decodes the BSON document at the front of `data`.
    ///
    /// Bytes after the document's declared length are ignored.
    pub fn decode(&self, data: &[u8]) -> Result<BsonDocument, BsonError> {
        let mut reader = Reader::new(data);
        self.read_document(&mut reader, 0).inspect_err(|err| {
            tracing::debug!(len = data.len(), error = %err, "BSON decode failed");
        })
    }

    fn read_document(
        &self,
        reader: &mut Reader<'_>,
        depth: usize,
    ) -> Result<BsonDocument, BsonError> {
        self.options.check_depth(depth)?;
        let size = reader.i32_le()?;
        let size = usize::try_from(size)
            .ok()
            .filter(|&size| size >= 5)
            .ok_or(BsonError::MalformedBuffer("document length out of range"))?;
        // The length prefix has already been consumed.
        let mut elements = reader.cut(size - 5)?;
        if reader.u8()? != 0x00 {
            return Err(BsonError::MalformedBuffer("missing document terminator"));
        }

        let mut fields = BsonDocument::new();
        while !elements.is_empty() {
            let tag = elements.u8()?;
            let key = elements.cstr()?;
            let value = self.read_element_value(&mut elements, tag, depth)?;
            fields.insert(key.to_owned(), value);
        }
        Ok(fields)
    }

    fn read_element_value(
        &self,
        reader: &mut Reader<'_>,
        tag: u8,
        depth: usize,
    ) -> Result<BsonValue, BsonError> {
        match ElementType::try_from(tag)? {
            ElementType::Double => Ok(BsonValue::Double(reader.f64_le()?)),
            ElementType::String => Ok(BsonValue::String(read_string(reader)?)),
            ElementType::EmbeddedDocument => {
                Ok(BsonValue::Document(self.read_document(reader, depth + 1)?))
            }
            ElementType::Array => Ok(BsonValue::Array(self.read_array(reader, depth + 1)?)),
            ElementType::Boolean => Ok(BsonValue::Boolean(reader.u8()? == 0x01)),
            ElementType::Int32 => Ok(BsonValue::Int32(reader.i32_le()?)),
            ElementType::Binary
            | ElementType::Undefined
            | ElementType::ObjectId
            | ElementType::DateTime
            | ElementType::Null
            | ElementType::Regex
            | ElementType::DbPointer
            | ElementType::JavaScriptCode
            | ElementType::Symbol => Err(BsonError::UnsupportedType(tag)),
        }
    }

    /// Arrays travel as documents keyed "0", "1", ... Probing stops at the
    /// first missing index, so anything after a gap is dropped.
    fn read_array(
        &self,
        reader: &mut Reader<'_>,
        depth: usize,
    ) -> Result<Vec<BsonValue>, BsonError> {
        let mut fields = self.read_document(reader, depth)?;
        let mut items = Vec::with_capacity(fields.len());
        while let Some(value) = fields.swap_remove(items.len().to_string().as_str()) {
            items.push(value);
        }
        Ok(items)
    }
}

/// Reads a length-prefixed string: int32 byte count (including the trailing
/// zero), the UTF-8 text, then the zero.
fn read_string(reader: &mut Reader<'_>) -> Result<String, BsonError> {
    let len = reader.i32_le()?;
    let len = usize::try_from(len)
        .ok()
        .filter(|&len| len >= 1)
        .ok_or(BsonError::MalformedBuffer("string length out of range"))?;
    let text = reader.utf8(len - 1)?.to_owned();
    if reader.u8()? != 0x00 {
        return Err(BsonError::MalformedBuffer("string is not NUL-terminated"));
    }
    Ok(text)
}

/// Decodes the document at the front of `data` with default options.
pub fn decode(data: &[u8]) -> Result<BsonDocument, BsonError> {
    BsonDecoder::new().decode(data)
}
