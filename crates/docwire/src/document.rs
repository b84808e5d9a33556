//! Immutable, validated BSON bytes.

use std::hash::{Hash, Hasher};

use crate::decoder::BsonDecoder;
use crate::encoder::BsonEncoder;
use crate::error::BsonError;
use crate::json::{document_to_json, json_to_document};
use crate::options::CodecOptions;
use crate::validator::validate_with;
use crate::value::BsonDocument;

/// A byte buffer known to hold exactly one well-formed BSON document.
///
/// Equality and hashing compare the raw bytes, so two documents with the same
/// fields in a different order are not equal. The options a document was
/// built with are kept for decoding it again and take no part in equality.
///
/// # Example
///
/// ```
/// use docwire::{BsonDocument, BsonValue, Document};
///
/// let mut fields = BsonDocument::new();
/// fields.insert("mike".into(), BsonValue::Int32(100));
///
/// let doc = Document::from_mapping(&fields).unwrap();
/// assert_eq!(
///     doc.as_bytes(),
///     [0x0F, 0x00, 0x00, 0x00, 0x10, b'm', b'i', b'k', b'e', 0x00, 0x64, 0x00, 0x00, 0x00, 0x00]
/// );
/// assert_eq!(doc.to_mapping().unwrap(), fields);
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    bytes: Vec<u8>,
    options: CodecOptions,
}

impl Document {
    /// Wraps `bytes` after validating them with default options.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self, BsonError> {
        Self::from_bytes_with(bytes, &CodecOptions::default())
    }

    /// Wraps `bytes` after validating them.
    ///
    /// Any validation failure is reported as [`BsonError::InvalidDocument`]
    /// wrapping the underlying cause.
    pub fn from_bytes_with(
        bytes: impl Into<Vec<u8>>,
        options: &CodecOptions,
    ) -> Result<Self, BsonError> {
        let bytes = bytes.into();
        validate_with(&bytes, options).map_err(|err| BsonError::InvalidDocument(Box::new(err)))?;
        tracing::trace!(len = bytes.len(), "accepted BSON document");
        Ok(Self {
            bytes,
            options: *options,
        })
    }

    /// Encodes `fields` into a new document.
    pub fn from_mapping(fields: &BsonDocument) -> Result<Self, BsonError> {
        Self::from_mapping_with(fields, &CodecOptions::default())
    }

    pub fn from_mapping_with(
        fields: &BsonDocument,
        options: &CodecOptions,
    ) -> Result<Self, BsonError> {
        let bytes = BsonEncoder::with_options(*options).encode(fields)?;
        debug_assert!(validate_with(&bytes, options).is_ok());
        Ok(Self {
            bytes,
            options: *options,
        })
    }

    /// Encodes a JSON object into a new document.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, BsonError> {
        Self::from_json_with(value, &CodecOptions::default())
    }

    pub fn from_json_with(
        value: &serde_json::Value,
        options: &CodecOptions,
    ) -> Result<Self, BsonError> {
        let fields = json_to_document(value, options)?;
        Self::from_mapping_with(&fields, options)
    }

    /// Decodes the held bytes with the options the document was built with.
    ///
    /// Fails with [`BsonError::UnsupportedType`] when the document holds an
    /// element kind that validates but cannot be decoded.
    pub fn to_mapping(&self) -> Result<BsonDocument, BsonError> {
        BsonDecoder::with_options(self.options).decode(&self.bytes)
    }

    pub fn to_json(&self) -> Result<serde_json::Value, BsonError> {
        self.to_mapping().map(|fields| document_to_json(&fields))
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Length in bytes, equal to the declared document length.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when the document has no elements.
    pub fn is_empty(&self) -> bool {
        self.bytes.len() == 5
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for Document {}

impl Hash for Document {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl AsRef<[u8]> for Document {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl PartialEq<[u8]> for Document {
    fn eq(&self, other: &[u8]) -> bool {
        self.bytes == other
    }
}

impl PartialEq<&[u8]> for Document {
    fn eq(&self, other: &&[u8]) -> bool {
        self.bytes == *other
    }
}

impl TryFrom<Vec<u8>> for Document {
    type Error = BsonError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl TryFrom<&[u8]> for Document {
    type Error = BsonError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl TryFrom<&BsonDocument> for Document {
    type Error = BsonError;

    fn try_from(fields: &BsonDocument) -> Result<Self, Self::Error> {
        Self::from_mapping(fields)
    }
}

impl From<Document> for Vec<u8> {
    fn from(doc: Document) -> Self {
        doc.bytes
    }
}
