//! BSON codec error type.

use docwire_buffers::BufferError;
use thiserror::Error;

/// Error type for BSON validation, decoding and encoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BsonError {
    /// Size, framing, terminator or element-name violation.
    #[error("malformed BSON buffer: {0}")]
    MalformedBuffer(&'static str),
    #[error("invalid UTF-8 in BSON text")]
    InvalidUtf8,
    #[error("BSON C-string contains an embedded NUL byte")]
    EmbeddedNul,
    #[error("unsupported BSON element type: 0x{0:02x}")]
    UnsupportedType(u8),
    #[error("BSON nesting exceeds the maximum depth of {0}")]
    DepthLimitExceeded(usize),
    /// Raw bytes were rejected while constructing a [`Document`](crate::Document).
    #[error("invalid BSON document: {0}")]
    InvalidDocument(#[source] Box<BsonError>),
    /// A native value of a kind the codec cannot encode, such as JSON `null`
    /// or an integer outside the int32 range. This is the invalid-document
    /// failure for mapping input; byte input uses [`BsonError::InvalidDocument`].
    /// Keys are always `String`, so there is no separate key-type error.
    #[error("cannot convert value of kind {0} to BSON")]
    UnencodableValue(&'static str),
    #[error("BSON document must be built from a mapping, got {0}")]
    NotAMapping(&'static str),
    #[error("BSON document of {0} bytes exceeds the int32 length limit")]
    DocumentTooLarge(usize),
}

impl BsonError {
    /// True for failures caused by invalid text (bad UTF-8 or a NUL inside a C-string).
    pub fn is_encoding_error(&self) -> bool {
        match self {
            BsonError::InvalidUtf8 | BsonError::EmbeddedNul => true,
            BsonError::InvalidDocument(inner) => inner.is_encoding_error(),
            _ => false,
        }
    }
}

impl From<BufferError> for BsonError {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::EndOfBuffer => BsonError::MalformedBuffer("unexpected end of buffer"),
            BufferError::MissingNul => BsonError::MalformedBuffer("unterminated C-string"),
            BufferError::InvalidUtf8 => BsonError::InvalidUtf8,
            BufferError::EmbeddedNul => BsonError::EmbeddedNul,
        }
    }
}
