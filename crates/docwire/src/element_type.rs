//! BSON element tag bytes.

/// Every element tag the validator recognizes.
///
/// Only six of these carry values that the decoder and encoder understand;
/// the rest are skipped structurally by the validator and rejected by the
/// decoder. See [`ElementType::is_decodable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ElementType {
    /// 8-byte little-endian IEEE-754.
    Double = 0x01,
    /// int32 byte length (including the trailing zero), then UTF-8 text and 0x00.
    String = 0x02,
    EmbeddedDocument = 0x03,
    /// Embedded document keyed "0", "1", ...
    Array = 0x04,
    /// int32 length, then that many bytes.
    Binary = 0x05,
    Undefined = 0x06,
    ObjectId = 0x07,
    Boolean = 0x08,
    DateTime = 0x09,
    Null = 0x0A,
    /// Pattern and options, both C-strings.
    Regex = 0x0B,
    /// Namespace C-string followed by a 12-byte id.
    DbPointer = 0x0C,
    JavaScriptCode = 0x0D,
    Symbol = 0x0E,
    Int32 = 0x10,
}

/// Size of an ObjectId payload.
pub const OBJECT_ID_SIZE: usize = 12;
/// Size of a Date payload.
pub const DATE_SIZE: usize = 8;

impl ElementType {
    /// Maps a tag byte to its element type, or `None` for unknown tags.
    pub fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            0x01 => ElementType::Double,
            0x02 => ElementType::String,
            0x03 => ElementType::EmbeddedDocument,
            0x04 => ElementType::Array,
            0x05 => ElementType::Binary,
            0x06 => ElementType::Undefined,
            0x07 => ElementType::ObjectId,
            0x08 => ElementType::Boolean,
            0x09 => ElementType::DateTime,
            0x0A => ElementType::Null,
            0x0B => ElementType::Regex,
            0x0C => ElementType::DbPointer,
            0x0D => ElementType::JavaScriptCode,
            0x0E => ElementType::Symbol,
            0x10 => ElementType::Int32,
            _ => return None,
        })
    }

    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Whether values of this type can be decoded into a [`BsonValue`](crate::BsonValue).
    pub fn is_decodable(self) -> bool {
        matches!(
            self,
            ElementType::Double
                | ElementType::String
                | ElementType::EmbeddedDocument
                | ElementType::Array
                | ElementType::Boolean
                | ElementType::Int32
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            ElementType::Double => "double",
            ElementType::String => "string",
            ElementType::EmbeddedDocument => "document",
            ElementType::Array => "array",
            ElementType::Binary => "binary",
            ElementType::Undefined => "undefined",
            ElementType::ObjectId => "objectId",
            ElementType::Boolean => "bool",
            ElementType::DateTime => "date",
            ElementType::Null => "null",
            ElementType::Regex => "regex",
            ElementType::DbPointer => "dbPointer",
            ElementType::JavaScriptCode => "javascript",
            ElementType::Symbol => "symbol",
            ElementType::Int32 => "int",
        }
    }
}

impl TryFrom<u8> for ElementType {
    type Error = crate::BsonError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        ElementType::from_tag(tag).ok_or(crate::BsonError::UnsupportedType(tag))
    }
}
