//! Structural BSON validation.
//!
//! Walks a buffer and confirms it matches the document grammar without
//! materializing any values. Each step takes the unread input and returns the
//! tail left after the piece it consumed, so nested documents compose by
//! simply recursing on the remaining bytes.

use docwire_buffers::{read_cstring, read_i32_le};

use crate::element_type::{ElementType, DATE_SIZE, OBJECT_ID_SIZE};
use crate::error::BsonError;
use crate::options::CodecOptions;

/// Which element names are acceptable in the document being walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameMode {
    /// Object keys: any text.
    AnyName,
    /// Array keys: one or more ASCII digits. Numbering is not checked.
    DigitName,
}

impl NameMode {
    fn accepts(self, name: &str) -> bool {
        match self {
            NameMode::AnyName => true,
            NameMode::DigitName => !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit()),
        }
    }
}

/// Returns `true` if `data` is exactly one well-formed BSON document.
///
/// Malformed input of any kind yields `false`; this never panics. Only byte
/// slices are accepted:
///
/// ```compile_fail
/// docwire::is_valid("test");
/// ```
///
/// ```
/// assert!(docwire::is_valid(&[0x05, 0x00, 0x00, 0x00, 0x00]));
/// assert!(!docwire::is_valid(b"test"));
/// ```
pub fn is_valid(data: &[u8]) -> bool {
    is_valid_with(data, &CodecOptions::default())
}

/// [`is_valid`] with explicit options.
pub fn is_valid_with(data: &[u8], options: &CodecOptions) -> bool {
    match validate_with(data, options) {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(len = data.len(), error = %err, "rejecting malformed BSON buffer");
            false
        }
    }
}

/// Validates `data` as exactly one BSON document, reporting why it is not.
pub fn validate(data: &[u8]) -> Result<(), BsonError> {
    validate_with(data, &CodecOptions::default())
}

/// [`validate`] with explicit options.
pub fn validate_with(data: &[u8], options: &CodecOptions) -> Result<(), BsonError> {
    let rest = validate_document(data, NameMode::AnyName, 0, options)?;
    if !rest.is_empty() {
        return Err(BsonError::MalformedBuffer("trailing bytes after document"));
    }
    Ok(())
}

fn validate_document<'a>(
    data: &'a [u8],
    mode: NameMode,
    depth: usize,
    options: &CodecOptions,
) -> Result<&'a [u8], BsonError> {
    options.check_depth(depth)?;
    let (declared, _) = read_i32_le(data)?;
    let size = usize::try_from(declared)
        .map_err(|_| BsonError::MalformedBuffer("negative document length"))?;
    if size > data.len() {
        return Err(BsonError::MalformedBuffer("document length exceeds buffer"));
    }
    // Length prefix plus at least the terminator.
    if size < 5 {
        return Err(BsonError::MalformedBuffer("document too short"));
    }
    let body = &data[4..size];
    let (terminator, mut elements) = body
        .split_last()
        .ok_or(BsonError::MalformedBuffer("document too short"))?;
    if *terminator != 0x00 {
        return Err(BsonError::MalformedBuffer("missing document terminator"));
    }
    while !elements.is_empty() {
        elements = validate_element(elements, mode, depth, options)?;
    }
    Ok(&data[size..])
}

fn validate_element<'a>(
    data: &'a [u8],
    mode: NameMode,
    depth: usize,
    options: &CodecOptions,
) -> Result<&'a [u8], BsonError> {
    let (&tag, data) = data
        .split_first()
        .ok_or(BsonError::MalformedBuffer("unexpected end of buffer"))?;
    let (name, data) = read_cstring(data)?;
    if !mode.accepts(name) {
        return Err(BsonError::MalformedBuffer("array key is not a decimal index"));
    }
    let ty = ElementType::try_from(tag)?;
    validate_payload(ty, data, depth, options)
}

fn validate_payload<'a>(
    ty: ElementType,
    data: &'a [u8],
    depth: usize,
    options: &CodecOptions,
) -> Result<&'a [u8], BsonError> {
    match ty {
        ElementType::Double => skip(data, 8),
        ElementType::String | ElementType::JavaScriptCode | ElementType::Symbol => {
            validate_string(data)
        }
        ElementType::EmbeddedDocument => {
            validate_document(data, NameMode::AnyName, depth + 1, options)
        }
        ElementType::Array => validate_document(data, NameMode::DigitName, depth + 1, options),
        ElementType::Binary => {
            let (len, data) = read_i32_le(data)?;
            let len = usize::try_from(len)
                .map_err(|_| BsonError::MalformedBuffer("negative binary length"))?;
            skip(data, len)
        }
        ElementType::Undefined | ElementType::Null => Ok(data),
        ElementType::ObjectId => skip(data, OBJECT_ID_SIZE),
        ElementType::Boolean => skip(data, 1),
        ElementType::DateTime => skip(data, DATE_SIZE),
        ElementType::Regex => {
            let (_pattern, data) = read_cstring(data)?;
            let (_options, data) = read_cstring(data)?;
            Ok(data)
        }
        ElementType::DbPointer => {
            let (_namespace, data) = read_cstring(data)?;
            skip(data, OBJECT_ID_SIZE)
        }
        ElementType::Int32 => skip(data, 4),
    }
}

/// int32 length counting the trailing zero, then that many bytes ending in 0x00.
fn validate_string(data: &[u8]) -> Result<&[u8], BsonError> {
    let (len, data) = read_i32_le(data)?;
    let len = usize::try_from(len)
        .ok()
        .filter(|&len| len >= 1 && len <= data.len())
        .ok_or(BsonError::MalformedBuffer("string length out of range"))?;
    if data[len - 1] != 0x00 {
        return Err(BsonError::MalformedBuffer("string is not NUL-terminated"));
    }
    Ok(&data[len..])
}

fn skip(data: &[u8], n: usize) -> Result<&[u8], BsonError> {
    if data.len() < n {
        return Err(BsonError::MalformedBuffer("unexpected end of buffer"));
    }
    Ok(&data[n..])
}
