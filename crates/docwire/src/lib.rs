//! BSON-style binary document codec.
//!
//! Converts between native key-value documents and the canonical BSON byte
//! layout, and checks whether a buffer is a well-formed document without
//! decoding it.
//!
//! A document on the wire is `int32 totalLength | element* | 0x00`, and an
//! element is `tag | name\0 | payload`. Six element kinds (double, string,
//! embedded document, array, boolean, int32) round-trip through the decoder
//! and encoder; the validator additionally recognizes binary, undefined,
//! ObjectId, date, null, regex, DBPointer, code and symbol payloads.
//!
//! # Example
//!
//! ```
//! use docwire::{is_valid, BsonValue, Document};
//! use serde_json::json;
//!
//! let doc = Document::from_json(&json!({"an array": [1, true, 3.8, "world"]})).unwrap();
//! assert!(is_valid(doc.as_bytes()));
//!
//! let fields = doc.to_mapping().unwrap();
//! assert_eq!(fields["an array"].as_array().unwrap()[3], BsonValue::from("world"));
//! ```

mod decoder;
mod document;
mod element_type;
mod encoder;
mod error;
mod json;
mod options;
mod validator;
mod value;

pub use decoder::{decode, BsonDecoder};
pub use document::Document;
pub use element_type::ElementType;
pub use encoder::{encode, BsonEncoder};
pub use error::BsonError;
pub use json::{document_to_json, json_to_document};
pub use options::{CodecOptions, DEFAULT_MAX_DEPTH};
pub use validator::{is_valid, is_valid_with, validate, validate_with};
pub use value::{BsonDocument, BsonValue};
