//! Conversion between `serde_json` values and BSON documents.
//!
//! JSON is the dynamically typed native form: any JSON value can be handed
//! to [`json_to_document`], which decides per value which wire kind it maps
//! to and rejects kinds the codec cannot carry.

use serde_json::{Map, Number, Value};

use crate::error::BsonError;
use crate::options::CodecOptions;
use crate::value::{BsonDocument, BsonValue};

/// Converts a JSON object into a [`BsonDocument`].
///
/// Integers that fit in an `i32` become Int32, every other number becomes a
/// Double unless it is an integer too large for Int32, which is rejected.
/// `null` has no supported BSON kind and is rejected as well.
pub fn json_to_document(value: &Value, options: &CodecOptions) -> Result<BsonDocument, BsonError> {
    match value {
        Value::Object(map) => object_to_document(map, 0, options),
        other => Err(BsonError::NotAMapping(json_kind(other))),
    }
}

fn object_to_document(
    map: &Map<String, Value>,
    depth: usize,
    options: &CodecOptions,
) -> Result<BsonDocument, BsonError> {
    options.check_depth(depth)?;
    map.iter()
        .map(|(key, value)| {
            let value = json_to_value(value, depth, options)?;
            Ok::<_, BsonError>((key.clone(), value))
        })
        .collect()
}

fn json_to_value(
    value: &Value,
    depth: usize,
    options: &CodecOptions,
) -> Result<BsonValue, BsonError> {
    match value {
        Value::Null => Err(BsonError::UnencodableValue("null")),
        Value::Bool(b) => Ok(BsonValue::Boolean(*b)),
        Value::Number(n) => number_to_value(n),
        Value::String(s) => Ok(BsonValue::String(s.clone())),
        Value::Array(items) => {
            options.check_depth(depth + 1)?;
            items
                .iter()
                .map(|item| json_to_value(item, depth + 1, options))
                .collect::<Result<Vec<_>, _>>()
                .map(BsonValue::Array)
        }
        Value::Object(map) => object_to_document(map, depth + 1, options).map(BsonValue::Document),
    }
}

fn number_to_value(n: &Number) -> Result<BsonValue, BsonError> {
    if let Some(i) = n.as_i64() {
        return i32::try_from(i)
            .map(BsonValue::Int32)
            .map_err(|_| BsonError::UnencodableValue("integer outside the int32 range"));
    }
    if n.is_u64() {
        return Err(BsonError::UnencodableValue("integer outside the int32 range"));
    }
    n.as_f64()
        .map(BsonValue::Double)
        .ok_or(BsonError::UnencodableValue("number"))
}

/// Converts a decoded document into a JSON object.
///
/// Non-finite doubles have no JSON representation and become `null`.
pub fn document_to_json(doc: &BsonDocument) -> Value {
    Value::Object(
        doc.iter()
            .map(|(key, value)| (key.clone(), value_to_json(value)))
            .collect(),
    )
}

fn value_to_json(value: &BsonValue) -> Value {
    match value {
        BsonValue::Double(f) => Value::from(*f),
        BsonValue::String(s) => Value::String(s.clone()),
        BsonValue::Document(doc) => document_to_json(doc),
        BsonValue::Array(items) => Value::Array(items.iter().map(value_to_json).collect()),
        BsonValue::Boolean(b) => Value::Bool(*b),
        BsonValue::Int32(i) => Value::from(*i),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
