//! Native values that map onto BSON elements.

use indexmap::IndexMap;

use crate::element_type::ElementType;

/// An insertion-ordered mapping from element names to values.
///
/// Iteration order is the order keys were first inserted, which is also the
/// order the encoder writes them. Re-inserting a key replaces its value in
/// place.
pub type BsonDocument = IndexMap<String, BsonValue>;

/// A value the codec can both encode and decode.
#[derive(Debug, Clone, PartialEq)]
pub enum BsonValue {
    /// BSON double (0x01)
    Double(f64),
    /// BSON UTF-8 string (0x02)
    String(String),
    /// Embedded BSON document (0x03)
    Document(BsonDocument),
    /// BSON array (0x04)
    Array(Vec<BsonValue>),
    /// BSON boolean (0x08)
    Boolean(bool),
    /// BSON int32 (0x10)
    Int32(i32),
}

impl BsonValue {
    /// The wire type this value encodes to.
    pub fn element_type(&self) -> ElementType {
        match self {
            BsonValue::Double(_) => ElementType::Double,
            BsonValue::String(_) => ElementType::String,
            BsonValue::Document(_) => ElementType::EmbeddedDocument,
            BsonValue::Array(_) => ElementType::Array,
            BsonValue::Boolean(_) => ElementType::Boolean,
            BsonValue::Int32(_) => ElementType::Int32,
        }
    }

    pub fn as_document(&self) -> Option<&BsonDocument> {
        match self {
            BsonValue::Document(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[BsonValue]> {
        match self {
            BsonValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            BsonValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for BsonValue {
    fn from(value: f64) -> Self {
        BsonValue::Double(value)
    }
}

impl From<i32> for BsonValue {
    fn from(value: i32) -> Self {
        BsonValue::Int32(value)
    }
}

impl From<bool> for BsonValue {
    fn from(value: bool) -> Self {
        BsonValue::Boolean(value)
    }
}

impl From<String> for BsonValue {
    fn from(value: String) -> Self {
        BsonValue::String(value)
    }
}

impl From<&str> for BsonValue {
    fn from(value: &str) -> Self {
        BsonValue::String(value.to_owned())
    }
}

impl From<BsonDocument> for BsonValue {
    fn from(value: BsonDocument) -> Self {
        BsonValue::Document(value)
    }
}

impl<T: Into<BsonValue>> From<Vec<T>> for BsonValue {
    fn from(items: Vec<T>) -> Self {
        BsonValue::Array(items.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_pick_the_matching_kind() {
        assert_eq!(BsonValue::from(1.5).element_type(), ElementType::Double);
        assert_eq!(BsonValue::from(7).element_type(), ElementType::Int32);
        assert_eq!(BsonValue::from(true).element_type(), ElementType::Boolean);
        assert_eq!(BsonValue::from("x").element_type(), ElementType::String);
        assert_eq!(
            BsonValue::from(vec![1, 2]),
            BsonValue::Array(vec![BsonValue::Int32(1), BsonValue::Int32(2)])
        );
        assert_eq!(
            BsonValue::from(BsonDocument::new()).element_type(),
            ElementType::EmbeddedDocument
        );
    }

    #[test]
    fn reinsert_keeps_position() {
        let mut doc = BsonDocument::new();
        doc.insert("a".into(), BsonValue::Int32(1));
        doc.insert("b".into(), BsonValue::Int32(2));
        doc.insert("a".into(), BsonValue::Int32(3));
        let keys: Vec<&str> = doc.keys().map(String::as_str).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(doc["a"], BsonValue::Int32(3));
    }
}
