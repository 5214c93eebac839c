use aws_sdk_dynamodb::types;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections;

/// Row in its caller-facing form: attribute name to [`Field`], in insertion order.
pub type Item = IndexMap<String, Field>;

/// Row in the provider-native form.
pub type NativeItem = collections::HashMap<String, types::AttributeValue>;

/// Type tag of a [`Field`].
///
/// Serialized by variant name. Any unrecognized name deserializes to [`FieldType::Unknown`].
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum FieldType {
    /// Raw bytes, carried as Base64 text.
    Binary,
    /// Set of byte sequences, each carried as Base64 text.
    BinarySet,
    /// Boolean.
    Bool,
    /// Ordered list of fields of any type.
    List,
    /// Map from attribute name to field.
    Map,
    /// Explicit null.
    Null,
    /// Decimal number.
    Number,
    /// Set of decimal numbers.
    NumberSet,
    /// Text.
    String,
    /// Set of texts.
    StringSet,
    /// Unclassifiable value.
    #[default]
    #[serde(other)]
    Unknown,
}

impl FieldType {
    /// Variant name, as it appears in serialized fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Binary => "Binary",
            Self::BinarySet => "BinarySet",
            Self::Bool => "Bool",
            Self::List => "List",
            Self::Map => "Map",
            Self::Null => "Null",
            Self::Number => "Number",
            Self::NumberSet => "NumberSet",
            Self::String => "String",
            Self::StringSet => "StringSet",
            Self::Unknown => "Unknown",
        }
    }
}

/// One attribute value in its JSON-friendly form.
///
/// The payload is untyped so a request body can be carried as-is and validated
/// against its tag when encoded. The constructors below always produce a payload
/// matching the tag; decoding only uses them.
///
/// ```rust
/// use dynamodb_console::common::field::{Field, FieldType};
///
/// let field = Field::binary(b"Hello");
/// assert_eq!(field.field_type, FieldType::Binary);
/// assert_eq!(field.value, Some(serde_json::Value::String("SGVsbG8=".to_string())));
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Field {
    /// Type tag.
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    /// Payload, `None` for null.
    #[serde(default)]
    pub value: Option<Value>,
}

impl Field {
    fn new(field_type: FieldType, value: Value) -> Self {
        Self {
            field_type,
            value: Some(value),
        }
    }

    /// Text field.
    pub fn string(value: impl Into<String>) -> Self {
        Self::new(FieldType::String, Value::String(value.into()))
    }

    /// Number field from its decimal text.
    pub fn number(value: impl ToString) -> Self {
        Self::new(FieldType::Number, Value::String(value.to_string()))
    }

    /// Binary field from raw bytes.
    pub fn binary(value: impl AsRef<[u8]>) -> Self {
        Self::new(FieldType::Binary, Value::String(STANDARD.encode(value)))
    }

    /// Boolean field.
    pub fn bool(value: bool) -> Self {
        Self::new(FieldType::Bool, Value::Bool(value))
    }

    /// Null field.
    pub fn null() -> Self {
        Self {
            field_type: FieldType::Null,
            value: None,
        }
    }

    /// Field that could not be classified.
    pub fn unknown() -> Self {
        Self::default()
    }

    /// String set field.
    pub fn string_set<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values
            .into_iter()
            .map(|value| Value::String(value.into()))
            .collect();
        Self::new(FieldType::StringSet, Value::Array(values))
    }

    /// Number set field from decimal texts.
    pub fn number_set<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        let values = values
            .into_iter()
            .map(|value| Value::String(value.to_string()))
            .collect();
        Self::new(FieldType::NumberSet, Value::Array(values))
    }

    /// Binary set field from raw byte sequences.
    pub fn binary_set<I, B>(values: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        let values = values
            .into_iter()
            .map(|value| Value::String(STANDARD.encode(value)))
            .collect();
        Self::new(FieldType::BinarySet, Value::Array(values))
    }

    /// List field.
    pub fn list(values: impl IntoIterator<Item = Field>) -> Self {
        let values = values.into_iter().map(Field::into_value).collect();
        Self::new(FieldType::List, Value::Array(values))
    }

    /// Map field.
    pub fn map(values: impl IntoIterator<Item = (String, Field)>) -> Self {
        let values = values
            .into_iter()
            .map(|(name, field)| (name, field.into_value()))
            .collect();
        Self::new(FieldType::Map, Value::Object(values))
    }

    /// JSON object form of this field, as nested in list and map payloads.
    pub fn into_value(self) -> Value {
        let mut object = Map::with_capacity(2);
        object.insert(
            "type".to_string(),
            Value::String(self.field_type.as_str().to_string()),
        );
        object.insert("value".to_string(), self.value.unwrap_or(Value::Null));
        Value::Object(object)
    }

    /// Whether this field encodes to the native null marker.
    pub fn is_null(&self) -> bool {
        self.field_type == FieldType::Null || matches!(self.value, None | Some(Value::Null))
    }
}
