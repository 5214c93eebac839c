use crate::common::{codec, error, field};

use aws_sdk_dynamodb::types;
use serde::{Deserialize, Serialize};

/// Scalar type a key attribute may be declared with.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum KeyAttributeType {
    /// Text key.
    #[default]
    String,
    /// Decimal key.
    Number,
    /// Binary key.
    Binary,
}

impl From<KeyAttributeType> for types::ScalarAttributeType {
    fn from(attribute_type: KeyAttributeType) -> Self {
        match attribute_type {
            KeyAttributeType::String => Self::S,
            KeyAttributeType::Number => Self::N,
            KeyAttributeType::Binary => Self::B,
        }
    }
}

impl TryFrom<&types::ScalarAttributeType> for KeyAttributeType {
    type Error = error::Error;

    fn try_from(attribute_type: &types::ScalarAttributeType) -> error::Result<Self> {
        match attribute_type {
            types::ScalarAttributeType::S => Ok(Self::String),
            types::ScalarAttributeType::N => Ok(Self::Number),
            types::ScalarAttributeType::B => Ok(Self::Binary),
            other => Err(error::Error::InvalidResponse {
                message: format!("Unsupported key attribute type '{}'", other.as_str()),
            }),
        }
    }
}

/// Key attribute declaration (name and scalar type).
///
/// ```rust
/// use dynamodb_console::common::key;
///
/// let partition_key = key::KeyAttribute {
///     name: "id".to_string(),
///     attribute_type: key::KeyAttributeType::String,
/// };
/// ```
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct KeyAttribute {
    /// The attribute name.
    pub name: String,
    /// The declared scalar type.
    #[serde(rename = "type")]
    pub attribute_type: KeyAttributeType,
}

/// Key component.
///
/// ```rust
/// use dynamodb_console::common::{field::Field, key};
///
/// let key = key::Key {
///     name: "id".to_string(),
///     value: Field::string("1"),
/// };
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Key {
    /// The attribute name of the key.
    pub name: String,
    /// The value of the key.
    pub value: field::Field,
}

/// Primary key (partition key and optional sort key).
///
/// ```rust
/// use dynamodb_console::common::{field::Field, key};
///
/// let keys = key::Keys {
///     partition_key: key::Key {
///         name: "id".to_string(),
///         value: Field::string("1"),
///     },
///     ..Default::default()
/// };
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Keys {
    /// The partition key (required).
    pub partition_key: Key,
    /// The sort key (optional, only for tables with composite primary keys).
    pub sort_key: Option<Key>,
}

impl TryFrom<Keys> for field::NativeItem {
    type Error = error::Error;

    fn try_from(keys: Keys) -> error::Result<Self> {
        let mut item = field::Item::from([(keys.partition_key.name, keys.partition_key.value)]);
        if let Some(sort_key) = keys.sort_key {
            item.insert(sort_key.name, sort_key.value);
        }
        codec::encode_item(&item)
    }
}
