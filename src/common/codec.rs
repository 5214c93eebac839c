//! Conversion between [`Field`]/[`Item`] and DynamoDB's native attribute values.
//!
//! Nested fields are addressed by suffixing the parent name with the list index
//! or map key (`tags[2]`, `meta[x]`), in both directions, so error messages point
//! at the exact attribute.

use crate::common::error::{Error, Result};
use crate::common::field::{Field, FieldType, Item, NativeItem};

use aws_sdk_dynamodb::{primitives::Blob, types::AttributeValue};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use serde_json::Value;

fn child_name(name: &str, suffix: impl std::fmt::Display) -> String {
    format!("{name}[{suffix}]")
}

/// Number text as handed to the store. Anything the host would treat as numeric
/// passes; the store validates the content. JSON numerals keep their source text.
fn number_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn decode_base64(text: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(text.trim())
}

/// Encode one field into its native attribute value.
pub fn encode_field(name: &str, field: &Field) -> Result<AttributeValue> {
    let value = match &field.value {
        Some(value) if !field.is_null() => value,
        _ => return Ok(AttributeValue::Null(true)),
    };
    let attribute_value = match field.field_type {
        FieldType::String => match value {
            Value::String(text) => AttributeValue::S(text.clone()),
            _ => {
                return Err(Error::invalid_field(
                    name,
                    format!("Field '{name}' was expected to be a string"),
                ));
            }
        },
        FieldType::StringSet => {
            let texts = value
                .as_array()
                .and_then(|values| {
                    values
                        .iter()
                        .map(|value| value.as_str().map(str::to_string))
                        .collect::<Option<Vec<_>>>()
                })
                .ok_or_else(|| {
                    Error::invalid_field(
                        name,
                        format!("Field '{name}' was expected to be a list of strings"),
                    )
                })?;
            AttributeValue::Ss(texts)
        }
        FieldType::Number => {
            let text = number_text(value).ok_or_else(|| {
                Error::invalid_field(name, format!("Field '{name}' was expected to be a number"))
            })?;
            AttributeValue::N(text)
        }
        FieldType::NumberSet => {
            let values = value.as_array().ok_or_else(|| {
                Error::invalid_field(
                    name,
                    format!("Field '{name}' was expected to be a list of numbers"),
                )
            })?;
            let mut texts = Vec::with_capacity(values.len());
            for (index, value) in values.iter().enumerate() {
                let text = number_text(value).ok_or_else(|| {
                    Error::invalid_field(
                        name,
                        format!("Item at index {index} of field '{name}' was expected to be a number"),
                    )
                })?;
                texts.push(text);
            }
            AttributeValue::Ns(texts)
        }
        FieldType::Binary => {
            let text = value.as_str().ok_or_else(|| {
                Error::invalid_field(
                    name,
                    format!("Field '{name}' was expected to be a Base64-encoded string"),
                )
            })?;
            let data = decode_base64(text).map_err(|source| Error::InvalidField {
                field: name.to_string(),
                message: format!("Field '{name}' contains invalid Base64-encoded data"),
                source: Some(source),
            })?;
            AttributeValue::B(Blob::new(data))
        }
        FieldType::BinarySet => {
            let texts = value
                .as_array()
                .and_then(|values| values.iter().map(Value::as_str).collect::<Option<Vec<_>>>())
                .ok_or_else(|| {
                    Error::invalid_field(
                        name,
                        format!("Field '{name}' was expected to be a list of Base64-encoded strings"),
                    )
                })?;
            let mut blobs = Vec::with_capacity(texts.len());
            for (index, text) in texts.into_iter().enumerate() {
                let data = decode_base64(text).map_err(|source| Error::InvalidField {
                    field: name.to_string(),
                    message: format!(
                        "Item at index {index} of field '{name}' contains invalid Base64-encoded data"
                    ),
                    source: Some(source),
                })?;
                blobs.push(Blob::new(data));
            }
            AttributeValue::Bs(blobs)
        }
        FieldType::Bool => match value {
            Value::Bool(flag) => AttributeValue::Bool(*flag),
            _ => {
                return Err(Error::invalid_field(
                    name,
                    format!("Field '{name}' was expected to be a boolean"),
                ));
            }
        },
        FieldType::List => {
            let values = value.as_array().ok_or_else(|| {
                Error::invalid_field(name, format!("Field '{name}' was expected to be a list"))
            })?;
            let mut attribute_values = Vec::with_capacity(values.len());
            for (index, value) in values.iter().enumerate() {
                if value.is_null() {
                    continue;
                }
                let path = child_name(name, index);
                let child = nested_field(&path, value)?;
                attribute_values.push(encode_field(&path, &child)?);
            }
            AttributeValue::L(attribute_values)
        }
        FieldType::Map => {
            let entries = value.as_object().ok_or_else(|| {
                Error::invalid_field(name, format!("Field '{name}' was expected to be a map"))
            })?;
            let mut attribute_values = NativeItem::with_capacity(entries.len());
            for (key, value) in entries {
                if key.is_empty() || value.is_null() {
                    continue;
                }
                let path = child_name(name, key);
                let child = nested_field(&path, value)?;
                attribute_values.insert(key.clone(), encode_field(&path, &child)?);
            }
            AttributeValue::M(attribute_values)
        }
        FieldType::Null => AttributeValue::Null(true),
        FieldType::Unknown => {
            return Err(Error::invalid_field(
                name,
                format!("Unexpected field type '{}' of field '{name}'", field.field_type.as_str()),
            ));
        }
    };
    Ok(attribute_value)
}

fn nested_field(name: &str, value: &Value) -> Result<Field> {
    Field::deserialize(value).map_err(|err| {
        Error::invalid_field(name, format!("Field '{name}' is not a valid field: {err}"))
    })
}

/// Encode a whole item. Empty attribute names are rejected.
pub fn encode_item(item: &Item) -> Result<NativeItem> {
    let mut native_item = NativeItem::with_capacity(item.len());
    for (name, field) in item {
        if name.trim().is_empty() {
            return Err(Error::invalid_field(name, "DynamoDB field name cannot be empty"));
        }
        native_item.insert(name.clone(), encode_field(name, field)?);
    }
    Ok(native_item)
}

/// Validate decimal text with a locale-independent grammar:
/// `[+-]digits[.digits][(e|E)[+-]digits]`, at least one mantissa digit.
fn parse_decimal(text: &str) -> Option<&str> {
    let text = text.trim();
    let bytes = text.as_bytes();
    let mut position = 0;
    let digits = |position: &mut usize| {
        let start = *position;
        while *position < bytes.len() && bytes[*position].is_ascii_digit() {
            *position += 1;
        }
        *position - start
    };
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        position += 1;
    }
    let mut mantissa = digits(&mut position);
    if bytes.get(position) == Some(&b'.') {
        position += 1;
        mantissa += digits(&mut position);
    }
    if mantissa == 0 {
        return None;
    }
    if matches!(bytes.get(position), Some(b'e' | b'E')) {
        position += 1;
        if matches!(bytes.get(position), Some(b'+' | b'-')) {
            position += 1;
        }
        if digits(&mut position) == 0 {
            return None;
        }
    }
    (position == bytes.len()).then_some(text)
}

fn decode_number(name: &str, text: &str) -> Result<String> {
    parse_decimal(text)
        .map(str::to_string)
        .ok_or_else(|| Error::MalformedAttribute {
            field: name.to_string(),
            message: format!("Attribute '{name}' contains an invalid number '{text}'"),
        })
}

/// Decode one native attribute value.
///
/// Values that cannot be classified become [`FieldType::Unknown`] fields instead of
/// failing the item. Unparseable numbers are an error: the store is authoritative,
/// so they point at a codec mismatch.
pub fn decode_attribute_value(name: &str, attribute_value: AttributeValue) -> Result<Field> {
    let field = match attribute_value {
        AttributeValue::Null(true) => Field::null(),
        AttributeValue::Bool(flag) => Field::bool(flag),
        AttributeValue::L(values) => {
            let mut fields = Vec::with_capacity(values.len());
            for (index, value) in values.into_iter().enumerate() {
                fields.push(decode_attribute_value(&child_name(name, index), value)?);
            }
            Field::list(fields)
        }
        AttributeValue::M(values) => {
            let mut fields = Vec::with_capacity(values.len());
            for (key, value) in values {
                let field = decode_attribute_value(&child_name(name, &key), value)?;
                fields.push((key, field));
            }
            Field::map(fields)
        }
        AttributeValue::B(blob) => Field::binary(blob.into_inner()),
        AttributeValue::Bs(blobs) => Field::binary_set(blobs.into_iter().map(Blob::into_inner)),
        AttributeValue::N(text) if !text.is_empty() => Field::number(decode_number(name, &text)?),
        AttributeValue::Ns(texts) => {
            let mut numbers = Vec::with_capacity(texts.len());
            for (index, text) in texts.iter().enumerate() {
                numbers.push(decode_number(&child_name(name, index), text)?);
            }
            Field::number_set(numbers)
        }
        AttributeValue::S(text) => Field::string(text),
        AttributeValue::Ss(texts) => Field::string_set(texts),
        _ => Field::unknown(),
    };
    Ok(field)
}

/// Decode a whole native item.
pub fn decode_item(native_item: NativeItem) -> Result<Item> {
    let mut item = Item::with_capacity(native_item.len());
    for (name, attribute_value) in native_item {
        let field = decode_attribute_value(&name, attribute_value)?;
        item.insert(name, field);
    }
    Ok(item)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use serde_json::json;
    use std::collections;

    fn field(json: Value) -> Field {
        serde_json::from_value(json).unwrap()
    }

    #[rstest]
    #[case::string(json!({"type": "String", "value": "a"}), AttributeValue::S("a".to_string()))]
    #[case::number_text(json!({"type": "Number", "value": "2.5"}), AttributeValue::N("2.5".to_string()))]
    #[case::number_json(json!({"type": "Number", "value": 42}), AttributeValue::N("42".to_string()))]
    #[case::number_json_large(
        serde_json::from_str(r#"{"type": "Number", "value": 12345678901234567890123456789}"#).unwrap(),
        AttributeValue::N("12345678901234567890123456789".to_string())
    )]
    #[case::number_json_long_fraction(
        serde_json::from_str(r#"{"type": "Number", "value": 0.10000000000000000555111512312578270}"#).unwrap(),
        AttributeValue::N("0.10000000000000000555111512312578270".to_string())
    )]
    #[case::number_set_json_large(
        serde_json::from_str(r#"{"type": "NumberSet", "value": [18446744073709551616, -9.999999999999999999e-99]}"#).unwrap(),
        AttributeValue::Ns(vec![
            "18446744073709551616".to_string(),
            "-9.999999999999999999e-99".to_string(),
        ])
    )]
    #[case::number_unvalidated(
        json!({"type": "Number", "value": "abc"}),
        AttributeValue::N("abc".to_string())
    )]
    #[case::bool(json!({"type": "Bool", "value": false}), AttributeValue::Bool(false))]
    #[case::null(json!({"type": "Null"}), AttributeValue::Null(true))]
    #[case::missing_payload(json!({"type": "String", "value": null}), AttributeValue::Null(true))]
    #[case::unknown_without_payload(json!({"type": "Tuple"}), AttributeValue::Null(true))]
    #[case::binary(
        json!({"type": "Binary", "value": "SGVsbG8="}),
        AttributeValue::B(Blob::new(vec![0x48, 0x65, 0x6c, 0x6c, 0x6f]))
    )]
    #[case::string_set_empty(json!({"type": "StringSet", "value": []}), AttributeValue::Ss(vec![]))]
    #[case::number_set(
        json!({"type": "NumberSet", "value": ["1", 2.5, "-3"]}),
        AttributeValue::Ns(vec!["1".to_string(), "2.5".to_string(), "-3".to_string()])
    )]
    #[case::binary_set(
        json!({"type": "BinarySet", "value": ["AQI=", "Aw=="]}),
        AttributeValue::Bs(vec![Blob::new(vec![1, 2]), Blob::new(vec![3])])
    )]
    #[case::list_skips_nulls(
        json!({
            "type": "List",
            "value": [
                {"type": "String", "value": "a"},
                null,
                {"type": "Null"}
            ]
        }),
        AttributeValue::L(vec![AttributeValue::S("a".to_string()), AttributeValue::Null(true)])
    )]
    #[case::map_skips_empty_keys_and_nulls(
        json!({
            "type": "Map",
            "value": {
                "a": {"type": "Number", "value": 1},
                "": {"type": "String", "value": "b"},
                "c": null
            }
        }),
        AttributeValue::M(collections::HashMap::from([(
            "a".to_string(),
            AttributeValue::N("1".to_string())
        )]))
    )]
    fn test_encode_field(#[case] json: Value, #[case] expected: AttributeValue) {
        let actual = encode_field("f", &field(json)).unwrap();
        assert_eq!(actual, expected);
    }

    #[rstest]
    #[case::string_not_text(json!({"type": "String", "value": 1}), "f", "Field 'f' was expected to be a string")]
    #[case::string_set_mixed(
        json!({"type": "StringSet", "value": ["a", 1]}),
        "f",
        "Field 'f' was expected to be a list of strings"
    )]
    #[case::number_bool(json!({"type": "Number", "value": true}), "f", "Field 'f' was expected to be a number")]
    #[case::number_set_element(
        json!({"type": "NumberSet", "value": [1, 2, {}]}),
        "f",
        "Item at index 2 of field 'f' was expected to be a number"
    )]
    #[case::binary_not_base64(
        json!({"type": "Binary", "value": "not base64!"}),
        "f",
        "Field 'f' contains invalid Base64-encoded data"
    )]
    #[case::binary_set_element(
        json!({"type": "BinarySet", "value": ["AQI=", "Aw==", "%%"]}),
        "f",
        "Item at index 2 of field 'f' contains invalid Base64-encoded data"
    )]
    #[case::bool_text(json!({"type": "Bool", "value": "true"}), "f", "Field 'f' was expected to be a boolean")]
    #[case::unknown(json!({"type": "Tuple", "value": 1}), "f", "Unexpected field type 'Unknown' of field 'f'")]
    #[case::list_element(
        json!({
            "type": "List",
            "value": [
                {"type": "String", "value": "a"},
                {"type": "String", "value": "b"},
                {"type": "Bool", "value": "c"}
            ]
        }),
        "f[2]",
        "Field 'f[2]' was expected to be a boolean"
    )]
    #[case::map_entry(
        json!({
            "type": "Map",
            "value": {
                "x": {"type": "Binary", "value": "?"}
            }
        }),
        "f[x]",
        "Field 'f[x]' contains invalid Base64-encoded data"
    )]
    #[case::nested_path(
        json!({
            "type": "List",
            "value": [
                {"type": "Map", "value": {"tags": {"type": "List", "value": [{"type": "Number", "value": []}]}}}
            ]
        }),
        "f[0][tags][0]",
        "Field 'f[0][tags][0]' was expected to be a number"
    )]
    #[case::list_element_not_field(json!({"type": "List", "value": ["a"]}), "f[0]", "")]
    fn test_encode_field_invalid(#[case] json: Value, #[case] path: &str, #[case] message: &str) {
        let err = encode_field("f", &field(json)).unwrap_err();
        assert_eq!(err.code(), "InvalidField");
        assert_eq!(err.status(), 400);
        assert_eq!(err.field(), Some(path));
        if !message.is_empty() {
            assert_eq!(err.to_string(), message);
        }
    }

    #[test]
    fn test_encode_binary_keeps_cause() {
        let err = encode_field("f", &field(json!({"type": "Binary", "value": "@@"}))).unwrap_err();
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_encode_item_rejects_empty_name() {
        let item = Item::from([
            ("a".to_string(), Field::string("b")),
            ("".to_string(), Field::string("c")),
        ]);
        let err = encode_item(&item).unwrap_err();
        assert_eq!(err.code(), "InvalidField");
        assert_eq!(err.to_string(), "DynamoDB field name cannot be empty");
    }

    #[test]
    fn test_encode_item_error_path() {
        let item = Item::from([(
            "tags".to_string(),
            Field::list([Field::string("a"), Field::string("b"), Field {
                field_type: FieldType::Bool,
                value: Some(json!(1)),
            }]),
        )]);
        let err = encode_item(&item).unwrap_err();
        assert_eq!(err.field(), Some("tags[2]"));
    }

    #[rstest]
    #[case::null(AttributeValue::Null(true), Field::null())]
    #[case::bool(AttributeValue::Bool(true), Field::bool(true))]
    #[case::binary(
        AttributeValue::B(Blob::new(vec![0x48, 0x65, 0x6c, 0x6c, 0x6f])),
        field(json!({"type": "Binary", "value": "SGVsbG8="}))
    )]
    #[case::number(AttributeValue::N(" -1.5e3 ".to_string()), Field::number("-1.5e3"))]
    #[case::number_empty(AttributeValue::N("".to_string()), Field::unknown())]
    #[case::null_unset(AttributeValue::Null(false), Field::unknown())]
    #[case::number_set(
        AttributeValue::Ns(vec!["1".to_string(), "2.5".to_string(), "-3".to_string()]),
        field(json!({"type": "NumberSet", "value": ["1", "2.5", "-3"]}))
    )]
    #[case::string(AttributeValue::S("".to_string()), Field::string(""))]
    #[case::string_set(
        AttributeValue::Ss(vec!["a".to_string(), "b".to_string()]),
        Field::string_set(["a", "b"])
    )]
    #[case::list(
        AttributeValue::L(vec![AttributeValue::S("a".to_string()), AttributeValue::Null(true)]),
        Field::list([Field::string("a"), Field::null()])
    )]
    #[case::map(
        AttributeValue::M(collections::HashMap::from([(
            "a".to_string(),
            AttributeValue::Bs(vec![Blob::new(vec![1, 2])])
        )])),
        field(json!({
            "type": "Map",
            "value": {"a": {"type": "BinarySet", "value": ["AQI="]}}
        }))
    )]
    fn test_decode_attribute_value(#[case] attribute_value: AttributeValue, #[case] expected: Field) {
        let actual = decode_attribute_value("f", attribute_value).unwrap();
        assert_eq!(actual, expected);
    }

    #[rstest]
    #[case::top_level(AttributeValue::N("1,5".to_string()), "f")]
    #[case::set_element(AttributeValue::Ns(vec!["1".to_string(), "e5".to_string()]), "f[1]")]
    #[case::nested(
        AttributeValue::L(vec![AttributeValue::M(collections::HashMap::from([(
            "n".to_string(),
            AttributeValue::N("1.2.3".to_string())
        )]))]),
        "f[0][n]"
    )]
    fn test_decode_malformed_number(#[case] attribute_value: AttributeValue, #[case] path: &str) {
        let err = decode_attribute_value("f", attribute_value).unwrap_err();
        assert_eq!(err.code(), "MalformedAttribute");
        assert_eq!(err.field(), Some(path));
    }

    #[rstest]
    #[case::integer("42", true)]
    #[case::signed_fraction("-0.5", true)]
    #[case::leading_dot(".5", true)]
    #[case::trailing_dot("5.", true)]
    #[case::exponent("1E+10", true)]
    #[case::large("123456789012345678901234567890123456789", true)]
    #[case::sign_only("-", false)]
    #[case::dot_only(".", false)]
    #[case::bare_exponent("1e", false)]
    #[case::comma("1,5", false)]
    #[case::text("NaN", false)]
    fn test_parse_decimal(#[case] text: &str, #[case] valid: bool) {
        assert_eq!(parse_decimal(text).is_some(), valid);
    }

    #[rstest]
    #[case::string(Field::string("a"))]
    #[case::number(Field::number("-3.25"))]
    #[case::binary(Field::binary(b"Hello"))]
    #[case::bool(Field::bool(false))]
    #[case::null(Field::null())]
    #[case::string_set(Field::string_set(["a"]))]
    #[case::binary_set(Field::binary_set([[0u8, 255], [1, 2]]))]
    #[case::list(Field::list([Field::number(1), Field::list([Field::string("b")])]))]
    #[case::map(Field::map([
        ("a".to_string(), Field::bool(true)),
        ("b".to_string(), Field::map([("c".to_string(), Field::binary([7u8]))])),
    ]))]
    fn test_round_trip(#[case] field: Field) {
        let encoded = encode_field("f", &field).unwrap();
        let decoded = decode_attribute_value("f", encoded.clone()).unwrap();
        assert_eq!(encode_field("f", &decoded).unwrap(), encoded);
        assert_eq!(decoded, field);
    }

    #[test]
    fn test_number_set_round_trip() {
        let field = field(json!({"type": "NumberSet", "value": ["1", "2.5", "-3"]}));
        let encoded = encode_field("f", &field).unwrap();
        let decoded = decode_attribute_value("f", encoded).unwrap();
        let mut values: Vec<_> = decoded
            .value
            .unwrap()
            .as_array()
            .unwrap()
            .iter()
            .map(|value| value.as_str().unwrap().to_string())
            .collect();
        values.sort();
        assert_eq!(values, vec!["-3", "1", "2.5"]);
    }

    #[test]
    fn test_decode_item() {
        let native_item = NativeItem::from([
            ("id".to_string(), AttributeValue::S("1".to_string())),
            ("n".to_string(), AttributeValue::N("2".to_string())),
        ]);
        let item = decode_item(native_item).unwrap();
        assert_eq!(item.get("id"), Some(&Field::string("1")));
        assert_eq!(item.get("n"), Some(&Field::number(2)));
        assert_eq!(encode_item(&item).unwrap().len(), 2);
    }
}
