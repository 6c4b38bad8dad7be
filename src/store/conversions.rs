//! Conversions between JSON records and DynamoDB items.
//!
//! Pure functions, testable without a table.

use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::{Map, Value as JsonValue};

use crate::error::Result;
use crate::normalize::normalize;

use super::Item;

/// Convert a JSON object into a DynamoDB item.
pub fn json_to_item(record: Map<String, JsonValue>) -> Item {
    record
        .into_iter()
        .map(|(name, value)| (name, json_to_attribute(value)))
        .collect()
}

pub fn json_to_attribute(value: JsonValue) -> AttributeValue {
    match value {
        JsonValue::Null => AttributeValue::Null(true),
        JsonValue::Bool(b) => AttributeValue::Bool(b),
        JsonValue::Number(n) => AttributeValue::N(n.to_string()),
        JsonValue::String(s) => AttributeValue::S(s),
        JsonValue::Array(values) => {
            AttributeValue::L(values.into_iter().map(json_to_attribute).collect())
        }
        JsonValue::Object(map) => AttributeValue::M(json_to_item(map)),
    }
}

/// Text form of a JSON `pk`; numbers are keyed by their JSON text.
pub fn key_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(pk) => Some(pk.clone()),
        JsonValue::Number(pk) => Some(pk.to_string()),
        _ => None,
    }
}

/// Convert a DynamoDB item into a JSON object, normalizing numbers.
pub fn item_to_json(item: &Item) -> Result<Map<String, JsonValue>> {
    item.iter()
        .map(|(name, value)| -> Result<(String, JsonValue)> {
            Ok((name.clone(), attribute_to_json(value)?))
        })
        .collect()
}

pub fn attribute_to_json(value: &AttributeValue) -> Result<JsonValue> {
    let json = match value {
        AttributeValue::S(s) => JsonValue::String(s.clone()),
        AttributeValue::Bool(b) => JsonValue::Bool(*b),
        AttributeValue::Null(_) => JsonValue::Null,
        AttributeValue::L(values) => JsonValue::Array(
            values
                .iter()
                .map(attribute_to_json)
                .collect::<Result<Vec<_>>>()?,
        ),
        AttributeValue::M(map) => JsonValue::Object(item_to_json(map)?),
        other => JsonValue::Number(normalize(other)?),
    };
    Ok(json)
}
