// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Field deserializers that never fail.
//!
//! Firmware versions differ in whether numbers are sent as JSON numbers or
//! as strings, so every helper accepts both and maps anything else to
//! "unset".

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Integer sent as a number or a numeric string.
pub fn int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.as_ref().and_then(value_to_int))
}

/// Text sent as a string, number or bool.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Some(v.to_string()),
        _ => None,
    })
}

/// Text with an empty-string default.
pub fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text(deserializer)?.unwrap_or_default())
}

/// List of strings; non-string entries are stringified, nulls dropped.
pub fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        Some(Value::String(s)) => vec![s],
        _ => Vec::new(),
    })
}

/// Per-phase values: an array keeps its positions, a scalar becomes a
/// single entry.
pub fn phases<'de, D>(deserializer: D) -> Result<Vec<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items.iter().map(value_to_float).collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(scalar) => vec![value_to_float(&scalar)],
    })
}

fn value_to_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn value_to_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "int")]
        number: Option<i64>,
        #[serde(default, deserialize_with = "phases")]
        phases: Vec<Option<f64>>,
        #[serde(default, deserialize_with = "text_list")]
        names: Vec<String>,
    }

    fn sample(json: &str) -> Sample {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn int_accepts_number_and_string() {
        assert_eq!(sample(r#"{"number": 42}"#).number, Some(42));
        assert_eq!(sample(r#"{"number": " 42 "}"#).number, Some(42));
        assert_eq!(sample(r#"{"number": "x"}"#).number, None);
        assert_eq!(sample(r#"{"number": null}"#).number, None);
        assert_eq!(sample("{}").number, None);
    }

    #[test]
    fn phases_keep_positions() {
        let p = sample(r#"{"phases": [230.1, "x", "229.5"]}"#);
        assert_eq!(p.phases, vec![Some(230.1), None, Some(229.5)]);
    }

    #[test]
    fn scalar_phase_is_one_entry() {
        assert_eq!(sample(r#"{"phases": "0.98"}"#).phases, vec![Some(0.98)]);
    }

    #[test]
    fn text_list_skips_nulls() {
        let p = sample(r#"{"names": ["Hall", null, 3]}"#);
        assert_eq!(p.names, vec!["Hall".to_string(), "3".to_string()]);
    }
}
