//! json.rs
//! Structural dispatch from JSON values into the accepted tick data shapes.
//!
//! The shape of each node fully determines how it is destructured; anything
//! else fails with `MalformedRecord` carrying the offending fragment.

use serde_json::Value;

use crate::error::StreamError;
use crate::records::shapes::{ChannelValue, TickData, TickEntry, TickRow, TimestampPayload};

impl TickData {
    /// Parses raw tick data out of a JSON document.
    ///
    /// Object keys are timestamps and must parse as finite numbers. Map
    /// iteration preserves document order (the `preserve_order` feature),
    /// so intra-timestamp event order is retained.
    pub fn from_json(value: &Value) -> Result<TickData, StreamError> {
        match value {
            Value::Object(map) => {
                let mut pairs = Vec::with_capacity(map.len());
                for (key, payload) in map {
                    let t: f64 = key.parse().map_err(|_| malformed("timestamp key", value))?;
                    pairs.push((t, payload_from_json(payload)?));
                }
                Ok(TickData::ByTimestamp(pairs))
            }
            Value::Array(rows) => Ok(TickData::Rows(
                rows.iter().map(row_from_json).collect::<Result<_, _>>()?,
            )),
            _ => Err(malformed("tick data", value)),
        }
    }
}

fn row_from_json(value: &Value) -> Result<TickRow, StreamError> {
    let items = value.as_array().ok_or_else(|| malformed("row", value))?;
    match items.as_slice() {
        [t, label, ctype, data] if label.is_string() && ctype.is_string() => Ok(TickRow::Flat(
            number(t, value)?,
            label.as_str().unwrap().to_string(),
            ctype.as_str().unwrap().to_string(),
            number(data, value)?,
        )),
        [t, payload] if t.is_number() => {
            Ok(TickRow::Timestamped(number(t, value)?, payload_from_json(payload)?))
        }
        _ => Err(malformed("row", value)),
    }
}

fn payload_from_json(value: &Value) -> Result<TimestampPayload, StreamError> {
    match value {
        // A bare (label, type, value) tuple is a single entry; an array of
        // arrays/objects is a list of entries.
        Value::Array(items) => match items.as_slice() {
            [label, ctype, data] if label.is_string() && ctype.is_string() => {
                Ok(TimestampPayload::One(TickEntry::Tuple(
                    label.as_str().unwrap().to_string(),
                    ctype.as_str().unwrap().to_string(),
                    number(data, value)?,
                )))
            }
            _ => Ok(TimestampPayload::Many(
                items.iter().map(entry_from_json).collect::<Result<_, _>>()?,
            )),
        },
        Value::Object(map) => {
            if map.contains_key("label") {
                Ok(TimestampPayload::One(labelled_from_json(value)?))
            } else {
                let mut pairs = Vec::with_capacity(map.len());
                for (label, inner) in map {
                    pairs.push((label.clone(), channel_value_from_json(inner)?));
                }
                Ok(TimestampPayload::ByLabel(pairs))
            }
        }
        _ => Err(malformed("timestamp payload", value)),
    }
}

fn entry_from_json(value: &Value) -> Result<TickEntry, StreamError> {
    match value {
        Value::Array(items) => match items.as_slice() {
            [label, ctype, data] if label.is_string() && ctype.is_string() => Ok(TickEntry::Tuple(
                label.as_str().unwrap().to_string(),
                ctype.as_str().unwrap().to_string(),
                number(data, value)?,
            )),
            _ => Err(malformed("entry", value)),
        },
        Value::Object(map) => {
            if map.contains_key("label") {
                labelled_from_json(value)
            } else if map.len() == 1 {
                let (label, inner) = map.iter().next().unwrap();
                Ok(TickEntry::Keyed(label.clone(), channel_value_from_json(inner)?))
            } else {
                Err(malformed("entry", value))
            }
        }
        _ => Err(malformed("entry", value)),
    }
}

fn labelled_from_json(value: &Value) -> Result<TickEntry, StreamError> {
    let map = value.as_object().ok_or_else(|| malformed("labelled entry", value))?;
    match (map.get("label"), map.get("type"), map.get("data")) {
        (Some(Value::String(label)), Some(Value::String(ctype)), Some(data)) if map.len() == 3 => {
            Ok(TickEntry::Labelled {
                label: label.clone(),
                ctype: ctype.clone(),
                data: number(data, value)?,
            })
        }
        _ => Err(malformed("labelled entry", value)),
    }
}

fn channel_value_from_json(value: &Value) -> Result<ChannelValue, StreamError> {
    match value {
        Value::Array(items) => match items.as_slice() {
            [ctype, data] if ctype.is_string() => Ok(ChannelValue::Tuple(
                ctype.as_str().unwrap().to_string(),
                number(data, value)?,
            )),
            _ => Err(malformed("channel value", value)),
        },
        Value::Object(map) => match (map.get("type"), map.get("data")) {
            (Some(Value::String(ctype)), Some(data)) if map.len() == 2 => {
                Ok(ChannelValue::Record { ctype: ctype.clone(), data: number(data, value)? })
            }
            _ => Err(malformed("channel value", value)),
        },
        _ => Err(malformed("channel value", value)),
    }
}

fn number(value: &Value, enclosing: &Value) -> Result<f64, StreamError> {
    value.as_f64().ok_or_else(|| malformed("numeric field", enclosing))
}

fn malformed(what: &str, value: &Value) -> StreamError {
    StreamError::MalformedRecord { context: format!("unrecognized {} shape: {}", what, value) }
}
