//! normalizer.rs
//! Flattens any accepted shape into the canonical ordered event sequence.

use serde::{Deserialize, Serialize};

use crate::error::StreamError;
use crate::records::shapes::{ChannelValue, TickData, TickEntry, TickRow, TimestampPayload};

/// A canonical event before channel resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    pub timestamp: f64,
    pub label: String,
    pub ctype: String,
    pub value: f64,
}

/// Normalizes raw data into events sorted by timestamp.
///
/// Within one timestamp, event order follows input order; the global sort is
/// stable, so that intra-timestamp order survives.
pub fn normalize(data: TickData) -> Result<Vec<RawEvent>, StreamError> {
    let mut out = Vec::new();
    match data {
        TickData::ByTimestamp(pairs) => {
            for (t, payload) in pairs {
                push_payload(t, payload, &mut out)?;
            }
        }
        TickData::Rows(rows) => {
            for row in rows {
                match row {
                    TickRow::Flat(t, label, ctype, value) => {
                        push_event(t, label, ctype, value, &mut out)?;
                    }
                    TickRow::Timestamped(t, payload) => {
                        push_payload(t, payload, &mut out)?;
                    }
                }
            }
        }
    }
    out.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
    Ok(out)
}

fn push_payload(t: f64, payload: TimestampPayload, out: &mut Vec<RawEvent>) -> Result<(), StreamError> {
    match payload {
        TimestampPayload::One(entry) => push_entry(t, entry, out),
        TimestampPayload::Many(entries) => {
            for entry in entries {
                push_entry(t, entry, out)?;
            }
            Ok(())
        }
        TimestampPayload::ByLabel(pairs) => {
            for (label, value) in pairs {
                push_keyed(t, label, value, out)?;
            }
            Ok(())
        }
    }
}

fn push_entry(t: f64, entry: TickEntry, out: &mut Vec<RawEvent>) -> Result<(), StreamError> {
    match entry {
        TickEntry::Tuple(label, ctype, value) => push_event(t, label, ctype, value, out),
        TickEntry::Labelled { label, ctype, data } => push_event(t, label, ctype, data, out),
        TickEntry::Keyed(label, value) => push_keyed(t, label, value, out),
    }
}

fn push_keyed(t: f64, label: String, value: ChannelValue, out: &mut Vec<RawEvent>) -> Result<(), StreamError> {
    match value {
        ChannelValue::Tuple(ctype, value) => push_event(t, label, ctype, value, out),
        ChannelValue::Record { ctype, data } => push_event(t, label, ctype, data, out),
    }
}

fn push_event(
    t: f64,
    label: String,
    ctype: String,
    value: f64,
    out: &mut Vec<RawEvent>,
) -> Result<(), StreamError> {
    if !t.is_finite() {
        return Err(StreamError::MalformedRecord {
            context: format!("non-finite timestamp {} on channel '{}'", t, label),
        });
    }
    out.push(RawEvent { timestamp: t, label, ctype, value });
    Ok(())
}
