//! shapes.rs
//! The exact set of accepted nested-data shapes, as tagged variants.
//!
//! All shapes are equivalent encodings of the same logical content: a list
//! of (timestamp, label, type, value) events. The normalizer flattens any
//! of them into the identical canonical sequence.

/// Raw tick data, at the outermost level.
#[derive(Debug, Clone, PartialEq)]
pub enum TickData {
    /// Mapping timestamp -> payload, in insertion order.
    ByTimestamp(Vec<(f64, TimestampPayload)>),
    /// A flat sequence of rows.
    Rows(Vec<TickRow>),
}

/// One row of a sequence-shaped input.
#[derive(Debug, Clone, PartialEq)]
pub enum TickRow {
    /// `(timestamp, label, type, value)`
    Flat(f64, String, String, f64),
    /// `(timestamp, payload)` where the payload carries one or more events.
    Timestamped(f64, TimestampPayload),
}

/// Everything recorded at a single timestamp.
#[derive(Debug, Clone, PartialEq)]
pub enum TimestampPayload {
    /// A single entry.
    One(TickEntry),
    /// A list of entries, order significant.
    Many(Vec<TickEntry>),
    /// Mapping label -> channel value, in insertion order.
    ByLabel(Vec<(String, ChannelValue)>),
}

/// One event without its timestamp.
#[derive(Debug, Clone, PartialEq)]
pub enum TickEntry {
    /// `(label, type, value)`
    Tuple(String, String, f64),
    /// `{label: .., type: .., data: ..}`
    Labelled { label: String, ctype: String, data: f64 },
    /// Single-key mapping `{label: channel-value}`.
    Keyed(String, ChannelValue),
}

/// The (type, value) part of an event when the label is carried by an
/// enclosing mapping key.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelValue {
    /// `(type, value)`
    Tuple(String, f64),
    /// `{type: .., data: ..}`
    Record { ctype: String, data: f64 },
}

impl TickData {
    pub fn by_timestamp(pairs: Vec<(f64, TimestampPayload)>) -> Self {
        TickData::ByTimestamp(pairs)
    }

    pub fn rows(rows: Vec<TickRow>) -> Self {
        TickData::Rows(rows)
    }
}

impl TickRow {
    pub fn flat(t: f64, label: impl Into<String>, ctype: impl Into<String>, value: f64) -> Self {
        TickRow::Flat(t, label.into(), ctype.into(), value)
    }

    pub fn timestamped(t: f64, payload: TimestampPayload) -> Self {
        TickRow::Timestamped(t, payload)
    }
}

impl TickEntry {
    pub fn tuple(label: impl Into<String>, ctype: impl Into<String>, value: f64) -> Self {
        TickEntry::Tuple(label.into(), ctype.into(), value)
    }

    pub fn labelled(label: impl Into<String>, ctype: impl Into<String>, data: f64) -> Self {
        TickEntry::Labelled { label: label.into(), ctype: ctype.into(), data }
    }

    pub fn keyed(label: impl Into<String>, value: ChannelValue) -> Self {
        TickEntry::Keyed(label.into(), value)
    }
}

impl ChannelValue {
    pub fn tuple(ctype: impl Into<String>, value: f64) -> Self {
        ChannelValue::Tuple(ctype.into(), value)
    }

    pub fn record(ctype: impl Into<String>, data: f64) -> Self {
        ChannelValue::Record { ctype: ctype.into(), data }
    }
}
