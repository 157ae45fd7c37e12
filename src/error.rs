//! Defines the error type shared by stream construction and queries.
use thiserror::Error;

/// Errors raised by tick stream construction or signature queries.
///
// Construction errors abort construction entirely; no partially built
// stream is ever exposed. Query errors abort only that query.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StreamError {
    /// The nested input data did not match any recognized shape.
    #[error("Malformed record: {context}")]
    MalformedRecord { context: String },

    /// A (label, type) pair was referenced that the explicit schema does not declare.
    #[error("Unknown channel '{label}' (type '{ctype}') not present in explicit schema")]
    UnknownChannel { label: String, ctype: String },

    /// Declared width or algebra context width disagrees with the resolved channel count.
    #[error("Dimension mismatch: expected width {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The query window lies entirely outside the declared support interval.
    #[error("Query window [{lo}, {hi}) is outside the support interval [{support_lo}, {support_hi})")]
    OutOfSupport {
        lo: f64,
        hi: f64,
        support_lo: f64,
        support_hi: f64,
    },

    /// Path width exceeds the representable letter range of the dense layout.
    #[error("Width must be at most {max}, got {width}", max = u8::MAX)]
    InvalidWidth { width: usize },

    /// Resolution must be a positive number of sub-intervals.
    #[error("Resolution must be positive")]
    InvalidResolution,

    /// Truncation depth must be at least 1.
    #[error("Truncation depth must be at least 1, got {depth}")]
    InvalidDepth { depth: usize },
}
