//! Normalizes heterogeneous nested tick records into a canonical event
//! sequence. Every accepted shape is an explicit tagged variant; there is no
//! open-ended dispatch.
pub mod json;
pub mod normalizer;
pub mod shapes;

pub use normalizer::{normalize, RawEvent};
pub use shapes::{ChannelValue, TickData, TickEntry, TickRow, TimestampPayload};
