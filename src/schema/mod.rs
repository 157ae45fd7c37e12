//! Maps raw channel references onto a fixed slot layout.
pub mod channel;
pub mod resolver;

pub use channel::{Channel, ChannelKind, ChannelSpec};
pub use resolver::{Schema, SchemaResolver};
