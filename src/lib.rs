//! Path signatures from irregularly spaced, multi-channel tick data.
//!
//! Raw nested records are normalized into a canonical event stream,
//! optionally lead-lag expanded, anchored to an absolute support interval,
//! and queried for signatures or log-signatures over arbitrary sub-windows:
//!
//! ```
//! use sigpath_core::{RealInterval, TickData, TickRow, TickStream};
//!
//! let data = TickData::rows(vec![
//!     TickRow::flat(1.0, "first", "increment", 1.0),
//!     TickRow::flat(1.0, "second", "increment", 1.0),
//! ]);
//! let stream = TickStream::from_data(data, 2, 2).unwrap();
//! let lsig = stream.log_signature(&RealInterval::new(0.0, 2.0), 2).unwrap();
//! assert_eq!(lsig.coefficients(), &[1.0, 1.0, 0.5]);
//! ```

pub mod algebra;
pub mod error;
pub mod interval;
pub mod records;
pub mod schema;
pub mod signature;
pub mod stream;

pub use algebra::{get_context, AlgebraContext, FreeTensor, Lie, LyndonBasis};
pub use error::StreamError;
pub use interval::{RealInterval, WindowPolicy};
pub use records::{normalize, ChannelValue, RawEvent, TickData, TickEntry, TickRow, TimestampPayload};
pub use schema::{Channel, ChannelKind, ChannelSpec, Schema, SchemaResolver};
pub use signature::SignatureEngine;
pub use stream::{Event, TickPath, TickStream, TickStreamBuilder};
