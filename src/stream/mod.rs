//! Tick path construction: resolved events anchored to an absolute support
//! interval, plus the stream facade clients build and query.
pub mod lead_lag;
pub mod path;
pub mod tick;

pub use path::{Event, TickPath};
pub use tick::{TickStream, TickStreamBuilder};
