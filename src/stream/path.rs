//! path.rs
//! The immutable tick path: resolved events on an absolute time axis.

use serde::{Deserialize, Serialize};

use crate::error::StreamError;
use crate::interval::{RealInterval, WindowPolicy};
use crate::schema::resolver::Schema;

/// A resolved, expanded event: one jump of the path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub timestamp: f64,
    /// Path coordinate, in `[0, width)`.
    pub slot: usize,
    pub value: f64,
}

/// The canonical event sequence plus its support interval and schema.
///
/// Built once by [`TickStream`](crate::stream::TickStream) construction,
/// read-only afterwards; safe to share across concurrent queries.
#[derive(Debug, Clone)]
pub struct TickPath {
    events: Vec<Event>,
    schema: Schema,
    support: RealInterval,
    policy: WindowPolicy,
}

impl TickPath {
    /// Events must already be sorted by timestamp (stable on ties) and lie
    /// within the support interval; the builder guarantees both.
    pub(crate) fn new(
        events: Vec<Event>,
        schema: Schema,
        support: RealInterval,
        policy: WindowPolicy,
    ) -> Self {
        debug_assert!(events.windows(2).all(|p| p[0].timestamp <= p[1].timestamp));
        debug_assert!(events.iter().all(|e| support.contains(e.timestamp)));
        Self { events, schema, support, policy }
    }

    pub fn width(&self) -> usize {
        self.schema.width()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn support(&self) -> &RealInterval {
        &self.support
    }

    pub fn policy(&self) -> WindowPolicy {
        self.policy
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events with timestamps in the half-open window, in path order.
    pub fn events_in(&self, window: &RealInterval) -> &[Event] {
        let lo = self.events.partition_point(|e| e.timestamp < window.inf());
        let hi = self.events.partition_point(|e| e.timestamp < window.sup());
        &self.events[lo..hi]
    }

    /// Resolves a query window against the support under the path's policy.
    ///
    /// Empty windows resolve to `None` (the identity segment) without
    /// touching the support; disjoint windows fail with `OutOfSupport`.
    pub(crate) fn resolve_window(
        &self,
        window: &RealInterval,
    ) -> Result<Option<RealInterval>, StreamError> {
        if window.is_empty() {
            return Ok(None);
        }
        self.policy.resolve(window, &self.support).map(Some)
    }

    /// Sum of event values on one slot over the window.
    pub fn increment(&self, slot: usize, window: &RealInterval) -> Result<f64, StreamError> {
        if slot >= self.width() {
            return Err(StreamError::DimensionMismatch { expected: self.width(), actual: slot });
        }
        Ok(self.increments_over(window)?[slot])
    }

    /// The increment vector over the window, one entry per slot.
    pub fn increments_over(&self, window: &RealInterval) -> Result<Vec<f64>, StreamError> {
        let mut out = vec![0.0; self.width()];
        let resolved = match self.resolve_window(window)? {
            Some(iv) => iv,
            None => return Ok(out),
        };
        for e in self.events_in(&resolved) {
            out[e.slot] += e.value;
        }
        Ok(out)
    }
}
