//! tick.rs
//! The client-facing stream: construction pipeline and query surface.

use std::sync::Arc;

use crate::algebra::context::{get_context, AlgebraContext};
use crate::algebra::lie::Lie;
use crate::algebra::tensor::FreeTensor;
use crate::error::StreamError;
use crate::interval::{RealInterval, WindowPolicy};
use crate::records::normalizer::normalize;
use crate::records::shapes::TickData;
use crate::schema::channel::ChannelSpec;
use crate::schema::resolver::{Schema, SchemaResolver, TIME_SLOT};
use crate::signature::engine::SignatureEngine;
use crate::stream::lead_lag;
use crate::stream::path::{Event, TickPath};

/// An immutable tick stream: built once, queried concurrently.
#[derive(Debug)]
pub struct TickStream {
    path: TickPath,
    ctx: Arc<AlgebraContext>,
}

/// Configuration for stream construction.
///
/// Construction is atomic: normalization, schema resolution, lead-lag
/// expansion and path assembly either all succeed or the error is returned
/// with nothing built.
#[derive(Debug, Clone, Default)]
pub struct TickStreamBuilder {
    width: Option<usize>,
    depth: Option<usize>,
    include_time: bool,
    schema: Option<Vec<ChannelSpec>>,
    support: Option<RealInterval>,
    policy: WindowPolicy,
    ctx: Option<Arc<AlgebraContext>>,
}

impl TickStreamBuilder {
    /// Declares the expected data width (expanded channels, excluding the
    /// synthetic time channel). Mismatch fails construction.
    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Truncation depth of the stream's default algebra context.
    pub fn depth(mut self, depth: usize) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Adds the synthetic time channel on slot 0, fed by timestamp deltas.
    pub fn include_time(mut self, include_time: bool) -> Self {
        self.include_time = include_time;
        self
    }

    /// Supplies an explicit ordered schema instead of first-seen inference.
    pub fn schema(mut self, specs: Vec<ChannelSpec>) -> Self {
        self.schema = Some(specs);
        self
    }

    /// Declares the support interval. Defaults to `[0, +inf)` — never
    /// derived from the data.
    pub fn support(mut self, support: RealInterval) -> Self {
        self.support = Some(support);
        self
    }

    /// How query windows partially overlapping the support are handled.
    pub fn window_policy(mut self, policy: WindowPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Supplies a pre-built algebra context; its width must match the
    /// resolved stream width and it overrides `depth`.
    pub fn context(mut self, ctx: Arc<AlgebraContext>) -> Self {
        self.ctx = Some(ctx);
        self
    }

    pub fn build(self, data: TickData) -> Result<TickStream, StreamError> {
        let raw = normalize(data)?;

        let resolver = match self.schema {
            Some(specs) => SchemaResolver::Explicit(specs),
            None => SchemaResolver::Inferred,
        };
        let schema = resolver.resolve(&raw, self.include_time)?;

        if let Some(expected) = self.width {
            if schema.data_width() != expected {
                return Err(StreamError::DimensionMismatch {
                    expected,
                    actual: schema.data_width(),
                });
            }
        }

        let support = self.support.unwrap_or_else(|| RealInterval::new(0.0, f64::INFINITY));
        let mut events = lead_lag::expand(&raw, &schema)?;
        clamp_to_support(&mut events, &support);
        if self.include_time {
            events = inject_time(events, support.inf());
        }

        let ctx = match self.ctx {
            Some(ctx) => {
                if ctx.width() != schema.width() {
                    return Err(StreamError::DimensionMismatch {
                        expected: schema.width(),
                        actual: ctx.width(),
                    });
                }
                ctx
            }
            None => get_context(schema.width(), self.depth.unwrap_or(2))?,
        };

        Ok(TickStream {
            path: TickPath::new(events, schema, support, self.policy),
            ctx,
        })
    }
}

impl TickStream {
    pub fn builder() -> TickStreamBuilder {
        TickStreamBuilder::default()
    }

    /// Convenience constructor for the common width/depth case.
    pub fn from_data(data: TickData, width: usize, depth: usize) -> Result<Self, StreamError> {
        Self::builder().width(width).depth(depth).build(data)
    }

    /// Path width, including the synthetic time channel if enabled.
    pub fn width(&self) -> usize {
        self.path.width()
    }

    pub fn depth(&self) -> usize {
        self.ctx.depth()
    }

    pub fn support(&self) -> &RealInterval {
        self.path.support()
    }

    pub fn schema(&self) -> &Schema {
        self.path.schema()
    }

    pub fn context(&self) -> &Arc<AlgebraContext> {
        &self.ctx
    }

    pub fn path(&self) -> &TickPath {
        &self.path
    }

    /// Signature over `window` at the stream's own context.
    pub fn signature(
        &self,
        window: &RealInterval,
        resolution: u32,
    ) -> Result<FreeTensor, StreamError> {
        SignatureEngine::new(&self.path, self.ctx.clone())?.signature(window, resolution)
    }

    /// Signature over `window` at a caller-supplied context.
    pub fn signature_with(
        &self,
        window: &RealInterval,
        ctx: &Arc<AlgebraContext>,
        resolution: u32,
    ) -> Result<FreeTensor, StreamError> {
        SignatureEngine::new(&self.path, ctx.clone())?.signature(window, resolution)
    }

    /// Log-signature over `window`, truncated at `depth`.
    pub fn log_signature(&self, window: &RealInterval, depth: usize) -> Result<Lie, StreamError> {
        let ctx = if depth == self.ctx.depth() {
            self.ctx.clone()
        } else {
            get_context(self.width(), depth)?
        };
        SignatureEngine::new(&self.path, ctx)?.log_signature(window)
    }
}

/// Timestamps below the support clamp up to its infimum; timestamps at or
/// beyond its supremum fall outside the half-open domain and are dropped.
fn clamp_to_support(events: &mut Vec<Event>, support: &RealInterval) {
    events.retain(|e| e.timestamp < support.sup());
    for e in events.iter_mut() {
        if e.timestamp < support.inf() {
            e.timestamp = support.inf();
        }
    }
}

/// Prepends, before each distinct-timestamp group, a slot-0 event carrying
/// the elapsed time since the previous group (first delta measured from the
/// support infimum, keeping the time axis absolute).
fn inject_time(events: Vec<Event>, origin: f64) -> Vec<Event> {
    let mut out = Vec::with_capacity(events.len() * 2);
    let mut prev = origin;
    for e in events {
        if out.is_empty() || e.timestamp > prev {
            out.push(Event { timestamp: e.timestamp, slot: TIME_SLOT, value: e.timestamp - prev });
            prev = e.timestamp;
        }
        out.push(e);
    }
    out
}
