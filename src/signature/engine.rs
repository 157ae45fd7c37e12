//! engine.rs
//! Signature evaluation over an immutable tick path.
//!
//! The path is a concatenation of jumps, one per event, ordered by
//! (timestamp, input order). A query subdivides its window into uniform
//! sub-intervals, evaluates each segment's signature as the ordered product
//! of per-event tensor exponentials, and combines segments left-to-right by
//! truncated tensor multiplication (Chen's identity). Under this jump model
//! every positive resolution is exact, so raising the resolution never
//! changes the result.

use std::sync::Arc;

use rayon::prelude::*;

use crate::algebra::context::AlgebraContext;
use crate::algebra::lie::Lie;
use crate::algebra::tensor::FreeTensor;
use crate::error::StreamError;
use crate::interval::RealInterval;
use crate::stream::path::TickPath;

/// A pure query evaluator borrowing the path; cheap to create per query.
#[derive(Debug)]
pub struct SignatureEngine<'a> {
    path: &'a TickPath,
    ctx: Arc<AlgebraContext>,
}

impl<'a> SignatureEngine<'a> {
    /// The context width must equal the path width.
    pub fn new(path: &'a TickPath, ctx: Arc<AlgebraContext>) -> Result<Self, StreamError> {
        if ctx.width() != path.width() {
            return Err(StreamError::DimensionMismatch {
                expected: path.width(),
                actual: ctx.width(),
            });
        }
        Ok(Self { path, ctx })
    }

    /// The truncated signature of the path over `window`.
    pub fn signature(
        &self,
        window: &RealInterval,
        resolution: u32,
    ) -> Result<FreeTensor, StreamError> {
        if resolution == 0 {
            return Err(StreamError::InvalidResolution);
        }
        let resolved = match self.path.resolve_window(window)? {
            Some(iv) => iv,
            None => return Ok(FreeTensor::identity(self.ctx.clone())),
        };

        // Segment signatures are independent; Chen combination is an
        // ordered associative reduction, which rayon preserves.
        let sig = resolved
            .subdivide(resolution)
            .par_iter()
            .map(|cell| self.segment_signature(cell))
            .reduce(
                || FreeTensor::identity(self.ctx.clone()),
                |a, b| a.mul(&b),
            );
        Ok(sig)
    }

    /// The log-signature over `window`, as a free Lie algebra element.
    pub fn log_signature(&self, window: &RealInterval) -> Result<Lie, StreamError> {
        let sig = self.signature(window, 1)?;
        Ok(Lie::from_log_tensor(&sig.log()))
    }

    /// Ordered product of per-event exponentials within one sub-interval.
    fn segment_signature(&self, cell: &RealInterval) -> FreeTensor {
        let mut acc = FreeTensor::identity(self.ctx.clone());
        for e in self.path.events_in(cell) {
            let jump = FreeTensor::from_letter(self.ctx.clone(), e.slot, e.value);
            acc = acc.mul(&jump.exp());
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::context::get_context;
    use crate::interval::WindowPolicy;
    use crate::records::normalizer::RawEvent;
    use crate::schema::resolver::SchemaResolver;
    use crate::stream::path::Event;

    fn two_channel_path(events: Vec<Event>, support: RealInterval) -> TickPath {
        let raw: Vec<RawEvent> = ["first", "second"]
            .iter()
            .map(|l| RawEvent {
                timestamp: support.inf(),
                label: l.to_string(),
                ctype: "increment".into(),
                value: 0.0,
            })
            .collect();
        let schema = SchemaResolver::Inferred.resolve(&raw, false).unwrap();
        TickPath::new(events, schema, support, WindowPolicy::Clamp)
    }

    #[test]
    fn test_empty_window_yields_identity_and_zero() {
        let path = two_channel_path(vec![], RealInterval::new(0.0, 2.0));
        let ctx = get_context(2, 2).unwrap();
        let engine = SignatureEngine::new(&path, ctx.clone()).unwrap();

        let sig = engine.signature(&RealInterval::new(0.5, 0.5), 4).unwrap();
        assert_eq!(sig, FreeTensor::identity(ctx.clone()));
        assert_eq!(sig.to_string(), "{ 1() }");

        let lsig = engine.log_signature(&RealInterval::new(0.5, 0.5)).unwrap();
        assert!(lsig.is_zero());
    }

    #[test]
    fn test_sequential_jumps_produce_bch_cross_term() {
        let path = two_channel_path(
            vec![
                Event { timestamp: 1.0, slot: 0, value: 1.0 },
                Event { timestamp: 1.0, slot: 1, value: 1.0 },
            ],
            RealInterval::new(0.0, 2.0),
        );
        let ctx = get_context(2, 2).unwrap();
        let engine = SignatureEngine::new(&path, ctx.clone()).unwrap();
        let lsig = engine.log_signature(&RealInterval::new(0.0, 2.0)).unwrap();
        let expected = Lie::new(vec![1.0, 1.0, 0.5], ctx).unwrap();
        assert!(lsig.approx_eq(&expected, 1e-12), "{} == {}", lsig, expected);
    }

    #[test]
    fn test_resolution_invariance() {
        let path = two_channel_path(
            vec![
                Event { timestamp: 0.25, slot: 0, value: 1.0 },
                Event { timestamp: 0.75, slot: 1, value: -2.0 },
                Event { timestamp: 1.5, slot: 0, value: 0.5 },
            ],
            RealInterval::new(0.0, 2.0),
        );
        let ctx = get_context(2, 3).unwrap();
        let engine = SignatureEngine::new(&path, ctx).unwrap();
        let window = RealInterval::new(0.0, 2.0);
        let coarse = engine.signature(&window, 1).unwrap();
        for resolution in [2, 3, 8, 64, 1000] {
            let fine = engine.signature(&window, resolution).unwrap();
            assert!(fine.approx_eq(&coarse, 1e-12), "resolution {}", resolution);
        }
    }

    #[test]
    fn test_chen_identity_across_adjacent_windows() {
        let path = two_channel_path(
            vec![
                Event { timestamp: 0.5, slot: 0, value: 1.0 },
                Event { timestamp: 1.5, slot: 1, value: 2.0 },
            ],
            RealInterval::new(0.0, 2.0),
        );
        let ctx = get_context(2, 2).unwrap();
        let engine = SignatureEngine::new(&path, ctx).unwrap();
        let left = engine.signature(&RealInterval::new(0.0, 1.0), 4).unwrap();
        let right = engine.signature(&RealInterval::new(1.0, 2.0), 4).unwrap();
        let whole = engine.signature(&RealInterval::new(0.0, 2.0), 4).unwrap();
        assert!(left.mul(&right).approx_eq(&whole, 1e-12));
    }

    #[test]
    fn test_zero_resolution_rejected() {
        let path = two_channel_path(vec![], RealInterval::new(0.0, 2.0));
        let ctx = get_context(2, 2).unwrap();
        let engine = SignatureEngine::new(&path, ctx).unwrap();
        let err = engine.signature(&RealInterval::new(0.0, 1.0), 0).unwrap_err();
        assert_eq!(err, StreamError::InvalidResolution);
    }

    #[test]
    fn test_context_width_mismatch_rejected() {
        let path = two_channel_path(vec![], RealInterval::new(0.0, 2.0));
        let ctx = get_context(3, 2).unwrap();
        let err = SignatureEngine::new(&path, ctx).unwrap_err();
        assert_eq!(err, StreamError::DimensionMismatch { expected: 2, actual: 3 });
    }
}
