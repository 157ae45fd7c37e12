//! Closed-open real intervals on the absolute time axis.
use serde::{Deserialize, Serialize};

use crate::error::StreamError;

/// A closed-open interval `[inf, sup)`.
///
/// Intervals are the only time coordinate the crate understands: the support
/// interval declared at construction, and query windows. Timestamps are
/// absolute; nothing is ever re-based against the first observed event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RealInterval {
    inf: f64,
    sup: f64,
}

impl RealInterval {
    /// Creates `[inf, sup)`. An interval with `inf >= sup` is empty.
    pub fn new(inf: f64, sup: f64) -> Self {
        Self { inf, sup }
    }

    #[inline(always)]
    pub fn inf(&self) -> f64 {
        self.inf
    }

    #[inline(always)]
    pub fn sup(&self) -> f64 {
        self.sup
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        !(self.inf < self.sup)
    }

    /// Half-open membership test.
    #[inline(always)]
    pub fn contains(&self, t: f64) -> bool {
        self.inf <= t && t < self.sup
    }

    /// True when the two intervals share at least one point.
    pub fn intersects(&self, other: &RealInterval) -> bool {
        self.inf < other.sup && other.inf < self.sup
    }

    /// The overlap of two intervals; empty when they are disjoint.
    pub fn intersection(&self, other: &RealInterval) -> RealInterval {
        RealInterval::new(self.inf.max(other.inf), self.sup.min(other.sup))
    }

    /// Splits the interval into `n` equal sub-intervals, in temporal order.
    ///
    /// The last sub-interval ends exactly at `sup` so the union reproduces
    /// the original window without floating point drift at the far end.
    pub fn subdivide(&self, n: u32) -> Vec<RealInterval> {
        let n = n.max(1) as usize;
        let step = (self.sup - self.inf) / n as f64;
        (0..n)
            .map(|k| {
                let lo = self.inf + step * k as f64;
                let hi = if k + 1 == n { self.sup } else { self.inf + step * (k + 1) as f64 };
                RealInterval::new(lo, hi)
            })
            .collect()
    }
}

/// How a query window that only partially overlaps the support is handled.
///
/// The choice is made once at stream construction. Windows entirely outside
/// the support always fail with [`StreamError::OutOfSupport`] under either
/// policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WindowPolicy {
    /// Intersect the window with the support interval.
    #[default]
    Clamp,
    /// Reject any window not fully contained in the support.
    Reject,
}

impl WindowPolicy {
    /// Resolves a non-empty query window against the support interval.
    pub(crate) fn resolve(
        &self,
        window: &RealInterval,
        support: &RealInterval,
    ) -> Result<RealInterval, StreamError> {
        let out_of_support = || StreamError::OutOfSupport {
            lo: window.inf(),
            hi: window.sup(),
            support_lo: support.inf(),
            support_hi: support.sup(),
        };

        if !window.intersects(support) {
            return Err(out_of_support());
        }
        match self {
            WindowPolicy::Clamp => Ok(window.intersection(support)),
            WindowPolicy::Reject => {
                if support.inf() <= window.inf() && window.sup() <= support.sup() {
                    Ok(*window)
                } else {
                    Err(out_of_support())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_open_membership() {
        let iv = RealInterval::new(0.0, 2.0);
        assert!(iv.contains(0.0));
        assert!(iv.contains(1.999));
        assert!(!iv.contains(2.0));
        assert!(!iv.contains(-0.001));
    }

    #[test]
    fn test_subdivide_covers_window_exactly() {
        let iv = RealInterval::new(1.0, 3.0001);
        let cells = iv.subdivide(10);
        assert_eq!(cells.len(), 10);
        assert_eq!(cells[0].inf(), 1.0);
        assert_eq!(cells[9].sup(), 3.0001);
        for pair in cells.windows(2) {
            assert_eq!(pair[0].sup(), pair[1].inf());
        }
    }

    #[test]
    fn test_clamp_policy_intersects() {
        let support = RealInterval::new(0.0, 7.0);
        let window = RealInterval::new(-1.0, 4.0);
        let resolved = WindowPolicy::Clamp.resolve(&window, &support).unwrap();
        assert_eq!(resolved, RealInterval::new(0.0, 4.0));
    }

    #[test]
    fn test_reject_policy_fails_on_partial_overlap() {
        let support = RealInterval::new(0.0, 7.0);
        let window = RealInterval::new(-1.0, 4.0);
        let err = WindowPolicy::Reject.resolve(&window, &support).unwrap_err();
        assert!(matches!(err, StreamError::OutOfSupport { .. }));
    }

    #[test]
    fn test_disjoint_window_fails_under_both_policies() {
        let support = RealInterval::new(0.0, 7.0);
        let window = RealInterval::new(8.0, 9.0);
        assert!(WindowPolicy::Clamp.resolve(&window, &support).is_err());
        assert!(WindowPolicy::Reject.resolve(&window, &support).is_err());
    }
}
