//! lie.rs
//! Free Lie algebra elements over the Lyndon word basis.

use std::fmt;
use std::sync::Arc;

use crate::algebra::context::AlgebraContext;
use crate::algebra::tensor::FreeTensor;
use crate::error::StreamError;

/// An element of the truncated free Lie algebra, with one coefficient per
/// Lyndon basis word in (degree, lexicographic) order.
#[derive(Debug, Clone)]
pub struct Lie {
    ctx: Arc<AlgebraContext>,
    data: Vec<f64>,
}

impl Lie {
    /// The zero element.
    pub fn zero(ctx: Arc<AlgebraContext>) -> Self {
        let dim = ctx.lyndon().len();
        Self { ctx, data: vec![0.0; dim] }
    }

    /// Builds an element from explicit basis coefficients.
    ///
    /// The coefficient count must match the basis dimension at this
    /// (width, depth); e.g. width 2, depth 2 has basis `e1, e2, [e1, e2]`.
    pub fn new(coeffs: Vec<f64>, ctx: Arc<AlgebraContext>) -> Result<Self, StreamError> {
        let dim = ctx.lyndon().len();
        if coeffs.len() != dim {
            return Err(StreamError::DimensionMismatch { expected: dim, actual: coeffs.len() });
        }
        Ok(Self { ctx, data: coeffs })
    }

    /// Projects the logarithm of a signature onto the Lyndon basis.
    ///
    /// Works degree by degree, Lyndon words in lexicographic order: the
    /// bracketing of a Lyndon word expands to that word plus lexicographically
    /// greater words of the same degree, so reading the coefficient and
    /// subtracting the expansion is an exact triangular solve. The residual
    /// is nonzero only if the input was not actually a Lie element.
    pub fn from_log_tensor(log_tensor: &FreeTensor) -> Self {
        let ctx = log_tensor.context().clone();
        let basis = ctx.lyndon();
        let mut residue = log_tensor.clone();
        let mut data = vec![0.0; basis.len()];

        for i in 0..basis.len() {
            let word = basis.word(i);
            let c = residue.get(word);
            data[i] = c;
            if c != 0.0 {
                for (term, coeff) in basis.expansion(i) {
                    let idx = ctx.word_index(term);
                    *residue.coefficient_mut(idx) -= c * coeff;
                }
            }
        }

        Self { ctx, data }
    }

    /// Embeds the element back into the tensor algebra.
    pub fn to_tensor(&self) -> FreeTensor {
        let basis = self.ctx.lyndon();
        let mut out = FreeTensor::zero(self.ctx.clone());
        for (i, &c) in self.data.iter().enumerate() {
            if c != 0.0 {
                for (term, coeff) in basis.expansion(i) {
                    let idx = self.ctx.word_index(term);
                    *out.coefficient_mut(idx) += c * coeff;
                }
            }
        }
        out
    }

    pub fn context(&self) -> &Arc<AlgebraContext> {
        &self.ctx
    }

    pub fn width(&self) -> usize {
        self.ctx.width()
    }

    pub fn depth(&self) -> usize {
        self.ctx.depth()
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.data
    }

    /// Coefficient of one Lyndon basis word, by its 1-based letters.
    pub fn get(&self, word: &[u8]) -> Option<f64> {
        self.ctx.lyndon().position(word).map(|i| self.data[i])
    }

    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|&c| c == 0.0)
    }

    /// Element-wise comparison within `eps`.
    pub fn approx_eq(&self, other: &Lie, eps: f64) -> bool {
        self.width() == other.width()
            && self.depth() == other.depth()
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| (a - b).abs() <= eps)
    }
}

impl PartialEq for Lie {
    fn eq(&self, other: &Self) -> bool {
        self.width() == other.width() && self.depth() == other.depth() && self.data == other.data
    }
}

impl fmt::Display for Lie {
    /// Renders nonzero coefficients against their basis words, e.g.
    /// `{ 1(1) 1(2) 0.5(1,2) }`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let basis = self.ctx.lyndon();
        for (i, &c) in self.data.iter().enumerate() {
            if c != 0.0 {
                let word = basis
                    .word(i)
                    .iter()
                    .map(|l| l.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                write!(f, " {}({})", c, word)?;
            }
        }
        write!(f, " }}")
    }
}
