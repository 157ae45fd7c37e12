//! tensor.rs
//! Dense free tensors truncated at a fixed depth, with the arithmetic the
//! signature engine needs: truncated multiplication, the exponential of a
//! degree-1 element, and the logarithm of a group-like element.

use std::fmt;
use std::sync::Arc;

use wide::f64x4;

use crate::algebra::context::AlgebraContext;

/// An element of the truncated tensor algebra over the context's letters.
///
/// Coefficients are stored densely in degree-major order; see
/// [`AlgebraContext`] for the word layout.
#[derive(Debug, Clone)]
pub struct FreeTensor {
    ctx: Arc<AlgebraContext>,
    data: Vec<f64>,
}

impl FreeTensor {
    /// The additive zero element.
    pub fn zero(ctx: Arc<AlgebraContext>) -> Self {
        let dim = ctx.dim();
        Self { ctx, data: vec![0.0; dim] }
    }

    /// The multiplicative identity: scalar 1, all higher degrees zero.
    pub fn identity(ctx: Arc<AlgebraContext>) -> Self {
        let mut t = Self::zero(ctx);
        t.data[0] = 1.0;
        t
    }

    /// A degree-1 element with `value` on the letter at 0-based `slot`.
    pub fn from_letter(ctx: Arc<AlgebraContext>, slot: usize, value: f64) -> Self {
        debug_assert!(slot < ctx.width());
        let mut t = Self::zero(ctx);
        let idx = t.ctx.word_index(&[slot as u8 + 1]);
        t.data[idx] = value;
        t
    }

    /// A degree-1 element from a full increment vector, one entry per letter.
    pub fn from_increments(ctx: Arc<AlgebraContext>, increments: &[f64]) -> Self {
        debug_assert_eq!(increments.len(), ctx.width());
        let mut t = Self::zero(ctx);
        let range = t.ctx.degree_range(1);
        t.data[range].copy_from_slice(increments);
        t
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

    /// Coefficient of the word given by 1-based letters.
    pub fn get(&self, letters: &[u8]) -> f64 {
        self.data[self.ctx.word_index(letters)]
    }

    /// The scalar (empty word) coefficient.
    pub fn scalar(&self) -> f64 {
        self.data[0]
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.data
    }

    pub(crate) fn coefficient_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.data[index]
    }

    /// `self += coeff * other`, element-wise.
    pub fn add_scaled(&mut self, other: &FreeTensor, coeff: f64) {
        debug_assert_eq!(self.data.len(), other.data.len());
        axpy(&mut self.data, coeff, &other.data);
    }

    pub fn scale(&mut self, factor: f64) {
        for c in &mut self.data {
            *c *= factor;
        }
    }

    /// Truncated tensor product, degree by degree.
    pub fn mul(&self, other: &FreeTensor) -> FreeTensor {
        let depth = self.ctx.depth();
        let mut out = FreeTensor::zero(self.ctx.clone());
        for da in 0..=depth {
            let a_range = self.ctx.degree_range(da);
            for db in 0..=(depth - da) {
                let b_range = self.ctx.degree_range(db);
                let out_range = self.ctx.degree_range(da + db);

                let a_block = &self.data[a_range.clone()];
                let b_block = &other.data[b_range];
                let out_block = &mut out.data[out_range];

                // out[(i,j)] += a[i] * b[j]; the j-run is contiguous.
                let wb = b_block.len();
                for (i, &a) in a_block.iter().enumerate() {
                    if a != 0.0 {
                        axpy(&mut out_block[i * wb..(i + 1) * wb], a, b_block);
                    }
                }
            }
        }
        out
    }

    /// Tensor exponential of a degree-1 element, by Horner's scheme:
    /// `exp(x) = 1 + x (1 + x/2 (1 + ... (1 + x/depth)))`.
    pub fn exp(&self) -> FreeTensor {
        debug_assert!(
            self.data[0] == 0.0
                && self.data[self.ctx.degree_range(1).end..].iter().all(|&c| c == 0.0),
            "exp is defined for degree-1 elements"
        );
        let depth = self.ctx.depth();
        let mut acc = FreeTensor::identity(self.ctx.clone());
        for k in (1..=depth).rev() {
            let mut scaled = self.clone();
            scaled.scale(1.0 / k as f64);
            acc = scaled.mul(&acc);
            acc.data[0] += 1.0;
        }
        acc
    }

    /// Truncated logarithm of a group-like element (scalar term 1):
    /// `log(1 + u) = u - u^2/2 + u^3/3 - ...` up to the truncation depth.
    pub fn log(&self) -> FreeTensor {
        debug_assert!((self.data[0] - 1.0).abs() < 1e-9, "log expects a group-like element");
        let mut u = self.clone();
        u.data[0] = 0.0;

        let mut result = u.clone();
        let mut power = u.clone();
        for k in 2..=self.ctx.depth() {
            power = power.mul(&u);
            let sign = if k % 2 == 0 { -1.0 } else { 1.0 };
            result.add_scaled(&power, sign / k as f64);
        }
        result
    }

    /// Element-wise comparison within `eps`, for test assertions on
    /// floating point results.
    pub fn approx_eq(&self, other: &FreeTensor, eps: f64) -> bool {
        self.width() == other.width()
            && self.depth() == other.depth()
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| (a - b).abs() <= eps)
    }
}

impl PartialEq for FreeTensor {
    fn eq(&self, other: &Self) -> bool {
        self.width() == other.width() && self.depth() == other.depth() && self.data == other.data
    }
}

impl fmt::Display for FreeTensor {
    /// Renders nonzero coefficients as `{ 1() 2(1) 0.5(1,2) }`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (idx, &c) in self.data.iter().enumerate() {
            if c != 0.0 {
                let letters = self.ctx.word_letters(idx);
                let word = letters
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

/// `dest += a * src`, vectorized in blocks of four lanes.
fn axpy(dest: &mut [f64], a: f64, src: &[f64]) {
    debug_assert_eq!(dest.len(), src.len());
    let va = f64x4::splat(a);
    let mut d_chunks = dest.chunks_exact_mut(4);
    let mut s_chunks = src.chunks_exact(4);
    for (d, s) in (&mut d_chunks).zip(&mut s_chunks) {
        let vd = f64x4::from([d[0], d[1], d[2], d[3]]);
        let vs = f64x4::from([s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&(va.mul_add(vs, vd)).to_array());
    }
    for (d, s) in d_chunks.into_remainder().iter_mut().zip(s_chunks.remainder()) {
        *d += a * s;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::context::get_context;

    #[test]
    fn test_identity_is_multiplicative_unit() {
        let ctx = get_context(2, 3).unwrap();
        let one = FreeTensor::identity(ctx.clone());
        let mut x = FreeTensor::from_letter(ctx.clone(), 0, 2.0);
        x.add_scaled(&FreeTensor::from_letter(ctx, 1, -1.0), 1.0);
        let sig = x.exp();
        assert_eq!(one.mul(&sig), sig);
        assert_eq!(sig.mul(&one), sig);
    }

    #[test]
    fn test_exp_single_letter_depth2() {
        let ctx = get_context(2, 2).unwrap();
        let e = FreeTensor::from_letter(ctx, 0, 1.0).exp();
        assert_eq!(e.scalar(), 1.0);
        assert_eq!(e.get(&[1]), 1.0);
        assert_eq!(e.get(&[1, 1]), 0.5);
        assert_eq!(e.get(&[1, 2]), 0.0);
    }

    #[test]
    fn test_chen_identity_for_concatenated_letters() {
        // exp(e1) * exp(e2) has the BCH cross term 0.5 on (1,2) at depth 2.
        let ctx = get_context(2, 2).unwrap();
        let a = FreeTensor::from_letter(ctx.clone(), 0, 1.0).exp();
        let b = FreeTensor::from_letter(ctx, 1, 1.0).exp();
        let sig = a.mul(&b);
        assert_eq!(sig.get(&[1]), 1.0);
        assert_eq!(sig.get(&[2]), 1.0);
        assert_eq!(sig.get(&[1, 2]), 1.0);
        assert_eq!(sig.get(&[2, 1]), 0.0);
    }

    #[test]
    fn test_log_inverts_exp() {
        let ctx = get_context(3, 4).unwrap();
        let x = FreeTensor::from_increments(ctx, &[0.25, -1.5, 3.0]);
        let back = x.exp().log();
        assert!(back.approx_eq(&x, 1e-12));
    }

    #[test]
    fn test_log_of_identity_is_zero() {
        let ctx = get_context(2, 3).unwrap();
        let log = FreeTensor::identity(ctx.clone()).log();
        assert_eq!(log, FreeTensor::zero(ctx));
    }

    #[test]
    fn test_display_identity() {
        let ctx = get_context(3, 2).unwrap();
        let one = FreeTensor::identity(ctx);
        assert_eq!(one.to_string(), "{ 1() }");
    }

    #[test]
    fn test_axpy_matches_scalar_loop() {
        let mut dest = vec![1.0; 11];
        let src: Vec<f64> = (0..11).map(|i| i as f64).collect();
        axpy(&mut dest, 0.5, &src);
        for (i, d) in dest.iter().enumerate() {
            assert_eq!(*d, 1.0 + 0.5 * i as f64);
        }
    }
}
