//! context.rs
//! Dense index layout for the truncated tensor algebra of a given (width, depth).

use std::sync::Arc;

use smallvec::SmallVec;

use crate::algebra::lyndon::LyndonBasis;
use crate::error::StreamError;

/// Letters of a tensor word, 1-based as is conventional for signature bases.
pub type Word = SmallVec<[u8; 8]>;

/// Precomputed layout shared by every algebra element of one (width, depth).
///
/// Words of degree `d` occupy a contiguous block of `width^d` coefficients;
/// `degree_offsets[d]` is the start of that block and the word
/// `(l1, ..., ld)` sits at offset `sum (l_k - 1) * width^(d - k)` within it.
#[derive(Debug)]
pub struct AlgebraContext {
    width: usize,
    depth: usize,
    degree_offsets: Vec<usize>, // len depth + 2; last entry is the total dimension
    lyndon: LyndonBasis,
}

impl AlgebraContext {
    /// Builds the layout for `width` letters truncated at `depth`.
    ///
    /// Width 0 is legal and yields the scalar-only algebra.
    pub fn new(width: usize, depth: usize) -> Result<Self, StreamError> {
        if depth == 0 {
            return Err(StreamError::InvalidDepth { depth });
        }
        // Letters are stored as u8, so the dense layout caps the width.
        if width > u8::MAX as usize {
            return Err(StreamError::InvalidWidth { width });
        }

        let mut degree_offsets = Vec::with_capacity(depth + 2);
        let mut offset = 0usize;
        let mut block = 1usize; // width^d
        for _ in 0..=depth {
            degree_offsets.push(offset);
            offset += block;
            block *= width;
        }
        degree_offsets.push(offset);

        Ok(Self {
            width,
            depth,
            degree_offsets,
            lyndon: LyndonBasis::new(width, depth),
        })
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline(always)]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Total number of tensor coefficients (all degrees 0..=depth).
    #[inline(always)]
    pub fn dim(&self) -> usize {
        self.degree_offsets[self.depth + 1]
    }

    /// Coefficient range of the degree-`d` block.
    #[inline(always)]
    pub fn degree_range(&self, d: usize) -> std::ops::Range<usize> {
        self.degree_offsets[d]..self.degree_offsets[d + 1]
    }

    /// Number of words of degree `d` (`width^d`).
    #[inline(always)]
    pub fn degree_size(&self, d: usize) -> usize {
        self.degree_offsets[d + 1] - self.degree_offsets[d]
    }

    /// Global coefficient index of a word given by its 1-based letters.
    pub fn word_index(&self, letters: &[u8]) -> usize {
        debug_assert!(letters.len() <= self.depth);
        let mut within = 0usize;
        for &l in letters {
            debug_assert!(1 <= l as usize && l as usize <= self.width);
            within = within * self.width + (l as usize - 1);
        }
        self.degree_offsets[letters.len()] + within
    }

    /// Decodes a global coefficient index back into its 1-based letters.
    pub fn word_letters(&self, index: usize) -> Word {
        let degree = self
            .degree_offsets
            .iter()
            .skip(1)
            .position(|&off| index < off)
            .expect("index within algebra dimension");
        let mut within = index - self.degree_offsets[degree];
        let mut letters: Word = SmallVec::with_capacity(degree);
        for _ in 0..degree {
            letters.push(0);
        }
        for k in (0..degree).rev() {
            letters[k] = (within % self.width) as u8 + 1;
            within /= self.width;
        }
        letters
    }

    /// The Lyndon word basis of the free Lie algebra at this (width, depth).
    pub fn lyndon(&self) -> &LyndonBasis {
        &self.lyndon
    }
}

/// Convenience constructor returning a shareable context.
pub fn get_context(width: usize, depth: usize) -> Result<Arc<AlgebraContext>, StreamError> {
    AlgebraContext::new(width, depth).map(Arc::new)
}
