//! lyndon.rs
//! Lyndon word basis of the free Lie algebra, with tensor expansions.

use std::collections::{BTreeMap, HashMap};

use smallvec::SmallVec;

use crate::algebra::context::Word;

/// The Lyndon word basis at one (width, depth), ordered by (degree, lex).
///
/// Each basis word `w` carries the expansion of its standard bracketing
/// `rho(w)` into tensor words. The expansion of `rho(w)` always has
/// coefficient 1 on `w` itself and hits only lexicographically greater words
/// of the same degree, which is what makes the log-tensor projection in
/// `lie.rs` a triangular elimination.
#[derive(Debug)]
pub struct LyndonBasis {
    words: Vec<Word>,
    expansions: Vec<Vec<(Word, f64)>>,
    positions: HashMap<Word, usize>,
}

impl LyndonBasis {
    pub fn new(width: usize, depth: usize) -> Self {
        let mut words = generate_lyndon_words(width, depth);
        // Duval emits pure lexicographic order with lengths interleaved;
        // the basis is ordered degree-major.
        words.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

        let mut positions = HashMap::with_capacity(words.len());
        let mut expansions: Vec<Vec<(Word, f64)>> = Vec::with_capacity(words.len());
        for (i, w) in words.iter().enumerate() {
            positions.insert(w.clone(), i);
            expansions.push(expand_bracket(w, &words, &positions, &expansions));
        }

        Self { words, expansions, positions }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn word(&self, i: usize) -> &Word {
        &self.words[i]
    }

    /// Tensor expansion of the standard bracketing of basis word `i`.
    pub fn expansion(&self, i: usize) -> &[(Word, f64)] {
        &self.expansions[i]
    }

    /// Basis position of a Lyndon word, if it is one within this depth.
    pub fn position(&self, word: &[u8]) -> Option<usize> {
        self.positions.get(word).copied()
    }
}

/// Lists every Lyndon word of length <= depth over letters 1..=width,
/// in lexicographic order (Duval's algorithm).
fn generate_lyndon_words(width: usize, depth: usize) -> Vec<Word> {
    let mut out = Vec::new();
    if width == 0 || depth == 0 {
        return out;
    }
    let max_letter = width as u8;
    let mut w: Word = SmallVec::new();
    w.push(1);
    loop {
        out.push(w.clone());
        // Periodic extension to the maximum length.
        let period = w.len();
        while w.len() < depth {
            let next = w[w.len() - period];
            w.push(next);
        }
        // Strip trailing maximal letters, then bump the last remaining one.
        while let Some(&last) = w.last() {
            if last == max_letter {
                w.pop();
            } else {
                break;
            }
        }
        match w.last_mut() {
            Some(last) => *last += 1,
            None => return out,
        }
    }
}

/// Standard factorization `w = u v`: `v` is the lexicographically smallest
/// proper suffix of `w` (which is Lyndon), and `u` is Lyndon as well.
fn standard_factorization(w: &[u8]) -> (Word, Word) {
    debug_assert!(w.len() >= 2);
    let mut split = 1;
    for i in 2..w.len() {
        if w[i..] < w[split..] {
            split = i;
        }
    }
    (SmallVec::from_slice(&w[..split]), SmallVec::from_slice(&w[split..]))
}

/// Expands `rho(w) = [rho(u), rho(v)]` into tensor words.
///
/// Factors are strictly shorter Lyndon words, so with the basis built in
/// (degree, lex) order both are already present in `expansions`.
fn expand_bracket(
    w: &Word,
    words: &[Word],
    positions: &HashMap<Word, usize>,
    expansions: &[Vec<(Word, f64)>],
) -> Vec<(Word, f64)> {
    if w.len() == 1 {
        return vec![(w.clone(), 1.0)];
    }
    let (u, v) = standard_factorization(w);
    let eu = &expansions[positions[&u]];
    let ev = &expansions[positions[&v]];
    debug_assert!(words.contains(&u) && words.contains(&v));

    let mut acc: BTreeMap<Word, f64> = BTreeMap::new();
    for (a, ca) in eu {
        for (b, cb) in ev {
            let mut ab: Word = a.clone();
            ab.extend_from_slice(b);
            let mut ba: Word = b.clone();
            ba.extend_from_slice(a);
            *acc.entry(ab).or_insert(0.0) += ca * cb;
            *acc.entry(ba).or_insert(0.0) -= ca * cb;
        }
    }
    acc.into_iter().filter(|(_, c)| *c != 0.0).collect()
}
