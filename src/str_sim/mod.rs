mod cost_model;
mod jaccard;
mod jaro;
mod levenshtein;

pub use cost_model::{CostModel, EmptyInputPolicy};
pub use jaccard::{jaccard, Jaccard};
pub use jaro::{jaro, jaro_winkler, Jaro, JaroWinkler, JaroWinklerArgs};
pub use levenshtein::{weighted_levenshtein, WeightedLevenshtein};

// All metrics compare Unicode scalar values. Strings are decoded into `Vec<char>` once
// per call, so window sizes, prefix lengths and set members count code points, not bytes.

// Hashbrown has better perf than Rust's HashSet
use hashbrown::HashSet;
use itertools::Itertools;

/// A similarity or distance between two strings.
///
/// Every engine in this crate implements this trait, and the batch dispatcher and the
/// host bindings only ever talk to it. Implementations must be pure: the same pair
/// always produces the same score, whichever thread computes it.
pub trait PairwiseMetric: Sync {
    /// Scores two present strings.
    fn score(&self, a: &str, b: &str) -> f64;

    /// Scores two possibly absent strings. An absent side yields the 0.0 sentinel.
    #[inline]
    fn score_opt(&self, a: Option<&str>, b: Option<&str>) -> f64 {
        match (a, b) {
            (Some(a), Some(b)) => self.score(a, b),
            _ => 0.0,
        }
    }
}

#[inline]
pub(crate) fn to_chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

#[inline]
pub fn common_char_prefix(a: &[char], b: &[char]) -> usize {
    a.iter()
        .zip(b.iter())
        .find_position(|(c1, c2)| c1 != c2)
        .map_or(a.len().min(b.len()), |(pos, _)| pos)
}

#[inline]
pub fn common_char_suffix(a: &[char], b: &[char]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .find_position(|(c1, c2)| c1 != c2)
        .map_or(a.len().min(b.len()), |(pos, _)| pos)
}

#[inline]
/// Strip common prefix, suffix characters
pub fn strip_common<'a>(a: &'a [char], b: &'a [char]) -> (&'a [char], &'a [char]) {
    let left = common_char_prefix(a, b);
    let (a, b) = (&a[left..], &b[left..]);
    let right = common_char_suffix(a, b);
    (&a[..a.len() - right], &b[..b.len() - right])
}

#[inline(always)]
pub(crate) fn char_set_sim_helper(w1: &[char], w2: &[char], n: usize) -> (usize, usize, usize) {
    // output: set 1 size, set 2 size, intersection size

    // as long as intersection size is 0, output will be correct
    if w1.is_empty() || w2.is_empty() {
        return (0, 0, 0);
    }

    // A word shorter than n is its own single gram
    let s1: HashSet<&[char]> = if w1.len() < n {
        HashSet::from_iter([w1])
    } else {
        HashSet::from_iter(w1.windows(n))
    };

    let s2: HashSet<&[char]> = if w2.len() < n {
        HashSet::from_iter([w2])
    } else {
        HashSet::from_iter(w2.windows(n))
    };

    let intersection = s1.intersection(&s2).count();
    (s1.len(), s2.len(), intersection)
}
