use super::{char_set_sim_helper, to_chars, PairwiseMetric};
use crate::error::{SimError, SimResult};

/// Jaccard similarity between the sets of distinct character n-grams of two strings.
/// With the default `ngram = 1` this is the overlap of distinct characters; order and
/// repetition do not matter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Jaccard {
    ngram: usize,
}

impl Jaccard {
    pub fn new(ngram: usize) -> SimResult<Self> {
        if ngram == 0 {
            Err(SimError::InvalidArgument(
                "`ngram` must be a positive integer.".into(),
            ))
        } else {
            Ok(Self { ngram })
        }
    }

    pub fn ngram(&self) -> usize {
        self.ngram
    }
}

impl Default for Jaccard {
    fn default() -> Self {
        Self { ngram: 1 }
    }
}

impl PairwiseMetric for Jaccard {
    fn score(&self, a: &str, b: &str) -> f64 {
        if a == b {
            return 1.;
        }
        if a.is_empty() || b.is_empty() {
            return 0.;
        }
        let (s1, s2, intersection) = char_set_sim_helper(&to_chars(a), &to_chars(b), self.ngram);
        let union = s1 + s2 - intersection;
        if union == 0 {
            0.
        } else {
            intersection as f64 / union as f64
        }
    }
}

#[inline]
pub fn jaccard(a: Option<&str>, b: Option<&str>) -> f64 {
    Jaccard::default().score_opt(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_distinct_characters() {
        assert_eq!(jaccard(Some("abc"), Some("bcd")), 0.5);
        // duplicates collapse, order is irrelevant
        assert_eq!(jaccard(Some("aabbcc"), Some("cba")), 1.);
        assert_eq!(jaccard(Some("abc"), Some("xyz")), 0.);
        assert_eq!(jaccard(Some("ab"), Some("abcd")), 0.5);
    }

    #[test]
    fn test_edge_cases() {
        assert_eq!(jaccard(None, Some("abc")), 0.);
        assert_eq!(jaccard(Some("abc"), None), 0.);
        assert_eq!(jaccard(Some(""), Some("abc")), 0.);
        assert_eq!(jaccard(Some(""), Some("")), 1.);
        assert_eq!(jaccard(Some("same"), Some("same")), 1.);
    }

    #[test]
    fn test_code_points() {
        // 'é' and 'e' are different members; 'é' is not split into bytes
        assert_eq!(jaccard(Some("é"), Some("e")), 0.);
        assert_eq!(jaccard(Some("日本"), Some("本日")), 1.);
    }

    #[test]
    fn test_ngrams() {
        let bigrams = Jaccard::new(2).unwrap();
        // {ab, bc} and {bc, cd}
        assert_eq!(bigrams.score("abc", "bcd"), 1. / 3.);
        // A string shorter than n is its own gram
        assert_eq!(Jaccard::new(5).unwrap().score("abc", "abd"), 0.);
        assert_eq!(Jaccard::new(5).unwrap().score("abc", "abcdef"), 0.);
        assert!(Jaccard::new(0).is_err());
    }

    #[test]
    fn test_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let metric = Jaccard::default();
        for _ in 0..5_000 {
            let len1 = rng.gen_range(0..16);
            let len2 = rng.gen_range(0..16);
            let a: String = (0..len1).map(|_| rng.gen_range('a'..='h')).collect();
            let b: String = (0..len2).map(|_| rng.gen_range('a'..='h')).collect();
            let sim = metric.score(&a, &b);
            assert!((0. ..=1.).contains(&sim));
            assert_eq!(sim, metric.score(&b, &a));
            assert_eq!(metric.score(&a, &a), 1.);
        }
    }
}
