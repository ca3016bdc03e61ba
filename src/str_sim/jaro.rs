use super::{common_char_prefix, to_chars, PairwiseMetric};
use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};

/// Jaro similarity over character sequences.
fn jaro_chars(a: &[char], b: &[char]) -> f64 {
    let (len1, len2) = (a.len(), b.len());
    if len1 == 0 || len2 == 0 {
        return 0.;
    }

    // floor(max / 2) - 1, clamped so one-character strings get a window of 0
    let search_range = (len1.max(len2) / 2).saturating_sub(1);

    let mut flags1 = vec![false; len1];
    let mut flags2 = vec![false; len2];
    let mut n_matches = 0usize;

    // Greedy and first-fit, left to right. Changing the order changes the result.
    for (i, c1) in a.iter().enumerate() {
        let start = i.saturating_sub(search_range);
        let end = len2.min(i + search_range + 1);
        for j in start..end {
            if !flags2[j] && b[j] == *c1 {
                flags1[i] = true;
                flags2[j] = true;
                n_matches += 1;
                break;
            }
        }
    }

    if n_matches == 0 {
        return 0.;
    }

    // Walk the matched characters of both strings in lockstep
    let matched2 = b.iter().zip(flags2.iter()).filter(|&(_, &f)| f).map(|(c, _)| c);
    let half_transpositions = a
        .iter()
        .zip(flags1.iter())
        .filter(|&(_, &f)| f)
        .map(|(c, _)| c)
        .zip(matched2)
        .filter(|(c1, c2)| c1 != c2)
        .count();
    let n_transpositions = half_transpositions / 2;

    let m = n_matches as f64;
    (m / len1 as f64 + m / len2 as f64 + (m - n_transpositions as f64) / m) / 3.0
}

/// Jaro similarity, in [0, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Jaro;

impl PairwiseMetric for Jaro {
    fn score(&self, a: &str, b: &str) -> f64 {
        if a == b {
            return 1.;
        }
        jaro_chars(&to_chars(a), &to_chars(b))
    }
}

/// Arguments of the Winkler prefix boost.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawJaroWinklerArgs")]
pub struct JaroWinklerArgs {
    max_prefix_length: usize,
    prefix_weight: f64,
}

#[derive(Deserialize)]
struct RawJaroWinklerArgs {
    #[serde(default = "default_max_prefix_length")]
    max_prefix_length: usize,
    #[serde(default = "default_prefix_weight")]
    prefix_weight: f64,
}

fn default_max_prefix_length() -> usize {
    4
}

fn default_prefix_weight() -> f64 {
    0.1
}

impl TryFrom<RawJaroWinklerArgs> for JaroWinklerArgs {
    type Error = SimError;

    fn try_from(value: RawJaroWinklerArgs) -> SimResult<Self> {
        Self::new(value.max_prefix_length, value.prefix_weight)
    }
}

impl JaroWinklerArgs {
    /// `max_prefix_length * prefix_weight` must not exceed 1, otherwise the boost could
    /// push the score past 1.
    pub fn new(max_prefix_length: usize, prefix_weight: f64) -> SimResult<Self> {
        if !prefix_weight.is_finite() || prefix_weight < 0. {
            return Err(SimError::InvalidArgument(format!(
                "`prefix_weight` must be a finite, non-negative number. Got {}.",
                prefix_weight
            )));
        }
        if max_prefix_length as f64 * prefix_weight > 1. {
            return Err(SimError::InvalidArgument(format!(
                "`max_prefix_length` * `prefix_weight` must be at most 1. Got {} * {}.",
                max_prefix_length, prefix_weight
            )));
        }
        Ok(Self {
            max_prefix_length,
            prefix_weight,
        })
    }

    pub fn max_prefix_length(&self) -> usize {
        self.max_prefix_length
    }

    pub fn prefix_weight(&self) -> f64 {
        self.prefix_weight
    }
}

impl Default for JaroWinklerArgs {
    fn default() -> Self {
        Self {
            max_prefix_length: default_max_prefix_length(),
            prefix_weight: default_prefix_weight(),
        }
    }
}

/// Jaro similarity boosted by the length of the common prefix:
/// `jaro + prefix * prefix_weight * (1 - jaro)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct JaroWinkler {
    args: JaroWinklerArgs,
}

impl JaroWinkler {
    pub fn new(args: JaroWinklerArgs) -> Self {
        Self { args }
    }

    pub fn args(&self) -> &JaroWinklerArgs {
        &self.args
    }
}

impl PairwiseMetric for JaroWinkler {
    fn score(&self, a: &str, b: &str) -> f64 {
        if a == b {
            return 1.;
        }
        let (a, b) = (to_chars(a), to_chars(b));
        let sim = jaro_chars(&a, &b);
        let prefix = common_char_prefix(&a, &b).min(self.args.max_prefix_length);
        sim + prefix as f64 * self.args.prefix_weight * (1.0 - sim)
    }
}

#[inline]
pub fn jaro(a: Option<&str>, b: Option<&str>) -> f64 {
    Jaro.score_opt(a, b)
}

/// Jaro-Winkler similarity with the standard prefix cap of 4 and weight of 0.1.
#[inline]
pub fn jaro_winkler(a: Option<&str>, b: Option<&str>) -> f64 {
    JaroWinkler::default().score_opt(a, b)
}
