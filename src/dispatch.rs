//! Batch scoring: one call for N comparisons instead of N calls.

use crate::error::{SimError, SimResult};
use crate::str_sim::{JaroWinkler, PairwiseMetric};
use crate::utils::split_offsets;
use rayon::prelude::{IntoParallelIterator, IntoParallelRefIterator, ParallelIterator};

/// Below this many pairs, `Execution::Auto` stays on the calling thread. Thread pool
/// coordination costs more than it saves on small batches of short strings.
pub const PARALLEL_THRESHOLD: usize = 1024;

/// How a batch is iterated. Never changes the scores or their order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Execution {
    Sequential,
    /// Contiguous chunks, one per worker of the current rayon pool, concatenated in
    /// order. Callers that own a pool run the batch inside `install`.
    Parallel,
    /// Parallel at or above `PARALLEL_THRESHOLD` items.
    #[default]
    Auto,
}

impl Execution {
    #[inline]
    fn is_parallel(self, len: usize) -> bool {
        match self {
            Self::Sequential => false,
            Self::Parallel => true,
            Self::Auto => len >= PARALLEL_THRESHOLD,
        }
    }
}

impl From<bool> for Execution {
    fn from(parallel: bool) -> Self {
        if parallel {
            Self::Auto
        } else {
            Self::Sequential
        }
    }
}

/// Anything that can be read as a possibly absent string.
pub trait MaybeStr {
    fn as_maybe_str(&self) -> Option<&str>;
}

impl MaybeStr for &str {
    #[inline]
    fn as_maybe_str(&self) -> Option<&str> {
        Some(*self)
    }
}

impl MaybeStr for String {
    #[inline]
    fn as_maybe_str(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl MaybeStr for Option<&str> {
    #[inline]
    fn as_maybe_str(&self) -> Option<&str> {
        *self
    }
}

impl MaybeStr for Option<String> {
    #[inline]
    fn as_maybe_str(&self) -> Option<&str> {
        self.as_deref()
    }
}

/// Scores `left[i]` against `right[i]` for every index. Both sides must have the same
/// length. Absent strings score 0.0, like in the single-pair call.
pub fn batch<M, L, R>(
    metric: &M,
    left: &[L],
    right: &[R],
    execution: Execution,
) -> SimResult<Vec<f64>>
where
    M: PairwiseMetric + ?Sized,
    L: MaybeStr + Sync,
    R: MaybeStr + Sync,
{
    if left.len() != right.len() {
        return Err(SimError::LengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }

    let score_range = |offset: usize, len: usize| -> Vec<f64> {
        let end = offset + len;
        left[offset..end]
            .iter()
            .zip(right[offset..end].iter())
            .map(|(a, b)| metric.score_opt(a.as_maybe_str(), b.as_maybe_str()))
            .collect()
    };

    let parallel = execution.is_parallel(left.len());
    tracing::debug!(pairs = left.len(), parallel, "scoring batch");

    if parallel {
        let n_threads = rayon::current_num_threads();
        let splits = split_offsets(left.len(), n_threads);
        let chunks: Vec<Vec<f64>> = splits
            .into_par_iter()
            .map(|(offset, len)| score_range(offset, len))
            .collect();
        Ok(chunks.into_iter().flatten().collect())
    } else {
        Ok(score_range(0, left.len()))
    }
}

/// Scores one query against every candidate, in candidate order.
pub fn batch_one_to_many<M, Q, C>(
    metric: &M,
    query: Q,
    candidates: &[C],
    execution: Execution,
) -> Vec<f64>
where
    M: PairwiseMetric + ?Sized,
    Q: MaybeStr + Sync,
    C: MaybeStr + Sync,
{
    let query = query.as_maybe_str();
    let parallel = execution.is_parallel(candidates.len());
    tracing::debug!(candidates = candidates.len(), parallel, "scoring one to many");

    if parallel {
        candidates
            .par_iter()
            .map(|c| metric.score_opt(query, c.as_maybe_str()))
            .collect()
    } else {
        candidates
            .iter()
            .map(|c| metric.score_opt(query, c.as_maybe_str()))
            .collect()
    }
}

/// Jaro-Winkler (prefix cap 4, weight 0.1) over paired lists. Index `i` of the output
/// equals `jaro_winkler(a_list[i], b_list[i])` exactly.
pub fn jaro_winkler_batch<L, R>(a_list: &[L], b_list: &[R]) -> SimResult<Vec<f64>>
where
    L: MaybeStr + Sync,
    R: MaybeStr + Sync,
{
    batch(&JaroWinkler::default(), a_list, b_list, Execution::Auto)
}
