//! String similarity metrics: weighted Levenshtein distance, Jaro, Jaro-Winkler and
//! Jaccard similarity, with batched and parallel scoring for callers that compare many
//! pairs at once.
//!
//! All metrics compare Unicode scalar values (`char`). An absent (`None`) input always
//! scores 0.0.

mod dispatch;
mod error;
pub mod str_sim;
mod utils;

#[cfg(feature = "polars")]
mod expressions;
#[cfg(feature = "python")]
mod pyfuncs;

pub use dispatch::{
    batch, batch_one_to_many, jaro_winkler_batch, Execution, MaybeStr, PARALLEL_THRESHOLD,
};
pub use error::{SimError, SimResult};
pub use str_sim::{
    jaccard, jaro, jaro_winkler, weighted_levenshtein, CostModel, EmptyInputPolicy, Jaccard,
    Jaro, JaroWinkler, JaroWinklerArgs, PairwiseMetric, WeightedLevenshtein,
};
