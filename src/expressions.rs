use crate::dispatch::{batch, batch_one_to_many, Execution};
use crate::error::SimError;
use crate::str_sim::{
    CostModel, EmptyInputPolicy, Jaccard, Jaro, JaroWinkler, JaroWinklerArgs, PairwiseMetric,
    WeightedLevenshtein,
};
use polars::prelude::*;
use pyo3_polars::derive::{polars_expr, CallerContext};
use pyo3_polars::export::polars_core::POOL;
use serde::Deserialize;

impl From<SimError> for PolarsError {
    fn from(value: SimError) -> Self {
        match value {
            SimError::LengthMismatch { .. } => {
                PolarsError::ShapeMismatch(value.to_string().into())
            }
            _ => PolarsError::ComputeError(value.to_string().into()),
        }
    }
}

#[derive(Deserialize)]
struct LevenshteinKwargs {
    #[serde(default)]
    costs: CostModel,
    #[serde(default)]
    empty_policy: EmptyInputPolicy,
    parallel: bool,
}

#[derive(Deserialize)]
struct JaroWinklerKwargs {
    #[serde(default)]
    args: JaroWinklerArgs,
    parallel: bool,
}

#[derive(Deserialize)]
struct JaccardKwargs {
    ngram: usize,
    parallel: bool,
}

#[derive(Deserialize)]
struct ParallelKwargs {
    parallel: bool,
}

/// Scores the first string column against the second. The second column must have the
/// same length as the first, or be a single value compared against every row.
/// Null cells score 0.0. `parallel` is off when polars already runs this expression
/// in parallel over groups. Parallel scoring runs inside polars' thread pool.
fn pairwise_scores<M: PairwiseMetric>(
    metric: &M,
    inputs: &[Series],
    parallel: bool,
) -> PolarsResult<Series> {
    let ca1 = inputs[0].str()?;
    let ca2 = inputs[1].str()?;
    let execution = Execution::from(parallel);

    let left: Vec<Option<&str>> = ca1.into_iter().collect();
    let right: Vec<Option<&str>> = ca2.into_iter().collect();
    let score = || -> PolarsResult<Vec<f64>> {
        if right.len() == 1 && left.len() != 1 {
            Ok(batch_one_to_many(metric, right[0], &left, execution))
        } else {
            Ok(batch(metric, &left, &right, execution)?)
        }
    };
    let scores = if parallel {
        POOL.install(score)?
    } else {
        score()?
    };
    Ok(Float64Chunked::from_vec(ca1.name(), scores).into_series())
}

#[polars_expr(output_type=Float64)]
fn pl_weighted_levenshtein(
    inputs: &[Series],
    context: CallerContext,
    kwargs: LevenshteinKwargs,
) -> PolarsResult<Series> {
    let can_parallel = kwargs.parallel && !context.parallel();
    let engine = WeightedLevenshtein::new(kwargs.costs).with_empty_policy(kwargs.empty_policy);
    pairwise_scores(&engine, inputs, can_parallel)
}

#[polars_expr(output_type=Float64)]
fn pl_jaro(
    inputs: &[Series],
    context: CallerContext,
    kwargs: ParallelKwargs,
) -> PolarsResult<Series> {
    let can_parallel = kwargs.parallel && !context.parallel();
    pairwise_scores(&Jaro, inputs, can_parallel)
}

#[polars_expr(output_type=Float64)]
fn pl_jaro_winkler(
    inputs: &[Series],
    context: CallerContext,
    kwargs: JaroWinklerKwargs,
) -> PolarsResult<Series> {
    let can_parallel = kwargs.parallel && !context.parallel();
    pairwise_scores(&JaroWinkler::new(kwargs.args), inputs, can_parallel)
}

#[polars_expr(output_type=Float64)]
fn pl_jaccard(
    inputs: &[Series],
    context: CallerContext,
    kwargs: JaccardKwargs,
) -> PolarsResult<Series> {
    let can_parallel = kwargs.parallel && !context.parallel();
    let engine = Jaccard::new(kwargs.ngram)?;
    pairwise_scores(&engine, inputs, can_parallel)
}
