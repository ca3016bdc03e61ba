//! Python interop. Thin wrappers: argument parsing, GIL release and error conversion.

use crate::dispatch::{batch, Execution};
use crate::error::{SimError, SimResult};
use crate::str_sim::{
    CostModel, EmptyInputPolicy, Jaccard, Jaro, JaroWinkler, JaroWinklerArgs, PairwiseMetric,
    WeightedLevenshtein,
};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

impl From<SimError> for PyErr {
    fn from(value: SimError) -> Self {
        PyValueError::new_err(value.to_string())
    }
}

fn levenshtein_engine(
    insertion_cost: f64,
    deletion_cost: f64,
    substitution_cost: f64,
    empty_as_edits: bool,
) -> PyResult<WeightedLevenshtein> {
    let costs = CostModel::new(insertion_cost, deletion_cost, substitution_cost)?;
    let policy = EmptyInputPolicy::from(empty_as_edits);
    Ok(WeightedLevenshtein::new(costs).with_empty_policy(policy))
}

/// `scaling_factor` is the older name of `prefix_weight`. At most one may be given.
fn resolve_prefix_weight(
    prefix_weight: Option<f64>,
    scaling_factor: Option<f64>,
) -> SimResult<f64> {
    match (prefix_weight, scaling_factor) {
        (Some(_), Some(_)) => Err(SimError::InvalidArgument(
            "Pass either `prefix_weight` or `scaling_factor`, not both.".into(),
        )),
        (Some(w), None) | (None, Some(w)) => Ok(w),
        (None, None) => Ok(JaroWinklerArgs::default().prefix_weight()),
    }
}

fn jaro_winkler_engine(
    max_prefix_length: usize,
    prefix_weight: Option<f64>,
    scaling_factor: Option<f64>,
) -> PyResult<JaroWinkler> {
    let prefix_weight = resolve_prefix_weight(prefix_weight, scaling_factor)?;
    Ok(JaroWinkler::new(JaroWinklerArgs::new(
        max_prefix_length,
        prefix_weight,
    )?))
}

/// Batches own their strings so the GIL can be released while scoring.
fn py_batch<M: PairwiseMetric>(
    py: Python<'_>,
    metric: &M,
    a_list: Vec<Option<String>>,
    b_list: Vec<Option<String>>,
    parallel: bool,
) -> PyResult<Vec<f64>> {
    let execution = Execution::from(parallel);
    let out = py.allow_threads(|| batch(metric, &a_list, &b_list, execution))?;
    Ok(out)
}

#[pyfunction]
#[pyo3(name = "weighted_levenshtein")]
#[pyo3(signature = (a, b, insertion_cost=1.0, deletion_cost=1.0, substitution_cost=1.0, empty_as_edits=false))]
fn py_weighted_levenshtein(
    a: Option<String>,
    b: Option<String>,
    insertion_cost: f64,
    deletion_cost: f64,
    substitution_cost: f64,
    empty_as_edits: bool,
) -> PyResult<f64> {
    let engine = levenshtein_engine(
        insertion_cost,
        deletion_cost,
        substitution_cost,
        empty_as_edits,
    )?;
    Ok(engine.score_opt(a.as_deref(), b.as_deref()))
}

#[pyfunction]
#[pyo3(name = "jaro")]
#[pyo3(signature = (a, b))]
fn py_jaro(a: Option<String>, b: Option<String>) -> f64 {
    Jaro.score_opt(a.as_deref(), b.as_deref())
}

#[pyfunction]
#[pyo3(name = "jaro_winkler")]
#[pyo3(signature = (a, b, max_prefix_length=4, prefix_weight=None, scaling_factor=None))]
fn py_jaro_winkler(
    a: Option<String>,
    b: Option<String>,
    max_prefix_length: usize,
    prefix_weight: Option<f64>,
    scaling_factor: Option<f64>,
) -> PyResult<f64> {
    let engine = jaro_winkler_engine(max_prefix_length, prefix_weight, scaling_factor)?;
    Ok(engine.score_opt(a.as_deref(), b.as_deref()))
}

#[pyfunction]
#[pyo3(name = "jaccard")]
#[pyo3(signature = (a, b, ngram=1))]
fn py_jaccard(a: Option<String>, b: Option<String>, ngram: usize) -> PyResult<f64> {
    Ok(Jaccard::new(ngram)?.score_opt(a.as_deref(), b.as_deref()))
}

#[pyfunction]
#[pyo3(name = "weighted_levenshtein_batch")]
#[pyo3(signature = (a_list, b_list, insertion_cost=1.0, deletion_cost=1.0, substitution_cost=1.0, empty_as_edits=false, parallel=true))]
#[allow(clippy::too_many_arguments)]
fn py_weighted_levenshtein_batch(
    py: Python<'_>,
    a_list: Vec<Option<String>>,
    b_list: Vec<Option<String>>,
    insertion_cost: f64,
    deletion_cost: f64,
    substitution_cost: f64,
    empty_as_edits: bool,
    parallel: bool,
) -> PyResult<Vec<f64>> {
    let engine = levenshtein_engine(
        insertion_cost,
        deletion_cost,
        substitution_cost,
        empty_as_edits,
    )?;
    py_batch(py, &engine, a_list, b_list, parallel)
}

#[pyfunction]
#[pyo3(name = "jaro_batch")]
#[pyo3(signature = (a_list, b_list, parallel=true))]
fn py_jaro_batch(
    py: Python<'_>,
    a_list: Vec<Option<String>>,
    b_list: Vec<Option<String>>,
    parallel: bool,
) -> PyResult<Vec<f64>> {
    py_batch(py, &Jaro, a_list, b_list, parallel)
}

#[pyfunction]
#[pyo3(name = "jaro_winkler_batch")]
#[pyo3(signature = (a_list, b_list, max_prefix_length=4, prefix_weight=None, parallel=true, scaling_factor=None))]
fn py_jaro_winkler_batch(
    py: Python<'_>,
    a_list: Vec<Option<String>>,
    b_list: Vec<Option<String>>,
    max_prefix_length: usize,
    prefix_weight: Option<f64>,
    parallel: bool,
    scaling_factor: Option<f64>,
) -> PyResult<Vec<f64>> {
    let engine = jaro_winkler_engine(max_prefix_length, prefix_weight, scaling_factor)?;
    py_batch(py, &engine, a_list, b_list, parallel)
}

#[pyfunction]
#[pyo3(name = "jaccard_batch")]
#[pyo3(signature = (a_list, b_list, ngram=1, parallel=true))]
fn py_jaccard_batch(
    py: Python<'_>,
    a_list: Vec<Option<String>>,
    b_list: Vec<Option<String>>,
    ngram: usize,
    parallel: bool,
) -> PyResult<Vec<f64>> {
    let engine = Jaccard::new(ngram)?;
    py_batch(py, &engine, a_list, b_list, parallel)
}

const MODULE_METADATA: [(&str, &str); 3] = [
    ("__version__", env!("CARGO_PKG_VERSION")),
    ("__author__", env!("CARGO_PKG_AUTHORS")),
    ("__description__", env!("CARGO_PKG_DESCRIPTION")),
];

#[pymodule]
#[pyo3(name = "string_sim_metrics")]
fn string_sim_metrics_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_weighted_levenshtein, m)?)?;
    m.add_function(wrap_pyfunction!(py_jaro, m)?)?;
    m.add_function(wrap_pyfunction!(py_jaro_winkler, m)?)?;
    m.add_function(wrap_pyfunction!(py_jaccard, m)?)?;
    m.add_function(wrap_pyfunction!(py_weighted_levenshtein_batch, m)?)?;
    m.add_function(wrap_pyfunction!(py_jaro_batch, m)?)?;
    m.add_function(wrap_pyfunction!(py_jaro_winkler_batch, m)?)?;
    m.add_function(wrap_pyfunction!(py_jaccard_batch, m)?)?;
    for (name, value) in MODULE_METADATA {
        m.add(name, value)?;
    }
    Ok(())
}
