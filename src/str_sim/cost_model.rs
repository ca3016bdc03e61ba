use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};

/// Per-operation costs for weighted edit distances.
///
/// All costs are finite and non-negative; the constructor and deserialization both
/// enforce it, so engines never see an invalid model. A substitution cost of 0 turns
/// the distance into a pure alignment of lengths.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCosts")]
pub struct CostModel {
    insertion_cost: f64,
    deletion_cost: f64,
    substitution_cost: f64,
}

#[derive(Deserialize)]
struct RawCosts {
    #[serde(default = "unit_cost")]
    insertion_cost: f64,
    #[serde(default = "unit_cost")]
    deletion_cost: f64,
    #[serde(default = "unit_cost")]
    substitution_cost: f64,
}

fn unit_cost() -> f64 {
    1.0
}

impl TryFrom<RawCosts> for CostModel {
    type Error = SimError;

    fn try_from(value: RawCosts) -> SimResult<Self> {
        Self::new(
            value.insertion_cost,
            value.deletion_cost,
            value.substitution_cost,
        )
    }
}

#[inline]
fn check_cost(name: &'static str, value: f64) -> SimResult<f64> {
    if value.is_finite() && value >= 0. {
        Ok(value)
    } else {
        Err(SimError::InvalidCost { name, value })
    }
}

impl CostModel {
    pub fn new(insertion_cost: f64, deletion_cost: f64, substitution_cost: f64) -> SimResult<Self> {
        Ok(Self {
            insertion_cost: check_cost("insertion_cost", insertion_cost)?,
            deletion_cost: check_cost("deletion_cost", deletion_cost)?,
            substitution_cost: check_cost("substitution_cost", substitution_cost)?,
        })
    }

    #[inline]
    pub fn insertion_cost(&self) -> f64 {
        self.insertion_cost
    }

    #[inline]
    pub fn deletion_cost(&self) -> f64 {
        self.deletion_cost
    }

    #[inline]
    pub fn substitution_cost(&self) -> f64 {
        self.substitution_cost
    }

    /// The same model seen from the other string: inserting into `a` is deleting from `b`.
    #[inline]
    pub(crate) fn transposed(&self) -> Self {
        Self {
            insertion_cost: self.deletion_cost,
            deletion_cost: self.insertion_cost,
            substitution_cost: self.substitution_cost,
        }
    }
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            insertion_cost: 1.,
            deletion_cost: 1.,
            substitution_cost: 1.,
        }
    }
}

/// What the weighted Levenshtein distance returns when exactly one input is empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyInputPolicy {
    /// 0.0, like an absent input. Existing callers rely on this.
    #[default]
    Sentinel,
    /// The true edit cost: every character of the other string inserted or deleted.
    EditCost,
}

impl From<bool> for EmptyInputPolicy {
    fn from(empty_as_edits: bool) -> Self {
        if empty_as_edits {
            Self::EditCost
        } else {
            Self::Sentinel
        }
    }
}
