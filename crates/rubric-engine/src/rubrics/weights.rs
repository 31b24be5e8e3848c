use serde::{Deserialize, Serialize};

use super::domain::{Criterion, CriterionDraft, ParsedCriterion};

/// Allowed distance between a rubric's weight sum and 1.
pub const WEIGHT_TOLERANCE: f64 = 0.01;

/// What the assembler does with criteria whose weights do not sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightImbalancePolicy {
    #[default]
    Normalize,
    Reject,
}

/// Anything carrying a criterion weight.
pub trait Weighted {
    fn weight(&self) -> f64;
    fn set_weight(&mut self, weight: f64);
}

impl Weighted for Criterion {
    fn weight(&self) -> f64 {
        self.weight
    }

    fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }
}

impl Weighted for CriterionDraft {
    fn weight(&self) -> f64 {
        self.weight
    }

    fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }
}

impl Weighted for ParsedCriterion {
    fn weight(&self) -> f64 {
        self.weight
    }

    fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }
}

pub fn weight_sum<T: Weighted>(items: &[T]) -> f64 {
    items.iter().map(Weighted::weight).sum()
}

/// True when the weights sum to 1 within [`WEIGHT_TOLERANCE`].
pub fn validate_weights<T: Weighted>(items: &[T]) -> bool {
    (weight_sum(items) - 1.0).abs() < WEIGHT_TOLERANCE
}

/// Rescale weights proportionally so they sum to 1.
///
/// A sum that is zero, negative or not finite carries no proportions to
/// preserve, so every item receives `1 / len` instead.
pub fn normalize_weights<T: Weighted + Clone>(items: &[T]) -> Vec<T> {
    let mut normalized = items.to_vec();
    if normalized.is_empty() {
        return normalized;
    }

    let sum = weight_sum(items);
    if sum > 0.0 && sum.is_finite() {
        for item in &mut normalized {
            let weight = item.weight() / sum;
            item.set_weight(weight);
        }
    } else {
        let uniform = 1.0 / normalized.len() as f64;
        for item in &mut normalized {
            item.set_weight(uniform);
        }
    }

    normalized
}
