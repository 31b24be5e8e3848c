use serde::{Deserialize, Serialize};

/// One criterion's contribution: its weight and the value of the selected level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreInput {
    pub weight: f64,
    pub selected_level_score_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub total_score: f64,
    pub max_possible_score: f64,
    pub percentage: f64,
}

/// Weighted score of a complete assessment, rescaled to `max_score`.
///
/// The ceiling is the highest level value among the selections themselves,
/// not the rubric's highest level.
pub fn calculate_score(entries: &[ScoreInput], max_score: f64) -> ScoreSummary {
    let max_level_value = entries
        .iter()
        .map(|entry| entry.selected_level_score_value)
        .fold(0.0, f64::max);

    let weighted_sum: f64 = entries
        .iter()
        .map(|entry| entry.weight * entry.selected_level_score_value)
        .sum();
    let max_weighted_sum: f64 = entries
        .iter()
        .map(|entry| entry.weight * max_level_value)
        .sum();

    let percentage = if max_weighted_sum > 0.0 {
        weighted_sum / max_weighted_sum * 100.0
    } else {
        0.0
    };

    ScoreSummary {
        total_score: round2(percentage / 100.0 * max_score),
        max_possible_score: max_score,
        percentage: round2(percentage),
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
