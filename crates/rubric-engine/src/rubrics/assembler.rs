use std::collections::BTreeMap;

use tracing::{debug, info};

use super::domain::{
    Cell, CellDraft, Criterion, CriterionDraft, CriterionId, Level, LevelDraft, LevelId, Rubric,
    RubricDraft, RubricId,
};
use super::palette::{self, InvalidArgument};
use super::weights::{normalize_weights, validate_weights, weight_sum, WeightImbalancePolicy};

pub const DEFAULT_MAX_SCORE: f64 = 100.0;

/// Reasons a draft cannot become a rubric.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssemblyError {
    #[error("rubric needs at least one criterion")]
    NoCriteria,
    #[error("rubric needs at least one level")]
    NoLevels,
    #[error("criterion '{criterion}' has invalid weight {weight}")]
    InvalidWeight { criterion: String, weight: f64 },
    #[error("criterion weights sum to {sum:.4}, expected 1")]
    WeightImbalance { sum: f64 },
    #[error("level '{level}' has invalid score value {score_value}")]
    InvalidScoreValue { level: String, score_value: f64 },
    #[error("max score must be a positive number, got {0}")]
    InvalidMaxScore(f64),
    #[error("level '{level}' has invalid color '{color}' (expected #RRGGBB)")]
    InvalidColor { level: String, color: String },
    #[error("cell at criterion {criterion}, level {level} is outside the {criteria}x{levels} grid")]
    CellOutOfRange {
        criterion: usize,
        level: usize,
        criteria: usize,
        levels: usize,
    },
    #[error(transparent)]
    Palette(#[from] InvalidArgument),
}

/// Policy dials for rubric assembly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssemblyPolicy {
    pub on_weight_imbalance: WeightImbalancePolicy,
    pub default_max_score: f64,
}

impl Default for AssemblyPolicy {
    fn default() -> Self {
        Self {
            on_weight_imbalance: WeightImbalancePolicy::default(),
            default_max_score: DEFAULT_MAX_SCORE,
        }
    }
}

/// Resolves drafts into complete rubrics with identities and a full cell grid.
#[derive(Debug, Clone, Default)]
pub struct RubricAssembler {
    policy: AssemblyPolicy,
}

impl RubricAssembler {
    pub fn new(policy: AssemblyPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &AssemblyPolicy {
        &self.policy
    }

    pub fn assemble(&self, id: RubricId, draft: RubricDraft) -> Result<Rubric, AssemblyError> {
        let RubricDraft {
            name,
            description,
            max_score,
            criteria,
            levels,
            cells,
        } = draft;

        if criteria.is_empty() {
            return Err(AssemblyError::NoCriteria);
        }
        if levels.is_empty() {
            return Err(AssemblyError::NoLevels);
        }

        let max_score = max_score.unwrap_or(self.policy.default_max_score);
        if !(max_score.is_finite() && max_score > 0.0) {
            return Err(AssemblyError::InvalidMaxScore(max_score));
        }

        let criteria = self.balance(criteria)?;
        let criteria = resolve_criteria(&id, criteria);
        let levels = resolve_levels(&id, levels)?;
        let cells = build_grid(&criteria, &levels, cells)?;

        let rubric = Rubric {
            criteria_count: criteria.len(),
            levels_count: levels.len(),
            id,
            name,
            description,
            max_score,
            criteria,
            levels,
            cells,
        };

        info!(
            rubric = %rubric.id,
            criteria = rubric.criteria_count,
            levels = rubric.levels_count,
            "assembled rubric"
        );
        Ok(rubric)
    }

    /// Rebuild an existing rubric from an edited draft, keeping its identity.
    pub fn reassemble(
        &self,
        existing: &Rubric,
        draft: RubricDraft,
    ) -> Result<Rubric, AssemblyError> {
        self.assemble(existing.id.clone(), draft)
    }

    fn balance(&self, criteria: Vec<CriterionDraft>) -> Result<Vec<CriterionDraft>, AssemblyError> {
        if let Some(invalid) = criteria
            .iter()
            .find(|criterion| !(criterion.weight.is_finite() && criterion.weight >= 0.0))
        {
            return Err(AssemblyError::InvalidWeight {
                criterion: invalid.name.clone(),
                weight: invalid.weight,
            });
        }

        if validate_weights(&criteria) {
            if criteria.iter().any(|criterion| criterion.weight > 1.0) {
                debug!(
                    sum = weight_sum(&criteria),
                    "rescaling criterion weights above 1"
                );
                return Ok(normalize_weights(&criteria));
            }
            return Ok(criteria);
        }

        let sum = weight_sum(&criteria);
        match self.policy.on_weight_imbalance {
            WeightImbalancePolicy::Normalize => {
                debug!(sum, count = criteria.len(), "normalizing criterion weights");
                Ok(normalize_weights(&criteria))
            }
            WeightImbalancePolicy::Reject => Err(AssemblyError::WeightImbalance { sum }),
        }
    }
}

fn resolve_criteria(rubric: &RubricId, criteria: Vec<CriterionDraft>) -> Vec<Criterion> {
    criteria
        .into_iter()
        .enumerate()
        .map(|(order, draft)| Criterion {
            id: CriterionId::positional(rubric, order),
            name: draft.name,
            description: draft.description,
            order,
            weight: draft.weight,
        })
        .collect()
}

fn resolve_levels(
    rubric: &RubricId,
    levels: Vec<LevelDraft>,
) -> Result<Vec<Level>, AssemblyError> {
    let palette = palette::generate_colors(levels.len())?;

    levels
        .into_iter()
        .zip(palette)
        .enumerate()
        .map(|(order, (draft, generated))| {
            let score_value = draft.score_value.unwrap_or((order + 1) as f64);
            if !(score_value.is_finite() && score_value >= 0.0) {
                return Err(AssemblyError::InvalidScoreValue {
                    level: draft.name,
                    score_value,
                });
            }

            let color = match draft.color {
                Some(color) => match palette::normalize_color(&color) {
                    Some(normalized) => normalized,
                    None => {
                        return Err(AssemblyError::InvalidColor {
                            level: draft.name,
                            color,
                        })
                    }
                },
                None => generated,
            };

            Ok(Level {
                id: LevelId::positional(rubric, order),
                name: draft.name,
                description: draft.description,
                order,
                score_value,
                color,
            })
        })
        .collect()
}

fn build_grid(
    criteria: &[Criterion],
    levels: &[Level],
    drafts: Vec<CellDraft>,
) -> Result<Vec<Cell>, AssemblyError> {
    let mut contents: BTreeMap<(usize, usize), String> = BTreeMap::new();
    for criterion in 0..criteria.len() {
        for level in 0..levels.len() {
            contents.insert(
                (criterion, level),
                format!("Criterion {} - Level {}", criterion + 1, level + 1),
            );
        }
    }

    for draft in drafts {
        let slot = contents
            .get_mut(&(draft.criterion, draft.level))
            .ok_or(AssemblyError::CellOutOfRange {
                criterion: draft.criterion,
                level: draft.level,
                criteria: criteria.len(),
                levels: levels.len(),
            })?;
        *slot = draft.content;
    }

    Ok(contents
        .into_iter()
        .map(|((criterion, level), content)| Cell {
            criterion_id: criteria[criterion].id.clone(),
            level_id: levels[level].id.clone(),
            content,
        })
        .collect())
}
