mod completeness;
mod score;

pub use completeness::IncompleteAssessment;
pub use score::{calculate_score, ScoreInput, ScoreSummary};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::domain::{ActivityId, CriterionId, LevelId, Rubric, RubricId, StudentId};
use completeness::check_completeness;

/// One chosen level for one criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionSelection {
    pub criterion_id: CriterionId,
    pub level_id: LevelId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

/// A student's selections for one rubric and activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentSubmission {
    pub student_id: StudentId,
    pub activity_id: ActivityId,
    pub selections: Vec<CriterionSelection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessed_on: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

/// Scored selection for a single criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionAssessment {
    pub criterion_id: CriterionId,
    pub level_id: LevelId,
    pub weight: f64,
    pub score: f64,
    pub weighted_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

/// Completed assessment with per-criterion breakdown and the rescaled total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentOutcome {
    pub rubric_id: RubricId,
    pub student_id: StudentId,
    pub activity_id: ActivityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessed_on: Option<NaiveDate>,
    pub criteria: Vec<CriterionAssessment>,
    pub summary: ScoreSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl AssessmentOutcome {
    /// Rebuild the submission this outcome was computed from.
    pub fn submission(&self) -> AssessmentSubmission {
        AssessmentSubmission {
            student_id: self.student_id.clone(),
            activity_id: self.activity_id.clone(),
            selections: self
                .criteria
                .iter()
                .map(|entry| CriterionSelection {
                    criterion_id: entry.criterion_id.clone(),
                    level_id: entry.level_id.clone(),
                    feedback: entry.feedback.clone(),
                })
                .collect(),
            assessed_on: self.assessed_on,
            feedback: self.feedback.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssessmentError {
    #[error(transparent)]
    Incomplete(#[from] IncompleteAssessment),
    #[error("level '{level}' selected for criterion '{criterion}' is not part of the rubric")]
    UnknownLevel {
        criterion: CriterionId,
        level: LevelId,
    },
    #[error("assessment belongs to rubric '{found}', not '{expected}'")]
    RubricMismatch { expected: RubricId, found: RubricId },
}

/// Stateless scorer applying a rubric to a student's selections.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssessmentEngine;

impl AssessmentEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn assess(
        &self,
        rubric: &Rubric,
        submission: AssessmentSubmission,
    ) -> Result<AssessmentOutcome, AssessmentError> {
        if let Err(incomplete) = check_completeness(rubric, &submission.selections) {
            warn!(
                rubric = %rubric.id,
                student = %submission.student_id,
                missing = incomplete.missing.len(),
                duplicated = incomplete.duplicated.len(),
                unknown = incomplete.unknown.len(),
                "rejecting incomplete assessment"
            );
            return Err(incomplete.into());
        }

        let AssessmentSubmission {
            student_id,
            activity_id,
            mut selections,
            assessed_on,
            feedback,
        } = submission;

        let mut criteria = Vec::with_capacity(rubric.criteria.len());
        for criterion in &rubric.criteria {
            let position = selections
                .iter()
                .position(|selection| selection.criterion_id == criterion.id)
                .ok_or_else(|| IncompleteAssessment {
                    missing: vec![criterion.id.clone()],
                    ..IncompleteAssessment::default()
                })?;
            let selection = selections.swap_remove(position);

            let level = rubric
                .level(&selection.level_id)
                .ok_or_else(|| AssessmentError::UnknownLevel {
                    criterion: selection.criterion_id.clone(),
                    level: selection.level_id.clone(),
                })?;

            criteria.push(CriterionAssessment {
                criterion_id: selection.criterion_id,
                level_id: selection.level_id,
                weight: criterion.weight,
                score: level.score_value,
                weighted_score: level.score_value * criterion.weight,
                feedback: selection.feedback,
            });
        }

        let inputs: Vec<ScoreInput> = criteria
            .iter()
            .map(|entry| ScoreInput {
                weight: entry.weight,
                selected_level_score_value: entry.score,
            })
            .collect();
        let summary = calculate_score(&inputs, rubric.max_score);

        info!(
            rubric = %rubric.id,
            student = %student_id,
            activity = %activity_id,
            total = summary.total_score,
            percentage = summary.percentage,
            "assessment scored"
        );

        Ok(AssessmentOutcome {
            rubric_id: rubric.id.clone(),
            student_id,
            activity_id,
            assessed_on,
            criteria,
            summary,
            feedback,
        })
    }

    /// Replace one criterion's selection and recompute the whole assessment.
    pub fn revise(
        &self,
        rubric: &Rubric,
        previous: &AssessmentOutcome,
        selection: CriterionSelection,
    ) -> Result<AssessmentOutcome, AssessmentError> {
        if previous.rubric_id != rubric.id {
            return Err(AssessmentError::RubricMismatch {
                expected: rubric.id.clone(),
                found: previous.rubric_id.clone(),
            });
        }

        let mut submission = previous.submission();
        match submission
            .selections
            .iter_mut()
            .find(|existing| existing.criterion_id == selection.criterion_id)
        {
            Some(existing) => *existing = selection,
            None => submission.selections.push(selection),
        }

        self.assess(rubric, submission)
    }
}
