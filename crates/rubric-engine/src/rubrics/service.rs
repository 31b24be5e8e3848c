use serde::{Deserialize, Serialize};

use super::assembler::{AssemblyError, AssemblyPolicy, RubricAssembler, DEFAULT_MAX_SCORE};
use super::assessment::{
    AssessmentEngine, AssessmentError, AssessmentOutcome, AssessmentSubmission, CriterionSelection,
};
use super::domain::{Rubric, RubricDraft, RubricId, TableFormat};
use super::import::{ParseError, RubricImporter, ShortRowPolicy};
use super::weights::WeightImbalancePolicy;

/// Leniency and scale settings shared by every rubric operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub default_max_score: f64,
    pub on_short_row: ShortRowPolicy,
    pub on_weight_imbalance: WeightImbalancePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_max_score: DEFAULT_MAX_SCORE,
            on_short_row: ShortRowPolicy::default(),
            on_weight_imbalance: WeightImbalancePolicy::default(),
        }
    }
}

/// Entry point for hosts: import, create, update and assess rubrics.
#[derive(Debug, Clone, Default)]
pub struct RubricService {
    importer: RubricImporter,
    assembler: RubricAssembler,
    engine: AssessmentEngine,
}

impl RubricService {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            importer: RubricImporter::new(config.on_short_row),
            assembler: RubricAssembler::new(AssemblyPolicy {
                on_weight_imbalance: config.on_weight_imbalance,
                default_max_score: config.default_max_score,
            }),
            engine: AssessmentEngine::new(),
        }
    }

    pub fn importer(&self) -> &RubricImporter {
        &self.importer
    }

    /// Parse a table and assemble it into a rubric named `name`.
    pub fn import(
        &self,
        id: RubricId,
        name: impl Into<String>,
        format: TableFormat,
        raw: &str,
    ) -> Result<Rubric, RubricServiceError> {
        let table = self.importer.parse(format, raw)?;
        self.create(id, table.into_draft(name))
    }

    pub fn create(&self, id: RubricId, draft: RubricDraft) -> Result<Rubric, RubricServiceError> {
        Ok(self.assembler.assemble(id, draft)?)
    }

    pub fn update(
        &self,
        existing: &Rubric,
        draft: RubricDraft,
    ) -> Result<Rubric, RubricServiceError> {
        Ok(self.assembler.reassemble(existing, draft)?)
    }

    pub fn assess(
        &self,
        rubric: &Rubric,
        submission: AssessmentSubmission,
    ) -> Result<AssessmentOutcome, RubricServiceError> {
        Ok(self.engine.assess(rubric, submission)?)
    }

    pub fn revise(
        &self,
        rubric: &Rubric,
        previous: &AssessmentOutcome,
        selection: CriterionSelection,
    ) -> Result<AssessmentOutcome, RubricServiceError> {
        Ok(self.engine.revise(rubric, previous, selection)?)
    }
}

/// Error raised by the rubric service. Every variant is a caller mistake.
#[derive(Debug, thiserror::Error)]
pub enum RubricServiceError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Assembly(#[from] AssemblyError),
    #[error(transparent)]
    Assessment(#[from] AssessmentError),
}
