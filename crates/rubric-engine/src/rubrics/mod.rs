//! Rubric import, assembly and assessment scoring.
//!
//! The import path runs parser → weight normalizer → assembler and hands the
//! finished [`Rubric`] to whatever persists it. Scoring runs independently at
//! assessment time against a stored rubric and a student's selections.

pub mod assembler;
pub mod assessment;
pub mod domain;
pub mod export;
pub mod import;
pub mod palette;
pub mod service;
pub mod weights;

#[cfg(test)]
mod tests;

pub use assembler::{AssemblyError, AssemblyPolicy, RubricAssembler, DEFAULT_MAX_SCORE};
pub use assessment::{
    calculate_score, AssessmentEngine, AssessmentError, AssessmentOutcome, AssessmentSubmission,
    CriterionAssessment, CriterionSelection, IncompleteAssessment, ScoreInput, ScoreSummary,
};
pub use domain::{
    ActivityId, Cell, CellDraft, Criterion, CriterionDraft, CriterionId, Level, LevelDraft,
    LevelId, ParsedCell, ParsedCriterion, ParsedLevel, ParsedTable, Rubric, RubricDraft, RubricId,
    StudentId, TableFormat,
};
pub use export::ExportError;
pub use import::{ImportError, ParseError, RubricImporter, ShortRowPolicy};
pub use palette::{generate_colors, InvalidArgument};
pub use service::{EngineConfig, RubricService, RubricServiceError};
pub use weights::{normalize_weights, validate_weights, WeightImbalancePolicy, WEIGHT_TOLERANCE};
