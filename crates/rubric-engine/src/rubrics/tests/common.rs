use crate::rubrics::assessment::{AssessmentSubmission, CriterionSelection};
use crate::rubrics::domain::{
    ActivityId, CriterionDraft, LevelDraft, Rubric, RubricDraft, RubricId, StudentId,
};
use crate::rubrics::RubricAssembler;

pub(super) const ESSAY_MARKDOWN: &str = "\
| Criteria  | Emerging            | Developing          | Proficient        | Exemplary              |
|-----------|---------------------|---------------------|-------------------|------------------------|
| Thesis    | No clear claim      | Claim is vague      | Claim is arguable | Claim is nuanced       |
| Evidence  | Unsupported         | One weak source     | Relevant sources  | Varied, cited sources  |
| Structure | No organization     | Some paragraphs     | Logical order     | Seamless transitions   |
| Mechanics | Errors block reading| Frequent errors     | Minor errors      | Virtually error-free   |
";

pub(super) fn essay_draft() -> RubricDraft {
    let criteria = [
        ("Thesis", 0.4),
        ("Evidence", 0.3),
        ("Structure", 0.2),
        ("Mechanics", 0.1),
    ];
    let levels = ["Emerging", "Developing", "Proficient", "Exemplary"];

    RubricDraft {
        name: "Argumentative essay".to_string(),
        description: Some("Grade 10 persuasive writing".to_string()),
        max_score: Some(100.0),
        criteria: criteria
            .into_iter()
            .map(|(name, weight)| CriterionDraft {
                name: name.to_string(),
                description: None,
                weight,
            })
            .collect(),
        levels: levels
            .into_iter()
            .map(|name| LevelDraft {
                name: name.to_string(),
                description: None,
                score_value: None,
                color: None,
            })
            .collect(),
        cells: Vec::new(),
    }
}

pub(super) fn essay_rubric() -> Rubric {
    RubricAssembler::default()
        .assemble(RubricId::new("essay"), essay_draft())
        .expect("essay rubric assembles")
}

/// Select the level at `levels[i]` (zero-based) for criterion `i`.
pub(super) fn submission(rubric: &Rubric, levels: &[usize]) -> AssessmentSubmission {
    AssessmentSubmission {
        student_id: StudentId::new("student-7"),
        activity_id: ActivityId::new("essay-1"),
        selections: rubric
            .criteria
            .iter()
            .zip(levels)
            .map(|(criterion, level)| CriterionSelection {
                criterion_id: criterion.id.clone(),
                level_id: rubric.levels[*level].id.clone(),
                feedback: None,
            })
            .collect(),
        assessed_on: None,
        feedback: None,
    }
}
