use std::collections::BTreeMap;
use std::fmt;

use super::CriterionSelection;
use crate::rubrics::domain::{CriterionId, Rubric};

/// Selections that do not cover every criterion of the rubric exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IncompleteAssessment {
    pub missing: Vec<CriterionId>,
    pub duplicated: Vec<CriterionId>,
    pub unknown: Vec<CriterionId>,
}

impl IncompleteAssessment {
    fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.duplicated.is_empty() && self.unknown.is_empty()
    }
}

impl fmt::Display for IncompleteAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups = [
            ("missing", &self.missing),
            ("duplicated", &self.duplicated),
            ("unknown", &self.unknown),
        ];
        let details: Vec<String> = groups
            .iter()
            .filter(|(_, ids)| !ids.is_empty())
            .map(|(label, ids)| {
                let ids: Vec<&str> = ids.iter().map(CriterionId::as_str).collect();
                format!("{label} criteria: {}", ids.join(", "))
            })
            .collect();
        write!(f, "incomplete assessment ({})", details.join("; "))
    }
}

impl std::error::Error for IncompleteAssessment {}

/// Every rubric criterion must be selected exactly once, and nothing else.
pub(crate) fn check_completeness(
    rubric: &Rubric,
    selections: &[CriterionSelection],
) -> Result<(), IncompleteAssessment> {
    let mut counts: BTreeMap<&CriterionId, usize> = BTreeMap::new();
    for selection in selections {
        *counts.entry(&selection.criterion_id).or_default() += 1;
    }

    let mut report = IncompleteAssessment::default();
    for criterion in &rubric.criteria {
        match counts.remove(&criterion.id) {
            None => report.missing.push(criterion.id.clone()),
            Some(1) => {}
            Some(_) => report.duplicated.push(criterion.id.clone()),
        }
    }
    report.unknown = counts.into_keys().cloned().collect();

    if report.is_empty() {
        Ok(())
    } else {
        Err(report)
    }
}
