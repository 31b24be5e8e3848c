use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

identifier!(
    /// Identifier wrapper for a rubric.
    RubricId
);
identifier!(
    /// Identifier of one criterion row, unique within its rubric.
    CriterionId
);
identifier!(
    /// Identifier of one performance level column, unique within its rubric.
    LevelId
);
identifier!(StudentId);
identifier!(ActivityId);

impl CriterionId {
    /// Identity for the criterion at zero-based `order` of `rubric`.
    pub fn positional(rubric: &RubricId, order: usize) -> Self {
        Self(format!("{}-criterion-{}", rubric.0, order + 1))
    }
}

impl LevelId {
    /// Identity for the level at zero-based `order` of `rubric`.
    pub fn positional(rubric: &RubricId, order: usize) -> Self {
        Self(format!("{}-level-{}", rubric.0, order + 1))
    }
}

/// Source format of an imported rubric table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableFormat {
    Markdown,
    Csv,
}

impl TableFormat {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Csv => "csv",
        }
    }

    /// Guess the format from a file extension.
    pub fn detect<P: AsRef<Path>>(path: P) -> Option<Self> {
        let extension = path.as_ref().extension()?.to_str()?;
        match extension.to_ascii_lowercase().as_str() {
            "md" | "markdown" => Some(Self::Markdown),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TableFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "csv" => Ok(Self::Csv),
            other => Err(format!(
                "unknown table format '{other}' (expected markdown or csv)"
            )),
        }
    }
}

/// Criterion row recovered from an imported table, before identities exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedCriterion {
    pub name: String,
    pub order: usize,
    pub weight: f64,
}

/// Level column recovered from an imported table header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedLevel {
    pub name: String,
    pub order: usize,
    pub score_value: f64,
}

/// Cell text addressed by criterion and level position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCell {
    pub criterion: usize,
    pub level: usize,
    pub content: String,
}

/// Unassembled grid produced by the table parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedTable {
    pub criteria: Vec<ParsedCriterion>,
    pub levels: Vec<ParsedLevel>,
    pub cells: Vec<ParsedCell>,
}

impl ParsedTable {
    /// Convert the grid into a creation draft. Colors are left to the palette.
    pub fn into_draft(self, name: impl Into<String>) -> RubricDraft {
        RubricDraft {
            name: name.into(),
            description: None,
            max_score: None,
            criteria: self
                .criteria
                .into_iter()
                .map(|criterion| CriterionDraft {
                    name: criterion.name,
                    description: None,
                    weight: criterion.weight,
                })
                .collect(),
            levels: self
                .levels
                .into_iter()
                .map(|level| LevelDraft {
                    name: level.name,
                    description: None,
                    score_value: Some(level.score_value),
                    color: None,
                })
                .collect(),
            cells: self
                .cells
                .into_iter()
                .map(|cell| CellDraft {
                    criterion: cell.criterion,
                    level: cell.level,
                    content: cell.content,
                })
                .collect(),
        }
    }
}

/// Caller-authored criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub weight: f64,
}

/// Caller-authored level. Missing values fall back to rank and palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub score_value: Option<f64>,
    #[serde(default)]
    pub color: Option<String>,
}

/// Cell text addressed by zero-based criterion and level positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellDraft {
    pub criterion: usize,
    pub level: usize,
    pub content: String,
}

/// Input to rubric creation and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub max_score: Option<f64>,
    pub criteria: Vec<CriterionDraft>,
    pub levels: Vec<LevelDraft>,
    #[serde(default)]
    pub cells: Vec<CellDraft>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: CriterionId,
    pub name: String,
    pub description: Option<String>,
    pub order: usize,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub id: LevelId,
    pub name: String,
    pub description: Option<String>,
    pub order: usize,
    pub score_value: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub criterion_id: CriterionId,
    pub level_id: LevelId,
    pub content: String,
}

/// Fully assembled rubric, ready to hand to a persistence collaborator.
///
/// Cells are stored row-major: every level of criterion 0, then criterion 1,
/// and so on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rubric {
    pub id: RubricId,
    pub name: String,
    pub description: Option<String>,
    pub max_score: f64,
    pub criteria: Vec<Criterion>,
    pub levels: Vec<Level>,
    pub cells: Vec<Cell>,
    pub criteria_count: usize,
    pub levels_count: usize,
}

impl Rubric {
    pub fn criterion(&self, id: &CriterionId) -> Option<&Criterion> {
        self.criteria.iter().find(|criterion| &criterion.id == id)
    }

    pub fn level(&self, id: &LevelId) -> Option<&Level> {
        self.levels.iter().find(|level| &level.id == id)
    }

    pub fn cell(&self, criterion: &CriterionId, level: &LevelId) -> Option<&Cell> {
        let row = self.criterion(criterion)?.order;
        let column = self.level(level)?.order;
        self.cells
            .get(row * self.levels.len() + column)
            .filter(|cell| &cell.criterion_id == criterion && &cell.level_id == level)
    }

    pub fn total_weight(&self) -> f64 {
        self.criteria.iter().map(|criterion| criterion.weight).sum()
    }
}
