use chrono::NaiveDate;
use rubric_engine::error::AppError;
use rubric_engine::rubrics::{CriterionId, CriterionSelection, LevelId, Rubric, TableFormat};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_format(raw: &str) -> Result<TableFormat, String> {
    raw.parse()
}

pub(crate) fn read_rubric(path: &Path) -> Result<Rubric, AppError> {
    let file = std::fs::File::open(path)?;
    Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
}

#[derive(Debug, Deserialize)]
struct SelectionRow {
    criterion: String,
    level: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    feedback: Option<String>,
}

/// Read `criterion,level[,feedback]` rows. Criteria and levels may be named by
/// id or by (case-insensitive) name; anything unresolved is passed through as
/// an id so the engine reports it.
pub(crate) fn parse_selections<R: Read>(
    reader: R,
    rubric: &Rubric,
) -> Result<Vec<CriterionSelection>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut selections = Vec::new();

    for record in csv_reader.deserialize::<SelectionRow>() {
        let row = record?;
        selections.push(CriterionSelection {
            criterion_id: resolve_criterion(rubric, &row.criterion),
            level_id: resolve_level(rubric, &row.level),
            feedback: row.feedback,
        });
    }

    Ok(selections)
}

fn resolve_criterion(rubric: &Rubric, value: &str) -> CriterionId {
    rubric
        .criteria
        .iter()
        .find(|criterion| {
            criterion.id.as_str() == value || criterion.name.eq_ignore_ascii_case(value)
        })
        .map(|criterion| criterion.id.clone())
        .unwrap_or_else(|| CriterionId::new(value))
}

fn resolve_level(rubric: &Rubric, value: &str) -> LevelId {
    rubric
        .levels
        .iter()
        .find(|level| level.id.as_str() == value || level.name.eq_ignore_ascii_case(value))
        .map(|level| level.id.clone())
        .unwrap_or_else(|| LevelId::new(value))
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
