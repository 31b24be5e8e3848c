//! Render an assembled rubric back into the table formats the importer reads.

use std::collections::HashMap;
use std::io::Write;

use super::domain::{CriterionId, LevelId, Rubric};

const CRITERIA_HEADER: &str = "Criteria";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("rubric has no cell for criterion '{criterion}' at level '{level}'")]
    MissingCell {
        criterion: CriterionId,
        level: LevelId,
    },
    #[error("'{text}' contains '|', which a Markdown table cannot carry")]
    PipeInMarkdown { text: String },
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

fn header(rubric: &Rubric) -> Vec<&str> {
    std::iter::once(CRITERIA_HEADER)
        .chain(rubric.levels.iter().map(|level| level.name.as_str()))
        .collect()
}

/// One row per criterion, cells looked up by id so stored cell order does not matter.
fn rows(rubric: &Rubric) -> Result<Vec<Vec<&str>>, ExportError> {
    let cells: HashMap<(&CriterionId, &LevelId), &str> = rubric
        .cells
        .iter()
        .map(|cell| ((&cell.criterion_id, &cell.level_id), cell.content.as_str()))
        .collect();

    let mut rows = Vec::with_capacity(rubric.criteria.len());
    for criterion in &rubric.criteria {
        let mut row = Vec::with_capacity(rubric.levels.len() + 1);
        row.push(criterion.name.as_str());
        for level in &rubric.levels {
            let content = cells.get(&(&criterion.id, &level.id)).ok_or_else(|| {
                ExportError::MissingCell {
                    criterion: criterion.id.clone(),
                    level: level.id.clone(),
                }
            })?;
            row.push(*content);
        }
        rows.push(row);
    }
    Ok(rows)
}

fn markdown_line(cells: Vec<&str>) -> Result<String, ExportError> {
    let mut fields = Vec::with_capacity(cells.len());
    for cell in cells {
        if cell.contains('|') {
            return Err(ExportError::PipeInMarkdown {
                text: cell.to_string(),
            });
        }
        fields.push(cell.replace(['\r', '\n'], " "));
    }
    Ok(format!("| {} |\n", fields.join(" | ")))
}

/// Pipe table with a `---` divider. Newlines inside cells are flattened to
/// spaces. Text containing `|` is rejected, since the importer would split it
/// into extra columns.
pub fn render_markdown(rubric: &Rubric) -> Result<String, ExportError> {
    let header = header(rubric);
    let divider = vec!["---"; header.len()];

    let mut output = markdown_line(header)?;
    output.push_str(&markdown_line(divider)?);
    for row in rows(rubric)? {
        output.push_str(&markdown_line(row)?);
    }
    Ok(output)
}

/// CSV with one header row and one row per criterion.
///
/// Cells containing `"` are written with doubled quotes, which the importer
/// does not unescape, and quoted line breaks split rows on import, so such
/// content does not survive a round trip.
pub fn write_csv<W: Write>(rubric: &Rubric, writer: W) -> Result<(), ExportError> {
    let rows = rows(rubric)?;
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(header(rubric))?;
    for row in rows {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}
