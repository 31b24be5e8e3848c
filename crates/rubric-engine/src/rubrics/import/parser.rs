use serde::{Deserialize, Serialize};
use tracing::debug;

use super::normalizer::{clean_line, is_separator_row};
use super::tokenizer::split_row;
use crate::rubrics::domain::{ParsedCell, ParsedCriterion, ParsedLevel, ParsedTable, TableFormat};

/// Malformed-table failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("insufficient rows")]
    InsufficientRows,
    #[error("no levels")]
    NoLevels,
    #[error("no criteria")]
    NoCriteria,
    #[error("row on line {line} has {cells} cell(s); at least 2 are required")]
    ShortRow { line: usize, cells: usize },
}

/// What the parser does with data rows holding fewer than two cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortRowPolicy {
    #[default]
    Drop,
    Reject,
}

struct SourceLine {
    number: usize,
    text: String,
}

pub(crate) fn parse_table(
    format: TableFormat,
    raw: &str,
    on_short_row: ShortRowPolicy,
) -> Result<ParsedTable, ParseError> {
    let lines = usable_lines(format, raw);
    let Some((header, rows)) = lines.split_first().filter(|_| lines.len() >= 2) else {
        return Err(ParseError::InsufficientRows);
    };

    let levels: Vec<ParsedLevel> = split_row(format, &header.text)
        .into_iter()
        .skip(1)
        .enumerate()
        .map(|(order, name)| ParsedLevel {
            name,
            order,
            score_value: (order + 1) as f64,
        })
        .collect();
    if levels.is_empty() {
        return Err(ParseError::NoLevels);
    }

    let mut criteria = Vec::with_capacity(rows.len());
    let mut cells = Vec::with_capacity(rows.len() * levels.len());

    for row in rows {
        let mut tokens = split_row(format, &row.text).into_iter();
        if tokens.len() < 2 {
            match on_short_row {
                ShortRowPolicy::Drop => {
                    debug!(line = row.number, cells = tokens.len(), "dropping short rubric row");
                    continue;
                }
                ShortRowPolicy::Reject => {
                    return Err(ParseError::ShortRow {
                        line: row.number,
                        cells: tokens.len(),
                    });
                }
            }
        }

        let order = criteria.len();
        let name = tokens.next().unwrap_or_default();
        cells.extend(
            tokens
                .take(levels.len())
                .enumerate()
                .map(|(level, content)| ParsedCell {
                    criterion: order,
                    level,
                    content,
                }),
        );
        criteria.push(ParsedCriterion {
            name,
            order,
            weight: 0.0,
        });
    }

    if criteria.is_empty() {
        return Err(ParseError::NoCriteria);
    }

    let uniform = 1.0 / criteria.len() as f64;
    for criterion in &mut criteria {
        criterion.weight = uniform;
    }

    Ok(ParsedTable {
        criteria,
        levels,
        cells,
    })
}

fn usable_lines(format: TableFormat, raw: &str) -> Vec<SourceLine> {
    raw.lines()
        .enumerate()
        .map(|(index, line)| SourceLine {
            number: index + 1,
            text: clean_line(line),
        })
        .filter(|line| !line.text.trim().is_empty())
        .filter(|line| format != TableFormat::Markdown || !is_separator_row(&line.text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ESSAY: &str = "\
| Criteria | Beginning | Proficient |
|----------|:---------:|-----------:|
| Thesis | Unclear claim | Arguable claim |
| Evidence | Few sources | Varied sources |
| Style | Frequent errors | Polished prose |
";

    #[test]
    fn markdown_grid_round_trip() {
        let table = parse_table(TableFormat::Markdown, ESSAY, ShortRowPolicy::Drop)
            .expect("well-formed table");

        assert_eq!(table.criteria.len(), 3);
        assert!(table
            .criteria
            .iter()
            .all(|criterion| (criterion.weight - 1.0 / 3.0).abs() < 1e-12));
        assert_eq!(
            table.criteria.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            vec!["Thesis", "Evidence", "Style"]
        );

        assert_eq!(table.levels.len(), 2);
        assert_eq!(table.levels[0].name, "Beginning");
        assert_eq!(table.levels[0].score_value, 1.0);
        assert_eq!(table.levels[1].score_value, 2.0);

        assert_eq!(table.cells.len(), 6);
        assert_eq!(
            table.cells[3],
            ParsedCell {
                criterion: 1,
                level: 1,
                content: "Varied sources".to_string(),
            }
        );
    }

    #[test]
    fn header_only_is_insufficient() {
        let error = parse_table(
            TableFormat::Markdown,
            "| Criteria | A | B |\n|---|---|---|\n",
            ShortRowPolicy::Drop,
        )
        .expect_err("no data rows");
        assert_eq!(error, ParseError::InsufficientRows);
        assert_eq!(error.to_string(), "insufficient rows");
    }

    #[test]
    fn header_without_level_columns_has_no_levels() {
        let error = parse_table(TableFormat::Csv, "Criteria\nThesis,x\n", ShortRowPolicy::Drop)
            .expect_err("no levels");
        assert_eq!(error, ParseError::NoLevels);
    }

    #[test]
    fn short_rows_are_dropped_without_gaps_in_order() {
        let raw = "Criteria,Low,High\nThesis,a,b\nstray\nStyle,c,d\n";
        let table = parse_table(TableFormat::Csv, raw, ShortRowPolicy::Drop).expect("lenient");

        assert_eq!(table.criteria.len(), 2);
        assert_eq!(table.criteria[1].name, "Style");
        assert_eq!(table.criteria[1].order, 1);
        assert!(table.cells.iter().all(|cell| cell.criterion < 2));
        assert_eq!(table.criteria[0].weight, 0.5);
    }

    #[test]
    fn short_rows_fail_under_reject_policy() {
        let raw = "Criteria,Low,High\nThesis,a,b\n\nstray\n";
        let error = parse_table(TableFormat::Csv, raw, ShortRowPolicy::Reject)
            .expect_err("strict mode");
        assert_eq!(error, ParseError::ShortRow { line: 4, cells: 1 });
    }

    #[test]
    fn only_short_rows_means_no_criteria() {
        let error = parse_table(TableFormat::Csv, "Criteria,Low\nstray\n", ShortRowPolicy::Drop)
            .expect_err("nothing usable");
        assert_eq!(error, ParseError::NoCriteria);
    }

    #[test]
    fn excess_cells_are_discarded_and_missing_cells_left_out() {
        let raw = "Criteria,Low,High\nThesis,a,b,c,d\nStyle,e\n";
        let table = parse_table(TableFormat::Csv, raw, ShortRowPolicy::Drop).expect("parse");

        let positions: Vec<(usize, usize)> = table
            .cells
            .iter()
            .map(|cell| (cell.criterion, cell.level))
            .collect();
        assert_eq!(positions, vec![(0, 0), (0, 1), (1, 0)]);
    }

    #[test]
    fn csv_does_not_skip_dash_rows() {
        let raw = "Criteria,Low\n---,-\n";
        let table = parse_table(TableFormat::Csv, raw, ShortRowPolicy::Drop).expect("parse");
        assert_eq!(table.criteria[0].name, "---");
    }

    #[test]
    fn windows_line_endings_and_bom() {
        let raw = "\u{feff}Criteria,Low,High\r\nThesis,a,b\r\n";
        let table = parse_table(TableFormat::Csv, raw, ShortRowPolicy::Drop).expect("parse");
        assert_eq!(table.levels[0].name, "Low");
        assert_eq!(table.cells[1].content, "b");
    }
}
