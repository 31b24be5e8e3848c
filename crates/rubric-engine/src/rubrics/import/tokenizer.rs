use crate::rubrics::domain::TableFormat;

pub(crate) fn split_row(format: TableFormat, line: &str) -> Vec<String> {
    match format {
        TableFormat::Markdown => markdown_cells(line),
        TableFormat::Csv => csv_cells(line),
    }
}

/// Strip one outer pipe on each side, then split on every remaining pipe.
pub(crate) fn markdown_cells(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let trimmed = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('|').unwrap_or(trimmed);
    trimmed
        .split('|')
        .map(|cell| cell.trim().to_string())
        .collect()
}

/// Quote-toggling CSV split. A `"` flips the quoted state and is never kept;
/// doubled quotes are not an escape.
pub(crate) fn csv_cells(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => cells.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    cells.push(current);

    cells
        .into_iter()
        .map(|cell| cell.trim().to_string())
        .collect()
}
