/// Strip invisible characters that spreadsheet and editor exports prepend.
pub(crate) fn clean_line(value: &str) -> String {
    value.replace(['\u{feff}', '\u{200b}'], "")
}

/// Markdown header/body divider such as `|---|:---:|`.
pub(crate) fn is_separator_row(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':') || c.is_whitespace())
}
