use std::collections::BTreeSet;

use crate::delimiter::Delimiter;

const CELL_SEPARATOR: &str = " & ";

/// Strip line breaks from a cell. LaTeX special characters are passed through as they are.
pub fn filter_characters(cell: &str) -> String {
    cell.replace(['\n', '\r'], "")
}

/// Number of columns a line splits into
pub fn column_count(delimiter: &Delimiter, line: &str) -> usize {
    delimiter.split(line).len()
}

/// Format a raw input line as the cells of one LaTeX table row, joined by `&`.
///
/// Cells whose index is in `cite_columns` are wrapped in `\cite{}`. Otherwise, if `math_mode` is
/// set, non-empty cells are wrapped in `$...$` with any literal `$` escaped.
pub fn get_line(
    delimiter: &Delimiter,
    line: &str,
    cite_columns: &BTreeSet<usize>,
    math_mode: bool,
) -> String {
    delimiter
        .split(line)
        .iter()
        .map(|cell| filter_characters(cell))
        .enumerate()
        .map(|(i, cell)| {
            if cite_columns.contains(&i) {
                format!("\\cite{{{cell}}}")
            } else if math_mode && !cell.is_empty() {
                format!("${}$", cell.replace('$', "\\$"))
            } else {
                cell
            }
        })
        .collect::<Vec<_>>()
        .join(CELL_SEPARATOR)
}

/// Wrap every field of an already formatted header in a centered `X` multicolumn
pub fn wrap_multiline_header(header: &str) -> String {
    header
        .split(CELL_SEPARATOR)
        .map(|field| format!("\\multicolumn{{1}}{{|X|}}{{\\centering {field}}}"))
        .collect::<Vec<_>>()
        .join(CELL_SEPARATOR)
}
