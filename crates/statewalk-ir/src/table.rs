//! Tabular transition descriptions.
//!
//! Two layouts are understood, selected by the top-left cell:
//! - **linear** (`Start State`): one `start, action, end` triple per row.
//! - **matrix** (`Start/End`): destinations across the header row, sources down
//!   the first column, each cell holding zero or more whitespace-separated actions.

use std::path::PathBuf;

use crate::types::TransitionRecord;

const LINEAR_MARKER: &str = "start state";
const MATRIX_MARKER: &str = "start/end";

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("State table source not found: {}", path.display())]
    MissingSource { path: PathBuf },

    #[error("State table is empty")]
    EmptyInput,

    #[error("State table has a header but no transition rows")]
    InsufficientData,

    #[error("Unable to detect table layout from top-left cell '{cell}'")]
    UnknownLayout { cell: String },

    #[error("Row {row} has {found} cells, expected start, action and end")]
    ShortRow { row: usize, found: usize },

    #[error("Row {row} has a blank cell in column {column}")]
    BlankCell { row: usize, column: usize },

    #[error("Row {row} lists actions in column {column}, which has no destination state")]
    UnmatchedColumn { row: usize, column: usize },

    #[error("Quoted field opened in row {row} is never closed")]
    UnterminatedQuote { row: usize },

    #[error("Failed to read state table {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Which of the two tabular layouts a table uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Linear,
    Matrix,
}

/// An already-split grid of string cells. Row 0 is the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Build a table from anything string-like, mostly for hand-written grids.
    pub fn from_rows<R, C>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = C>,
        C: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Detect the layout from the top-left cell.
    pub fn layout(&self) -> Result<Layout, TableError> {
        detect_layout(self)
    }

    /// Detect the layout and parse the rows into raw (possibly duplicated) records.
    pub fn transitions(&self) -> Result<Vec<TransitionRecord>, TableError> {
        match self.layout()? {
            Layout::Linear => parse_linear(self),
            Layout::Matrix => parse_matrix(self),
        }
    }

    /// Rows that carry at least one non-blank cell, with their original index.
    fn populated_rows(&self) -> impl Iterator<Item = (usize, &Vec<String>)> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.iter().any(|cell| !cell.trim().is_empty()))
    }
}

/// Inspect the first cell of the first row, case-insensitively.
///
/// Never guesses: anything other than the two markers is an error.
pub fn detect_layout(table: &Table) -> Result<Layout, TableError> {
    let (_, header) = table
        .populated_rows()
        .next()
        .ok_or(TableError::EmptyInput)?;
    let cell = header.first().map(|c| c.trim()).unwrap_or_default();

    match cell.to_lowercase().as_str() {
        MATRIX_MARKER => Ok(Layout::Matrix),
        LINEAR_MARKER => Ok(Layout::Linear),
        _ => Err(TableError::UnknownLayout {
            cell: cell.to_string(),
        }),
    }
}

/// Parse a linear table: header ignored, then `start, action, end` per row.
pub fn parse_linear(table: &Table) -> Result<Vec<TransitionRecord>, TableError> {
    let mut rows = table.populated_rows();
    if rows.next().is_none() {
        return Err(TableError::EmptyInput);
    }

    let mut transitions = Vec::new();
    for (index, row) in rows {
        if row.len() < 3 {
            return Err(TableError::ShortRow {
                row: index,
                found: row.len(),
            });
        }
        let start = required_cell(row, index, 0)?;
        let action = required_cell(row, index, 1)?;
        let end = required_cell(row, index, 2)?;

        let transition = TransitionRecord::new(start, action, end);
        tracing::trace!(%transition, "read linear transition");
        transitions.push(transition);
    }

    if transitions.is_empty() {
        return Err(TableError::InsufficientData);
    }
    Ok(transitions)
}

/// Parse a matrix table: header lists destinations, each row a source plus
/// one cell per destination column.
pub fn parse_matrix(table: &Table) -> Result<Vec<TransitionRecord>, TableError> {
    let mut rows = table.populated_rows();
    let (header_index, header) = rows.next().ok_or(TableError::EmptyInput)?;
    let destinations: Vec<&str> = header.iter().skip(1).map(|c| c.trim()).collect();

    let mut transitions = Vec::new();
    let mut data_rows = 0usize;
    for (index, row) in rows {
        data_rows += 1;
        let source = required_cell(row, index, 0)?;

        for (offset, cell) in row.iter().skip(1).enumerate() {
            let column = offset + 1;
            let actions: Vec<&str> = cell.split_whitespace().collect();
            if actions.is_empty() {
                continue;
            }
            let destination = match destinations.get(offset) {
                Some(d) if !d.is_empty() => *d,
                Some(_) => {
                    return Err(TableError::BlankCell {
                        row: header_index,
                        column,
                    })
                }
                None => return Err(TableError::UnmatchedColumn { row: index, column }),
            };

            for action in actions {
                let transition = TransitionRecord::new(source, action, destination);
                tracing::trace!(%transition, "read matrix transition");
                transitions.push(transition);
            }
        }
    }

    if data_rows == 0 {
        return Err(TableError::InsufficientData);
    }
    Ok(transitions)
}

fn required_cell(row: &[String], row_index: usize, column: usize) -> Result<&str, TableError> {
    match row.get(column).map(|c| c.trim()) {
        Some(cell) if !cell.is_empty() => Ok(cell),
        _ => Err(TableError::BlankCell {
            row: row_index,
            column,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_is_case_insensitive() {
        let table = Table::from_rows([vec!["START STATE", "Action", "End State"]]);
        assert_eq!(detect_layout(&table).unwrap(), Layout::Linear);

        let table = Table::from_rows([vec!["start/end", "A"]]);
        assert_eq!(detect_layout(&table).unwrap(), Layout::Matrix);
    }

    #[test]
    fn test_blank_rows_are_ignored() {
        let table = Table::from_rows([
            vec!["Start State", "Action", "End State"],
            vec!["", "", ""],
            vec!["A", "go", "B"],
        ]);
        let transitions = parse_linear(&table).unwrap();
        assert_eq!(transitions, vec![TransitionRecord::new("A", "go", "B")]);
    }
}
