//! Loading state tables from comma-separated text.

use std::fs;
use std::path::Path;

use crate::table::{detect_layout, Layout, Table, TableError};

/// Read a comma-separated state table from disk.
///
/// Fails with `MissingSource` when the path does not exist and `EmptyInput`
/// when the file has zero bytes.
pub fn load_table(path: impl AsRef<Path>) -> Result<Table, TableError> {
    let path = path.as_ref();
    check_source(path)?;

    let text = fs::read_to_string(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = parse_table(&text)?;
    tracing::debug!(path = %path.display(), rows = table.len(), "loaded state table");
    Ok(table)
}

/// Detect the layout of a state table file without parsing its transitions.
pub fn detect_layout_file(path: impl AsRef<Path>) -> Result<Layout, TableError> {
    let table = load_table(path)?;
    detect_layout(&table)
}

/// Split comma-separated text into a grid.
///
/// Carriage returns count as line breaks and blank lines are dropped, so
/// DOS, old Mac and UNIX line endings all produce the same grid. A
/// double-quoted field may span lines; a quote left open at the end of the
/// text is an error.
pub fn parse_table(text: &str) -> Result<Table, TableError> {
    let normalized = text.replace('\r', "\n");
    let mut rows = RowSplitter::default();
    let mut in_quotes = false;
    let mut chars = normalized.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                rows.cell.push('"');
                chars.next();
            }
            '"' => {
                in_quotes = !in_quotes;
                rows.blank = false;
            }
            ',' if !in_quotes => rows.end_cell(),
            '\n' if !in_quotes => rows.end_row(),
            _ => {
                if !c.is_whitespace() {
                    rows.blank = false;
                }
                rows.cell.push(c);
            }
        }
    }
    if in_quotes {
        return Err(TableError::UnterminatedQuote {
            row: rows.rows.len(),
        });
    }
    rows.end_row();
    Ok(Table::new(rows.rows))
}

/// Accumulates cells and rows while [`parse_table`] scans the text.
struct RowSplitter {
    rows: Vec<Vec<String>>,
    row: Vec<String>,
    cell: String,
    /// Nothing but whitespace seen since the last row break.
    blank: bool,
}

impl Default for RowSplitter {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            row: Vec::new(),
            cell: String::new(),
            blank: true,
        }
    }
}

impl RowSplitter {
    fn end_cell(&mut self) {
        self.row.push(std::mem::take(&mut self.cell));
        self.blank = false;
    }

    fn end_row(&mut self) {
        self.row.push(std::mem::take(&mut self.cell));
        let row = std::mem::take(&mut self.row);
        if !std::mem::replace(&mut self.blank, true) {
            self.rows.push(row);
        }
    }
}

fn check_source(path: &Path) -> Result<(), TableError> {
    let metadata = fs::metadata(path).map_err(|_| TableError::MissingSource {
        path: path.to_path_buf(),
    })?;
    if metadata.len() == 0 {
        return Err(TableError::EmptyInput);
    }
    Ok(())
}
