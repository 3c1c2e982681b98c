//! In-memory report model: a titled set of named sheets.
//!
//! Sheet names and column order are part of the report contract; the
//! emitter writes them out verbatim.

/// A finished report, ready for the emitter.
#[derive(Debug, Clone)]
pub struct Report {
    pub title: String,
    pub sheets: Vec<Sheet>,
}

/// One tabular sheet.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    #[must_use]
    pub fn new(name: &str, columns: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            columns: columns.iter().map(ToString::to_string).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Appends an entirely blank row, used strictly between driver groups.
    pub fn push_separator(&mut self) {
        self.rows.push(vec![String::new(); self.columns.len()]);
    }

    /// True if the row at `index` is a blank separator.
    #[must_use]
    pub fn is_separator(&self, index: usize) -> bool {
        self.rows
            .get(index)
            .is_some_and(|row| row.iter().all(String::is_empty))
    }
}
