//! Typed table assembled from the debug log's data records.
//!
//! The schema is resolved exactly once (from the header record) and every
//! row is validated against it on insertion, so column misalignment cannot
//! survive past the parse.

use crate::errors::TraceError;

/// Ordered column names from the header record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<String>,
}

impl Schema {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Position of a named column, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Column name for error reporting; falls back to the position when the
    /// index is out of range (cannot happen for rows built against this schema).
    pub fn column_name(&self, index: usize) -> String {
        self.columns
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("#{index}"))
    }
}

/// One data record: field values in schema order, plus the elapsed-seconds
/// timestamp recovered from the log-line prefix when it carried one.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub elapsed_seconds: Option<f64>,
    pub values: Vec<f64>,
}

/// Ordered rows sharing one schema. Row order equals the order the records
/// appear in the log, which is their temporal order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    schema: Schema,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    /// Table for a log with zero marker lines: no schema, no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Append a record, enforcing the header's field count.
    ///
    /// `line` is the record's 1-based line number in the source log, used
    /// only for the mismatch diagnostic.
    pub fn push_row(&mut self, row: Row, line: usize) -> Result<(), TraceError> {
        if row.values.len() != self.schema.len() {
            return Err(TraceError::SchemaMismatch {
                line,
                expected: self.schema.len(),
                found: row.values.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// All values of one named column, in row order.
    pub fn column(&self, name: &str) -> Result<Vec<f64>, TraceError> {
        let idx = self
            .schema
            .index_of(name)
            .ok_or_else(|| TraceError::missing_column(name))?;
        Ok(self.rows.iter().map(|r| r.values[idx]).collect())
    }
}
