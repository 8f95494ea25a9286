use crate::error::{ProcessingError, Result};

/// A named column of optional values. `None` marks a missing value.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureColumn {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl FeatureColumn {
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }
}

/// Column-major feature table. Every column has the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureTable {
    columns: Vec<FeatureColumn>,
    row_count: usize,
}

impl FeatureTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table whose row count is fixed up front
    pub fn with_row_count(row_count: usize) -> Self {
        Self {
            columns: Vec::new(),
            row_count,
        }
    }

    pub fn push_column(&mut self, column: FeatureColumn) -> Result<()> {
        if self.columns.is_empty() && self.row_count == 0 {
            self.row_count = column.values.len();
        }

        if column.values.len() != self.row_count {
            return Err(ProcessingError::InvalidFormat(format!(
                "Column '{}' has {} rows, table has {}",
                column.name,
                column.values.len(),
                self.row_count
            )));
        }

        if self.column(&column.name).is_some() {
            return Err(ProcessingError::InvalidFormat(format!(
                "Duplicate column '{}'",
                column.name
            )));
        }

        self.columns.push(column);
        Ok(())
    }

    pub fn column(&self, name: &str) -> Option<&FeatureColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn columns(&self) -> &[FeatureColumn] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn rows(&self) -> impl Iterator<Item = Vec<Option<f64>>> + '_ {
        (0..self.row_count).map(move |i| self.columns.iter().map(|c| c.values[i]).collect())
    }

    /// Remove every row that holds a missing value in any column
    pub fn drop_incomplete_rows(&mut self) {
        let keep: Vec<bool> = (0..self.row_count)
            .map(|i| self.columns.iter().all(|c| c.values[i].is_some()))
            .collect();

        for column in &mut self.columns {
            let mut flags = keep.iter();
            column.values.retain(|_| *flags.next().unwrap_or(&false));
        }

        self.row_count = keep.iter().filter(|k| **k).count();
    }

    pub fn has_missing_values(&self) -> bool {
        self.columns.iter().any(|c| c.missing_count() > 0)
    }
}
