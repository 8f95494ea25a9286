use crate::error::{ProcessingError, Result};
use crate::utils::constants::{CLIMATE_VARIABLES, YEAR_COLUMN};
use csv::ReaderBuilder;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct VariableStats {
    pub name: String,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeatureStatistics {
    pub total_rows: usize,
    pub total_columns: usize,
    pub year_range: Option<(i32, i32)>,
    pub variables: Vec<VariableStats>,
    /// First rows of the file, header first
    pub sample: Vec<Vec<String>>,
}

impl FeatureStatistics {
    pub fn detailed_summary(&self) -> String {
        let mut summary = String::from("Feature File Summary\n====================\n");
        summary.push_str(&format!("Rows: {}\n", self.total_rows));
        summary.push_str(&format!("Columns: {}\n", self.total_columns));

        match self.year_range {
            Some((first, last)) => summary.push_str(&format!("Years: {} to {}\n", first, last)),
            None => summary.push_str("Years: n/a\n"),
        }

        if !self.variables.is_empty() {
            summary.push_str("\nClimate Variables:\n");
            for var in &self.variables {
                summary.push_str(&format!(
                    "  {:<5} min={:>8.2}  mean={:>8.2}  max={:>8.2}\n",
                    var.name, var.min, var.mean, var.max
                ));
            }
        }

        summary
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Default)]
struct RunningStats {
    min: f64,
    max: f64,
    sum: f64,
    count: usize,
}

impl RunningStats {
    fn push(&mut self, value: f64) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.sum += value;
        self.count += 1;
    }
}

pub struct FeatureAnalyzer {
    sample_size: usize,
}

impl FeatureAnalyzer {
    pub fn new() -> Self {
        Self { sample_size: 0 }
    }

    pub fn with_sample_size(sample_size: usize) -> Self {
        Self { sample_size }
    }

    /// Summarize a feature CSV written by the batch processor
    pub fn analyze(&self, path: &Path) -> Result<FeatureStatistics> {
        let mut reader = ReaderBuilder::new().from_path(path)?;
        let headers = reader.headers()?.clone();

        let year_index = headers.iter().position(|h| h == YEAR_COLUMN);
        let variable_indices: Vec<(&str, usize)> = CLIMATE_VARIABLES
            .iter()
            .filter_map(|name| headers.iter().position(|h| h == *name).map(|i| (*name, i)))
            .collect();

        let mut stats: Vec<RunningStats> = variable_indices
            .iter()
            .map(|_| RunningStats::default())
            .collect();
        let mut years = RunningStats::default();
        let mut sample = vec![headers.iter().map(String::from).collect::<Vec<_>>()];
        let mut total_rows = 0;

        for record in reader.records() {
            let record = record?;
            total_rows += 1;

            if sample.len() <= self.sample_size {
                sample.push(record.iter().map(String::from).collect());
            }

            if let Some(i) = year_index {
                years.push(parse_cell(&record, i, YEAR_COLUMN, total_rows)?);
            }

            for ((name, index), stat) in variable_indices.iter().zip(stats.iter_mut()) {
                stat.push(parse_cell(&record, *index, name, total_rows)?);
            }
        }

        let variables = variable_indices
            .iter()
            .zip(stats)
            .filter(|(_, s)| s.count > 0)
            .map(|((name, _), s)| VariableStats {
                name: name.to_string(),
                min: s.min,
                max: s.max,
                mean: s.sum / s.count as f64,
            })
            .collect();

        let year_range = (years.count > 0).then(|| (years.min as i32, years.max as i32));

        Ok(FeatureStatistics {
            total_rows,
            total_columns: headers.len(),
            year_range,
            variables,
            sample: if self.sample_size > 0 { sample } else { Vec::new() },
        })
    }
}

impl Default for FeatureAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_cell(record: &csv::StringRecord, index: usize, column: &str, row: usize) -> Result<f64> {
    let raw = record.get(index).unwrap_or("");
    raw.trim()
        .parse::<f64>()
        .map_err(|_| ProcessingError::InvalidValue {
            column: column.to_string(),
            row,
            value: raw.to_string(),
        })
}
