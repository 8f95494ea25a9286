use crate::error::{ProcessingError, Result};
use crate::models::FeatureTable;
use csv::WriterBuilder;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes feature tables as comma-separated text with a header row
pub struct FeatureCsvWriter;

impl FeatureCsvWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write a table to `path`, replacing any existing file
    pub fn write_table(&self, table: &FeatureTable, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(path)?;
        self.write_to(table, BufWriter::new(file))
    }

    /// Write a table to any sink
    pub fn write_to<W: Write>(&self, table: &FeatureTable, sink: W) -> Result<()> {
        let mut writer = WriterBuilder::new().from_writer(sink);

        writer.write_record(table.column_names())?;

        for (index, row) in table.rows().enumerate() {
            let cells = row
                .iter()
                .map(|value| {
                    value.map(format_value).ok_or_else(|| {
                        ProcessingError::InvalidFormat(format!(
                            "Missing value in row {} of a feature table",
                            index
                        ))
                    })
                })
                .collect::<Result<Vec<String>>>()?;
            writer.write_record(&cells)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Render a table as a CSV string
    pub fn to_csv_string(&self, table: &FeatureTable) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_to(table, &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| ProcessingError::InvalidFormat(format!("Invalid UTF-8: {}", e)))
    }
}

impl Default for FeatureCsvWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a float the way a data-frame export does. Magnitudes below 1e-4
/// or from 1e16 up use exponent form (`1e+16`, `1.5e-07`), integral values
/// keep a trailing `.0`, everything else uses the shortest round-trip form.
pub fn format_value(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        return format!("{:?}", value);
    }

    let magnitude = value.abs();
    if !(1e-4..1e16).contains(&magnitude) {
        return exponent_form(value);
    }

    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Shortest mantissa with a signed, at least two-digit exponent
fn exponent_form(value: f64) -> String {
    let formatted = format!("{:e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FeatureColumn;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample_table() -> FeatureTable {
        let mut table = FeatureTable::new();
        table
            .push_column(FeatureColumn::new("TMIN", vec![Some(50.0), Some(33.8)]))
            .unwrap();
        table
            .push_column(FeatureColumn::new("YEAR", vec![Some(2013.0), Some(2013.0)]))
            .unwrap();
        table
            .push_column(FeatureColumn::new("PRCP_lag_-1", vec![Some(0.25), Some(-3.0)]))
            .unwrap();
        table
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(50.0), "50.0");
        assert_eq!(format_value(2013.0), "2013.0");
        assert_eq!(format_value(-0.5), "-0.5");
        assert_eq!(format_value(33.8), "33.8");
        assert_eq!(format_value(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_value(0.0), "0.0");
        assert_eq!(format_value(0.0001), "0.0001");
    }

    #[test]
    fn test_format_value_exponent_range() {
        assert_eq!(format_value(1e16), "1e+16");
        assert_eq!(format_value(-2.5e20), "-2.5e+20");
        assert_eq!(format_value(1e-7), "1e-07");
        assert_eq!(format_value(1.5e-5), "1.5e-05");
        assert_eq!(format_value(1.25e-100), "1.25e-100");
        assert_eq!(format_value(9999999999999998.0), "9999999999999998.0");
    }

    #[test]
    fn test_csv_layout() -> Result<()> {
        let csv = FeatureCsvWriter::new().to_csv_string(&sample_table())?;

        assert_eq!(
            csv,
            "TMIN,YEAR,PRCP_lag_-1\n50.0,2013.0,0.25\n33.8,2013.0,-3.0\n"
        );
        Ok(())
    }

    #[test]
    fn test_empty_table_writes_header_only() -> Result<()> {
        let mut table = FeatureTable::with_row_count(0);
        table.push_column(FeatureColumn::new("PRCP", vec![]))?;
        table.push_column(FeatureColumn::new("TMIN", vec![]))?;

        let csv = FeatureCsvWriter::new().to_csv_string(&table)?;
        assert_eq!(csv, "PRCP,TMIN\n");
        Ok(())
    }

    #[test]
    fn test_missing_value_is_rejected() {
        let mut table = FeatureTable::new();
        table
            .push_column(FeatureColumn::new("PRCP", vec![Some(1.0), None]))
            .unwrap();

        assert!(FeatureCsvWriter::new().to_csv_string(&table).is_err());
    }

    #[test]
    fn test_write_table_creates_parent_directory() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("nested").join("station.csv");

        FeatureCsvWriter::new().write_table(&sample_table(), &path)?;

        let written = std::fs::read_to_string(&path)?;
        assert!(written.starts_with("TMIN,YEAR,PRCP_lag_-1\n"));
        assert_eq!(written.lines().count(), 3);
        Ok(())
    }
}
