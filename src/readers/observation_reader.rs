use crate::error::{ProcessingError, Result};
use crate::models::Observation;
use crate::utils::constants::{
    DATE_COLUMN, DEFAULT_BUFFER_SIZE, PRCP_COLUMN, TAVG_COLUMN, TMAX_COLUMN, TMIN_COLUMN,
};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y%m%d", "%Y/%m/%d"];

/// Positions of the required columns within a file's header
#[derive(Debug, Clone, Copy)]
struct ColumnIndices {
    date: usize,
    prcp: usize,
    tmin: usize,
    tavg: usize,
    tmax: usize,
}

impl ColumnIndices {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| ProcessingError::MissingColumn {
                    column: name.to_string(),
                })
        };

        Ok(Self {
            date: find(DATE_COLUMN)?,
            prcp: find(PRCP_COLUMN)?,
            tmin: find(TMIN_COLUMN)?,
            tavg: find(TAVG_COLUMN)?,
            tmax: find(TMAX_COLUMN)?,
        })
    }
}

/// Reads one station's daily CSV. Extra columns are ignored.
pub struct ObservationReader;

impl ObservationReader {
    pub fn new() -> Self {
        Self
    }

    /// Read all observations from a file, in file order
    pub fn read_observations(&self, path: &Path) -> Result<Vec<Observation>> {
        let file = File::open(path)?;
        self.read_from(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file))
    }

    /// Read observations from any CSV source
    pub fn read_from<R: Read>(&self, source: R) -> Result<Vec<Observation>> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        let indices = ColumnIndices::from_headers(reader.headers()?)?;
        let mut observations = Vec::new();

        for (index, record_result) in reader.records().enumerate() {
            let record = record_result?;
            // Row numbers count the header as row 1
            let row = index + 2;

            observations.push(self.parse_record(&record, indices, row)?);
        }

        Ok(observations)
    }

    fn parse_record(
        &self,
        record: &StringRecord,
        indices: ColumnIndices,
        row: usize,
    ) -> Result<Observation> {
        let date_str = record.get(indices.date).unwrap_or("");
        let date = parse_date(date_str).ok_or_else(|| ProcessingError::InvalidDate {
            row,
            value: date_str.to_string(),
        })?;

        Ok(Observation::new(
            date,
            parse_value(record, indices.prcp, PRCP_COLUMN, row)?,
            parse_value(record, indices.tmin, TMIN_COLUMN, row)?,
            parse_value(record, indices.tavg, TAVG_COLUMN, row)?,
            parse_value(record, indices.tmax, TMAX_COLUMN, row)?,
        ))
    }
}

impl Default for ObservationReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a date cell. A time component after `T` or a space is ignored.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let date_part = value
        .split(['T', ' '])
        .next()
        .unwrap_or(value)
        .trim();

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(date_part, format).ok())
}

/// Parse a numeric cell. Blank and NaN cells are missing values.
fn parse_value(
    record: &StringRecord,
    index: usize,
    column: &str,
    row: usize,
) -> Result<Option<f64>> {
    let raw = record.get(index).unwrap_or("");

    if raw.is_empty() || raw.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }

    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| ProcessingError::InvalidValue {
            column: column.to_string(),
            row,
            value: raw.to_string(),
        })
}
