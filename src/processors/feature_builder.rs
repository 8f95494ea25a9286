//! Turns one station's daily observations into a wide feature table.
//!
//! All shifts are positional: "lag 1" is the previous row, not the previous
//! calendar day. Gaps in a station's record are not reconstructed.

use crate::config::FeatureConfig;
use crate::error::Result;
use crate::models::{tenths_celsius_to_fahrenheit, FeatureColumn, FeatureTable, Observation};
use crate::utils::constants::{
    CLIMATE_VARIABLES, DAY_OF_YEAR_COLUMN, MONTH_COLUMN, SEASON_COLUMN, WEEK_OF_YEAR_COLUMN,
    YEAR_COLUMN,
};
use chrono::{Datelike, NaiveDate};
use tracing::debug;

/// Filtered, converted series that lags and windows are computed over
struct StationSeries {
    dates: Vec<NaiveDate>,
    variables: [Vec<Option<f64>>; 4],
}

pub struct FeatureBuilder {
    config: FeatureConfig,
}

impl FeatureBuilder {
    pub fn new() -> Self {
        Self {
            config: FeatureConfig::default(),
        }
    }

    pub fn with_config(config: FeatureConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Build the feature table for one station. Rows with any missing value
    /// are dropped; surviving rows keep their chronological order.
    pub fn build(&self, observations: &[Observation]) -> Result<FeatureTable> {
        let mut table = self.build_unfiltered(observations)?;
        let before = table.row_count();
        table.drop_incomplete_rows();

        debug!(
            "Feature table: {} candidate rows, {} complete",
            before,
            table.row_count()
        );

        Ok(table)
    }

    /// Build every feature column without dropping incomplete rows
    pub fn build_unfiltered(&self, observations: &[Observation]) -> Result<FeatureTable> {
        let series = self.prepare_series(observations);
        let mut table = FeatureTable::with_row_count(series.dates.len());

        for (name, values) in CLIMATE_VARIABLES.iter().zip(series.variables.iter()) {
            table.push_column(FeatureColumn::new(*name, values.clone()))?;
        }

        self.push_calendar_columns(&mut table, &series.dates)?;

        for (name, values) in CLIMATE_VARIABLES.iter().zip(series.variables.iter()) {
            for lag in 1..=self.config.backward_lags {
                table.push_column(FeatureColumn::new(
                    format!("{}_lag_{}", name, lag),
                    shift(values, lag as isize),
                ))?;
            }
            for lead in 1..=self.config.forward_lags {
                table.push_column(FeatureColumn::new(
                    format!("{}_lag_-{}", name, lead),
                    shift(values, -(lead as isize)),
                ))?;
            }
        }

        for (name, values) in CLIMATE_VARIABLES.iter().zip(series.variables.iter()) {
            let shifted = shift(values, self.config.seasonal_offset as isize);
            table.push_column(FeatureColumn::new(
                format!("{}_mean_{}d_window", name, self.config.seasonal_window),
                rolling_mean(&shifted, self.config.seasonal_window),
            ))?;
        }

        Ok(table)
    }

    /// Names of the columns `build` produces, in output order
    pub fn column_names(&self) -> Vec<String> {
        let mut names: Vec<String> = CLIMATE_VARIABLES.iter().map(|v| v.to_string()).collect();
        names.extend(
            [
                YEAR_COLUMN,
                MONTH_COLUMN,
                DAY_OF_YEAR_COLUMN,
                WEEK_OF_YEAR_COLUMN,
                SEASON_COLUMN,
            ]
            .iter()
            .map(|c| c.to_string()),
        );

        for name in CLIMATE_VARIABLES {
            names.extend((1..=self.config.backward_lags).map(|i| format!("{}_lag_{}", name, i)));
            names.extend((1..=self.config.forward_lags).map(|i| format!("{}_lag_-{}", name, i)));
        }
        for name in CLIMATE_VARIABLES {
            names.push(format!(
                "{}_mean_{}d_window",
                name, self.config.seasonal_window
            ));
        }

        names
    }

    /// Convert temperatures and drop rows before the configured year
    fn prepare_series(&self, observations: &[Observation]) -> StationSeries {
        let to_fahrenheit = |v: Option<f64>| v.map(tenths_celsius_to_fahrenheit);

        let mut dates = Vec::with_capacity(observations.len());
        let mut variables: [Vec<Option<f64>>; 4] = Default::default();

        for obs in observations
            .iter()
            .filter(|o| o.date.year() >= self.config.min_year)
        {
            dates.push(obs.date);
            variables[0].push(obs.prcp);
            variables[1].push(to_fahrenheit(obs.tmin));
            variables[2].push(to_fahrenheit(obs.tavg));
            variables[3].push(to_fahrenheit(obs.tmax));
        }

        debug!(
            "Kept {} of {} observations from {} onwards",
            dates.len(),
            observations.len(),
            self.config.min_year
        );

        StationSeries { dates, variables }
    }

    fn push_calendar_columns(&self, table: &mut FeatureTable, dates: &[NaiveDate]) -> Result<()> {
        let calendar = |f: fn(&NaiveDate) -> u32| -> Vec<Option<f64>> {
            dates.iter().map(|d| Some(f64::from(f(d)))).collect()
        };

        table.push_column(FeatureColumn::new(
            YEAR_COLUMN,
            dates.iter().map(|d| Some(f64::from(d.year()))).collect(),
        ))?;
        table.push_column(FeatureColumn::new(MONTH_COLUMN, calendar(|d| d.month())))?;
        table.push_column(FeatureColumn::new(
            DAY_OF_YEAR_COLUMN,
            calendar(|d| d.ordinal()),
        ))?;
        table.push_column(FeatureColumn::new(
            WEEK_OF_YEAR_COLUMN,
            calendar(|d| d.iso_week().week()),
        ))?;
        table.push_column(FeatureColumn::new(
            SEASON_COLUMN,
            calendar(|d| season(d.month())),
        ))?;

        Ok(())
    }
}

impl Default for FeatureBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Season index 1-4: Dec-Feb 1, Mar-May 2, Jun-Aug 3, Sep-Nov 4
pub fn season(month: u32) -> u32 {
    (month % 12 + 3) / 3
}

/// Shift values by `periods` positions. Positive periods pull from earlier
/// rows, negative from later rows; positions with no source are missing.
pub fn shift(values: &[Option<f64>], periods: isize) -> Vec<Option<f64>> {
    let len = values.len() as isize;
    (0..len)
        .map(|i| {
            let source = i - periods;
            if (0..len).contains(&source) {
                values[source as usize]
            } else {
                None
            }
        })
        .collect()
}

/// Trailing mean over `window` positions. A position is missing until a
/// full window is available or when any value in its window is missing.
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            values[i + 1 - window..=i]
                .iter()
                .try_fold(0.0, |sum, v| v.map(|x| sum + x))
                .map(|sum| sum / window as f64)
        })
        .collect()
}
