use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of raw station data. Temperatures are tenths of a degree Celsius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub prcp: Option<f64>,
    pub tmin: Option<f64>,
    pub tavg: Option<f64>,
    pub tmax: Option<f64>,
}

impl Observation {
    pub fn new(
        date: NaiveDate,
        prcp: Option<f64>,
        tmin: Option<f64>,
        tavg: Option<f64>,
        tmax: Option<f64>,
    ) -> Self {
        Self {
            date,
            prcp,
            tmin,
            tavg,
            tmax,
        }
    }

    /// Observation with every variable present
    pub fn complete(date: NaiveDate, prcp: f64, tmin: f64, tavg: f64, tmax: f64) -> Self {
        Self::new(date, Some(prcp), Some(tmin), Some(tavg), Some(tmax))
    }
}

/// Convert tenths of a degree Celsius to degrees Fahrenheit
pub fn tenths_celsius_to_fahrenheit(tenths: f64) -> f64 {
    tenths / 10.0 * (9.0 / 5.0) + 32.0
}
