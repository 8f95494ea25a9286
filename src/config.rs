use crate::error::Result;
use crate::utils::constants::{
    DEFAULT_BACKWARD_LAGS, DEFAULT_FORWARD_LAGS, DEFAULT_MIN_YEAR, DEFAULT_SEASONAL_OFFSET,
    DEFAULT_SEASONAL_WINDOW, DEFAULT_SKIP_PATTERN,
};
use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

/// Parameters of the feature transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct FeatureConfig {
    /// Observations dated before this year are dropped before lagging
    pub min_year: i32,

    #[validate(range(min = 1, max = 365))]
    pub backward_lags: usize,

    #[validate(range(min = 0, max = 31))]
    pub forward_lags: usize,

    /// Rows to shift before the seasonal rolling mean (one year of daily rows)
    #[validate(range(min = 1, max = 3660))]
    pub seasonal_offset: usize,

    #[validate(range(min = 1, max = 366))]
    pub seasonal_window: usize,

    #[validate(length(min = 1))]
    pub skip_pattern: String,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            min_year: DEFAULT_MIN_YEAR,
            backward_lags: DEFAULT_BACKWARD_LAGS,
            forward_lags: DEFAULT_FORWARD_LAGS,
            seasonal_offset: DEFAULT_SEASONAL_OFFSET,
            seasonal_window: DEFAULT_SEASONAL_WINDOW,
            skip_pattern: DEFAULT_SKIP_PATTERN.to_string(),
        }
    }
}

impl FeatureConfig {
    /// Load configuration from a file (any format the config crate knows),
    /// layered over the defaults, then validate it.
    pub fn from_file(path: &Path) -> Result<Self> {
        let loaded: FeatureConfig = Config::builder()
            .add_source(Config::try_from(&FeatureConfig::default())?)
            .add_source(File::from(path))
            .build()?
            .try_deserialize()?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Load from `path` when given, otherwise use the defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn with_skip_pattern(mut self, pattern: &str) -> Self {
        self.skip_pattern = pattern.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_defaults_are_valid() {
        let config = FeatureConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.min_year, 2013);
        assert_eq!(config.seasonal_offset, 365);
    }

    #[test]
    fn test_load_partial_toml() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "min_year = 2015")?;
        writeln!(file, "forward_lags = 2")?;

        let config = FeatureConfig::from_file(file.path())?;

        assert_eq!(config.min_year, 2015);
        assert_eq!(config.forward_lags, 2);
        assert_eq!(config.backward_lags, DEFAULT_BACKWARD_LAGS);
        assert_eq!(config.skip_pattern, DEFAULT_SKIP_PATTERN);
        Ok(())
    }

    #[test]
    fn test_invalid_config_rejected() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "backward_lags = 0")?;

        assert!(FeatureConfig::from_file(file.path()).is_err());
        Ok(())
    }

    #[test]
    fn test_empty_skip_pattern_rejected() {
        let config = FeatureConfig::default().with_skip_pattern("");
        assert!(config.validate().is_err());
    }
}
