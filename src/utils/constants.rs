/// Input column names
pub const DATE_COLUMN: &str = "DATE";
pub const PRCP_COLUMN: &str = "PRCP";
pub const TMIN_COLUMN: &str = "TMIN";
pub const TAVG_COLUMN: &str = "TAVG";
pub const TMAX_COLUMN: &str = "TMAX";

/// Climate variables in output order
pub const CLIMATE_VARIABLES: [&str; 4] = [PRCP_COLUMN, TMIN_COLUMN, TAVG_COLUMN, TMAX_COLUMN];

/// Calendar column names
pub const YEAR_COLUMN: &str = "YEAR";
pub const MONTH_COLUMN: &str = "MONTH";
pub const DAY_OF_YEAR_COLUMN: &str = "DAY_OF_YEAR";
pub const WEEK_OF_YEAR_COLUMN: &str = "WEEK_OF_YEAR";
pub const SEASON_COLUMN: &str = "SEASON";

/// Feature defaults
pub const DEFAULT_MIN_YEAR: i32 = 2013;
pub const DEFAULT_BACKWARD_LAGS: usize = 30;
pub const DEFAULT_FORWARD_LAGS: usize = 4;
pub const DEFAULT_SEASONAL_OFFSET: usize = 365;
pub const DEFAULT_SEASONAL_WINDOW: usize = 5;

/// Files whose name contains this are station metadata, not observations
pub const DEFAULT_SKIP_PATTERN: &str = "stations";

/// Directory defaults
pub const DEFAULT_INPUT_DIR: &str = "raw_data/noaa/to_csv";
pub const DEFAULT_OUTPUT_DIR: &str = "processed_data";

/// Processing defaults
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
