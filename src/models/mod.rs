pub mod feature_table;
pub mod observation;

pub use feature_table::{FeatureColumn, FeatureTable};
pub use observation::{tenths_celsius_to_fahrenheit, Observation};
