pub mod batch_processor;
pub mod feature_builder;

pub use batch_processor::{list_input_files, BatchProcessor, BatchReport, FileFailure, FileOutcome};
pub use feature_builder::{rolling_mean, season, shift, FeatureBuilder};
