pub mod feature_analyzer;

pub use feature_analyzer::{FeatureAnalyzer, FeatureStatistics, VariableStats};
