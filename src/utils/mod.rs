pub mod constants;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use filename::{is_skipped_file, mirrored_output_path};
pub use progress::ProgressReporter;
