use std::path::{Path, PathBuf};

/// True when the file name marks a station metadata file rather than
/// daily observations
pub fn is_skipped_file(path: &Path, skip_pattern: &str) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().contains(skip_pattern))
        .unwrap_or(true)
}

/// Output path mirroring the input file name inside `output_dir`
pub fn mirrored_output_path(input: &Path, output_dir: &Path) -> Option<PathBuf> {
    input.file_name().map(|name| output_dir.join(name))
}
