use crate::config::FeatureConfig;
use crate::error::{ProcessingError, Result};
use crate::processors::FeatureBuilder;
use crate::readers::ObservationReader;
use crate::utils::filename::{is_skipped_file, mirrored_output_path};
use crate::utils::progress::ProgressReporter;
use crate::writers::FeatureCsvWriter;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Result of transforming one station file
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub input_rows: usize,
    pub output_rows: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub input: PathBuf,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub processed: Vec<FileOutcome>,
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<FileFailure>,
}

impl BatchReport {
    pub fn total_output_rows(&self) -> usize {
        self.processed.iter().map(|o| o.output_rows).sum()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Processed {} files ({} feature rows), skipped {}, failed {}",
            self.processed.len(),
            self.total_output_rows(),
            self.skipped.len(),
            self.failed.len()
        );

        for failure in &self.failed {
            summary.push_str(&format!(
                "\n  {}: {}",
                failure.input.display(),
                failure.message
            ));
        }

        summary
    }
}

/// Runs the feature transform over every station file in a directory
pub struct BatchProcessor {
    builder: FeatureBuilder,
    reader: ObservationReader,
    writer: FeatureCsvWriter,
    keep_going: bool,
}

impl BatchProcessor {
    pub fn new(config: FeatureConfig) -> Self {
        Self {
            builder: FeatureBuilder::with_config(config),
            reader: ObservationReader::new(),
            writer: FeatureCsvWriter::new(),
            keep_going: false,
        }
    }

    /// Log and record per-file failures instead of aborting the run
    pub fn with_keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    /// Read, transform and write a single station file
    pub fn process_file(&self, input: &Path, output: &Path) -> Result<FileOutcome> {
        debug!("Reading {}", input.display());
        let observations = self.reader.read_observations(input)?;

        let table = self.builder.build(&observations)?;
        if table.is_empty() {
            warn!(
                "{} produced no complete feature rows",
                input.display()
            );
        }

        self.writer.write_table(&table, output)?;
        debug!(
            "Wrote {} rows x {} columns to {}",
            table.row_count(),
            table.column_count(),
            output.display()
        );

        Ok(FileOutcome {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            input_rows: observations.len(),
            output_rows: table.row_count(),
        })
    }

    /// Process every file in `input_dir`, mirroring names into `output_dir`
    pub fn process_directory(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<BatchReport> {
        let files = list_input_files(input_dir)?;
        std::fs::create_dir_all(output_dir)?;

        info!(
            "Found {} files in {}",
            files.len(),
            input_dir.display()
        );

        let skip_pattern = &self.builder.config().skip_pattern;
        let mut report = BatchReport::default();

        for input in files {
            if let Some(p) = progress {
                p.increment(1);
            }

            if is_skipped_file(&input, skip_pattern) {
                debug!("Skipping {}", input.display());
                report.skipped.push(input);
                continue;
            }

            let output = mirrored_output_path(&input, output_dir).ok_or_else(|| {
                ProcessingError::InvalidFormat(format!(
                    "No file name in path: {}",
                    input.display()
                ))
            })?;

            if let Some(p) = progress {
                p.set_message(&format!("Processing {}", input.display()));
            }

            match self.process_file(&input, &output) {
                Ok(outcome) => {
                    info!(
                        "{} -> {} ({} of {} rows)",
                        input.display(),
                        output.display(),
                        outcome.output_rows,
                        outcome.input_rows
                    );
                    report.processed.push(outcome);
                }
                Err(e) if self.keep_going => {
                    error!("Failed to process {}: {}", input.display(), e);
                    report.failed.push(FileFailure {
                        input,
                        message: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        if let Some(p) = progress {
            p.finish_with_message(&format!("Processed {} files", report.processed.len()));
        }

        Ok(report)
    }
}

impl Default for BatchProcessor {
    fn default() -> Self {
        Self::new(FeatureConfig::default())
    }
}

/// Files directly inside `dir`, symlinks followed, sorted by name
pub fn list_input_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        } else {
            debug!("Ignoring non-file entry {}", path.display());
        }
    }

    files.sort();
    Ok(files)
}
