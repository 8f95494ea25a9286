use crate::analyzers::FeatureAnalyzer;
use crate::cli::args::{Cli, Commands};
use crate::config::FeatureConfig;
use crate::error::{ProcessingError, Result};
use crate::processors::{list_input_files, BatchProcessor};
use crate::utils::progress::ProgressReporter;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Climate and calendar columns shown by `info`
const SAMPLE_COLUMNS: usize = 9;

/// `--verbose` forces debug; otherwise `RUST_LOG` directives apply, falling
/// back to info when unset or unparsable.
pub fn log_filter(verbose: bool, env_directives: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }

    env_directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

pub fn init_logging(verbose: bool) {
    let env_directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    // A subscriber may already be installed when run from tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, env_directives.as_deref()))
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    match cli.command {
        Commands::Process {
            input_dir,
            output_dir,
            config,
            skip_pattern,
            keep_going,
        } => {
            let mut feature_config = FeatureConfig::load(config.as_deref())?;
            if let Some(pattern) = skip_pattern {
                feature_config = feature_config.with_skip_pattern(&pattern);
            }

            info!("Input directory: {}", input_dir.display());
            info!("Output directory: {}", output_dir.display());
            info!(
                "Lags: {} backward, {} forward; seasonal window {} rows, {} rows back; from {}",
                feature_config.backward_lags,
                feature_config.forward_lags,
                feature_config.seasonal_window,
                feature_config.seasonal_offset,
                feature_config.min_year
            );

            let file_count = list_input_files(&input_dir)?.len() as u64;
            let progress = ProgressReporter::new(file_count, "Building features...", cli.quiet);

            let processor = BatchProcessor::new(feature_config).with_keep_going(keep_going);
            let report = processor.process_directory(&input_dir, &output_dir, Some(&progress))?;

            progress.println(&report.summary());

            if !report.is_success() {
                return Err(ProcessingError::InvalidFormat(format!(
                    "{} of {} files failed",
                    report.failed.len(),
                    report.failed.len() + report.processed.len()
                )));
            }
        }

        Commands::ProcessFile {
            input,
            output,
            config,
        } => {
            let feature_config = FeatureConfig::load(config.as_deref())?;
            let processor = BatchProcessor::new(feature_config);
            let outcome = processor.process_file(&input, &output)?;

            info!(
                "Wrote {} feature rows from {} observations to {}",
                outcome.output_rows,
                outcome.input_rows,
                outcome.output.display()
            );
        }

        Commands::Info { file, sample, json } => {
            let analyzer = FeatureAnalyzer::with_sample_size(sample);
            let stats = analyzer.analyze(&file)?;

            if json {
                println!("{}", stats.to_json()?);
                return Ok(());
            }

            println!("Analyzing feature file: {}", file.display());
            println!("\n{}", stats.detailed_summary());

            if stats.sample.len() > 1 {
                println!(
                    "Sample Records (first {} of {} columns):",
                    SAMPLE_COLUMNS, stats.total_columns
                );
                for row in &stats.sample {
                    let shown: Vec<&str> = row
                        .iter()
                        .take(SAMPLE_COLUMNS)
                        .map(String::as_str)
                        .collect();
                    println!("  {}", shown.join(", "));
                }
            }
        }
    }

    Ok(())
}
