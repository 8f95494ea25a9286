use crate::utils::constants::{DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "noaa-feature-builder")]
#[command(about = "Feature engineering for NOAA daily climate station files")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Hide the progress bar")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build feature files for every station CSV in a directory
    Process {
        #[arg(short, long, default_value = DEFAULT_INPUT_DIR)]
        input_dir: PathBuf,

        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        #[arg(short, long, help = "Feature configuration file (TOML, JSON or YAML)")]
        config: Option<PathBuf>,

        #[arg(long, help = "Skip files whose name contains this text [default: stations]")]
        skip_pattern: Option<String>,

        #[arg(long, help = "Report failing files and continue with the rest")]
        keep_going: bool,
    },

    /// Build the feature file for a single station CSV
    ProcessFile {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(short, long, help = "Feature configuration file (TOML, JSON or YAML)")]
        config: Option<PathBuf>,
    },

    /// Display information about a feature CSV
    Info {
        #[arg(short, long)]
        file: PathBuf,

        #[arg(short, long, default_value = "5")]
        sample: usize,

        #[arg(long, help = "Print statistics as JSON")]
        json: bool,
    },
}
