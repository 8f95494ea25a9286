use clap::Parser;
use noaa_feature_builder::cli::{run, Cli};
use noaa_feature_builder::error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
