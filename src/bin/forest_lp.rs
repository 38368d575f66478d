use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use log::info;
use std::{fs, path::PathBuf};

use grb_tools::forest::{self, ForestConfig};

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to the json config, defaults are used if omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Where to write the model, the extension selects the format
    #[arg(short, long, default_value = "forest.lp")]
    out: PathBuf,
    /// Overrides the seed of the config
    #[arg(short, long)]
    seed: Option<u64>,
    #[command(flatten)]
    verbosity: Verbosity,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbosity.log_level_filter())
        .init();
    let mut config: ForestConfig = match &args.config {
        Some(path) => {
            let Ok(config) = fs::read_to_string(path)
                .map_err(anyhow::Error::from)
                .and_then(|s| Ok(serde_json::from_str(&s)?))
            else {
                std::process::exit(exitcode::CONFIG);
            };
            config
        }
        None => ForestConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    let model = forest::build_model(&config)?;
    model.write(&args.out.to_string_lossy())?;
    info!("Wrote forest model to {}", args.out.display());
    Ok(())
}
