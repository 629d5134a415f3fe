//! trip-duration CLI: train a duration model from two monthly files, or score
//! a single trip with a saved model.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use trip_duration::dataset::DEFAULT_BASE_URL;
use trip_duration::features::trip_features;
use trip_duration::{DurationPipeline, Period, SourceConfig, Trainer};

#[derive(Parser, Debug)]
#[command(name = "trip-duration", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Train on one month, validate on another and save the pipeline.
    Train(TrainCommand),
    /// Predict the duration of one trip with a saved pipeline.
    Predict(PredictCommand),
}

#[derive(Args, Debug)]
struct TrainCommand {
    /// Training month, `YYYY-MM` or any date inside it.
    #[arg(long)]
    train_date: Period,

    /// Validation month, `YYYY-MM` or any date inside it.
    #[arg(long)]
    val_date: Period,

    /// Where to write the fitted pipeline. Overwritten if it exists.
    #[arg(long)]
    model_out: PathBuf,

    /// Base URL of the monthly parquet files.
    #[arg(long, env = "TRIP_DATA_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Read monthly files from this directory instead of downloading them.
    /// Takes precedence over `--base-url`.
    #[arg(long, env = "TRIP_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Give up on a download after this many seconds. Unbounded by default.
    #[arg(long, env = "TRIP_DATA_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Also write the run summary as JSON to this path.
    #[arg(long)]
    summary_out: Option<PathBuf>,
}

impl TrainCommand {
    fn source_config(&self) -> SourceConfig {
        let mut config = SourceConfig::default().with_base_url(self.base_url.clone());
        if let Some(dir) = &self.data_dir {
            config = config.with_data_dir(dir);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }

    fn run(self) -> Result<()> {
        let trainer = Trainer::new(self.source_config().build());
        let summary = trainer
            .run(self.train_date, self.val_date, &self.model_out)
            .context("training run failed")?;

        if let Some(path) = &self.summary_out {
            let json = serde_json::to_string_pretty(&summary)?;
            std::fs::write(path, json)
                .with_context(|| format!("failed to write summary to {}", path.display()))?;
        }

        println!("{}", summary.rmse);
        Ok(())
    }
}

#[derive(Args, Debug)]
struct PredictCommand {
    /// Pipeline written by `train`.
    #[arg(long)]
    model: PathBuf,

    /// Pickup zone id.
    #[arg(long)]
    pu_location: String,

    /// Dropoff zone id.
    #[arg(long)]
    do_location: String,

    /// Trip distance in miles.
    #[arg(long)]
    trip_distance: f64,
}

impl PredictCommand {
    fn run(self) -> Result<()> {
        let pipeline = DurationPipeline::load_from_file(&self.model)
            .with_context(|| format!("failed to load model from {}", self.model.display()))?;
        let row = trip_features(&self.pu_location, &self.do_location, self.trip_distance);
        let minutes = pipeline.predict_one(&row)?;

        info!(
            pu_location = %self.pu_location,
            do_location = %self.do_location,
            "predicted duration {minutes:.2} min"
        );
        println!("{minutes}");
        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train(cmd) => cmd.run(),
        Commands::Predict(cmd) => cmd.run(),
    }
}
