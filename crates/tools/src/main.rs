use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tools::{ClampArgs, cmd_bounds, cmd_clamp, cmd_clusters, load_config};

/// Observation-map utilities: species mean centers and geofenced viewports.
#[derive(Parser, Debug)]
#[command(name = "sightings", version)]
struct Cli {
    /// Map config JSON; Yala defaults when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print per-species group mean centers for a dataset.
    Clusters {
        dataset: PathBuf,
        #[arg(long)]
        cluster_size: Option<usize>,
    },
    /// Clamp a candidate viewport to the geofence.
    Clamp {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        #[arg(long)]
        lat_delta: Option<f64>,
        #[arg(long)]
        lon_delta: Option<f64>,
    },
    /// Print the effective geofence and map settings.
    Bounds,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    let output = match cli.command {
        Command::Clusters {
            dataset,
            cluster_size,
        } => cmd_clusters(&dataset, cluster_size, &config)?,
        Command::Clamp {
            lat,
            lon,
            lat_delta,
            lon_delta,
        } => cmd_clamp(
            ClampArgs {
                latitude: lat,
                longitude: lon,
                latitude_delta: lat_delta,
                longitude_delta: lon_delta,
            },
            &config,
        )?,
        Command::Bounds => cmd_bounds(cli.config.as_ref(), &config)?,
    };

    println!("{output}");
    Ok(())
}
