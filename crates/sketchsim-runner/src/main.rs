//! `sketchsim` command-line entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use sketchsim_metrics::describe_metrics;
use sketchsim_runner::{load_config, ConfigError, FetchSketch, Runner, SimConfig, SimContext};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Run a firmware sketch against the simulated radio and a real HTTP backend.
#[derive(Parser, Debug)]
#[command(name = "sketchsim", author, version, about, long_about = None)]
struct Cli {
    /// YAML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Network to join (overrides the configuration).
    #[arg(long)]
    ssid: Option<String>,

    /// Network secret (overrides the configuration).
    #[arg(long)]
    password: Option<String>,

    /// URL to fetch each loop (overrides the configuration).
    #[arg(long)]
    url: Option<String>,

    /// Stop after this many loop iterations.
    #[arg(short = 'n', long)]
    iterations: Option<u64>,

    /// Pause between loop iterations in milliseconds.
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Seed for jitter, addresses and the MAC.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the network directory and exit.
    #[arg(long, default_value_t = false)]
    list_networks: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn resolve_config(&self) -> Result<SimConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => SimConfig::default(),
        };
        if let Some(ssid) = &self.ssid {
            config.sketch.ssid = ssid.clone();
        }
        if let Some(password) = &self.password {
            config.sketch.password = password.clone();
        }
        if let Some(url) = &self.url {
            config.sketch.url = url.clone();
        }
        if let Some(interval) = self.interval_ms {
            config.sketch.interval_ms = interval;
        }
        if let Some(seed) = self.seed {
            config.radio.rng_seed = Some(seed);
        }
        Ok(config)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "sketchsim={level},sketchsim_runner={level},sketchsim_wifi={level},sketchsim_http={level},reqwest=warn,hyper=warn"
        ))
    });
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    describe_metrics();

    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if cli.list_networks {
        let directory = match config.directory() {
            Ok(directory) => directory,
            Err(e) => {
                error!("{}", e);
                return ExitCode::FAILURE;
            }
        };
        for (i, network) in directory.list().iter().enumerate() {
            println!(
                "{:2}: {:<20} {:>4} dBm  ch {:<3} {}",
                i, network.name, network.rssi, network.channel, network.encryption
            );
        }
        return ExitCode::SUCCESS;
    }

    let mut ctx = match SimContext::from_config(&config) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Failed to build simulation: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let runner = match cli.iterations {
        Some(n) => Runner::new().with_iterations(n),
        None => Runner::new(),
    };
    let mut sketch = FetchSketch::new(config.sketch.clone());
    let summary = runner.run(&mut ctx, &mut sketch);
    info!(
        "Done: {} iterations, {} fetches, last result {:?}",
        summary.iterations,
        sketch.fetches(),
        sketch.last_code()
    );
    ExitCode::SUCCESS
}
