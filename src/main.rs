//! Replay recorded Tuya data points through a device profile.
//!
//! Usage:
//!   air-bridge-replay --profile co2 events.jsonl
//!   air-bridge-replay --profile methane --format json - < events.jsonl

use clap::{Parser, ValueEnum};
use log::{error, info};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::sync::Arc;
use tuya_air_bridge::config::{self, Config};
use tuya_air_bridge::device::{AttributeListener, AttributeReport, Device};
use tuya_air_bridge::input::replay;
use tuya_air_bridge::profiles::ProfileKind;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "air-bridge-replay")]
#[command(about = "Replay Tuya data points and print the resulting attribute reports")]
struct Cli {
    /// Device profile (co2, methane)
    #[arg(long, env = "AIR_PROFILE")]
    profile: Option<String>,

    /// Endpoint events arrive on when they don't name one
    #[arg(long, env = "AIR_ARRIVAL_ENDPOINT")]
    endpoint: Option<u8>,

    /// Stop at the first event that fails to dispatch
    #[arg(long)]
    stop_on_error: bool,

    /// Report output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// JSON lines file of events, or `-` for stdin
    #[arg(default_value = "-")]
    input: PathBuf,
}

/// Prints every attribute report to stdout.
struct ReportPrinter {
    format: OutputFormat,
}

impl AttributeListener for ReportPrinter {
    fn attribute_updated(&self, report: &AttributeReport) {
        match self.format {
            OutputFormat::Text => println!("{}", report),
            OutputFormat::Json => match serde_json::to_string(report) {
                Ok(line) => println!("{}", line),
                Err(e) => error!("Failed to serialize report: {}", e),
            },
        }
    }
}

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn run(cli: Cli) -> tuya_air_bridge::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(profile) = &cli.profile {
        config.replay.profile = ProfileKind::from_name(profile)?;
    }
    if cli.endpoint.is_some() {
        config.replay.arrival_endpoint = cli.endpoint;
    }
    if cli.stop_on_error {
        config.replay.stop_on_error = true;
    }
    config.replay.validate()?;

    info!("Configuration loaded:");
    info!("  Profile: {}", config.replay.profile);
    match config.replay.arrival_endpoint {
        Some(ep) => info!("  Arrival endpoint: {}", ep),
        None => info!("  Arrival endpoint: profile default"),
    }
    info!("  Stop on error: {}", config.replay.stop_on_error);

    let profile = Arc::new(config.replay.profile.build()?);
    let mut device = Device::new(profile).with_listener(Arc::new(ReportPrinter {
        format: cli.format,
    }));

    let summary = if cli.input.as_os_str() == "-" {
        replay(&mut device, io::stdin().lock(), &config.replay)?
    } else {
        info!("Reading events from {}", cli.input.display());
        let file = File::open(&cli.input)?;
        replay(&mut device, BufReader::new(file), &config.replay)?
    };

    if summary.failed > 0 {
        error!("{} event(s) failed to dispatch", summary.failed);
    }
    Ok(())
}

fn main() {
    // RUST_LOG may come from .env
    config::load_dotenv();
    init_logger();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("Replay failed: {}", e);
        std::process::exit(1);
    }
}
