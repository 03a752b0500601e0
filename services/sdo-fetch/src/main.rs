//! SDO/AIA image fetcher.
//!
//! Builds API URLs, fetches single images or time series and prints one JSON
//! summary line per image on stdout. Logs go to stderr.

mod report;

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use sdo_client::{ClientConfig, ImageClient, RequestDescriptor};
use sdo_common::{parse_time, Enumerated, OutputFormat};

use report::ImageSummary;

#[derive(Parser, Debug)]
#[command(name = "sdo-fetch")]
#[command(about = "Fetch SDO/AIA images and image parameters")]
struct Args {
    /// API root URL
    #[arg(long, env = "SDO_API_BASE_URL")]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "SDO_API_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

/// Fields shared by every subcommand.
#[derive(ClapArgs, Debug, Clone)]
struct Target {
    /// Start time, e.g. 2021-01-01T00:00:00
    #[arg(long, value_parser = parse_time)]
    start: NaiveDateTime,

    /// AIA wavelength
    #[arg(long, default_value = "171")]
    wave: String,

    /// Image size: 2k, 512 or 256
    #[arg(long, default_value = "512")]
    size: String,

    /// Image parameter id (1-10); fetches the parameter heat map instead
    #[arg(long)]
    param: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the URL for a request without fetching it
    Url {
        #[command(flatten)]
        target: Target,
    },
    /// Fetch a single image
    Get {
        #[command(flatten)]
        target: Target,

        /// Output format: image or array
        #[arg(long, default_value = "image")]
        output: String,
    },
    /// Fetch a series of images between start and end
    Batch {
        #[command(flatten)]
        target: Target,

        /// End time (exclusive)
        #[arg(long, value_parser = parse_time)]
        end: NaiveDateTime,

        /// Number of intervals the range is split into
        #[arg(long)]
        limit: Option<u32>,

        /// Step in seconds, used when no limit is given
        #[arg(long)]
        step: Option<u32>,

        /// Output format: image or array
        #[arg(long, default_value = "image")]
        output: String,
    },
}

impl Target {
    fn request(&self, output: &str) -> RequestDescriptor {
        let request =
            RequestDescriptor::new(self.start, self.wave.as_str(), self.size.as_str(), output);
        match &self.param {
            Some(param) => request.with_parameter(param.as_str()),
            None => request,
        }
    }
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.json_logs)?;

    let mut config = ClientConfig::from_env();
    if let Some(base_url) = &args.base_url {
        config = config.with_base_url(base_url.as_str());
    }
    if let Some(secs) = args.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let client = ImageClient::new(&config).context("Failed to create image client")?;

    match &args.command {
        Command::Url { target } => {
            println!("{}", client.url(&target.request(OutputFormat::Image.value())));
        }
        Command::Get { target, output } => {
            let request = target.request(output);
            info!(url = %client.url(&request), "Fetching image");
            let image = client.get(&request)?;
            report::print(&ImageSummary::new(&request.start_time, &image))?;
        }
        Command::Batch {
            target,
            end,
            limit,
            step,
            output,
        } => {
            let mut request = target.request(output).with_end_time(*end);
            request.limit = *limit;
            request.step = *step;

            let batch = client.get_batch(&request)?;
            for (key, image) in batch.iter() {
                report::print(&ImageSummary::from_key(key, image))?;
            }
            info!(items = batch.len(), "Done");
        }
    }

    Ok(())
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}
