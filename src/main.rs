//! Replay driver for the face enrollment capture pipeline.

use anyhow::Result;
use clap::Parser;
use face_enroll::{
    capture::CapturedImage,
    config::{Config, StorageMode, EXAMPLE_CONFIG},
    enrollment::EnrollmentPlan,
    replay::ReplayDetector,
    scheduler::FrameScheduler,
    storage::{DiskSink, HttpSink, StorageSink},
    video::SyntheticSource,
};
use log::info;
use std::path::PathBuf;
use tokio::sync::watch;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Replay file of detection frames (JSONL, one frame per line)
    #[arg(short, long)]
    replay: PathBuf,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<PathBuf>,

    /// Output directory override for disk storage
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Save-image endpoint override for HTTP storage
    #[arg(long)]
    endpoint: Option<String>,

    /// Synthetic video frame width
    #[arg(long, default_value = "720")]
    width: u32,

    /// Synthetic video frame height
    #[arg(long, default_value = "560")]
    height: u32,

    /// Print an example configuration file and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

/// Sink implementation selected by configuration
enum Sink {
    Disk(DiskSink),
    Http(HttpSink),
}

impl StorageSink for Sink {
    async fn submit(&self, image: &CapturedImage) -> face_enroll::Result<()> {
        match self {
            Sink::Disk(sink) => sink.submit(image).await,
            Sink::Http(sink) => sink.submit(image).await,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    info!("Face Enrollment Capture - replay driver");

    // Load configuration if provided
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path.display());
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Failed to load config file: {e}. Using defaults.");
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    if let Some(output) = args.output {
        config.storage.mode = StorageMode::Disk;
        config.storage.output_dir = output;
    }
    if let Some(endpoint) = args.endpoint {
        config.storage.mode = StorageMode::Http;
        config.storage.endpoint = endpoint;
    }
    config.validate()?;

    let plan = EnrollmentPlan::uniform(
        &config.enrollment.directions,
        config.enrollment.captures_per_direction,
    )?;

    let detector = ReplayDetector::from_file(&args.replay)?;
    let video = SyntheticSource::new(args.width, args.height);
    let storage = match config.storage.mode {
        StorageMode::Disk => {
            info!("Storing captures in {}", config.storage.output_dir.display());
            Sink::Disk(DiskSink::new(&config.storage.output_dir)?)
        }
        StorageMode::Http => {
            info!("Submitting captures to {}", config.storage.endpoint);
            Sink::Http(HttpSink::new(config.storage.endpoint.clone()))
        }
    };

    let mut scheduler = FrameScheduler::new(detector, video, storage, &config, plan);

    // Ctrl-C tears the session down between ticks
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(true);
        }
    });

    scheduler.run(shutdown_rx).await?;

    let session = scheduler.session();
    info!(
        "Session finished: {} captures submitted, enrollment {}",
        scheduler.captures_submitted(),
        if session.is_complete() {
            "complete"
        } else {
            "incomplete"
        }
    );

    Ok(())
}
