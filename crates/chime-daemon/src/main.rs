mod cli;
mod clock;
mod player;
mod scheduler;

use anyhow::Context;
use chime_core::index;
use chime_core::rotation::Rotation;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use cli::Args;
use clock::SystemClock;
use player::FfplayPlayer;
use scheduler::{notification_hour, Scheduler};

/// Progress goes to stdout; the same events are appended to a log file in
/// the data dir when it can be opened.
fn init_logging() -> Option<PathBuf> {
    let data_dir = chime_core::platform::data_dir();
    let log_path = data_dir.join("hourly-chime.log");
    let log_file = std::fs::create_dir_all(&data_dir)
        .and_then(|_| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
        })
        .map_err(|e| eprintln!("hourly-chime: not logging to {}: {}", log_path.display(), e))
        .ok();

    let logging_to_file = log_file.is_some();
    let file_layer = log_file.map(|file| {
        tracing_subscriber::fmt::layer()
            .with_writer(file)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(file_layer)
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    logging_to_file.then_some(log_path)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(log_path) = init_logging() {
        info!("Log file: {:?}", log_path);
    }

    let config = args.load_config().context("loading configuration")?;
    let settings = args.settings(&config)?;

    info!("Scanning the audio notification files...");
    let files = index::scan(&settings.input_dir)
        .with_context(|| format!("scanning {}", settings.input_dir.display()))?;
    info!("{} items found!", files.len());

    if args.scan_only {
        for file in &files {
            info!("{:02} {:>3} {}", file.hour(), file.extension(), file);
        }
        for (hour, count) in index::group_by_hour(&files) {
            info!("{:02}: {} file(s)", hour, count);
        }
        return Ok(());
    }

    let player_path = args.player(&config)?;
    info!("Player: {}", player_path.display());

    let rotation = Rotation::new(files);
    let lookup_hours = settings
        .active
        .hours()
        .iter()
        .map(|&h| notification_hour(u32::from(h), settings.offset));
    for hour in rotation.missing_hours(lookup_hours) {
        warn!("No notification file for hour {:02}; that chime will be skipped", hour);
    }

    Scheduler::new(
        SystemClock,
        FfplayPlayer::new(player_path),
        StdRng::from_entropy(),
        rotation,
        settings.active,
        settings.offset,
    )
    .run()
    .await;

    Ok(())
}
