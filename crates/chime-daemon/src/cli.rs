use chime_core::config::Config;
use chime_core::window::ActiveHours;
use chime_core::{platform, ChimeError};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "hourly-chime",
    version,
    about = "Finds, randomizes and plays the hourly notification matching your local time.",
    after_help = "ffplay ships with FFmpeg: https://www.ffmpeg.org/download.html"
)]
pub struct Args {
    /// Input directory. Notification names must end with a two-digit hour
    /// before the extension, e.g. 'Iowa-01.ogg' or 'Vault 21.mp3' but not
    /// '2021.mp3' or 'Hour-1.ogg'.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Path to the ffplay binary.
    #[arg(short = 'f', long = "ffplay")]
    pub ffplay: Option<PathBuf>,

    /// Active hour boundaries (default: 7 22, i.e. 7 a.m. till 10 p.m.).
    #[arg(short, long, num_args = 1..)]
    pub active: Option<Vec<String>>,

    /// Hour offset applied to the notification file selection only.
    #[arg(short, long, allow_negative_numbers = true)]
    pub offset: Option<i32>,

    /// Read settings from this file instead of the default config.toml.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Scan the input directory, print what was found per hour and exit.
    #[arg(long)]
    pub scan_only: bool,
}

/// Effective settings after merging the command line over the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub input_dir: PathBuf,
    pub active: ActiveHours,
    pub offset: i32,
}

impl Args {
    pub fn load_config(&self) -> chime_core::Result<Config> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }

    pub fn settings(&self, config: &Config) -> chime_core::Result<Settings> {
        let input_dir = self
            .input
            .clone()
            .or_else(|| config.notifications.input_dir.clone())
            .ok_or(ChimeError::MissingInput)?;
        let active = match &self.active {
            Some(values) => ActiveHours::from_values(values.as_slice())?,
            None => ActiveHours::from_values(config.notifications.active.as_slice())?,
        };
        let offset = self.offset.unwrap_or(config.notifications.offset);
        Ok(Settings {
            input_dir,
            active,
            offset,
        })
    }

    /// Player binary: `--ffplay`, then the config file, then a PATH lookup.
    pub fn player(&self, config: &Config) -> chime_core::Result<PathBuf> {
        self.ffplay
            .clone()
            .or_else(|| config.player.binary.clone())
            .or_else(platform::find_ffplay_binary)
            .ok_or(ChimeError::MissingPlayer)
    }
}
