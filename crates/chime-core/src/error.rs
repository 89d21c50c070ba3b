use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChimeError>;

#[derive(Debug, Error)]
pub enum ChimeError {
    #[error("exactly two values are required as active hours, got {got}")]
    NotEnoughBoundaries { got: usize },

    #[error("not an hour: '{value}'")]
    InvalidHour { value: String },

    #[error("no input directory given (use --input or set notifications.input_dir)")]
    MissingInput,

    #[error("no player binary given and ffplay was not found on PATH")]
    MissingPlayer,

    #[error("failed to scan {path:?}")]
    Scan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("no notification files for hour {hour:02}")]
    NoCandidates { hour: u8 },

    #[error("failed to read config {path:?}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path:?}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
