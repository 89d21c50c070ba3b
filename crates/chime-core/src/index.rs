//! Notification file discovery.
//!
//! A notification is any audio file whose base name ends in exactly two
//! decimal digits forming an hour, e.g. `Iowa-01.ogg` or `Vault 21.mp3`.
//! `2021.mp3` (four digits) and `Hour-1.ogg` (one digit) are not notifications.

use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{ChimeError, Result};

pub const AUDIO_EXTENSIONS: [&str; 3] = ["wav", "mp3", "ogg"];

fn trailing_digits() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9]+$").expect("static regex"))
}

/// An hourly notification found on disk.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NotificationFile {
    path: PathBuf,
    hour: u8,
}

impl NotificationFile {
    /// Returns `None` unless `path` is an audio notification.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        if !has_audio_extension(&path) {
            return None;
        }
        let hour = parse_hour(&path)?;
        Some(Self { path, hour })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Lowercased extension, one of [`AUDIO_EXTENSIONS`].
    pub fn extension(&self) -> String {
        extension_lowercase(&self.path).unwrap_or_default()
    }
}

impl fmt::Display for NotificationFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Hour encoded in the trailing digits of the file's base name (extension
/// stripped). Only a run of exactly two digits in 0..=23 counts.
pub fn parse_hour(path: &Path) -> Option<u8> {
    let stem = path.file_stem()?.to_str()?;
    let digits = trailing_digits().find(stem)?.as_str();
    if digits.len() != 2 {
        return None;
    }
    let hour: u8 = digits.parse().ok()?;
    (hour < 24).then_some(hour)
}

fn extension_lowercase(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

fn has_audio_extension(path: &Path) -> bool {
    extension_lowercase(path)
        .map(|e| AUDIO_EXTENSIONS.contains(&e.as_str()))
        .unwrap_or(false)
}

pub fn is_audio_notification(path: &Path) -> bool {
    has_audio_extension(path) && parse_hour(path).is_some()
}

/// Walk `root` recursively and collect every notification file, sorted by path.
///
/// Symlinked files are followed. An unreadable `root` aborts the scan; unreadable
/// entries below it are logged and skipped.
pub fn scan(root: &Path) -> Result<Vec<NotificationFile>> {
    let mut found = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) if source.depth() == 0 => {
                return Err(ChimeError::Scan {
                    path: root.to_path_buf(),
                    source,
                });
            }
            Err(e) => {
                warn!("skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if !is_file {
            continue;
        }
        match NotificationFile::from_path(entry.path()) {
            Some(file) => found.push(file),
            None => debug!("skipping {}", entry.path().display()),
        }
    }
    found.sort();
    Ok(found)
}

/// Number of notifications per hour. Hours without files are absent.
pub fn group_by_hour(files: &[NotificationFile]) -> BTreeMap<u8, usize> {
    let mut counts = BTreeMap::new();
    for file in files {
        *counts.entry(file.hour).or_insert(0) += 1;
    }
    counts
}
