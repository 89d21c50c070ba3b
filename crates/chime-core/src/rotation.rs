//! Non-repeating random selection within an hour bucket.
//!
//! Every file of a bucket is played once before any of them repeats. Picking
//! and recording are separate steps: the scheduler records a file only after
//! the player returns.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::error::{ChimeError, Result};
use crate::index::NotificationFile;

#[derive(Debug, Default)]
pub struct Rotation {
    pool: Vec<NotificationFile>,
    used: HashMap<u8, HashSet<PathBuf>>,
}

impl Rotation {
    pub fn new(pool: Vec<NotificationFile>) -> Self {
        Self {
            pool,
            used: HashMap::new(),
        }
    }

    fn bucket(&self, hour: u8) -> impl Iterator<Item = &NotificationFile> {
        self.pool.iter().filter(move |f| f.hour() == hour)
    }

    pub fn bucket_len(&self, hour: u8) -> usize {
        self.bucket(hour).count()
    }

    pub fn used_len(&self, hour: u8) -> usize {
        self.used.get(&hour).map_or(0, HashSet::len)
    }

    /// Choose a not-yet-played file for `hour`.
    ///
    /// Once every file of the bucket has been played the bucket is cleared and
    /// the whole pool for that hour is eligible again.
    pub fn pick<R: Rng + ?Sized>(&mut self, hour: u8, rng: &mut R) -> Result<&NotificationFile> {
        let unused = {
            let used = self.used.get(&hour);
            self.bucket(hour)
                .filter(|f| used.map_or(true, |u| !u.contains(f.path())))
                .count()
        };
        if unused == 0 {
            if let Some(used) = self.used.get_mut(&hour) {
                used.clear();
            }
        }

        let used = self.used.get(&hour);
        let candidates: Vec<&NotificationFile> = self
            .bucket(hour)
            .filter(|f| used.map_or(true, |u| !u.contains(f.path())))
            .collect();
        candidates
            .choose(rng)
            .copied()
            .ok_or(ChimeError::NoCandidates { hour })
    }

    /// Record `path` as played in the bucket for `hour`.
    pub fn mark_used(&mut self, hour: u8, path: &Path) {
        self.used.entry(hour).or_default().insert(path.to_path_buf());
    }

    /// Hours among `hours` that have no notification file at all.
    pub fn missing_hours(&self, hours: impl IntoIterator<Item = u8>) -> Vec<u8> {
        hours
            .into_iter()
            .filter(|&h| self.bucket_len(h) == 0)
            .collect()
    }
}
