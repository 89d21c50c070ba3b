//! External player invocation.
//!
//! The scheduler only needs "play this file and return when done"; whether the
//! player actually produced sound is never reported back.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use tracing::debug;

#[allow(async_fn_in_trait)]
pub trait Player {
    /// Play `file` to completion. Never fails.
    async fn play(&mut self, file: &Path);
}

/// Runs `ffplay -nodisp -autoexit <file>` and waits for it to exit.
#[derive(Debug, Clone)]
pub struct FfplayPlayer {
    binary: PathBuf,
}

impl FfplayPlayer {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn command(&self, file: &Path) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&self.binary);
        cmd.arg("-nodisp")
            .arg("-autoexit")
            .arg(file)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }
}

impl Player for FfplayPlayer {
    async fn play(&mut self, file: &Path) {
        match self.command(file).status().await {
            Ok(status) if status.success() => {}
            Ok(status) => debug!("player: {} exited with {}", self.binary.display(), status),
            Err(e) => debug!("player: failed to run {}: {}", self.binary.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn test_ffplay_flags() {
        let player = FfplayPlayer::new("/opt/ffmpeg/ffplay");
        let cmd = player.command(Path::new("/chimes/a-07.ogg"));
        let std_cmd = cmd.as_std();
        assert_eq!(std_cmd.get_program(), OsStr::new("/opt/ffmpeg/ffplay"));
        let args: Vec<&OsStr> = std_cmd.get_args().collect();
        assert_eq!(
            args,
            vec![
                OsStr::new("-nodisp"),
                OsStr::new("-autoexit"),
                OsStr::new("/chimes/a-07.ogg"),
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_binary_is_absorbed() {
        let mut player = FfplayPlayer::new("/nonexistent/bin/ffplay");
        player.play(Path::new("/chimes/a-07.ogg")).await;
    }
}
