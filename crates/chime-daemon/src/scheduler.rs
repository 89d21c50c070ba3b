//! The hourly loop.
//!
//! ```text
//!   Waiting-For-Active-Window ──(window reopens)──► Counting-To-Next-Hour
//!            ▲                                              │
//!            └──────(next boundary outside window)──────────┘
//! ```
//!
//! Each iteration looks at the next top of the hour. Inside the active window
//! a file is picked for `(hour + offset) mod 24`, the loop sleeps until the
//! boundary, plays it, and records it as used. Outside the window the loop
//! sleeps until one hour before the window opens, so the following iteration
//! lands on the opening boundary.

use chime_core::rotation::Rotation;
use chime_core::window::ActiveHours;
use chrono::{NaiveDateTime, TimeDelta, Timelike};
use rand::Rng;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::clock::{format_remaining, Clock};
use crate::player::Player;

/// What the next iteration should do, decided from the current time alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Next boundary is outside the window; sleep until `until`.
    Wait { until: NaiveDateTime },
    /// Play a file for `notification_hour` at the boundary `at`.
    Chime {
        at: NaiveDateTime,
        notification_hour: u8,
    },
}

/// Result of one [`Scheduler::tick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    Waited { until: NaiveDateTime },
    Played { at: NaiveDateTime, file: PathBuf },
    /// No file exists for the notification hour; the boundary passed silently.
    Skipped {
        at: NaiveDateTime,
        notification_hour: u8,
    },
}

/// File hour looked up for wall-clock `hour` under `offset`.
pub fn notification_hour(hour: u32, offset: i32) -> u8 {
    // rem_euclid keeps the result in 0..24 for negative offsets
    (i64::from(hour) + i64::from(offset)).rem_euclid(24) as u8
}

fn top_of_hour(now: NaiveDateTime) -> NaiveDateTime {
    now.date().and_hms_opt(now.hour(), 0, 0).unwrap_or(now)
}

pub fn plan(now: NaiveDateTime, active: &ActiveHours, offset: i32) -> Step {
    let future = top_of_hour(now) + TimeDelta::hours(1);
    if active.contains(future.hour()) {
        return Step::Chime {
            at: future,
            notification_hour: notification_hour(future.hour(), offset),
        };
    }

    let opening = now
        .date()
        .and_hms_opt(u32::from(active.start()), 0, 0)
        .unwrap_or(now);
    let mut until = opening - TimeDelta::hours(1);
    if until <= now {
        until += TimeDelta::days(1);
    }
    Step::Wait { until }
}

/// Owns everything the loop mutates: rotation state, player, clock and RNG.
pub struct Scheduler<C, P, R> {
    clock: C,
    player: P,
    rng: R,
    rotation: Rotation,
    active: ActiveHours,
    offset: i32,
}

impl<C, P, R> Scheduler<C, P, R>
where
    C: Clock,
    P: Player,
    R: Rng,
{
    pub fn new(
        clock: C,
        player: P,
        rng: R,
        rotation: Rotation,
        active: ActiveHours,
        offset: i32,
    ) -> Self {
        Self {
            clock,
            player,
            rng,
            rotation,
            active,
            offset,
        }
    }

    /// Run forever. The process is stopped from outside.
    pub async fn run(mut self) {
        loop {
            self.tick().await;
        }
    }

    pub async fn tick(&mut self) -> Tick {
        let now = self.clock.now();
        match plan(now, &self.active, self.offset) {
            Step::Wait { until } => {
                info!("The active time is over.");
                self.pause_until(until).await;
                Tick::Waited { until }
            }
            Step::Chime {
                at,
                notification_hour,
            } => {
                let picked = self
                    .rotation
                    .pick(notification_hour, &mut self.rng)
                    .map(|file| file.path().to_path_buf());
                let file = match picked {
                    Ok(file) => file,
                    Err(e) => {
                        warn!("{}, skipping the {} chime", e, at.format("%H:%M"));
                        self.pause_until(at).await;
                        return Tick::Skipped {
                            at,
                            notification_hour,
                        };
                    }
                };
                info!("Next playing: '{}'", file.display());
                self.pause_until(at).await;

                let started = self.clock.now();
                info!(
                    "Playing '{}' at {}",
                    file.display(),
                    started.format("%H:%M:%S%.6f")
                );
                self.player.play(&file).await;
                // recorded even when the player failed
                self.rotation.mark_used(notification_hour, &file);
                Tick::Played { at, file }
            }
        }
    }

    async fn pause_until(&mut self, target: NaiveDateTime) {
        let left = target - self.clock.now();
        info!("Paused until {} ({} left).", target, format_remaining(left));
        self.clock.sleep_until(target).await;
    }
}
