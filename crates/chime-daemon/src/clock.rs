use chrono::{Local, NaiveDateTime, TimeDelta};

/// Wall-clock source and sleeper for the scheduler.
#[allow(async_fn_in_trait)]
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    /// Suspend until `target`. A target in the past returns immediately.
    async fn sleep_until(&mut self, target: NaiveDateTime);
}

/// Local time, real sleeps.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    async fn sleep_until(&mut self, target: NaiveDateTime) {
        let left = (target - self.now()).to_std().unwrap_or_default();
        tokio::time::sleep(left).await;
    }
}

/// `H:MM:SS` rendering of a remaining duration; negative durations show as zero.
pub fn format_remaining(delta: TimeDelta) -> String {
    let secs = delta.num_seconds().max(0);
    format!("{}:{:02}:{:02}", secs / 3600, secs / 60 % 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(TimeDelta::seconds(0)), "0:00:00");
        assert_eq!(format_remaining(TimeDelta::seconds(59 * 60 + 5)), "0:59:05");
        assert_eq!(format_remaining(TimeDelta::hours(7)), "7:00:00");
        assert_eq!(format_remaining(TimeDelta::hours(-2)), "0:00:00");
    }

    #[tokio::test]
    async fn test_sleep_until_past_returns_immediately() {
        let mut clock = SystemClock;
        let past = clock.now() - TimeDelta::hours(1);
        tokio::time::timeout(Duration::from_secs(1), clock.sleep_until(past))
            .await
            .expect("sleep into the past should not block");
    }
}
