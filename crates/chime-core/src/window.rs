use std::fmt::Display;
use tracing::warn;

use crate::error::{ChimeError, Result};

/// Hours of the day during which notifications are played.
///
/// Built from two inclusive boundaries. When the end lies before the start the
/// window crosses midnight: `(22, 7)` covers 22, 23, 0, ..., 7.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveHours {
    hours: Vec<u8>,
}

impl ActiveHours {
    /// Parse boundary values as given on the command line or in the config file.
    ///
    /// Only the first two values are considered; extras are ignored with a warning.
    pub fn from_values<T: Display>(values: &[T]) -> Result<Self> {
        if values.len() < 2 {
            return Err(ChimeError::NotEnoughBoundaries { got: values.len() });
        }
        if values.len() > 2 {
            warn!("Using only the first two values as active hour boundaries");
        }
        let start = parse_boundary(&values[0])?;
        let end = parse_boundary(&values[1])?;
        Ok(Self::from_boundaries(start, end))
    }

    /// Expand two already-validated boundaries (each in 0..=23).
    pub fn from_boundaries(start: u8, end: u8) -> Self {
        let end = if end < start { end + 24 } else { end };
        let hours = (start..=end)
            .map(|h| if h >= 24 { h - 24 } else { h })
            .collect();
        Self { hours }
    }

    pub fn contains(&self, hour: u32) -> bool {
        self.hours.iter().any(|&h| u32::from(h) == hour)
    }

    /// The opening boundary of the window.
    pub fn start(&self) -> u8 {
        self.hours[0]
    }

    pub fn hours(&self) -> &[u8] {
        &self.hours
    }
}

impl Default for ActiveHours {
    fn default() -> Self {
        Self::from_boundaries(7, 22)
    }
}

fn parse_boundary<T: Display>(value: &T) -> Result<u8> {
    let text = value.to_string();
    let invalid = || ChimeError::InvalidHour {
        value: text.clone(),
    };
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match text.parse::<u8>() {
        Ok(hour) if hour < 24 => Ok(hour),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn logged<T>(f: impl FnOnce() -> T) -> (T, String) {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let out = tracing::subscriber::with_default(subscriber, f);
        let text = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        (out, text)
    }

    #[test]
    fn test_same_day_window() {
        let active = ActiveHours::from_boundaries(7, 22);
        assert_eq!(active.hours(), (7..=22).collect::<Vec<u8>>().as_slice());
        assert_eq!(active.start(), 7);
    }

    #[test]
    fn test_window_crossing_midnight() {
        let active = ActiveHours::from_boundaries(22, 7);
        assert_eq!(active.hours(), &[22, 23, 0, 1, 2, 3, 4, 5, 6, 7]);
        assert!(active.contains(0));
        assert!(!active.contains(12));
        assert_eq!(active.start(), 22);
    }

    #[test]
    fn test_single_hour_window() {
        let active = ActiveHours::from_boundaries(5, 5);
        assert_eq!(active.hours(), &[5]);
    }

    #[test]
    fn test_from_values_strings() {
        let active = ActiveHours::from_values(&["22", "3"]).unwrap();
        assert_eq!(active.hours(), &[22, 23, 0, 1, 2, 3]);
    }

    #[test]
    fn test_from_values_uses_first_two() {
        let (active, log) = logged(|| ActiveHours::from_values(&[8, 10, 23]).unwrap());
        assert_eq!(active.hours(), &[8, 9, 10]);
        assert!(log.contains("WARN"), "{log}");
        assert!(log.contains("Using only the first two values"), "{log}");
    }

    #[test]
    fn test_from_values_two_values_no_warning() {
        let (active, log) = logged(|| ActiveHours::from_values(&[8, 10]).unwrap());
        assert_eq!(active.hours(), &[8, 9, 10]);
        assert!(log.is_empty(), "{log}");
    }

    #[test]
    fn test_from_values_too_few() {
        let err = ActiveHours::from_values(&["7"]).unwrap_err();
        assert!(matches!(err, ChimeError::NotEnoughBoundaries { got: 1 }));
        let none: [&str; 0] = [];
        assert!(ActiveHours::from_values(&none).is_err());
    }

    #[test]
    fn test_from_values_rejects_non_hours() {
        for bad in ["24", "-1", "seven", "", "7.5", "+7"] {
            let err = ActiveHours::from_values(&[bad, "22"]).unwrap_err();
            assert!(
                matches!(err, ChimeError::InvalidHour { ref value } if value == bad),
                "{bad:?} accepted"
            );
        }
    }

    #[test]
    fn test_from_values_rejects_negative_integers() {
        assert!(ActiveHours::from_values(&[-3i64, 5]).is_err());
    }

    #[test]
    fn test_default_window() {
        assert_eq!(ActiveHours::default(), ActiveHours::from_boundaries(7, 22));
    }
}
