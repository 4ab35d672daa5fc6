//! "HH:MM" time of day <-> minute offset conversion

use crate::error::{AppError, AppResult};

/// Minutes in a calendar day
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Parse an "HH:MM" time of day (00-23 : 00-59) into minutes since midnight.
///
/// Both components must be exactly two ASCII digits.
pub fn time_to_minutes(hhmm: &str) -> AppResult<u32> {
    let invalid = || AppError::InvalidTimeFormat(format!("Invalid time '{}' (use HH:MM)", hhmm));

    let (hours, minutes) = hhmm.split_once(':').ok_or_else(invalid)?;
    if hours.len() != 2 || minutes.len() != 2 {
        return Err(invalid());
    }
    if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }

    Ok(hours * 60 + minutes)
}

/// Format minutes since midnight as zero-padded "HH:MM"
pub fn minutes_to_time(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Serde adapter storing minute offsets as "HH:MM" strings
pub mod hhmm {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(minutes: &u32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::minutes_to_time(*minutes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::time_to_minutes(&raw).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_to_minutes() {
        assert_eq!(time_to_minutes("00:00").unwrap(), 0);
        assert_eq!(time_to_minutes("08:30").unwrap(), 510);
        assert_eq!(time_to_minutes("23:59").unwrap(), 1439);
    }

    #[test]
    fn test_time_to_minutes_rejects_malformed() {
        for raw in ["24:00", "12:60", "8:30", "08:3", "0830", "ab:cd", "", "08:30:00", "-1:30", "+8:30"] {
            assert!(
                matches!(time_to_minutes(raw), Err(AppError::InvalidTimeFormat(_))),
                "{} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_minutes_to_time() {
        assert_eq!(minutes_to_time(0), "00:00");
        assert_eq!(minutes_to_time(65), "01:05");
        assert_eq!(minutes_to_time(1439), "23:59");
    }

    #[test]
    fn test_ordering_is_preserved() {
        let times = ["00:00", "00:01", "07:59", "08:00", "12:30", "19:45", "23:59"];
        for pair in times.windows(2) {
            assert!(time_to_minutes(pair[1]).unwrap() > time_to_minutes(pair[0]).unwrap());
        }
    }

    #[test]
    fn test_every_minute_round_trips() {
        for m in 0..MINUTES_PER_DAY {
            assert_eq!(time_to_minutes(&minutes_to_time(m)).unwrap(), m);
        }
    }
}
