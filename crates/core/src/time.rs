//! Restaurant-local time helpers.
//!
//! The restaurant time zone is configuration, passed explicitly to every
//! date-sensitive rule. Nothing here reads ambient process state.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Parse an IANA time-zone name (e.g. `Europe/Madrid`).
pub fn parse_timezone(name: &str) -> Result<Tz, CoreError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| CoreError::invalid(format!("Unknown time zone '{name}'")))
}

/// The calendar date in `tz` at the instant `now`.
pub fn date_in(tz: Tz, now: Timestamp) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

/// Today's calendar date in `tz`.
pub fn today_in(tz: Tz) -> NaiveDate {
    date_in(tz, chrono::Utc::now())
}

/// Combine a calendar date with a time of day.
pub fn at(date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    date.and_time(time)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn parses_known_zone() {
        assert_eq!(parse_timezone("Europe/Madrid").unwrap(), chrono_tz::Europe::Madrid);
    }

    #[test]
    fn rejects_unknown_zone() {
        assert!(parse_timezone("Mars/Olympus").is_err());
    }

    #[test]
    fn local_date_can_differ_from_utc_date() {
        // 23:30 UTC on Oct 19 is already Oct 20 in Madrid (UTC+2 in summer time).
        let now = chrono::Utc.with_ymd_and_hms(2026, 10, 19, 23, 30, 0).unwrap();
        assert_eq!(
            date_in(chrono_tz::Europe::Madrid, now),
            NaiveDate::from_ymd_opt(2026, 10, 20).unwrap()
        );
        assert_eq!(
            date_in(chrono_tz::UTC, now),
            NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
        );
    }
}
