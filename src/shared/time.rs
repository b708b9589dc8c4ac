use chrono::{DateTime, Utc};

/// Whole minutes from `now` until `then`, rounded towards `now`.
/// Negative when `then` already passed.
pub fn minutes_until(now: DateTime<Utc>, then: DateTime<Utc>) -> i64 {
    (then - now).num_minutes()
}

/// Label shown next to a departure, "now", "in 5 min" or "in 1 h 05 min".
pub fn eta_label(minutes: i64) -> String {
    match minutes {
        i64::MIN..=0 => "now".to_string(),
        1..=59 => format!("in {minutes} min"),
        _ => format!("in {} h {:02} min", minutes / 60, minutes % 60),
    }
}

/// Parses an RFC 3339 timestamp, the format the HAFAS REST API uses.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|time| time.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn minutes_until_rounds_toward_now() {
        let now = Utc.with_ymd_and_hms(2020, 3, 7, 10, 0, 0).unwrap();
        let then = Utc.with_ymd_and_hms(2020, 3, 7, 10, 4, 59).unwrap();
        assert_eq!(minutes_until(now, then), 4);
        assert_eq!(minutes_until(then, now), -4);
    }

    #[test]
    fn eta_labels() {
        assert_eq!(eta_label(-3), "now");
        assert_eq!(eta_label(0), "now");
        assert_eq!(eta_label(1), "in 1 min");
        assert_eq!(eta_label(59), "in 59 min");
        assert_eq!(eta_label(65), "in 1 h 05 min");
    }

    #[test]
    fn parse_with_offset() {
        let time = parse_timestamp("2020-03-07T11:00:00+01:00").unwrap();
        assert_eq!(time, Utc.with_ymd_and_hms(2020, 3, 7, 10, 0, 0).unwrap());
        assert!(parse_timestamp("11:00").is_none());
    }
}
