use chrono::{DateTime, Local, Utc};

/// 100-nanosecond ticks between 1601-01-01 and 1970-01-01.
pub const WINDOWS_TO_UNIX_EPOCH_TICKS: i64 = 116_444_736_000_000_000;

const TICKS_PER_SECOND: i64 = 10_000_000;
const NANOS_PER_TICK: i64 = 100;

/// LSA marks "never" with `i64::MAX`, and unset stamps with 0.
pub fn filetime_to_datetime(filetime: i64) -> Option<DateTime<Utc>> {
    if filetime <= 0 || filetime == i64::MAX {
        return None;
    }

    let unix_ticks = filetime - WINDOWS_TO_UNIX_EPOCH_TICKS;
    let seconds = unix_ticks.div_euclid(TICKS_PER_SECOND);
    let nanoseconds = unix_ticks.rem_euclid(TICKS_PER_SECOND) * NANOS_PER_TICK;

    return DateTime::from_timestamp(seconds, nanoseconds as u32);
}

pub fn format_utc_datetime(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local)
        .format("%m/%d/%Y %H:%M:%S")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_unix_epoch() {
        let dt = filetime_to_datetime(WINDOWS_TO_UNIX_EPOCH_TICKS).unwrap();
        assert_eq!(dt.timestamp(), 0);
        assert_eq!(dt.timestamp_subsec_nanos(), 0);
    }

    #[test]
    fn test_known_date() {
        // 2024-03-01 12:30:45.1234567 UTC
        let filetime = 133_537_698_451_234_567;
        let dt = filetime_to_datetime(filetime).unwrap();
        assert_eq!(
            dt.with_nanosecond(0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 45).unwrap()
        );
        assert_eq!(dt.timestamp_subsec_nanos(), 123_456_700);
    }

    #[test]
    fn test_before_unix_epoch() {
        let dt = filetime_to_datetime(1).unwrap();
        assert_eq!(
            dt.with_nanosecond(0).unwrap(),
            Utc.with_ymd_and_hms(1601, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(dt.timestamp_subsec_nanos(), 100);
    }

    #[test]
    fn test_sentinels_are_none() {
        assert_eq!(filetime_to_datetime(0), None);
        assert_eq!(filetime_to_datetime(i64::MAX), None);
        assert_eq!(filetime_to_datetime(-1), None);
        assert_eq!(filetime_to_datetime(i64::MIN), None);
    }

    #[test]
    fn test_format_utc_datetime_shape() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 45).unwrap();
        let s = format_utc_datetime(&dt);
        assert_eq!(s.len(), "03/01/2024 12:30:45".len());
        assert!(s.ends_with(":45"));
    }
}
