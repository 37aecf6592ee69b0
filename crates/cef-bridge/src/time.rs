//! Calendar time conversion
//!
//! The library reports "no time" as an all-zero `cef_time_t`; that maps to
//! `None`. Any other value must name a real UTC instant.

use crate::error::{BridgeError, BridgeResult};
use cef_sys::cef_time_t;
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike, Utc};
use std::os::raw::c_int;

fn field(value: c_int, name: &str, raw: &cef_time_t) -> BridgeResult<u32> {
    u32::try_from(value).map_err(|_| BridgeError::InvalidTime(format!("{} in {:?}", name, raw)))
}

/// Convert a library time; the zero value is `None`
pub fn from_cef_time(raw: &cef_time_t) -> BridgeResult<Option<DateTime<Utc>>> {
    if *raw == cef_time_t::default() {
        return Ok(None);
    }
    let invalid = || BridgeError::InvalidTime(format!("{:?}", raw));
    let date = NaiveDate::from_ymd_opt(
        raw.year,
        field(raw.month, "month", raw)?,
        field(raw.day_of_month, "day_of_month", raw)?,
    )
    .ok_or_else(invalid)?;
    let naive = date
        .and_hms_milli_opt(
            field(raw.hour, "hour", raw)?,
            field(raw.minute, "minute", raw)?,
            field(raw.second, "second", raw)?,
            field(raw.millisecond, "millisecond", raw)?,
        )
        .ok_or_else(invalid)?;
    Ok(Some(Utc.from_utc_datetime(&naive)))
}

/// Convert to the library's representation, millisecond precision
pub fn to_cef_time(time: &DateTime<Utc>) -> cef_time_t {
    // Leap seconds carry nanoseconds past 1e9
    let millis = (time.nanosecond() / 1_000_000).min(999);
    cef_time_t {
        year: time.year(),
        month: time.month() as c_int,
        day_of_week: time.weekday().num_days_from_sunday() as c_int,
        day_of_month: time.day() as c_int,
        hour: time.hour() as c_int,
        minute: time.minute() as c_int,
        second: time.second() as c_int,
        millisecond: millis as c_int,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> cef_time_t {
        cef_time_t {
            year: 2024,
            month: 2,
            day_of_week: 4,
            day_of_month: 29,
            hour: 13,
            minute: 5,
            second: 9,
            millisecond: 250,
        }
    }

    #[test]
    fn test_zero_time_is_none() {
        assert_eq!(from_cef_time(&cef_time_t::default()).unwrap(), None);
    }

    #[test]
    fn test_converts_both_ways() {
        let time = from_cef_time(&sample()).unwrap().unwrap();
        assert_eq!(time.to_rfc3339(), "2024-02-29T13:05:09.250+00:00");
        assert_eq!(to_cef_time(&time), sample());
    }

    #[test]
    fn test_day_of_week_is_recomputed() {
        let mut raw = sample();
        raw.day_of_week = 0;
        let time = from_cef_time(&raw).unwrap().unwrap();
        assert_eq!(to_cef_time(&time).day_of_week, 4);
    }

    #[test]
    fn test_invalid_date_rejected() {
        let mut raw = sample();
        raw.year = 2023;
        assert!(matches!(from_cef_time(&raw), Err(BridgeError::InvalidTime(_))));

        let mut raw = sample();
        raw.hour = -1;
        assert!(matches!(from_cef_time(&raw), Err(BridgeError::InvalidTime(_))));
    }
}
