//! Axis and panel label formatting.

use std::fmt::Display;

use chrono::{DateTime, Datelike, Local, TimeZone, Timelike};

/// Format a bar timestamp (seconds since epoch) for the time axis.
///
/// Anything not on local midnight is intraday and shows clock time
/// (`09:35 AM`). Midnight timestamps show a calendar date (`Mar 4`), with the
/// year appended only when it differs from `current_year`.
pub fn format_tick<Tz>(timestamp: i64, tz: &Tz, current_year: i32) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let Some(utc) = DateTime::from_timestamp(timestamp, 0) else {
        return timestamp.to_string();
    };
    let dt = utc.with_timezone(tz);

    if dt.hour() != 0 || dt.minute() != 0 {
        return dt.format("%I:%M %p").to_string();
    }

    if dt.year() != current_year {
        dt.format("%b %-d, %Y").to_string()
    } else {
        dt.format("%b %-d").to_string()
    }
}

/// `format_tick` in the machine's local zone against today's year.
pub fn format_tick_local(timestamp: i64) -> String {
    format_tick(timestamp, &Local, Local::now().year())
}

/// Two-decimal price label.
pub fn format_price(price: f64) -> String {
    format!("{price:.2}")
}

/// Dollar price label; a missing value renders as a dash.
pub fn format_money(price: Option<f64>) -> String {
    match price {
        Some(p) => format!("${p:.2}"),
        None => "—".to_string(),
    }
}

/// Volume with thousands separators (`21,345,600`).
pub fn format_volume(volume: Option<u64>) -> String {
    let Some(v) = volume else {
        return "—".to_string();
    };
    let digits = v.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn ts(y: i32, m: u32, d: u32, h: u32, min: u32) -> i64 {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap().timestamp()
    }

    #[test]
    fn intraday_shows_clock_time() {
        assert_eq!(format_tick(ts(2024, 3, 4, 14, 35), &Utc, 2024), "02:35 PM");
        assert_eq!(format_tick(ts(2024, 3, 4, 9, 30), &Utc, 2024), "09:30 AM");
    }

    #[test]
    fn midnight_shows_date_without_current_year() {
        assert_eq!(format_tick(ts(2024, 3, 4, 0, 0), &Utc, 2024), "Mar 4");
    }

    #[test]
    fn midnight_in_other_year_shows_year() {
        assert_eq!(format_tick(ts(2023, 12, 29, 0, 0), &Utc, 2024), "Dec 29, 2023");
    }

    #[test]
    fn midnight_is_judged_in_the_given_zone() {
        let new_york = FixedOffset::west_opt(5 * 3600).unwrap();
        // 05:00 UTC is midnight in UTC-5.
        assert_eq!(format_tick(ts(2024, 1, 10, 5, 0), &new_york, 2024), "Jan 10");
        assert_eq!(format_tick(ts(2024, 1, 10, 0, 0), &new_york, 2024), "07:00 PM");
    }

    #[test]
    fn price_and_volume_labels() {
        assert_eq!(format_price(412.5), "412.50");
        assert_eq!(format_money(Some(3.14159)), "$3.14");
        assert_eq!(format_money(None), "—");
        assert_eq!(format_volume(Some(21_345_600)), "21,345,600");
        assert_eq!(format_volume(Some(999)), "999");
        assert_eq!(format_volume(Some(1_000)), "1,000");
        assert_eq!(format_volume(None), "—");
    }
}
