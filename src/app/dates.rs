use std::fmt::Display;

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

pub const INVALID_DATE: &str = "Invalid Date";

const OFFSET_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M%:z",
];

const NAIVE_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Formats `input` for display in the browser's time zone.
pub fn format_date(input: &str) -> String {
    format_date_in(input, &Local)
}

/// en-US short form, e.g. "Mar 15, 2024, 02:30 PM". The year is never padded.
pub fn format_date_in<Tz>(input: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let Some(instant) = parse_instant(input, tz) else {
        return INVALID_DATE.to_string();
    };
    let local = instant.with_timezone(tz);
    format!(
        "{} {}, {}, {}",
        local.format("%b"),
        local.day(),
        local.year(),
        local.format("%I:%M %p")
    )
}

/// Offset-qualified strings are absolute, naive date-times are wall-clock time
/// in `tz`, and date-only forms (`YYYY-MM-DD`, `YYYY-MM`, `YYYY`) are UTC midnight.
fn parse_instant<Tz: TimeZone>(input: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    if let Some(zulu) = s.strip_suffix(['Z', 'z']) {
        return NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(zulu, fmt).ok())
            .map(|naive| naive.and_utc());
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return wall_clock_to_utc(tz, naive);
        }
    }
    parse_date_only(s)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn parse_date_only(s: &str) -> Option<NaiveDate> {
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    let mut parts = s.split('-');
    let (year, month, day) = (parts.next()?, parts.next(), parts.next());
    if parts.next().is_some() || year.len() != 4 || !all_digits(year) {
        return None;
    }
    let month = match month {
        Some(m) if m.len() == 2 && all_digits(m) => m.parse().ok()?,
        Some(_) => return None,
        None => 1,
    };
    let day = match day {
        Some(d) if d.len() == 2 && all_digits(d) => d.parse().ok()?,
        Some(_) => return None,
        None => 1,
    };
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, day)
}

fn wall_clock_to_utc<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    // A time skipped by a DST jump resolves one hour later.
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .map(|dt| dt.with_timezone(&Utc))
}
