use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

const DATE_TIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Parses a timestamp. Inputs without an offset are read as UTC.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.to_utc());
    }

    if let Some(dt) = input
        .strip_suffix(['Z', 'z'])
        .and_then(parse_naive_date_time)
    {
        return Some(Utc.from_utc_datetime(&dt));
    }

    if let Some(dt) = parse_with_offset(input) {
        return Some(dt.to_utc());
    }

    if let Some(dt) = parse_naive_date_time(input) {
        return Some(Utc.from_utc_datetime(&dt));
    }

    if let Some(date) = parse_date(input) {
        return date.and_hms_opt(0, 0, 0).map(|dt| Utc.from_utc_datetime(&dt));
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Some(dt.to_utc());
    }

    return None;
}

/// `YYYY-MM-DD` form of the timestamp's UTC calendar date. Years outside
/// `0..=9999` use the expanded `±YYYYYY` form.
pub fn iso_date(dt: &DateTime<Utc>) -> String {
    let year = dt.year();
    if (0..=9999).contains(&year) {
        return dt.format("%Y-%m-%d").to_string();
    }

    let sign = if year < 0 { '-' } else { '+' };
    return format!(
        "{sign}{:06}-{:02}-{:02}",
        year.unsigned_abs(),
        dt.month(),
        dt.day()
    );
}

fn parse_with_offset(input: &str) -> Option<DateTime<FixedOffset>> {
    return DATE_TIME_FORMATS.iter().find_map(|format| {
        DateTime::parse_from_str(input, &format!("{format}%:z"))
            .or_else(|_| DateTime::parse_from_str(input, &format!("{format}%z")))
            .ok()
    });
}

fn parse_naive_date_time(input: &str) -> Option<NaiveDateTime> {
    return DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok());
}

fn parse_date(input: &str) -> Option<NaiveDate> {
    if let Some(date) = parse_partial_iso_date(input) {
        return Some(date);
    }

    return DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok());
}

/// `YYYY` or `YYYY-MM`.
fn parse_partial_iso_date(input: &str) -> Option<NaiveDate> {
    let (year, month) = match input.split_once('-') {
        Some((year, month)) if month.len() == 2 => (year, month),
        Some(_) => return None,
        None => (input, "01"),
    };

    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if !month.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    return NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1);
}
