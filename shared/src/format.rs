use chrono::{Days, NaiveDate};

/// Format a raw play duration as `{h}시간 {m}분`.
pub fn play_time(total_secs: i64) -> String {
    let secs = total_secs.max(0);
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    format!("{hours}시간 {minutes}분")
}

/// `YYYY-MM-DD` → `MM{sep}DD`. Returns `None` for anything that is not an
/// ISO calendar date.
pub fn month_day_label(date: &str, sep: char) -> Option<String> {
    let parsed = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
    Some(parsed.format(&format!("%m{sep}%d")).to_string())
}

/// Seconds → minutes, rounded to one decimal.
pub fn minutes_one_decimal(secs: i64) -> f64 {
    (secs as f64 / 60.0 * 10.0).round() / 10.0
}

/// The day before `today`, as the `YYYY-MM-DD` value a date input expects.
pub fn previous_day_iso(today: NaiveDate) -> String {
    today
        .checked_sub_days(Days::new(1))
        .unwrap_or(today)
        .format("%Y-%m-%d")
        .to_string()
}

pub fn is_iso_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}
