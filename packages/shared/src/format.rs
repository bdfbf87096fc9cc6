//! Duration formatting for timer displays.

/// Format a signed number of seconds as `MM:SS`, or `HH:MM:SS` once it reaches an hour.
///
/// Negative values keep their sign (`-00:30`), which is how an overrunning
/// countdown is shown.
pub fn format_duration_secs(seconds: i64) -> String {
    let negative = seconds < 0;
    let total = seconds.unsigned_abs();

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    let body = if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    };

    if negative { format!("-{}", body) } else { body }
}

/// Format a [`std::time::Duration`] with [`format_duration_secs`].
pub fn format_duration(duration: std::time::Duration) -> String {
    format_duration_secs(i64::try_from(duration.as_secs()).unwrap_or(i64::MAX))
}

/// Number of `unit`-long intervals contained in `seconds`, to one decimal place.
pub fn format_units(seconds: u64, unit: std::time::Duration) -> String {
    let unit_secs = unit.as_secs();
    if unit_secs == 0 {
        return "0.0".to_string();
    }
    format!("{:.1}", seconds as f64 / unit_secs as f64)
}
