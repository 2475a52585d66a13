// ABOUTME: Episode duration formatting and parsing for itunes:duration.
// ABOUTME: Formats whole seconds as H:MM:SS and parses integer, colon, and Go-style durations.

/// Formats a duration in whole seconds as `H:MM:SS`.
///
/// Hours are not padded; minutes and seconds always use two digits.
/// `3725` becomes `"1:02:05"`.
pub fn format_duration(total_seconds: u32) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}:{:02}", hours, minutes, seconds)
}

/// Reads an episode length as written in a manifest's `media_duration`.
///
/// Accepts bare seconds (`"2730"`), the `H:MM:SS` form written by
/// [`format_duration`], a shorter `M:SS`, or unit strings such as `"1h30m"`.
/// Anything else, or a length past `u32::MAX` seconds, yields `None`.
pub fn parse_duration_seconds(input: &str) -> Option<u32> {
    let input = input.trim();
    let seconds = if input.is_empty() {
        return None;
    } else if input.bytes().all(|b| b.is_ascii_digit()) {
        input.parse::<u64>().ok()?
    } else if input.contains(':') {
        clock_seconds(input)?
    } else {
        parse_duration::parse(input).ok()?.as_secs()
    };
    u32::try_from(seconds).ok()
}

/// `M:SS` or `H:MM:SS`, fields not range-checked.
fn clock_seconds(input: &str) -> Option<u64> {
    let mut total = 0u64;
    let mut count = 0;
    for field in input.split(':') {
        let value = field.trim().parse::<u64>().ok()?;
        total = total.checked_mul(60)?.checked_add(value)?;
        count += 1;
    }
    matches!(count, 2 | 3).then_some(total)
}
