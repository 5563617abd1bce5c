/// Format elapsed seconds as M:SS (seconds zero-padded, minutes not).
pub fn format_time(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Safely truncate string to max characters, appending "…" if truncated 🛡️
pub fn truncate(s: &str, max_width: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() > max_width {
        chars
            .into_iter()
            .take(max_width.saturating_sub(1))
            .collect::<String>()
            + "…"
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(3.0), "0:03");
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(65.9), "1:05");
        assert_eq!(format_time(600.0), "10:00");
    }

    #[test]
    fn bad_durations_format_as_zero() {
        assert_eq!(format_time(-4.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
    }

    #[test]
    fn truncates_with_ellipsis() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long title", 7), "a very…");
    }
}
