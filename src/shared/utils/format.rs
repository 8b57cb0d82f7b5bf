//! Display formatting for sizes, durations and progress

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Human readable byte count with one decimal (`1.5 GB`)
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

/// `0.8s`, `12.3s`, `2m 05s`
pub fn format_elapsed(seconds: f64) -> String {
    if seconds < 60.0 {
        return format!("{:.1}s", seconds.max(0.0));
    }
    let total = seconds.round() as u64;
    format!("{}m {:02}s", total / 60, total % 60)
}

/// Percentage clamped to `[0, 100]` with no decimals
pub fn format_progress(percent: f64) -> String {
    format!("{:.0}%", percent.clamp(0.0, 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(483_617_219), "461.2 MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.0 GB");
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0.84), "0.8s");
        assert_eq!(format_elapsed(59.94), "59.9s");
        assert_eq!(format_elapsed(125.0), "2m 05s");
    }

    #[test]
    fn test_format_progress() {
        assert_eq!(format_progress(42.4), "42%");
        assert_eq!(format_progress(-3.0), "0%");
        assert_eq!(format_progress(180.0), "100%");
    }
}
