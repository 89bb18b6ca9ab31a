/// Render a millisecond value as `MM:SS`.
///
/// Uses ceiling rounding so the face never shows `00:00` before the final
/// second has fully elapsed: 1 ms left still renders as `00:01`.
pub fn format_mm_ss(ms: u64) -> String {
    let total_secs = ms.div_ceil(1000);
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_up_to_the_next_second() {
        assert_eq!(format_mm_ss(0), "00:00");
        assert_eq!(format_mm_ss(1), "00:01");
        assert_eq!(format_mm_ss(999), "00:01");
        assert_eq!(format_mm_ss(1_000), "00:01");
        assert_eq!(format_mm_ss(1_001), "00:02");
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_mm_ss(60_000), "01:00");
        assert_eq!(format_mm_ss(90_000), "01:30");
        assert_eq!(format_mm_ss(599_001), "10:00");
        // Minutes keep growing past the hour; there is no hour field.
        assert_eq!(format_mm_ss(3_600_000), "60:00");
    }
}
