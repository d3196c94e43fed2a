//! Clock face formatting

/// Format a second count as `MM:SS`
pub fn format_time(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(9), "00:09");
        assert_eq!(format_time(180), "03:00");
        assert_eq!(format_time(59 * 60 + 59), "59:59");
    }
}
