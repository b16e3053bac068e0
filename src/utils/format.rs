//! Clock formatting for the timer display

/// Format seconds as zero-padded `mm:ss`. Minutes are not wrapped into hours.
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
