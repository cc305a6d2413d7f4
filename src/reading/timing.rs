use std::time::Duration;

/// Floor for the per-token delay; keeps a non-positive tempo from spinning.
pub const MIN_TICK_INTERVAL_MS: u64 = 1;

/// Converts a tempo in tokens per minute into the delay between two tokens.
///
/// Tempo can be driven to zero or below by repeated speed-downs, so it is
/// treated as at least 1 before dividing.
pub fn tick_interval_ms(tempo: i64) -> u64 {
    let per_token = (60.0 / tempo.max(1) as f64) * 1000.0;
    (per_token.round() as u64).max(MIN_TICK_INTERVAL_MS)
}

pub fn tick_interval(tempo: i64) -> Duration {
    Duration::from_millis(tick_interval_ms(tempo))
}

/// Percentage of the text shown once the token at `position` is displayed.
pub fn progress_percent(position: usize, count: usize) -> u8 {
    if count == 0 {
        return 0;
    }
    let percent = ((position + 1) as f64 * 100.0 / count as f64).round();
    percent.clamp(0.0, 100.0) as u8
}
