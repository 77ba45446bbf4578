/// Rendered in place of any statistic that cannot be computed.
pub const TIME_PLACEHOLDER: &str = "--:--.--";

/// Render a millisecond duration as a fixed-width `MM:SS.CC` clock string.
///
/// Total over the whole input domain: NaN and infinities yield
/// [`TIME_PLACEHOLDER`] instead of panicking. The sub-second remainder is
/// truncated to centiseconds, so `61999` renders as `"01:01.99"`.
pub fn format_ms(ms: f64) -> String {
    if !ms.is_finite() {
        return TIME_PLACEHOLDER.to_string();
    }
    let total_ms = ms.round().max(0.0) as u64;
    let minutes = total_ms / 60_000;
    let seconds = (total_ms % 60_000) / 1_000;
    let centis = (total_ms % 1_000) / 10;
    format!("{minutes:02}:{seconds:02}.{centis:02}")
}

/// Render an optional statistic, falling back to the placeholder.
pub fn format_stat(value: Option<f64>) -> String {
    match value {
        Some(v) => format_ms(v),
        None => TIME_PLACEHOLDER.to_string(),
    }
}
