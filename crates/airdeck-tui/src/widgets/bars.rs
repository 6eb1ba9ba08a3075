//! Block-character bars for sensor values.

/// Split a `width`-wide bar into filled and empty portions for `ratio`.
///
/// Returns `(filled, empty)` strings of `█` and `░` characters that together
/// span `width` character positions. Caller applies styling per segment.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
pub fn ratio_bar(ratio: f64, width: u16) -> (String, String) {
    let clamped = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
    let filled_count = (clamped * f64::from(width)).floor() as u16;
    let empty_count = width.saturating_sub(filled_count);
    (
        "█".repeat(usize::from(filled_count)),
        "░".repeat(usize::from(empty_count)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_spans_full_width() {
        let (filled, empty) = ratio_bar(0.25, 20);
        assert_eq!(filled.chars().count(), 5);
        assert_eq!(empty.chars().count(), 15);
    }

    #[test]
    fn out_of_range_ratios_clamp() {
        assert_eq!(ratio_bar(3.0, 4), ("████".to_owned(), String::new()));
        assert_eq!(ratio_bar(-1.0, 2), (String::new(), "░░".to_owned()));
        assert_eq!(ratio_bar(f64::NAN, 1), (String::new(), "░".to_owned()));
    }

    #[test]
    fn partial_cells_are_not_filled() {
        let (filled, empty) = ratio_bar(0.79, 10);
        assert_eq!(filled.chars().count(), 7);
        assert_eq!(empty.chars().count(), 3);

        let (filled, _) = ratio_bar(0.999, 30);
        assert_eq!(filled.chars().count(), 29);
    }

    #[test]
    fn zero_width_is_empty() {
        assert_eq!(ratio_bar(0.5, 0), (String::new(), String::new()));
    }
}
