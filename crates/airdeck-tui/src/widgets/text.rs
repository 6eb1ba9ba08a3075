//! Width-aware text helpers.

/// Cut `value` to at most `max_chars`, ending in `…` when shortened.
pub fn truncate_text(value: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }
    if value.chars().count() <= max_chars {
        return value.to_owned();
    }
    if max_chars == 1 {
        return "…".into();
    }
    let mut out: String = value.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}

/// Left-align `value` in a field of `width` characters.
pub fn pad_right(value: &str, width: usize) -> String {
    format!("{value:<width$}")
}

/// Right-align `value` in a field of `width` characters.
pub fn pad_left(value: &str, width: usize) -> String {
    format!("{value:>width$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation() {
        assert_eq!(truncate_text("awair-x (10.0.0.5)", 100), "awair-x (10.0.0.5)");
        assert_eq!(truncate_text("awair-element", 6), "awair…");
        assert_eq!(truncate_text("abc", 1), "…");
        assert_eq!(truncate_text("abc", 0), "");
    }

    #[test]
    fn padding_counts_chars_not_bytes() {
        assert_eq!(pad_right("CO₂", 5), "CO₂  ");
        assert_eq!(pad_left("3 µg/m³", 9), "  3 µg/m³");
    }
}
