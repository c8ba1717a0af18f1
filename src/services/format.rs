/// Format a floating-point number for display
/// Removes unnecessary decimal places (e.g., 4.0 -> "4")
/// Limits precision to 10 decimal places
pub fn format_number(value: f64) -> String {
    format_max_fraction(value, 10)
}

/// Format with at most `digits` fraction digits, trimming trailing zeros
pub fn format_max_fraction(value: f64, digits: usize) -> String {
    if value.fract() == 0.0 && value.abs() < 1e12 {
        format!("{}", value as i64)
    } else {
        let formatted = format!("{:.*}", digits, value);
        let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
        if trimmed == "-0" {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }
}

/// Cut a string to at most `max_chars` characters (not bytes)
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
