/// Format a length in meters with a fixed number of decimals.
///
/// Negative zero is normalised so that tiny negative values do not render as
/// `"-0.000"`.
///
/// # Examples
///
/// ```
/// use pile_core::formatting::format_meters;
///
/// assert_eq!(format_meters(2.5, 3), "2.500");
/// assert_eq!(format_meters(-0.0001, 3), "0.000");
/// assert_eq!(format_meters(-1.23456, 2), "-1.23");
/// ```
pub fn format_meters(value: f64, decimals: usize) -> String {
    let text = format!("{:.prec$}", value, prec = decimals);
    match text.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => text,
    }
}

/// Format a deviation with an explicit sign, e.g. `"+0.120"` / `"-0.050"`.
///
/// # Examples
///
/// ```
/// use pile_core::formatting::format_deviation;
///
/// assert_eq!(format_deviation(0.12, 3), "+0.120");
/// assert_eq!(format_deviation(-0.05, 3), "-0.050");
/// assert_eq!(format_deviation(0.0, 2), "0.00");
/// ```
pub fn format_deviation(value: f64, decimals: usize) -> String {
    let text = format_meters(value, decimals);
    if text.starts_with('-') || text.chars().all(|c| c == '0' || c == '.') {
        text
    } else {
        format!("+{}", text)
    }
}

/// Render a value for an editable numeric field.
///
/// Whole numbers keep one decimal (`2.5`, `0.0`, `3.0`); everything else uses
/// the shortest representation that parses back to the same value.
///
/// # Examples
///
/// ```
/// use pile_core::formatting::format_field_value;
///
/// assert_eq!(format_field_value(0.0), "0.0");
/// assert_eq!(format_field_value(2.5), "2.5");
/// assert_eq!(format_field_value(-3.0), "-3.0");
/// assert_eq!(format_field_value(0.3), "0.3");
/// ```
pub fn format_field_value(value: f64) -> String {
    if value == 0.0 {
        "0.0".to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// Round away float noise accumulated by repeated stepping.
pub fn round_to_step_precision(value: f64) -> f64 {
    (value * 1e9).round() / 1e9
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_meters_decimals() {
        assert_eq!(format_meters(0.0, 3), "0.000");
        assert_eq!(format_meters(12.3456, 1), "12.3");
        assert_eq!(format_meters(-0.5, 3), "-0.500");
    }

    #[test]
    fn test_format_meters_negative_zero() {
        assert_eq!(format_meters(-0.0, 2), "0.00");
        assert_eq!(format_meters(-0.0004, 3), "0.000");
    }

    #[test]
    fn test_format_deviation_sign() {
        assert_eq!(format_deviation(0.3, 3), "+0.300");
        assert_eq!(format_deviation(-0.3, 3), "-0.300");
        assert_eq!(format_deviation(0.00001, 3), "0.000");
    }

    #[test]
    fn test_format_field_value_negative_zero() {
        assert_eq!(format_field_value(-0.0), "0.0");
    }

    #[test]
    fn test_round_to_step_precision_removes_noise() {
        let noisy = 0.1 + 0.2;
        assert_ne!(noisy, 0.3);
        assert_eq!(round_to_step_precision(noisy), 0.3);
        assert_eq!(round_to_step_precision(-0.1 - 0.2), -0.3);
    }
}
