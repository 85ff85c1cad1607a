//! Display strings handed to the presentation layer. The engine never reads
//! these back.

/// en-US currency with no decimal places: `$1,234`, `-$1,234`.
pub fn format_currency(value: f64) -> String {
    let rounded = if value.is_finite() { value.round() } else { 0.0 };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if rounded < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands_without_cents() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.4), "$999");
        assert_eq!(format_currency(1_000.0), "$1,000");
        assert_eq!(format_currency(2_661.21), "$2,661");
        assert_eq!(format_currency(958_035.59), "$958,036");
        assert_eq!(format_currency(1_234_567.0), "$1,234,567");
    }

    #[test]
    fn currency_keeps_sign_of_over_funded_amounts() {
        assert_eq!(format_currency(-30_000.0), "-$30,000");
        assert_eq!(format_currency(-0.2), "$0");
    }

    #[test]
    fn currency_rounds_half_away_from_zero() {
        assert_eq!(format_currency(0.5), "$1");
        assert_eq!(format_currency(1_499.5), "$1,500");
    }

    #[test]
    fn percent_has_two_decimals() {
        assert_eq!(format_percent(20.0), "20.00%");
        assert_eq!(format_percent(57.1234), "57.12%");
        assert_eq!(format_percent(0.0), "0.00%");
    }
}
