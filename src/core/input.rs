//! Boundary between raw user edits and calculator input state.
//!
//! Nothing past this point is validated again: values are clamped to be
//! non-negative and finite here, and unparsable text becomes 0.

use super::types::DownPaymentField;

pub fn clamp_non_negative(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

/// Parses a field as typed into a form, tolerating `$`, `,`, `%` and
/// surrounding whitespace.
pub fn parse_amount(raw: &str) -> f64 {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '%' | '_') && !c.is_whitespace())
        .collect();
    clamp_non_negative(cleaned.parse::<f64>().unwrap_or(0.0))
}

pub fn term_years_from(value: f64) -> u32 {
    let years = clamp_non_negative(value).trunc();
    if years >= u32::MAX as f64 {
        u32::MAX
    } else {
        years as u32
    }
}

pub fn parse_term_years(raw: &str) -> u32 {
    term_years_from(parse_amount(raw))
}

/// One committed edit to the forward calculator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ForwardEdit {
    HousePrice(f64),
    DownPayment { field: DownPaymentField, value: f64 },
    InterestRate(f64),
    LoanTermYears(f64),
}

/// One committed edit to the reverse calculator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReverseEdit {
    MonthlyPayment(f64),
    DownPayment(f64),
    AdditionalDownPayment(f64),
    InterestRate(f64),
    LoanTermYears(f64),
}
