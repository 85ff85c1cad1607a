use serde::Serialize;

/// Which down-payment representation the user touched last.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DownPaymentField {
    Amount,
    Percent,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForwardInputs {
    pub house_price: f64,
    pub down_payment_percent: f64,
    pub annual_rate_percent: f64,
    pub term_years: u32,
}

impl Default for ForwardInputs {
    fn default() -> Self {
        Self {
            house_price: 500_000.0,
            down_payment_percent: 20.0,
            annual_rate_percent: 7.0,
            term_years: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReverseInputs {
    pub monthly_payment: f64,
    pub down_payment: f64,
    pub additional_down_payment: f64,
    pub annual_rate_percent: f64,
    pub term_years: u32,
}

impl Default for ReverseInputs {
    fn default() -> Self {
        Self {
            monthly_payment: 2_500.0,
            down_payment: 60_000.0,
            additional_down_payment: 0.0,
            annual_rate_percent: 7.0,
            term_years: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardSummary {
    pub house_price: f64,
    pub down_payment_amount: f64,
    pub down_payment_percent: f64,
    pub down_payment_driver: DownPaymentField,
    pub interest_rate: f64,
    pub loan_term_years: u32,
    pub loan_amount: f64,
    pub monthly_payment: f64,
    pub total_paid: f64,
    pub total_interest: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReverseSummary {
    pub monthly_payment: f64,
    pub down_payment: f64,
    pub additional_down_payment: f64,
    pub interest_rate: f64,
    pub loan_term_years: u32,
    pub total_down_payment: f64,
    pub loan_amount: f64,
    pub house_price: f64,
    pub down_payment_percentage: f64,
    pub total_amount_paid: f64,
    pub total_interest_paid: f64,
}
