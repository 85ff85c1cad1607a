mod amortization;
mod down_payment;
mod format;
mod forward;
mod input;
mod reverse;
mod types;

pub use amortization::{LoanTotals, monthly_payment, payment_count, solve_loan_principal, totals};
pub use down_payment::{DownPayment, amount_from_percent, percent_from_amount};
pub use format::{format_currency, format_percent};
pub use forward::ForwardCalculator;
pub use input::{
    ForwardEdit, ReverseEdit, clamp_non_negative, parse_amount, parse_term_years, term_years_from,
};
pub use reverse::ReverseCalculator;
pub use types::{DownPaymentField, ForwardInputs, ForwardSummary, ReverseInputs, ReverseSummary};
