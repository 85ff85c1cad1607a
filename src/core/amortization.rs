/// Below this, `1 - (1 + r)^-n` is too close to zero to divide by and the
/// loan is treated as interest-free.
const LINEAR_FALLBACK_THRESHOLD: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanTotals {
    pub total_paid: f64,
    pub total_interest: f64,
}

pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / 12.0
}

pub fn payment_count(term_years: u32) -> u32 {
    term_years.saturating_mul(12)
}

/// `1 - (1 + r)^-n`, computed through `ln_1p`/`exp_m1` so tiny rates keep
/// their precision. Stays in `(0, 1]` when `(1 + r)^n` itself would overflow.
fn discounted_share(rate: f64, periods: f64) -> f64 {
    -(-periods * rate.ln_1p()).exp_m1()
}

/// Level monthly payment that repays `loan_amount` over `term_years`.
///
/// A zero rate amortizes the loan linearly, including a negative
/// (over-funded) loan. A negative rate, or a positive rate with nothing to
/// borrow, pays nothing. Never returns NaN; very long terms or very high
/// rates converge on interest-only `loan_amount * r`.
pub fn monthly_payment(loan_amount: f64, annual_rate_percent: f64, term_years: u32) -> f64 {
    let n = payment_count(term_years);
    if n == 0 {
        return 0.0;
    }
    let periods = n as f64;

    if annual_rate_percent < 0.0 {
        return 0.0;
    }
    if annual_rate_percent == 0.0 {
        return loan_amount / periods;
    }
    if loan_amount <= 0.0 {
        return 0.0;
    }

    let r = monthly_rate(annual_rate_percent);
    let share = discounted_share(r, periods);
    if share <= LINEAR_FALLBACK_THRESHOLD {
        return loan_amount / periods;
    }

    loan_amount * r / share
}

/// Inverse of [`monthly_payment`]: the principal a level `monthly_payment`
/// can service.
///
/// A zero rate or zero payment solves to 0 rather than to the linear
/// `payment * n` case. Only the near-zero positive-rate regime falls back to
/// the linear form, mirroring [`monthly_payment`].
pub fn solve_loan_principal(
    monthly_payment: f64,
    annual_rate_percent: f64,
    term_years: u32,
) -> f64 {
    if monthly_payment <= 0.0 || annual_rate_percent <= 0.0 {
        return 0.0;
    }
    let n = payment_count(term_years);
    if n == 0 {
        return 0.0;
    }
    let periods = n as f64;

    let r = monthly_rate(annual_rate_percent);
    let share = discounted_share(r, periods);
    if share <= LINEAR_FALLBACK_THRESHOLD {
        return monthly_payment * periods;
    }

    monthly_payment * share / r
}

pub fn totals(monthly_payment: f64, payment_count: u32, loan_amount: f64) -> LoanTotals {
    let total_paid = monthly_payment * payment_count as f64;
    LoanTotals {
        total_paid,
        total_interest: total_paid - loan_amount,
    }
}
