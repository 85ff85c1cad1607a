use super::amortization::{self, LoanTotals};
use super::down_payment::DownPayment;
use super::input::{ForwardEdit, clamp_non_negative, term_years_from};
use super::types::{DownPaymentField, ForwardInputs, ForwardSummary};

/// Price-to-payment calculator.
///
/// Holds only user inputs. Every derived figure is recomputed from them on
/// read, so nothing observed through the getters can lag behind the last
/// setter call.
#[derive(Debug, Clone)]
pub struct ForwardCalculator {
    house_price: f64,
    down_payment: DownPayment,
    annual_rate_percent: f64,
    term_years: u32,
}

impl Default for ForwardCalculator {
    fn default() -> Self {
        Self::new(ForwardInputs::default())
    }
}

impl ForwardCalculator {
    pub fn new(inputs: ForwardInputs) -> Self {
        let house_price = clamp_non_negative(inputs.house_price);
        Self {
            house_price,
            down_payment: DownPayment::from_percent(
                house_price,
                clamp_non_negative(inputs.down_payment_percent),
            ),
            annual_rate_percent: clamp_non_negative(inputs.annual_rate_percent),
            term_years: inputs.term_years,
        }
    }

    pub fn set_house_price(&mut self, value: f64) {
        self.house_price = clamp_non_negative(value);
        self.down_payment.rebase(self.house_price);
    }

    pub fn set_down_payment_percent(&mut self, value: f64) {
        self.down_payment
            .set_percent(self.house_price, clamp_non_negative(value));
    }

    pub fn set_down_payment_amount(&mut self, value: f64) {
        self.down_payment
            .set_amount(self.house_price, clamp_non_negative(value));
    }

    pub fn set_interest_rate(&mut self, value: f64) {
        self.annual_rate_percent = clamp_non_negative(value);
    }

    pub fn set_loan_term_years(&mut self, years: u32) {
        self.term_years = years;
    }

    pub fn apply(&mut self, edit: ForwardEdit) {
        match edit {
            ForwardEdit::HousePrice(v) => self.set_house_price(v),
            ForwardEdit::DownPayment {
                field: DownPaymentField::Percent,
                value,
            } => self.set_down_payment_percent(value),
            ForwardEdit::DownPayment {
                field: DownPaymentField::Amount,
                value,
            } => self.set_down_payment_amount(value),
            ForwardEdit::InterestRate(v) => self.set_interest_rate(v),
            ForwardEdit::LoanTermYears(v) => self.set_loan_term_years(term_years_from(v)),
        }
    }

    pub fn house_price(&self) -> f64 {
        self.house_price
    }

    pub fn down_payment_amount(&self) -> f64 {
        self.down_payment.amount()
    }

    pub fn down_payment_percent(&self) -> f64 {
        self.down_payment.percent()
    }

    pub fn down_payment_driver(&self) -> DownPaymentField {
        self.down_payment.driver()
    }

    pub fn interest_rate(&self) -> f64 {
        self.annual_rate_percent
    }

    pub fn loan_term_years(&self) -> u32 {
        self.term_years
    }

    /// Negative when the down payment exceeds the price.
    pub fn loan_amount(&self) -> f64 {
        self.house_price - self.down_payment.amount()
    }

    pub fn monthly_payment(&self) -> f64 {
        amortization::monthly_payment(self.loan_amount(), self.annual_rate_percent, self.term_years)
    }

    pub fn totals(&self) -> LoanTotals {
        amortization::totals(
            self.monthly_payment(),
            amortization::payment_count(self.term_years),
            self.loan_amount(),
        )
    }

    pub fn total_paid(&self) -> f64 {
        self.totals().total_paid
    }

    pub fn total_interest(&self) -> f64 {
        self.totals().total_interest
    }

    pub fn summary(&self) -> ForwardSummary {
        let loan_amount = self.loan_amount();
        let monthly_payment = self.monthly_payment();
        let totals = amortization::totals(
            monthly_payment,
            amortization::payment_count(self.term_years),
            loan_amount,
        );
        ForwardSummary {
            house_price: self.house_price,
            down_payment_amount: self.down_payment.amount(),
            down_payment_percent: self.down_payment.percent(),
            down_payment_driver: self.down_payment.driver(),
            interest_rate: self.annual_rate_percent,
            loan_term_years: self.term_years,
            loan_amount,
            monthly_payment,
            total_paid: totals.total_paid,
            total_interest: totals.total_interest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn assert_approx_tol(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    fn sample_inputs() -> ForwardInputs {
        ForwardInputs {
            house_price: 500_000.0,
            down_payment_percent: 20.0,
            annual_rate_percent: 7.0,
            term_years: 30,
        }
    }

    #[test]
    fn derives_payment_and_totals_from_inputs() {
        let calc = ForwardCalculator::new(sample_inputs());
        assert_approx(calc.down_payment_amount(), 100_000.0);
        assert_approx(calc.loan_amount(), 400_000.0);
        assert_approx_tol(calc.monthly_payment(), 2_661.21, 0.01);
        assert_approx_tol(calc.total_paid(), 958_035.59, 0.5);
        assert_approx_tol(calc.total_interest(), 558_035.59, 0.5);
    }

    #[test]
    fn reads_reflect_the_latest_edit() {
        let mut calc = ForwardCalculator::new(sample_inputs());
        let before = calc.monthly_payment();

        calc.set_interest_rate(6.0);
        let after_rate = calc.monthly_payment();
        assert!(after_rate < before);

        calc.set_loan_term_years(15);
        assert!(calc.monthly_payment() > after_rate);
        assert_eq!(calc.summary().loan_term_years, 15);
    }

    #[test]
    fn house_price_edit_keeps_percent_sticky() {
        let mut calc = ForwardCalculator::new(sample_inputs());
        calc.set_down_payment_amount(125_000.0);
        assert_approx(calc.down_payment_percent(), 25.0);

        calc.set_house_price(600_000.0);
        assert_approx(calc.down_payment_percent(), 25.0);
        assert_approx(calc.down_payment_amount(), 150_000.0);
        assert_approx(calc.loan_amount(), 450_000.0);
    }

    #[test]
    fn apply_routes_down_payment_by_touched_field() {
        let mut calc = ForwardCalculator::new(sample_inputs());
        calc.apply(ForwardEdit::DownPayment {
            field: DownPaymentField::Amount,
            value: 50_000.0,
        });
        assert_approx(calc.down_payment_percent(), 10.0);
        assert_eq!(calc.down_payment_driver(), DownPaymentField::Amount);

        calc.apply(ForwardEdit::DownPayment {
            field: DownPaymentField::Percent,
            value: 30.0,
        });
        assert_approx(calc.down_payment_amount(), 150_000.0);
        assert_eq!(calc.down_payment_driver(), DownPaymentField::Percent);
    }

    #[test]
    fn apply_clamps_negative_edits() {
        let mut calc = ForwardCalculator::new(sample_inputs());
        calc.apply(ForwardEdit::HousePrice(-10.0));
        calc.apply(ForwardEdit::InterestRate(-3.0));
        calc.apply(ForwardEdit::LoanTermYears(-1.0));

        let summary = calc.summary();
        assert_eq!(summary.house_price, 0.0);
        assert_eq!(summary.interest_rate, 0.0);
        assert_eq!(summary.loan_term_years, 0);
        assert_eq!(summary.monthly_payment, 0.0);
        assert!(summary.down_payment_percent.is_finite());
    }

    #[test]
    fn zero_rate_loan_pays_principal_in_equal_parts() {
        let mut calc = ForwardCalculator::new(sample_inputs());
        calc.set_house_price(150_000.0);
        calc.set_down_payment_amount(30_000.0);
        calc.set_interest_rate(0.0);
        calc.set_loan_term_years(10);

        assert_eq!(calc.monthly_payment(), 1_000.0);
        assert_approx(calc.total_interest(), 0.0);
    }

    #[test]
    fn over_funded_loan_is_surfaced_not_clamped() {
        let mut calc = ForwardCalculator::new(sample_inputs());
        calc.set_house_price(100_000.0);
        calc.set_down_payment_amount(130_000.0);
        calc.set_interest_rate(0.0);
        calc.set_loan_term_years(10);

        let summary = calc.summary();
        assert_approx(summary.loan_amount, -30_000.0);
        assert_approx(summary.down_payment_percent, 130.0);
        assert_approx(summary.monthly_payment, -250.0);
        assert_approx(summary.total_interest, summary.total_paid - summary.loan_amount);

        calc.set_interest_rate(5.0);
        let summary = calc.summary();
        assert_eq!(summary.monthly_payment, 0.0);
        assert_approx(summary.total_interest, 30_000.0);
    }

    #[test]
    fn summary_matches_individual_getters() {
        let mut calc = ForwardCalculator::default();
        calc.set_house_price(725_000.0);
        calc.set_down_payment_percent(12.5);
        let summary = calc.summary();

        assert_eq!(summary.loan_amount, calc.loan_amount());
        assert_eq!(summary.monthly_payment, calc.monthly_payment());
        assert_eq!(summary.total_paid, calc.total_paid());
        assert_eq!(summary.total_interest, calc.total_interest());
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(48))]

        #[test]
        fn prop_down_payment_stays_consistent_with_price(
            start_price in 0u32..2_000_000,
            new_price in 0u32..2_000_000,
            amount in 0u32..2_000_000,
            rate_bp in 0u32..2_000,
            term_years in 0u32..41
        ) {
            let mut calc = ForwardCalculator::new(ForwardInputs {
                house_price: start_price as f64,
                down_payment_percent: 20.0,
                annual_rate_percent: rate_bp as f64 / 100.0,
                term_years,
            });
            calc.set_down_payment_amount(amount as f64);
            calc.set_house_price(new_price as f64);

            let summary = calc.summary();
            let expected_amount = summary.house_price * summary.down_payment_percent / 100.0;
            prop_assert!((summary.down_payment_amount - expected_amount).abs() <= 1e-6);
            prop_assert!(summary.monthly_payment.is_finite());
            prop_assert!(summary.total_paid.is_finite());
            prop_assert!(summary.total_interest.is_finite());
        }
    }
}
