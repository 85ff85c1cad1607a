use super::amortization;
use super::down_payment::percent_from_amount;
use super::input::{ReverseEdit, clamp_non_negative, term_years_from};
use super::types::{ReverseInputs, ReverseSummary};

/// Payment-to-price calculator: how much house a monthly budget buys.
#[derive(Debug, Clone)]
pub struct ReverseCalculator {
    inputs: ReverseInputs,
}

impl Default for ReverseCalculator {
    fn default() -> Self {
        Self::new(ReverseInputs::default())
    }
}

impl ReverseCalculator {
    pub fn new(inputs: ReverseInputs) -> Self {
        Self {
            inputs: ReverseInputs {
                monthly_payment: clamp_non_negative(inputs.monthly_payment),
                down_payment: clamp_non_negative(inputs.down_payment),
                additional_down_payment: clamp_non_negative(inputs.additional_down_payment),
                annual_rate_percent: clamp_non_negative(inputs.annual_rate_percent),
                term_years: inputs.term_years,
            },
        }
    }

    pub fn inputs(&self) -> ReverseInputs {
        self.inputs
    }

    pub fn set_monthly_payment(&mut self, value: f64) {
        self.inputs.monthly_payment = clamp_non_negative(value);
    }

    pub fn set_down_payment(&mut self, value: f64) {
        self.inputs.down_payment = clamp_non_negative(value);
    }

    pub fn set_additional_down_payment(&mut self, value: f64) {
        self.inputs.additional_down_payment = clamp_non_negative(value);
    }

    pub fn set_interest_rate(&mut self, value: f64) {
        self.inputs.annual_rate_percent = clamp_non_negative(value);
    }

    pub fn set_loan_term_years(&mut self, years: u32) {
        self.inputs.term_years = years;
    }

    pub fn apply(&mut self, edit: ReverseEdit) {
        match edit {
            ReverseEdit::MonthlyPayment(v) => self.set_monthly_payment(v),
            ReverseEdit::DownPayment(v) => self.set_down_payment(v),
            ReverseEdit::AdditionalDownPayment(v) => self.set_additional_down_payment(v),
            ReverseEdit::InterestRate(v) => self.set_interest_rate(v),
            ReverseEdit::LoanTermYears(v) => self.set_loan_term_years(term_years_from(v)),
        }
    }

    pub fn total_down_payment(&self) -> f64 {
        self.inputs.down_payment + self.inputs.additional_down_payment
    }

    /// Zero when either the rate or the payment is zero.
    pub fn loan_amount(&self) -> f64 {
        amortization::solve_loan_principal(
            self.inputs.monthly_payment,
            self.inputs.annual_rate_percent,
            self.inputs.term_years,
        )
    }

    pub fn house_price(&self) -> f64 {
        self.loan_amount() + self.total_down_payment()
    }

    pub fn down_payment_percentage(&self) -> f64 {
        percent_from_amount(self.house_price(), self.total_down_payment())
    }

    pub fn total_amount_paid(&self) -> f64 {
        self.inputs.monthly_payment * amortization::payment_count(self.inputs.term_years) as f64
    }

    pub fn total_interest_paid(&self) -> f64 {
        self.total_amount_paid() - self.loan_amount()
    }

    pub fn summary(&self) -> ReverseSummary {
        let total_down_payment = self.total_down_payment();
        let loan_amount = self.loan_amount();
        let house_price = loan_amount + total_down_payment;
        let totals = amortization::totals(
            self.inputs.monthly_payment,
            amortization::payment_count(self.inputs.term_years),
            loan_amount,
        );
        ReverseSummary {
            monthly_payment: self.inputs.monthly_payment,
            down_payment: self.inputs.down_payment,
            additional_down_payment: self.inputs.additional_down_payment,
            interest_rate: self.inputs.annual_rate_percent,
            loan_term_years: self.inputs.term_years,
            total_down_payment,
            loan_amount,
            house_price,
            down_payment_percentage: percent_from_amount(house_price, total_down_payment),
            total_amount_paid: totals.total_paid,
            total_interest_paid: totals.total_interest,
        }
    }
}
