use super::types::DownPaymentField;

pub fn amount_from_percent(house_price: f64, percent: f64) -> f64 {
    house_price * percent / 100.0
}

/// Share of `house_price` covered by `amount`; 0 when there is no price to
/// divide by.
pub fn percent_from_amount(house_price: f64, amount: f64) -> f64 {
    if house_price > 0.0 {
        amount / house_price * 100.0
    } else {
        0.0
    }
}

/// The two synced views of a down payment plus the one the user drove last.
///
/// Every mutation rewrites both fields, so `amount` and `percent` agree with
/// the house price they were last computed against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DownPayment {
    amount: f64,
    percent: f64,
    driver: DownPaymentField,
}

impl DownPayment {
    pub fn from_percent(house_price: f64, percent: f64) -> Self {
        Self {
            amount: amount_from_percent(house_price, percent),
            percent,
            driver: DownPaymentField::Percent,
        }
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }

    pub fn driver(&self) -> DownPaymentField {
        self.driver
    }

    pub fn set_percent(&mut self, house_price: f64, percent: f64) {
        self.percent = percent;
        self.amount = amount_from_percent(house_price, percent);
        self.driver = DownPaymentField::Percent;
    }

    pub fn set_amount(&mut self, house_price: f64, amount: f64) {
        self.amount = amount;
        self.percent = percent_from_amount(house_price, amount);
        self.driver = DownPaymentField::Amount;
    }

    /// Follows a house-price edit. The percent stays put and the amount
    /// moves, whichever field drove the last down-payment edit.
    pub fn rebase(&mut self, house_price: f64) {
        self.amount = amount_from_percent(house_price, self.percent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, proptest};

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn percent_is_zero_without_house_price() {
        assert_eq!(percent_from_amount(0.0, 50_000.0), 0.0);
        assert_eq!(percent_from_amount(0.0, 0.0), 0.0);
        assert!(percent_from_amount(-1.0, 10.0).is_finite());
    }

    #[test]
    fn editing_percent_moves_amount() {
        let mut dp = DownPayment::from_percent(400_000.0, 20.0);
        assert_approx(dp.amount(), 80_000.0);

        dp.set_percent(400_000.0, 25.0);
        assert_approx(dp.amount(), 100_000.0);
        assert_eq!(dp.driver(), DownPaymentField::Percent);
    }

    #[test]
    fn editing_amount_moves_percent() {
        let mut dp = DownPayment::from_percent(400_000.0, 20.0);
        dp.set_amount(400_000.0, 60_000.0);
        assert_approx(dp.percent(), 15.0);
        assert_eq!(dp.driver(), DownPaymentField::Amount);
    }

    #[test]
    fn house_price_edit_keeps_percent_after_amount_edit() {
        let mut dp = DownPayment::from_percent(400_000.0, 20.0);
        dp.set_amount(400_000.0, 100_000.0);
        dp.rebase(500_000.0);

        assert_approx(dp.percent(), 25.0);
        assert_approx(dp.amount(), 125_000.0);
        assert_eq!(dp.driver(), DownPaymentField::Amount);
    }

    #[test]
    fn amount_entered_without_price_is_lost_on_rebase() {
        let mut dp = DownPayment::from_percent(0.0, 0.0);
        dp.set_amount(0.0, 30_000.0);
        assert_eq!(dp.percent(), 0.0);

        dp.rebase(300_000.0);
        assert_eq!(dp.amount(), 0.0);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_percent_round_trips_through_amount(
            price_cents in 0u64..200_000_000,
            percent_bp in 0u32..10_001
        ) {
            let house_price = price_cents as f64 / 100.0;
            let percent = percent_bp as f64 / 100.0;
            let amount = amount_from_percent(house_price, percent);
            let back = percent_from_amount(house_price, amount);

            if house_price > 0.0 {
                prop_assert!((back - percent).abs() <= 1e-9);
            } else {
                prop_assert!(back == 0.0);
            }
        }
    }
}
