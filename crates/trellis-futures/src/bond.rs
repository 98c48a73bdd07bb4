//! Deliverable bonds.

use trellis_core::error::ensure_positive;
use trellis_core::{CashFlow, CashFlowSchedule, Currency, PricingError, PricingResult};

/// Deterministic cash flows a bond pays after settlement.
///
/// Floating or optional instruments would map their legs to equivalent
/// fixed amounts here; fixed coupons are already in that form.
pub trait CashFlowEquivalent {
    /// Payments strictly after `settlement_time`, sorted by time.
    fn cash_flow_equivalent(&self, settlement_time: f64) -> CashFlowSchedule;
}

/// Bullet bond paying fixed coupons per unit of notional.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedCouponBond {
    issuer: String,
    currency: Currency,
    accrual_start: f64,
    coupon_times: Vec<f64>,
    coupon_amounts: Vec<f64>,
}

impl FixedCouponBond {
    /// Creates a bond from its coupon schedule. The principal of one is
    /// repaid with the last coupon.
    ///
    /// # Errors
    ///
    /// Fails for an empty schedule, mismatched lengths, negative coupons,
    /// or payment times that do not increase strictly after `accrual_start`.
    pub fn new(
        issuer: impl Into<String>,
        currency: Currency,
        accrual_start: f64,
        coupon_times: Vec<f64>,
        coupon_amounts: Vec<f64>,
    ) -> PricingResult<Self> {
        if coupon_times.is_empty() {
            return Err(PricingError::invalid_parameter(
                "coupon_times",
                "a bond needs at least one payment",
            ));
        }
        if coupon_times.len() != coupon_amounts.len() {
            return Err(PricingError::invalid_parameter(
                "coupon_amounts",
                format!(
                    "{} times but {} amounts",
                    coupon_times.len(),
                    coupon_amounts.len()
                ),
            ));
        }
        if coupon_amounts.iter().any(|c| !(c.is_finite() && *c >= 0.0)) {
            return Err(PricingError::invalid_parameter(
                "coupon_amounts",
                "coupons must be non-negative",
            ));
        }
        let mut previous = accrual_start;
        for &t in &coupon_times {
            if t <= previous {
                return Err(PricingError::invalid_parameter(
                    "coupon_times",
                    "payment times must increase strictly after the accrual start",
                ));
            }
            previous = t;
        }
        Ok(Self {
            issuer: issuer.into(),
            currency,
            accrual_start,
            coupon_times,
            coupon_amounts,
        })
    }

    /// Regular schedule of `frequency` equal coupons a year from
    /// `accrual_start` to `maturity`.
    ///
    /// ```rust
    /// use trellis_core::Currency;
    /// use trellis_futures::bond::FixedCouponBond;
    ///
    /// let bond = FixedCouponBond::regular("UST", Currency::USD, 0.05, 2, 0.0, 5.0).unwrap();
    /// assert_eq!(bond.coupon_times().len(), 10);
    /// assert!((bond.accrued_interest(0.26) - 0.013).abs() < 1e-12);
    /// ```
    pub fn regular(
        issuer: impl Into<String>,
        currency: Currency,
        coupon_rate: f64,
        frequency: u32,
        accrual_start: f64,
        maturity: f64,
    ) -> PricingResult<Self> {
        if frequency == 0 {
            return Err(PricingError::invalid_parameter(
                "frequency",
                "at least one coupon a year is required",
            ));
        }
        ensure_positive("maturity", maturity - accrual_start)?;
        let per_year = f64::from(frequency);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let periods = (((maturity - accrual_start) * per_year).round() as usize).max(1);

        let mut coupon_times: Vec<f64> = (1..=periods)
            .map(|k| accrual_start + k as f64 / per_year)
            .collect();
        if let Some(last) = coupon_times.last_mut() {
            *last = maturity;
        }
        let coupon_amounts = vec![coupon_rate / per_year; periods];
        Self::new(issuer, currency, accrual_start, coupon_times, coupon_amounts)
    }

    /// Issuer whose curve discounts the bond.
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Currency of payment.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Final payment time.
    pub fn maturity(&self) -> f64 {
        self.coupon_times[self.coupon_times.len() - 1]
    }

    /// Coupon payment times.
    pub fn coupon_times(&self) -> &[f64] {
        &self.coupon_times
    }

    /// Coupon amounts per unit notional.
    pub fn coupon_amounts(&self) -> &[f64] {
        &self.coupon_amounts
    }

    /// Interest accrued in the running period at `settlement_time`, linear in time.
    pub fn accrued_interest(&self, settlement_time: f64) -> f64 {
        if settlement_time <= self.accrual_start {
            return 0.0;
        }
        let next = self.coupon_times.partition_point(|&t| t <= settlement_time);
        if next == self.coupon_times.len() {
            return 0.0;
        }
        let period_start = if next == 0 {
            self.accrual_start
        } else {
            self.coupon_times[next - 1]
        };
        self.coupon_amounts[next] * (settlement_time - period_start)
            / (self.coupon_times[next] - period_start)
    }

    /// Every payment of the bond, principal included.
    pub fn schedule(&self) -> CashFlowSchedule {
        let last = self.coupon_times.len() - 1;
        self.coupon_times
            .iter()
            .zip(&self.coupon_amounts)
            .enumerate()
            .map(|(i, (&t, &c))| {
                if i == last {
                    CashFlow::final_payment(t, c, 1.0)
                } else {
                    CashFlow::coupon(t, c)
                }
            })
            .collect()
    }
}

impl CashFlowEquivalent for FixedCouponBond {
    fn cash_flow_equivalent(&self, settlement_time: f64) -> CashFlowSchedule {
        self.schedule().after(settlement_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_regular_schedule() {
        let bond = FixedCouponBond::regular("UST", Currency::USD, 0.02, 2, 0.0, 7.5).unwrap();
        assert_eq!(bond.coupon_times().len(), 15);
        assert_eq!(bond.maturity(), 7.5);
        assert_relative_eq!(bond.coupon_amounts()[0], 0.01);
        assert_relative_eq!(bond.schedule().total(), 1.15, epsilon = 1e-12);
    }

    #[test]
    fn test_cash_flow_equivalent_after_delivery() {
        let bond = FixedCouponBond::regular("UST", Currency::USD, 0.05, 2, 0.0, 5.0).unwrap();
        let flows = bond.cash_flow_equivalent(0.26);
        assert_eq!(flows.len(), 10);
        let flows = bond.cash_flow_equivalent(0.5);
        assert_eq!(flows.len(), 9);
        let last = flows.as_slice()[8];
        assert_eq!(last.time, 5.0);
        assert_relative_eq!(last.amount, 1.025);
    }

    #[test]
    fn test_accrued_interest() {
        let bond = FixedCouponBond::regular("UST", Currency::USD, 0.06, 2, 0.0, 3.0).unwrap();
        assert_eq!(bond.accrued_interest(0.0), 0.0);
        assert_relative_eq!(bond.accrued_interest(0.25), 0.015, epsilon = 1e-15);
        assert_relative_eq!(bond.accrued_interest(0.75), 0.015, epsilon = 1e-15);
        assert_eq!(bond.accrued_interest(1.0), 0.0);
        assert_eq!(bond.accrued_interest(3.5), 0.0);
    }

    #[test]
    fn test_invalid_schedule() {
        assert!(FixedCouponBond::new("X", Currency::EUR, 0.0, vec![], vec![]).is_err());
        assert!(FixedCouponBond::new("X", Currency::EUR, 0.0, vec![1.0, 0.5], vec![0.01, 0.01]).is_err());
        assert!(FixedCouponBond::new("X", Currency::EUR, 1.0, vec![1.0], vec![0.01]).is_err());
        assert!(FixedCouponBond::regular("X", Currency::EUR, 0.03, 0, 0.0, 2.0).is_err());
    }
}
