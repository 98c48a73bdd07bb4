//! Time-stamped cash flows.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of cash flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CashFlowType {
    /// Regular coupon payment
    Coupon,
    /// Principal repayment at maturity
    Principal,
    /// Combined coupon and principal (final payment)
    CouponAndPrincipal,
}

impl fmt::Display for CashFlowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CashFlowType::Coupon => "Coupon",
            CashFlowType::Principal => "Principal",
            CashFlowType::CouponAndPrincipal => "Coupon+Principal",
        };
        write!(f, "{s}")
    }
}

/// A single payment at a time expressed as a year fraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    /// Payment time in years.
    pub time: f64,
    /// Payment amount.
    pub amount: f64,
    /// Kind of payment.
    pub cf_type: CashFlowType,
}

impl CashFlow {
    /// Creates a new cash flow.
    #[must_use]
    pub fn new(time: f64, amount: f64, cf_type: CashFlowType) -> Self {
        Self {
            time,
            amount,
            cf_type,
        }
    }

    /// Creates a coupon cash flow.
    #[must_use]
    pub fn coupon(time: f64, amount: f64) -> Self {
        Self::new(time, amount, CashFlowType::Coupon)
    }

    /// Creates a principal cash flow.
    #[must_use]
    pub fn principal(time: f64, amount: f64) -> Self {
        Self::new(time, amount, CashFlowType::Principal)
    }

    /// Creates the final coupon-plus-principal cash flow.
    #[must_use]
    pub fn final_payment(time: f64, coupon: f64, principal: f64) -> Self {
        Self::new(time, coupon + principal, CashFlowType::CouponAndPrincipal)
    }
}

impl fmt::Display for CashFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}y: {} ({})", self.time, self.amount, self.cf_type)
    }
}

/// An ordered schedule of cash flows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashFlowSchedule {
    cash_flows: Vec<CashFlow>,
}

impl CashFlowSchedule {
    /// Creates a new empty cash flow schedule.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cash_flows: Vec::new(),
        }
    }

    /// Adds a cash flow to the schedule.
    pub fn push(&mut self, cf: CashFlow) {
        self.cash_flows.push(cf);
    }

    /// Returns the cash flows as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[CashFlow] {
        &self.cash_flows
    }

    /// Returns the number of cash flows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cash_flows.len()
    }

    /// Returns true if there are no cash flows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cash_flows.is_empty()
    }

    /// Returns an iterator over the cash flows.
    pub fn iter(&self) -> impl Iterator<Item = &CashFlow> {
        self.cash_flows.iter()
    }

    /// Returns the undiscounted total.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.cash_flows.iter().map(|cf| cf.amount).sum()
    }

    /// Sorts cash flows by time.
    pub fn sort_by_time(&mut self) {
        self.cash_flows.sort_by(|a, b| a.time.total_cmp(&b.time));
    }

    /// Cash flows paid strictly after `time`.
    #[must_use]
    pub fn after(&self, time: f64) -> Self {
        Self {
            cash_flows: self
                .cash_flows
                .iter()
                .filter(|cf| cf.time > time)
                .copied()
                .collect(),
        }
    }
}

impl FromIterator<CashFlow> for CashFlowSchedule {
    fn from_iter<I: IntoIterator<Item = CashFlow>>(iter: I) -> Self {
        Self {
            cash_flows: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for CashFlowSchedule {
    type Item = CashFlow;
    type IntoIter = std::vec::IntoIter<CashFlow>;

    fn into_iter(self) -> Self::IntoIter {
        self.cash_flows.into_iter()
    }
}

impl<'a> IntoIterator for &'a CashFlowSchedule {
    type Item = &'a CashFlow;
    type IntoIter = std::slice::Iter<'a, CashFlow>;

    fn into_iter(self) -> Self::IntoIter {
        self.cash_flows.iter()
    }
}
