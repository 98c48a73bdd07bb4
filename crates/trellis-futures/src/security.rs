//! Bond futures contract description.

use trellis_core::error::ensure_positive;
use trellis_core::{Currency, PricingError, PricingResult};

use crate::bond::FixedCouponBond;

/// A bond eligible for delivery and its conversion factor.
#[derive(Debug, Clone, PartialEq)]
pub struct BondFuturesDeliverable {
    /// The deliverable bond.
    pub bond: FixedCouponBond,
    /// Invoice multiplier applied to the futures price.
    pub conversion_factor: f64,
}

impl BondFuturesDeliverable {
    /// Pairs a bond with its conversion factor.
    pub fn new(bond: FixedCouponBond, conversion_factor: f64) -> PricingResult<Self> {
        ensure_positive("conversion_factor", conversion_factor)?;
        Ok(Self {
            bond,
            conversion_factor,
        })
    }
}

/// Bond futures contract, times in years from valuation.
///
/// Pricing treats the last notice time as the end of daily margining and
/// the last delivery time as the delivery date.
#[derive(Debug, Clone, PartialEq)]
pub struct BondFuturesSecurity {
    last_trading_time: f64,
    first_notice_time: f64,
    last_notice_time: f64,
    first_delivery_time: f64,
    last_delivery_time: f64,
    notional: f64,
    currency: Currency,
    basket: Vec<BondFuturesDeliverable>,
}

impl BondFuturesSecurity {
    /// Creates a contract.
    ///
    /// An empty basket is accepted here and rejected when pricing.
    ///
    /// # Errors
    ///
    /// Fails for a non-positive notional, when the notice window is not
    /// ordered, when delivery starts before the first notice, when a basket
    /// bond is paid in another currency, or when the basket mixes issuers.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        last_trading_time: f64,
        first_notice_time: f64,
        last_notice_time: f64,
        first_delivery_time: f64,
        last_delivery_time: f64,
        notional: f64,
        currency: Currency,
        basket: Vec<BondFuturesDeliverable>,
    ) -> PricingResult<Self> {
        ensure_positive("notional", notional)?;
        let ordered = first_notice_time <= last_notice_time
            && first_delivery_time <= last_delivery_time
            && first_notice_time <= first_delivery_time
            && last_notice_time <= last_delivery_time
            && last_trading_time <= last_delivery_time;
        if !ordered {
            return Err(PricingError::invalid_parameter(
                "delivery_times",
                "notice and delivery windows are out of order",
            ));
        }
        if let Some(other) = basket.iter().find(|d| d.bond.currency() != currency) {
            return Err(PricingError::invalid_parameter(
                "basket",
                format!(
                    "bond of {} pays {}, contract is in {currency}",
                    other.bond.issuer(),
                    other.bond.currency()
                ),
            ));
        }
        if let Some(first) = basket.first() {
            let issuer = first.bond.issuer();
            if let Some(other) = basket.iter().find(|d| d.bond.issuer() != issuer) {
                return Err(PricingError::invalid_parameter(
                    "basket",
                    format!(
                        "basket mixes issuers {issuer} and {}",
                        other.bond.issuer()
                    ),
                ));
            }
        }
        Ok(Self {
            last_trading_time,
            first_notice_time,
            last_notice_time,
            first_delivery_time,
            last_delivery_time,
            notional,
            currency,
            basket,
        })
    }

    /// Last trading time.
    pub fn last_trading_time(&self) -> f64 {
        self.last_trading_time
    }

    /// First notice time.
    pub fn first_notice_time(&self) -> f64 {
        self.first_notice_time
    }

    /// Last notice time, the expiry used for convexity.
    pub fn last_notice_time(&self) -> f64 {
        self.last_notice_time
    }

    /// First delivery time.
    pub fn first_delivery_time(&self) -> f64 {
        self.first_delivery_time
    }

    /// Last delivery time, the delivery used for pricing.
    pub fn last_delivery_time(&self) -> f64 {
        self.last_delivery_time
    }

    /// Contract notional.
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Contract currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Deliverable bonds.
    pub fn basket(&self) -> &[BondFuturesDeliverable] {
        &self.basket
    }
}
