//! Pricing many independent options at once.
//!
//! Requests share nothing, so with the `parallel` feature they are spread
//! over the rayon thread pool. Results come back in request order.

use std::sync::Arc;

use crate::dividend::DividendFunctionProvider;
use crate::engine::{self, LatticeMarket};
use crate::function::OptionFunctionProvider;
use crate::greeks::LatticeGreeks;
use crate::specification::LatticeSpecification;
use trellis_core::PricingResult;

/// One option to price.
#[derive(Clone)]
pub struct PricingRequest {
    /// Lattice specification.
    pub specification: LatticeSpecification,
    /// Payoff and exercise policy.
    pub function: Arc<dyn OptionFunctionProvider>,
    /// Market inputs.
    pub market: LatticeMarket,
    /// Optional discrete dividends.
    pub dividends: Option<DividendFunctionProvider>,
}

impl PricingRequest {
    /// Request without discrete dividends.
    pub fn new(
        specification: LatticeSpecification,
        function: Arc<dyn OptionFunctionProvider>,
        market: LatticeMarket,
    ) -> Self {
        Self {
            specification,
            function,
            market,
            dividends: None,
        }
    }

    /// Adds discrete dividends.
    #[must_use]
    pub fn with_dividends(mut self, dividends: DividendFunctionProvider) -> Self {
        self.dividends = Some(dividends);
        self
    }

    /// Prices this request alone.
    pub fn price(&self) -> PricingResult<f64> {
        engine::price_with_dividends(
            &self.specification,
            self.function.as_ref(),
            &self.market,
            self.dividends.as_ref(),
        )
    }

    /// Greeks for this request alone.
    pub fn greeks(&self) -> PricingResult<LatticeGreeks> {
        engine::greeks_with_dividends(
            &self.specification,
            self.function.as_ref(),
            &self.market,
            self.dividends.as_ref(),
        )
    }
}

impl std::fmt::Debug for PricingRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PricingRequest")
            .field("specification", &self.specification)
            .field("option_type", &self.function.option_type())
            .field("strike", &self.function.strike())
            .field("steps", &self.function.steps())
            .field("market", &self.market)
            .field("dividends", &self.dividends)
            .finish()
    }
}

/// Prices every request. A failure in one request does not affect the others.
#[cfg(feature = "parallel")]
pub fn price_batch(requests: &[PricingRequest]) -> Vec<PricingResult<f64>> {
    use rayon::prelude::*;
    requests.par_iter().map(PricingRequest::price).collect()
}

/// Prices every request. A failure in one request does not affect the others.
#[cfg(not(feature = "parallel"))]
pub fn price_batch(requests: &[PricingRequest]) -> Vec<PricingResult<f64>> {
    requests.iter().map(PricingRequest::price).collect()
}

/// Greeks for every request.
#[cfg(feature = "parallel")]
pub fn greeks_batch(requests: &[PricingRequest]) -> Vec<PricingResult<LatticeGreeks>> {
    use rayon::prelude::*;
    requests.par_iter().map(PricingRequest::greeks).collect()
}

/// Greeks for every request.
#[cfg(not(feature = "parallel"))]
pub fn greeks_batch(requests: &[PricingRequest]) -> Vec<PricingResult<LatticeGreeks>> {
    requests.iter().map(PricingRequest::greeks).collect()
}
