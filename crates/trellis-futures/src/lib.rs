//! # Trellis Futures
//!
//! Bond futures pricing in the one-factor Hull-White model.
//!
//! This crate provides:
//!
//! - **Model**: piecewise-constant volatility parameters and the bond
//!   volatility and futures convexity functions
//! - **Instruments**: fixed coupon bonds and futures with a delivery basket
//! - **Method**: the futures price by numerical integration over the
//!   cheapest-to-deliver regions, and its issuer curve sensitivity
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use trellis_core::Currency;
//! use trellis_curves::{IssuerCurves, ZeroCurve};
//! use trellis_futures::prelude::*;
//!
//! let basket = vec![
//!     BondFuturesDeliverable::new(
//!         FixedCouponBond::regular("UST", Currency::USD, 0.05, 2, 0.0, 5.0).unwrap(),
//!         1.0,
//!     )
//!     .unwrap(),
//!     BondFuturesDeliverable::new(
//!         FixedCouponBond::regular("UST", Currency::USD, 0.02, 2, 0.0, 7.5).unwrap(),
//!         0.86,
//!     )
//!     .unwrap(),
//! ];
//! let futures =
//!     BondFuturesSecurity::new(0.24, 0.25, 0.25, 0.25, 0.26, 100_000.0, Currency::USD, basket)
//!         .unwrap();
//! let curves = IssuerCurves::new()
//!     .with_curve("UST", Arc::new(ZeroCurve::flat("USD-GOVT", 0.02).unwrap()));
//! let data = HullWhiteIssuerProviderDiscount::new(
//!     curves,
//!     HullWhiteOneFactorPiecewiseConstantParameters::constant(0.05, 0.01).unwrap(),
//! );
//!
//! let method = BondFuturesHullWhiteMethod::new();
//! let price = method.price(&futures, &data).unwrap();
//! let sensitivity = method.price_curve_sensitivity(&futures, &data).unwrap();
//! assert!(price > 0.0);
//! assert!(sensitivity.total("USD-GOVT") < 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::unreadable_literal)]

pub mod bond;
pub mod hull_white;
pub mod method;
pub mod provider;
pub mod security;
pub mod sensitivity;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bond::{CashFlowEquivalent, FixedCouponBond};
    pub use crate::hull_white::HullWhiteOneFactorPiecewiseConstantParameters;
    pub use crate::method::{BondFuturesHullWhiteMethod, IntegrationPartition};
    pub use crate::provider::{HullWhiteIssuerProvider, HullWhiteIssuerProviderDiscount};
    pub use crate::security::{BondFuturesDeliverable, BondFuturesSecurity};
    pub use crate::sensitivity::MulticurveSensitivity;
}

pub use method::BondFuturesHullWhiteMethod;
pub use security::{BondFuturesDeliverable, BondFuturesSecurity};
pub use sensitivity::MulticurveSensitivity;
