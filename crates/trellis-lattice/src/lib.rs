//! # Trellis Lattice
//!
//! Binomial and trinomial lattice pricing for options on a single
//! underlying, and a binomial lattice for options on two.
//!
//! This crate provides:
//!
//! - **Specifications**: Cox-Ross-Rubinstein, Jarrow-Rudd, Trigeorgis,
//!   Tian, Leisen-Reimer, Jabbour-Kramin-Young, time-varying and two
//!   trinomial schemes
//! - **Option functions**: vanilla, knock-out barrier and digital payoffs
//!   with European, American or Bermudan exercise
//! - **Dividends**: discrete cash and proportional payments
//! - **Engine**: backward induction with delta, gamma and theta read off
//!   the early nodes
//! - **Two assets**: correlated binomial lattice with a spread option
//!   payoff, price and cross greeks
//! - **Batch pricing**: many requests at once, on rayon with the
//!   `parallel` feature
//!
//! ## Quick Start
//!
//! ```rust
//! use trellis_core::OptionType;
//! use trellis_lattice::prelude::*;
//!
//! let put = VanillaOptionFunctionProvider::american(100.0, 201, OptionType::Put).unwrap();
//! let market = LatticeMarket::new(100.0, 1.0, 0.2, 0.05);
//! let greeks = greeks(&LatticeSpecification::LeisenReimer, &put, &market).unwrap();
//! assert!(greeks.delta < 0.0 && greeks.gamma > 0.0);
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
#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::unreadable_literal)]

pub mod analytic;
pub mod batch;
pub mod dividend;
pub mod engine;
pub mod function;
pub mod greeks;
pub mod specification;
pub mod tree;
pub mod two_asset;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analytic::black_scholes_price;
    pub use crate::batch::{greeks_batch, price_batch, PricingRequest};
    pub use crate::dividend::{DividendFunctionProvider, DividendSchedule};
    pub use crate::engine::{
        greeks, greeks_time_varying, greeks_with_dividends, price, price_time_varying,
        price_with_dividends, LatticeMarket,
    };
    pub use crate::function::{
        knock_in_price, BarrierOptionFunctionProvider, BarrierType, DigitalOptionFunctionProvider,
        EuropeanSpreadOptionFunctionProvider, ExerciseStyle, OptionFunctionProvider,
        OptionFunctionProvider2D, VanillaOptionFunctionProvider,
    };
    pub use crate::greeks::LatticeGreeks;
    pub use crate::specification::{LatticeSpecification, TimeVaryingInputs};
    pub use crate::tree::LatticeTree;
    pub use crate::two_asset::{greeks_two_asset, price_two_asset, TwoAssetGreeks, TwoAssetMarket};
}

pub use engine::LatticeMarket;
pub use greeks::LatticeGreeks;
pub use specification::LatticeSpecification;
pub use two_asset::TwoAssetMarket;
