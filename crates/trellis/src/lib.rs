//! # Trellis
//!
//! Option pricing on binomial and trinomial lattices and bond futures
//! pricing in the Hull-White model.
//!
//! This crate re-exports the public API of the `trellis-*` crates:
//!
//! - [`core`]: errors, option side, currencies, cash flows
//! - [`math`]: root finding and normal distribution helpers
//! - [`curves`]: discount curves by issuer and parallel bumps
//! - [`lattice`]: lattice specifications, option functions and the engine
//! - [`futures`]: bond futures under Hull-White with curve sensitivities
//! - [`config`]: JSON and TOML settings for both engines
//!
//! and adds a [`Pricer`] driven by an [`EngineConfig`](config::EngineConfig).
//!
//! ## Quick Start
//!
//! ```rust
//! use trellis::prelude::*;
//!
//! let pricer = Pricer::new(EngineConfig::default()).unwrap();
//! let market = LatticeMarket::new(100.0, 0.5, 0.25, 0.03);
//! let greeks = pricer
//!     .greeks_vanilla(95.0, OptionType::Put, ExerciseStyle::American, &market)
//!     .unwrap();
//! assert!(greeks.price > 0.0 && greeks.delta < 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub use trellis_config as config;
pub use trellis_core as core;
pub use trellis_curves as curves;
pub use trellis_futures as futures;
pub use trellis_lattice as lattice;
pub use trellis_math as math;

pub mod pricer;

pub use pricer::Pricer;
pub use trellis_core::{PricingError, PricingResult};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::pricer::Pricer;
    pub use trellis_config::prelude::*;
    pub use trellis_core::prelude::*;
    pub use trellis_curves::prelude::*;
    pub use trellis_futures::prelude::*;
    pub use trellis_lattice::prelude::*;
}
