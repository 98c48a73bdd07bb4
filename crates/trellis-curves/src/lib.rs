//! # Trellis Curves
//!
//! Discount curves consumed by the pricing engines. Curve calibration is
//! out of scope: curves are built from already-known zero rates.
//!
//! - [`DiscountCurve`]: discount factor lookup by time
//! - [`ZeroCurve`]: continuously compounded zero rates, linear between nodes
//! - [`IssuerProvider`] / [`IssuerCurves`]: issuer name to curve mapping
//! - [`ParallelBump`]: zero-rate parallel shifts for finite-difference risk

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod bumping;
pub mod curves;
pub mod error;
pub mod issuer;
pub mod traits;

pub use bumping::{BumpedCurve, ParallelBump};
pub use curves::ZeroCurve;
pub use error::{CurveError, CurveResult};
pub use issuer::{IssuerCurves, IssuerProvider};
pub use traits::DiscountCurve;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bumping::ParallelBump;
    pub use crate::curves::ZeroCurve;
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::issuer::{IssuerCurves, IssuerProvider};
    pub use crate::traits::DiscountCurve;
}
