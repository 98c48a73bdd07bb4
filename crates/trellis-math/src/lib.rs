//! # Trellis Math
//!
//! Numerical building blocks for the Trellis pricing engines.
//!
//! This crate provides:
//!
//! - **Solvers**: Ridder root-finding and outward bracket expansion
//! - **Distributions**: Standard normal density, CDF and inverse CDF
//! - **Interpolation**: Linear interpolation for curve construction
//!
//! All routines are pure functions of their inputs and safe to call from
//! several threads at once.

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
#![allow(clippy::unreadable_literal)]

pub mod distributions;
pub mod error;
pub mod interpolation;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::distributions::{normal_cdf, normal_inverse_cdf, normal_pdf};
    pub use crate::error::{MathError, MathResult};
    pub use crate::interpolation::{Extrapolation, Interpolator, LinearInterpolator};
    pub use crate::solvers::{
        bracket_root, ridder, BracketConfig, SolverConfig, SolverResult,
    };
}

pub use error::{MathError, MathResult};
