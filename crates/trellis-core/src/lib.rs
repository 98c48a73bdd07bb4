//! # Trellis Core
//!
//! Shared vocabulary for the Trellis pricing engines:
//!
//! - **Errors**: the [`PricingError`] taxonomy surfaced by every engine
//! - **Types**: option side, currency, time-stamped cash flows
//!
//! Times throughout Trellis are year fractions from the valuation date.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{PricingError, PricingResult};
    pub use crate::types::{CashFlow, CashFlowSchedule, CashFlowType, Currency, OptionType};
}

pub use error::{PricingError, PricingResult};
pub use types::{CashFlow, CashFlowSchedule, CashFlowType, Currency, OptionType};
