//! Domain types shared across engines.

mod cashflow;
mod currency;
mod option;

pub use cashflow::{CashFlow, CashFlowSchedule, CashFlowType};
pub use currency::Currency;
pub use option::OptionType;
