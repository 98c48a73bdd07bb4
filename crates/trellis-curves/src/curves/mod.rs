//! Concrete curve implementations.

mod zero;

pub use zero::ZeroCurve;
