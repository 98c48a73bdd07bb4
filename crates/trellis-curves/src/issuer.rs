//! Issuer-specific discounting.

use std::collections::HashMap;
use std::sync::Arc;

use crate::bumping::ParallelBump;
use crate::error::{CurveError, CurveResult};
use crate::traits::DiscountCurve;

/// Discount factor lookup by issuer.
pub trait IssuerProvider: Send + Sync {
    /// Curve used to discount the issuer's cash flows.
    fn issuer_curve(&self, issuer: &str) -> CurveResult<&dyn DiscountCurve>;

    /// Discount factor for the issuer to time `t`.
    fn issuer_discount_factor(&self, issuer: &str, t: f64) -> CurveResult<f64> {
        self.issuer_curve(issuer)?.discount_factor(t)
    }

    /// Name of the issuer's curve.
    fn issuer_curve_name(&self, issuer: &str) -> CurveResult<String> {
        Ok(self.issuer_curve(issuer)?.name().to_string())
    }
}

/// Map from issuer to its discount curve.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use trellis_curves::{IssuerCurves, IssuerProvider, ZeroCurve};
///
/// let curves = IssuerCurves::new()
///     .with_curve("DE-GOVT", Arc::new(ZeroCurve::flat("EUR-BUND", 0.02).unwrap()));
/// assert_eq!(curves.issuer_curve_name("DE-GOVT").unwrap(), "EUR-BUND");
/// assert!(curves.issuer_discount_factor("FR-GOVT", 1.0).is_err());
/// ```
#[derive(Clone, Default)]
pub struct IssuerCurves {
    curves: HashMap<String, Arc<dyn DiscountCurve>>,
}

impl IssuerCurves {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the curve for an issuer, replacing any previous one.
    #[must_use]
    pub fn with_curve(mut self, issuer: impl Into<String>, curve: Arc<dyn DiscountCurve>) -> Self {
        self.insert(issuer, curve);
        self
    }

    /// Registers the curve for an issuer, replacing any previous one.
    pub fn insert(&mut self, issuer: impl Into<String>, curve: Arc<dyn DiscountCurve>) {
        self.curves.insert(issuer.into(), curve);
    }

    /// Number of issuers.
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// True when no issuer is registered.
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// A copy with every curve shifted by `bump`.
    #[must_use]
    pub fn bumped(&self, bump: ParallelBump) -> Self {
        let curves = self
            .curves
            .iter()
            .map(|(issuer, curve)| {
                let shifted: Arc<dyn DiscountCurve> = Arc::new(bump.apply(Arc::clone(curve)));
                (issuer.clone(), shifted)
            })
            .collect();
        Self { curves }
    }
}

impl std::fmt::Debug for IssuerCurves {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut entries: Vec<_> = self
            .curves
            .iter()
            .map(|(issuer, curve)| (issuer.as_str(), curve.name()))
            .collect();
        entries.sort_unstable();
        f.debug_struct("IssuerCurves")
            .field("curves", &entries)
            .finish()
    }
}

impl IssuerProvider for IssuerCurves {
    fn issuer_curve(&self, issuer: &str) -> CurveResult<&dyn DiscountCurve> {
        self.curves
            .get(issuer)
            .map(|curve| curve.as_ref())
            .ok_or_else(|| CurveError::CurveNotFound {
                issuer: issuer.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::ZeroCurve;
    use approx::assert_relative_eq;

    #[test]
    fn test_lookup_and_bump() {
        let curves = IssuerCurves::new()
            .with_curve("UST", Arc::new(ZeroCurve::flat("USD-GOVT", 0.04).unwrap()));
        let bumped = curves.bumped(ParallelBump::new(10.0));

        let base = curves.issuer_discount_factor("UST", 2.0).unwrap();
        let shifted = bumped.issuer_discount_factor("UST", 2.0).unwrap();
        assert_relative_eq!(shifted, base * (-0.001_f64 * 2.0).exp(), epsilon = 1e-15);
        assert_eq!(bumped.issuer_curve_name("UST").unwrap(), "USD-GOVT");
    }

    #[test]
    fn test_missing_issuer() {
        let curves = IssuerCurves::new();
        assert!(matches!(
            curves.issuer_curve("X"),
            Err(CurveError::CurveNotFound { .. })
        ));
    }
}
