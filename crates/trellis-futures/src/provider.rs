//! Issuer curves bundled with Hull-White parameters.

use trellis_curves::{IssuerCurves, IssuerProvider, ParallelBump};

use crate::hull_white::HullWhiteOneFactorPiecewiseConstantParameters;

/// Market data needed by the Hull-White futures method.
pub trait HullWhiteIssuerProvider: Send + Sync {
    /// Issuer discount curves.
    fn issuer_provider(&self) -> &dyn IssuerProvider;

    /// Model parameters.
    fn hull_white_parameters(&self) -> &HullWhiteOneFactorPiecewiseConstantParameters;
}

/// [`HullWhiteIssuerProvider`] over an [`IssuerCurves`] map.
#[derive(Debug, Clone)]
pub struct HullWhiteIssuerProviderDiscount {
    curves: IssuerCurves,
    parameters: HullWhiteOneFactorPiecewiseConstantParameters,
}

impl HullWhiteIssuerProviderDiscount {
    /// Bundles curves and parameters.
    pub fn new(curves: IssuerCurves, parameters: HullWhiteOneFactorPiecewiseConstantParameters) -> Self {
        Self { curves, parameters }
    }

    /// The issuer curves.
    pub fn curves(&self) -> &IssuerCurves {
        &self.curves
    }

    /// A copy with every issuer curve shifted by `bump`.
    #[must_use]
    pub fn bumped(&self, bump: ParallelBump) -> Self {
        Self {
            curves: self.curves.bumped(bump),
            parameters: self.parameters.clone(),
        }
    }
}

impl HullWhiteIssuerProvider for HullWhiteIssuerProviderDiscount {
    fn issuer_provider(&self) -> &dyn IssuerProvider {
        &self.curves
    }

    fn hull_white_parameters(&self) -> &HullWhiteOneFactorPiecewiseConstantParameters {
        &self.parameters
    }
}
