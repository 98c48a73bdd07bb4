//! Configured entry point to both engines.

use log::debug;
use trellis_config::{ConfigResult, EngineConfig, Validate};
use trellis_core::{OptionType, PricingResult};
use trellis_futures::prelude::{
    BondFuturesHullWhiteMethod, BondFuturesSecurity, HullWhiteIssuerProvider,
    MulticurveSensitivity,
};
use trellis_lattice::prelude::{
    greeks_with_dividends, price_with_dividends, DividendFunctionProvider, ExerciseStyle,
    LatticeGreeks, LatticeMarket, OptionFunctionProvider, VanillaOptionFunctionProvider,
};

/// Prices options and bond futures with the settings of an [`EngineConfig`].
///
/// # Example
///
/// ```rust
/// use trellis::prelude::*;
///
/// let pricer = Pricer::from_json_str(r#"{ "lattice": { "specification": "TIAN", "steps": 400 } }"#)
///     .unwrap();
/// let market = LatticeMarket::new(100.0, 1.0, 0.2, 0.05);
/// let put = pricer
///     .price_vanilla(100.0, OptionType::Put, ExerciseStyle::American, &market)
///     .unwrap();
/// assert!(put > 5.5 && put < 6.5);
/// ```
#[derive(Debug, Clone)]
pub struct Pricer {
    config: EngineConfig,
    futures_method: BondFuturesHullWhiteMethod,
}

impl Pricer {
    /// Validates `config` and builds the engines it describes.
    pub fn new(config: EngineConfig) -> ConfigResult<Self> {
        config.validate_or_error()?;
        debug!(
            "pricer '{}': {} lattice with {} steps, {} futures integration points",
            config.name,
            config.lattice.specification.name(),
            config.lattice.steps,
            config.futures.nb_points
        );
        let futures_method = config.futures.method();
        Ok(Self {
            config,
            futures_method,
        })
    }

    /// Pricer from a JSON configuration document.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        Self::new(EngineConfig::from_json_str(json)?)
    }

    /// Pricer from a TOML configuration document.
    pub fn from_toml_str(document: &str) -> ConfigResult<Self> {
        Self::new(EngineConfig::from_toml_str(document)?)
    }

    /// The configuration in use.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// A vanilla option on the configured number of steps.
    pub fn vanilla(
        &self,
        strike: f64,
        option_type: OptionType,
        exercise: ExerciseStyle,
    ) -> PricingResult<VanillaOptionFunctionProvider> {
        VanillaOptionFunctionProvider::new(strike, self.config.lattice.steps, option_type, exercise)
    }

    /// Price of any option function on the configured lattice.
    ///
    /// The number of steps comes from `function`.
    pub fn price_option(
        &self,
        function: &dyn OptionFunctionProvider,
        market: &LatticeMarket,
        dividends: Option<&DividendFunctionProvider>,
    ) -> PricingResult<f64> {
        price_with_dividends(&self.config.lattice.specification, function, market, dividends)
    }

    /// Greeks of any option function on the configured lattice.
    pub fn greeks_option(
        &self,
        function: &dyn OptionFunctionProvider,
        market: &LatticeMarket,
        dividends: Option<&DividendFunctionProvider>,
    ) -> PricingResult<LatticeGreeks> {
        greeks_with_dividends(&self.config.lattice.specification, function, market, dividends)
    }

    /// Price of a vanilla option.
    pub fn price_vanilla(
        &self,
        strike: f64,
        option_type: OptionType,
        exercise: ExerciseStyle,
        market: &LatticeMarket,
    ) -> PricingResult<f64> {
        let function = self.vanilla(strike, option_type, exercise)?;
        self.price_option(&function, market, None)
    }

    /// Greeks of a vanilla option.
    pub fn greeks_vanilla(
        &self,
        strike: f64,
        option_type: OptionType,
        exercise: ExerciseStyle,
        market: &LatticeMarket,
    ) -> PricingResult<LatticeGreeks> {
        let function = self.vanilla(strike, option_type, exercise)?;
        self.greeks_option(&function, market, None)
    }

    /// Bond futures price.
    pub fn price_futures(
        &self,
        futures: &BondFuturesSecurity,
        data: &dyn HullWhiteIssuerProvider,
    ) -> PricingResult<f64> {
        self.futures_method.price(futures, data)
    }

    /// Bond futures price sensitivity to the issuer curve.
    pub fn futures_curve_sensitivity(
        &self,
        futures: &BondFuturesSecurity,
        data: &dyn HullWhiteIssuerProvider,
    ) -> PricingResult<MulticurveSensitivity> {
        self.futures_method.price_curve_sensitivity(futures, data)
    }
}
