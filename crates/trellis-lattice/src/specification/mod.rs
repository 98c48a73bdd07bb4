//! Lattice specifications.
//!
//! A specification turns market inputs into one-step move factors and
//! probabilities. Every scheme is a pure function of its inputs; the set is
//! closed, so it is modelled as an enum rather than a trait object.
//!
//! | Scheme | Branching | Convergence |
//! |--------|-----------|-------------|
//! | Cox-Ross-Rubinstein | 2 | O(1/√n), oscillating |
//! | Jarrow-Rudd | 2 | O(1/√n) |
//! | Trigeorgis | 2 | O(1/√n) |
//! | Tian | 2 | O(1/√n) |
//! | Leisen-Reimer | 2 | O(1/n), odd steps only |
//! | Jabbour-Kramin-Young | 2 | O(1/√n) |
//! | Time-varying | 2 | O(1/√n) |
//! | CRR trinomial | 3 | O(1/√n) |
//! | Trigeorgis trinomial | 3 | O(1/√n) |

mod binomial;
mod strike_centred;
mod time_varying;
mod trinomial;

pub use time_varying::{TimeVaryingInputs, TimeVaryingParameters, TimeVaryingStep};

use log::debug;
use serde::{Deserialize, Serialize};
use trellis_core::error::{ensure_non_negative, ensure_positive};
use trellis_core::{PricingError, PricingResult};

/// Market inputs a specification needs to build one lattice step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecificationInputs {
    /// Spot price of the underlying.
    pub spot: f64,
    /// Option strike.
    pub strike: f64,
    /// Time to expiry in years.
    pub maturity: f64,
    /// Black volatility.
    pub volatility: f64,
    /// Continuously compounded interest rate.
    pub rate: f64,
    /// Continuous dividend yield.
    pub dividend_yield: f64,
    /// Number of time steps.
    pub steps: usize,
}

impl SpecificationInputs {
    /// Length of one time step.
    pub fn dt(&self) -> f64 {
        self.maturity / self.steps as f64
    }

    /// Cost of carry `r - q`.
    pub fn cost_of_carry(&self) -> f64 {
        self.rate - self.dividend_yield
    }

    fn validate(&self) -> PricingResult<()> {
        ensure_positive("spot", self.spot)?;
        ensure_positive("strike", self.strike)?;
        ensure_positive("maturity", self.maturity)?;
        ensure_non_negative("volatility", self.volatility)?;
        if !self.rate.is_finite() || !self.dividend_yield.is_finite() {
            return Err(PricingError::invalid_parameter(
                "rate",
                "rate and dividend yield must be finite",
            ));
        }
        if self.steps < 1 {
            return Err(PricingError::invalid_parameter(
                "steps",
                "at least one step is required",
            ));
        }
        Ok(())
    }
}

/// One binomial step: `S -> S*up` with probability `prob_up`, else `S*down`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinomialParameters {
    /// Up move factor.
    pub up: f64,
    /// Down move factor.
    pub down: f64,
    /// Probability of the up move.
    pub prob_up: f64,
    /// Step length in years.
    pub dt: f64,
}

impl BinomialParameters {
    /// Probability of the down move.
    pub fn prob_down(&self) -> f64 {
        1.0 - self.prob_up
    }

    /// Expected one-step growth of the underlying.
    pub fn expected_growth(&self) -> f64 {
        self.prob_up * self.up + self.prob_down() * self.down
    }
}

/// One trinomial step with up, middle and down moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrinomialParameters {
    /// Up move factor.
    pub up: f64,
    /// Middle move factor.
    pub middle: f64,
    /// Down move factor.
    pub down: f64,
    /// Probability of the up move.
    pub prob_up: f64,
    /// Probability of the middle move.
    pub prob_middle: f64,
    /// Probability of the down move.
    pub prob_down: f64,
    /// Step length in years.
    pub dt: f64,
}

impl TrinomialParameters {
    /// Expected one-step growth of the underlying.
    pub fn expected_growth(&self) -> f64 {
        self.prob_up * self.up + self.prob_middle * self.middle + self.prob_down * self.down
    }
}

/// Per-step parameters produced by a specification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LatticeParameters {
    /// Two-branch step.
    Binomial(BinomialParameters),
    /// Three-branch step.
    Trinomial(TrinomialParameters),
}

/// The lattice parameterisation schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LatticeSpecification {
    /// Cox-Ross-Rubinstein: `u = exp(σ√Δt)`, `d = 1/u`.
    CoxRossRubinstein,
    /// Jarrow-Rudd: tree centred on the log drift.
    JarrowRudd,
    /// Trigeorgis: log-space mean and variance matching.
    Trigeorgis,
    /// Tian: first three moments matched.
    Tian,
    /// Leisen-Reimer: Peizer-Pratt inversion at the strike.
    LeisenReimer,
    /// Jabbour-Kramin-Young: normal-approximation inversion at the strike.
    JabbourKraminYoung,
    /// Clewlow-Strickland tree with per-step volatility, rate and dividend.
    TimeVarying,
    /// Boyle-style trinomial built from two half-step CRR moves.
    CrrTrinomial,
    /// Clewlow-Strickland trinomial with `dx = σ√(3Δt)`.
    TrigeorgisTrinomial,
}

impl LatticeSpecification {
    /// Every specification, binomial schemes first.
    pub const ALL: [LatticeSpecification; 9] = [
        LatticeSpecification::CoxRossRubinstein,
        LatticeSpecification::JarrowRudd,
        LatticeSpecification::Trigeorgis,
        LatticeSpecification::Tian,
        LatticeSpecification::LeisenReimer,
        LatticeSpecification::JabbourKraminYoung,
        LatticeSpecification::TimeVarying,
        LatticeSpecification::CrrTrinomial,
        LatticeSpecification::TrigeorgisTrinomial,
    ];

    /// Short display name.
    pub fn name(&self) -> &'static str {
        match self {
            LatticeSpecification::CoxRossRubinstein => "CRR",
            LatticeSpecification::JarrowRudd => "Jarrow-Rudd",
            LatticeSpecification::Trigeorgis => "Trigeorgis",
            LatticeSpecification::Tian => "Tian",
            LatticeSpecification::LeisenReimer => "Leisen-Reimer",
            LatticeSpecification::JabbourKraminYoung => "Jabbour-Kramin-Young",
            LatticeSpecification::TimeVarying => "Time-varying",
            LatticeSpecification::CrrTrinomial => "CRR trinomial",
            LatticeSpecification::TrigeorgisTrinomial => "Trigeorgis trinomial",
        }
    }

    /// True for three-branch schemes.
    pub fn is_trinomial(&self) -> bool {
        matches!(
            self,
            LatticeSpecification::CrrTrinomial | LatticeSpecification::TrigeorgisTrinomial
        )
    }

    /// True when the scheme only works with an odd number of steps.
    pub fn requires_odd_steps(&self) -> bool {
        matches!(self, LatticeSpecification::LeisenReimer)
    }

    /// True when the scheme's move factors keep expected growth at
    /// `exp((r - q)Δt)` exactly. Log-moment matching schemes only do so
    /// to first order in `Δt`.
    pub fn is_exactly_risk_neutral(&self) -> bool {
        !matches!(
            self,
            LatticeSpecification::Trigeorgis
                | LatticeSpecification::TimeVarying
                | LatticeSpecification::TrigeorgisTrinomial
        )
    }

    /// Computes the step parameters for `inputs`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidParameter`] for out-of-domain inputs,
    /// for even steps with Leisen-Reimer, and whenever the resulting
    /// probabilities leave `[0, 1]`.
    pub fn parameters(&self, inputs: &SpecificationInputs) -> PricingResult<LatticeParameters> {
        inputs.validate()?;
        if self.requires_odd_steps() && inputs.steps % 2 == 0 {
            return Err(PricingError::invalid_parameter(
                "steps",
                format!("{} needs an odd number of steps, got {}", self.name(), inputs.steps),
            ));
        }

        let parameters = match self {
            LatticeSpecification::CoxRossRubinstein => {
                LatticeParameters::Binomial(binomial::cox_ross_rubinstein(inputs))
            }
            LatticeSpecification::JarrowRudd => {
                LatticeParameters::Binomial(binomial::jarrow_rudd(inputs))
            }
            LatticeSpecification::Trigeorgis | LatticeSpecification::TimeVarying => {
                LatticeParameters::Binomial(binomial::trigeorgis(inputs))
            }
            LatticeSpecification::Tian => LatticeParameters::Binomial(binomial::tian(inputs)),
            LatticeSpecification::LeisenReimer => {
                LatticeParameters::Binomial(strike_centred::leisen_reimer(inputs)?)
            }
            LatticeSpecification::JabbourKraminYoung => {
                LatticeParameters::Binomial(strike_centred::jabbour_kramin_young(inputs)?)
            }
            LatticeSpecification::CrrTrinomial => {
                LatticeParameters::Trinomial(trinomial::crr_trinomial(inputs))
            }
            LatticeSpecification::TrigeorgisTrinomial => {
                LatticeParameters::Trinomial(trinomial::trigeorgis_trinomial(inputs))
            }
        };

        check_parameters(self, &parameters)?;
        debug!("{} lattice over {} steps: {:?}", self.name(), inputs.steps, parameters);
        Ok(parameters)
    }

    /// Per-step parameters for time-dependent inputs.
    ///
    /// Only [`LatticeSpecification::TimeVarying`] accepts per-step arrays.
    pub fn time_varying_parameters(
        &self,
        inputs: &TimeVaryingInputs,
        maturity: f64,
        steps: usize,
    ) -> PricingResult<TimeVaryingParameters> {
        if *self != LatticeSpecification::TimeVarying {
            return Err(PricingError::unsupported(format!(
                "per-step inputs on a {} lattice",
                self.name()
            )));
        }
        time_varying::parameters(inputs, maturity, steps)
    }
}

impl std::fmt::Display for LatticeSpecification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

pub(crate) fn check_probability(name: &str, p: f64) -> PricingResult<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(PricingError::invalid_parameter(
            name,
            format!("probability {p} outside [0, 1]"),
        ))
    }
}

fn check_parameters(
    specification: &LatticeSpecification,
    parameters: &LatticeParameters,
) -> PricingResult<()> {
    let (up, down) = match parameters {
        LatticeParameters::Binomial(p) => {
            check_probability("prob_up", p.prob_up)?;
            (p.up, p.down)
        }
        LatticeParameters::Trinomial(p) => {
            check_probability("prob_up", p.prob_up)?;
            check_probability("prob_middle", p.prob_middle)?;
            check_probability("prob_down", p.prob_down)?;
            (p.up, p.down)
        }
    };
    if !(up > down && down > 0.0 && up.is_finite()) {
        return Err(PricingError::invalid_parameter(
            "volatility",
            format!(
                "{} produced degenerate moves up={up}, down={down}",
                specification.name()
            ),
        ));
    }
    Ok(())
}
