//! Triangular lattice storage.
//!
//! Node values live in one flat vector per quantity, step by step:
//!
//! ```text
//! binomial:  step i has i + 1 nodes,  offset(i) = i (i + 1) / 2
//! trinomial: step i has 2i + 1 nodes, offset(i) = i²
//! ```
//!
//! Node `j` is the node reached by `j` up moves (binomial) or by a net
//! `j - i` up moves (trinomial), so larger `j` means a higher price.
//! A tree is built fresh for each pricing call and dropped with it.

/// Number of branches out of each node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branching {
    /// Up and down.
    Binomial,
    /// Up, middle and down.
    Trinomial,
}

impl Branching {
    /// Number of nodes at `step`.
    pub fn nodes_at(self, step: usize) -> usize {
        match self {
            Branching::Binomial => step + 1,
            Branching::Trinomial => 2 * step + 1,
        }
    }

    /// Position of the first node of `step` in flat storage.
    pub fn offset(self, step: usize) -> usize {
        match self {
            Branching::Binomial => step * (step + 1) / 2,
            Branching::Trinomial => step * step,
        }
    }
}

/// Underlying prices and option values at every node of a lattice.
#[derive(Debug, Clone)]
pub struct LatticeTree {
    branching: Branching,
    steps: usize,
    times: Vec<f64>,
    prices: Vec<f64>,
    values: Vec<f64>,
}

impl LatticeTree {
    /// Allocates a zeroed tree; `times[i]` is the time of step `i`.
    pub(crate) fn new(branching: Branching, times: Vec<f64>) -> Self {
        let steps = times.len().saturating_sub(1);
        let size = branching.offset(steps + 1);
        Self {
            branching,
            steps,
            times,
            prices: vec![0.0; size],
            values: vec![0.0; size],
        }
    }

    /// Branching of the lattice.
    pub fn branching(&self) -> Branching {
        self.branching
    }

    /// Number of time steps.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Time in years of `step`.
    pub fn time_at(&self, step: usize) -> f64 {
        self.times[step]
    }

    /// Underlying prices at `step`, lowest first.
    pub fn prices(&self, step: usize) -> &[f64] {
        &self.prices[self.range(step)]
    }

    /// Option values at `step`, aligned with [`LatticeTree::prices`].
    pub fn values(&self, step: usize) -> &[f64] {
        &self.values[self.range(step)]
    }

    /// Option value at the root.
    pub fn root_value(&self) -> f64 {
        self.values[0]
    }

    pub(crate) fn prices_mut(&mut self, step: usize) -> &mut [f64] {
        let range = self.range(step);
        &mut self.prices[range]
    }

    pub(crate) fn values_mut(&mut self, step: usize) -> &mut [f64] {
        let range = self.range(step);
        &mut self.values[range]
    }

    /// Values at `step` (mutable) together with values at `step + 1`.
    pub(crate) fn value_layers_mut(&mut self, step: usize) -> (&mut [f64], &[f64]) {
        let start = self.branching.offset(step);
        let split = self.branching.offset(step + 1);
        let next_len = self.branching.nodes_at(step + 1);
        let (lower, upper) = self.values.split_at_mut(split);
        (&mut lower[start..], &upper[..next_len])
    }

    fn range(&self, step: usize) -> std::ops::Range<usize> {
        let start = self.branching.offset(step);
        start..start + self.branching.nodes_at(step)
    }
}
