//! Point sensitivities keyed by curve.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Sensitivity of a value to the continuously compounded zero rate of
/// named curves, as `(time, sensitivity)` pairs per curve.
///
/// A parallel shift `s` of every zero rate changes the value by about
/// `s * parallel_sum()`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MulticurveSensitivity {
    sensitivities: BTreeMap<String, Vec<(f64, f64)>>,
}

impl MulticurveSensitivity {
    /// An empty sensitivity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sensitivity to a single curve.
    pub fn of_curve(name: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        let mut sensitivities = BTreeMap::new();
        sensitivities.insert(name.into(), points);
        Self { sensitivities }
    }

    /// Curve names with their points.
    pub fn sensitivities(&self) -> &BTreeMap<String, Vec<(f64, f64)>> {
        &self.sensitivities
    }

    /// Points for one curve.
    pub fn curve(&self, name: &str) -> Option<&[(f64, f64)]> {
        self.sensitivities.get(name).map(Vec::as_slice)
    }

    /// Concatenates the points of both sensitivities curve by curve.
    #[must_use]
    pub fn plus(&self, other: &Self) -> Self {
        let mut result = self.clone();
        for (name, points) in &other.sensitivities {
            result
                .sensitivities
                .entry(name.clone())
                .or_default()
                .extend_from_slice(points);
        }
        result
    }

    /// Scales every sensitivity by `factor`.
    #[must_use]
    pub fn multiplied_by(&self, factor: f64) -> Self {
        let sensitivities = self
            .sensitivities
            .iter()
            .map(|(name, points)| {
                let scaled = points.iter().map(|&(t, s)| (t, s * factor)).collect();
                (name.clone(), scaled)
            })
            .collect();
        Self { sensitivities }
    }

    /// Sorts each curve's points by time and merges equal times.
    #[must_use]
    pub fn cleaned(&self) -> Self {
        let sensitivities = self
            .sensitivities
            .iter()
            .map(|(name, points)| {
                let mut sorted = points.clone();
                sorted.sort_by(|a, b| a.0.total_cmp(&b.0));
                let mut merged: Vec<(f64, f64)> = Vec::with_capacity(sorted.len());
                for (t, s) in sorted {
                    match merged.last_mut() {
                        Some(last) if last.0 == t => last.1 += s,
                        _ => merged.push((t, s)),
                    }
                }
                (name.clone(), merged)
            })
            .collect();
        Self { sensitivities }
    }

    /// Sum of the sensitivities to one curve.
    pub fn total(&self, name: &str) -> f64 {
        self.curve(name)
            .map_or(0.0, |points| points.iter().map(|(_, s)| s).sum())
    }

    /// Sum over every curve and time.
    pub fn parallel_sum(&self) -> f64 {
        self.sensitivities
            .values()
            .flatten()
            .map(|(_, s)| s)
            .sum()
    }
}
