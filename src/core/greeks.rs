//! Option Greeks
//!
//! First and second order sensitivities of a Black-76 value.

use serde::{Deserialize, Serialize};

/// Option Greeks (sensitivities)
///
/// Raw units: vega per unit of volatility, theta per year, rho per unit of
/// rate. Use [`Greeks::vega_per_pct`] and [`Greeks::theta_per_day`] for the
/// quoting conventions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// Delta: dV/dF (sensitivity to futures price)
    pub delta: f64,
    /// Gamma: d²V/dF² (sensitivity of delta to futures price)
    pub gamma: f64,
    /// Vega: dV/dσ
    pub vega: f64,
    /// Theta: -dV/dT (time decay per year)
    pub theta: f64,
    /// Rho: dV/dr
    pub rho: f64,
    /// Vanna: d²V/dFdσ (sensitivity of delta to vol)
    pub vanna: Option<f64>,
    /// Volga/Vomma: d²V/dσ² (sensitivity of vega to vol)
    pub volga: Option<f64>,
}

impl Greeks {
    pub fn new(delta: f64, gamma: f64, vega: f64, theta: f64, rho: f64) -> Self {
        Self {
            delta,
            gamma,
            vega,
            theta,
            rho,
            vanna: None,
            volga: None,
        }
    }

    /// Vega per 1 vol point (1%) move
    pub fn vega_per_pct(&self) -> f64 {
        self.vega / 100.0
    }

    /// Theta per calendar day
    pub fn theta_per_day(&self) -> f64 {
        self.theta / 365.0
    }

    /// Rho per 1% rate move
    pub fn rho_per_pct(&self) -> f64 {
        self.rho / 100.0
    }

    /// Scale Greeks by a factor (e.g., signed quantity)
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            delta: self.delta * factor,
            gamma: self.gamma * factor,
            vega: self.vega * factor,
            theta: self.theta * factor,
            rho: self.rho * factor,
            vanna: self.vanna.map(|v| v * factor),
            volga: self.volga.map(|v| v * factor),
        }
    }

    /// Add two Greeks (for strategies)
    pub fn add(&self, other: &Greeks) -> Self {
        Self {
            delta: self.delta + other.delta,
            gamma: self.gamma + other.gamma,
            vega: self.vega + other.vega,
            theta: self.theta + other.theta,
            rho: self.rho + other.rho,
            vanna: merge(self.vanna, other.vanna),
            volga: merge(self.volga, other.volga),
        }
    }
}

fn merge(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + b),
        (Some(a), None) | (None, Some(a)) => Some(a),
        _ => None,
    }
}
