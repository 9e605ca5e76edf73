//! Engine configuration
//!
//! Static settings the request layer hands to the pricing functions: fee
//! schedule, contract specifications and default heatmap/payoff ranges.
//! Loaded once from JSON and passed explicitly; the library keeps no
//! global state.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{ContractBook, NseError, NseResult};
use crate::pricing::{FeeSchedule, GridSpec};
use crate::strategy::price_range_around;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub fees: FeeSchedule,
    pub contracts: ContractBook,
    /// Default continuously compounded rate (0.12 = 12%)
    pub risk_free_rate: f64,
    pub heatmap: HeatmapConfig,
    pub payoff: PayoffConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fees: FeeSchedule::nse_derivatives(),
            contracts: ContractBook::new(),
            risk_free_rate: 0.12,
            heatmap: HeatmapConfig::default(),
            payoff: PayoffConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON document; missing fields take defaults
    pub fn from_json_str(json: &str) -> NseResult<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> NseResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;

        match Self::from_json_str(&json) {
            Ok(config) => {
                tracing::info!(
                    "Loaded engine config from {:?} ({} contracts, {} fee components)",
                    path,
                    config.contracts.len(),
                    config.fees.components.len()
                );
                Ok(config)
            }
            Err(e) => {
                tracing::warn!("Rejected engine config {:?}: {}", path, e);
                Err(e)
            }
        }
    }

    /// Write as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> NseResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        tracing::info!("Saved engine config to {:?}", path.as_ref());
        Ok(())
    }

    pub fn validate(&self) -> NseResult<()> {
        self.fees.validate()?;
        self.contracts.validate()?;
        if !self.risk_free_rate.is_finite() {
            return Err(NseError::config(format!(
                "risk_free_rate must be finite, got {}",
                self.risk_free_rate
            )));
        }
        self.heatmap.validate()?;
        self.payoff.validate()
    }

    /// Heatmap axes centred on `futures_price`
    pub fn heatmap_spec(&self, futures_price: f64) -> NseResult<GridSpec> {
        let h = &self.heatmap;
        GridSpec::around(
            futures_price,
            h.price_width,
            h.price_steps,
            h.vol_min,
            h.vol_max,
            h.vol_steps,
        )
    }

    /// Payoff sampling range centred on `futures_price`
    pub fn payoff_range(&self, futures_price: f64) -> Vec<f64> {
        price_range_around(futures_price, self.payoff.range_width, self.payoff.steps)
    }
}

/// Default heatmap axes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    /// Price axis spans ±this fraction of the current futures price
    pub price_width: f64,
    pub price_steps: usize,
    pub vol_min: f64,
    pub vol_max: f64,
    pub vol_steps: usize,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            price_width: 0.2,
            price_steps: 21,
            vol_min: 0.05,
            vol_max: 0.65,
            vol_steps: 13,
        }
    }
}

impl HeatmapConfig {
    fn validate(&self) -> NseResult<()> {
        if !(self.price_width > 0.0 && self.price_width < 1.0) {
            return Err(NseError::config(format!(
                "heatmap.price_width must be in (0, 1), got {}",
                self.price_width
            )));
        }
        if self.price_steps < 2 || self.vol_steps < 2 {
            return Err(NseError::config("heatmap needs at least 2 steps per axis"));
        }
        if !(self.vol_min >= 0.0 && self.vol_max > self.vol_min && self.vol_max.is_finite()) {
            return Err(NseError::config(format!(
                "heatmap vol range [{}, {}] is invalid",
                self.vol_min, self.vol_max
            )));
        }
        Ok(())
    }
}

/// Default payoff diagram sampling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayoffConfig {
    /// Range spans ±this fraction of the current futures price
    pub range_width: f64,
    pub steps: usize,
}

impl Default for PayoffConfig {
    fn default() -> Self {
        Self {
            range_width: 0.3,
            steps: 121,
        }
    }
}

impl PayoffConfig {
    fn validate(&self) -> NseResult<()> {
        if !(self.range_width > 0.0 && self.range_width.is_finite()) {
            return Err(NseError::config(format!(
                "payoff.range_width must be > 0, got {}",
                self.range_width
            )));
        }
        if self.steps < 2 {
            return Err(NseError::config("payoff.steps must be at least 2"));
        }
        Ok(())
    }
}
