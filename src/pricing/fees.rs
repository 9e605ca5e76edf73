//! Transaction fee overlay
//!
//! Fees are fixed fractions of contract notional, summed across components
//! and added on top of a model price.

use serde::{Deserialize, Serialize};

use crate::core::{NseError, NseResult};

/// One named fee, as a fraction of notional
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeComponent {
    pub name: String,
    /// Fraction of notional (0.000125 = 0.0125%)
    pub rate: f64,
}

impl FeeComponent {
    pub fn new(name: impl Into<String>, rate: f64) -> Self {
        Self {
            name: name.into(),
            rate,
        }
    }
}

/// Static fee configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub components: Vec<FeeComponent>,
}

impl FeeSchedule {
    /// Build a schedule, rejecting negative or non-finite rates
    pub fn new(components: Vec<FeeComponent>) -> NseResult<Self> {
        let schedule = Self { components };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Schedule with no components (fees are always zero)
    pub fn zero() -> Self {
        Self::default()
    }

    /// NSE derivatives market fees charged per side
    pub fn nse_derivatives() -> Self {
        Self {
            components: vec![
                FeeComponent::new("clearing_fee", 0.000125),
                FeeComponent::new("member_fee", 0.0005),
            ],
        }
    }

    pub fn validate(&self) -> NseResult<()> {
        for (i, component) in self.components.iter().enumerate() {
            if !component.rate.is_finite() || component.rate < 0.0 {
                return Err(NseError::invalid_input(
                    format!("fees.components[{i}].rate"),
                    format!(
                        "{} must be finite and >= 0, got {}",
                        component.name, component.rate
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Sum of all component rates
    pub fn total_rate(&self) -> f64 {
        self.components.iter().map(|c| c.rate).sum()
    }

    /// Fee amount charged by each component on `notional`
    pub fn breakdown(&self, notional: f64) -> Vec<(String, f64)> {
        self.components
            .iter()
            .map(|c| (c.name.clone(), notional * c.rate))
            .collect()
    }
}

/// Price with fees applied
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeQuote {
    pub total_fees: f64,
    pub price_with_fees: f64,
}

/// Add notional-based fees on top of `price`
pub fn apply_fees(price: f64, contract_notional: f64, schedule: &FeeSchedule) -> FeeQuote {
    let total_fees = contract_notional * schedule.total_rate();
    FeeQuote {
        total_fees,
        price_with_fees: price + total_fees,
    }
}
