//! Option and market input definitions
//!
//! Represents European options on a futures price and the scalar market
//! state needed to value them.

use serde::{Deserialize, Serialize};

use super::error::{NseError, NseResult};

/// Option type (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Payoff direction: +1 for call, -1 for put
    pub fn phi(&self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    /// Intrinsic value at given underlying price
    pub fn intrinsic(&self, price: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (price - strike).max(0.0),
            OptionType::Put => (strike - price).max(0.0),
        }
    }

    /// Is the option in the money at the given underlying price?
    pub fn is_itm(&self, price: f64, strike: f64) -> bool {
        match self {
            OptionType::Call => price > strike,
            OptionType::Put => price < strike,
        }
    }
}

/// Direction of a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Long,
    Short,
}

impl Position {
    /// +1 for long, -1 for short
    pub fn sign(&self) -> f64 {
        match self {
            Position::Long => 1.0,
            Position::Short => -1.0,
        }
    }
}

/// Scalar market state for a single Black-76 valuation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketInputs {
    /// Futures price F
    pub futures_price: f64,
    /// Strike price K
    pub strike_price: f64,
    /// Time to expiry T in years (days / 365)
    pub time_to_expiry: f64,
    /// Annualized volatility σ (0.20 = 20%)
    pub volatility: f64,
    /// Continuously compounded risk-free rate r
    pub risk_free_rate: f64,
}

impl MarketInputs {
    /// Create validated market inputs
    pub fn new(
        futures_price: f64,
        strike_price: f64,
        time_to_expiry: f64,
        volatility: f64,
        risk_free_rate: f64,
    ) -> NseResult<Self> {
        let inputs = Self {
            futures_price,
            strike_price,
            time_to_expiry,
            volatility,
            risk_free_rate,
        };
        inputs.validate()?;
        Ok(inputs)
    }

    /// Check the Black-76 domain: F > 0, K > 0, T >= 0, σ >= 0, all finite
    pub fn validate(&self) -> NseResult<()> {
        positive("futures_price", self.futures_price)?;
        positive("strike_price", self.strike_price)?;
        non_negative("time_to_expiry", self.time_to_expiry)?;
        non_negative("volatility", self.volatility)?;
        if !self.risk_free_rate.is_finite() {
            return Err(NseError::invalid_input(
                "risk_free_rate",
                format!("must be finite, got {}", self.risk_free_rate),
            ));
        }
        Ok(())
    }

    pub fn with_futures_price(&self, futures_price: f64) -> Self {
        Self {
            futures_price,
            ..*self
        }
    }

    pub fn with_volatility(&self, volatility: f64) -> Self {
        Self { volatility, ..*self }
    }

    pub fn with_strike(&self, strike_price: f64) -> Self {
        Self {
            strike_price,
            ..*self
        }
    }

    /// Discount factor e^(-rT)
    pub fn discount_factor(&self) -> f64 {
        (-self.risk_free_rate * self.time_to_expiry).exp()
    }

    /// σ√T
    pub fn total_vol(&self) -> f64 {
        self.volatility * self.time_to_expiry.sqrt()
    }

    /// Log-moneyness ln(F/K)
    pub fn log_moneyness(&self) -> f64 {
        (self.futures_price / self.strike_price).ln()
    }
}

pub(crate) fn positive(field: &str, value: f64) -> NseResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(NseError::invalid_input(
            field,
            format!("must be finite and > 0, got {value}"),
        ));
    }
    Ok(())
}

pub(crate) fn non_negative(field: &str, value: f64) -> NseResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(NseError::invalid_input(
            field,
            format!("must be finite and >= 0, got {value}"),
        ));
    }
    Ok(())
}
