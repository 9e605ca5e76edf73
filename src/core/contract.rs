//! Futures contract specifications
//!
//! Static per-contract data (size, expiry) passed explicitly to callers that
//! need notional or time-to-expiry. Nothing here is global.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::{NseError, NseResult};

/// Day count used for all year fractions
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Convert calendar days to a year fraction (days / 365)
pub fn days_to_years(days: f64) -> f64 {
    days / DAYS_PER_YEAR
}

/// An exchange-listed futures contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuturesContract {
    /// Contract symbol (e.g., "SCOM-JUN26")
    pub symbol: String,
    /// Underlying name
    pub underlying: String,
    /// Units of the underlying per contract
    pub contract_size: f64,
    /// Expiration date
    pub expiry: NaiveDate,
}

impl FuturesContract {
    pub fn new(
        symbol: impl Into<String>,
        underlying: impl Into<String>,
        contract_size: f64,
        expiry: NaiveDate,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            underlying: underlying.into(),
            contract_size,
            expiry,
        }
    }

    /// Notional value: contract size × futures price
    pub fn notional(&self, futures_price: f64) -> f64 {
        self.contract_size * futures_price
    }

    /// Time to expiry in years from `valuation_date`, floored at zero
    pub fn time_to_expiry(&self, valuation_date: NaiveDate) -> f64 {
        let days = (self.expiry - valuation_date).num_days().max(0);
        days_to_years(days as f64)
    }

    pub fn is_expired(&self, valuation_date: NaiveDate) -> bool {
        valuation_date >= self.expiry
    }

    pub fn validate(&self) -> NseResult<()> {
        if self.symbol.trim().is_empty() {
            return Err(NseError::config("contract symbol must not be empty"));
        }
        if !self.contract_size.is_finite() || self.contract_size <= 0.0 {
            return Err(NseError::config(format!(
                "contract {} has non-positive size {}",
                self.symbol, self.contract_size
            )));
        }
        Ok(())
    }
}

/// Set of known contracts, looked up by symbol
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractBook {
    contracts: Vec<FuturesContract>,
}

impl ContractBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a list, rejecting invalid or duplicate contracts
    pub fn from_contracts(contracts: Vec<FuturesContract>) -> NseResult<Self> {
        let book = Self { contracts };
        book.validate()?;
        Ok(book)
    }

    /// Insert or replace a contract
    pub fn insert(&mut self, contract: FuturesContract) -> NseResult<()> {
        contract.validate()?;
        match self.contracts.iter_mut().find(|c| c.symbol == contract.symbol) {
            Some(existing) => *existing = contract,
            None => self.contracts.push(contract),
        }
        Ok(())
    }

    pub fn get(&self, symbol: &str) -> Option<&FuturesContract> {
        self.contracts.iter().find(|c| c.symbol == symbol)
    }

    /// Contracts still live on `valuation_date`, nearest expiry first
    pub fn active(&self, valuation_date: NaiveDate) -> Vec<&FuturesContract> {
        let mut live: Vec<&FuturesContract> = self
            .contracts
            .iter()
            .filter(|c| !c.is_expired(valuation_date))
            .collect();
        live.sort_by_key(|c| c.expiry);
        live
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FuturesContract> {
        self.contracts.iter()
    }

    pub fn validate(&self) -> NseResult<()> {
        for (i, contract) in self.contracts.iter().enumerate() {
            contract.validate()?;
            if self.contracts[..i].iter().any(|c| c.symbol == contract.symbol) {
                return Err(NseError::config(format!(
                    "duplicate contract symbol {}",
                    contract.symbol
                )));
            }
        }
        Ok(())
    }
}
