//! Core data types for NSE futures options
//!
//! Defines fundamental types:
//! - OptionType / Position: closed variants for side and direction
//! - MarketInputs: the five Black-76 scalars
//! - Greeks: sensitivities
//! - FuturesContract / ContractBook: static contract specifications
//! - NseError: crate-wide error type

pub mod contract;
pub mod error;
pub mod greeks;
pub mod option;

pub use contract::*;
pub use error::*;
pub use greeks::*;
pub use option::*;
