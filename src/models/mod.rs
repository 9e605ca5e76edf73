//! Pricing Models
//!
//! Implements:
//! - Standard normal CDF/PDF
//! - Black-76 (European options on futures, implied volatility)
//! - Analytical Black-76 Greeks

pub mod black76;
pub mod greeks;
pub mod normal;

pub use black76::*;
pub use greeks::*;
pub use normal::*;
