//! Multi-leg option strategies
//!
//! - Legs and strategies with net cost and aggregated Greeks
//! - Expiration payoff curves with max profit/loss and breakevens
//! - Preset spreads, straddles and condors

mod leg;
mod payoff;
pub mod presets;

pub use leg::*;
pub use payoff::*;
