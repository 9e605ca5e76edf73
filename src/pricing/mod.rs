//! Pricing overlays and batch evaluation
//!
//! - Fee overlay on top of model prices
//! - Price and Greek surfaces over (futures price × volatility) grids

pub mod fees;
pub mod grid;

pub use fees::*;
pub use grid::*;
