//! # NSE Options - Black-76 Pricing for Futures Options
//!
//! A pricing and risk library for European options on Nairobi Securities
//! Exchange (NSE) futures contracts.
//!
//! ## Overview
//!
//! Every operation is a pure function of its inputs:
//! - **Black-76**: call/put values and implied volatility on a futures price
//! - **Greeks**: analytical delta, gamma, vega, theta, rho (plus vanna/volga)
//! - **Fees**: notional-based surcharge on a model price
//! - **Heatmaps**: price and Greek surfaces over (futures price × volatility)
//! - **Strategies**: multi-leg expiration payoffs, max profit/loss, breakevens
//!
//! ## Usage
//!
//! ```rust
//! use nse_options::prelude::*;
//!
//! // F=100, K=105, 30 days, 20% vol, 12% rate
//! let inputs = MarketInputs::new(100.0, 105.0, 30.0 / 365.0, 0.20, 0.12).unwrap();
//! let pricing = black76::price(&inputs).unwrap();
//! let call_greeks = greeks(&inputs, &pricing, OptionType::Call);
//! assert!(call_greeks.gamma > 0.0);
//!
//! // Long 105 call paid at 2.0, evaluated from 80 to 130
//! let strategy = Strategy::new(vec![
//!     OptionLeg::new(OptionType::Call, Position::Long, 105.0, 2.0, 1),
//! ]).unwrap();
//! let curve = evaluate(&strategy, &linspace(80.0, 130.0, 51)).unwrap();
//! assert!(curve.max_profit.is_unbounded());
//! ```
//!
//! ## What This Library Does NOT Do
//!
//! - American/Bermudan exercise
//! - Stochastic volatility or jump processes
//! - Market data ingestion or persistence of results

pub mod config;
pub mod core;
pub mod models;
pub mod pricing;
pub mod strategy;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        days_to_years, ContractBook, FuturesContract, Greeks, MarketInputs, NseError, NseResult,
        OptionType, Position,
    };

    // Models
    pub use crate::models::{
        black76, greeks, greeks_for, implied_volatility, norm_cdf, norm_pdf, price_option,
        PricingResult,
    };

    // Fees and grids
    pub use crate::pricing::{
        apply_fees, build_greek_grid, build_grid, linspace, FeeComponent, FeeQuote, FeeSchedule,
        GreekKind, GridSpec, PriceGrid,
    };

    // Strategies
    pub use crate::strategy::{
        evaluate, evaluate_before_expiry, evaluate_strategy, presets, price_range_around,
        OptionLeg, PayoffCurve, PnlExtreme, Strategy,
    };

    pub use crate::config::EngineConfig;
}

// Re-export main types at crate root
pub use crate::core::{MarketInputs, NseError, NseResult, OptionType};
