//! Black-76 Model
//!
//! Provides:
//! - European option pricing on futures
//! - d1/d2 terms shared with the Greeks engine
//! - Implied volatility solver (Newton-Raphson with bisection fallback)
//!
//! Degenerate inputs are branched on explicitly instead of letting
//! `ln(F/K) / (σ√T)` produce NaN or ±inf:
//! - `T == 0`: intrinsic value, d1/d2 undefined
//! - `σ == 0, T > 0`: discounted intrinsic value, d1/d2 undefined

use serde::{Deserialize, Serialize};

use super::normal::{norm_cdf, norm_pdf};
use crate::core::{MarketInputs, NseError, NseResult, OptionType};

/// Output of a single Black-76 valuation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    pub call_price: f64,
    pub put_price: f64,
    /// `None` when T == 0 or σ == 0
    pub d1: Option<f64>,
    /// `None` when T == 0 or σ == 0
    pub d2: Option<f64>,
}

impl PricingResult {
    /// Price for one side
    pub fn price(&self, option_type: OptionType) -> f64 {
        match option_type {
            OptionType::Call => self.call_price,
            OptionType::Put => self.put_price,
        }
    }

    /// True when d1/d2 are undefined and Greeks take their degenerate values
    pub fn is_degenerate(&self) -> bool {
        self.d1.is_none() || self.d2.is_none()
    }
}

/// Black-76 d1 and d2 for non-degenerate inputs (T > 0, σ > 0)
pub fn d1_d2(inputs: &MarketInputs) -> (f64, f64) {
    // Split form: σ²T would overflow long before σ√T does
    let sig_sqrt_t = inputs.total_vol();
    let d1 = inputs.log_moneyness() / sig_sqrt_t + 0.5 * sig_sqrt_t;
    (d1, d1 - sig_sqrt_t)
}

/// Black-76 call and put values
pub fn price(inputs: &MarketInputs) -> NseResult<PricingResult> {
    inputs.validate()?;
    Ok(price_unchecked(inputs))
}

/// Black-76 value for one side
pub fn price_option(inputs: &MarketInputs, option_type: OptionType) -> NseResult<f64> {
    price(inputs).map(|p| p.price(option_type))
}

/// Valuation for inputs already known to be in-domain
pub(crate) fn price_unchecked(inputs: &MarketInputs) -> PricingResult {
    let f = inputs.futures_price;
    let k = inputs.strike_price;

    if inputs.time_to_expiry == 0.0 {
        // At expiry: no transcendental functions, exact intrinsic value
        return PricingResult {
            call_price: OptionType::Call.intrinsic(f, k),
            put_price: OptionType::Put.intrinsic(f, k),
            d1: None,
            d2: None,
        };
    }

    let df = inputs.discount_factor();

    if inputs.volatility == 0.0 || inputs.total_vol() == 0.0 {
        // Deterministic forward: N(±inf) collapses to the discounted intrinsic
        return PricingResult {
            call_price: df * OptionType::Call.intrinsic(f, k),
            put_price: df * OptionType::Put.intrinsic(f, k),
            d1: None,
            d2: None,
        };
    }

    let (d1, d2) = d1_d2(inputs);
    let call = df * (f * norm_cdf(d1) - k * norm_cdf(d2));
    let put = df * (k * norm_cdf(-d2) - f * norm_cdf(-d1));

    PricingResult {
        // Cancellation in deep OTM wings can leave a -1e-17 residue
        call_price: call.max(0.0),
        put_price: put.max(0.0),
        d1: Some(d1),
        d2: Some(d2),
    }
}

/// Implied volatility solver using Newton-Raphson with bisection fallback
///
/// `inputs.volatility` is ignored, even when out of domain; every other
/// field is used as given.
pub fn implied_volatility(
    market_price: f64,
    inputs: &MarketInputs,
    option_type: OptionType,
) -> NseResult<f64> {
    let inputs = &inputs.with_volatility(0.0);
    inputs.validate()?;
    if !market_price.is_finite() || market_price < 0.0 {
        return Err(NseError::invalid_input(
            "market_price",
            format!("must be finite and >= 0, got {market_price}"),
        ));
    }
    if inputs.time_to_expiry == 0.0 {
        return Err(NseError::numerical(
            "implied volatility is undefined at expiry",
        ));
    }

    // No-arbitrage bounds: σ → 0 gives the lower, σ → ∞ the upper
    let df = inputs.discount_factor();
    let lower = df * option_type.intrinsic(inputs.futures_price, inputs.strike_price);
    let upper = match option_type {
        OptionType::Call => df * inputs.futures_price,
        OptionType::Put => df * inputs.strike_price,
    };

    if market_price < lower - PRICE_TOL {
        return Err(NseError::numerical(format!(
            "price {market_price} below discounted intrinsic {lower}"
        )));
    }
    if market_price >= upper {
        return Err(NseError::numerical(format!(
            "price {market_price} at or above no-arbitrage bound {upper}"
        )));
    }
    if (market_price - lower).abs() <= PRICE_TOL {
        return Ok(0.0);
    }

    // Initial guess using Brenner-Subrahmanyam approximation
    let sqrt_t = inputs.time_to_expiry.sqrt();
    let atm_approx = market_price / (0.4 * df * inputs.futures_price * sqrt_t);
    let mut vol = atm_approx.clamp(0.01, 3.0);

    for _ in 0..MAX_ITER {
        let trial = inputs.with_volatility(vol);
        let diff = price_unchecked(&trial).price(option_type) - market_price;

        if diff.abs() < PRICE_TOL {
            return Ok(vol);
        }

        let (d1, _) = d1_d2(&trial);
        let vega = df * inputs.futures_price * norm_pdf(d1) * sqrt_t;

        if vega.abs() < 1e-12 {
            break; // Vega too small, switch to bisection
        }

        let new_vol = vol - diff / vega;
        if new_vol <= VOL_LOW || new_vol > VOL_HIGH {
            break; // Out of bounds, switch to bisection
        }
        vol = new_vol;
    }

    bisection_iv(market_price, inputs, option_type)
}

const PRICE_TOL: f64 = 1e-8;
const MAX_ITER: usize = 100;
const VOL_LOW: f64 = 1e-4;
const VOL_HIGH: f64 = 5.0;

/// Bisection method for IV (slower but more robust)
fn bisection_iv(
    market_price: f64,
    inputs: &MarketInputs,
    option_type: OptionType,
) -> NseResult<f64> {
    let value_at = |vol: f64| price_unchecked(&inputs.with_volatility(vol)).price(option_type);

    let mut low = VOL_LOW;
    let mut high = VOL_HIGH;

    if value_at(high) < market_price {
        return Err(NseError::numerical(format!(
            "price {market_price} implies volatility above {VOL_HIGH}"
        )));
    }
    if value_at(low) > market_price {
        return Err(NseError::numerical(format!(
            "price {market_price} implies volatility below {VOL_LOW}"
        )));
    }

    for _ in 0..MAX_ITER {
        let mid = 0.5 * (low + high);
        let diff = value_at(mid) - market_price;

        if diff.abs() < PRICE_TOL || (high - low) < PRICE_TOL {
            return Ok(mid);
        }

        if diff > 0.0 {
            high = mid;
        } else {
            low = mid;
        }
    }

    Err(NseError::numerical("IV solver did not converge"))
}
