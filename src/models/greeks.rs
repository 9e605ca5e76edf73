//! Black-76 Greeks
//!
//! Analytical sensitivities computed from the d1/d2 terms of a
//! [`PricingResult`], so the pricing step is never repeated.

use super::black76::{self, PricingResult};
use super::normal::{norm_cdf, norm_pdf};
use crate::core::{Greeks, MarketInputs, NseResult, OptionType};

/// Delta reported at expiry (or zero vol) when F == K exactly
pub const ATM_DEGENERATE_DELTA: f64 = 0.5;

/// Black-76 Greeks for one side
///
/// `pricing` must come from [`black76::price`] on the same `inputs`.
pub fn greeks(inputs: &MarketInputs, pricing: &PricingResult, option_type: OptionType) -> Greeks {
    let (d1, d2) = match (pricing.d1, pricing.d2) {
        (Some(d1), Some(d2)) => (d1, d2),
        _ => return degenerate_greeks(inputs, option_type),
    };

    let f = inputs.futures_price;
    let vol = inputs.volatility;
    let r = inputs.risk_free_rate;
    let time = inputs.time_to_expiry;
    let sqrt_t = time.sqrt();
    let df = inputs.discount_factor();
    let pdf_d1 = norm_pdf(d1);
    let value = pricing.price(option_type);

    let delta = match option_type {
        OptionType::Call => df * norm_cdf(d1),
        OptionType::Put => -df * norm_cdf(-d1),
    };

    // Gamma and vega are side independent
    let gamma = df * pdf_d1 / (f * vol * sqrt_t);
    let vega = df * f * pdf_d1 * sqrt_t;

    // -dV/dT: decay of the vol term plus the discounting of V itself
    let theta = -df * f * pdf_d1 * vol / (2.0 * sqrt_t) + r * value;

    // Only the discount factor depends on r when F is held fixed
    let rho = -time * value;

    let mut greeks = Greeks::new(delta, gamma, vega, theta, rho);
    // n(d1) underflows when d1 is infinite; the products would be 0 * inf
    if pdf_d1 == 0.0 {
        greeks.vanna = Some(0.0);
        greeks.volga = Some(0.0);
    } else {
        greeks.vanna = Some(-df * pdf_d1 * d2 / vol);
        greeks.volga = Some(vega * d1 * d2 / vol);
    }
    greeks
}

/// Price then differentiate in one call
pub fn greeks_for(inputs: &MarketInputs, option_type: OptionType) -> NseResult<Greeks> {
    let pricing = black76::price(inputs)?;
    Ok(greeks(inputs, &pricing, option_type))
}

/// Greeks when d1/d2 are undefined (T == 0 or σ == 0)
///
/// Every sensitivity is zero except delta, which is the step function of
/// moneyness: ±1 in the money, 0 out of the money and ±0.5 exactly at the
/// money (the average of the two one-sided limits).
fn degenerate_greeks(inputs: &MarketInputs, option_type: OptionType) -> Greeks {
    let f = inputs.futures_price;
    let k = inputs.strike_price;

    let magnitude = if f == k {
        ATM_DEGENERATE_DELTA
    } else if option_type.is_itm(f, k) {
        1.0
    } else {
        0.0
    };

    Greeks::new(option_type.phi() * magnitude, 0.0, 0.0, 0.0, 0.0)
}
