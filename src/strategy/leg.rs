//! Option legs and multi-leg strategies

use serde::{Deserialize, Serialize};

use crate::core::{Greeks, MarketInputs, NseError, NseResult, OptionType, Position};
use crate::models::{greeks_for, price_option};

/// One option position within a strategy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionLeg {
    pub option_type: OptionType,
    pub position: Position,
    pub strike: f64,
    /// Premium per unit, paid (long) or received (short)
    pub premium: f64,
    pub quantity: u32,
}

impl OptionLeg {
    pub fn new(
        option_type: OptionType,
        position: Position,
        strike: f64,
        premium: f64,
        quantity: u32,
    ) -> Self {
        Self {
            option_type,
            position,
            strike,
            premium,
            quantity,
        }
    }

    /// Leg whose premium is the Black-76 value at `strike`; `market` supplies F, T, σ and r
    pub fn priced(
        option_type: OptionType,
        position: Position,
        strike: f64,
        quantity: u32,
        market: &MarketInputs,
    ) -> NseResult<Self> {
        let premium = price_option(&market.with_strike(strike), option_type)?;
        Ok(Self::new(option_type, position, strike, premium, quantity))
    }

    /// Signed quantity: +quantity long, -quantity short
    pub fn signed_quantity(&self) -> f64 {
        self.position.sign() * self.quantity as f64
    }

    /// Premium cash flow: positive when paid, negative when received
    pub fn cost(&self) -> f64 {
        self.premium * self.signed_quantity()
    }

    /// Payoff at expiration, before premium
    pub fn payoff_at_expiry(&self, price: f64) -> f64 {
        self.option_type.intrinsic(price, self.strike) * self.signed_quantity()
    }

    /// Net profit/loss at expiration, after premium
    pub fn pnl_at_expiry(&self, price: f64) -> f64 {
        (self.option_type.intrinsic(price, self.strike) - self.premium) * self.signed_quantity()
    }

    fn validate(&self, index: usize) -> NseResult<()> {
        if !self.strike.is_finite() || self.strike <= 0.0 {
            return Err(NseError::invalid_input(
                format!("legs[{index}].strike"),
                format!("must be finite and > 0, got {}", self.strike),
            ));
        }
        if self.quantity == 0 {
            return Err(NseError::invalid_input(
                format!("legs[{index}].quantity"),
                "must be >= 1",
            ));
        }
        if !self.premium.is_finite() {
            return Err(NseError::invalid_input(
                format!("legs[{index}].premium"),
                format!("must be finite, got {}", self.premium),
            ));
        }
        Ok(())
    }
}

/// A multiset of option legs; payoff is a pointwise sum over legs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    pub legs: Vec<OptionLeg>,
}

impl Strategy {
    /// Validated strategy with at least one leg
    pub fn new(legs: Vec<OptionLeg>) -> NseResult<Self> {
        let strategy = Self { legs };
        strategy.validate()?;
        Ok(strategy)
    }

    pub fn validate(&self) -> NseResult<()> {
        if self.legs.is_empty() {
            return Err(NseError::invalid_input(
                "legs",
                "strategy must have at least one leg",
            ));
        }
        self.legs
            .iter()
            .enumerate()
            .try_for_each(|(i, leg)| leg.validate(i))
    }

    /// Σ premium × quantity × (+1 long, -1 short); negative is a net credit
    pub fn net_cost(&self) -> f64 {
        self.legs.iter().map(OptionLeg::cost).sum()
    }

    /// Slope of the expiry payoff above the highest strike
    ///
    /// Only calls keep gaining intrinsic value as the price rises, so this
    /// is the signed call quantity. Positive means unbounded profit,
    /// negative means unbounded loss.
    pub fn upside_exposure(&self) -> f64 {
        self.legs
            .iter()
            .filter(|leg| leg.option_type == OptionType::Call)
            .map(OptionLeg::signed_quantity)
            .sum()
    }

    /// Net profit/loss at expiration for one underlying price
    pub fn pnl_at_expiry(&self, price: f64) -> f64 {
        self.legs.iter().map(|leg| leg.pnl_at_expiry(price)).sum()
    }

    /// Copy with every premium replaced by its Black-76 value
    pub fn repriced(&self, market: &MarketInputs) -> NseResult<Self> {
        self.validate()?;
        let legs = self
            .legs
            .iter()
            .map(|leg| {
                OptionLeg::priced(leg.option_type, leg.position, leg.strike, leg.quantity, market)
            })
            .collect::<NseResult<Vec<_>>>()?;
        Ok(Self { legs })
    }

    /// Quantity-weighted Greeks of the whole position
    pub fn net_greeks(&self, market: &MarketInputs) -> NseResult<Greeks> {
        self.validate()?;
        self.legs.iter().try_fold(Greeks::default(), |net, leg| {
            let leg_greeks = greeks_for(&market.with_strike(leg.strike), leg.option_type)?;
            Ok(net.add(&leg_greeks.scale(leg.signed_quantity())))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn market() -> MarketInputs {
        MarketInputs::new(100.0, 100.0, 30.0 / 365.0, 0.2, 0.12).unwrap()
    }

    #[test]
    fn test_leg_pnl() {
        let long_call = OptionLeg::new(OptionType::Call, Position::Long, 105.0, 2.0, 1);
        assert_eq!(long_call.pnl_at_expiry(100.0), -2.0);
        assert_eq!(long_call.pnl_at_expiry(110.0), 3.0);
        assert_eq!(long_call.cost(), 2.0);

        let short_puts = OptionLeg::new(OptionType::Put, Position::Short, 95.0, 1.5, 2);
        assert_eq!(short_puts.pnl_at_expiry(100.0), 3.0);
        assert_eq!(short_puts.pnl_at_expiry(90.0), -7.0);
        assert_eq!(short_puts.payoff_at_expiry(90.0), -10.0);
        assert_eq!(short_puts.cost(), -3.0);
    }

    #[test]
    fn test_validation() {
        let empty = Strategy::new(vec![]).unwrap_err();
        assert_eq!(empty.field(), Some("legs"));

        let ok = OptionLeg::new(OptionType::Call, Position::Long, 105.0, 2.0, 1);
        let zero_qty = OptionLeg { quantity: 0, ..ok };
        let bad_strike = OptionLeg { strike: -1.0, ..ok };
        let nan_premium = OptionLeg { premium: f64::NAN, ..ok };

        let field_of = |legs: Vec<OptionLeg>| {
            Strategy::new(legs).unwrap_err().field().map(String::from)
        };
        assert_eq!(field_of(vec![ok, zero_qty]).as_deref(), Some("legs[1].quantity"));
        assert_eq!(field_of(vec![bad_strike]).as_deref(), Some("legs[0].strike"));
        assert_eq!(field_of(vec![nan_premium]).as_deref(), Some("legs[0].premium"));
    }

    #[test]
    fn test_upside_exposure() {
        let legs = vec![
            OptionLeg::new(OptionType::Call, Position::Long, 100.0, 3.0, 2),
            OptionLeg::new(OptionType::Call, Position::Short, 110.0, 1.0, 3),
            OptionLeg::new(OptionType::Put, Position::Long, 90.0, 1.0, 5),
        ];
        assert_eq!(Strategy::new(legs).unwrap().upside_exposure(), -1.0);
    }

    #[test]
    fn test_priced_leg_uses_leg_strike() {
        let leg = OptionLeg::priced(OptionType::Call, Position::Long, 105.0, 1, &market()).unwrap();
        let expected = price_option(&market().with_strike(105.0), OptionType::Call).unwrap();
        assert_eq!(leg.premium, expected);

        let strategy = Strategy::new(vec![OptionLeg { premium: 0.0, ..leg }]).unwrap();
        assert_eq!(strategy.repriced(&market()).unwrap().legs[0].premium, expected);
    }

    #[test]
    fn test_straddle_net_greeks() {
        let strategy = Strategy::new(vec![
            OptionLeg::new(OptionType::Call, Position::Long, 100.0, 2.5, 1),
            OptionLeg::new(OptionType::Put, Position::Long, 100.0, 2.5, 1),
        ])
        .unwrap();
        let net = strategy.net_greeks(&market()).unwrap();
        let call = greeks_for(&market(), OptionType::Call).unwrap();

        // Long straddle: delta ≈ df·(2N(d1) - 1), double gamma and vega
        assert_relative_eq!(net.gamma, 2.0 * call.gamma, epsilon = 1e-12);
        assert_relative_eq!(net.vega, 2.0 * call.vega, epsilon = 1e-12);
        assert!(net.delta.abs() < 0.05);
        assert!(net.theta < 0.0);
    }

    #[test]
    fn test_short_leg_flips_greeks() {
        let put = |position| {
            Strategy::new(vec![OptionLeg::new(OptionType::Put, position, 95.0, 1.0, 3)]).unwrap()
        };
        let (long, short) = (put(Position::Long), put(Position::Short));
        let g_long = long.net_greeks(&market()).unwrap();
        let g_short = short.net_greeks(&market()).unwrap();
        assert_relative_eq!(g_long.delta, -g_short.delta, epsilon = 1e-15);
        assert_relative_eq!(g_long.vega, -g_short.vega, epsilon = 1e-15);
    }
}
