//! Common multi-leg strategies
//!
//! Each preset takes (strike, premium) pairs and a quantity applied to every
//! leg. Strikes must be strictly ordered as named.

use super::leg::{OptionLeg, Strategy};
use crate::core::{NseError, NseResult, OptionType, Position};

/// (strike, premium)
pub type StrikePremium = (f64, f64);

/// Long lower-strike call, short higher-strike call
pub fn bull_call_spread(
    lower: StrikePremium,
    upper: StrikePremium,
    quantity: u32,
) -> NseResult<Strategy> {
    ordered(&[("lower", lower.0), ("upper", upper.0)])?;
    Strategy::new(vec![
        leg(OptionType::Call, Position::Long, lower, quantity),
        leg(OptionType::Call, Position::Short, upper, quantity),
    ])
}

/// Long higher-strike put, short lower-strike put
pub fn bear_put_spread(
    lower: StrikePremium,
    upper: StrikePremium,
    quantity: u32,
) -> NseResult<Strategy> {
    ordered(&[("lower", lower.0), ("upper", upper.0)])?;
    Strategy::new(vec![
        leg(OptionType::Put, Position::Long, upper, quantity),
        leg(OptionType::Put, Position::Short, lower, quantity),
    ])
}

/// Long call and long put at the same strike
pub fn long_straddle(
    strike: f64,
    call_premium: f64,
    put_premium: f64,
    quantity: u32,
) -> NseResult<Strategy> {
    Strategy::new(vec![
        leg(OptionType::Call, Position::Long, (strike, call_premium), quantity),
        leg(OptionType::Put, Position::Long, (strike, put_premium), quantity),
    ])
}

/// Long lower-strike put, long higher-strike call
pub fn long_strangle(
    put: StrikePremium,
    call: StrikePremium,
    quantity: u32,
) -> NseResult<Strategy> {
    ordered(&[("put", put.0), ("call", call.0)])?;
    Strategy::new(vec![
        leg(OptionType::Put, Position::Long, put, quantity),
        leg(OptionType::Call, Position::Long, call, quantity),
    ])
}

/// Long put wing, short put, short call, long call wing
pub fn iron_condor(
    long_put: StrikePremium,
    short_put: StrikePremium,
    short_call: StrikePremium,
    long_call: StrikePremium,
    quantity: u32,
) -> NseResult<Strategy> {
    ordered(&[
        ("long_put", long_put.0),
        ("short_put", short_put.0),
        ("short_call", short_call.0),
        ("long_call", long_call.0),
    ])?;
    Strategy::new(vec![
        leg(OptionType::Put, Position::Long, long_put, quantity),
        leg(OptionType::Put, Position::Short, short_put, quantity),
        leg(OptionType::Call, Position::Short, short_call, quantity),
        leg(OptionType::Call, Position::Long, long_call, quantity),
    ])
}

fn leg(
    option_type: OptionType,
    position: Position,
    (strike, premium): StrikePremium,
    quantity: u32,
) -> OptionLeg {
    OptionLeg::new(option_type, position, strike, premium, quantity)
}

fn ordered(strikes: &[(&str, f64)]) -> NseResult<()> {
    for pair in strikes.windows(2) {
        let ((lo_name, lo), (hi_name, hi)) = (pair[0], pair[1]);
        if lo >= hi {
            return Err(NseError::invalid_input(
                format!("{hi_name}.strike"),
                format!("must be above {lo_name} strike {lo}, got {hi}"),
            ));
        }
    }
    Ok(())
}
