//! Expiration payoff curves
//!
//! Samples a strategy's profit/loss over a range of underlying prices and
//! derives max profit, max loss and breakeven points from the samples.

use serde::{Deserialize, Serialize};

use super::leg::Strategy;
use crate::core::{MarketInputs, NseError, NseResult};
use crate::models::black76::price_unchecked;

/// Extreme value of a payoff curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PnlExtreme {
    /// True extreme over every price F >= 0, sampled or not
    Bounded(f64),
    /// The payoff keeps growing beyond the range; `sampled` is only a bound
    /// (a lower bound for profit, an upper bound for loss)
    Unbounded { sampled: f64 },
}

impl PnlExtreme {
    /// Sampled value, regardless of boundedness
    pub fn value(&self) -> f64 {
        match self {
            PnlExtreme::Bounded(v) => *v,
            PnlExtreme::Unbounded { sampled } => *sampled,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, PnlExtreme::Unbounded { .. })
    }
}

/// Profit/loss at expiration over a price range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffCurve {
    pub prices: Vec<f64>,
    pub total_pnl: Vec<f64>,
    /// Per-leg curves, in strategy leg order
    pub leg_pnl: Vec<Vec<f64>>,
    pub max_profit: PnlExtreme,
    pub max_loss: PnlExtreme,
    pub breakeven_points: Vec<f64>,
    /// Premium paid (positive) or received (negative)
    pub net_cost: f64,
}

/// Expiration profit/loss of `strategy` at each price in `price_range`
///
/// `price_range` must be non-empty, finite, non-negative and strictly
/// increasing.
pub fn evaluate(strategy: &Strategy, price_range: &[f64]) -> NseResult<PayoffCurve> {
    strategy.validate()?;
    check_price_range(price_range)?;

    let leg_pnl: Vec<Vec<f64>> = strategy
        .legs
        .iter()
        .map(|leg| price_range.iter().map(|&p| leg.pnl_at_expiry(p)).collect())
        .collect();

    let total_pnl: Vec<f64> = (0..price_range.len())
        .map(|i| leg_pnl.iter().map(|curve| curve[i]).sum())
        .collect();

    let sampled_max = total_pnl.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let sampled_min = total_pnl.iter().copied().fold(f64::INFINITY, f64::min);

    // Expiry P&L is linear between strikes, so on [0, highest strike] its
    // extremes sit at zero or at a strike even when the range misses them
    let kinks: Vec<f64> = std::iter::once(0.0)
        .chain(strategy.legs.iter().map(|leg| leg.strike))
        .map(|price| strategy.pnl_at_expiry(price))
        .collect();
    let true_max = kinks.iter().copied().fold(sampled_max, f64::max);
    let true_min = kinks.iter().copied().fold(sampled_min, f64::min);

    // Above the highest strike the slope is the net call quantity
    let exposure = strategy.upside_exposure();
    let max_profit = if exposure > 0.0 {
        PnlExtreme::Unbounded { sampled: sampled_max }
    } else {
        PnlExtreme::Bounded(true_max)
    };
    let max_loss = if exposure < 0.0 {
        PnlExtreme::Unbounded { sampled: sampled_min }
    } else {
        PnlExtreme::Bounded(true_min)
    };

    Ok(PayoffCurve {
        breakeven_points: breakevens(price_range, &total_pnl),
        prices: price_range.to_vec(),
        total_pnl,
        leg_pnl,
        max_profit,
        max_loss,
        net_cost: strategy.net_cost(),
    })
}

/// Same as [`evaluate`]
pub fn evaluate_strategy(strategy: &Strategy, price_range: &[f64]) -> NseResult<PayoffCurve> {
    evaluate(strategy, price_range)
}

/// Mark-to-model profit/loss before expiration
///
/// Each leg is revalued with Black-76 at every price using `market`'s time,
/// volatility and rate; `market.futures_price` and `market.strike_price`
/// are replaced per point and per leg.
pub fn evaluate_before_expiry(
    strategy: &Strategy,
    price_range: &[f64],
    market: &MarketInputs,
) -> NseResult<Vec<f64>> {
    strategy.validate()?;
    check_price_range(price_range)?;
    if price_range[0] == 0.0 {
        return Err(NseError::invalid_input(
            "price_range[0]",
            "must be > 0 when revaluing with Black-76",
        ));
    }
    for leg in &strategy.legs {
        market
            .with_futures_price(price_range[0])
            .with_strike(leg.strike)
            .validate()?;
    }

    Ok(price_range
        .iter()
        .map(|&price| {
            strategy
                .legs
                .iter()
                .map(|leg| {
                    let cell = market.with_futures_price(price).with_strike(leg.strike);
                    let value = price_unchecked(&cell).price(leg.option_type);
                    (value - leg.premium) * leg.signed_quantity()
                })
                .sum()
        })
        .collect())
}

/// `steps` evenly spaced prices within ±`width_fraction` of `current`,
/// clipped at zero
pub fn price_range_around(current: f64, width_fraction: f64, steps: usize) -> Vec<f64> {
    let low = (current * (1.0 - width_fraction)).max(0.0);
    let high = current * (1.0 + width_fraction);
    crate::pricing::linspace(low, high, steps)
}

fn check_price_range(price_range: &[f64]) -> NseResult<()> {
    if price_range.is_empty() {
        return Err(NseError::invalid_input("price_range", "must not be empty"));
    }
    for (i, &price) in price_range.iter().enumerate() {
        if !price.is_finite() || price < 0.0 {
            return Err(NseError::invalid_input(
                format!("price_range[{i}]"),
                format!("must be finite and >= 0, got {price}"),
            ));
        }
        if i > 0 && price <= price_range[i - 1] {
            return Err(NseError::invalid_input(
                format!("price_range[{i}]"),
                "must be strictly increasing",
            ));
        }
    }
    Ok(())
}

/// Zero crossings of a sampled curve
///
/// A sample that is exactly zero is reported as is (once per run of zeros);
/// a sign change between two samples is linearly interpolated.
fn breakevens(prices: &[f64], pnl: &[f64]) -> Vec<f64> {
    let mut points = Vec::new();

    for i in 0..pnl.len() {
        let y0 = pnl[i];
        if y0 == 0.0 {
            if i == 0 || pnl[i - 1] != 0.0 {
                points.push(prices[i]);
            }
            continue;
        }

        if let Some(&y1) = pnl.get(i + 1) {
            if y1 != 0.0 && (y0 < 0.0) != (y1 < 0.0) {
                let (x0, x1) = (prices[i], prices[i + 1]);
                points.push(x0 + (x1 - x0) * y0 / (y0 - y1));
            }
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{OptionType, Position};
    use crate::pricing::linspace;
    use crate::strategy::OptionLeg;
    use approx::assert_abs_diff_eq;

    fn long_call() -> Strategy {
        Strategy::new(vec![OptionLeg::new(
            OptionType::Call,
            Position::Long,
            105.0,
            2.0,
            1,
        )])
        .unwrap()
    }

    #[test]
    fn test_long_call_curve() {
        let prices = linspace(80.0, 130.0, 51);
        let curve = evaluate(&long_call(), &prices).unwrap();

        let at = |p: f64| curve.total_pnl[prices.iter().position(|&x| x == p).unwrap()];
        assert_eq!(at(105.0), -2.0);
        assert_eq!(at(130.0), 23.0);
        assert_eq!(at(80.0), -2.0);

        assert_eq!(curve.breakeven_points.len(), 1);
        assert_abs_diff_eq!(curve.breakeven_points[0], 107.0, epsilon = 1e-12);

        assert_eq!(curve.max_profit, PnlExtreme::Unbounded { sampled: 23.0 });
        assert_eq!(curve.max_loss, PnlExtreme::Bounded(-2.0));
        assert_eq!(curve.net_cost, 2.0);
        assert_eq!(curve.leg_pnl.len(), 1);
        assert_eq!(curve.leg_pnl[0], curve.total_pnl);
    }

    #[test]
    fn test_interpolated_breakeven() {
        // Breakeven at 107.5 falls between samples
        let strategy = Strategy::new(vec![OptionLeg::new(
            OptionType::Call,
            Position::Long,
            105.0,
            2.5,
            1,
        )])
        .unwrap();
        let curve = evaluate(&strategy, &linspace(80.0, 130.0, 26)).unwrap();
        assert_eq!(curve.breakeven_points.len(), 1);
        assert_abs_diff_eq!(curve.breakeven_points[0], 107.5, epsilon = 1e-12);
    }

    #[test]
    fn test_short_call_unbounded_loss() {
        let strategy = Strategy::new(vec![OptionLeg::new(
            OptionType::Call,
            Position::Short,
            105.0,
            2.0,
            2,
        )])
        .unwrap();
        let curve = evaluate(&strategy, &linspace(80.0, 130.0, 51)).unwrap();

        assert_eq!(curve.max_profit, PnlExtreme::Bounded(4.0));
        assert!(curve.max_loss.is_unbounded());
        assert_eq!(curve.max_loss.value(), -46.0);
        assert_eq!(curve.net_cost, -4.0);
    }

    #[test]
    fn test_long_put_is_bounded() {
        let strategy = Strategy::new(vec![OptionLeg::new(
            OptionType::Put,
            Position::Long,
            100.0,
            3.0,
            1,
        )])
        .unwrap();
        let curve = evaluate(&strategy, &linspace(0.0, 150.0, 151)).unwrap();

        assert_eq!(curve.max_profit, PnlExtreme::Bounded(97.0));
        assert_eq!(curve.max_loss, PnlExtreme::Bounded(-3.0));
        assert_abs_diff_eq!(curve.breakeven_points[0], 97.0, epsilon = 1e-12);
    }

    #[test]
    fn test_bounded_extremes_outside_sampled_range() {
        // Put keeps paying below 80; its true maximum is at F = 0
        let long_put = Strategy::new(vec![OptionLeg::new(
            OptionType::Put,
            Position::Long,
            100.0,
            3.0,
            1,
        )])
        .unwrap();
        let curve = evaluate(&long_put, &linspace(80.0, 130.0, 51)).unwrap();
        assert_eq!(curve.max_profit, PnlExtreme::Bounded(97.0));
        assert_eq!(curve.max_loss, PnlExtreme::Bounded(-3.0));
        assert_eq!(*curve.total_pnl.iter().max_by(|a, b| a.total_cmp(b)).unwrap(), 17.0);

        // Range stops below the short strike of a 100/110 call spread
        let spread = Strategy::new(vec![
            OptionLeg::new(OptionType::Call, Position::Long, 100.0, 4.0, 1),
            OptionLeg::new(OptionType::Call, Position::Short, 110.0, 1.0, 1),
        ])
        .unwrap();
        let curve = evaluate(&spread, &linspace(80.0, 105.0, 26)).unwrap();
        assert_eq!(curve.max_profit, PnlExtreme::Bounded(7.0));
        assert_eq!(curve.max_loss, PnlExtreme::Bounded(-3.0));
    }

    #[test]
    fn test_two_breakevens() {
        let strategy = Strategy::new(vec![
            OptionLeg::new(OptionType::Call, Position::Long, 100.0, 2.0, 1),
            OptionLeg::new(OptionType::Put, Position::Long, 100.0, 2.0, 1),
        ])
        .unwrap();
        let curve = evaluate(&strategy, &linspace(80.0, 120.0, 41)).unwrap();
        assert_eq!(curve.breakeven_points, vec![96.0, 104.0]);
        assert_eq!(curve.max_loss, PnlExtreme::Bounded(-4.0));
    }

    #[test]
    fn test_zero_run_reported_once() {
        assert_eq!(
            breakevens(&[1.0, 2.0, 3.0, 4.0, 5.0], &[-1.0, 0.0, 0.0, 1.0, 2.0]),
            vec![2.0]
        );
        assert_eq!(breakevens(&[1.0, 2.0], &[0.0, 0.0]), vec![1.0]);
        assert!(breakevens(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]).is_empty());
    }

    #[test]
    fn test_rejects_invalid() {
        let empty = Strategy { legs: vec![] };
        assert!(evaluate_strategy(&empty, &[100.0, 110.0]).unwrap_err().is_invalid_input());

        assert_eq!(
            evaluate(&long_call(), &[]).unwrap_err().field(),
            Some("price_range")
        );
        assert_eq!(
            evaluate(&long_call(), &[100.0, 90.0]).unwrap_err().field(),
            Some("price_range[1]")
        );
        assert_eq!(
            evaluate(&long_call(), &[-1.0, 90.0]).unwrap_err().field(),
            Some("price_range[0]")
        );

        let zero_qty = Strategy {
            legs: vec![OptionLeg::new(OptionType::Put, Position::Long, 100.0, 1.0, 0)],
        };
        assert_eq!(
            evaluate(&zero_qty, &[100.0]).unwrap_err().field(),
            Some("legs[0].quantity")
        );
    }

    #[test]
    fn test_price_range_around() {
        let range = price_range_around(100.0, 0.25, 51);
        assert_eq!(range.len(), 51);
        assert_eq!(range[0], 75.0);
        assert_eq!(range[50], 125.0);
        assert_eq!(price_range_around(100.0, 1.5, 3)[0], 0.0);
    }

    #[test]
    fn test_before_expiry_matches_expiry_at_zero_time() {
        let prices = linspace(90.0, 120.0, 31);
        let market = MarketInputs::new(100.0, 100.0, 0.0, 0.2, 0.12).unwrap();
        let at_zero_time = evaluate_before_expiry(&long_call(), &prices, &market).unwrap();
        let at_expiry = evaluate(&long_call(), &prices).unwrap();
        assert_eq!(at_zero_time, at_expiry.total_pnl);

        // With time left the long call is worth more than its expiry payoff
        let market = MarketInputs::new(100.0, 100.0, 0.25, 0.2, 0.12).unwrap();
        let early = evaluate_before_expiry(&long_call(), &prices, &market).unwrap();
        assert!(early[15] > at_expiry.total_pnl[15]);
        assert!(evaluate_before_expiry(&long_call(), &[0.0, 1.0], &market).is_err());
    }
}
