//! Price and Greek surfaces
//!
//! Evaluates Black-76 over a (futures price × volatility) mesh for heatmaps.
//! Cells are independent; rows are evaluated in parallel and written back
//! by index, so the output layout always follows the input axes:
//! `grid[[i, j]]` is the value at `price_range[i]`, `volatility_range[j]`.

use ndarray::Array2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::{Greeks, MarketInputs, NseError, NseResult, OptionType};
use crate::models::black76::{price_unchecked, PricingResult};
use crate::models::greeks::greeks;

/// Heatmap axes
///
/// Both axes are non-empty and strictly increasing; prices are > 0 and
/// volatilities >= 0. Construct with [`GridSpec::new`] or [`GridSpec::around`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridSpec {
    price_range: Vec<f64>,
    volatility_range: Vec<f64>,
}

impl GridSpec {
    pub fn new(price_range: Vec<f64>, volatility_range: Vec<f64>) -> NseResult<Self> {
        check_axis("price_range", &price_range, |p| p > 0.0)?;
        check_axis("volatility_range", &volatility_range, |v| v >= 0.0)?;
        Ok(Self {
            price_range,
            volatility_range,
        })
    }

    /// Evenly spaced axes: prices within ±`price_width` (a fraction) of
    /// `center_price`, volatilities from `vol_min` to `vol_max`
    pub fn around(
        center_price: f64,
        price_width: f64,
        price_steps: usize,
        vol_min: f64,
        vol_max: f64,
        vol_steps: usize,
    ) -> NseResult<Self> {
        let prices = linspace(
            center_price * (1.0 - price_width),
            center_price * (1.0 + price_width),
            price_steps,
        );
        Self::new(prices, linspace(vol_min, vol_max, vol_steps))
    }

    pub fn price_range(&self) -> &[f64] {
        &self.price_range
    }

    pub fn volatility_range(&self) -> &[f64] {
        &self.volatility_range
    }

    /// (rows, columns) = (prices, volatilities)
    pub fn shape(&self) -> (usize, usize) {
        (self.price_range.len(), self.volatility_range.len())
    }
}

fn check_axis(field: &str, axis: &[f64], in_domain: impl Fn(f64) -> bool) -> NseResult<()> {
    if axis.is_empty() {
        return Err(NseError::invalid_input(field, "must not be empty"));
    }
    for (i, &value) in axis.iter().enumerate() {
        if !value.is_finite() || !in_domain(value) {
            return Err(NseError::invalid_input(
                format!("{field}[{i}]"),
                format!("out of domain: {value}"),
            ));
        }
        if i > 0 && value <= axis[i - 1] {
            return Err(NseError::invalid_input(
                format!("{field}[{i}]"),
                format!("must be strictly increasing ({} then {value})", axis[i - 1]),
            ));
        }
    }
    Ok(())
}

/// `n` evenly spaced points from `start` to `end` inclusive
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut points: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            points[n - 1] = end;
            points
        }
    }
}

/// Call and put value surfaces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceGrid {
    pub price_range: Vec<f64>,
    pub volatility_range: Vec<f64>,
    /// [price_idx, vol_idx] -> call value
    pub call_grid: Array2<f64>,
    /// [price_idx, vol_idx] -> put value
    pub put_grid: Array2<f64>,
}

impl PriceGrid {
    pub fn grid(&self, option_type: OptionType) -> &Array2<f64> {
        match option_type {
            OptionType::Call => &self.call_grid,
            OptionType::Put => &self.put_grid,
        }
    }
}

/// Which sensitivity a Greek surface plots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GreekKind {
    Delta,
    Gamma,
    Vega,
    Theta,
    Rho,
}

impl GreekKind {
    pub fn select(&self, greeks: &Greeks) -> f64 {
        match self {
            GreekKind::Delta => greeks.delta,
            GreekKind::Gamma => greeks.gamma,
            GreekKind::Vega => greeks.vega,
            GreekKind::Theta => greeks.theta,
            GreekKind::Rho => greeks.rho,
        }
    }
}

/// Black-76 call/put values over the grid; `base` supplies K, T and r
pub fn build_grid(base: &MarketInputs, spec: &GridSpec) -> NseResult<PriceGrid> {
    let rows = evaluate_rows(base, spec, |_, pricing| *pricing)?;
    let shape = spec.shape();

    Ok(PriceGrid {
        price_range: spec.price_range.clone(),
        volatility_range: spec.volatility_range.clone(),
        call_grid: Array2::from_shape_fn(shape, |(i, j)| rows[i][j].call_price),
        put_grid: Array2::from_shape_fn(shape, |(i, j)| rows[i][j].put_price),
    })
}

/// One Greek for one side over the grid
pub fn build_greek_grid(
    base: &MarketInputs,
    spec: &GridSpec,
    option_type: OptionType,
    kind: GreekKind,
) -> NseResult<Array2<f64>> {
    let rows = evaluate_rows(base, spec, |cell, pricing| {
        kind.select(&greeks(cell, pricing, option_type))
    })?;
    Ok(Array2::from_shape_fn(spec.shape(), |(i, j)| rows[i][j]))
}

fn evaluate_rows<T, F>(
    base: &MarketInputs,
    spec: &GridSpec,
    cell_value: F,
) -> NseResult<Vec<Vec<T>>>
where
    T: Send,
    F: Fn(&MarketInputs, &PricingResult) -> T + Sync,
{
    // Axes are already in-domain; this checks K, T and r
    base.with_futures_price(spec.price_range[0])
        .with_volatility(spec.volatility_range[0])
        .validate()?;

    Ok(spec
        .price_range
        .par_iter()
        .map(|&futures_price| {
            spec.volatility_range
                .iter()
                .map(|&vol| {
                    let cell = base.with_futures_price(futures_price).with_volatility(vol);
                    cell_value(&cell, &price_unchecked(&cell))
                })
                .collect()
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::black76::price;
    use approx::assert_relative_eq;

    fn base() -> MarketInputs {
        MarketInputs::new(100.0, 105.0, 30.0 / 365.0, 0.2, 0.12).unwrap()
    }

    #[test]
    fn test_linspace() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(5.0, 9.0, 1), vec![5.0]);
        assert_eq!(linspace(80.0, 130.0, 51)[25], 105.0);
        assert_eq!(*linspace(0.1, 0.7, 7).last().unwrap(), 0.7);
    }

    #[test]
    fn test_spec_validation() {
        assert!(GridSpec::new(vec![], vec![0.2]).unwrap_err().is_invalid_input());
        assert_eq!(
            GridSpec::new(vec![90.0], vec![]).unwrap_err().field(),
            Some("volatility_range")
        );
        assert_eq!(
            GridSpec::new(vec![90.0, 90.0], vec![0.2]).unwrap_err().field(),
            Some("price_range[1]")
        );
        assert_eq!(
            GridSpec::new(vec![0.0, 90.0], vec![0.2]).unwrap_err().field(),
            Some("price_range[0]")
        );
        assert_eq!(
            GridSpec::new(vec![90.0], vec![0.3, 0.2]).unwrap_err().field(),
            Some("volatility_range[1]")
        );
        assert!(GridSpec::new(vec![90.0], vec![-0.1]).is_err());
        // Zero vol column is allowed
        assert!(GridSpec::new(vec![90.0, 100.0], vec![0.0, 0.2]).is_ok());
    }

    #[test]
    fn test_around() {
        let spec = GridSpec::around(100.0, 0.2, 5, 0.25, 0.75, 3).unwrap();
        assert_eq!(spec.price_range(), &[80.0, 90.0, 100.0, 110.0, 120.0]);
        assert_eq!(spec.volatility_range(), &[0.25, 0.5, 0.75]);
        assert_eq!(spec.shape(), (5, 3));
        // Lower edge would hit zero
        assert!(GridSpec::around(100.0, 1.0, 5, 0.25, 0.75, 3).is_err());
    }

    #[test]
    fn test_grid_matches_pointwise_pricing() {
        let spec = GridSpec::new(vec![90.0, 100.0, 110.0], vec![0.0, 0.15, 0.3, 0.45]).unwrap();
        let grid = build_grid(&base(), &spec).unwrap();

        assert_eq!(grid.call_grid.dim(), (3, 4));
        for (i, &f) in spec.price_range().iter().enumerate() {
            for (j, &vol) in spec.volatility_range().iter().enumerate() {
                let expected = price(&base().with_futures_price(f).with_volatility(vol)).unwrap();
                assert_eq!(grid.call_grid[[i, j]], expected.call_price);
                assert_eq!(grid.put_grid[[i, j]], expected.put_price);
            }
        }
        assert_eq!(grid.grid(OptionType::Put), &grid.put_grid);
    }

    #[test]
    fn test_grid_rejects_invalid_base() {
        let spec = GridSpec::new(vec![100.0], vec![0.2]).unwrap();
        let bad = MarketInputs {
            time_to_expiry: -1.0,
            ..base()
        };
        assert_eq!(build_grid(&bad, &spec).unwrap_err().field(), Some("time_to_expiry"));
    }

    #[test]
    fn test_greek_grid() {
        let spec = GridSpec::around(100.0, 0.1, 11, 0.1, 0.4, 4).unwrap();
        let deltas = build_greek_grid(&base(), &spec, OptionType::Call, GreekKind::Delta).unwrap();
        let vegas = build_greek_grid(&base(), &spec, OptionType::Call, GreekKind::Vega).unwrap();

        assert_eq!(deltas.dim(), (11, 4));
        // Call delta rises with the futures price along every column
        for j in 0..4 {
            for i in 1..11 {
                assert!(deltas[[i, j]] > deltas[[i - 1, j]]);
            }
        }
        assert!(vegas.iter().all(|&v| v > 0.0));

        let cell = base()
            .with_futures_price(spec.price_range()[3])
            .with_volatility(spec.volatility_range()[1]);
        let expected = crate::models::greeks_for(&cell, OptionType::Call).unwrap();
        assert_relative_eq!(deltas[[3, 1]], expected.delta, epsilon = 1e-15);
    }
}
