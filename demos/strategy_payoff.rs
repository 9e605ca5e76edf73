//! Example: Expiration payoffs for multi-leg strategies
//!
//! Run with: cargo run --example strategy_payoff

use nse_options::prelude::*;

fn describe(name: &str, curve: &PayoffCurve) {
    let extreme = |e: &PnlExtreme| match e {
        PnlExtreme::Bounded(v) => format!("{:.2}", v),
        PnlExtreme::Unbounded { sampled } => format!("unbounded (sampled {:.2})", sampled),
    };

    println!("=== {} ===", name);
    println!("Net cost:    {:.2}", curve.net_cost);
    println!("Max profit:  {}", extreme(&curve.max_profit));
    println!("Max loss:    {}", extreme(&curve.max_loss));
    let breakevens: Vec<String> = curve
        .breakeven_points
        .iter()
        .map(|b| format!("{:.2}", b))
        .collect();
    println!("Breakevens:  [{}]\n", breakevens.join(", "));
}

fn main() -> NseResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let prices = linspace(80.0, 130.0, 51);

    // Long 105 call bought for 2.0
    let long_call = Strategy::new(vec![OptionLeg::new(
        OptionType::Call,
        Position::Long,
        105.0,
        2.0,
        1,
    )])?;
    describe("Long Call 105", &evaluate(&long_call, &prices)?);

    // Spreads priced off the market with Black-76
    let market = MarketInputs::new(100.0, 100.0, days_to_years(30.0), 0.20, 0.12)?;
    let priced = |side, position, strike| OptionLeg::priced(side, position, strike, 1, &market);

    let bull = Strategy::new(vec![
        priced(OptionType::Call, Position::Long, 100.0)?,
        priced(OptionType::Call, Position::Short, 110.0)?,
    ])?;
    describe("Bull Call Spread 100/110", &evaluate(&bull, &prices)?);

    let condor = presets::iron_condor((90.0, 0.5), (95.0, 1.5), (105.0, 1.5), (110.0, 0.5), 1)?;
    describe("Iron Condor 90/95/105/110", &evaluate(&condor, &prices)?);

    let straddle = Strategy::new(vec![
        priced(OptionType::Call, Position::Long, 100.0)?,
        priced(OptionType::Put, Position::Long, 100.0)?,
    ])?;
    let curve = evaluate(&straddle, &prices)?;
    describe("Long Straddle 100", &curve);

    let g = straddle.net_greeks(&market)?;
    println!(
        "Straddle Greeks: delta {:.4}, gamma {:.4}, vega {:.4}, theta/day {:.4}\n",
        g.delta,
        g.gamma,
        g.vega,
        g.theta_per_day()
    );

    // Expiry vs 30 days out
    let today = evaluate_before_expiry(&straddle, &prices, &market)?;
    println!("{:>8} {:>10} {:>10}", "F", "expiry", "today");
    for i in (0..prices.len()).step_by(5) {
        println!("{:>8.1} {:>10.4} {:>10.4}", prices[i], curve.total_pnl[i], today[i]);
    }

    Ok(())
}
