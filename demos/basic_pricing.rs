//! Example: Black-76 pricing of an NSE futures option
//!
//! Run with: cargo run --example basic_pricing

use nse_options::prelude::*;

fn main() -> NseResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Contract parameters
    let futures = 100.0;
    let strike = 105.0;
    let days = 30.0;
    let vol = 0.20; // 20% volatility
    let rate = 0.12; // 12% risk-free rate

    let inputs = MarketInputs::new(futures, strike, days_to_years(days), vol, rate)?;

    println!("=== Black-76 Pricing ===\n");
    println!("Futures:  {:.2}", futures);
    println!("Strike:   {:.2}", strike);
    println!("Time:     {:.4} years ({:.0} days)", inputs.time_to_expiry, days);
    println!("Rate:     {:.1}%", rate * 100.0);
    println!("Vol:      {:.1}%\n", vol * 100.0);

    let pricing = black76::price(&inputs)?;
    println!("Call Price: {:.4}", pricing.call_price);
    println!("Put Price:  {:.4}", pricing.put_price);
    if let (Some(d1), Some(d2)) = (pricing.d1, pricing.d2) {
        println!("d1 = {:.4}, d2 = {:.4}", d1, d2);
    }

    // Put-call parity: C - P = e^(-rT) (F - K)
    let parity_lhs = pricing.call_price - pricing.put_price;
    let parity_rhs = inputs.discount_factor() * (futures - strike);
    println!("\nPut-Call Parity Check:");
    println!("  C - P = {:.6}", parity_lhs);
    println!("  e^(-rT)(F - K) = {:.6}", parity_rhs);
    println!("  Difference: {:.2e}", (parity_lhs - parity_rhs).abs());

    for side in [OptionType::Call, OptionType::Put] {
        let g = greeks(&inputs, &pricing, side);
        println!("\n=== Greeks ({:?}) ===\n", side);
        println!("Delta:  {:.4}", g.delta);
        println!("Gamma:  {:.4}", g.gamma);
        println!("Vega:   {:.4} (per 1%: {:.4})", g.vega, g.vega_per_pct());
        println!("Theta:  {:.4} (per day: {:.4})", g.theta, g.theta_per_day());
        println!("Rho:    {:.4} (per 1%: {:.4})", g.rho, g.rho_per_pct());
    }

    // Fee overlay for a 1,000-unit contract
    let contract = FuturesContract::new(
        "SCOM-DEC26",
        "SCOM",
        1000.0,
        chrono::NaiveDate::from_ymd_opt(2026, 12, 17).expect("valid date"),
    );
    let schedule = FeeSchedule::nse_derivatives();
    let quote = apply_fees(pricing.call_price, contract.notional(futures), &schedule);
    println!("\n=== Fees ({}) ===\n", contract.symbol);
    for (name, amount) in schedule.breakdown(contract.notional(futures)) {
        println!("{:<14} {:.2}", name, amount);
    }
    println!("Total fees:     {:.2}", quote.total_fees);
    println!("Call with fees: {:.4}", quote.price_with_fees);

    // Implied volatility
    println!("\n=== Implied Volatility ===\n");
    let market_price = pricing.call_price + 0.25;
    match implied_volatility(market_price, &inputs, OptionType::Call) {
        Ok(iv) => println!("Market price {:.4} implies vol: {:.2}%", market_price, iv * 100.0),
        Err(e) => println!("Could not solve for IV: {}", e),
    }

    // Call heatmap around the current price
    let config = EngineConfig::default();
    let spec = config.heatmap_spec(futures)?;
    let grid = build_grid(&inputs, &spec)?;
    let (rows, cols) = spec.shape();
    println!("\n=== Call Heatmap ({} x {}) ===\n", rows, cols);
    print!("{:>8}", "F \\ vol");
    for vol in spec.volatility_range().iter().step_by(3) {
        print!("{:>9.0}%", vol * 100.0);
    }
    println!();
    for (i, price) in spec.price_range().iter().enumerate().step_by(4) {
        print!("{:>8.1}", price);
        for j in (0..cols).step_by(3) {
            print!("{:>10.4}", grid.call_grid[[i, j]]);
        }
        println!();
    }

    Ok(())
}
