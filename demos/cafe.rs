//! Cafe Example
//!
//! Loads the cafe fixture set (four items, three deals) and prints the
//! maximal-savings discount selection.
//!
//! Run with: `cargo run --example cafe`

use std::time::Instant;

use anyhow::Result;

use gavotte::{fixtures::Fixture, solvers::solve};

/// Cafe Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let fixture = Fixture::from_set("cafe")?;

    let start = Instant::now();

    let result = solve(fixture.deals(), fixture.order())?;

    let elapsed = start.elapsed().as_secs_f32();

    println!("Order:");

    for item in fixture.order() {
        println!("  {:<10} {:>6}", item.name, item.price);
    }

    println!("\nSelected discounts:");

    for discount in &result.discounts {
        println!(
            "  {:<40} -{:>5}  (items {:?})",
            discount.name, discount.savings, discount.items
        );
    }

    println!("\nTotal savings: {}", result.total_savings);
    println!("Solution: {elapsed}s");

    Ok(())
}
