use anyhow::{Context, Result};

use market_ribbon::generator::{generate, DEFAULT_START_PRICE};

const DEFAULT_SAMPLE_STEPS: usize = 15;

fn main() -> Result<()> {
    let steps = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse()
            .with_context(|| format!("invalid step count '{}'", arg))?,
        None => DEFAULT_SAMPLE_STEPS,
    };
    let series = generate(steps, DEFAULT_START_PRICE)?;
    println!("{}", serde_json::to_string_pretty(&series)?);
    Ok(())
}
