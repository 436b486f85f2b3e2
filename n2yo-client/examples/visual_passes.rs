use anyhow::{Context, Result};
use n2yo_client::Client;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let api_key = std::env::var("N2YO_API_KEY").context("N2YO_API_KEY not set")?;
    let client = Client::new(api_key)?;

    // ISS over an observer in Pennsylvania, visible for at least five minutes
    let result = client
        .get_visual_passes(25544, 41.702, -76.014, 0.0, 7, Duration::from_secs(300))
        .await?;

    tracing::info!(
        "{} visible passes of {} in the next 7 days ({} transactions used)",
        result.context.passes.len(),
        result.context.satellite.name,
        result.transaction_count
    );

    for pass in &result.context.passes {
        println!(
            "rise {}  set {}  peak {:.0} deg  mag {:.1}  visible {} s",
            pass.pass.rise,
            pass.pass.set,
            pass.pass.elevation,
            pass.magnitude,
            pass.duration.as_secs()
        );
    }

    Ok(())
}
