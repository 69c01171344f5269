use anyhow::{anyhow, bail, Context, Result};

use crypto_heatmap::config::Config;
use crypto_heatmap::feed::{MarketDataClient, Payload};
use crypto_heatmap::heatmap::HeatmapRenderer;
use crypto_heatmap::model::metric::normalize;
use crypto_heatmap::model::series::HeatmapSeries;

/// Fetch the endpoint once and print the metrics and blocks it would render.
#[tokio::main]
async fn main() -> Result<()> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow!("failed to install rustls crypto provider"))?;

    let config = Config::load()?;
    let client = MarketDataClient::new(&config.feed.endpoint, config.feed.request_timeout())
        .context("failed to build HTTP client")?;

    println!("heatmap probe: {}", client.endpoint());
    println!("==============");

    let records = match client.fetch().await.context("fetch failed")? {
        Payload::Records(records) => records,
        Payload::Empty => bail!("endpoint returned an empty array"),
        Payload::Invalid => bail!("endpoint returned a non-array body"),
    };

    let metrics = normalize(&records);
    let series = HeatmapSeries::from_metrics(&metrics);
    println!(
        "{} records, {} usable metrics\n",
        records.len(),
        metrics.len()
    );

    let mut renderer = HeatmapRenderer::new(config.heatmap);
    renderer.update(&series);

    println!(
        "{:<14} {:>18} {:>10} {:>8}  color",
        "symbol", "market cap", "change", "px"
    );
    for block in renderer.blocks() {
        let market_cap = series
            .iter()
            .find(|(symbol, _, _)| *symbol == block.symbol)
            .map_or(f64::NAN, |(_, size, _)| size);
        println!(
            "{:<14} {:>18.2} {:>10} {:>8.1}  {}",
            block.symbol, market_cap, block.label, block.size_px, block.color
        );
    }

    Ok(())
}
