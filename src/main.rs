use anyhow::Context;
use chrono::{Duration, Utc};
use log::info;
use std::path::Path;

use market_tracker::services::{fetch, normalize, render, returns, table};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize the logger
    env_logger::init();
    info!("Logger initialized. Starting the market tracker...");

    let end = Utc::now();
    let start = end - Duration::days(365);
    info!("Tracking window: {} to {}", start.date_naive(), end.date_naive());

    let client = fetch::build_client().map_err(|e| anyhow::anyhow!(e))?;
    let series = fetch::fetch_market_data(&client, start, end).await;
    info!("Fetched {} of {} instruments", series.len(), market_tracker::models::INSTRUMENTS.len());

    let aligned = table::SeriesTable::align(series).context("Failed to align fetched series")?;
    let normalized = normalize::normalize(&aligned).context("Failed to normalize series")?;
    let ranked = returns::rank_by_return(&normalized).context("Failed to rank series")?;

    for entry in &ranked {
        info!("{}", returns::format_trace_name(&entry.label, entry.total_return));
    }

    let traces = render::build_traces(&normalized, &ranked);
    let layout = render::build_layout();
    let html = render::render_page(&traces, &layout, Utc::now()).map_err(|e| anyhow::anyhow!(e))?;
    render::write_report(Path::new(render::OUTPUT_PATH), &html).map_err(|e| anyhow::anyhow!(e))?;

    info!("Done. Report written to {}", render::OUTPUT_PATH);
    Ok(())
}
