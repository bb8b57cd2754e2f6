use chrono::{Duration, Utc};
use log::{error, info};

use market_tracker::models::INSTRUMENTS;
use market_tracker::services::fetch;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    env_logger::init();

    info!("Checking Yahoo Finance chart fetches for all configured instruments...");

    let end = Utc::now();
    let start = end - Duration::days(365);
    let client = fetch::build_client()?;

    let mut failures = 0;
    for instrument in &INSTRUMENTS {
        match fetch::fetch_series(&client, instrument.symbol, start, end).await {
            Ok(series) => {
                let first = &series[0];
                let last = &series[series.len() - 1];
                info!(
                    "SUCCESS: {} ({}): {} rows, {} = {:.2} .. {} = {:.2}",
                    instrument.label,
                    instrument.symbol,
                    series.len(),
                    first.date,
                    first.close,
                    last.date,
                    last.close
                );
            }
            Err(e) => {
                error!("ERROR: {} ({}): {}", instrument.label, instrument.symbol, e);
                failures += 1;
            }
        }
    }

    if failures == INSTRUMENTS.len() {
        return Err("All instrument fetches failed".into());
    }
    Ok(())
}
