// src/services/fetch.rs
use chrono::{DateTime, NaiveDate, Utc};
use log::{info, warn};
use reqwest::Client;
use serde::Deserialize;

use crate::models::{PricePoint, PriceSeries, INSTRUMENTS};
use crate::BoxError;

const YAHOO_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    close: Option<Vec<Option<f64>>>,
}

pub fn build_client() -> Result<Client, BoxError> {
    let client = Client::builder()
        .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
        .build()?;
    Ok(client)
}

/// Fetch daily closes for one symbol over [start, end) from the Yahoo
/// Finance chart endpoint. Rows with a null close are skipped.
pub async fn fetch_series(
    client: &Client,
    symbol: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<PriceSeries, BoxError> {
    let url = format!(
        "{}/{}?period1={}&period2={}&interval=1d",
        YAHOO_CHART_URL,
        symbol,
        start.timestamp(),
        end.timestamp()
    );
    info!("Fetching chart data from URL: {}", url);

    let response = client.get(&url).send().await?;
    if !response.status().is_success() {
        return Err(format!("Yahoo Finance returned status {} for {}", response.status(), symbol).into());
    }

    let body: ChartResponse = response.json().await?;

    if let Some(err) = body.chart.error {
        return Err(format!("Yahoo Finance error for {}: {} ({})", symbol, err.description, err.code).into());
    }

    let result = body
        .chart
        .result
        .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
        .ok_or_else(|| format!("No chart result for {}", symbol))?;

    let timestamps = result
        .timestamp
        .ok_or_else(|| format!("No timestamps for {}", symbol))?;
    let closes = result
        .indicators
        .quote
        .first()
        .and_then(|q| q.close.as_ref())
        .ok_or_else(|| format!("No close prices for {}", symbol))?;

    let mut series: PriceSeries = timestamps
        .iter()
        .zip(closes.iter())
        .filter_map(|(&ts, close)| {
            let close = (*close)?;
            let date = date_from_timestamp(ts)?;
            Some(PricePoint { date, close })
        })
        .collect();
    series.sort_by_key(|p| p.date);
    series.dedup_by_key(|p| p.date);

    if series.is_empty() {
        return Err(format!("Empty price series for {}", symbol).into());
    }

    info!("Fetched {} closes for {}", series.len(), symbol);
    Ok(series)
}

fn date_from_timestamp(ts: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp(ts, 0).map(|dt| dt.date_naive())
}

/// Fetch all configured instruments one at a time. A failed or empty fetch
/// is logged and that instrument is left out; the run carries on with the
/// series that succeeded, in schema order.
pub async fn fetch_market_data(
    client: &Client,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<(String, PriceSeries)> {
    let mut fetched = Vec::with_capacity(INSTRUMENTS.len());

    for instrument in &INSTRUMENTS {
        match fetch_series(client, instrument.symbol, start, end).await {
            Ok(series) => {
                fetched.push((instrument.label.to_string(), series));
            }
            Err(e) => {
                warn!(
                    "No data available for {} ({}): {}",
                    instrument.label, instrument.symbol, e
                );
            }
        }
    }

    fetched
}
