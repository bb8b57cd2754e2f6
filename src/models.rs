// src/models.rs
use serde::{Serialize, Deserialize};
use chrono::NaiveDate;

/// Line styling applied to an instrument's chart trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub width: f64,
}

impl LineStyle {
    pub const fn standard() -> Self {
        LineStyle { width: 2.0 }
    }

    pub const fn emphasized() -> Self {
        LineStyle { width: 3.0 }
    }
}

/// One tracked asset: display label, Yahoo Finance symbol, and trace styling.
#[derive(Debug, Clone, Copy)]
pub struct Instrument {
    pub label: &'static str,
    pub symbol: &'static str,
    pub style: LineStyle,
}

/// The fixed instrument set. Declared statically so downstream code never
/// branches on label strings to decide styling or membership.
pub const INSTRUMENTS: [Instrument; 4] = [
    Instrument { label: "S&P 500", symbol: "^GSPC", style: LineStyle::standard() },
    Instrument { label: "WTI Crude", symbol: "CL=F", style: LineStyle::standard() },
    Instrument { label: "Bitcoin", symbol: "BTC-USD", style: LineStyle::standard() },
    Instrument { label: "Ethereum", symbol: "ETH-USD", style: LineStyle::emphasized() },
];

/// Look up the configured style for a label; unknown labels get the
/// standard width.
pub fn style_for(label: &str) -> LineStyle {
    INSTRUMENTS
        .iter()
        .find(|i| i.label == label)
        .map(|i| i.style)
        .unwrap_or(LineStyle::standard())
}

/// A single daily close for one instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Date-ordered closing prices for one instrument, ascending by date.
pub type PriceSeries = Vec<PricePoint>;
