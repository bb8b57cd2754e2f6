// src/services/returns.rs
use std::cmp::Ordering;

use crate::error::DataError;
use crate::services::table::SeriesTable;

/// One instrument's return summary, carrying the running per-date return
/// series used for hover annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedSeries {
    pub label: String,
    pub total_return: f64,
    pub running_returns: Vec<f64>,
}

/// Percentage change from the first to the last value.
pub fn total_return(values: &[f64]) -> f64 {
    let first = values[0];
    let last = values[values.len() - 1];
    (last - first) / first * 100.0
}

/// Percentage change from the first value at every point, including the
/// first (always 0.0).
pub fn running_returns(values: &[f64]) -> Vec<f64> {
    let first = values[0];
    values.iter().map(|v| (v - first) / first * 100.0).collect()
}

/// Order instruments by total return, best performer first. Ties break
/// alphabetically by label so the ordering is reproducible.
pub fn rank_by_return(table: &SeriesTable) -> Result<Vec<RankedSeries>, DataError> {
    if table.is_empty() {
        return Err(DataError::new("Cannot rank an empty table"));
    }

    let mut ranked = Vec::new();
    for (label, values) in table.columns() {
        if values[0] == 0.0 {
            return Err(DataError::new(format!(
                "First value for {} is zero; return is undefined",
                label
            )));
        }
        ranked.push(RankedSeries {
            label: label.to_string(),
            total_return: total_return(values),
            running_returns: running_returns(values),
        });
    }

    ranked.sort_by(|a, b| {
        b.total_return
            .partial_cmp(&a.total_return)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.label.cmp(&b.label))
    });

    Ok(ranked)
}

/// Trace name shown in the legend, e.g. `Bitcoin (42.7%)`.
pub fn format_trace_name(label: &str, total_return: f64) -> String {
    format!("{} ({:.1}%)", label, total_return)
}
