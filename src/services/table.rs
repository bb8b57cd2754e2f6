// src/services/table.rs
use std::collections::BTreeSet;

use chrono::NaiveDate;
use log::info;

use crate::error::DataError;
use crate::models::PriceSeries;

/// An ordered mapping from instrument label to a column of closes, all
/// columns sharing one explicit date axis. Columns keep the order in which
/// their series were supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesTable {
    dates: Vec<NaiveDate>,
    columns: Vec<(String, Vec<f64>)>,
}

impl SeriesTable {
    /// Re-index the supplied series onto a shared date axis.
    ///
    /// The axis is the sorted union of every observed date, trimmed so it
    /// starts at the latest first-observation across series (every column is
    /// populated from row 0). Interior gaps, such as weekends in the equity
    /// series, are forward-filled from the last prior close.
    pub fn align(series: Vec<(String, PriceSeries)>) -> Result<SeriesTable, DataError> {
        if series.is_empty() {
            return Ok(SeriesTable { dates: Vec::new(), columns: Vec::new() });
        }

        for (label, points) in &series {
            if points.is_empty() {
                return Err(DataError::new(format!("Series for {} has no rows", label)));
            }
        }

        let mut axis: BTreeSet<NaiveDate> = BTreeSet::new();
        for (_, points) in &series {
            axis.extend(points.iter().map(|p| p.date));
        }

        // Latest first observation across series; earlier axis dates would
        // leave some column without a value to fill from.
        let common_start = series
            .iter()
            .map(|(_, points)| points[0].date)
            .max()
            .ok_or_else(|| DataError::new("No series to align"))?;

        let dates: Vec<NaiveDate> = axis.into_iter().filter(|d| *d >= common_start).collect();
        if dates.is_empty() {
            return Err(DataError::new("Aligned date axis is empty"));
        }

        let mut columns = Vec::with_capacity(series.len());
        for (label, points) in series {
            let mut values = Vec::with_capacity(dates.len());
            let mut cursor = 0usize;
            let mut last_close: Option<f64> = None;

            // Seed the fill with the newest observation at or before the
            // axis start.
            while cursor < points.len() && points[cursor].date < dates[0] {
                last_close = Some(points[cursor].close);
                cursor += 1;
            }

            for date in &dates {
                while cursor < points.len() && points[cursor].date <= *date {
                    last_close = Some(points[cursor].close);
                    cursor += 1;
                }
                match last_close {
                    Some(close) => values.push(close),
                    None => {
                        return Err(DataError::new(format!(
                            "Series for {} has no observation at or before {}",
                            label, date
                        )))
                    }
                }
            }

            columns.push((label, values));
        }

        info!(
            "Aligned {} series onto a {}-row axis starting {}",
            columns.len(),
            dates.len(),
            dates[0]
        );
        Ok(SeriesTable { dates, columns })
    }

    /// Build a table from pre-aligned columns. Callers must supply columns
    /// of the same length as the axis.
    pub fn from_columns(
        dates: Vec<NaiveDate>,
        columns: Vec<(String, Vec<f64>)>,
    ) -> Result<SeriesTable, DataError> {
        for (label, values) in &columns {
            if values.len() != dates.len() {
                return Err(DataError::new(format!(
                    "Column {} has {} rows but the axis has {}",
                    label,
                    values.len(),
                    dates.len()
                )));
            }
        }
        Ok(SeriesTable { dates, columns })
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() || self.dates.is_empty()
    }

    pub fn num_rows(&self) -> usize {
        self.dates.len()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(label, _)| label.as_str())
    }

    pub fn column(&self, label: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, values)| values.as_slice())
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.columns
            .iter()
            .map(|(label, values)| (label.as_str(), values.as_slice()))
    }
}
