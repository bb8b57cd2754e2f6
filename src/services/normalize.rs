// src/services/normalize.rs
use crate::error::DataError;
use crate::services::table::SeriesTable;

/// Rescale every column so its first value is 100, preserving relative
/// movement. Pure transform; the output table has the same shape and
/// column order as the input.
pub fn normalize(table: &SeriesTable) -> Result<SeriesTable, DataError> {
    if table.is_empty() {
        return Err(DataError::new(
            "Cannot normalize an empty table; every instrument fetch failed",
        ));
    }

    let mut columns = Vec::new();
    for (label, values) in table.columns() {
        let first = values[0];
        if first == 0.0 {
            return Err(DataError::new(format!(
                "First close for {} is zero; cannot rebase to 100",
                label
            )));
        }
        let rebased: Vec<f64> = values.iter().map(|v| v / first * 100.0).collect();
        columns.push((label.to_string(), rebased));
    }

    SeriesTable::from_columns(table.dates().to_vec(), columns)
}
