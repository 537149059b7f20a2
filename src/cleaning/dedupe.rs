//! Deduplication - collapse rows identical across every column

use crate::cleaning::types::{Column, ColumnAccess, Dataset, Transaction};
use std::collections::HashSet;
use tracing::info;

/// Keep the first occurrence of each distinct row, preserving order.
/// Returns the dataset and the number of duplicates removed.
pub fn deduplicate(dataset: Dataset) -> (Dataset, usize) {
    let before = dataset.len();
    let mut seen = HashSet::with_capacity(before);

    let dataset: Dataset = dataset
        .into_iter()
        .filter(|row| seen.insert(row_key(row)))
        .collect();

    let removed = before - dataset.len();
    if removed > 0 {
        info!("Found and removed {} duplicate rows", removed);
    } else {
        info!("No duplicate rows found");
    }

    (dataset, removed)
}

/// Rendered cells; missing compares equal to missing
fn row_key(row: &Transaction) -> Vec<Option<String>> {
    Column::ALL.iter().map(|column| row.cell(*column)).collect()
}
