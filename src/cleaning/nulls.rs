//! Null handling - drop rows missing essential data, impute contextual gaps
//!
//! What happens to a missing value is decided per column by a [`NullPolicy`]
//! map rather than inline conditionals, so the essential/contextual split is
//! stated in one place.

use crate::cleaning::error::{CleaningError, Result};
use crate::cleaning::normalize::SentinelSet;
use crate::cleaning::types::{Column, DType, Dataset, Imputed};
use crate::cleaning::utils::most_frequent;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Placeholder category for contextual columns
pub const UNKNOWN_PLACEHOLDER: &str = "Unknown";

/// How a missing contextual value is filled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Imputation {
    /// Fixed placeholder category
    Constant(String),
    /// Most frequent value among retained rows
    Mode,
}

/// What to do with a missing value in a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnPolicy {
    /// Essential: drop the whole row
    Drop,
    /// Contextual: fill the cell
    Impute(Imputation),
    /// Leave the cell missing
    Keep,
}

/// Per-column null policy map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NullPolicy {
    policies: BTreeMap<Column, ColumnPolicy>,
}

impl Default for NullPolicy {
    fn default() -> Self {
        let placeholder = || ColumnPolicy::Impute(Imputation::Constant(UNKNOWN_PLACEHOLDER.to_string()));

        NullPolicy::empty()
            .with(Column::TransactionId, ColumnPolicy::Drop)
            .with(Column::Item, ColumnPolicy::Drop)
            .with(Column::Quantity, ColumnPolicy::Drop)
            .with(Column::PricePerUnit, ColumnPolicy::Drop)
            .with(Column::TransactionDate, ColumnPolicy::Drop)
            .with(Column::PaymentMethod, placeholder())
            .with(Column::Location, placeholder())
            // Recomputed from quantity and price later on
            .with(Column::TotalSpent, ColumnPolicy::Keep)
    }
}

impl NullPolicy {
    /// Policy map with every column set to `Keep`
    pub fn empty() -> Self {
        NullPolicy {
            policies: BTreeMap::new(),
        }
    }

    pub fn with(mut self, column: Column, policy: ColumnPolicy) -> Self {
        self.policies.insert(column, policy);
        self
    }

    pub fn policy(&self, column: Column) -> ColumnPolicy {
        self.policies
            .get(&column)
            .cloned()
            .unwrap_or(ColumnPolicy::Keep)
    }

    pub fn essential_columns(&self) -> Vec<Column> {
        Column::ALL
            .into_iter()
            .filter(|column| self.policy(*column) == ColumnPolicy::Drop)
            .collect()
    }

    pub fn contextual_columns(&self) -> Vec<(Column, Imputation)> {
        Column::ALL
            .into_iter()
            .filter_map(|column| match self.policy(column) {
                ColumnPolicy::Impute(imputation) => Some((column, imputation)),
                _ => None,
            })
            .collect()
    }

    /// Switch every imputed column to the given strategy
    pub fn with_imputation(mut self, imputation: Imputation) -> Self {
        for policy in self.policies.values_mut() {
            if let ColumnPolicy::Impute(current) = policy {
                *current = imputation.clone();
            }
        }
        self
    }

    /// Reject imputation on typed columns and fill values that are themselves sentinels
    pub fn validate(&self, sentinels: &SentinelSet) -> Result<()> {
        for (column, imputation) in self.contextual_columns() {
            if column.dtype() != DType::Text {
                return Err(CleaningError::InvalidPolicy {
                    column,
                    reason: format!("cannot impute a {} column", column.dtype()),
                });
            }

            if let Imputation::Constant(value) = &imputation {
                if sentinels.is_sentinel(value) {
                    return Err(CleaningError::InvalidPolicy {
                        column,
                        reason: format!("fill value {:?} is a sentinel", value),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Outcome of the null handling step
#[derive(Debug, Default, Clone, PartialEq)]
pub struct NullOutcome {
    pub dropped: usize,
    pub imputed: BTreeMap<Column, Imputed>,
}

/// Drop rows missing any essential column, then impute contextual columns.
/// Drops run first so mode imputation only sees retained rows.
pub fn handle_nulls(dataset: Dataset, policy: &NullPolicy) -> (Dataset, NullOutcome) {
    let essential = policy.essential_columns();
    let before = dataset.len();

    let mut dataset: Dataset = dataset
        .into_iter()
        .filter(|row| !essential.iter().any(|column| row.is_missing(*column)))
        .collect();

    let mut outcome = NullOutcome {
        dropped: before - dataset.len(),
        ..Default::default()
    };
    info!("Removed {} rows with missing essential data", outcome.dropped);

    for (column, imputation) in policy.contextual_columns() {
        let fill = match imputation {
            Imputation::Constant(value) => value,
            Imputation::Mode => most_frequent(dataset.iter().filter_map(|row| row.text(column)))
                .unwrap_or_else(|| {
                    debug!("No values in '{}' to take a mode from", column);
                    UNKNOWN_PLACEHOLDER.to_string()
                }),
        };

        let mut count = 0;
        for row in dataset.iter_mut() {
            if let Some(slot) = row.text_mut(column) {
                if slot.is_none() {
                    *slot = Some(fill.clone());
                    count += 1;
                }
            }
        }

        info!("Filled {} missing values in '{}' with '{}'", count, column, fill);
        outcome.imputed.insert(column, Imputed { value: fill, count });
    }

    (dataset, outcome)
}
