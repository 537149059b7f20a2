//! Derived column validation - total spent is recomputed, never trusted

use crate::calculate_total_spent;
use crate::cleaning::types::{Dataset, Transaction};
use crate::cleaning::utils::totals_match;
use tracing::{debug, info, warn};

/// Outcome of recomputing the derived total
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DerivedOutcome {
    /// Rows whose stored total was missing or disagreed
    pub corrected: usize,
    /// Rows still lacking quantity or price, or whose product overflows
    pub dropped: usize,
}

/// Overwrite `total_spent` with `quantity * price_per_unit` for every row.
/// Rows that cannot be recomputed are dropped.
pub fn recompute_total_spent(dataset: Dataset) -> (Dataset, DerivedOutcome) {
    let mut outcome = DerivedOutcome::default();

    let dataset: Dataset = dataset
        .into_iter()
        .filter_map(|row| recompute_row(row, &mut outcome))
        .collect();

    if outcome.dropped > 0 {
        warn!(
            "Dropped {} rows whose total could not be recomputed",
            outcome.dropped
        );
    }
    info!(
        "Recomputed total spent ({} stored values corrected)",
        outcome.corrected
    );

    (dataset, outcome)
}

fn recompute_row(row: Transaction, outcome: &mut DerivedOutcome) -> Option<Transaction> {
    let recomputed = calculate_total_spent(row.quantity, row.price_per_unit)
        .filter(|total| total.is_finite());
    let Some(total) = recomputed else {
        outcome.dropped += 1;
        return None;
    };

    match row.total_spent {
        Some(stored) if totals_match(stored, total) => {}
        stored => {
            debug!(
                "Correcting total for {:?}: {:?} -> {}",
                row.transaction_id, stored, total
            );
            outcome.corrected += 1;
        }
    }

    Some(Transaction {
        total_spent: Some(total),
        ..row
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(quantity: Option<f64>, price: Option<f64>, total: Option<f64>) -> Transaction {
        Transaction {
            transaction_id: Some("TXN_1".to_string()),
            quantity,
            price_per_unit: price,
            total_spent: total,
            ..Default::default()
        }
    }

    #[test]
    fn test_overwrites_wrong_total() {
        let (dataset, outcome) = recompute_total_spent(vec![row(Some(2.0), Some(3.5), Some(999.0))]);

        assert_eq!(dataset[0].total_spent, Some(7.0));
        assert_eq!(outcome.corrected, 1);
    }

    #[test]
    fn test_fills_missing_total() {
        let (dataset, outcome) = recompute_total_spent(vec![row(Some(3.0), Some(1.5), None)]);

        assert_eq!(dataset[0].total_spent, Some(4.5));
        assert_eq!(outcome.corrected, 1);
    }

    #[test]
    fn test_consistent_total_not_counted() {
        let (dataset, outcome) = recompute_total_spent(vec![row(Some(4.0), Some(1.0), Some(4.0))]);

        assert_eq!(dataset[0].total_spent, Some(4.0));
        assert_eq!(outcome.corrected, 0);
    }

    #[test]
    fn test_drops_rows_with_overflowing_total() {
        let dataset = vec![
            row(Some(1e200), Some(1e200), Some(1.0)),
            row(Some(2.0), Some(3.5), Some(7.0)),
        ];

        let (dataset, outcome) = recompute_total_spent(dataset);

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset[0].total_spent, Some(7.0));
        assert_eq!(outcome.dropped, 1);
        assert!(dataset.iter().all(|r| r.total_spent.is_some_and(f64::is_finite)));
    }

    #[test]
    fn test_drops_rows_without_inputs() {
        let dataset = vec![
            row(Some(1.0), Some(2.0), Some(2.0)),
            row(None, Some(2.0), Some(2.0)),
            row(Some(1.0), None, None),
        ];

        let (dataset, outcome) = recompute_total_spent(dataset);

        assert_eq!(dataset.len(), 1);
        assert_eq!(outcome.dropped, 2);
    }
}
