//! Sentinel normalization - placeholder strings become real missing values

use crate::cleaning::types::{Column, DType, Dataset};
use tracing::info;

/// Strings that stand in for missing or erroneous data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentinelSet {
    values: Vec<String>,
    blank_is_missing: bool,
}

impl Default for SentinelSet {
    fn default() -> Self {
        SentinelSet::new(["UNKNOWN", "ERROR", "", " "], true)
    }
}

impl SentinelSet {
    pub fn new<I, S>(values: I, blank_is_missing: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SentinelSet {
            values: values.into_iter().map(Into::into).collect(),
            blank_is_missing,
        }
    }

    /// Exact, case-sensitive match, plus whitespace-only strings when enabled
    pub fn is_sentinel(&self, value: &str) -> bool {
        (self.blank_is_missing && value.trim().is_empty())
            || self.values.iter().any(|sentinel| sentinel == value)
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// Replace sentinel strings in every text column with missing.
/// Returns the dataset and the number of cells replaced.
pub fn normalize_sentinels(mut dataset: Dataset, sentinels: &SentinelSet) -> (Dataset, usize) {
    let text_columns: Vec<Column> = Column::ALL
        .into_iter()
        .filter(|column| column.dtype() == DType::Text)
        .collect();

    let mut replaced = 0;

    for row in dataset.iter_mut() {
        for column in &text_columns {
            if let Some(slot) = row.text_mut(*column) {
                if slot.as_deref().is_some_and(|value| sentinels.is_sentinel(value)) {
                    *slot = None;
                    replaced += 1;
                }
            }
        }
    }

    info!("Replaced {} sentinel values with missing", replaced);

    (dataset, replaced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleaning::types::Transaction;

    #[test]
    fn test_default_sentinels() {
        let sentinels = SentinelSet::default();

        assert!(sentinels.is_sentinel("UNKNOWN"));
        assert!(sentinels.is_sentinel("ERROR"));
        assert!(sentinels.is_sentinel(""));
        assert!(sentinels.is_sentinel(" "));
        assert!(sentinels.is_sentinel("   "));

        // Case-sensitive
        assert!(!sentinels.is_sentinel("unknown"));
        assert!(!sentinels.is_sentinel("Error"));
        assert!(!sentinels.is_sentinel("Cash"));
    }

    #[test]
    fn test_strict_sentinels_without_blank_rule() {
        let sentinels = SentinelSet::new(["UNKNOWN", ""], false);

        assert!(sentinels.is_sentinel(""));
        assert!(!sentinels.is_sentinel("  "));
    }

    #[test]
    fn test_normalize_all_text_columns() {
        let dataset = vec![Transaction {
            transaction_id: Some("TXN_1".to_string()),
            item: Some("ERROR".to_string()),
            payment_method: Some("UNKNOWN".to_string()),
            location: Some(" ".to_string()),
            quantity: Some(1.0),
            ..Default::default()
        }];

        let (dataset, replaced) = normalize_sentinels(dataset, &SentinelSet::default());

        assert_eq!(replaced, 3);
        assert_eq!(dataset[0].transaction_id.as_deref(), Some("TXN_1"));
        assert_eq!(dataset[0].item, None);
        assert_eq!(dataset[0].payment_method, None);
        assert_eq!(dataset[0].location, None);
        assert_eq!(dataset[0].quantity, Some(1.0));
    }
}
