//! Diagnosis - read-only profiling of a dataset

use crate::cleaning::types::{Column, ColumnAccess, ColumnProfile, Diagnosis, ValueCount};
use std::collections::HashMap;
use tracing::info;

/// Profile every column: nulls, dtype, and most frequent values
pub fn diagnose<R: ColumnAccess>(rows: &[R], top_n: usize) -> Diagnosis {
    Diagnosis {
        row_count: rows.len(),
        columns: Column::ALL
            .iter()
            .map(|column| profile_column(rows, *column, top_n))
            .collect(),
    }
}

fn profile_column<R: ColumnAccess>(rows: &[R], column: Column, top_n: usize) -> ColumnProfile {
    let mut null_count = 0;
    let mut counts: HashMap<String, usize> = HashMap::new();

    for row in rows {
        match row.cell(column) {
            Some(value) => *counts.entry(value).or_insert(0) += 1,
            None => null_count += 1,
        }
    }

    let distinct_count = counts.len();
    let mut top_values: Vec<ValueCount> = counts
        .into_iter()
        .map(|(value, count)| ValueCount { value, count })
        .collect();
    top_values.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    top_values.truncate(top_n);

    ColumnProfile {
        column,
        dtype: R::dtype(column),
        null_count,
        distinct_count,
        top_values,
    }
}

/// Log a diagnosis one line per column
pub fn log_diagnosis(label: &str, diagnosis: &Diagnosis) {
    info!("{} dataset: {} rows", label, diagnosis.row_count);

    for profile in &diagnosis.columns {
        let top: Vec<String> = profile
            .top_values
            .iter()
            .map(|v| format!("{:?}={}", v.value, v.count))
            .collect();

        info!(
            "  {:<18} {:<6} nulls: {:<6} distinct: {:<6} top: [{}]",
            profile.column.header(),
            profile.dtype.to_string(),
            profile.null_count,
            profile.distinct_count,
            top.join(", ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleaning::types::{DType, RawTransaction, Transaction};

    fn raw(item: Option<&str>, quantity: Option<&str>) -> RawTransaction {
        RawTransaction {
            item: item.map(str::to_string),
            quantity: quantity.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_raw_profile() {
        let rows = vec![
            raw(Some("Coffee"), Some("2")),
            raw(Some("Tea"), Some("ERROR")),
            raw(Some("Coffee"), None),
            raw(None, Some("2")),
        ];

        let diagnosis = diagnose(&rows, 5);
        assert_eq!(diagnosis.row_count, 4);

        let item = diagnosis.column(Column::Item).unwrap();
        assert_eq!(item.dtype, DType::Text);
        assert_eq!(item.null_count, 1);
        assert_eq!(item.distinct_count, 2);
        assert_eq!(
            item.top_values[0],
            ValueCount {
                value: "Coffee".to_string(),
                count: 2
            }
        );

        let quantity = diagnosis.column(Column::Quantity).unwrap();
        assert_eq!(quantity.dtype, DType::Text);
        assert_eq!(quantity.null_count, 1);

        let location = diagnosis.column(Column::Location).unwrap();
        assert_eq!(location.null_count, 4);
        assert!(location.top_values.is_empty());
    }

    #[test]
    fn test_typed_profile_uses_column_dtypes() {
        let rows = vec![Transaction {
            quantity: Some(2.0),
            ..Default::default()
        }];

        let diagnosis = diagnose(&rows, 5);

        assert_eq!(diagnosis.column(Column::Quantity).unwrap().dtype, DType::Float);
        assert_eq!(diagnosis.column(Column::TransactionDate).unwrap().dtype, DType::Date);
        assert_eq!(
            diagnosis.column(Column::Quantity).unwrap().top_values[0].value,
            "2.0"
        );
    }

    #[test]
    fn test_top_values_truncated_and_ordered() {
        let rows: Vec<RawTransaction> = ["b", "a", "c", "a", "b", "d"]
            .iter()
            .map(|item| raw(Some(*item), None))
            .collect();

        let diagnosis = diagnose(&rows, 2);
        let item = diagnosis.column(Column::Item).unwrap();

        let top: Vec<_> = item.top_values.iter().map(|v| v.value.as_str()).collect();
        assert_eq!(top, vec!["a", "b"]);
        assert_eq!(item.distinct_count, 4);
    }
}
