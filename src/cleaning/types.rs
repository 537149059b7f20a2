//! Core data types for the cleaning pipeline
//! Pure data structures with minimal behavior

use crate::cleaning::utils::format_float;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Columns of a cafe sales export, in canonical output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Column {
    #[serde(rename = "Transaction ID")]
    TransactionId,
    #[serde(rename = "Item")]
    Item,
    #[serde(rename = "Quantity")]
    Quantity,
    #[serde(rename = "Price Per Unit")]
    PricePerUnit,
    #[serde(rename = "Total Spent")]
    TotalSpent,
    #[serde(rename = "Payment Method")]
    PaymentMethod,
    #[serde(rename = "Location")]
    Location,
    #[serde(rename = "Transaction Date")]
    TransactionDate,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::TransactionId,
        Column::Item,
        Column::Quantity,
        Column::PricePerUnit,
        Column::TotalSpent,
        Column::PaymentMethod,
        Column::Location,
        Column::TransactionDate,
    ];

    /// Header name as it appears in the CSV
    pub fn header(&self) -> &'static str {
        match self {
            Column::TransactionId => "Transaction ID",
            Column::Item => "Item",
            Column::Quantity => "Quantity",
            Column::PricePerUnit => "Price Per Unit",
            Column::TotalSpent => "Total Spent",
            Column::PaymentMethod => "Payment Method",
            Column::Location => "Location",
            Column::TransactionDate => "Transaction Date",
        }
    }

    /// Type the column holds once coerced
    pub fn dtype(&self) -> DType {
        match self {
            Column::Quantity | Column::PricePerUnit | Column::TotalSpent => DType::Float,
            Column::TransactionDate => DType::Date,
            _ => DType::Text,
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.header())
    }
}

/// Value types a column can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DType {
    Text,
    Float,
    Date,
}

impl std::fmt::Display for DType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DType::Text => write!(f, "text"),
            DType::Float => write!(f, "float"),
            DType::Date => write!(f, "date"),
        }
    }
}

/// One CSV row exactly as read, every cell still text
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawTransaction {
    #[serde(rename = "Transaction ID")]
    pub transaction_id: Option<String>,

    #[serde(rename = "Item")]
    pub item: Option<String>,

    #[serde(rename = "Quantity")]
    pub quantity: Option<String>,

    #[serde(rename = "Price Per Unit")]
    pub price_per_unit: Option<String>,

    #[serde(rename = "Total Spent")]
    pub total_spent: Option<String>,

    #[serde(rename = "Payment Method")]
    pub payment_method: Option<String>,

    #[serde(rename = "Location")]
    pub location: Option<String>,

    #[serde(rename = "Transaction Date")]
    pub transaction_date: Option<String>,
}

/// Raw rows plus the number of records the reader had to skip
#[derive(Debug, Default)]
pub struct RawDataset {
    pub rows: Vec<RawTransaction>,
    pub malformed_records: usize,
}

/// Typed transaction; `None` marks a missing value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transaction {
    pub transaction_id: Option<String>,
    pub item: Option<String>,
    pub quantity: Option<f64>,
    pub price_per_unit: Option<f64>,
    pub total_spent: Option<f64>,
    pub payment_method: Option<String>,
    pub location: Option<String>,
    pub transaction_date: Option<NaiveDate>,
}

impl Transaction {
    pub fn is_missing(&self, column: Column) -> bool {
        match column {
            Column::TransactionId => self.transaction_id.is_none(),
            Column::Item => self.item.is_none(),
            Column::Quantity => self.quantity.is_none(),
            Column::PricePerUnit => self.price_per_unit.is_none(),
            Column::TotalSpent => self.total_spent.is_none(),
            Column::PaymentMethod => self.payment_method.is_none(),
            Column::Location => self.location.is_none(),
            Column::TransactionDate => self.transaction_date.is_none(),
        }
    }

    /// Borrow a text column's value. Typed columns yield `None`.
    pub fn text(&self, column: Column) -> Option<&str> {
        match column {
            Column::TransactionId => self.transaction_id.as_deref(),
            Column::Item => self.item.as_deref(),
            Column::PaymentMethod => self.payment_method.as_deref(),
            Column::Location => self.location.as_deref(),
            _ => None,
        }
    }

    /// Mutable slot of a text column, or `None` for typed columns
    pub fn text_mut(&mut self, column: Column) -> Option<&mut Option<String>> {
        match column {
            Column::TransactionId => Some(&mut self.transaction_id),
            Column::Item => Some(&mut self.item),
            Column::PaymentMethod => Some(&mut self.payment_method),
            Column::Location => Some(&mut self.location),
            _ => None,
        }
    }
}

/// Cell-level view shared by raw and typed rows
pub trait ColumnAccess {
    /// Cell rendered as text, `None` when missing
    fn cell(&self, column: Column) -> Option<String>;

    fn dtype(column: Column) -> DType;
}

impl ColumnAccess for RawTransaction {
    fn cell(&self, column: Column) -> Option<String> {
        match column {
            Column::TransactionId => self.transaction_id.clone(),
            Column::Item => self.item.clone(),
            Column::Quantity => self.quantity.clone(),
            Column::PricePerUnit => self.price_per_unit.clone(),
            Column::TotalSpent => self.total_spent.clone(),
            Column::PaymentMethod => self.payment_method.clone(),
            Column::Location => self.location.clone(),
            Column::TransactionDate => self.transaction_date.clone(),
        }
    }

    fn dtype(_column: Column) -> DType {
        DType::Text
    }
}

impl ColumnAccess for Transaction {
    fn cell(&self, column: Column) -> Option<String> {
        match column {
            Column::Quantity => self.quantity.map(format_float),
            Column::PricePerUnit => self.price_per_unit.map(format_float),
            Column::TotalSpent => self.total_spent.map(format_float),
            Column::TransactionDate => self
                .transaction_date
                .map(|date| date.format("%Y-%m-%d").to_string()),
            _ => self.text(column).map(str::to_string),
        }
    }

    fn dtype(column: Column) -> DType {
        column.dtype()
    }
}

/// The in-memory dataset every step hands to the next
pub type Dataset = Vec<Transaction>;

/// One entry of a value distribution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Per-column profile produced by diagnosis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    pub column: Column,
    pub dtype: DType,
    pub null_count: usize,
    pub distinct_count: usize,
    pub top_values: Vec<ValueCount>,
}

/// Read-only snapshot of a dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Diagnosis {
    pub row_count: usize,
    pub columns: Vec<ColumnProfile>,
}

impl Diagnosis {
    pub fn column(&self, column: Column) -> Option<&ColumnProfile> {
        self.columns.iter().find(|profile| profile.column == column)
    }
}

/// Value written into a contextual column and how many cells received it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Imputed {
    pub value: String,
    pub count: usize,
}

/// Statistics for a full cleaning run
#[derive(Debug, Default, Clone, Serialize)]
pub struct CleaningReport {
    pub rows_loaded: usize,
    pub malformed_records: usize,
    pub coercion_failures: BTreeMap<Column, usize>,
    pub sentinels_replaced: usize,
    pub dropped_missing_essential: usize,
    pub imputed: BTreeMap<Column, Imputed>,
    pub totals_corrected: usize,
    pub dropped_invalid_derived: usize,
    pub duplicates_removed: usize,
    pub rows_retained: usize,
    pub rows_written: usize,
    pub raw_diagnosis: Diagnosis,
    pub final_diagnosis: Diagnosis,
}

impl CleaningReport {
    pub fn rows_dropped(&self) -> usize {
        self.dropped_missing_essential + self.dropped_invalid_derived + self.duplicates_removed
    }
}

impl std::fmt::Display for CleaningReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let imputed: usize = self.imputed.values().map(|i| i.count).sum();
        write!(
            f,
            "loaded: {}, dropped: {}, imputed: {}, totals corrected: {}, duplicates: {}, retained: {}",
            self.rows_loaded,
            self.rows_dropped(),
            imputed,
            self.totals_corrected,
            self.duplicates_removed,
            self.rows_retained
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_headers_round_trip_through_serde() {
        for column in Column::ALL {
            let json = serde_json::to_string(&column).unwrap();
            assert_eq!(json, format!("\"{}\"", column.header()));
        }
    }

    #[test]
    fn test_typed_cells_render() {
        let row = Transaction {
            transaction_id: Some("TXN_1".to_string()),
            quantity: Some(2.0),
            price_per_unit: Some(3.5),
            transaction_date: NaiveDate::from_ymd_opt(2023, 9, 8),
            ..Default::default()
        };

        assert_eq!(row.cell(Column::TransactionId), Some("TXN_1".to_string()));
        assert_eq!(row.cell(Column::Quantity), Some("2.0".to_string()));
        assert_eq!(row.cell(Column::PricePerUnit), Some("3.5".to_string()));
        assert_eq!(row.cell(Column::TotalSpent), None);
        assert_eq!(row.cell(Column::TransactionDate), Some("2023-09-08".to_string()));
    }

    #[test]
    fn test_text_mut_only_for_text_columns() {
        let mut row = Transaction::default();
        assert!(row.text_mut(Column::Location).is_some());
        assert!(row.text_mut(Column::Quantity).is_none());
        assert!(row.text_mut(Column::TransactionDate).is_none());
    }
}
