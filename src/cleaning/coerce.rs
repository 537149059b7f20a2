//! Coerce functions - turn raw text rows into typed transactions

use crate::cleaning::types::{Column, Dataset, RawTransaction, Transaction};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Date layouts tried in order when no format list is configured.
/// Slash dates read month-first.
pub const DEFAULT_DATE_FORMATS: [&str; 5] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Non-empty cells per column that could not be coerced
pub type CoercionFailures = BTreeMap<Column, usize>;

/// Coerce every row. Cells that fail to parse become missing and are counted.
pub fn coerce_types(rows: Vec<RawTransaction>, date_formats: &[String]) -> (Dataset, CoercionFailures) {
    info!("Coercing {} rows to typed values", rows.len());

    let mut failures = CoercionFailures::new();
    let dataset: Dataset = rows
        .into_iter()
        .map(|row| coerce_row(row, date_formats, &mut failures))
        .collect();

    for (column, count) in &failures {
        debug!("{} cells in '{}' failed coercion", count, column);
    }

    (dataset, failures)
}

fn coerce_row(
    row: RawTransaction,
    date_formats: &[String],
    failures: &mut CoercionFailures,
) -> Transaction {
    let mut number = |column: Column, cell: Option<String>| {
        coerce_cell(column, cell, failures, parse_number)
    };

    let quantity = number(Column::Quantity, row.quantity);
    let price_per_unit = number(Column::PricePerUnit, row.price_per_unit);
    let total_spent = number(Column::TotalSpent, row.total_spent);

    let transaction_date = coerce_cell(
        Column::TransactionDate,
        row.transaction_date,
        failures,
        |value| parse_date(value, date_formats),
    );

    Transaction {
        transaction_id: row.transaction_id,
        item: row.item,
        quantity,
        price_per_unit,
        total_spent,
        payment_method: row.payment_method,
        location: row.location,
        transaction_date,
    }
}

fn coerce_cell<T>(
    column: Column,
    cell: Option<String>,
    failures: &mut CoercionFailures,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    let value = cell?;
    let parsed = parse(&value);
    if parsed.is_none() && !value.trim().is_empty() {
        *failures.entry(column).or_insert(0) += 1;
    }
    parsed
}

/// Parse a numeric cell; non-finite results count as failures
pub fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

/// Parse a date cell against each format in turn.
/// Datetime layouts keep only the date part.
pub fn parse_date(value: &str, formats: &[String]) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    formats.iter().find_map(|format| {
        NaiveDate::parse_from_str(value, format)
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(value, format)
                    .ok()
                    .map(|dt| dt.date())
            })
    })
}
