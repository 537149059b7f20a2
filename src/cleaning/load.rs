//! Load functions - read the raw sales export as text

use crate::cleaning::error::{CleaningError, Result};
use crate::cleaning::types::{Column, RawDataset, RawTransaction};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

const MAX_LOGGED_ERRORS: usize = 10;

/// Load a raw sales CSV from disk
pub fn load_raw_csv(path: &Path) -> Result<RawDataset> {
    info!("Loading raw sales CSV from {:?}", path);

    let file = File::open(path).map_err(|e| CleaningError::io(path, e))?;
    read_raw_csv(file)
}

/// Read raw rows from any CSV source. Every cell is kept as text.
pub fn read_raw_csv<R: Read>(source: R) -> Result<RawDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    let missing: Vec<String> = Column::ALL
        .iter()
        .filter(|column| !headers.iter().any(|h| h == column.header()))
        .map(|column| column.header().to_string())
        .collect();

    if !missing.is_empty() {
        return Err(CleaningError::MissingColumns(missing));
    }

    let repeated: Vec<String> = Column::ALL
        .iter()
        .filter(|column| headers.iter().filter(|h| *h == column.header()).count() > 1)
        .map(|column| column.header().to_string())
        .collect();

    if !repeated.is_empty() {
        return Err(CleaningError::DuplicateColumns(repeated));
    }

    let mut dataset = RawDataset::default();

    for (idx, result) in reader.deserialize::<RawTransaction>().enumerate() {
        match result {
            Ok(row) => dataset.rows.push(row),
            Err(e) => {
                dataset.malformed_records += 1;
                if dataset.malformed_records <= MAX_LOGGED_ERRORS {
                    warn!("Skipping malformed record {}: {}", idx, e);
                }
            }
        }
    }

    info!(
        "Loaded {} raw records ({} malformed)",
        dataset.rows.len(),
        dataset.malformed_records
    );

    Ok(dataset)
}
