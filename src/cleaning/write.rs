//! Write functions - persist the cleaned dataset and run report

use crate::cleaning::error::{CleaningError, Result};
use crate::cleaning::types::{CleaningReport, Column, ColumnAccess, Transaction};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Write the dataset to a CSV file, replacing any existing file
pub fn write_csv(dataset: &[Transaction], path: &Path) -> Result<usize> {
    info!("Writing {} rows to {:?}", dataset.len(), path);

    ensure_parent_dir(path)?;
    let file = File::create(path).map_err(|e| CleaningError::io(path, e))?;

    let written = write_transactions(dataset, file)?;

    info!("Clean file saved to {:?}", path);
    Ok(written)
}

/// Write the header and every row; missing cells are left empty
pub fn write_transactions<W: Write>(dataset: &[Transaction], sink: W) -> Result<usize> {
    let mut writer = csv::Writer::from_writer(sink);

    writer.write_record(Column::ALL.iter().map(|column| column.header()))?;

    for row in dataset {
        writer.write_record(
            Column::ALL
                .iter()
                .map(|column| row.cell(*column).unwrap_or_default()),
        )?;
    }

    writer.flush().map_err(csv::Error::from)?;
    Ok(dataset.len())
}

/// Dump the run report as pretty-printed JSON
pub fn write_report(report: &CleaningReport, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json).map_err(|e| CleaningError::io(path, e))?;

    info!("Run report saved to {:?}", path);
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| CleaningError::io(parent, e))
        }
        _ => Ok(()),
    }
}
