//! Cleaning module - ordered pipeline turning a raw cafe sales export into a clean one

pub mod coerce;
pub mod dedupe;
pub mod derive;
pub mod diagnose;
pub mod error;
pub mod load;
pub mod normalize;
pub mod nulls;
pub mod pipeline;
pub mod types;
pub mod utils;
pub mod write;

pub use error::{CleaningError, Result};
pub use nulls::{ColumnPolicy, Imputation, NullPolicy};
pub use pipeline::{clean_file, CleaningPipeline, PipelineConfig};
pub use types::*;
