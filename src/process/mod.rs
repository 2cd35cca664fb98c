// src/process/mod.rs

pub mod aggregate;
pub mod clean;
pub mod normalize;
pub mod record;
pub mod rename;
pub mod utils;

pub use aggregate::{aggregate, Aggregated, YearFailure};
pub use clean::clean;
pub use record::{Dataset, Record, Value};
pub use rename::{rename, ColumnMapping};
