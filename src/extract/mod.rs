pub mod table;

pub use table::{extract, Extraction, RawTable, TableLocator};
