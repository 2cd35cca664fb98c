pub mod csv;

pub use self::csv::{persist, read, read_from};
