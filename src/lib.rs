pub mod config;
pub mod datasets;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod logging;
pub mod orchestrator;
pub mod process;
pub mod sink;
pub mod sources;
pub mod store;
