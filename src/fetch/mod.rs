// src/fetch/mod.rs

pub mod images;
pub mod page;

pub use images::{download_all, download_image};
pub use page::{HttpPageLoader, PageLoader};
