pub mod blob;
pub mod db;
pub mod ingest;
pub mod load;
pub mod local;
pub mod webhdfs;

pub use blob::BlobStore;
pub use db::Database;
pub use ingest::{upload_dir, IngestReport};
pub use load::{load_tables, LoadReport};
pub use local::LocalBlobStore;
pub use webhdfs::WebHdfsStore;
