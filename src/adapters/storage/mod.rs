//! File storage adapters.
//!
//! - **LocalFileStorage** - content uploads on the local filesystem

mod local_file_storage;

pub use local_file_storage::{LocalFileStorage, DEFAULT_MAX_FILE_SIZE_BYTES};
