//! Upload handling

mod store;

pub use store::{TempUpload, UploadStore};
