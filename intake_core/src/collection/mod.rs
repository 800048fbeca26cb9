pub mod manager;
pub mod models;

pub use manager::UploadManager;
pub use models::{FileCandidate, FileDescriptor, FileEntry, FileSource, InitialFile, Origin};
