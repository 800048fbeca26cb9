pub mod settings;
pub mod visibility;

pub use settings::{ErrorMessages, ExtensionFilter, UploadConfig, UploadMode};
pub use visibility::{visible_fields, Field};
