//! File-intake validation and collection state engine.
//!
//! The [`UploadManager`] holds the ordered collection of accepted files
//! behind a clonable handle, validates incoming batches against an immutable
//! [`UploadConfig`] snapshot, and notifies subscribers through `change` and
//! `error` events. Validation itself is pure and lives in [`rules`];
//! user-facing rejection text comes from configurable templates in
//! [`report`].

pub mod collection;
pub mod config;
pub mod error;
pub mod events;
pub mod report;
pub mod rules;

pub use collection::{FileCandidate, FileDescriptor, FileEntry, FileSource, InitialFile, Origin, UploadManager};
pub use config::{visible_fields, ErrorMessages, ExtensionFilter, Field, UploadConfig, UploadMode};
pub use error::{IntakeError, Result};
pub use events::{ErrorPayload, EventBus, UploadEvent, VALIDATION_ERROR_CODE};
pub use report::{batch_message, message_for};
pub use rules::{evaluate, Evaluation, Rejection, RejectionKind};
