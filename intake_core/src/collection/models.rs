use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Provenance of a collection entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Pre-bound item the component was initialized with.
    Initial,
    /// File added by the user after mount.
    Uploaded,
}

/// Opaque payload handle. Initial entries bound from an external source may
/// carry only a locator instead of bytes.
#[derive(Debug, Clone)]
pub enum FileSource {
    Memory(Arc<[u8]>),
    Reference(String),
}

impl FileSource {
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            FileSource::Memory(data) => Some(data),
            FileSource::Reference(_) => None,
        }
    }

    /// Handle to the payload without copying it.
    pub fn shared_bytes(&self) -> Option<Arc<[u8]>> {
        match self {
            FileSource::Memory(data) => Some(data.clone()),
            FileSource::Reference(_) => None,
        }
    }
}

/// A file presented for validation, not yet part of the collection.
#[derive(Debug, Clone)]
pub struct FileCandidate {
    pub name: String,
    pub mime_or_extension: String,
    pub data: Arc<[u8]>,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, mime_or_extension: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_or_extension: mime_or_extension.into(),
            data: data.into(),
        }
    }

    pub fn size_bytes(&self) -> u64 {
        self.data.len() as u64
    }
}

/// One accepted file in the ordered collection.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub id: Uuid,
    pub name: String,
    pub size_bytes: u64,
    pub mime_or_extension: String,
    pub origin: Origin,
    pub source: FileSource,
    pub added_at: DateTime<Utc>,
}

impl FileEntry {
    pub fn from_candidate(candidate: FileCandidate) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: candidate.name,
            size_bytes: candidate.data.len() as u64,
            mime_or_extension: candidate.mime_or_extension,
            origin: Origin::Uploaded,
            source: FileSource::Memory(candidate.data),
            added_at: Utc::now(),
        }
    }
}

/// Pre-bound item used to seed the collection at construction time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InitialFile {
    pub name: String,
    #[serde(default)]
    pub mime_or_extension: String,
    #[serde(default)]
    pub size_bytes: u64,
    /// External locator for the already-stored item, if any.
    #[serde(default)]
    pub reference: Option<String>,
}

impl From<InitialFile> for FileEntry {
    fn from(initial: InitialFile) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: initial.name,
            size_bytes: initial.size_bytes,
            mime_or_extension: initial.mime_or_extension,
            origin: Origin::Initial,
            source: FileSource::Reference(initial.reference.unwrap_or_default()),
            added_at: Utc::now(),
        }
    }
}

/// Read projection of an entry, carried by `change` events and the bound
/// value. The encoded representations are present only when the matching
/// exposure flag is enabled in the configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileDescriptor {
    pub id: Uuid,
    pub name: String,
    pub size_bytes: u64,
    pub mime_or_extension: String,
    pub origin: Origin,
    pub added_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base64: Option<String>,
    /// Shares the entry's payload buffer; never a per-read copy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binary: Option<Arc<[u8]>>,
}

impl From<&FileEntry> for FileDescriptor {
    fn from(entry: &FileEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name.clone(),
            size_bytes: entry.size_bytes,
            mime_or_extension: entry.mime_or_extension.clone(),
            origin: entry.origin,
            added_at: entry.added_at,
            base64: None,
            binary: None,
        }
    }
}
