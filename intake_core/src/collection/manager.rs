use std::collections::HashMap;
use std::sync::Arc;

use base64::{engine::general_purpose, Engine as _};
use parking_lot::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::{UploadConfig, UploadMode};
use crate::error::{IntakeError, Result};
use crate::events::{ErrorPayload, EventBus, UploadEvent};
use crate::report;
use crate::rules::{self, Evaluation};

use super::models::{FileCandidate, FileDescriptor, FileEntry};

struct CollectionState {
    entries: Vec<FileEntry>,
    pending_error: Option<ErrorPayload>,
    // Base64 is expensive to recompute on every read; memoized per entry id
    // and invalidated when the entry leaves the collection.
    base64_cache: HashMap<Uuid, Arc<str>>,
}

/// Ordered collection of accepted files plus the exposed actions. Cheap to
/// clone; all clones share the same state and subscriber registry.
///
/// Mutations are serialized by the inner write lock and every observable
/// change emits one `change` event. Rejections never mutate the collection
/// and surface only through the `error` event.
#[derive(Clone)]
pub struct UploadManager {
    config: Arc<UploadConfig>,
    state: Arc<RwLock<CollectionState>>,
    events: EventBus,
}

impl UploadManager {
    /// Builds a manager over a config snapshot, seeding the collection from
    /// `initial_value`. Initial entries are exempt from validation unless
    /// `revalidate_initial` is set, in which case the size and type rules
    /// run and offenders are dropped with a warning; the mode and count
    /// rules never apply to pre-bound items.
    pub fn new(config: UploadConfig) -> Self {
        let mut entries = Vec::with_capacity(config.initial_value.len());
        for initial in config.initial_value.iter().cloned() {
            let entry = FileEntry::from(initial);
            if config.revalidate_initial {
                if let Some(kind) = rules::evaluator::check_size_and_type(
                    &entry.name,
                    &entry.mime_or_extension,
                    entry.size_bytes,
                    &config,
                ) {
                    warn!("Dropping initial entry \"{}\": {}", entry.name, kind);
                    continue;
                }
            }
            entries.push(entry);
        }

        Self {
            config: Arc::new(config),
            state: Arc::new(RwLock::new(CollectionState {
                entries,
                pending_error: None,
                base64_cache: HashMap::new(),
            })),
            events: EventBus::new(),
        }
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    pub fn subscribe(&self, subscriber: impl Fn(&UploadEvent) + Send + Sync + 'static) -> Uuid {
        self.events.subscribe(subscriber)
    }

    pub fn unsubscribe(&self, token: &Uuid) -> bool {
        self.events.unsubscribe(token)
    }

    /// Validates a batch without touching the collection. No events, no
    /// state change; useful for pre-flight checks while a drag is hovering.
    pub fn preview(&self, candidates: Vec<FileCandidate>) -> Evaluation {
        let state = self.state.read();
        rules::evaluate(candidates, &self.config, &state.entries)
    }

    /// Evaluates a batch and merges the accepted files into the collection.
    /// Emits at most one `change` and one `error` event per call.
    pub fn add_files(&self, candidates: Vec<FileCandidate>) {
        if self.config.readonly {
            warn!("add_files ignored: component is readonly");
            return;
        }

        let (change, error) = {
            let mut state = self.state.write();
            let evaluation = rules::evaluate(candidates, &self.config, &state.entries);

            let error = if evaluation.rejections.is_empty() {
                None
            } else {
                let message = report::batch_message(&evaluation.rejections, &self.config.messages);
                debug!(
                    "Rejected {} candidate(s): {}",
                    evaluation.rejections.len(),
                    message
                );
                let payload = ErrorPayload::validation(message);
                state.pending_error = Some(payload.clone());
                Some(payload)
            };

            let change = if evaluation.accepted.is_empty() {
                None
            } else {
                // Single mode holds at most one entry; an accepted file
                // replaces whatever was there.
                if self.config.mode == UploadMode::Single {
                    state.entries.clear();
                    state.base64_cache.clear();
                }
                for candidate in evaluation.accepted {
                    state.entries.push(FileEntry::from_candidate(candidate));
                }
                Some(self.project(&mut state))
            };

            (change, error)
        };

        if let Some(descriptors) = change {
            self.events.emit(&UploadEvent::Change(descriptors));
        }
        if let Some(payload) = error {
            self.events.emit(&UploadEvent::Error(payload));
        }
    }

    /// Removes the entry at `index`. Out-of-range indices are a caller bug:
    /// the collection is untouched, no event fires, and the error is
    /// returned to the caller only. The range contract holds in readonly
    /// mode too; readonly only suppresses the mutation itself.
    pub fn remove_file(&self, index: usize) -> Result<()> {
        let descriptors = {
            let mut state = self.state.write();
            let len = state.entries.len();
            if index >= len {
                debug!("remove_file({}) out of range, len {}", index, len);
                return Err(IntakeError::IndexOutOfRange { index, len });
            }

            if self.config.readonly {
                warn!("remove_file ignored: component is readonly");
                return Ok(());
            }

            let removed = state.entries.remove(index);
            state.base64_cache.remove(&removed.id);
            self.project(&mut state)
        };

        self.events.emit(&UploadEvent::Change(descriptors));
        Ok(())
    }

    /// Moves the entry at `from` to position `to`. A no-op when reordering
    /// is disabled or the mode is single; out-of-range indices leave the
    /// collection unchanged with no event, in readonly mode as well.
    pub fn reorder_files(&self, from: usize, to: usize) -> Result<()> {
        if !self.config.reorder || self.config.mode == UploadMode::Single {
            debug!("reorder_files ignored: reordering not enabled");
            return Ok(());
        }

        let descriptors = {
            let mut state = self.state.write();
            let len = state.entries.len();
            if from >= len {
                return Err(IntakeError::IndexOutOfRange { index: from, len });
            }
            if to >= len {
                return Err(IntakeError::IndexOutOfRange { index: to, len });
            }

            if self.config.readonly {
                warn!("reorder_files ignored: component is readonly");
                return Ok(());
            }
            if from == to {
                return Ok(());
            }

            let entry = state.entries.remove(from);
            state.entries.insert(to, entry);
            self.project(&mut state)
        };

        self.events.emit(&UploadEvent::Change(descriptors));
        Ok(())
    }

    /// Empties the collection unconditionally, initial entries included,
    /// and emits `change` with the empty sequence.
    pub fn clear_files(&self) {
        if self.config.readonly {
            warn!("clear_files ignored: component is readonly");
            return;
        }

        {
            let mut state = self.state.write();
            state.entries.clear();
            state.base64_cache.clear();
        }

        self.events.emit(&UploadEvent::Change(Vec::new()));
    }

    /// Resets the pending error state without touching the collection.
    pub fn clear_error(&self) {
        self.state.write().pending_error = None;
    }

    /// The bound value: the ordered descriptor sequence, with encoded
    /// representations attached per the exposure flags.
    pub fn files(&self) -> Vec<FileDescriptor> {
        let mut state = self.state.write();
        self.project(&mut state)
    }

    pub fn last_error(&self) -> Option<ErrorPayload> {
        self.state.read().pending_error.clone()
    }

    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().entries.is_empty()
    }

    /// Required-field hook for form integration: false only when the
    /// component is required and the collection is empty.
    pub fn is_satisfied(&self) -> bool {
        !self.config.required || !self.is_empty()
    }

    pub fn total_size_bytes(&self) -> u64 {
        self.state
            .read()
            .entries
            .iter()
            .map(|entry| entry.size_bytes)
            .sum()
    }

    fn project(&self, state: &mut CollectionState) -> Vec<FileDescriptor> {
        let mut descriptors = Vec::with_capacity(state.entries.len());
        for index in 0..state.entries.len() {
            let entry = &state.entries[index];
            let mut descriptor = FileDescriptor::from(entry);

            if self.config.expose_base64 {
                if let Some(bytes) = entry.source.bytes() {
                    let id = entry.id;
                    let encoded = state
                        .base64_cache
                        .entry(id)
                        .or_insert_with(|| general_purpose::STANDARD.encode(bytes).into());
                    descriptor.base64 = Some(encoded.to_string());
                }
            }

            if self.config.expose_binary {
                descriptor.binary = state.entries[index].source.shared_bytes();
            }

            descriptors.push(descriptor);
        }
        descriptors
    }
}
