//! Outward notification contract: `change` and `error` events delivered
//! synchronously to registered subscribers.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::collection::FileDescriptor;

pub const VALIDATION_ERROR_CODE: &str = "VALIDATION_ERROR";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorData {
    pub message: String,
}

/// Payload of the `error` event: `{ code: "VALIDATION_ERROR", data: { message } }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub code: String,
    pub data: ErrorData,
}

impl ErrorPayload {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            code: VALIDATION_ERROR_CODE.to_string(),
            data: ErrorData {
                message: message.into(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "lowercase")]
pub enum UploadEvent {
    /// The collection's observable content changed; carries the full
    /// ordered sequence of descriptors.
    Change(Vec<FileDescriptor>),
    /// An evaluation call produced at least one rejection.
    Error(ErrorPayload),
}

impl UploadEvent {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

type Subscriber = Box<dyn Fn(&UploadEvent) + Send + Sync>;

/// Synchronous subscriber registry. Emission happens inline on the calling
/// thread; subscribers must not block.
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Arc<RwLock<HashMap<Uuid, Subscriber>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, subscriber: impl Fn(&UploadEvent) + Send + Sync + 'static) -> Uuid {
        let token = Uuid::new_v4();
        self.subscribers.write().insert(token, Box::new(subscriber));
        debug!("Subscriber registered: {}", token);
        token
    }

    pub fn unsubscribe(&self, token: &Uuid) -> bool {
        let removed = self.subscribers.write().remove(token).is_some();
        if removed {
            debug!("Subscriber removed: {}", token);
        }
        removed
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }

    pub fn emit(&self, event: &UploadEvent) {
        let subscribers = self.subscribers.read();
        debug!(
            "Emitting {} event to {} subscriber(s)",
            match event {
                UploadEvent::Change(_) => "change",
                UploadEvent::Error(_) => "error",
            },
            subscribers.len()
        );
        for subscriber in subscribers.values() {
            subscriber(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_subscribe_emit_unsubscribe() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let counted = counter.clone();
        let token = bus.subscribe(move |_| {
            counted.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(bus.subscriber_count(), 1);

        bus.emit(&UploadEvent::Change(Vec::new()));
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        assert!(bus.unsubscribe(&token));
        assert!(!bus.unsubscribe(&token));
        bus.emit(&UploadEvent::Change(Vec::new()));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_error_event_payload_shape() {
        let event = UploadEvent::Error(ErrorPayload::validation("File validation failed"));
        let json: serde_json::Value = serde_json::from_str(&event.to_json().unwrap()).unwrap();

        assert_eq!(json["event"], "error");
        assert_eq!(json["payload"]["code"], "VALIDATION_ERROR");
        assert_eq!(json["payload"]["data"]["message"], "File validation failed");
    }

    #[test]
    fn test_change_event_payload_is_ordered_sequence() {
        let event = UploadEvent::Change(Vec::new());
        let json: serde_json::Value = serde_json::from_str(&event.to_json().unwrap()).unwrap();

        assert_eq!(json["event"], "change");
        assert!(json["payload"].as_array().unwrap().is_empty());
    }
}
