use std::sync::Arc;

use parking_lot::Mutex;

use intake_core::{
    ExtensionFilter, FileCandidate, InitialFile, IntakeError, UploadConfig, UploadEvent,
    UploadManager, UploadMode,
};

fn candidate(name: &str, mime: &str, size: usize) -> FileCandidate {
    FileCandidate::new(name, mime, vec![0u8; size])
}

fn record_events(manager: &UploadManager) -> Arc<Mutex<Vec<UploadEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    manager.subscribe(move |event| sink.lock().push(event.clone()));
    events
}

#[test]
fn test_empty_batch_emits_nothing() {
    let manager = UploadManager::new(UploadConfig::default());
    let events = record_events(&manager);

    manager.add_files(Vec::new());

    assert!(events.lock().is_empty());
    assert!(manager.is_empty());
    assert!(manager.last_error().is_none());
}

#[test]
fn test_file_exactly_at_max_size_is_accepted() {
    let manager = UploadManager::new(UploadConfig::default());

    manager.add_files(vec![candidate("edge.bin", "application/octet-stream", 10_000_000)]);

    assert_eq!(manager.len(), 1);
    assert!(manager.last_error().is_none());
}

#[test]
fn test_file_one_byte_over_max_is_rejected() {
    let manager = UploadManager::new(UploadConfig::default());

    manager.add_files(vec![candidate("edge.bin", "application/octet-stream", 10_000_001)]);

    assert!(manager.is_empty());
    assert!(manager.last_error().is_some());
}

#[test]
fn test_file_exactly_at_min_size_is_accepted() {
    let manager = UploadManager::new(UploadConfig {
        min_file_size_mb: 1.0,
        ..UploadConfig::default()
    });

    manager.add_files(vec![candidate("edge.bin", "application/octet-stream", 1_000_000)]);
    assert_eq!(manager.len(), 1);

    manager.clear_files();
    manager.add_files(vec![candidate("small.bin", "application/octet-stream", 999_999)]);
    assert!(manager.is_empty());
}

#[test]
fn test_zero_byte_file_allowed_without_min() {
    let manager = UploadManager::new(UploadConfig::default());

    manager.add_files(vec![candidate("empty.txt", "text/plain", 0)]);

    assert_eq!(manager.len(), 1);
    assert_eq!(manager.total_size_bytes(), 0);
}

#[test]
fn test_unicode_filenames_survive_the_pipeline() {
    let manager = UploadManager::new(UploadConfig {
        extensions: ExtensionFilter::Custom,
        custom_extensions: ".png".to_string(),
        ..UploadConfig::default()
    });

    manager.add_files(vec![candidate("снимок экрана.PNG", "image/png", 10)]);

    let files = manager.files();
    assert_eq!(files[0].name, "снимок экрана.PNG");
}

#[test]
fn test_extensionless_file_falls_back_to_mime() {
    let manager = UploadManager::new(UploadConfig {
        extensions: ExtensionFilter::Image,
        ..UploadConfig::default()
    });

    manager.add_files(vec![candidate("camera-roll", "image/jpeg", 10)]);
    assert_eq!(manager.len(), 1);

    manager.clear_files();
    manager.clear_error();
    manager.add_files(vec![candidate("mystery-blob", "application/octet-stream", 10)]);
    assert!(manager.is_empty());
    assert!(manager.last_error().is_some());
}

#[test]
fn test_remove_on_empty_collection() {
    let manager = UploadManager::new(UploadConfig::default());

    let result = manager.remove_file(0);

    assert!(matches!(
        result,
        Err(IntakeError::IndexOutOfRange { index: 0, len: 0 })
    ));
}

#[test]
fn test_reorder_same_index_emits_nothing() {
    let manager = UploadManager::new(UploadConfig {
        mode: UploadMode::Multi,
        reorder: true,
        ..UploadConfig::default()
    });
    manager.add_files(vec![
        candidate("a.txt", "text/plain", 10),
        candidate("b.txt", "text/plain", 10),
    ]);

    let events = record_events(&manager);
    manager.reorder_files(1, 1).unwrap();

    assert!(events.lock().is_empty());
}

#[test]
fn test_initial_entries_count_toward_limits() {
    let manager = UploadManager::new(UploadConfig {
        mode: UploadMode::Multi,
        max_files: 2,
        initial_value: vec![
            InitialFile {
                name: "one.txt".to_string(),
                size_bytes: 10,
                ..InitialFile::default()
            },
            InitialFile {
                name: "two.txt".to_string(),
                size_bytes: 10,
                ..InitialFile::default()
            },
        ],
        ..UploadConfig::default()
    });
    assert_eq!(manager.len(), 2);

    manager.add_files(vec![candidate("three.txt", "text/plain", 10)]);

    assert_eq!(manager.len(), 2);
    let error = manager.last_error().unwrap();
    assert_eq!(error.data.message, "Maximum number of files (2) reached");
}

#[test]
fn test_clear_removes_initial_entries_too() {
    let manager = UploadManager::new(UploadConfig {
        initial_value: vec![InitialFile {
            name: "seeded.txt".to_string(),
            size_bytes: 10,
            ..InitialFile::default()
        }],
        ..UploadConfig::default()
    });
    assert_eq!(manager.len(), 1);

    manager.clear_files();

    assert!(manager.is_empty());
}

#[test]
fn test_initial_total_size_constrains_later_batches() {
    let manager = UploadManager::new(UploadConfig {
        mode: UploadMode::Multi,
        max_total_file_size_mb: 1.0,
        initial_value: vec![InitialFile {
            name: "seeded.bin".to_string(),
            size_bytes: 800_000,
            ..InitialFile::default()
        }],
        ..UploadConfig::default()
    });

    manager.add_files(vec![candidate("extra.bin", "application/octet-stream", 300_000)]);

    assert_eq!(manager.len(), 1);
    assert!(manager
        .last_error()
        .unwrap()
        .data
        .message
        .starts_with("Total size"));
}

#[test]
fn test_change_event_carries_exposed_base64() {
    let manager = UploadManager::new(UploadConfig {
        expose_base64: true,
        ..UploadConfig::default()
    });
    let events = record_events(&manager);

    manager.add_files(vec![FileCandidate::new(
        "hello.txt",
        "text/plain",
        b"Hello, World!".to_vec(),
    )]);

    let events = events.lock();
    match &events[0] {
        UploadEvent::Change(descriptors) => {
            assert_eq!(descriptors[0].base64.as_deref(), Some("SGVsbG8sIFdvcmxkIQ=="));
        }
        other => panic!("expected change event, got {:?}", other),
    }
}

#[test]
fn test_error_state_persists_until_cleared() {
    let manager = UploadManager::new(UploadConfig::default());

    manager.add_files(vec![candidate("big.bin", "application/octet-stream", 15_000_000)]);
    assert!(manager.last_error().is_some());

    // A later successful add leaves the pending error alone; only the
    // dedicated action clears it.
    manager.add_files(vec![candidate("ok.txt", "text/plain", 10)]);
    assert!(manager.last_error().is_some());

    manager.clear_error();
    assert!(manager.last_error().is_none());
}
