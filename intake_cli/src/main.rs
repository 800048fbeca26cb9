//! Command-line host for the intake engine.
//!
//! Stands in for the hosting shell: loads the upload configuration, wires
//! event subscribers, feeds the files named on the command line through the
//! manager, and prints the resulting bound value as JSON. Rejections are
//! reported through the `error` event exactly as an embedding UI would see
//! them.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use intake_core::{FileCandidate, UploadConfig, UploadEvent, UploadManager};

fn main() -> Result<()> {
    init_tracing();

    let config = UploadConfig::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    info!("Configuration loaded successfully");
    info!(
        "Mode: {:?}, max file size: {} MB, allowed types: {:?}",
        config.mode, config.max_file_size_mb, config.extensions
    );

    let manager = UploadManager::new(config);
    manager.subscribe(|event| match event {
        UploadEvent::Change(descriptors) => {
            info!("Collection changed: {} file(s)", descriptors.len());
        }
        UploadEvent::Error(payload) => {
            warn!("{}: {}", payload.code, payload.data.message);
        }
    });

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        info!("No files given; printing the seeded collection");
    }

    for path in &paths {
        match read_candidate(Path::new(path)) {
            Ok(candidate) => manager.add_files(vec![candidate]),
            Err(e) => warn!("Skipping {}: {}", path, e),
        }
    }

    let value = serde_json::to_string_pretty(&manager.files())?;
    println!("{}", value);

    if let Some(error) = manager.last_error() {
        warn!("Pending error after intake: {}", error.data.message);
    }

    Ok(())
}

fn read_candidate(path: &Path) -> Result<FileCandidate> {
    let data = fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("unnamed")
        .to_string();
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    Ok(FileCandidate::new(name, mime.essence_str(), data))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false))
        .init();
}
