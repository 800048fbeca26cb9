//! Pure validation of candidate batches against the configuration and the
//! current collection. Nothing here mutates state; the manager merges the
//! accepted partition and hands the rejections to the reporter.

use thiserror::Error;

use crate::collection::{FileCandidate, FileEntry};
use crate::config::{ExtensionFilter, UploadConfig, UploadMode};

use super::extensions;

/// Why a candidate was rejected, with the context the message templates
/// interpolate. The `Display` strings are log-facing defaults; user-facing
/// text comes from the configured templates.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RejectionKind {
    #[error("Multiple files provided in single file mode")]
    MultipleFilesInSingleMode,

    #[error("Maximum number of files ({max}) reached")]
    MaxFilesReached { max: u64 },

    #[error("Only {available} more file(s) can be added")]
    TooManyFiles { available: u64 },

    #[error("File size ({size_mb} MB) is below minimum ({min_mb} MB)")]
    FileTooSmall { size_mb: f64, min_mb: f64 },

    #[error("File size ({size_mb} MB) exceeds maximum ({max_mb} MB)")]
    FileTooLarge { size_mb: f64, max_mb: f64 },

    #[error("Total size ({total_mb} MB) exceeds maximum ({max_mb} MB)")]
    TotalSizeExceeded { total_mb: f64, max_mb: f64 },

    #[error("File type \"{file_type}\" is not allowed (accepted: {allowed})")]
    InvalidType { file_type: String, allowed: String },
}

/// One rejected candidate. The candidate itself is dropped; only what the
/// reporter needs survives.
#[derive(Debug, Clone)]
pub struct Rejection {
    pub file_name: String,
    pub kind: RejectionKind,
}

/// Outcome of evaluating one batch.
#[derive(Debug, Default)]
pub struct Evaluation {
    pub accepted: Vec<FileCandidate>,
    pub rejections: Vec<Rejection>,
}

impl Evaluation {
    pub fn is_clean(&self) -> bool {
        self.rejections.is_empty()
    }
}

pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / 1_000_000.0
}

/// Per-file size window checks (minimum, then maximum).
fn check_file_size(size_bytes: u64, config: &UploadConfig) -> Option<RejectionKind> {
    let min_bytes = config.min_file_size_bytes();
    if min_bytes > 0 && size_bytes < min_bytes {
        return Some(RejectionKind::FileTooSmall {
            size_mb: bytes_to_mb(size_bytes),
            min_mb: config.min_file_size_mb,
        });
    }

    if size_bytes > config.max_file_size_bytes() {
        return Some(RejectionKind::FileTooLarge {
            size_mb: bytes_to_mb(size_bytes),
            max_mb: config.max_file_size_mb,
        });
    }

    None
}

/// Type filter check; the last rule in the per-candidate order.
fn check_type(name: &str, mime_or_extension: &str, config: &UploadConfig) -> Option<RejectionKind> {
    if config.extensions != ExtensionFilter::Any
        && !extensions::matches_filter(
            config.extensions,
            &config.custom_extensions,
            name,
            mime_or_extension,
        )
    {
        return Some(RejectionKind::InvalidType {
            file_type: extensions::file_type_label(name, mime_or_extension),
            allowed: extensions::allowed_label(config.extensions, &config.custom_extensions),
        });
    }

    None
}

/// Size and type checks combined, for initial-entry revalidation where the
/// batch-level rules (mode, count, total size) never apply.
pub(crate) fn check_size_and_type(
    name: &str,
    mime_or_extension: &str,
    size_bytes: u64,
    config: &UploadConfig,
) -> Option<RejectionKind> {
    check_file_size(size_bytes, config).or_else(|| check_type(name, mime_or_extension, config))
}

/// Evaluates a batch of candidates against the config and the current
/// collection. Checks run per candidate in a fixed order and the first
/// failure wins, so each candidate is rejected at most once.
pub fn evaluate(
    candidates: Vec<FileCandidate>,
    config: &UploadConfig,
    current: &[FileEntry],
) -> Evaluation {
    let mut evaluation = Evaluation::default();

    if candidates.is_empty() {
        return evaluation;
    }

    // Single-mode check is batch-level: a multi-file drop, or any drop onto
    // an occupied collection, rejects the whole batch.
    if config.mode == UploadMode::Single && (candidates.len() > 1 || !current.is_empty()) {
        for candidate in candidates {
            evaluation.rejections.push(Rejection {
                file_name: candidate.name,
                kind: RejectionKind::MultipleFilesInSingleMode,
            });
        }
        return evaluation;
    }

    let current_total: u64 = current.iter().map(|entry| entry.size_bytes).sum();
    let available_slots = config.max_files.saturating_sub(current.len() as u64);

    for candidate in candidates {
        if config.mode == UploadMode::Multi {
            if available_slots == 0 {
                evaluation.rejections.push(Rejection {
                    file_name: candidate.name,
                    kind: RejectionKind::MaxFilesReached {
                        max: config.max_files,
                    },
                });
                continue;
            }

            if evaluation.accepted.len() as u64 >= available_slots {
                evaluation.rejections.push(Rejection {
                    file_name: candidate.name,
                    kind: RejectionKind::TooManyFiles {
                        available: available_slots,
                    },
                });
                continue;
            }
        }

        if let Some(kind) = check_file_size(candidate.size_bytes(), config) {
            evaluation.rejections.push(Rejection {
                file_name: candidate.name,
                kind,
            });
            continue;
        }

        if config.mode == UploadMode::Multi {
            let accepted_total: u64 = evaluation
                .accepted
                .iter()
                .map(|accepted| accepted.size_bytes())
                .sum();
            let prospective_total = current_total + accepted_total + candidate.size_bytes();

            if prospective_total > config.max_total_file_size_bytes() {
                evaluation.rejections.push(Rejection {
                    file_name: candidate.name,
                    kind: RejectionKind::TotalSizeExceeded {
                        total_mb: bytes_to_mb(prospective_total),
                        max_mb: config.max_total_file_size_mb,
                    },
                });
                continue;
            }
        }

        if let Some(kind) = check_type(&candidate.name, &candidate.mime_or_extension, config) {
            evaluation.rejections.push(Rejection {
                file_name: candidate.name,
                kind,
            });
            continue;
        }

        evaluation.accepted.push(candidate);
    }

    evaluation
}
