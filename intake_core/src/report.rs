//! Turns rule-evaluator rejections into user-facing text.
//!
//! Each rejection kind has a configured template with named `{placeholder}`
//! slots. Substitution is plain text replacement: known placeholders are
//! filled with formatted context values, unknown ones are left verbatim, and
//! a malformed template can never fail rendering.

use crate::config::ErrorMessages;
use crate::rules::{Rejection, RejectionKind};

/// Formats a megabyte value without trailing zeros: `15`, `2.5`, `0.25`.
fn format_mb(value: f64) -> String {
    format!("{}", value)
}

fn render(template: &str, substitutions: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (key, value) in substitutions {
        out = out.replace(&format!("{{{}}}", key), value);
    }
    out
}

/// Renders the configured template for one rejection.
pub fn message_for(kind: &RejectionKind, messages: &ErrorMessages) -> String {
    match kind {
        RejectionKind::MultipleFilesInSingleMode => messages.multiple_files.clone(),
        RejectionKind::MaxFilesReached { max } => {
            render(&messages.max_files_reached, &[("max", max.to_string())])
        }
        RejectionKind::TooManyFiles { available } => render(
            &messages.too_many_files,
            &[("available", available.to_string())],
        ),
        RejectionKind::FileTooSmall { size_mb, min_mb } => render(
            &messages.file_too_small,
            &[("size", format_mb(*size_mb)), ("min", format_mb(*min_mb))],
        ),
        RejectionKind::FileTooLarge { size_mb, max_mb } => render(
            &messages.file_too_large,
            &[("size", format_mb(*size_mb)), ("max", format_mb(*max_mb))],
        ),
        RejectionKind::TotalSizeExceeded { total_mb, max_mb } => render(
            &messages.total_size_exceeded,
            &[("total", format_mb(*total_mb)), ("max", format_mb(*max_mb))],
        ),
        RejectionKind::InvalidType { file_type, allowed } => render(
            &messages.invalid_type,
            &[("type", file_type.clone()), ("allowed", allowed.clone())],
        ),
    }
}

/// Aggregates a batch of rejections into the single message carried by the
/// `error` event. Duplicate messages (a multi-file drop failing the same
/// check) collapse to one, preserving first-seen order.
pub fn batch_message(rejections: &[Rejection], messages: &ErrorMessages) -> String {
    let mut seen = Vec::new();
    for rejection in rejections {
        let message = message_for(&rejection.kind, messages);
        if !seen.contains(&message) {
            seen.push(message);
        }
    }
    seen.join("; ")
}
