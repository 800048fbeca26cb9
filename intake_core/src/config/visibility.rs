//! Editor-panel field visibility as a pure function of the config snapshot.
//!
//! The hosting shell shows or hides editable fields depending on sibling
//! values (reorder only matters for multi-file intake, the custom extension
//! list only matters for the custom filter, and so on). Rather than
//! per-field callbacks, the whole rule set is evaluated once per snapshot.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::settings::{ExtensionFilter, UploadConfig, UploadMode};

/// Conditionally visible configuration fields. Fields that are always
/// visible (mode, drop, limits on single files, exposure flags) are not
/// listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Reorder,
    MaxTotalFileSize,
    MaxFiles,
    CustomExtensions,
    MsgMultipleFiles,
    MsgMaxFilesReached,
    MsgTooManyFiles,
    MsgFileTooSmall,
    MsgTotalSizeExceeded,
    MsgInvalidType,
}

pub fn visible_fields(config: &UploadConfig) -> HashSet<Field> {
    let mut fields = HashSet::new();

    match config.mode {
        UploadMode::Multi => {
            fields.insert(Field::Reorder);
            fields.insert(Field::MaxTotalFileSize);
            fields.insert(Field::MaxFiles);
            fields.insert(Field::MsgMaxFilesReached);
            fields.insert(Field::MsgTooManyFiles);
            fields.insert(Field::MsgTotalSizeExceeded);
        }
        UploadMode::Single => {
            fields.insert(Field::MsgMultipleFiles);
        }
    }

    if config.extensions == ExtensionFilter::Custom {
        fields.insert(Field::CustomExtensions);
    }

    if config.extensions != ExtensionFilter::Any {
        fields.insert(Field::MsgInvalidType);
    }

    if config.min_file_size_mb > 0.0 {
        fields.insert(Field::MsgFileTooSmall);
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_mode_hides_multi_fields() {
        let config = UploadConfig::default();
        let fields = visible_fields(&config);

        assert!(fields.contains(&Field::MsgMultipleFiles));
        assert!(!fields.contains(&Field::Reorder));
        assert!(!fields.contains(&Field::MaxFiles));
        assert!(!fields.contains(&Field::MaxTotalFileSize));
        assert!(!fields.contains(&Field::MsgMaxFilesReached));
    }

    #[test]
    fn test_multi_mode_shows_multi_fields() {
        let config = UploadConfig {
            mode: UploadMode::Multi,
            ..UploadConfig::default()
        };
        let fields = visible_fields(&config);

        assert!(fields.contains(&Field::Reorder));
        assert!(fields.contains(&Field::MaxFiles));
        assert!(fields.contains(&Field::MsgTooManyFiles));
        assert!(!fields.contains(&Field::MsgMultipleFiles));
    }

    #[test]
    fn test_extension_dependent_fields() {
        let mut config = UploadConfig::default();
        assert!(!visible_fields(&config).contains(&Field::MsgInvalidType));

        config.extensions = ExtensionFilter::Image;
        let fields = visible_fields(&config);
        assert!(fields.contains(&Field::MsgInvalidType));
        assert!(!fields.contains(&Field::CustomExtensions));

        config.extensions = ExtensionFilter::Custom;
        config.custom_extensions = ".pt".to_string();
        let fields = visible_fields(&config);
        assert!(fields.contains(&Field::CustomExtensions));
        assert!(fields.contains(&Field::MsgInvalidType));
    }

    #[test]
    fn test_min_size_gates_too_small_message() {
        let mut config = UploadConfig::default();
        assert!(!visible_fields(&config).contains(&Field::MsgFileTooSmall));

        config.min_file_size_mb = 0.1;
        assert!(visible_fields(&config).contains(&Field::MsgFileTooSmall));
    }
}
