use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::collection::InitialFile;

/// Single-file vs multi-file intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadMode {
    Single,
    Multi,
}

/// Allowed file-type filter. `Custom` matches against the parsed
/// `custom_extensions` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtensionFilter {
    Any,
    Image,
    Video,
    Audio,
    Pdf,
    Csv,
    Excel,
    Word,
    Json,
    Custom,
}

/// Immutable configuration snapshot consumed by the intake engine. Size
/// limits are user-facing decimal megabytes; conversion to bytes is
/// `mb * 1_000_000`, rounded to the nearest byte.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_mode")]
    pub mode: UploadMode,
    #[serde(default = "default_true")]
    pub drop: bool,
    #[serde(default)]
    pub reorder: bool,
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: f64,
    #[serde(default)]
    pub min_file_size_mb: f64,
    #[serde(default = "default_max_total_file_size_mb")]
    pub max_total_file_size_mb: f64,
    #[serde(default = "default_max_files")]
    pub max_files: u64,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub readonly: bool,
    #[serde(default = "default_extensions")]
    pub extensions: ExtensionFilter,
    #[serde(default)]
    pub custom_extensions: String,
    #[serde(default)]
    pub expose_base64: bool,
    #[serde(default)]
    pub expose_binary: bool,
    /// When true, initial entries are re-checked against the size and type
    /// rules while seeding; the mode and count rules never apply to them.
    #[serde(default)]
    pub revalidate_initial: bool,
    #[serde(default)]
    pub messages: ErrorMessages,
    #[serde(default)]
    pub initial_value: Vec<InitialFile>,
}

/// User-facing rejection message templates. Placeholders in braces are
/// substituted by the reporter; unknown placeholders are left verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessages {
    #[serde(default = "default_msg_multiple_files")]
    pub multiple_files: String,
    #[serde(default = "default_msg_max_files_reached")]
    pub max_files_reached: String,
    #[serde(default = "default_msg_too_many_files")]
    pub too_many_files: String,
    #[serde(default = "default_msg_file_too_small")]
    pub file_too_small: String,
    #[serde(default = "default_msg_file_too_large")]
    pub file_too_large: String,
    #[serde(default = "default_msg_total_size_exceeded")]
    pub total_size_exceeded: String,
    #[serde(default = "default_msg_invalid_type")]
    pub invalid_type: String,
}

fn default_mode() -> UploadMode {
    UploadMode::Single
}

fn default_true() -> bool {
    true
}

fn default_max_file_size_mb() -> f64 {
    10.0
}

fn default_max_total_file_size_mb() -> f64 {
    50.0
}

fn default_max_files() -> u64 {
    10
}

fn default_extensions() -> ExtensionFilter {
    ExtensionFilter::Any
}

fn default_msg_multiple_files() -> String {
    "Multiple files provided in single file mode".to_string()
}

fn default_msg_max_files_reached() -> String {
    "Maximum number of files ({max}) reached".to_string()
}

fn default_msg_too_many_files() -> String {
    "Only {available} more file(s) can be added".to_string()
}

fn default_msg_file_too_small() -> String {
    "File size ({size} MB) is below minimum ({min} MB)".to_string()
}

fn default_msg_file_too_large() -> String {
    "File size ({size} MB) exceeds maximum ({max} MB)".to_string()
}

fn default_msg_total_size_exceeded() -> String {
    "Total size ({total} MB) exceeds maximum ({max} MB)".to_string()
}

fn default_msg_invalid_type() -> String {
    "File type \"{type}\" is not allowed. Accepted: {allowed}".to_string()
}

impl Default for ErrorMessages {
    fn default() -> Self {
        Self {
            multiple_files: default_msg_multiple_files(),
            max_files_reached: default_msg_max_files_reached(),
            too_many_files: default_msg_too_many_files(),
            file_too_small: default_msg_file_too_small(),
            file_too_large: default_msg_file_too_large(),
            total_size_exceeded: default_msg_total_size_exceeded(),
            invalid_type: default_msg_invalid_type(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            drop: true,
            reorder: false,
            max_file_size_mb: default_max_file_size_mb(),
            min_file_size_mb: 0.0,
            max_total_file_size_mb: default_max_total_file_size_mb(),
            max_files: default_max_files(),
            required: false,
            readonly: false,
            extensions: default_extensions(),
            custom_extensions: String::new(),
            expose_base64: false,
            expose_binary: false,
            revalidate_initial: false,
            messages: ErrorMessages::default(),
            initial_value: Vec::new(),
        }
    }
}

impl UploadConfig {
    /// Converts a configured megabyte limit to bytes (decimal megabytes).
    pub fn mb_to_bytes(mb: f64) -> u64 {
        (mb * 1_000_000.0).round().max(0.0) as u64
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        Self::mb_to_bytes(self.max_file_size_mb)
    }

    pub fn min_file_size_bytes(&self) -> u64 {
        Self::mb_to_bytes(self.min_file_size_mb)
    }

    pub fn max_total_file_size_bytes(&self) -> u64 {
        Self::mb_to_bytes(self.max_total_file_size_mb)
    }

    /// Loads configuration by layering defaults, an optional `intake.toml`
    /// in the working directory, and `INTAKE_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder().add_source(Config::try_from(&UploadConfig::default())?);

        if Path::new("intake.toml").exists() {
            builder = builder.add_source(File::with_name("intake"));
        }

        // Double separator keeps single underscores inside field names:
        // INTAKE_MAX_FILE_SIZE_MB, INTAKE_MESSAGES__FILE_TOO_LARGE.
        builder = builder.add_source(
            Environment::with_prefix("INTAKE")
                .separator("__")
                .try_parsing(true),
        );

        let config: UploadConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Loads configuration from a specific file path layered over defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config: UploadConfig = Config::builder()
            .add_source(Config::try_from(&UploadConfig::default())?)
            .add_source(File::from(path))
            .build()?
            .try_deserialize()?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_files == 0 {
            return Err(ConfigError::Message(
                "max_files must be at least 1".to_string(),
            ));
        }

        if self.max_file_size_mb <= 0.0 {
            return Err(ConfigError::Message(
                "max_file_size_mb must be greater than 0".to_string(),
            ));
        }

        if self.min_file_size_mb < 0.0 {
            return Err(ConfigError::Message(
                "min_file_size_mb cannot be negative".to_string(),
            ));
        }

        if self.min_file_size_mb > self.max_file_size_mb {
            return Err(ConfigError::Message(
                "min_file_size_mb cannot exceed max_file_size_mb".to_string(),
            ));
        }

        if self.max_total_file_size_mb <= 0.0 {
            return Err(ConfigError::Message(
                "max_total_file_size_mb must be greater than 0".to_string(),
            ));
        }

        if self.extensions == ExtensionFilter::Custom
            && crate::rules::parse_custom_extensions(&self.custom_extensions).is_empty()
        {
            return Err(ConfigError::Message(
                "extensions is set to custom but custom_extensions is empty".to_string(),
            ));
        }

        Ok(())
    }
}
