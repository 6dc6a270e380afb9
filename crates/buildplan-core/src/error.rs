//! Descriptor error types.

use std::path::PathBuf;

/// Errors that can occur while loading, validating, or resolving descriptors.
///
/// Everything here is detected at configuration-load or resolution time; an
/// invalid descriptor blocks the whole build with no partial-failure mode.
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    /// Malformed or incomplete descriptor.
    #[error("configuration error: {detail}")]
    Configuration { detail: String },

    /// Build settings version string not in the supported set.
    #[error("unsupported build settings version: '{value}' (expected \"v1\" or \"v2\")")]
    UnsupportedVersion { value: String },

    /// A listed public dependency is neither a project module nor a
    /// registered engine subsystem.
    #[error("unknown dependency '{dependency}' required by module '{module}'")]
    UnknownDependency { module: String, dependency: String },

    /// Two module descriptors declare the same name.
    #[error("module '{name}' is declared more than once")]
    DuplicateModule { name: String },

    /// Descriptor file not found.
    #[error("descriptor file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error reading/writing descriptor files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for descriptor operations.
pub type Result<T> = std::result::Result<T, DescriptorError>;
