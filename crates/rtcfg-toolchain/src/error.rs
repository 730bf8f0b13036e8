//! Error types for build-configuration resolution.

/// Errors that can occur while resolving or rendering a build configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The requested toolchain is not one of the known identities.
    #[error("unknown toolchain '{name}' (expected 'gcc' or 'keil')")]
    UnknownToolchain {
        /// The name that was requested.
        name: String,
    },

    /// The requested build mode is neither release nor debug.
    #[error("unknown build mode '{name}' (expected 'release' or 'debug')")]
    UnknownBuildMode {
        /// The name that was requested.
        name: String,
    },

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
