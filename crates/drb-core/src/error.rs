use std::path::PathBuf;

/// Alias for `Result<T, DrbError>`.
pub type DrbResult<T> = Result<T, DrbError>;

/// Errors that can occur when loading game files or acting on the world.
///
/// Malformed conditions are not represented here: they degrade to `false`
/// during entity construction and never surface as errors.
#[derive(Debug, thiserror::Error)]
pub enum DrbError {
    /// A game file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// The file that failed to open.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The JSON loader rejected the input.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The TOML loader rejected the input.
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// The YAML loader rejected the input.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The file extension does not name a supported format.
    #[error("unsupported config format: \"{0}\"")]
    UnsupportedFormat(String),

    /// A branch that should hold a mapping holds something else.
    #[error("expected a mapping at \"{path}\"")]
    NotAMapping {
        /// Dotted path of the offending node.
        path: String,
    },

    /// No entity with the given name is where it was looked for.
    #[error("entity not found: \"{0}\"")]
    EntityNotFound(String),

    /// The entity's variant has no use behaviour.
    #[error("{0} cannot be used")]
    NotUsable(String),

    /// The entity's conditions did not hold when it was built.
    #[error("{0} is not available")]
    Unavailable(String),
}
