use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong reading a combo_fx.toml back in.
/// None of these leave a session half-updated.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to parse TOML: `{key}` must be a table or an array of tables")]
    NotATable { key: String },

    #[error("Failed to parse TOML: invalid entry `{key}`: {source}")]
    InvalidEntry {
        key: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
