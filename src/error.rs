//! The crate-wide error type.

use thiserror::Error;

/// Errors surfaced across backend I/O, configuration, and search parsing.
#[derive(Debug, Error)]
pub enum AbacusError {
    #[error("backend error: {0}")]
    Backend(String),

    #[error("config I/O error: {0}")]
    Config(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("no beads database found; pass --db or run inside a .beads project")]
    DbNotFound,

    #[error("invalid search query: {0}")]
    SearchParse(String),
}

impl AbacusError {
    /// A short, user-facing summary with any "Error: " prefix stripped, for
    /// the toast layer (it adds its own prefix when rendering).
    pub fn toast_message(&self) -> String {
        let full = self.to_string();
        full.strip_prefix("Error: ").unwrap_or(&full).to_string()
    }
}

pub type Result<T> = std::result::Result<T, AbacusError>;
