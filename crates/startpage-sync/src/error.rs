//! Error types for startpage-sync

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in engine operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Host(#[from] startpage_host::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}

impl Error {
    /// Whether the underlying cause is a dangling bookmark id.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Host(host) if host.is_not_found())
    }
}
