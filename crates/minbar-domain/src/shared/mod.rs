use serde::{Deserialize, Serialize};

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DomainError {
    /// Get error message
    pub fn message(&self) -> &str {
        match self {
            DomainError::InvalidCredentials(msg)
            | DomainError::NotFound(msg)
            | DomainError::Network(msg)
            | DomainError::Timeout(msg)
            | DomainError::Server(msg)
            | DomainError::Repository(msg)
            | DomainError::Infrastructure(msg)
            | DomainError::Validation(msg)
            | DomainError::Serialization(msg) => msg,
        }
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DomainError::Validation(_) | DomainError::NotFound(_) => ErrorSeverity::Info,
            DomainError::InvalidCredentials(_)
            | DomainError::Network(_)
            | DomainError::Timeout(_)
            | DomainError::Server(_) => ErrorSeverity::Warning,
            DomainError::Repository(_)
            | DomainError::Infrastructure(_)
            | DomainError::Serialization(_) => ErrorSeverity::Error,
        }
    }

    /// Check if error is recoverable
    ///
    /// A recoverable error is one the user can retry without changing
    /// anything locally (the server was unreachable, slow, or failing).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DomainError::Network(_) | DomainError::Timeout(_) | DomainError::Server(_)
        )
    }
}
