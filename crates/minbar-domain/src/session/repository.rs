use async_trait::async_trait;

use super::Session;
use crate::shared::DomainError;

/// Durable store for the single client session.
///
/// The Rust rendition of the browser's local storage: one logical record,
/// read at startup, overwritten whole on every explicit write.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Save (upsert) the session.
    async fn save(&self, session: &Session) -> Result<(), DomainError>;

    /// Load the persisted session, if one was ever saved.
    async fn load(&self) -> Result<Option<Session>, DomainError>;

    /// Forget the persisted session entirely.
    async fn clear(&self) -> Result<(), DomainError>;
}
