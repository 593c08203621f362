use async_trait::async_trait;
use chrono::Utc;
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use minbar_domain::member::UserProfile;
use minbar_domain::session::{Session, SessionRepository};
use minbar_domain::shared::DomainError;

#[derive(FromRow)]
struct SessionRow {
    server_url: String,
    auth_token: Option<String>,
    user_json: Option<String>,
}

impl SessionRow {
    fn into_session(self) -> Session {
        // A user blob that no longer deserializes is treated as signed out
        // rather than blocking startup
        let user = self
            .user_json
            .as_deref()
            .and_then(|json| serde_json::from_str::<UserProfile>(json).ok());

        Session::restore(self.server_url, self.auth_token, user)
    }
}

pub struct SqliteSessionRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteSessionRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for SqliteSessionRepository {
    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        let user_json = session
            .user()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| DomainError::Serialization(e.to_string()))?;

        let query = r#"
            INSERT INTO session (id, server_url, auth_token, user_json, updated_at)
            VALUES (1, ?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                server_url = ?1,
                auth_token = ?2,
                user_json = ?3,
                updated_at = ?4
        "#;

        sqlx::query(query)
            .bind(session.server_url())
            .bind(session.auth_token())
            .bind(user_json)
            .bind(Utc::now().to_rfc3339())
            .execute(&*self.pool)
            .await
            .map_err(|e| DomainError::Repository(format!("Save session: {}", e)))?;

        Ok(())
    }

    async fn load(&self) -> Result<Option<Session>, DomainError> {
        let query = "SELECT server_url, auth_token, user_json FROM session WHERE id = 1";

        let row: Option<SessionRow> = sqlx::query_as(query)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| DomainError::Repository(format!("Load session: {}", e)))?;

        Ok(row.map(|r| r.into_session()))
    }

    async fn clear(&self) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM session WHERE id = 1")
            .execute(&*self.pool)
            .await
            .map_err(|e| DomainError::Repository(format!("Clear session: {}", e)))?;

        Ok(())
    }
}
