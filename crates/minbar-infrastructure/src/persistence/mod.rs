mod database;
mod session_repo;

pub use database::Database;
pub use session_repo::SqliteSessionRepository;
