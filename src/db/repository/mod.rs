//! Repository Module
//!
//! Provides CRUD operations for the SurrealDB tables.

pub mod employee;
pub mod user;

// Re-exports
pub use employee::EmployeeRepository;
pub use user::UserRepository;

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        // UNIQUE index violations are the authoritative duplicate guard;
        // surface them as Duplicate rather than a generic store failure
        if msg.contains("already contains") {
            RepoError::Duplicate(msg)
        } else {
            RepoError::Database(msg)
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: 全栈统一使用 "table:id" 格式
// =============================================================================
//
// 使用 surrealdb::RecordId 处理所有 ID：
//   - 解析: let id: RecordId = "employee:abc".parse()?;
//   - 创建: let id = RecordId::from_table_key("employee", "abc");
//   - CRUD: db.select(id) / db.delete(id) 直接使用 RecordId

/// Parse a path id into a [`RecordId`] for the given table
///
/// Accepts both the full `table:id` form and the bare key.
pub(crate) fn parse_record_id(table: &str, id: &str) -> RepoResult<RecordId> {
    if id.contains(':') {
        let rid: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        if rid.table() != table {
            return Err(RepoError::Validation(format!("Invalid ID: {}", id)));
        }
        Ok(rid)
    } else {
        Ok(RecordId::from_table_key(table, id))
    }
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_id_accepts_both_forms() {
        let full = parse_record_id("employee", "employee:abc123").expect("full form");
        let bare = parse_record_id("employee", "abc123").expect("bare form");
        assert_eq!(full, bare);
    }

    #[test]
    fn test_parse_record_id_rejects_wrong_table() {
        assert!(parse_record_id("employee", "user:abc123").is_err());
    }
}
