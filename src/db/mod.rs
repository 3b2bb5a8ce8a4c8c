//! Database Module
//!
//! Embedded SurrealDB storage: connection setup and schema definition.

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::utils::AppError;

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database at `db_dir`
    pub async fn new(db_dir: &Path) -> Result<Self, AppError> {
        let path = db_dir.to_string_lossy().to_string();
        let db = Surreal::new::<RocksDb>(path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {}", e)))?;

        Self::setup(&db).await?;
        tracing::info!(path = %db_dir.display(), "Database connection established");

        Ok(Self { db })
    }

    /// In-memory database, used by tests
    pub async fn in_memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {}", e)))?;

        Self::setup(&db).await?;

        Ok(Self { db })
    }

    async fn setup(db: &Surreal<Db>) -> Result<(), AppError> {
        db.use_ns("directory")
            .use_db("main")
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {}", e)))?;

        Self::define_schema(db).await
    }

    /// Define tables and indexes (idempotent)
    ///
    /// The UNIQUE indexes are the authoritative uniqueness guards for
    /// usernames and employee emails; application-level pre-checks only
    /// exist to produce friendlier error messages.
    async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
        db.query(
            r#"
            DEFINE TABLE IF NOT EXISTS user SCHEMALESS;
            DEFINE INDEX IF NOT EXISTS user_username ON TABLE user COLUMNS username UNIQUE;

            DEFINE TABLE IF NOT EXISTS employee SCHEMALESS;
            DEFINE INDEX IF NOT EXISTS employee_email ON TABLE employee COLUMNS email UNIQUE;
            "#,
        )
        .await
        .map_err(|e| AppError::database(format!("Failed to define schema: {}", e)))?
        .check()
        .map_err(|e| AppError::database(format!("Failed to define schema: {}", e)))?;

        Ok(())
    }
}
