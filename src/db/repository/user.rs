//! User Repository
//!
//! Credential storage: registration writes a salted hash, login reads it
//! back by username. Users are never updated or deleted here.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{User, UserCreate};

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find user by username
    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let username_owned = username.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE username = $username LIMIT 1")
            .bind(("username", username_owned))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Register a new user
    ///
    /// The username pre-check produces a friendly error; the UNIQUE index
    /// on `user.username` remains the authoritative guard under races.
    pub async fn create(&self, data: UserCreate) -> RepoResult<User> {
        if self.find_by_username(&data.username).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Username '{}' already taken",
                data.username
            )));
        }

        let hash_pass = User::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE user SET
                    username = $username,
                    hash_pass = $hash_pass
                RETURN AFTER"#,
            )
            .bind(("username", data.username))
            .bind(("hash_pass", hash_pass))
            .await?;

        let created: Option<User> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Count all users
    pub async fn count(&self) -> RepoResult<usize> {
        #[derive(serde::Deserialize)]
        struct CountRow {
            count: usize,
        }

        let mut result = self
            .base
            .db()
            .query("SELECT count() AS count FROM user GROUP ALL")
            .await?;
        let rows: Vec<CountRow> = result.take(0)?;
        Ok(rows.first().map(|r| r.count).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    async fn repo() -> UserRepository {
        let service = DbService::in_memory().await.expect("in-memory db");
        UserRepository::new(service.db)
    }

    fn alice(password: &str) -> UserCreate {
        UserCreate {
            username: "alice".to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_stores_hash_not_plaintext() {
        let repo = repo().await;
        let user = repo.create(alice("pw1")).await.expect("create user");

        assert!(user.id.is_some());
        assert_ne!(user.hash_pass, "pw1");
        assert!(user.verify_password("pw1").expect("verify"));
        assert!(!user.verify_password("pw2").expect("verify"));
    }

    #[tokio::test]
    async fn test_duplicate_username_leaves_store_unchanged() {
        let repo = repo().await;
        repo.create(alice("pw1")).await.expect("first create");

        let err = repo.create(alice("pw2")).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
        assert_eq!(repo.count().await.expect("count"), 1);

        // The stored credential is still the original one
        let stored = repo
            .find_by_username("alice")
            .await
            .expect("lookup")
            .expect("user exists");
        assert!(stored.verify_password("pw1").expect("verify"));
    }

    #[tokio::test]
    async fn test_find_unknown_username() {
        let repo = repo().await;
        assert!(repo.find_by_username("nobody").await.expect("lookup").is_none());
    }
}
