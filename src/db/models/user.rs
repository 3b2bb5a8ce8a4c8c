//! User Model
//!
//! Login credentials: a unique username and an Argon2 password hash.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// User ID type
pub type UserId = RecordId;

/// User model matching the SurrealDB `user` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<UserId>,
    pub username: String,
    /// Argon2 PHC hash; never serialized into responses
    #[serde(skip_serializing)]
    pub hash_pass: String,
}

/// Registration payload
#[derive(Debug, Clone, Deserialize)]
pub struct UserCreate {
    pub username: String,
    pub password: String,
}

impl User {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.hash_pass)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_round_trip() {
        let hash = User::hash_password("pw1").expect("hashing failed");
        assert_ne!(hash, "pw1");

        let user = User {
            id: None,
            username: "alice".to_string(),
            hash_pass: hash,
        };
        assert!(user.verify_password("pw1").expect("verify failed"));
        assert!(!user.verify_password("pw2").expect("verify failed"));
    }

    #[test]
    fn test_hash_is_never_serialized() {
        let user = User {
            id: None,
            username: "alice".to_string(),
            hash_pass: User::hash_password("pw1").expect("hashing failed"),
        };
        let json = serde_json::to_value(&user).expect("serialize user");
        assert!(json.get("hash_pass").is_none());
        assert_eq!(json["username"], "alice");
    }
}
