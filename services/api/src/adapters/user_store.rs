//! services/api/src/adapters/user_store.rs
//!
//! File-backed implementation of the `UserStore` port. Accounts live in one
//! `users.json` file, auto-created empty on first use. Passwords are stored
//! as argon2 hashes; the verification token is 32 random bytes hex-encoded.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::error;

use techpro_core::domain::{NewUser, PublicUser, User, VerifyOutcome};
use techpro_core::ports::{PortError, PortResult, UserStore};

use super::file::{read_json, write_json};

//=========================================================================================
// "Impure" On-disk Record Structs
//=========================================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRecord {
    id: String,
    first_name: String,
    last_name: String,
    email: String,
    password: String,
    verification_token: Option<String>,
    is_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    verified_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    // The token that was consumed at verification. Kept so a re-click of the
    // emailed link reports "already verified" instead of an invalid token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    consumed_token: Option<String>,
}

impl UserRecord {
    fn to_domain(&self) -> User {
        User {
            id: self.id.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            verification_token: self.verification_token.clone(),
            is_verified: self.is_verified,
            verified_at: self.verified_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn to_public(&self) -> PublicUser {
        PublicUser::from(self.to_domain())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsersFile {
    #[serde(default)]
    users: Vec<UserRecord>,
    #[serde(default)]
    last_updated: Option<DateTime<Utc>>,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

pub struct JsonUserStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonUserStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join("users.json"),
            lock: Mutex::new(()),
        }
    }

    async fn read(&self) -> PortResult<UsersFile> {
        if tokio::fs::try_exists(&self.path)
            .await
            .map_err(|e| PortError::Storage(e.to_string()))?
        {
            read_json(&self.path).await
        } else {
            let empty = UsersFile::default();
            write_json(&self.path, &empty).await?;
            Ok(empty)
        }
    }

    async fn write(&self, mut file: UsersFile) -> PortResult<()> {
        file.last_updated = Some(Utc::now());
        write_json(&self.path, &file).await
    }
}

/// 256 bits of randomness, hex-encoded: 64 characters.
fn generate_verification_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn hash_password(plaintext: &str) -> PortResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| {
            error!("Failed to hash password: {:?}", e);
            PortError::Storage("failed to hash password".to_string())
        })
}

fn verify_password(plaintext: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            error!("Failed to parse stored password hash: {:?}", e);
            false
        }
    }
}

//=========================================================================================
// UserStore implementation
//=========================================================================================

#[async_trait]
impl UserStore for JsonUserStore {
    async fn signup(&self, new_user: NewUser) -> PortResult<User> {
        let _guard = self.lock.lock().await;
        let mut file = self.read().await?;

        // Email uniqueness is only enforced here, at signup time.
        if file.users.iter().any(|u| u.email == new_user.email) {
            return Err(PortError::Conflict(format!(
                "Email '{}' is already registered",
                new_user.email
            )));
        }

        let now = Utc::now();
        let record = UserRecord {
            id: now.timestamp_millis().to_string(),
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            email: new_user.email,
            password: hash_password(&new_user.password)?,
            verification_token: Some(generate_verification_token()),
            is_verified: false,
            verified_at: None,
            created_at: now,
            updated_at: now,
            consumed_token: None,
        };
        let user = record.to_domain();

        file.users.push(record);
        self.write(file).await?;
        Ok(user)
    }

    async fn verify_token(&self, token: &str) -> PortResult<VerifyOutcome> {
        let _guard = self.lock.lock().await;
        let mut file = self.read().await?;

        let position = file
            .users
            .iter()
            .position(|u| u.verification_token.as_deref() == Some(token));

        let Some(idx) = position else {
            // The live tokens don't match; a token consumed by an earlier
            // verification still resolves, as a no-op.
            if file
                .users
                .iter()
                .any(|u| u.is_verified && u.consumed_token.as_deref() == Some(token))
            {
                return Ok(VerifyOutcome::AlreadyVerified);
            }
            return Err(PortError::NotFound("Invalid verification token".to_string()));
        };

        if file.users[idx].is_verified {
            return Ok(VerifyOutcome::AlreadyVerified);
        }

        let now = Utc::now();
        let record = &mut file.users[idx];
        record.is_verified = true;
        record.consumed_token = record.verification_token.take();
        record.verified_at = Some(now);
        record.updated_at = now;
        let public = record.to_public();

        self.write(file).await?;
        Ok(VerifyOutcome::Verified(public))
    }

    async fn login(&self, email: &str, password: &str) -> PortResult<PublicUser> {
        let _guard = self.lock.lock().await;
        let file = self.read().await?;

        let record = file
            .users
            .iter()
            .find(|u| u.email == email)
            .ok_or(PortError::Unauthorized)?;

        if !verify_password(password, &record.password) {
            return Err(PortError::Unauthorized);
        }
        Ok(record.to_public())
    }

    async fn list(&self) -> PortResult<Vec<PublicUser>> {
        let _guard = self.lock.lock().await;
        let file = self.read().await?;
        Ok(file.users.iter().map(UserRecord::to_public).collect())
    }
}
