//! Registration and sessions.
//!
//! Passwords are stored as a salted SHA-256 digest so the snapshot never holds
//! them in clear text. This is not meant as real credential security.

use log::{info, warn};
use sea_orm::TransactionTrait;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::error::{ApiError, ApiResult};
use super::types::{Session, UserProfile};
use super::{validation, WorkShiftApi};
use crate::constants::DISPLAY_NAME_MAX_LEN;
use crate::repositories::UserRepository;
use crate::utils::datetime;

const HASH_PREFIX: &str = "sha256$";

/// Digest stored for a username and password.
pub(crate) fn hash_password(username: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"workshift:");
    hasher.update(username.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    format!("{}{}", HASH_PREFIX, hex::encode(hasher.finalize()))
}

fn verify_password(username: &str, password: &str, stored: &str) -> bool {
    hash_password(username, password) == stored
}

impl WorkShiftApi {
    /// Create a user account. The display name defaults to the username.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> ApiResult<UserProfile> {
        let username = validation::username(username)?;
        let email = validation::email(email)?;
        validation::password(password)?;
        let display_name = validation::optional_text("Display name", Some(display_name), DISPLAY_NAME_MAX_LEN)?
            .unwrap_or_else(|| username.clone());

        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        if UserRepository::get_by_username(&txn, &username).await?.is_some() {
            return Err(ApiError::conflict(format!("username '{}' is already taken", username)));
        }
        if UserRepository::get_by_email(&txn, &email).await?.is_some() {
            return Err(ApiError::conflict(format!("email '{}' is already registered", email)));
        }

        let user = UserRepository::create(
            &txn,
            &username,
            &email,
            &hash_password(&username, password),
            &display_name,
        )
        .await?;
        txn.commit().await?;

        info!("Registered user '{}' ({})", user.username, user.id);
        Ok(user.into())
    }

    /// Sign in with a username or email. Replaces any current session.
    pub async fn login(&self, login: &str, password: &str) -> ApiResult<Session> {
        let user = {
            let storage = self.storage.lock().await;
            UserRepository::get_by_login(&storage.conn, login.trim()).await?
        };

        let user = match user {
            Some(user) if verify_password(&user.username, password, &user.password_hash) => user,
            _ => {
                warn!("Failed sign in for '{}'", login.trim());
                return Err(ApiError::Unauthorized("invalid username or password".to_string()));
            }
        };

        let session = Session {
            token: Uuid::new_v4(),
            user: user.into(),
            started_at: datetime::now_rfc3339(),
        };
        *self.session.lock().await = Some(session.clone());

        info!("User '{}' signed in", session.user.username);
        Ok(session)
    }

    /// End the current session. Returns false if nobody was signed in.
    pub async fn logout(&self) -> bool {
        match self.session.lock().await.take() {
            Some(session) => {
                info!("User '{}' signed out", session.user.username);
                true
            }
            None => false,
        }
    }

    /// The signed-in user, if any.
    pub async fn current_user(&self) -> Option<UserProfile> {
        self.session.lock().await.as_ref().map(|s| s.user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_depends_on_username_and_password() {
        let hash = hash_password("ada", "secret-pass");
        assert!(hash.starts_with(HASH_PREFIX));
        assert_eq!(hash.len(), HASH_PREFIX.len() + 64);
        assert!(verify_password("ada", "secret-pass", &hash));
        assert!(!verify_password("ada", "secret-pas", &hash));
        assert_ne!(hash, hash_password("bob", "secret-pass"));
    }
}
