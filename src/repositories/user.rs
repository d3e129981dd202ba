//! User repository for database operations.

use anyhow::Result;
use sea_orm::{ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::user;
use crate::utils::datetime;

/// Repository for user-related database operations.
pub struct UserRepository;

impl UserRepository {
    /// Get a single user by id.
    pub async fn get_by_id<C>(conn: &C, id: i32) -> Result<Option<user::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(user::Entity::find_by_id(id).one(conn).await?)
    }

    /// Get a single user by username.
    pub async fn get_by_username<C>(conn: &C, username: &str) -> Result<Option<user::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(user::Entity::find()
            .filter(user::Column::Username.eq(username.to_lowercase()))
            .one(conn)
            .await?)
    }

    /// Get a single user by email. Emails are stored lowercase.
    pub async fn get_by_email<C>(conn: &C, email: &str) -> Result<Option<user::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(user::Entity::find()
            .filter(user::Column::Email.eq(email.to_lowercase()))
            .one(conn)
            .await?)
    }

    /// Find a user by username, falling back to email.
    pub async fn get_by_login<C>(conn: &C, login: &str) -> Result<Option<user::Model>>
    where
        C: ConnectionTrait,
    {
        if let Some(user) = Self::get_by_username(conn, login).await? {
            return Ok(Some(user));
        }
        Self::get_by_email(conn, login).await
    }

    /// Get users by id, ordered by username.
    pub async fn get_many<C>(conn: &C, ids: &[i32]) -> Result<Vec<user::Model>>
    where
        C: ConnectionTrait,
    {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(user::Entity::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(user::Column::Username)
            .all(conn)
            .await?)
    }

    /// Insert a new user.
    pub async fn create<C>(
        conn: &C,
        username: &str,
        email: &str,
        password_hash: &str,
        display_name: &str,
    ) -> Result<user::Model>
    where
        C: ConnectionTrait,
    {
        let model = user::ActiveModel {
            id: ActiveValue::NotSet,
            username: ActiveValue::Set(username.to_string()),
            email: ActiveValue::Set(email.to_lowercase()),
            password_hash: ActiveValue::Set(password_hash.to_string()),
            display_name: ActiveValue::Set(display_name.to_string()),
            created_at: ActiveValue::Set(datetime::now_rfc3339()),
        };
        Ok(model.insert(conn).await?)
    }
}
