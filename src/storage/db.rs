use std::time::Duration;

use anyhow::{Context, Result};
use log::debug;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, PaginatorTrait, Schema,
};
use uuid::Uuid;

use crate::entities::{attachment, board, board_member, card, card_label, checklist_item, comment, label, list, user};

/// Pooled connections are never recycled, the memory database only lives while one is open.
const CONNECTION_LIFETIME: Duration = Duration::from_secs(60 * 60 * 24 * 365);

/// Local storage manager for board data
pub struct LocalStorage {
    pub conn: DatabaseConnection,
    _anchor: DatabaseConnection,
    name: String,
}

impl LocalStorage {
    /// Initialize an empty in-memory `SQLite` store with the full schema
    pub async fn new() -> Result<Self> {
        let name = format!("workshift_{}", Uuid::new_v4().simple());
        let database_url = format!("sqlite:file:{}?mode=memory&cache=shared", name);

        let mut pool_options = ConnectOptions::new(database_url.clone());
        pool_options
            .min_connections(1)
            .max_connections(4)
            .idle_timeout(CONNECTION_LIFETIME)
            .max_lifetime(CONNECTION_LIFETIME)
            .sqlx_logging(false);
        let conn = Database::connect(pool_options)
            .await
            .context("Failed to open in-memory database")?;

        // Anchor connection outside the working pool
        let mut anchor_options = ConnectOptions::new(database_url);
        anchor_options
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(CONNECTION_LIFETIME)
            .max_lifetime(CONNECTION_LIFETIME)
            .sqlx_logging(false);
        let anchor = Database::connect(anchor_options)
            .await
            .context("Failed to open anchor connection")?;

        let storage = LocalStorage {
            conn,
            _anchor: anchor,
            name,
        };
        storage.init_schema().await?;
        debug!("Opened local storage '{}'", storage.name);

        Ok(storage)
    }

    /// Name of the shared in-memory database
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Initialize database schema, parents before children
    async fn init_schema(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        let schema = Schema::new(backend);

        let mut statements = vec![
            schema.create_table_from_entity(user::Entity),
            schema.create_table_from_entity(board::Entity),
            schema.create_table_from_entity(board_member::Entity),
            schema.create_table_from_entity(list::Entity),
            schema.create_table_from_entity(card::Entity),
            schema.create_table_from_entity(label::Entity),
            schema.create_table_from_entity(card_label::Entity),
            schema.create_table_from_entity(checklist_item::Entity),
            schema.create_table_from_entity(comment::Entity),
            schema.create_table_from_entity(attachment::Entity),
        ];

        for statement in &mut statements {
            statement.if_not_exists();
            self.conn
                .execute(backend.build(&*statement))
                .await
                .context("Failed to create table")?;
        }

        Ok(())
    }

    /// Check if the database has any data
    pub async fn has_data(&self) -> Result<bool> {
        let users = user::Entity::find().count(&self.conn).await?;
        let boards = board::Entity::find().count(&self.conn).await?;
        Ok(users + boards > 0)
    }

    /// Clear all data from the database
    pub async fn clear_all_data(&self) -> Result<()> {
        Self::clear_tables(&self.conn).await
    }

    /// Delete every row, children before parents
    pub(crate) async fn clear_tables<C>(conn: &C) -> Result<()>
    where
        C: ConnectionTrait,
    {
        attachment::Entity::delete_many().exec(conn).await?;
        comment::Entity::delete_many().exec(conn).await?;
        checklist_item::Entity::delete_many().exec(conn).await?;
        card_label::Entity::delete_many().exec(conn).await?;
        label::Entity::delete_many().exec(conn).await?;
        card::Entity::delete_many().exec(conn).await?;
        list::Entity::delete_many().exec(conn).await?;
        board_member::Entity::delete_many().exec(conn).await?;
        board::Entity::delete_many().exec(conn).await?;
        user::Entity::delete_many().exec(conn).await?;
        Ok(())
    }
}
