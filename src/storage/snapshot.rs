//! Whole-store snapshots.
//!
//! A [`Snapshot`] holds every row of every table. It is what the persistence
//! layer writes to disk (or keeps for the session) and what gets restored on
//! the next start.

use anyhow::{Context, Result};
use log::info;
use sea_orm::{DatabaseTransaction, EntityTrait, IntoActiveModel, QueryOrder, TransactionTrait};
use serde::{Deserialize, Serialize};

use super::LocalStorage;
use crate::entities::{attachment, board, board_member, card, card_label, checklist_item, comment, label, list, user};
use crate::utils::datetime;

/// Highest snapshot format this build can read.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Serialized content of the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub format_version: u32,
    pub saved_at: String,
    pub users: Vec<user::Model>,
    pub boards: Vec<board::Model>,
    pub board_members: Vec<board_member::Model>,
    pub lists: Vec<list::Model>,
    pub cards: Vec<card::Model>,
    pub labels: Vec<label::Model>,
    pub card_labels: Vec<card_label::Model>,
    pub checklist_items: Vec<checklist_item::Model>,
    pub comments: Vec<comment::Model>,
    pub attachments: Vec<attachment::Model>,
}

impl Snapshot {
    /// Total number of rows across all tables
    pub fn row_count(&self) -> usize {
        self.users.len()
            + self.boards.len()
            + self.board_members.len()
            + self.lists.len()
            + self.cards.len()
            + self.labels.len()
            + self.card_labels.len()
            + self.checklist_items.len()
            + self.comments.len()
            + self.attachments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }
}

/// Insert rows keeping their ids. Empty inserts are skipped since they produce no statement.
macro_rules! restore_rows {
    ($txn:expr, $module:ident, $rows:expr) => {
        if !$rows.is_empty() {
            $module::Entity::insert_many($rows.into_iter().map(|row| row.into_active_model()))
                .exec_without_returning($txn)
                .await
                .with_context(|| format!("Failed to restore {}", stringify!($module)))?;
        }
    };
}

impl LocalStorage {
    /// Read every table into a snapshot, rows ordered by id
    pub async fn export_snapshot(&self) -> Result<Snapshot> {
        let conn = &self.conn;

        Ok(Snapshot {
            format_version: SNAPSHOT_FORMAT_VERSION,
            saved_at: datetime::now_rfc3339(),
            users: user::Entity::find().order_by_asc(user::Column::Id).all(conn).await?,
            boards: board::Entity::find().order_by_asc(board::Column::Id).all(conn).await?,
            board_members: board_member::Entity::find()
                .order_by_asc(board_member::Column::Id)
                .all(conn)
                .await?,
            lists: list::Entity::find().order_by_asc(list::Column::Id).all(conn).await?,
            cards: card::Entity::find().order_by_asc(card::Column::Id).all(conn).await?,
            labels: label::Entity::find().order_by_asc(label::Column::Id).all(conn).await?,
            card_labels: card_label::Entity::find()
                .order_by_asc(card_label::Column::CardId)
                .order_by_asc(card_label::Column::LabelId)
                .all(conn)
                .await?,
            checklist_items: checklist_item::Entity::find()
                .order_by_asc(checklist_item::Column::Id)
                .all(conn)
                .await?,
            comments: comment::Entity::find().order_by_asc(comment::Column::Id).all(conn).await?,
            attachments: attachment::Entity::find()
                .order_by_asc(attachment::Column::Id)
                .all(conn)
                .await?,
        })
    }

    /// Replace the whole store with the snapshot content.
    ///
    /// Runs in one transaction: on failure the previous content is kept.
    pub async fn import_snapshot(&self, snapshot: Snapshot) -> Result<()> {
        if snapshot.format_version > SNAPSHOT_FORMAT_VERSION {
            anyhow::bail!(
                "Snapshot format {} is newer than the supported format {}",
                snapshot.format_version,
                SNAPSHOT_FORMAT_VERSION
            );
        }

        let rows = snapshot.row_count();
        let saved_at = snapshot.saved_at.clone();
        let txn = self.conn.begin().await?;

        if let Err(e) = Self::replace_tables(&txn, snapshot).await {
            txn.rollback().await.context("Failed to roll back snapshot restore")?;
            return Err(e);
        }

        txn.commit().await?;
        info!("Restored {} rows from snapshot saved at {}", rows, saved_at);
        Ok(())
    }

    /// Clear every table and insert the snapshot rows, parents first
    async fn replace_tables(txn: &DatabaseTransaction, snapshot: Snapshot) -> Result<()> {
        Self::clear_tables(txn).await?;

        restore_rows!(txn, user, snapshot.users);
        restore_rows!(txn, board, snapshot.boards);
        restore_rows!(txn, board_member, snapshot.board_members);
        restore_rows!(txn, list, snapshot.lists);
        restore_rows!(txn, card, snapshot.cards);
        restore_rows!(txn, label, snapshot.labels);
        restore_rows!(txn, card_label, snapshot.card_labels);
        restore_rows!(txn, checklist_item, snapshot.checklist_items);
        restore_rows!(txn, comment, snapshot.comments);
        restore_rows!(txn, attachment, snapshot.attachments);

        Ok(())
    }
}
