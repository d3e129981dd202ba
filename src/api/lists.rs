//! List operations.

use log::info;
use sea_orm::TransactionTrait;

use super::error::{ApiError, ApiResult};
use super::{validation, WorkShiftApi};
use crate::constants::LIST_TITLE_MAX_LEN;
use crate::entities::list;
use crate::ordering;
use crate::repositories::{CascadeStats, ListRepository};

impl WorkShiftApi {
    /// Append a list at the end of a board.
    pub async fn create_list(&self, board_id: i32, title: &str) -> ApiResult<list::Model> {
        let session = self.require_session().await?;
        let title = validation::required_text("List title", title, LIST_TITLE_MAX_LEN)?;

        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        Self::board_access(&txn, board_id, session.user.id).await?;
        let position = ListRepository::count_for_board(&txn, board_id).await? as i32;
        let list = ListRepository::create(&txn, board_id, &title, position).await?;
        txn.commit().await?;

        info!("Created list '{}' ({}) on board {}", list.title, list.id, board_id);
        Ok(list)
    }

    pub async fn rename_list(&self, list_id: i32, title: &str) -> ApiResult<list::Model> {
        let session = self.require_session().await?;
        let title = validation::required_text("List title", title, LIST_TITLE_MAX_LEN)?;

        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        let (list, _) = Self::list_access(&txn, list_id, session.user.id).await?;
        let list = ListRepository::rename(&txn, list, &title).await?;
        txn.commit().await?;

        info!("Renamed list {} to '{}'", list.id, list.title);
        Ok(list)
    }

    /// Move a list to `position` on its board. Out of range positions clamp.
    ///
    /// Returns the lists of the board in their new order.
    pub async fn move_list(&self, list_id: i32, position: i32) -> ApiResult<Vec<list::Model>> {
        let session = self.require_session().await?;
        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        let (list, _) = Self::list_access(&txn, list_id, session.user.id).await?;
        let mut lists = ListRepository::get_for_board(&txn, list.board_id).await?;
        let from = lists
            .iter()
            .position(|l| l.id == list_id)
            .ok_or_else(|| ApiError::not_found("List", list_id))?;

        let landed = ordering::move_within(&mut lists, from, position).unwrap_or(from);
        ListRepository::renumber(&txn, &lists).await?;
        txn.commit().await?;

        for (index, list) in lists.iter_mut().enumerate() {
            list.position = index as i32;
        }
        info!("Moved list {} to position {}", list_id, landed);
        Ok(lists)
    }

    /// Delete a list with its cards and close the gap it leaves.
    pub async fn delete_list(&self, list_id: i32) -> ApiResult<CascadeStats> {
        let session = self.require_session().await?;
        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        let (list, _) = Self::list_access(&txn, list_id, session.user.id).await?;
        let stats = ListRepository::delete_cascade(&txn, list_id).await?;
        let remaining = ListRepository::get_for_board(&txn, list.board_id).await?;
        ListRepository::renumber(&txn, &remaining).await?;
        txn.commit().await?;

        info!("Deleted list {} ({} cards)", list_id, stats.cards);
        Ok(stats)
    }
}
