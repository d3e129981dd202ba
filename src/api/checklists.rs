//! Checklist items on cards.

use log::info;
use sea_orm::{ActiveValue, ConnectionTrait, IntoActiveModel, TransactionTrait};

use super::error::{ApiError, ApiResult};
use super::{validation, WorkShiftApi};
use crate::constants::CHECKLIST_ITEM_MAX_LEN;
use crate::entities::checklist_item;
use crate::ordering;
use crate::repositories::ChecklistRepository;

impl WorkShiftApi {
    /// Append an item to the checklist of a card.
    pub async fn add_checklist_item(&self, card_id: i32, content: &str) -> ApiResult<checklist_item::Model> {
        let session = self.require_session().await?;
        let content = validation::required_text("Checklist item", content, CHECKLIST_ITEM_MAX_LEN)?;

        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        Self::card_access(&txn, card_id, session.user.id).await?;
        let position = ChecklistRepository::get_for_card(&txn, card_id).await?.len() as i32;
        let item = ChecklistRepository::create(&txn, card_id, &content, position).await?;
        txn.commit().await?;

        info!("Added checklist item {} to card {}", item.id, card_id);
        Ok(item)
    }

    /// Change the text or the completion of an item.
    pub async fn update_checklist_item(
        &self,
        item_id: i32,
        content: Option<&str>,
        is_completed: Option<bool>,
    ) -> ApiResult<checklist_item::Model> {
        let session = self.require_session().await?;
        let content = content
            .map(|c| validation::required_text("Checklist item", c, CHECKLIST_ITEM_MAX_LEN))
            .transpose()?;

        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        let item = Self::checklist_item_access(&txn, item_id, session.user.id).await?;
        if content.is_none() && is_completed.is_none() {
            return Ok(item);
        }
        let mut active_model = item.into_active_model();
        if let Some(content) = content {
            active_model.content = ActiveValue::Set(content);
        }
        if let Some(is_completed) = is_completed {
            active_model.is_completed = ActiveValue::Set(is_completed);
        }

        let item = ChecklistRepository::update(&txn, active_model).await?;
        txn.commit().await?;

        info!("Updated checklist item {}", item.id);
        Ok(item)
    }

    /// Flip the completion of an item.
    pub async fn toggle_checklist_item(&self, item_id: i32) -> ApiResult<checklist_item::Model> {
        let session = self.require_session().await?;
        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        let item = Self::checklist_item_access(&txn, item_id, session.user.id).await?;
        let done = !item.is_completed;
        let mut active_model = item.into_active_model();
        active_model.is_completed = ActiveValue::Set(done);

        let item = ChecklistRepository::update(&txn, active_model).await?;
        txn.commit().await?;

        info!("Checklist item {} done: {}", item.id, item.is_completed);
        Ok(item)
    }

    /// Move an item within its checklist. Returns the checklist in its new order.
    pub async fn move_checklist_item(&self, item_id: i32, position: i32) -> ApiResult<Vec<checklist_item::Model>> {
        let session = self.require_session().await?;
        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        let item = Self::checklist_item_access(&txn, item_id, session.user.id).await?;
        let mut items = ChecklistRepository::get_for_card(&txn, item.card_id).await?;
        let from = items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| ApiError::not_found("Checklist item", item_id))?;

        ordering::move_within(&mut items, from, position);
        ChecklistRepository::renumber(&txn, &items).await?;
        txn.commit().await?;

        for (index, item) in items.iter_mut().enumerate() {
            item.position = index as i32;
        }
        info!("Moved checklist item {} on card {}", item_id, item.card_id);
        Ok(items)
    }

    /// Delete an item and close the gap it leaves.
    pub async fn delete_checklist_item(&self, item_id: i32) -> ApiResult<()> {
        let session = self.require_session().await?;
        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        let item = Self::checklist_item_access(&txn, item_id, session.user.id).await?;
        ChecklistRepository::delete(&txn, item_id).await?;
        let remaining = ChecklistRepository::get_for_card(&txn, item.card_id).await?;
        ChecklistRepository::renumber(&txn, &remaining).await?;
        txn.commit().await?;

        info!("Deleted checklist item {} from card {}", item_id, item.card_id);
        Ok(())
    }

    async fn checklist_item_access<C>(conn: &C, item_id: i32, user_id: i32) -> ApiResult<checklist_item::Model>
    where
        C: ConnectionTrait,
    {
        let item = ChecklistRepository::get_by_id(conn, item_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Checklist item", item_id))?;
        Self::card_access(conn, item.card_id, user_id).await?;
        Ok(item)
    }
}
