//! Card operations.

use chrono::Duration;
use log::{debug, info};
use sea_orm::{ActiveValue, IntoActiveModel, TransactionTrait};

use super::error::{ApiError, ApiResult};
use super::types::{AttachmentInfo, CardDetail, CardUpdate, DueCards};
use super::{validation, WorkShiftApi};
use crate::constants::{CARD_TITLE_MAX_LEN, DESCRIPTION_MAX_LEN};
use crate::entities::card;
use crate::ordering;
use crate::repositories::{
    AttachmentRepository, CardRepository, CascadeStats, ChecklistRepository, CommentRepository, LabelRepository,
    ListRepository,
};
use crate::utils::datetime;

const MAX_DUE_WINDOW_DAYS: i64 = 3650;

impl WorkShiftApi {
    /// Append a card at the end of a list.
    pub async fn create_card(&self, list_id: i32, title: &str) -> ApiResult<card::Model> {
        let session = self.require_session().await?;
        let title = validation::required_text("Card title", title, CARD_TITLE_MAX_LEN)?;

        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        Self::list_access(&txn, list_id, session.user.id).await?;
        let position = CardRepository::count_for_list(&txn, list_id).await? as i32;
        let card = CardRepository::create(&txn, list_id, &title, position, Some(session.user.id)).await?;
        txn.commit().await?;

        info!("Created card '{}' ({}) in list {}", card.title, card.id, list_id);
        Ok(card)
    }

    /// A card with its labels, checklist, comments and attachment metadata.
    pub async fn get_card(&self, card_id: i32) -> ApiResult<CardDetail> {
        let session = self.require_session().await?;
        let storage = self.storage.lock().await;
        let conn = &storage.conn;

        let (card, list, access) = Self::card_access(conn, card_id, session.user.id).await?;

        let labels = LabelRepository::get_for_card(conn, card_id).await?;
        let checklist = ChecklistRepository::get_for_card(conn, card_id).await?;
        let attachments = AttachmentRepository::get_for_card(conn, card_id)
            .await?
            .into_iter()
            .map(AttachmentInfo::from)
            .collect();

        let comments = CommentRepository::get_for_card(conn, card_id).await?;
        let comments = Self::comment_views(conn, comments).await?;

        let due_status = datetime::due_status(
            card.due_date.as_deref(),
            card.is_completed,
            datetime::today(),
            self.config.boards.due_soon_days,
        );

        debug!("Loaded card {}", card_id);
        Ok(CardDetail {
            card,
            board_id: access.board.id,
            list_title: list.title,
            labels,
            checklist,
            comments,
            attachments,
            due_status,
        })
    }

    /// Change title, description, due date or completion of a card.
    pub async fn update_card(&self, card_id: i32, update: CardUpdate) -> ApiResult<card::Model> {
        let session = self.require_session().await?;

        let title = update
            .title
            .as_deref()
            .map(|t| validation::required_text("Card title", t, CARD_TITLE_MAX_LEN))
            .transpose()?;
        let description = update
            .description
            .as_ref()
            .map(|d| validation::optional_text("Description", d.as_deref(), DESCRIPTION_MAX_LEN))
            .transpose()?;
        let due_date = update
            .due_date
            .as_ref()
            .map(|d| validation::due_date(d.as_deref()))
            .transpose()?;

        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        let (card, _, _) = Self::card_access(&txn, card_id, session.user.id).await?;
        if title.is_none() && description.is_none() && due_date.is_none() && update.is_completed.is_none() {
            return Ok(card);
        }
        let mut active_model = card.into_active_model();
        if let Some(title) = title {
            active_model.title = ActiveValue::Set(title);
        }
        if let Some(description) = description {
            active_model.description = ActiveValue::Set(description);
        }
        if let Some(due_date) = due_date {
            active_model.due_date = ActiveValue::Set(due_date);
        }
        if let Some(is_completed) = update.is_completed {
            active_model.is_completed = ActiveValue::Set(is_completed);
        }

        let card = CardRepository::update(&txn, active_model).await?;
        txn.commit().await?;

        info!("Updated card {}", card.id);
        Ok(card)
    }

    /// Move a card to `position` in a list of the same board.
    ///
    /// Out of range positions clamp to the ends. Both the source and the
    /// target list are renumbered.
    pub async fn move_card(&self, card_id: i32, target_list_id: i32, position: i32) -> ApiResult<card::Model> {
        let session = self.require_session().await?;
        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        let (card, source, _) = Self::card_access(&txn, card_id, session.user.id).await?;
        let target = ListRepository::get_by_id(&txn, target_list_id)
            .await?
            .ok_or_else(|| ApiError::not_found("List", target_list_id))?;
        if target.board_id != source.board_id {
            return Err(ApiError::validation("cards can only move between lists of the same board"));
        }

        let landed = if source.id == target.id {
            let mut cards = CardRepository::get_for_list(&txn, source.id).await?;
            let from = cards
                .iter()
                .position(|c| c.id == card_id)
                .ok_or_else(|| ApiError::not_found("Card", card_id))?;
            let landed = ordering::move_within(&mut cards, from, position).unwrap_or(from);
            CardRepository::renumber(&txn, source.id, &cards).await?;
            landed
        } else {
            let mut remaining = CardRepository::get_for_list(&txn, source.id).await?;
            remaining.retain(|c| c.id != card_id);
            CardRepository::renumber(&txn, source.id, &remaining).await?;

            let mut cards = CardRepository::get_for_list(&txn, target.id).await?;
            let landed = ordering::insert_at(&mut cards, card, position);
            CardRepository::renumber(&txn, target.id, &cards).await?;
            landed
        };

        let card = CardRepository::get_by_id(&txn, card_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Card", card_id))?;
        txn.commit().await?;

        info!("Moved card {} to list {} at position {}", card_id, target.id, landed);
        Ok(card)
    }

    /// Delete a card with everything hanging off it and close the gap it leaves.
    pub async fn delete_card(&self, card_id: i32) -> ApiResult<CascadeStats> {
        let session = self.require_session().await?;
        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        let (card, _, _) = Self::card_access(&txn, card_id, session.user.id).await?;
        let stats = CardRepository::delete_cascade(&txn, card_id).await?;
        let remaining = CardRepository::get_for_list(&txn, card.list_id).await?;
        CardRepository::renumber(&txn, card.list_id, &remaining).await?;
        txn.commit().await?;

        info!("Deleted card {} from list {}", card_id, card.list_id);
        Ok(stats)
    }

    /// Cards of a board whose title or description contains `query`, ignoring ASCII case.
    pub async fn search_cards(&self, board_id: i32, query: &str) -> ApiResult<Vec<card::Model>> {
        let session = self.require_session().await?;
        let query = query.trim();
        if query.is_empty() {
            return Err(ApiError::validation("search query cannot be empty"));
        }

        let storage = self.storage.lock().await;
        Self::board_access(&storage.conn, board_id, session.user.id).await?;
        let cards = CardRepository::search(&storage.conn, board_id, query).await?;

        debug!("Search '{}' on board {} matched {} cards", query, board_id, cards.len());
        Ok(cards)
    }

    /// Open cards that are overdue, and those due within `days` from today.
    pub async fn due_cards(&self, board_id: i32, days: i64) -> ApiResult<DueCards> {
        let session = self.require_session().await?;
        if !(0..=MAX_DUE_WINDOW_DAYS).contains(&days) {
            return Err(ApiError::validation(format!(
                "days must be between 0 and {}",
                MAX_DUE_WINDOW_DAYS
            )));
        }

        let today = datetime::today();
        let from = datetime::format_ymd(today);
        let to = datetime::format_ymd(today + Duration::days(days));

        let storage = self.storage.lock().await;
        let conn = &storage.conn;
        Self::board_access(conn, board_id, session.user.id).await?;

        Ok(DueCards {
            overdue: CardRepository::get_overdue(conn, board_id, &from).await?,
            due_soon: CardRepository::get_due_between(conn, board_id, &from, &to).await?,
        })
    }

    /// Cards carrying a label.
    pub async fn cards_with_label(&self, label_id: i32) -> ApiResult<Vec<card::Model>> {
        let session = self.require_session().await?;
        let storage = self.storage.lock().await;
        let conn = &storage.conn;

        let label = LabelRepository::get_by_id(conn, label_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Label", label_id))?;
        Self::board_access(conn, label.board_id, session.user.id).await?;

        Ok(CardRepository::get_with_label(conn, label_id).await?)
    }
}
