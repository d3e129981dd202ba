//! Labels and card labelling.

use log::{debug, info};
use sea_orm::{ActiveValue, ConnectionTrait, IntoActiveModel, TransactionTrait};

use super::error::{ApiError, ApiResult};
use super::WorkShiftApi;
use crate::constants::LABEL_NAME_MAX_LEN;
use crate::entities::label;
use crate::repositories::{CascadeStats, LabelRepository};
use crate::utils::color;

/// Label names may be empty: a label can be just a color.
fn label_name(name: &str) -> ApiResult<String> {
    let name = name.trim();
    if name.chars().count() > LABEL_NAME_MAX_LEN {
        return Err(ApiError::validation(format!(
            "Label name cannot exceed {} characters",
            LABEL_NAME_MAX_LEN
        )));
    }
    Ok(name.to_string())
}

fn label_color(value: &str) -> ApiResult<String> {
    color::resolve_label_color(value).ok_or_else(|| {
        ApiError::validation(format!(
            "Label color '{}' is neither a palette name nor a #rrggbb color",
            value.trim()
        ))
    })
}

impl WorkShiftApi {
    /// Create a label on a board. Owners and admins only.
    ///
    /// `color` is a palette name (`"green"`) or a hex color, stored as lowercase `#rrggbb`.
    pub async fn create_label(&self, board_id: i32, name: &str, color: &str) -> ApiResult<label::Model> {
        let session = self.require_session().await?;
        let name = label_name(name)?;
        let color = label_color(color)?;

        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        Self::manager_access(&txn, board_id, session.user.id).await?;
        let label = LabelRepository::create(&txn, board_id, &name, &color).await?;
        txn.commit().await?;

        info!("Created label {} ({}) on board {}", label.id, label.color, board_id);
        Ok(label)
    }

    /// Rename or recolor a label. Owners and admins only.
    pub async fn update_label(&self, label_id: i32, name: Option<&str>, color: Option<&str>) -> ApiResult<label::Model> {
        let session = self.require_session().await?;
        let name = name.map(label_name).transpose()?;
        let color = color.map(label_color).transpose()?;

        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        let label = Self::label_for_manager(&txn, label_id, session.user.id).await?;
        if name.is_none() && color.is_none() {
            return Ok(label);
        }
        let mut active_model = label.into_active_model();
        if let Some(name) = name {
            active_model.name = ActiveValue::Set(name);
        }
        if let Some(color) = color {
            active_model.color = ActiveValue::Set(color);
        }

        let label = LabelRepository::update(&txn, active_model).await?;
        txn.commit().await?;

        info!("Updated label {}", label.id);
        Ok(label)
    }

    /// Delete a label and remove it from every card. Owners and admins only.
    pub async fn delete_label(&self, label_id: i32) -> ApiResult<CascadeStats> {
        let session = self.require_session().await?;
        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        Self::label_for_manager(&txn, label_id, session.user.id).await?;
        let stats = LabelRepository::delete_cascade(&txn, label_id).await?;
        txn.commit().await?;

        info!("Deleted label {} ({} card links)", label_id, stats.card_labels);
        Ok(stats)
    }

    pub async fn list_labels(&self, board_id: i32) -> ApiResult<Vec<label::Model>> {
        let session = self.require_session().await?;
        let storage = self.storage.lock().await;
        Self::board_access(&storage.conn, board_id, session.user.id).await?;
        Ok(LabelRepository::get_for_board(&storage.conn, board_id).await?)
    }

    /// Put a label on a card. Adding a label twice is a no-op.
    ///
    /// Returns false when the card already carried the label.
    pub async fn add_label_to_card(&self, card_id: i32, label_id: i32) -> ApiResult<bool> {
        let session = self.require_session().await?;
        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        let (_, list, _) = Self::card_access(&txn, card_id, session.user.id).await?;
        let label = LabelRepository::get_by_id(&txn, label_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Label", label_id))?;
        if label.board_id != list.board_id {
            return Err(ApiError::validation("the label belongs to another board"));
        }

        let added = LabelRepository::attach(&txn, card_id, label_id).await?;
        txn.commit().await?;

        if added {
            info!("Labelled card {} with label {}", card_id, label_id);
        } else {
            debug!("Card {} already has label {}", card_id, label_id);
        }
        Ok(added)
    }

    /// Take a label off a card. Returns false when the card did not carry it.
    pub async fn remove_label_from_card(&self, card_id: i32, label_id: i32) -> ApiResult<bool> {
        let session = self.require_session().await?;
        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        Self::card_access(&txn, card_id, session.user.id).await?;
        let removed = LabelRepository::detach(&txn, card_id, label_id).await?;
        txn.commit().await?;

        if removed {
            info!("Removed label {} from card {}", label_id, card_id);
        }
        Ok(removed)
    }

    async fn label_for_manager<C>(conn: &C, label_id: i32, user_id: i32) -> ApiResult<label::Model>
    where
        C: ConnectionTrait,
    {
        let label = LabelRepository::get_by_id(conn, label_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Label", label_id))?;
        Self::manager_access(conn, label.board_id, user_id).await?;
        Ok(label)
    }
}
