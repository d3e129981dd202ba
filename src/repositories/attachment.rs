//! Attachment repository for database operations.

use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::entities::attachment;
use crate::utils::datetime;

/// Fields of a new attachment.
pub struct NewAttachment<'a> {
    pub card_id: i32,
    pub file_name: &'a str,
    pub mime_type: &'a str,
    pub file_size: i64,
    pub file_data: String,
    pub uploaded_by: i32,
}

/// Repository for attachment-related database operations.
pub struct AttachmentRepository;

impl AttachmentRepository {
    /// Get a single attachment by id, including its data.
    pub async fn get_by_id<C>(conn: &C, id: i32) -> Result<Option<attachment::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(attachment::Entity::find_by_id(id).one(conn).await?)
    }

    /// Get the attachments of a card, oldest first.
    pub async fn get_for_card<C>(conn: &C, card_id: i32) -> Result<Vec<attachment::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(attachment::Entity::find()
            .filter(attachment::Column::CardId.eq(card_id))
            .order_by_asc(attachment::Column::Id)
            .all(conn)
            .await?)
    }

    /// Card id of every attachment on the given cards, without loading file data.
    pub async fn card_ids_for_cards<C>(conn: &C, card_ids: &[i32]) -> Result<Vec<i32>>
    where
        C: ConnectionTrait,
    {
        if card_ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(attachment::Entity::find()
            .select_only()
            .column(attachment::Column::CardId)
            .filter(attachment::Column::CardId.is_in(card_ids.iter().copied()))
            .into_tuple::<i32>()
            .all(conn)
            .await?)
    }

    /// Insert an attachment.
    pub async fn create<C>(conn: &C, new: NewAttachment<'_>) -> Result<attachment::Model>
    where
        C: ConnectionTrait,
    {
        let model = attachment::ActiveModel {
            id: ActiveValue::NotSet,
            card_id: ActiveValue::Set(new.card_id),
            file_name: ActiveValue::Set(new.file_name.to_string()),
            mime_type: ActiveValue::Set(new.mime_type.to_string()),
            file_size: ActiveValue::Set(new.file_size),
            file_data: ActiveValue::Set(new.file_data),
            uploaded_by: ActiveValue::Set(new.uploaded_by),
            created_at: ActiveValue::Set(datetime::now_rfc3339()),
        };
        Ok(model.insert(conn).await?)
    }

    /// Delete an attachment.
    pub async fn delete<C>(conn: &C, attachment_id: i32) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(attachment::Entity::delete_by_id(attachment_id).exec(conn).await?.rows_affected)
    }
}
