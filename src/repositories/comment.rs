//! Comment repository for database operations.

use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::entities::comment;
use crate::utils::datetime;

/// Repository for comment-related database operations.
pub struct CommentRepository;

impl CommentRepository {
    /// Get a single comment by id.
    pub async fn get_by_id<C>(conn: &C, id: i32) -> Result<Option<comment::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(comment::Entity::find_by_id(id).one(conn).await?)
    }

    /// Get the comments of a card, oldest first.
    pub async fn get_for_card<C>(conn: &C, card_id: i32) -> Result<Vec<comment::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(comment::Entity::find()
            .filter(comment::Column::CardId.eq(card_id))
            .order_by_asc(comment::Column::CreatedAt)
            .order_by_asc(comment::Column::Id)
            .all(conn)
            .await?)
    }

    /// Card id of every comment on the given cards, one entry per comment.
    pub async fn card_ids_for_cards<C>(conn: &C, card_ids: &[i32]) -> Result<Vec<i32>>
    where
        C: ConnectionTrait,
    {
        if card_ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(comment::Entity::find()
            .select_only()
            .column(comment::Column::CardId)
            .filter(comment::Column::CardId.is_in(card_ids.iter().copied()))
            .into_tuple::<i32>()
            .all(conn)
            .await?)
    }

    /// Insert a comment.
    pub async fn create<C>(conn: &C, card_id: i32, user_id: i32, content: &str) -> Result<comment::Model>
    where
        C: ConnectionTrait,
    {
        let model = comment::ActiveModel {
            id: ActiveValue::NotSet,
            card_id: ActiveValue::Set(card_id),
            user_id: ActiveValue::Set(user_id),
            content: ActiveValue::Set(content.to_string()),
            created_at: ActiveValue::Set(datetime::now_rfc3339()),
            updated_at: ActiveValue::Set(None),
        };
        Ok(model.insert(conn).await?)
    }

    /// Replace the text of a comment, stamping `updated_at`.
    pub async fn edit<C>(conn: &C, comment: comment::Model, content: &str) -> Result<comment::Model>
    where
        C: ConnectionTrait,
    {
        let mut active_model: comment::ActiveModel = comment.into();
        active_model.content = ActiveValue::Set(content.to_string());
        active_model.updated_at = ActiveValue::Set(Some(datetime::now_rfc3339()));
        Ok(active_model.update(conn).await?)
    }

    /// Delete a comment.
    pub async fn delete<C>(conn: &C, comment_id: i32) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(comment::Entity::delete_by_id(comment_id).exec(conn).await?.rows_affected)
    }
}
