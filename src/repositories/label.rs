//! Label repository for database operations.

use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    QueryTrait,
};

use super::CascadeStats;
use crate::entities::{card_label, label};

/// Repository for label-related database operations.
pub struct LabelRepository;

impl LabelRepository {
    /// Get a single label by id.
    pub async fn get_by_id<C>(conn: &C, id: i32) -> Result<Option<label::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(label::Entity::find_by_id(id).one(conn).await?)
    }

    /// Get the labels of a board in creation order.
    pub async fn get_for_board<C>(conn: &C, board_id: i32) -> Result<Vec<label::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(label::Entity::find()
            .filter(label::Column::BoardId.eq(board_id))
            .order_by_asc(label::Column::Id)
            .all(conn)
            .await?)
    }

    /// Get the labels attached to a card.
    pub async fn get_for_card<C>(conn: &C, card_id: i32) -> Result<Vec<label::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(label::Entity::find()
            .filter(
                label::Column::Id.in_subquery(
                    card_label::Entity::find()
                        .filter(card_label::Column::CardId.eq(card_id))
                        .select_only()
                        .column(card_label::Column::LabelId)
                        .into_query(),
                ),
            )
            .order_by_asc(label::Column::Id)
            .all(conn)
            .await?)
    }

    /// Get the card-label links of a set of cards.
    pub async fn links_for_cards<C>(conn: &C, card_ids: &[i32]) -> Result<Vec<card_label::Model>>
    where
        C: ConnectionTrait,
    {
        if card_ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(card_label::Entity::find()
            .filter(card_label::Column::CardId.is_in(card_ids.iter().copied()))
            .order_by_asc(card_label::Column::CardId)
            .order_by_asc(card_label::Column::LabelId)
            .all(conn)
            .await?)
    }

    /// Insert a label.
    pub async fn create<C>(conn: &C, board_id: i32, name: &str, color: &str) -> Result<label::Model>
    where
        C: ConnectionTrait,
    {
        let model = label::ActiveModel {
            id: ActiveValue::NotSet,
            board_id: ActiveValue::Set(board_id),
            name: ActiveValue::Set(name.to_string()),
            color: ActiveValue::Set(color.to_string()),
        };
        Ok(model.insert(conn).await?)
    }

    /// Update a label in the database.
    pub async fn update<C>(conn: &C, label: label::ActiveModel) -> Result<label::Model>
    where
        C: ConnectionTrait,
    {
        Ok(label.update(conn).await?)
    }

    /// Link a label to a card. Returns false if the link already existed.
    pub async fn attach<C>(conn: &C, card_id: i32, label_id: i32) -> Result<bool>
    where
        C: ConnectionTrait,
    {
        let existing = card_label::Entity::find_by_id((card_id, label_id)).one(conn).await?;
        if existing.is_some() {
            return Ok(false);
        }

        card_label::Entity::insert(card_label::ActiveModel {
            card_id: ActiveValue::Set(card_id),
            label_id: ActiveValue::Set(label_id),
        })
        .exec_without_returning(conn)
        .await?;
        Ok(true)
    }

    /// Unlink a label from a card. Returns false if there was no link.
    pub async fn detach<C>(conn: &C, card_id: i32, label_id: i32) -> Result<bool>
    where
        C: ConnectionTrait,
    {
        let result = card_label::Entity::delete_by_id((card_id, label_id)).exec(conn).await?;
        Ok(result.rows_affected > 0)
    }

    /// Delete a label and its card links.
    pub async fn delete_cascade<C>(conn: &C, label_id: i32) -> Result<CascadeStats>
    where
        C: ConnectionTrait,
    {
        let card_labels = card_label::Entity::delete_many()
            .filter(card_label::Column::LabelId.eq(label_id))
            .exec(conn)
            .await?
            .rows_affected;
        let labels = label::Entity::delete_by_id(label_id).exec(conn).await?.rows_affected;

        Ok(CascadeStats {
            card_labels,
            labels,
            ..Default::default()
        })
    }
}
