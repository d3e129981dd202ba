//! Checklist item repository for database operations.

use anyhow::Result;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::checklist_item;
use crate::ordering;

/// Repository for checklist item operations.
pub struct ChecklistRepository;

impl ChecklistRepository {
    /// Get a single checklist item by id.
    pub async fn get_by_id<C>(conn: &C, id: i32) -> Result<Option<checklist_item::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(checklist_item::Entity::find_by_id(id).one(conn).await?)
    }

    /// Get the checklist of a card ordered by position.
    pub async fn get_for_card<C>(conn: &C, card_id: i32) -> Result<Vec<checklist_item::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(checklist_item::Entity::find()
            .filter(checklist_item::Column::CardId.eq(card_id))
            .order_by_asc(checklist_item::Column::Position)
            .order_by_asc(checklist_item::Column::Id)
            .all(conn)
            .await?)
    }

    /// Get the checklist items of a set of cards.
    pub async fn get_for_cards<C>(conn: &C, card_ids: &[i32]) -> Result<Vec<checklist_item::Model>>
    where
        C: ConnectionTrait,
    {
        if card_ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(checklist_item::Entity::find()
            .filter(checklist_item::Column::CardId.is_in(card_ids.iter().copied()))
            .order_by_asc(checklist_item::Column::CardId)
            .order_by_asc(checklist_item::Column::Position)
            .all(conn)
            .await?)
    }

    /// Insert a checklist item at `position`.
    pub async fn create<C>(conn: &C, card_id: i32, content: &str, position: i32) -> Result<checklist_item::Model>
    where
        C: ConnectionTrait,
    {
        let model = checklist_item::ActiveModel {
            id: ActiveValue::NotSet,
            card_id: ActiveValue::Set(card_id),
            content: ActiveValue::Set(content.to_string()),
            is_completed: ActiveValue::Set(false),
            position: ActiveValue::Set(position),
        };
        Ok(model.insert(conn).await?)
    }

    /// Update a checklist item in the database.
    pub async fn update<C>(conn: &C, item: checklist_item::ActiveModel) -> Result<checklist_item::Model>
    where
        C: ConnectionTrait,
    {
        Ok(item.update(conn).await?)
    }

    /// Write positions `0..n` following the order of `items`.
    pub async fn renumber<C>(conn: &C, items: &[checklist_item::Model]) -> Result<()>
    where
        C: ConnectionTrait,
    {
        let changes = ordering::position_changes(items.iter().map(|i| (i.id, i.position)));
        for (id, position) in changes {
            checklist_item::Entity::update_many()
                .col_expr(checklist_item::Column::Position, Expr::value(position))
                .filter(checklist_item::Column::Id.eq(id))
                .exec(conn)
                .await?;
        }
        Ok(())
    }

    /// Delete a checklist item.
    pub async fn delete<C>(conn: &C, item_id: i32) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(checklist_item::Entity::delete_by_id(item_id).exec(conn).await?.rows_affected)
    }
}
