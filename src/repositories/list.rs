//! List repository for database operations.

use anyhow::Result;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use super::{CardRepository, CascadeStats};
use crate::entities::list;
use crate::ordering;
use crate::utils::datetime;

/// Repository for list-related database operations.
pub struct ListRepository;

impl ListRepository {
    /// Get a single list by id.
    pub async fn get_by_id<C>(conn: &C, id: i32) -> Result<Option<list::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(list::Entity::find_by_id(id).one(conn).await?)
    }

    /// Get the lists of a board ordered by position.
    pub async fn get_for_board<C>(conn: &C, board_id: i32) -> Result<Vec<list::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(list::Entity::find()
            .filter(list::Column::BoardId.eq(board_id))
            .order_by_asc(list::Column::Position)
            .order_by_asc(list::Column::Id)
            .all(conn)
            .await?)
    }

    /// Number of lists on a board.
    pub async fn count_for_board<C>(conn: &C, board_id: i32) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(list::Entity::find()
            .filter(list::Column::BoardId.eq(board_id))
            .count(conn)
            .await?)
    }

    /// Insert a list at `position`. Callers renumber siblings.
    pub async fn create<C>(conn: &C, board_id: i32, title: &str, position: i32) -> Result<list::Model>
    where
        C: ConnectionTrait,
    {
        let model = list::ActiveModel {
            id: ActiveValue::NotSet,
            board_id: ActiveValue::Set(board_id),
            title: ActiveValue::Set(title.to_string()),
            position: ActiveValue::Set(position),
            created_at: ActiveValue::Set(datetime::now_rfc3339()),
        };
        Ok(model.insert(conn).await?)
    }

    /// Rename a list.
    pub async fn rename<C>(conn: &C, list: list::Model, title: &str) -> Result<list::Model>
    where
        C: ConnectionTrait,
    {
        let mut active_model: list::ActiveModel = list.into();
        active_model.title = ActiveValue::Set(title.to_string());
        Ok(active_model.update(conn).await?)
    }

    /// Write positions `0..n` following the order of `lists`.
    pub async fn renumber<C>(conn: &C, lists: &[list::Model]) -> Result<()>
    where
        C: ConnectionTrait,
    {
        let changes = ordering::position_changes(lists.iter().map(|l| (l.id, l.position)));
        for (id, position) in changes {
            list::Entity::update_many()
                .col_expr(list::Column::Position, Expr::value(position))
                .filter(list::Column::Id.eq(id))
                .exec(conn)
                .await?;
        }
        Ok(())
    }

    /// Delete a list with all of its cards.
    pub async fn delete_cascade<C>(conn: &C, list_id: i32) -> Result<CascadeStats>
    where
        C: ConnectionTrait,
    {
        let mut stats = CascadeStats::default();

        for card in CardRepository::get_for_list(conn, list_id).await? {
            stats.merge(CardRepository::delete_cascade(conn, card.id).await?);
        }

        stats.lists += list::Entity::delete_by_id(list_id).exec(conn).await?.rows_affected;
        Ok(stats)
    }
}
