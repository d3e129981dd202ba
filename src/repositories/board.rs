//! Board repository for database operations.

use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    QueryTrait,
};

use super::{CascadeStats, LabelRepository, ListRepository, MemberRepository};
use crate::entities::{board, board_member};
use crate::utils::datetime;

/// Repository for board-related database operations.
pub struct BoardRepository;

impl BoardRepository {
    /// Get a single board by id.
    pub async fn get_by_id<C>(conn: &C, id: i32) -> Result<Option<board::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(board::Entity::find_by_id(id).one(conn).await?)
    }

    /// Get the boards a user is a member of, starred first, then by title.
    pub async fn get_for_user<C>(conn: &C, user_id: i32) -> Result<Vec<board::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(board::Entity::find()
            .filter(
                board::Column::Id.in_subquery(
                    board_member::Entity::find()
                        .filter(board_member::Column::UserId.eq(user_id))
                        .select_only()
                        .column(board_member::Column::BoardId)
                        .into_query(),
                ),
            )
            .order_by_desc(board::Column::IsStarred)
            .order_by_asc(board::Column::Title)
            .order_by_asc(board::Column::Id)
            .all(conn)
            .await?)
    }

    /// Insert a new board.
    pub async fn create<C>(
        conn: &C,
        owner_id: i32,
        title: &str,
        description: Option<String>,
        background: &str,
    ) -> Result<board::Model>
    where
        C: ConnectionTrait,
    {
        let now = datetime::now_rfc3339();
        let model = board::ActiveModel {
            id: ActiveValue::NotSet,
            title: ActiveValue::Set(title.to_string()),
            description: ActiveValue::Set(description),
            background: ActiveValue::Set(background.to_string()),
            owner_id: ActiveValue::Set(owner_id),
            is_starred: ActiveValue::Set(false),
            created_at: ActiveValue::Set(now.clone()),
            updated_at: ActiveValue::Set(now),
        };
        Ok(model.insert(conn).await?)
    }

    /// Update a board, stamping `updated_at`.
    pub async fn update<C>(conn: &C, mut board: board::ActiveModel) -> Result<board::Model>
    where
        C: ConnectionTrait,
    {
        board.updated_at = ActiveValue::Set(datetime::now_rfc3339());
        Ok(board.update(conn).await?)
    }

    /// Delete a board with its lists, cards, labels and memberships.
    pub async fn delete_cascade<C>(conn: &C, board_id: i32) -> Result<CascadeStats>
    where
        C: ConnectionTrait,
    {
        let mut stats = CascadeStats::default();

        for list in ListRepository::get_for_board(conn, board_id).await? {
            stats.merge(ListRepository::delete_cascade(conn, list.id).await?);
        }

        for label in LabelRepository::get_for_board(conn, board_id).await? {
            stats.merge(LabelRepository::delete_cascade(conn, label.id).await?);
        }

        stats.members += MemberRepository::delete_for_board(conn, board_id).await?;

        board::Entity::delete_by_id(board_id).exec(conn).await?;
        Ok(stats)
    }
}
