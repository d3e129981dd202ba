//! Board membership repository for database operations.

use anyhow::Result;
use sea_orm::{ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::board_member;
use crate::utils::datetime;

/// Repository for board membership operations.
pub struct MemberRepository;

impl MemberRepository {
    /// Get the membership of a user on a board.
    pub async fn get<C>(conn: &C, board_id: i32, user_id: i32) -> Result<Option<board_member::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(board_member::Entity::find()
            .filter(board_member::Column::BoardId.eq(board_id))
            .filter(board_member::Column::UserId.eq(user_id))
            .one(conn)
            .await?)
    }

    /// Get all memberships of a board in join order.
    pub async fn get_for_board<C>(conn: &C, board_id: i32) -> Result<Vec<board_member::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(board_member::Entity::find()
            .filter(board_member::Column::BoardId.eq(board_id))
            .order_by_asc(board_member::Column::Id)
            .all(conn)
            .await?)
    }

    /// Insert a membership.
    pub async fn create<C>(conn: &C, board_id: i32, user_id: i32, role: &str) -> Result<board_member::Model>
    where
        C: ConnectionTrait,
    {
        let model = board_member::ActiveModel {
            id: ActiveValue::NotSet,
            board_id: ActiveValue::Set(board_id),
            user_id: ActiveValue::Set(user_id),
            role: ActiveValue::Set(role.to_string()),
            joined_at: ActiveValue::Set(datetime::now_rfc3339()),
        };
        Ok(model.insert(conn).await?)
    }

    /// Change the role of a membership.
    pub async fn update_role<C>(conn: &C, member: board_member::Model, role: &str) -> Result<board_member::Model>
    where
        C: ConnectionTrait,
    {
        let mut active_model: board_member::ActiveModel = member.into();
        active_model.role = ActiveValue::Set(role.to_string());
        Ok(active_model.update(conn).await?)
    }

    /// Delete one membership.
    pub async fn delete<C>(conn: &C, member_id: i32) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        let result = board_member::Entity::delete_by_id(member_id).exec(conn).await?;
        Ok(result.rows_affected)
    }

    /// Delete every membership of a board.
    pub async fn delete_for_board<C>(conn: &C, board_id: i32) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        let result = board_member::Entity::delete_many()
            .filter(board_member::Column::BoardId.eq(board_id))
            .exec(conn)
            .await?;
        Ok(result.rows_affected)
    }
}
