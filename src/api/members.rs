//! Board membership.

use log::{info, warn};
use sea_orm::TransactionTrait;

use super::error::{ApiError, ApiResult};
use super::types::{BoardRole, MemberInfo};
use super::WorkShiftApi;
use crate::entities::board_member;
use crate::repositories::{MemberRepository, UserRepository};

impl WorkShiftApi {
    /// Add a user to a board by username. Owners and admins only.
    ///
    /// A board has exactly one owner, so `role` must be member or admin.
    pub async fn add_member(&self, board_id: i32, username: &str, role: BoardRole) -> ApiResult<board_member::Model> {
        let session = self.require_session().await?;
        if role == BoardRole::Owner {
            return Err(ApiError::validation("a board has exactly one owner"));
        }

        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        Self::manager_access(&txn, board_id, session.user.id).await?;
        let user = UserRepository::get_by_username(&txn, username.trim())
            .await?
            .ok_or_else(|| ApiError::not_found("User", username.trim()))?;

        if MemberRepository::get(&txn, board_id, user.id).await?.is_some() {
            return Err(ApiError::conflict(format!(
                "'{}' is already a member of board {}",
                user.username, board_id
            )));
        }

        let member = MemberRepository::create(&txn, board_id, user.id, role.as_str()).await?;
        txn.commit().await?;

        info!("Added '{}' to board {} as {}", user.username, board_id, role);
        Ok(member)
    }

    /// Change a member's role. Owners and admins only; the owner keeps their role.
    pub async fn update_member_role(
        &self,
        board_id: i32,
        user_id: i32,
        role: BoardRole,
    ) -> ApiResult<board_member::Model> {
        let session = self.require_session().await?;
        if role == BoardRole::Owner {
            return Err(ApiError::validation("a board has exactly one owner"));
        }

        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        let access = Self::manager_access(&txn, board_id, session.user.id).await?;
        let member = MemberRepository::get(&txn, board_id, user_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Member", user_id))?;

        if member.user_id == access.board.owner_id {
            warn!("Refused to change the role of the owner of board {}", board_id);
            return Err(ApiError::forbidden("the board owner cannot be demoted"));
        }

        let member = MemberRepository::update_role(&txn, member, role.as_str()).await?;
        txn.commit().await?;

        info!("User {} is now {} on board {}", user_id, role, board_id);
        Ok(member)
    }

    /// Remove a user from a board.
    ///
    /// Owners and admins may remove anyone but the owner; members may leave.
    pub async fn remove_member(&self, board_id: i32, user_id: i32) -> ApiResult<()> {
        let session = self.require_session().await?;
        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        let access = Self::board_access(&txn, board_id, session.user.id).await?;
        if user_id != session.user.id && !access.role.can_manage() {
            return Err(ApiError::forbidden("only owners and admins can remove other members"));
        }
        if user_id == access.board.owner_id {
            warn!("Refused to remove the owner of board {}", board_id);
            return Err(ApiError::forbidden("the board owner cannot be removed"));
        }

        let member = MemberRepository::get(&txn, board_id, user_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Member", user_id))?;
        MemberRepository::delete(&txn, member.id).await?;
        txn.commit().await?;

        info!("Removed user {} from board {}", user_id, board_id);
        Ok(())
    }

    /// Members of a board, highest role first.
    pub async fn list_members(&self, board_id: i32) -> ApiResult<Vec<MemberInfo>> {
        let session = self.require_session().await?;
        let storage = self.storage.lock().await;
        Self::board_access(&storage.conn, board_id, session.user.id).await?;
        Self::member_infos(&storage.conn, board_id).await
    }
}
