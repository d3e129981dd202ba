//! Comments on cards.

use log::{info, warn};
use sea_orm::{ConnectionTrait, TransactionTrait};
use std::collections::HashMap;

use super::error::{ApiError, ApiResult};
use super::types::CommentView;
use super::{validation, WorkShiftApi};
use crate::constants::COMMENT_MAX_LEN;
use crate::entities::comment;
use crate::repositories::{CommentRepository, UserRepository};

impl WorkShiftApi {
    pub async fn add_comment(&self, card_id: i32, content: &str) -> ApiResult<CommentView> {
        let session = self.require_session().await?;
        let content = validation::required_text("Comment", content, COMMENT_MAX_LEN)?;

        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        Self::card_access(&txn, card_id, session.user.id).await?;
        let comment = CommentRepository::create(&txn, card_id, session.user.id, &content).await?;
        txn.commit().await?;

        info!("'{}' commented on card {}", session.user.username, card_id);
        Ok(CommentView {
            comment,
            author: session.user.display_name,
        })
    }

    /// Replace the text of a comment. Only its author may edit it.
    pub async fn edit_comment(&self, comment_id: i32, content: &str) -> ApiResult<CommentView> {
        let session = self.require_session().await?;
        let content = validation::required_text("Comment", content, COMMENT_MAX_LEN)?;

        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        let (comment, _) = Self::comment_access(&txn, comment_id, session.user.id).await?;
        if comment.user_id != session.user.id {
            warn!("'{}' tried to edit comment {}", session.user.username, comment_id);
            return Err(ApiError::forbidden("only the author can edit a comment"));
        }

        let comment = CommentRepository::edit(&txn, comment, &content).await?;
        txn.commit().await?;

        info!("Edited comment {}", comment.id);
        Ok(CommentView {
            comment,
            author: session.user.display_name,
        })
    }

    /// Delete a comment. Its author and the board's owners and admins may.
    pub async fn delete_comment(&self, comment_id: i32) -> ApiResult<()> {
        let session = self.require_session().await?;
        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        let (comment, can_manage) = Self::comment_access(&txn, comment_id, session.user.id).await?;
        if comment.user_id != session.user.id && !can_manage {
            warn!("'{}' tried to delete comment {}", session.user.username, comment_id);
            return Err(ApiError::forbidden("only the author or a board admin can delete a comment"));
        }

        CommentRepository::delete(&txn, comment_id).await?;
        txn.commit().await?;

        info!("Deleted comment {} from card {}", comment_id, comment.card_id);
        Ok(())
    }

    /// Comments of a card, oldest first.
    pub async fn list_comments(&self, card_id: i32) -> ApiResult<Vec<CommentView>> {
        let session = self.require_session().await?;
        let storage = self.storage.lock().await;
        let conn = &storage.conn;

        Self::card_access(conn, card_id, session.user.id).await?;
        let comments = CommentRepository::get_for_card(conn, card_id).await?;
        Self::comment_views(conn, comments).await
    }

    /// Attach author display names to comments.
    pub(crate) async fn comment_views<C>(conn: &C, comments: Vec<comment::Model>) -> ApiResult<Vec<CommentView>>
    where
        C: ConnectionTrait,
    {
        let author_ids: Vec<i32> = comments.iter().map(|c| c.user_id).collect();
        let authors: HashMap<i32, String> = UserRepository::get_many(conn, &author_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u.display_name))
            .collect();

        Ok(comments
            .into_iter()
            .map(|comment| CommentView {
                author: authors.get(&comment.user_id).cloned().unwrap_or_default(),
                comment,
            })
            .collect())
    }

    /// A comment, and whether the user manages its board.
    async fn comment_access<C>(conn: &C, comment_id: i32, user_id: i32) -> ApiResult<(comment::Model, bool)>
    where
        C: ConnectionTrait,
    {
        let comment = CommentRepository::get_by_id(conn, comment_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Comment", comment_id))?;
        let (_, _, access) = Self::card_access(conn, comment.card_id, user_id).await?;
        Ok((comment, access.role.can_manage()))
    }
}
