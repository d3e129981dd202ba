//! Board operations.

use log::{debug, info, warn};
use sea_orm::{ActiveValue, ConnectionTrait, IntoActiveModel, TransactionTrait};
use std::collections::HashMap;

use super::error::{ApiError, ApiResult};
use super::types::{BoardRole, BoardUpdate, BoardView, CardSummary, ListView, MemberInfo};
use super::{validation, WorkShiftApi};
use crate::constants::{BOARD_TITLE_MAX_LEN, DESCRIPTION_MAX_LEN};
use crate::entities::board;
use crate::repositories::{
    AttachmentRepository, BoardRepository, CardRepository, CascadeStats, ChecklistRepository, CommentRepository,
    LabelRepository, ListRepository, MemberRepository, UserRepository,
};
use crate::utils::{color, datetime};

fn board_background(value: &str) -> ApiResult<String> {
    color::normalize_hex(value)
        .ok_or_else(|| ApiError::validation(format!("Background '{}' is not a #rrggbb color", value.trim())))
}

impl WorkShiftApi {
    /// Create a board owned by the signed-in user.
    ///
    /// The default lists and labels from the configuration are created with it.
    pub async fn create_board(
        &self,
        title: &str,
        description: Option<&str>,
        background: Option<&str>,
    ) -> ApiResult<board::Model> {
        let session = self.require_session().await?;
        let title = validation::required_text("Board title", title, BOARD_TITLE_MAX_LEN)?;
        let description = validation::optional_text("Description", description, DESCRIPTION_MAX_LEN)?;
        let background = board_background(background.unwrap_or(&self.config.boards.default_background))?;

        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        let board = BoardRepository::create(&txn, session.user.id, &title, description, &background).await?;
        MemberRepository::create(&txn, board.id, session.user.id, BoardRole::Owner.as_str()).await?;

        for (position, list_title) in self.config.boards.default_lists.iter().enumerate() {
            ListRepository::create(&txn, board.id, list_title.trim(), position as i32).await?;
        }
        for preset in &self.config.boards.default_labels {
            let color = color::resolve_label_color(&preset.color).unwrap_or_else(|| color::DEFAULT_LABEL_COLOR.to_string());
            LabelRepository::create(&txn, board.id, preset.name.trim(), &color).await?;
        }

        txn.commit().await?;
        info!("Created board '{}' ({}) for '{}'", board.title, board.id, session.user.username);
        Ok(board)
    }

    /// Boards the signed-in user belongs to, starred first, then by title.
    pub async fn list_boards(&self) -> ApiResult<Vec<board::Model>> {
        let session = self.require_session().await?;
        let storage = self.storage.lock().await;
        let boards = BoardRepository::get_for_user(&storage.conn, session.user.id).await?;
        debug!("Listed {} boards for '{}'", boards.len(), session.user.username);
        Ok(boards)
    }

    /// Everything needed to draw a board.
    pub async fn get_board(&self, board_id: i32) -> ApiResult<BoardView> {
        let session = self.require_session().await?;
        let storage = self.storage.lock().await;
        let conn = &storage.conn;

        let access = Self::board_access(conn, board_id, session.user.id).await?;
        let lists = ListRepository::get_for_board(conn, board_id).await?;
        let cards = CardRepository::get_for_board(conn, board_id).await?;
        let card_ids: Vec<i32> = cards.iter().map(|c| c.id).collect();

        let mut label_ids: HashMap<i32, Vec<i32>> = HashMap::new();
        for link in LabelRepository::links_for_cards(conn, &card_ids).await? {
            label_ids.entry(link.card_id).or_default().push(link.label_id);
        }

        let mut checklist: HashMap<i32, (usize, usize)> = HashMap::new();
        for item in ChecklistRepository::get_for_cards(conn, &card_ids).await? {
            let entry = checklist.entry(item.card_id).or_default();
            entry.1 += 1;
            if item.is_completed {
                entry.0 += 1;
            }
        }

        let comment_counts = count_by_card(CommentRepository::card_ids_for_cards(conn, &card_ids).await?);
        let attachment_counts = count_by_card(AttachmentRepository::card_ids_for_cards(conn, &card_ids).await?);

        let today = datetime::today();
        let soon_days = self.config.boards.due_soon_days;

        let mut cards_by_list: HashMap<i32, Vec<CardSummary>> = HashMap::new();
        for card in cards {
            let (checklist_done, checklist_total) = checklist.get(&card.id).copied().unwrap_or_default();
            let summary = CardSummary {
                label_ids: label_ids.remove(&card.id).unwrap_or_default(),
                checklist_done,
                checklist_total,
                comment_count: comment_counts.get(&card.id).copied().unwrap_or_default(),
                attachment_count: attachment_counts.get(&card.id).copied().unwrap_or_default(),
                due_status: datetime::due_status(card.due_date.as_deref(), card.is_completed, today, soon_days),
                card,
            };
            cards_by_list.entry(summary.card.list_id).or_default().push(summary);
        }

        let lists = lists
            .into_iter()
            .map(|list| ListView {
                cards: cards_by_list.remove(&list.id).unwrap_or_default(),
                list,
            })
            .collect();

        let labels = LabelRepository::get_for_board(conn, board_id).await?;
        let members = Self::member_infos(conn, board_id).await?;

        debug!("Loaded board {} for '{}'", board_id, session.user.username);
        Ok(BoardView {
            board: access.board,
            role: access.role,
            lists,
            labels,
            members,
        })
    }

    /// Change title, description or background. Owners and admins only.
    pub async fn update_board(&self, board_id: i32, update: BoardUpdate) -> ApiResult<board::Model> {
        let session = self.require_session().await?;

        let title = update
            .title
            .as_deref()
            .map(|t| validation::required_text("Board title", t, BOARD_TITLE_MAX_LEN))
            .transpose()?;
        let description = update
            .description
            .as_ref()
            .map(|d| validation::optional_text("Description", d.as_deref(), DESCRIPTION_MAX_LEN))
            .transpose()?;
        let background = update.background.as_deref().map(board_background).transpose()?;

        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        let access = Self::manager_access(&txn, board_id, session.user.id).await?;
        if title.is_none() && description.is_none() && background.is_none() {
            return Ok(access.board);
        }
        let mut active_model = access.board.into_active_model();
        if let Some(title) = title {
            active_model.title = ActiveValue::Set(title);
        }
        if let Some(description) = description {
            active_model.description = ActiveValue::Set(description);
        }
        if let Some(background) = background {
            active_model.background = ActiveValue::Set(background);
        }

        let board = BoardRepository::update(&txn, active_model).await?;
        txn.commit().await?;

        info!("Updated board {}", board.id);
        Ok(board)
    }

    /// Flip the starred flag of a board. Any member may star.
    pub async fn toggle_star(&self, board_id: i32) -> ApiResult<board::Model> {
        let session = self.require_session().await?;
        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        let access = Self::board_access(&txn, board_id, session.user.id).await?;
        let starred = !access.board.is_starred;
        let mut active_model = access.board.into_active_model();
        active_model.is_starred = ActiveValue::Set(starred);

        let board = BoardRepository::update(&txn, active_model).await?;
        txn.commit().await?;

        info!("Board {} starred: {}", board.id, board.is_starred);
        Ok(board)
    }

    /// Delete a board and everything on it. Owner only.
    pub async fn delete_board(&self, board_id: i32) -> ApiResult<CascadeStats> {
        let session = self.require_session().await?;
        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        let access = Self::board_access(&txn, board_id, session.user.id).await?;
        if access.role != BoardRole::Owner {
            warn!("'{}' tried to delete board {} as {}", session.user.username, board_id, access.role);
            return Err(ApiError::forbidden("only the owner can delete a board"));
        }

        let stats = BoardRepository::delete_cascade(&txn, board_id).await?;
        txn.commit().await?;

        info!("Deleted board {} ({} dependent rows)", board_id, stats.total());
        Ok(stats)
    }

    /// Members of a board with their user details, owner first.
    pub(crate) async fn member_infos<C>(conn: &C, board_id: i32) -> ApiResult<Vec<MemberInfo>>
    where
        C: ConnectionTrait,
    {
        let members = MemberRepository::get_for_board(conn, board_id).await?;
        let user_ids: Vec<i32> = members.iter().map(|m| m.user_id).collect();
        let users: HashMap<i32, _> = UserRepository::get_many(conn, &user_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let mut infos = Vec::with_capacity(members.len());
        for member in members {
            let Some(user) = users.get(&member.user_id) else {
                continue;
            };
            infos.push(MemberInfo {
                member_id: member.id,
                user_id: member.user_id,
                username: user.username.clone(),
                display_name: user.display_name.clone(),
                role: member.role.parse()?,
                joined_at: member.joined_at,
            });
        }
        infos.sort_by(|a, b| b.role.cmp(&a.role).then(a.username.cmp(&b.username)));
        Ok(infos)
    }
}

fn count_by_card(card_ids: Vec<i32>) -> HashMap<i32, usize> {
    let mut counts = HashMap::new();
    for id in card_ids {
        *counts.entry(id).or_default() += 1;
    }
    counts
}
