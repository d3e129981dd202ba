//! The WorkShift API façade.
//!
//! [`WorkShiftApi`] is the only entry point front ends use. It mimics a REST
//! backend in-process: every operation checks the session and board
//! membership, validates its input, then forwards to the repositories inside
//! one transaction. Operations are grouped by resource in the submodules.

mod attachments;
mod auth;
mod boards;
mod cards;
mod checklists;
mod comments;
pub mod error;
mod labels;
mod lists;
mod members;
pub mod types;
pub mod validation;

pub use error::{ApiError, ApiResult};
pub use types::{
    AttachmentInfo, BoardRole, BoardUpdate, BoardView, CardDetail, CardSummary, CardUpdate, CommentView, DueCards,
    ListView, MemberInfo, Session, UserProfile,
};

use log::{debug, info};
use sea_orm::ConnectionTrait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::Config;
use crate::entities::{board, board_member, card, list};
use crate::persistence::SnapshotStore;
use crate::repositories::{BoardRepository, CardRepository, ListRepository, MemberRepository};
use crate::storage::{LocalStorage, Snapshot};

/// In-process API over the local store.
///
/// Cloning is cheap; clones share the store and the session.
///
/// # Example
/// ```rust,no_run
/// use workshift::api::WorkShiftApi;
/// use workshift::config::Config;
///
/// # async fn example() -> anyhow::Result<()> {
/// let api = WorkShiftApi::new(Config::default()).await?;
/// api.register("ada", "ada@example.com", "secret-pass", "Ada").await?;
/// api.login("ada", "secret-pass").await?;
///
/// let board = api.create_board("Launch", None, None).await?;
/// let view = api.get_board(board.id).await?;
/// let todo = &view.lists[0].list;
/// api.create_card(todo.id, "Write release notes").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct WorkShiftApi {
    storage: Arc<Mutex<LocalStorage>>,
    session: Arc<Mutex<Option<Session>>>,
    config: Arc<Config>,
}

/// Membership of the session user on a board.
pub(crate) struct BoardAccess {
    pub board: board::Model,
    pub member: board_member::Model,
    pub role: BoardRole,
}

impl WorkShiftApi {
    /// Create an API over a fresh, empty store.
    pub async fn new(config: Config) -> ApiResult<Self> {
        let storage = LocalStorage::new().await?;
        Ok(Self::with_storage(storage, config))
    }

    /// Create an API over an existing store.
    pub fn with_storage(storage: LocalStorage, config: Config) -> Self {
        Self {
            storage: Arc::new(Mutex::new(storage)),
            session: Arc::new(Mutex::new(None)),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Copy of the whole store.
    pub async fn snapshot(&self) -> ApiResult<Snapshot> {
        let storage = self.storage.lock().await;
        Ok(storage.export_snapshot().await?)
    }

    /// Replace the whole store with a snapshot. Ends the current session.
    pub async fn restore(&self, snapshot: Snapshot) -> ApiResult<()> {
        {
            let storage = self.storage.lock().await;
            storage.import_snapshot(snapshot).await?;
        }
        *self.session.lock().await = None;
        Ok(())
    }

    /// Restore from a snapshot store. Returns false when it held nothing.
    pub async fn load_from(&self, store: &dyn SnapshotStore) -> ApiResult<bool> {
        match store.load().await? {
            Some(snapshot) => {
                info!("Loading snapshot from {}", store.describe());
                self.restore(snapshot).await?;
                Ok(true)
            }
            None => {
                debug!("Nothing to load from {}", store.describe());
                Ok(false)
            }
        }
    }

    /// Save the current store content to a snapshot store.
    pub async fn save_to(&self, store: &dyn SnapshotStore) -> ApiResult<()> {
        let snapshot = self.snapshot().await?;
        store.save(&snapshot).await?;
        Ok(())
    }

    /// Session of the signed-in user, or `Unauthorized`.
    pub(crate) async fn require_session(&self) -> ApiResult<Session> {
        self.session
            .lock()
            .await
            .clone()
            .ok_or_else(|| ApiError::Unauthorized("sign in first".to_string()))
    }

    /// Board the user is a member of, with their role.
    pub(crate) async fn board_access<C>(conn: &C, board_id: i32, user_id: i32) -> ApiResult<BoardAccess>
    where
        C: ConnectionTrait,
    {
        let board = BoardRepository::get_by_id(conn, board_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Board", board_id))?;

        let member = MemberRepository::get(conn, board_id, user_id)
            .await?
            .ok_or_else(|| ApiError::forbidden(format!("not a member of board {}", board_id)))?;
        let role = member.role.parse::<BoardRole>()?;

        Ok(BoardAccess { board, member, role })
    }

    /// Like [`Self::board_access`] but requires owner or admin.
    pub(crate) async fn manager_access<C>(conn: &C, board_id: i32, user_id: i32) -> ApiResult<BoardAccess>
    where
        C: ConnectionTrait,
    {
        let access = Self::board_access(conn, board_id, user_id).await?;
        if !access.role.can_manage() {
            return Err(ApiError::forbidden(format!(
                "only owners and admins can do this on board {}",
                board_id
            )));
        }
        Ok(access)
    }

    /// A list and the user's access to its board.
    pub(crate) async fn list_access<C>(conn: &C, list_id: i32, user_id: i32) -> ApiResult<(list::Model, BoardAccess)>
    where
        C: ConnectionTrait,
    {
        let list = ListRepository::get_by_id(conn, list_id)
            .await?
            .ok_or_else(|| ApiError::not_found("List", list_id))?;
        let access = Self::board_access(conn, list.board_id, user_id).await?;
        Ok((list, access))
    }

    /// A card, its list, and the user's access to its board.
    pub(crate) async fn card_access<C>(
        conn: &C,
        card_id: i32,
        user_id: i32,
    ) -> ApiResult<(card::Model, list::Model, BoardAccess)>
    where
        C: ConnectionTrait,
    {
        let card = CardRepository::get_by_id(conn, card_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Card", card_id))?;
        let (list, access) = Self::list_access(conn, card.list_id, user_id).await?;
        Ok((card, list, access))
    }
}
