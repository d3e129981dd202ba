//! Request and response types of the API.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::error::ApiError;
use crate::entities::{attachment, board, card, checklist_item, comment, label, list, user};
use crate::utils::datetime::DueStatus;

/// Role of a user on a board, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardRole {
    Member,
    Admin,
    Owner,
}

impl BoardRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardRole::Member => "member",
            BoardRole::Admin => "admin",
            BoardRole::Owner => "owner",
        }
    }

    /// Owners and admins manage members, labels and board settings
    pub fn can_manage(&self) -> bool {
        *self >= BoardRole::Admin
    }
}

impl fmt::Display for BoardRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoardRole {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "member" => Ok(BoardRole::Member),
            "admin" => Ok(BoardRole::Admin),
            "owner" => Ok(BoardRole::Owner),
            other => Err(ApiError::validation(format!("Unknown board role '{}'", other))),
        }
    }
}

/// Public view of a user, without the password hash.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub created_at: String,
}

impl From<user::Model> for UserProfile {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            display_name: user.display_name,
            created_at: user.created_at,
        }
    }
}

/// The signed-in user.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub token: Uuid,
    pub user: UserProfile,
    pub started_at: String,
}

/// Board member with their user details.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberInfo {
    pub member_id: i32,
    pub user_id: i32,
    pub username: String,
    pub display_name: String,
    pub role: BoardRole,
    pub joined_at: String,
}

/// Card as shown on the board: the card plus its badges.
#[derive(Debug, Clone, Serialize)]
pub struct CardSummary {
    pub card: card::Model,
    pub label_ids: Vec<i32>,
    pub checklist_done: usize,
    pub checklist_total: usize,
    pub comment_count: usize,
    pub attachment_count: usize,
    pub due_status: DueStatus,
}

/// A list with its cards in position order.
#[derive(Debug, Clone, Serialize)]
pub struct ListView {
    pub list: list::Model,
    pub cards: Vec<CardSummary>,
}

/// Everything needed to draw a board.
#[derive(Debug, Clone, Serialize)]
pub struct BoardView {
    pub board: board::Model,
    /// Role of the signed-in user
    pub role: BoardRole,
    pub lists: Vec<ListView>,
    pub labels: Vec<label::Model>,
    pub members: Vec<MemberInfo>,
}

impl BoardView {
    /// Card ids per list, in position order
    pub fn card_ids(&self) -> Vec<Vec<i32>> {
        self.lists
            .iter()
            .map(|l| l.cards.iter().map(|c| c.card.id).collect())
            .collect()
    }
}

/// Comment with its author's display name.
#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub comment: comment::Model,
    pub author: String,
}

/// Attachment metadata without file content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttachmentInfo {
    pub id: i32,
    pub card_id: i32,
    pub file_name: String,
    pub mime_type: String,
    pub file_size: i64,
    pub uploaded_by: i32,
    pub created_at: String,
}

impl From<attachment::Model> for AttachmentInfo {
    fn from(attachment: attachment::Model) -> Self {
        Self {
            id: attachment.id,
            card_id: attachment.card_id,
            file_name: attachment.file_name,
            mime_type: attachment.mime_type,
            file_size: attachment.file_size,
            uploaded_by: attachment.uploaded_by,
            created_at: attachment.created_at,
        }
    }
}

/// Full card with everything hanging off it.
#[derive(Debug, Clone, Serialize)]
pub struct CardDetail {
    pub card: card::Model,
    pub board_id: i32,
    pub list_title: String,
    pub labels: Vec<label::Model>,
    pub checklist: Vec<checklist_item::Model>,
    pub comments: Vec<CommentView>,
    pub attachments: Vec<AttachmentInfo>,
    pub due_status: DueStatus,
}

/// Open cards needing attention.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DueCards {
    pub overdue: Vec<card::Model>,
    pub due_soon: Vec<card::Model>,
}

/// Partial update of a board. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoardUpdate {
    pub title: Option<String>,
    /// `Some(None)` clears the description
    pub description: Option<Option<String>>,
    pub background: Option<String>,
}

/// Partial update of a card. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardUpdate {
    pub title: Option<String>,
    /// `Some(None)` clears the description
    pub description: Option<Option<String>>,
    /// `Some(None)` clears the due date
    pub due_date: Option<Option<String>>,
    pub is_completed: Option<bool>,
}
