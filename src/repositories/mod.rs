//! Repository layer for database operations.
//!
//! This module provides repository structs that encapsulate database queries
//! and operations, following the Data Mapper pattern recommended by SeaORM.
//! Every method is generic over [`sea_orm::ConnectionTrait`] so it runs the
//! same on the connection or inside a transaction.
//!
//! The schema has no cascading foreign keys. Dependent rows are removed by the
//! `delete_cascade` methods, children first.

pub mod attachment;
pub mod board;
pub mod card;
pub mod checklist;
pub mod comment;
pub mod label;
pub mod list;
pub mod member;
pub mod user;

pub use attachment::AttachmentRepository;
pub use board::BoardRepository;
pub use card::CardRepository;
pub use checklist::ChecklistRepository;
pub use comment::CommentRepository;
pub use label::LabelRepository;
pub use list::ListRepository;
pub use member::MemberRepository;
pub use user::UserRepository;

use serde::Serialize;

/// Rows removed by a cascading delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CascadeStats {
    pub lists: u64,
    pub cards: u64,
    pub comments: u64,
    pub checklist_items: u64,
    pub card_labels: u64,
    pub attachments: u64,
    pub labels: u64,
    pub members: u64,
}

impl CascadeStats {
    /// Add another delete's counts to this one
    pub fn merge(&mut self, other: CascadeStats) {
        self.lists += other.lists;
        self.cards += other.cards;
        self.comments += other.comments;
        self.checklist_items += other.checklist_items;
        self.card_labels += other.card_labels;
        self.attachments += other.attachments;
        self.labels += other.labels;
        self.members += other.members;
    }

    /// Total rows removed
    pub fn total(&self) -> u64 {
        self.lists
            + self.cards
            + self.comments
            + self.checklist_items
            + self.card_labels
            + self.attachments
            + self.labels
            + self.members
    }
}
