pub mod attachment;
pub mod board;
pub mod board_member;
pub mod card;
pub mod card_label;
pub mod checklist_item;
pub mod comment;
pub mod label;
pub mod list;
pub mod user;

pub use attachment::Entity as Attachment;
pub use board::Entity as Board;
pub use board_member::Entity as BoardMember;
pub use card::Entity as Card;
pub use card_label::Entity as CardLabel;
pub use checklist_item::Entity as ChecklistItem;
pub use comment::Entity as Comment;
pub use label::Entity as Label;
pub use list::Entity as List;
pub use user::Entity as User;
