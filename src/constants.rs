//! Constants used throughout the application
//!
//! This module centralizes limits, defaults and user-facing messages.

// Validation limits
pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 32;
pub const PASSWORD_MIN_LEN: usize = 6;
pub const DISPLAY_NAME_MAX_LEN: usize = 64;
pub const BOARD_TITLE_MAX_LEN: usize = 100;
pub const LIST_TITLE_MAX_LEN: usize = 100;
pub const CARD_TITLE_MAX_LEN: usize = 200;
pub const DESCRIPTION_MAX_LEN: usize = 10_000;
pub const LABEL_NAME_MAX_LEN: usize = 50;
pub const CHECKLIST_ITEM_MAX_LEN: usize = 500;
pub const COMMENT_MAX_LEN: usize = 5_000;
pub const FILE_NAME_MAX_LEN: usize = 255;

// Board defaults
pub const DEFAULT_BOARD_BACKGROUND: &str = "#0079bf";
pub const DEFAULT_LISTS: &[&str] = &["To Do", "Doing", "Done"];
pub const DEFAULT_DUE_SOON_DAYS: i64 = 3;
/// Default attachment size limit (5 MiB)
pub const DEFAULT_ATTACHMENT_MAX_BYTES: u64 = 5 * 1024 * 1024;
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

// Demo data
pub const DEMO_USERNAME: &str = "demo";
pub const DEMO_EMAIL: &str = "demo@workshift.local";
pub const DEMO_PASSWORD: &str = "demo1234";

// Success Messages
pub const SUCCESS_CARD_CREATED: &str = "✅ Card created";
pub const SUCCESS_CARD_MOVED: &str = "✅ Card moved";
pub const SUCCESS_DEMO_SEEDED: &str = "✅ Demo data created";
pub const SUCCESS_SNAPSHOT_EXPORTED: &str = "✅ Snapshot exported";
pub const SUCCESS_SNAPSHOT_CLEARED: &str = "✅ Saved data cleared";

// UI Messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
pub const HEADER_OVERDUE: &str = "⏰ Overdue";
pub const HEADER_DUE_SOON: &str = "📅 Due soon";
pub const NO_BOARDS: &str = "No boards yet. Run `workshift seed` to create a demo board.";
