//! WorkShift - a kanban board backend that runs in-process
//!
//! Boards hold ordered lists, lists hold ordered cards, and cards carry
//! labels, checklists, comments and attachments. All data lives in an
//! in-memory SQLite database and is kept between runs as a JSON snapshot.
//!
//! # Modules
//!
//! * [`api`] - The `WorkShiftApi` façade front ends talk to
//! * [`config`] - Application configuration management
//! * [`storage`] - In-memory database and snapshots
//! * [`persistence`] - Where snapshots are kept between runs
//! * [`repositories`] - Queries and cascading deletes per table
//! * [`utils`] - Date and color helpers

/// Request handling, access checks and validation
pub mod api;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// SeaORM entity models for database tables
pub mod entities;

/// Logging setup
pub mod logger;

/// Position arithmetic for ordered rows
pub mod ordering;

/// Snapshot stores
pub mod persistence;

/// Repository layer for database operations
pub mod repositories;

/// Demo content
pub mod seed;

/// In-memory database and snapshot import/export
pub mod storage;

/// Utility functions for dates and colors
pub mod utils;

pub use api::{ApiError, ApiResult, WorkShiftApi};
pub use config::Config;
