//! Local storage module for the in-memory board database
//!
//! This module provides the relational store behind the API façade:
//! - Connection and schema setup for every table
//! - Whole-store snapshots for persistence between runs

pub mod db;
pub mod snapshot;

pub use db::LocalStorage;
pub use snapshot::{Snapshot, SNAPSHOT_FORMAT_VERSION};
