//! Utility modules for the WorkShift board engine.
//!
//! - [`color`] - Label color names and hex color validation
//! - [`datetime`] - Date parsing, timestamps and due date classification

pub mod color;
pub mod datetime;
