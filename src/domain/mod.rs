//! Domain module containing core business logic and data types
//!
//! This module defines the core entities (DailyStat, ActivityRecord), the
//! present-or-missing day slots used by the weekly normalization, and the
//! weekly window helpers. These types represent the fundamental concepts in
//! our health tracking system.

pub mod activity;
pub mod stats;
pub mod week;

// Re-export public types for easy access
pub use activity::*;
pub use stats::*;
pub use week::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid activity kind: {0}")]
    InvalidActivityKind(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid value: {message}")]
    InvalidValue { message: String },
}
