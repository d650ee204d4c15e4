// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.
//!
//! Nothing here is fatal: every variant maps to a way of leaving the
//! tracker in a valid, previously reachable state.

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// User-correctable form input.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Edit/delete referencing an id that is no longer in the collection.
    #[error("Workout not found: {0}")]
    NotFound(String),

    #[error("Geolocation unavailable: {0}")]
    Geolocation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Whether this error is reported to the user through an alert.
    ///
    /// Not-found errors are benign (stale UI reference) and only logged.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, AppError::NotFound(_))
    }

    /// Message shown to the user for a user-facing error.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Geolocation(_) => "Could not get your position".to_string(),
            AppError::Storage(_) => "Could not save your workouts".to_string(),
            AppError::NotFound(_) | AppError::Internal(_) => "Something went wrong".to_string(),
        }
    }
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AppError>;
