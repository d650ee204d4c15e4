// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - collection ownership and persistence.

pub mod persistence;
pub mod store;

pub use persistence::PersistenceAdapter;
pub use store::{WorkoutPatch, WorkoutStore};
