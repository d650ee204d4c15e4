// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod record;
pub mod workout;

pub use record::{RecordError, WorkoutRecord};
pub use workout::{Coordinates, KindDetails, KindValue, Workout, WorkoutKind};
