// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Mapty: log running and cycling workouts pinned to map coordinates.
//!
//! This crate provides the workout state manager: the in-memory workout
//! collection, the interaction state machine that mutates it, and the
//! persistence round-trip through a durable key-value store. Map, form and
//! geolocation are collaborators supplied by the host.

pub mod config;
pub mod controller;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;
pub mod ui;

pub use controller::InteractionController;
