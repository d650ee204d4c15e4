// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Interaction controller.
//!
//! The controller is the only writer of the workout store and the durable
//! store, and the only caller of the rendering collaborators. Every
//! `handle_*` method is one complete reaction to one user event:
//! 1. Validate input (nothing is mutated on failure)
//! 2. Mutate the store
//! 3. Persist the full collection
//! 4. Update the views

pub mod input;
pub mod state;

pub use input::{parse_input, parse_kind, WorkoutInput};
pub use state::{ControllerState, FormMode};

use crate::error::{AppError, Result};
use crate::models::{Coordinates, WorkoutKind};
use crate::services::{PersistenceAdapter, WorkoutPatch, WorkoutStore};
use crate::ui::{FormFields, Geolocation, GeolocationError, Views};
use chrono::Datelike;

const RESET_PROMPT: &str = "Delete all workouts? This cannot be undone.";

/// Workout tracker state machine.
pub struct InteractionController {
    store: WorkoutStore,
    persistence: PersistenceAdapter,
    views: Views,
    state: ControllerState,
    map_ready: bool,
    map_zoom: u8,
}

impl InteractionController {
    pub fn new(
        store: WorkoutStore,
        persistence: PersistenceAdapter,
        views: Views,
        map_zoom: u8,
    ) -> Self {
        Self {
            store,
            persistence,
            views,
            state: ControllerState::Idle,
            map_ready: false,
            map_zoom,
        }
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn store(&self) -> &WorkoutStore {
        &self.store
    }

    pub fn is_map_ready(&self) -> bool {
        self.map_ready
    }

    // ─── Startup ─────────────────────────────────────────────────

    /// Load stored workouts, render the list, then wait for a position.
    pub async fn start<G: Geolocation>(&mut self, geolocation: &G) {
        self.begin();
        match geolocation.request_position().await {
            Ok(at) => self.handle_position(at),
            Err(e) => self.handle_position_error(e),
        }
    }

    /// Synchronous part of startup; leaves the controller in `Locating`.
    pub fn begin(&mut self) {
        self.views
            .form
            .set_footer_year(chrono::Utc::now().year());

        let workouts = self.persistence.load();
        self.store.load(workouts);
        self.rerender();

        self.state = ControllerState::Locating;
        tracing::info!(count = self.store.len(), "Waiting for position");
    }

    /// Geolocation succeeded: show the map and place stored markers.
    pub fn handle_position(&mut self, at: Coordinates) {
        tracing::info!(lat = at.lat, lng = at.lng, "Position acquired");
        self.views.map.center(at, self.map_zoom);
        if self.map_ready {
            self.views.map.clear_markers();
        }
        self.map_ready = true;

        for workout in self.store.snapshot() {
            self.views.map.place_marker(
                workout.coordinates(),
                &workout.popup_text(),
                workout.kind().popup_class(),
            );
        }

        if !self.state.is_form_open() {
            self.state = ControllerState::MapReady;
        }
    }

    /// Geolocation failed: no map for this session, list still usable.
    pub fn handle_position_error(&mut self, err: GeolocationError) {
        self.map_ready = false;
        self.state = ControllerState::Idle;
        self.report(AppError::Geolocation(err.to_string()));
    }

    // ─── Form ────────────────────────────────────────────────────

    /// Map click: open the form to create a workout at `at`.
    pub fn handle_map_click(&mut self, at: Coordinates) {
        match self.state {
            ControllerState::MapReady | ControllerState::FormOpen(FormMode::Create(_)) => {}
            _ => {
                tracing::debug!(state = ?self.state, "Ignoring map click");
                return;
            }
        }

        let kind = parse_kind(&self.views.form.read_fields().kind).unwrap_or(WorkoutKind::Running);
        self.views.form.show_kind_field(kind);
        self.views.form.show();
        self.state = ControllerState::FormOpen(FormMode::Create(at));
        tracing::debug!(lat = at.lat, lng = at.lng, "Opened form for new workout");
    }

    /// Kind selector changed: toggle cadence/elevation inputs.
    pub fn handle_kind_change(&mut self) {
        let raw = self.views.form.read_fields().kind;
        match parse_kind(&raw) {
            Ok(kind) => self.views.form.show_kind_field(kind),
            Err(e) => tracing::warn!(error = %e, "Ignoring unknown kind selection"),
        }
    }

    /// List edit icon: open the form pre-filled, kind locked.
    pub fn handle_edit_click(&mut self, id: &str) {
        if self.state == ControllerState::Locating {
            tracing::debug!(workout_id = id, "Ignoring edit while locating");
            return;
        }

        let Some(workout) = self.store.find_by_id(id) else {
            tracing::warn!(workout_id = id, "Edit requested for unknown workout");
            return;
        };

        let kind = workout.kind();
        let fields = FormFields::from_workout(workout);
        self.views.form.fill(&fields);
        self.views.form.show_kind_field(kind);
        self.views.form.set_kind_locked(true);
        self.views.form.show();

        self.state = ControllerState::FormOpen(FormMode::Edit(id.to_string()));
        tracing::debug!(workout_id = id, "Opened form for edit");
    }

    /// Form submit: create or edit depending on the open mode.
    pub fn handle_submit(&mut self) {
        if let Err(e) = self.submit() {
            self.report(e);
        }
    }

    /// Close an open form without changing anything.
    pub fn handle_cancel(&mut self) {
        if self.state.is_form_open() {
            self.close_form();
        }
    }

    fn submit(&mut self) -> Result<()> {
        match self.state.clone() {
            ControllerState::FormOpen(FormMode::Create(at)) => self.submit_create(at),
            ControllerState::FormOpen(FormMode::Edit(id)) => self.submit_edit(&id),
            _ => {
                tracing::debug!(state = ?self.state, "Submit with no open form");
                Ok(())
            }
        }
    }

    fn submit_create(&mut self, at: Coordinates) -> Result<()> {
        let fields = self.views.form.read_fields();
        let kind = parse_kind(&fields.kind)?;
        let input = parse_input(kind, &fields)?;

        let workout = self
            .store
            .create(at, input.distance_km, input.duration_min, input.value)
            .clone();
        tracing::info!(workout_id = workout.id(), kind = %kind, "Workout created");

        self.views.render_workout(&workout, self.map_ready);
        let saved = self.save();
        self.close_form();
        saved
    }

    fn submit_edit(&mut self, id: &str) -> Result<()> {
        let Some(kind) = self.store.find_by_id(id).map(|w| w.kind()) else {
            self.close_form();
            return Err(AppError::NotFound(id.to_string()));
        };

        let input = parse_input(kind, &self.views.form.read_fields())?;
        let patch = WorkoutPatch {
            distance_km: input.distance_km,
            duration_min: input.duration_min,
            value: input.value,
        };

        if self.store.update(id, patch)?.is_none() {
            self.close_form();
            return Err(AppError::NotFound(id.to_string()));
        }
        tracing::info!(workout_id = id, kind = %kind, "Workout updated");

        let saved = self.save();
        self.rerender();
        self.close_form();
        saved
    }

    fn close_form(&mut self) {
        self.views.form.clear();
        self.views.form.hide();
        self.views.form.set_kind_locked(false);
        self.state = self.resting_state();
    }

    fn resting_state(&self) -> ControllerState {
        if self.map_ready {
            ControllerState::MapReady
        } else {
            ControllerState::Idle
        }
    }

    // ─── List ────────────────────────────────────────────────────

    /// List delete icon. No confirmation.
    pub fn handle_delete_click(&mut self, id: &str) {
        if !self.store.delete(id) {
            tracing::warn!(workout_id = id, "Delete requested for unknown workout");
            return;
        }
        tracing::info!(workout_id = id, "Workout deleted");

        let saved = self.save();
        self.rerender();
        if self.state.editing() == Some(id) {
            self.close_form();
        }
        if let Err(e) = saved {
            self.report(e);
        }
    }

    /// Redraw the list (and markers, if the map is up) from the store.
    pub fn handle_list(&mut self) {
        tracing::debug!(count = self.store.len(), "Re-rendering workouts");
        self.rerender();
    }

    /// List entry body: move the map to the workout.
    pub fn handle_entry_click(&mut self, id: &str) {
        if !self.map_ready {
            tracing::debug!(workout_id = id, "No map; ignoring entry click");
            return;
        }

        match self.store.find_by_id(id) {
            Some(workout) => self
                .views
                .map
                .pan_to(workout.coordinates(), self.map_zoom, true),
            None => tracing::warn!(workout_id = id, "Entry click for unknown workout"),
        }
    }

    /// Reset-all button: confirm, then drop everything.
    pub fn handle_reset_click(&mut self) {
        if !self.views.dialogs.confirm(RESET_PROMPT) {
            tracing::info!("Reset declined");
            return;
        }

        self.store.reset_all();
        let cleared = self.persistence.clear();
        tracing::info!("All workouts reset");

        self.rerender();
        if self.state.is_form_open() {
            self.close_form();
        }
        if let Err(e) = cleared {
            self.report(e);
        }
    }

    // ─── Helpers ─────────────────────────────────────────────────

    fn save(&self) -> Result<()> {
        self.persistence.save(self.store.snapshot())
    }

    /// Redraw markers and list from the current snapshot.
    fn rerender(&mut self) {
        if self.map_ready {
            self.views.map.clear_markers();
        }
        self.views.list.clear();
        for workout in self.store.snapshot() {
            self.views.render_workout(workout, self.map_ready);
        }
    }

    fn report(&mut self, err: AppError) {
        if err.is_user_facing() {
            tracing::warn!(error = %err, "Reporting error to user");
            self.views.dialogs.alert(&err.user_message());
        } else {
            tracing::warn!(error = %err, "Ignoring stale reference");
        }
    }
}
