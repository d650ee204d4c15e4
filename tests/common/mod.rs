// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use mapty_tracker::db::MemoryStore;
use mapty_tracker::models::{Coordinates, WorkoutKind};
use mapty_tracker::services::{PersistenceAdapter, WorkoutStore};
use mapty_tracker::ui::{
    Dialogs, FormFields, FormView, Geolocation, GeolocationError, ListEntry, MapView, Views,
    WorkoutListView,
};
use mapty_tracker::InteractionController;
use std::cell::RefCell;
use std::rc::Rc;

pub const STORAGE_KEY: &str = "workouts";
pub const ZOOM: u8 = 13;

#[allow(dead_code)]
pub fn london() -> Coordinates {
    Coordinates::new(51.5, -0.1)
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapCall {
    Center(Coordinates, u8),
    Marker {
        at: Coordinates,
        popup: String,
        class: String,
    },
    ClearMarkers,
    PanTo(Coordinates, u8, bool),
}

/// Everything the fake views have been asked to do.
#[derive(Debug, Default)]
pub struct Recorded {
    pub map: Vec<MapCall>,
    /// Current list, top first
    pub list: Vec<ListEntry>,
    pub alerts: Vec<String>,
    pub confirms: Vec<String>,
    pub confirm_answer: bool,
    pub fields: FormFields,
    pub form_visible: bool,
    pub kind_locked: bool,
    pub kind_field: Option<WorkoutKind>,
    pub footer_year: Option<i32>,
}

impl Recorded {
    /// Markers currently on the map (everything since the last clear).
    #[allow(dead_code)]
    pub fn markers(&self) -> Vec<&MapCall> {
        let start = self
            .map
            .iter()
            .rposition(|c| *c == MapCall::ClearMarkers)
            .map(|i| i + 1)
            .unwrap_or(0);
        self.map[start..]
            .iter()
            .filter(|c| matches!(c, MapCall::Marker { .. }))
            .collect()
    }
}

pub type Shared = Rc<RefCell<Recorded>>;

struct FakeMap(Shared);
struct FakeForm(Shared);
struct FakeList(Shared);
struct FakeDialogs(Shared);

impl MapView for FakeMap {
    fn center(&mut self, at: Coordinates, zoom: u8) {
        self.0.borrow_mut().map.push(MapCall::Center(at, zoom));
    }

    fn place_marker(&mut self, at: Coordinates, popup_text: &str, style_class: &str) {
        self.0.borrow_mut().map.push(MapCall::Marker {
            at,
            popup: popup_text.to_string(),
            class: style_class.to_string(),
        });
    }

    fn clear_markers(&mut self) {
        self.0.borrow_mut().map.push(MapCall::ClearMarkers);
    }

    fn pan_to(&mut self, at: Coordinates, zoom: u8, animated: bool) {
        self.0.borrow_mut().map.push(MapCall::PanTo(at, zoom, animated));
    }
}

impl FormView for FakeForm {
    fn read_fields(&self) -> FormFields {
        self.0.borrow().fields.clone()
    }

    fn fill(&mut self, fields: &FormFields) {
        self.0.borrow_mut().fields = fields.clone();
    }

    fn show_kind_field(&mut self, kind: WorkoutKind) {
        self.0.borrow_mut().kind_field = Some(kind);
    }

    fn set_kind_locked(&mut self, locked: bool) {
        self.0.borrow_mut().kind_locked = locked;
    }

    fn clear(&mut self) {
        let mut ui = self.0.borrow_mut();
        ui.fields.distance.clear();
        ui.fields.duration.clear();
        ui.fields.cadence.clear();
        ui.fields.elevation.clear();
    }

    fn show(&mut self) {
        self.0.borrow_mut().form_visible = true;
    }

    fn hide(&mut self) {
        self.0.borrow_mut().form_visible = false;
    }

    fn set_footer_year(&mut self, year: i32) {
        self.0.borrow_mut().footer_year = Some(year);
    }
}

impl WorkoutListView for FakeList {
    fn prepend(&mut self, entry: &ListEntry) {
        self.0.borrow_mut().list.insert(0, entry.clone());
    }

    fn clear(&mut self) {
        self.0.borrow_mut().list.clear();
    }
}

impl Dialogs for FakeDialogs {
    fn alert(&mut self, message: &str) {
        self.0.borrow_mut().alerts.push(message.to_string());
    }

    fn confirm(&mut self, message: &str) -> bool {
        let mut ui = self.0.borrow_mut();
        ui.confirms.push(message.to_string());
        ui.confirm_answer
    }
}

/// Geolocation that always succeeds.
pub struct FixedPosition(pub Coordinates);

impl Geolocation for FixedPosition {
    async fn request_position(&self) -> Result<Coordinates, GeolocationError> {
        Ok(self.0)
    }
}

/// Geolocation that always fails.
#[allow(dead_code)]
pub struct DeniedPosition;

impl Geolocation for DeniedPosition {
    async fn request_position(&self) -> Result<Coordinates, GeolocationError> {
        Err(GeolocationError::Denied)
    }
}

/// A controller wired to recording fakes and an in-memory store.
pub struct Harness {
    pub controller: InteractionController,
    pub ui: Shared,
    pub kv: MemoryStore,
}

impl Harness {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new())
    }

    pub fn with_store(kv: MemoryStore) -> Self {
        let ui: Shared = Rc::new(RefCell::new(Recorded::default()));
        ui.borrow_mut().fields.kind = "running".to_string();

        let views = Views {
            map: Box::new(FakeMap(ui.clone())),
            form: Box::new(FakeForm(ui.clone())),
            list: Box::new(FakeList(ui.clone())),
            dialogs: Box::new(FakeDialogs(ui.clone())),
        };
        let persistence = PersistenceAdapter::new(kv.clone(), STORAGE_KEY);
        let controller = InteractionController::new(WorkoutStore::new(), persistence, views, ZOOM);

        Self { controller, ui, kv }
    }

    /// Start with a successful position fix at `london()`.
    #[allow(dead_code)]
    pub async fn started() -> Self {
        let mut harness = Self::new();
        harness.controller.start(&FixedPosition(london())).await;
        harness
    }

    /// Type values into the form.
    pub fn type_form(&self, kind: &str, distance: &str, duration: &str, value: &str) {
        let mut ui = self.ui.borrow_mut();
        ui.fields.kind = kind.to_string();
        ui.fields.distance = distance.to_string();
        ui.fields.duration = duration.to_string();
        ui.fields.cadence = value.to_string();
        ui.fields.elevation = value.to_string();
    }

    /// Click the map at `at`, fill the form, submit. Returns the new id, if any.
    #[allow(dead_code)]
    pub fn log_workout(
        &mut self,
        at: Coordinates,
        kind: &str,
        distance: &str,
        duration: &str,
        value: &str,
    ) -> Option<String> {
        let before = self.controller.store().len();
        self.controller.handle_map_click(at);
        self.type_form(kind, distance, duration, value);
        self.controller.handle_submit();

        let snapshot = self.controller.store().snapshot();
        (snapshot.len() > before).then(|| snapshot[snapshot.len() - 1].id().to_string())
    }

    /// The raw persisted value, if any.
    #[allow(dead_code)]
    pub fn persisted(&self) -> Option<String> {
        use mapty_tracker::db::KeyValueStore;
        self.kv.get(STORAGE_KEY).expect("memory store read")
    }
}
