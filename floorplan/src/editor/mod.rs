//! The edit-state controller.
//!
//! `Editor` owns the live walls, rooms and openings and mutates them through
//! pointer events and toolbar calls. Every committed change goes through
//! [`Editor::normalize_from`]: walls are rounded, fragmented and deduplicated,
//! openings are re-bound by geometry, rooms are re-detected against the
//! previous room list, and selection ids are carried over to the fragments
//! that replaced them.

mod drag;
mod resize;
mod tools;

pub use resize::AnchorSide;
pub use tools::Tool;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::algorithms::binding::rebind_openings;
use crate::algorithms::fragment::{fragment_with_tolerance, merge_duplicates};
use crate::algorithms::rooms::detect_rooms_with_tolerance;
use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::geometry::limits::{in_opening_bounds, in_thickness_bounds, point_in_bounds};
use crate::geometry::math::{closest_point_on_segment, dist_point_to_seg, is_point_on_segment};
use crate::history::History;
use crate::json;
use crate::model::{
    Color, Door, EditorSnapshot, FlipAxis, OpeningId, OpeningKind, Point, Room, RoomId, Wall,
    WallId, Window,
};

/// The wall being drawn in wall mode, not yet part of the plan.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DraftWall {
    pub start: Point,
    pub end: Point,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RulerSegment {
    pub start: Point,
    pub end: Point,
    pub length: f64,
    pub finished: bool,
}

impl RulerSegment {
    fn at(p: Point) -> Self {
        RulerSegment { start: p, end: p, length: 0.0, finished: false }
    }
    fn stretch(&mut self, p: Point) {
        self.end = p;
        self.length = self.start.dist(p);
    }
}

/// Fields of a room a user may edit. `None` leaves the field untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomPatch {
    pub name: Option<String>,
    pub color: Option<Color>,
}

/// Everything a renderer needs, in one serializable value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EditorView {
    pub walls: Vec<Wall>,
    pub rooms: Vec<Room>,
    pub doors: Vec<Door>,
    pub windows: Vec<Window>,
    pub tool: Tool,
    pub current_wall: Option<DraftWall>,
    pub hovered_wall: Option<WallId>,
    pub selected_walls: Vec<WallId>,
    pub ruler: Option<RulerSegment>,
    pub can_undo: bool,
    pub can_redo: bool,
}

pub struct Editor {
    state: EditorSnapshot,
    history: History,
    config: EditorConfig,
    tool: Tool,
    draft: Option<DraftWall>,
    ruler: Option<RulerSegment>,
    hovered: Option<WallId>,
    selected: Vec<WallId>,
    drag: Option<drag::DragState>,
}

impl Default for Editor {
    fn default() -> Self {
        Editor::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Editor::build(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Result<Self, EditorError> {
        config.validate()?;
        Ok(Editor::build(config))
    }

    fn build(config: EditorConfig) -> Self {
        Editor {
            state: EditorSnapshot::default(),
            history: History::new(config.history_depth),
            config,
            tool: Tool::Select,
            draft: None,
            ruler: None,
            hovered: None,
            selected: Vec::new(),
            drag: None,
        }
    }

    // ---- read model ----

    pub fn walls(&self) -> &[Wall] {
        &self.state.walls
    }
    pub fn rooms(&self) -> &[Room] {
        &self.state.rooms
    }
    pub fn doors(&self) -> &[Door] {
        &self.state.doors
    }
    pub fn windows(&self) -> &[Window] {
        &self.state.windows
    }
    pub fn snapshot(&self) -> &EditorSnapshot {
        &self.state
    }
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }
    pub fn tool(&self) -> Tool {
        self.tool
    }
    pub fn current_wall(&self) -> Option<DraftWall> {
        self.draft
    }
    pub fn ruler(&self) -> Option<RulerSegment> {
        self.ruler
    }
    pub fn hovered_wall(&self) -> Option<WallId> {
        self.hovered
    }
    pub fn selected_walls(&self) -> &[WallId] {
        &self.selected
    }
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn wall(&self, id: WallId) -> Option<&Wall> {
        self.state.walls.iter().find(|w| w.id == id)
    }
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.state.rooms.iter().find(|r| r.id == id)
    }

    pub fn view(&self) -> EditorView {
        EditorView {
            walls: self.state.walls.clone(),
            rooms: self.state.rooms.clone(),
            doors: self.state.doors.clone(),
            windows: self.state.windows.clone(),
            tool: self.tool,
            current_wall: self.draft,
            hovered_wall: self.hovered,
            selected_walls: self.selected.clone(),
            ruler: self.ruler,
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        }
    }

    // ---- tool state ----

    /// Switching tools abandons any gesture in progress.
    pub fn set_tool(&mut self, tool: Tool) {
        if tool != self.tool {
            self.cancel();
            self.tool = tool;
        }
    }

    pub fn set_snapping(&mut self, on: bool) {
        self.config.snapping = on;
    }

    /// Escape: drops the draft wall and the ruler, and rolls back a drag to its
    /// gesture-start state. Committed state is never touched.
    pub fn cancel(&mut self) {
        self.draft = None;
        self.ruler = None;
        self.abort_drag();
    }

    /// Puts back the gesture-start snapshot of an unfinished drag. Mutations
    /// run this before resolving ids.
    fn abort_drag(&mut self) {
        if let Some(d) = self.drag.take() {
            self.state = d.into_start();
        }
    }

    pub fn select_wall(&mut self, id: WallId) -> bool {
        if self.wall(id).is_none() {
            return false;
        }
        self.selected = vec![id];
        true
    }

    pub fn toggle_wall_selection(&mut self, id: WallId) -> bool {
        if let Some(i) = self.selected.iter().position(|s| *s == id) {
            self.selected.remove(i);
            return true;
        }
        if self.wall(id).is_none() {
            return false;
        }
        self.selected.push(id);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    // ---- history ----

    fn record(&mut self) {
        self.abort_drag();
        self.history.record(self.state.clone());
    }

    pub fn undo(&mut self) -> bool {
        self.cancel();
        let done = self.history.undo(&mut self.state);
        if done {
            self.prune_selection();
            debug!(walls = self.state.walls.len(), rooms = self.state.rooms.len(), "undo");
        }
        done
    }

    pub fn redo(&mut self) -> bool {
        self.cancel();
        let done = self.history.redo(&mut self.state);
        if done {
            self.prune_selection();
            debug!(walls = self.state.walls.len(), rooms = self.state.rooms.len(), "redo");
        }
        done
    }

    fn prune_selection(&mut self) {
        let walls = &self.state.walls;
        self.selected.retain(|id| walls.iter().any(|w| w.id == *id));
        if self.hovered.is_some_and(|h| !walls.iter().any(|w| w.id == h)) {
            self.hovered = None;
        }
    }

    // ---- normalization ----

    /// Replaces the wall set with the normalized form of `walls`.
    ///
    /// `before` is the wall set the current openings and selection refer to;
    /// `previous` is the room list new rooms inherit identity from.
    pub(crate) fn normalize_from(&mut self, before: &[Wall], walls: Vec<Wall>, previous: &[Room]) {
        let tol = self.config.point_tolerance;
        let mut walls: Vec<Wall> = walls
            .into_iter()
            .filter(|w| w.start.is_finite() && w.end.is_finite())
            .collect();
        if self.config.grid_rounding {
            for w in &mut walls {
                w.start = w.start.round();
                w.end = w.end.round();
            }
        }
        let fragments = merge_duplicates(fragment_with_tolerance(&walls, tol), tol);
        let dropped = rebind_openings(before, &fragments, &mut self.state.doors, &mut self.state.windows, tol);
        let rooms = detect_rooms_with_tolerance(&fragments, previous, tol);

        let mut selected = Vec::with_capacity(self.selected.len());
        for id in &self.selected {
            for nid in successors(*id, before, &fragments, tol) {
                if !selected.contains(&nid) {
                    selected.push(nid);
                }
            }
        }
        self.selected = selected;
        self.hovered = self
            .hovered
            .and_then(|h| successors(h, before, &fragments, tol).into_iter().next());

        self.state.walls = fragments;
        self.state.rooms = rooms;
        debug!(
            walls = self.state.walls.len(),
            rooms = self.state.rooms.len(),
            doors = self.state.doors.len(),
            windows = self.state.windows.len(),
            dropped,
            "plan normalized"
        );
    }

    fn normalize_current(&mut self, walls: Vec<Wall>) {
        let before = self.state.walls.clone();
        let previous = self.state.rooms.clone();
        self.normalize_from(&before, walls, &previous);
    }

    // ---- mutations ----

    /// Inserts a wall as if it had been drawn. Returns false when the wall is
    /// degenerate.
    pub fn add_wall(&mut self, start: Point, end: Point) -> bool {
        self.abort_drag();
        if !point_in_bounds(start) || !point_in_bounds(end) || start.dist(end) <= self.config.point_tolerance {
            return false;
        }
        self.record();
        self.commit_wall(start, end);
        true
    }

    fn commit_wall(&mut self, start: Point, end: Point) {
        let mut walls = self.state.walls.clone();
        walls.push(Wall::new(start, end, self.config.default_wall_thickness));
        self.normalize_current(walls);
    }

    pub fn add_door(&mut self, wall_id: WallId, t: f64) -> Option<OpeningId> {
        self.attach_opening(OpeningKind::Door, wall_id, t)
    }

    pub fn add_window(&mut self, wall_id: WallId, t: f64) -> Option<OpeningId> {
        self.attach_opening(OpeningKind::Window, wall_id, t)
    }

    fn attach_opening(&mut self, kind: OpeningKind, wall_id: WallId, t: f64) -> Option<OpeningId> {
        self.abort_drag();
        if !t.is_finite() || self.wall(wall_id).is_none() {
            return None;
        }
        let t = t.clamp(0.0, 1.0);
        let id = OpeningId::new();
        self.record();
        match kind {
            OpeningKind::Door => self.state.doors.push(Door {
                id,
                wall_id,
                t,
                width: self.config.default_door_width,
                flip_x: false,
                flip_y: false,
            }),
            OpeningKind::Window => self.state.windows.push(Window {
                id,
                wall_id,
                t,
                width: self.config.default_window_width,
                height: self.config.default_window_height,
                flip_y: false,
            }),
        }
        debug!(?kind, %id, %wall_id, t, "opening attached");
        Some(id)
    }

    /// Empties the plan. A no-op on an empty plan.
    pub fn clear_all(&mut self) {
        self.cancel();
        if self.state == EditorSnapshot::default() {
            return;
        }
        self.record();
        self.state = EditorSnapshot::default();
        self.selected.clear();
        self.hovered = None;
        debug!("plan cleared");
    }

    pub fn delete_wall(&mut self, id: WallId) -> bool {
        self.try_delete_wall(id).is_ok()
    }

    pub fn try_delete_wall(&mut self, id: WallId) -> Result<(), EditorError> {
        self.abort_drag();
        if self.wall(id).is_none() {
            return Err(EditorError::not_found("wall", id));
        }
        self.cancel();
        self.record();
        self.state.doors.retain(|d| d.wall_id != id);
        self.state.windows.retain(|w| w.wall_id != id);
        self.selected.retain(|s| *s != id);
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        let walls: Vec<Wall> = self.state.walls.iter().filter(|w| w.id != id).cloned().collect();
        self.normalize_current(walls);
        debug!(%id, "wall deleted");
        Ok(())
    }

    pub fn delete_opening(&mut self, kind: OpeningKind, id: OpeningId) -> bool {
        self.try_delete_opening(kind, id).is_ok()
    }

    pub fn try_delete_opening(&mut self, kind: OpeningKind, id: OpeningId) -> Result<(), EditorError> {
        self.abort_drag();
        let found = match kind {
            OpeningKind::Door => self.state.doors.iter().any(|d| d.id == id),
            OpeningKind::Window => self.state.windows.iter().any(|w| w.id == id),
        };
        if !found {
            return Err(EditorError::not_found(opening_label(kind), id));
        }
        self.record();
        match kind {
            OpeningKind::Door => self.state.doors.retain(|d| d.id != id),
            OpeningKind::Window => self.state.windows.retain(|w| w.id != id),
        }
        Ok(())
    }

    pub fn split_wall(&mut self, id: WallId, at: Option<Point>) -> bool {
        self.try_split_wall(id, at).is_ok()
    }

    /// Replaces a wall by two halves meeting at `at` (projected onto the wall),
    /// or at the midpoint when `at` is `None`.
    pub fn try_split_wall(&mut self, id: WallId, at: Option<Point>) -> Result<(), EditorError> {
        self.abort_drag();
        let tol = self.config.point_tolerance;
        let w = self.wall(id).cloned().ok_or_else(|| EditorError::not_found("wall", id))?;
        let target = at.unwrap_or_else(|| w.midpoint());
        if !target.is_finite() {
            return Err(EditorError::invalid_argument("at", "must be finite"));
        }
        if dist_point_to_seg(target, w.start, w.end) > self.config.pick_tolerance {
            return Err(EditorError::invalid_argument("at", "too far from the wall"));
        }
        let q = closest_point_on_segment(target, w.start, w.end).point;
        if q.dist(w.start) <= tol || q.dist(w.end) <= tol {
            return Err(EditorError::invalid_argument("at", "too close to a wall end"));
        }
        self.cancel();
        self.record();
        let mut walls: Vec<Wall> = self.state.walls.iter().filter(|x| x.id != id).cloned().collect();
        walls.push(Wall::new(w.start, q, w.thickness));
        walls.push(Wall::new(q, w.end, w.thickness));
        self.normalize_current(walls);
        debug!(%id, x = q.x, y = q.y, "wall split");
        Ok(())
    }

    pub fn set_wall_thickness(&mut self, id: WallId, value: f64) -> bool {
        self.try_set_wall_thickness(id, value).is_ok()
    }

    pub fn try_set_wall_thickness(&mut self, id: WallId, value: f64) -> Result<(), EditorError> {
        self.abort_drag();
        if !in_thickness_bounds(value) {
            return Err(EditorError::invalid_argument("thickness", format!("{value} is out of range")));
        }
        if self.wall(id).is_none() {
            return Err(EditorError::not_found("wall", id));
        }
        self.record();
        if let Some(w) = self.state.walls.iter_mut().find(|w| w.id == id) {
            w.thickness = value;
        }
        Ok(())
    }

    pub fn update_room(&mut self, id: RoomId, patch: RoomPatch) -> bool {
        self.try_update_room(id, patch).is_ok()
    }

    pub fn try_update_room(&mut self, id: RoomId, patch: RoomPatch) -> Result<(), EditorError> {
        self.abort_drag();
        if self.room(id).is_none() {
            return Err(EditorError::not_found("room", id));
        }
        if patch.name.is_none() && patch.color.is_none() {
            return Ok(());
        }
        self.record();
        if let Some(r) = self.state.rooms.iter_mut().find(|r| r.id == id) {
            if let Some(name) = patch.name {
                r.name = name;
            }
            if let Some(color) = patch.color {
                r.color = color;
            }
        }
        Ok(())
    }

    pub fn flip_opening(&mut self, kind: OpeningKind, id: OpeningId, axis: FlipAxis) -> bool {
        self.try_flip_opening(kind, id, axis).is_ok()
    }

    pub fn try_flip_opening(&mut self, kind: OpeningKind, id: OpeningId, axis: FlipAxis) -> Result<(), EditorError> {
        self.abort_drag();
        if kind == OpeningKind::Window && axis == FlipAxis::X {
            return Err(EditorError::invalid_argument("axis", "windows only flip across the wall"));
        }
        self.find_opening(kind, id)?;
        self.record();
        match kind {
            OpeningKind::Door => {
                if let Some(d) = self.state.doors.iter_mut().find(|d| d.id == id) {
                    match axis {
                        FlipAxis::X => d.flip_x = !d.flip_x,
                        FlipAxis::Y => d.flip_y = !d.flip_y,
                    }
                }
            }
            OpeningKind::Window => {
                if let Some(w) = self.state.windows.iter_mut().find(|w| w.id == id) {
                    w.flip_y = !w.flip_y;
                }
            }
        }
        Ok(())
    }

    pub fn set_opening_width(&mut self, kind: OpeningKind, id: OpeningId, width: f64) -> bool {
        self.try_set_opening_width(kind, id, width).is_ok()
    }

    pub fn try_set_opening_width(&mut self, kind: OpeningKind, id: OpeningId, width: f64) -> Result<(), EditorError> {
        self.abort_drag();
        if !in_opening_bounds(width) {
            return Err(EditorError::invalid_argument("width", format!("{width} is out of range")));
        }
        self.find_opening(kind, id)?;
        self.record();
        match kind {
            OpeningKind::Door => {
                if let Some(d) = self.state.doors.iter_mut().find(|d| d.id == id) {
                    d.width = width;
                }
            }
            OpeningKind::Window => {
                if let Some(w) = self.state.windows.iter_mut().find(|w| w.id == id) {
                    w.width = width;
                }
            }
        }
        Ok(())
    }

    fn find_opening(&self, kind: OpeningKind, id: OpeningId) -> Result<(), EditorError> {
        let found = match kind {
            OpeningKind::Door => self.state.doors.iter().any(|d| d.id == id),
            OpeningKind::Window => self.state.windows.iter().any(|w| w.id == id),
        };
        if found {
            Ok(())
        } else {
            Err(EditorError::not_found(opening_label(kind), id))
        }
    }

    // ---- persistence ----

    pub fn to_json_value(&self) -> Result<serde_json::Value, EditorError> {
        json::to_value(&self.state)
    }

    /// Loads a document, dropping invalid items. Returns how many were dropped.
    /// History is cleared.
    pub fn load_json_value(&mut self, v: serde_json::Value) -> Result<usize, EditorError> {
        let (snap, dropped) = json::from_value_lenient(v, self.config.point_tolerance)?;
        self.install(snap);
        Ok(dropped)
    }

    pub fn load_json_value_strict(&mut self, v: serde_json::Value) -> Result<(), EditorError> {
        let snap = json::from_value_strict(v, self.config.point_tolerance)?;
        self.install(snap);
        Ok(())
    }

    fn install(&mut self, snap: EditorSnapshot) {
        self.cancel();
        self.history.clear();
        self.selected.clear();
        self.hovered = None;
        let EditorSnapshot { walls, rooms, doors, windows } = snap;
        self.state = EditorSnapshot { walls: walls.clone(), rooms: Vec::new(), doors, windows };
        let before = walls.clone();
        self.normalize_from(&before, walls, &rooms);
    }
}

fn opening_label(kind: OpeningKind) -> &'static str {
    match kind {
        OpeningKind::Door => "door",
        OpeningKind::Window => "window",
    }
}

/// Ids in `after` that stand for wall `id` of `before`: the wall itself when it
/// survived, otherwise every fragment lying on its old geometry.
fn successors(id: WallId, before: &[Wall], after: &[Wall], tol: f64) -> Vec<WallId> {
    if after.iter().any(|w| w.id == id) {
        return vec![id];
    }
    let Some(old) = before.iter().find(|w| w.id == id) else {
        return Vec::new();
    };
    after
        .iter()
        .filter(|w| {
            is_point_on_segment(w.start, old.start, old.end, tol)
                && is_point_on_segment(w.end, old.start, old.end, tol)
        })
        .map(|w| w.id)
        .collect()
}
