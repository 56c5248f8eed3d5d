use crate::Editor;
use floorplan::{AnchorSide, EditorConfig, Point, RoomPatch, Tool};
use wasm_bindgen::prelude::*;
type JsValue = wasm_bindgen::JsValue;
use crate::error;
use crate::interop::{self, to_js};

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn finite2(x: f64, y: f64) -> Result<Point, JsValue> {
    if !x.is_finite() {
        return Err(error::non_finite("x"));
    }
    if !y.is_finite() {
        return Err(error::non_finite("y"));
    }
    Ok(Point::new(x, y))
}

#[wasm_bindgen]
impl Editor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Editor {
        crate::Editor::rs_new()
    }

    /// Builds an editor from a JSON config; throws a `{ok:false, error}` object
    /// when the config is rejected.
    pub fn with_config(json: &str) -> Result<Editor, JsValue> {
        let cfg = EditorConfig::from_json_str(json).map_err(error::from_editor)?;
        floorplan::Editor::with_config(cfg)
            .map(|inner| Editor { inner })
            .map_err(error::from_editor)
    }

    // Pointer input, in plan coordinates (cm)
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.inner.on_pointer_down(Point::new(x, y));
    }
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.inner.on_pointer_move(Point::new(x, y));
    }
    pub fn pointer_up(&mut self, x: f64, y: f64) {
        self.inner.on_pointer_up(Point::new(x, y));
    }
    pub fn cancel(&mut self) {
        self.inner.cancel();
    }

    // Tools
    pub fn set_tool(&mut self, tool: &str) -> bool {
        match tool.parse::<Tool>() {
            Ok(t) => {
                self.inner.set_tool(t);
                true
            }
            Err(_) => false,
        }
    }
    pub fn set_tool_res(&mut self, tool: &str) -> JsValue {
        match tool.parse::<Tool>() {
            Ok(t) => {
                self.inner.set_tool(t);
                error::ok(JsValue::TRUE)
            }
            Err(_) => error::invalid_value("tool", tool, "select|wall|door|window|ruler"),
        }
    }
    pub fn tool(&self) -> String {
        self.inner.tool().as_str().to_string()
    }
    pub fn set_snapping(&mut self, on: bool) {
        self.inner.set_snapping(on);
    }

    // History
    pub fn undo(&mut self) -> bool {
        self.inner.undo()
    }
    pub fn redo(&mut self) -> bool {
        self.inner.redo()
    }
    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }
    pub fn can_redo(&self) -> bool {
        self.inner.can_redo()
    }
    pub fn clear_all(&mut self) {
        self.inner.clear_all();
    }

    // Walls
    pub fn add_wall(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> bool {
        self.inner.add_wall(Point::new(x0, y0), Point::new(x1, y1))
    }
    pub fn add_wall_res(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> JsValue {
        let (a, b) = match (finite2(x0, y0), finite2(x1, y1)) {
            (Ok(a), Ok(b)) => (a, b),
            (Err(e), _) | (_, Err(e)) => return e,
        };
        error::ok(JsValue::from_bool(self.inner.add_wall(a, b)))
    }
    pub fn delete_wall(&mut self, id: &str) -> bool {
        interop::wall_id(id).map_or(false, |w| self.inner.delete_wall(w))
    }
    pub fn delete_wall_res(&mut self, id: &str) -> JsValue {
        let Some(w) = interop::wall_id(id) else {
            return error::invalid_id("wall", id);
        };
        error::result(self.inner.try_delete_wall(w))
    }
    pub fn split_wall(&mut self, id: &str, x: Option<f64>, y: Option<f64>) -> bool {
        let at = x.zip(y).map(|(x, y)| Point::new(x, y));
        interop::wall_id(id).map_or(false, |w| self.inner.split_wall(w, at))
    }
    pub fn split_wall_res(&mut self, id: &str, x: Option<f64>, y: Option<f64>) -> JsValue {
        let Some(w) = interop::wall_id(id) else {
            return error::invalid_id("wall", id);
        };
        let at = match x.zip(y) {
            Some((x, y)) => match finite2(x, y) {
                Ok(p) => Some(p),
                Err(e) => return e,
            },
            None => None,
        };
        error::result(self.inner.try_split_wall(w, at))
    }
    pub fn set_wall_thickness(&mut self, id: &str, value: f64) -> bool {
        interop::wall_id(id).map_or(false, |w| self.inner.set_wall_thickness(w, value))
    }
    pub fn set_wall_thickness_res(&mut self, id: &str, value: f64) -> JsValue {
        let Some(w) = interop::wall_id(id) else {
            return error::invalid_id("wall", id);
        };
        if !value.is_finite() {
            return error::non_finite("value");
        }
        error::result(self.inner.try_set_wall_thickness(w, value))
    }
    pub fn set_wall_length(&mut self, id: &str, value: f64, anchor: &str) -> bool {
        match (interop::wall_id(id), anchor.parse::<AnchorSide>()) {
            (Some(w), Ok(side)) => self.inner.set_wall_length(w, value, side),
            _ => false,
        }
    }
    pub fn set_wall_length_res(&mut self, id: &str, value: f64, anchor: &str) -> JsValue {
        let Some(w) = interop::wall_id(id) else {
            return error::invalid_id("wall", id);
        };
        let Ok(side) = anchor.parse::<AnchorSide>() else {
            return error::invalid_value("anchor", anchor, "left|right");
        };
        if !value.is_finite() {
            return error::non_finite("value");
        }
        error::result(self.inner.try_set_wall_length(w, value, side))
    }

    // Selection
    pub fn select_wall(&mut self, id: &str) -> bool {
        interop::wall_id(id).map_or(false, |w| self.inner.select_wall(w))
    }
    pub fn toggle_wall_selection(&mut self, id: &str) -> bool {
        interop::wall_id(id).map_or(false, |w| self.inner.toggle_wall_selection(w))
    }
    pub fn clear_selection(&mut self) {
        self.inner.clear_selection();
    }

    // Openings
    pub fn add_door(&mut self, wall_id: &str, t: f64) -> Option<String> {
        let w = interop::wall_id(wall_id)?;
        self.inner.add_door(w, t).map(|id| id.to_string())
    }
    pub fn add_window(&mut self, wall_id: &str, t: f64) -> Option<String> {
        let w = interop::wall_id(wall_id)?;
        self.inner.add_window(w, t).map(|id| id.to_string())
    }
    pub fn delete_opening(&mut self, kind: &str, id: &str) -> bool {
        match (interop::opening_kind(kind), interop::opening_id(id)) {
            (Some(k), Some(o)) => self.inner.delete_opening(k, o),
            _ => false,
        }
    }
    pub fn delete_opening_res(&mut self, kind: &str, id: &str) -> JsValue {
        let Some(k) = interop::opening_kind(kind) else {
            return error::invalid_value("kind", kind, "door|window");
        };
        let Some(o) = interop::opening_id(id) else {
            return error::invalid_id(kind, id);
        };
        error::result(self.inner.try_delete_opening(k, o))
    }
    pub fn flip_opening(&mut self, kind: &str, id: &str, axis: &str) -> bool {
        match (interop::opening_kind(kind), interop::opening_id(id), interop::flip_axis(axis)) {
            (Some(k), Some(o), Some(a)) => self.inner.flip_opening(k, o, a),
            _ => false,
        }
    }
    pub fn flip_opening_res(&mut self, kind: &str, id: &str, axis: &str) -> JsValue {
        let Some(k) = interop::opening_kind(kind) else {
            return error::invalid_value("kind", kind, "door|window");
        };
        let Some(o) = interop::opening_id(id) else {
            return error::invalid_id(kind, id);
        };
        let Some(a) = interop::flip_axis(axis) else {
            return error::invalid_value("axis", axis, "x|y");
        };
        error::result(self.inner.try_flip_opening(k, o, a))
    }
    pub fn set_opening_width(&mut self, kind: &str, id: &str, width: f64) -> bool {
        match (interop::opening_kind(kind), interop::opening_id(id)) {
            (Some(k), Some(o)) => self.inner.set_opening_width(k, o, width),
            _ => false,
        }
    }
    pub fn set_opening_width_res(&mut self, kind: &str, id: &str, width: f64) -> JsValue {
        let Some(k) = interop::opening_kind(kind) else {
            return error::invalid_value("kind", kind, "door|window");
        };
        let Some(o) = interop::opening_id(id) else {
            return error::invalid_id(kind, id);
        };
        if !width.is_finite() {
            return error::non_finite("width");
        }
        error::result(self.inner.try_set_opening_width(k, o, width))
    }

    // Rooms
    pub fn update_room(&mut self, id: &str, patch: JsValue) -> bool {
        let Some(r) = interop::room_id(id) else {
            return false;
        };
        match serde_wasm_bindgen::from_value::<RoomPatch>(patch) {
            Ok(p) => self.inner.update_room(r, p),
            Err(_) => false,
        }
    }
    pub fn update_room_res(&mut self, id: &str, patch: JsValue) -> JsValue {
        let Some(r) = interop::room_id(id) else {
            return error::invalid_id("room", id);
        };
        match serde_wasm_bindgen::from_value::<RoomPatch>(patch) {
            Ok(p) => error::result(self.inner.try_update_room(r, p)),
            Err(e) => error::err("invalid_patch", e.to_string(), None),
        }
    }

    // Read model
    pub fn view(&self) -> JsValue {
        to_js(&self.inner.view())
    }
    pub fn get_walls(&self) -> JsValue {
        to_js(self.inner.walls())
    }
    pub fn get_rooms(&self) -> JsValue {
        to_js(self.inner.rooms())
    }
    pub fn get_doors(&self) -> JsValue {
        to_js(self.inner.doors())
    }
    pub fn get_windows(&self) -> JsValue {
        to_js(self.inner.windows())
    }
    pub fn wall_count(&self) -> u32 {
        self.inner.walls().len() as u32
    }
    pub fn room_count(&self) -> u32 {
        self.inner.rooms().len() as u32
    }
    /// Flat `[x0, y0, x1, y1, ...]` per wall, in wall order.
    pub fn wall_coords(&self) -> js_sys::Float64Array {
        let mut out = Vec::with_capacity(self.inner.walls().len() * 4);
        for w in self.inner.walls() {
            out.extend_from_slice(&[w.start.x, w.start.y, w.end.x, w.end.y]);
        }
        interop::arr_f64(&out)
    }
    pub fn get_ruler(&self) -> JsValue {
        self.inner.ruler().map_or(JsValue::NULL, |r| to_js(&r))
    }
    pub fn get_current_wall(&self) -> JsValue {
        self.inner.current_wall().map_or(JsValue::NULL, |d| to_js(&d))
    }

    // Document boundary
    pub fn to_json(&self) -> JsValue {
        match self.inner.to_json_value() {
            Ok(v) => to_js(&v),
            Err(_) => JsValue::NULL,
        }
    }
    pub fn from_json(&mut self, v: JsValue) -> bool {
        let Ok(val) = serde_wasm_bindgen::from_value::<serde_json::Value>(v) else {
            return false;
        };
        match self.inner.load_json_value(val) {
            Ok(0) => true,
            Ok(dropped) => {
                web_sys::console::warn_1(&JsValue::from_str(&format!(
                    "floorplan: dropped {dropped} invalid item(s) while loading"
                )));
                true
            }
            Err(_) => false,
        }
    }
    pub fn from_json_res(&mut self, v: JsValue) -> JsValue {
        match serde_wasm_bindgen::from_value::<serde_json::Value>(v) {
            Ok(val) => error::result(self.inner.load_json_value_strict(val)),
            Err(e) => error::err("json_parse", format!("{}", e), None),
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Editor::new()
    }
}
