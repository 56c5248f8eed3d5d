//! Document boundary: the editor state as a JSON value.
//!
//! The document is the snapshot verbatim: `{walls, rooms, doors, windows}`.
//! Lenient loading drops items that fail validation and reports how many were
//! dropped; strict loading rejects the whole document on the first one.

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::error::EditorError;
use crate::geometry::limits::{in_opening_bounds, in_thickness_bounds, point_in_bounds};
use crate::model::{Door, EditorSnapshot, Room, Wall, Window};

pub fn to_value(s: &EditorSnapshot) -> Result<Value, EditorError> {
    Ok(serde_json::to_value(s)?)
}

pub fn from_value_lenient(v: Value, tol: f64) -> Result<(EditorSnapshot, usize), EditorError> {
    let mut loader = Loader { strict: false, dropped: 0 };
    let snap = loader.load(v, tol)?;
    Ok((snap, loader.dropped))
}

pub fn from_value_strict(v: Value, tol: f64) -> Result<EditorSnapshot, EditorError> {
    Loader { strict: true, dropped: 0 }.load(v, tol)
}

struct Loader {
    strict: bool,
    dropped: usize,
}

impl Loader {
    fn reject(&mut self, what: &str, reason: String) -> Result<(), EditorError> {
        if self.strict {
            return Err(EditorError::invalid_document(format!("{what}: {reason}")));
        }
        warn!(item = what, %reason, "dropping invalid document item");
        self.dropped += 1;
        Ok(())
    }

    fn items<T: DeserializeOwned>(&mut self, root: &mut Value, key: &'static str) -> Result<Vec<T>, EditorError> {
        let raw = match root.get_mut(key).map(Value::take) {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(items)) => items,
            Some(_) => return Err(EditorError::invalid_document(format!("'{key}' must be an array"))),
        };
        let mut out = Vec::with_capacity(raw.len());
        for (i, item) in raw.into_iter().enumerate() {
            match serde_json::from_value::<T>(item) {
                Ok(x) => out.push(x),
                Err(e) => self.reject(key, format!("item {i}: {e}"))?,
            }
        }
        Ok(out)
    }

    fn load(&mut self, mut v: Value, tol: f64) -> Result<EditorSnapshot, EditorError> {
        if !v.is_object() {
            return Err(EditorError::invalid_document("document must be an object"));
        }
        let walls: Vec<Wall> = self.items(&mut v, "walls")?;
        let rooms: Vec<Room> = self.items(&mut v, "rooms")?;
        let doors: Vec<Door> = self.items(&mut v, "doors")?;
        let windows: Vec<Window> = self.items(&mut v, "windows")?;

        let mut snap = EditorSnapshot::default();
        let mut seen = HashSet::new();
        for w in walls {
            if !point_in_bounds(w.start) || !point_in_bounds(w.end) {
                self.reject("walls", format!("wall {} has out-of-range coordinates", w.id))?;
            } else if w.length() <= tol {
                self.reject("walls", format!("wall {} has no length", w.id))?;
            } else if !in_thickness_bounds(w.thickness) {
                self.reject("walls", format!("wall {} has invalid thickness {}", w.id, w.thickness))?;
            } else if !seen.insert(w.id) {
                self.reject("walls", format!("duplicate wall id {}", w.id))?;
            } else {
                snap.walls.push(w);
            }
        }

        let mut openings = HashSet::new();
        for d in doors {
            if let Some(reason) = opening_problem(&snap.walls, d.wall_id, d.t, d.width) {
                self.reject("doors", format!("door {}: {reason}", d.id))?;
            } else if !openings.insert(d.id) {
                self.reject("doors", format!("duplicate opening id {}", d.id))?;
            } else {
                snap.doors.push(d);
            }
        }
        for w in windows {
            if let Some(reason) = opening_problem(&snap.walls, w.wall_id, w.t, w.width) {
                self.reject("windows", format!("window {}: {reason}", w.id))?;
            } else if !in_opening_bounds(w.height) {
                self.reject("windows", format!("window {}: invalid height {}", w.id, w.height))?;
            } else if !openings.insert(w.id) {
                self.reject("windows", format!("duplicate opening id {}", w.id))?;
            } else {
                snap.windows.push(w);
            }
        }

        for r in rooms {
            if r.polygon.len() < 3 || !r.polygon.iter().all(|p| p.is_finite()) {
                self.reject("rooms", format!("room {} has an invalid polygon", r.id))?;
            } else {
                snap.rooms.push(r);
            }
        }
        Ok(snap)
    }
}

fn opening_problem(walls: &[Wall], wall_id: crate::model::WallId, t: f64, width: f64) -> Option<String> {
    if !walls.iter().any(|w| w.id == wall_id) {
        return Some(format!("references missing wall {wall_id}"));
    }
    if !(t.is_finite() && (0.0..=1.0).contains(&t)) {
        return Some(format!("t {t} outside [0, 1]"));
    }
    if !in_opening_bounds(width) {
        return Some(format!("invalid width {width}"));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn from_str_lenient(s: &str, tol: f64) -> Result<(EditorSnapshot, usize), EditorError> {
        from_value_lenient(serde_json::from_str(s)?, tol)
    }

    #[test]
    fn lenient_drops_and_counts() {
        let v = json!({
            "walls": [
                {"id": "6f1c1b9e-52f4-4c38-9d63-0f3e2a0b1a01", "start": {"x": 0, "y": 0}, "end": {"x": 400, "y": 0}, "thickness": 15},
                {"id": "6f1c1b9e-52f4-4c38-9d63-0f3e2a0b1a02", "start": {"x": 5, "y": 5}, "end": {"x": 5, "y": 5}, "thickness": 15},
                {"nonsense": true}
            ],
            "doors": [
                {"id": "6f1c1b9e-52f4-4c38-9d63-0f3e2a0b1b01", "wall_id": "6f1c1b9e-52f4-4c38-9d63-0f3e2a0b1a01", "t": 0.5, "width": 90},
                {"id": "6f1c1b9e-52f4-4c38-9d63-0f3e2a0b1b02", "wall_id": "6f1c1b9e-52f4-4c38-9d63-0f3e2a0b1a02", "t": 0.5, "width": 90}
            ]
        });
        let (snap, dropped) = from_value_lenient(v.clone(), 1.0).unwrap();
        assert_eq!(snap.walls.len(), 1);
        assert_eq!(snap.doors.len(), 1);
        assert_eq!(dropped, 3);

        let e = from_value_strict(v, 1.0).unwrap_err();
        assert_eq!(e.code(), "invalid_document");
    }

    #[test]
    fn non_object_rejected() {
        assert!(from_value_lenient(json!([1, 2]), 1.0).is_err());
        assert_eq!(from_str_lenient("{", 1.0).unwrap_err().code(), "json");
        let (snap, dropped) = from_value_lenient(json!({}), 1.0).unwrap();
        assert_eq!(snap, EditorSnapshot::default());
        assert_eq!(dropped, 0);
    }
}
