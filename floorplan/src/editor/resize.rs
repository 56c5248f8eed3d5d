use std::collections::VecDeque;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Editor;
use crate::error::EditorError;
use crate::geometry::limits::in_length_bounds;
use crate::geometry::math::unit;
use crate::geometry::tolerance::{AXIS_SLOPE, EPS_LEN};
use crate::model::{Orientation, Point, Wall, WallId};

/// Which end of a wall stays put when its length is typed in. `Left` is the
/// endpoint with the smaller x (smaller y on vertical walls).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorSide {
    #[default]
    Left,
    Right,
}

impl FromStr for AnchorSide {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(AnchorSide::Left),
            "right" => Ok(AnchorSide::Right),
            other => Err(EditorError::invalid_argument("anchor", format!("unknown side '{other}'"))),
        }
    }
}

fn left_first(w: &Wall) -> bool {
    (w.start.x, w.start.y) <= (w.end.x, w.end.y)
}

impl Editor {
    pub fn set_wall_length(&mut self, id: WallId, length: f64, anchor: AnchorSide) -> bool {
        self.try_set_wall_length(id, length, anchor).is_ok()
    }

    /// Moves the non-anchor end of a wall so it measures `length`, dragging the
    /// rest of the plan that hangs off that end along with it.
    pub fn try_set_wall_length(&mut self, id: WallId, length: f64, anchor: AnchorSide) -> Result<(), EditorError> {
        self.abort_drag();
        let tol = self.config.point_tolerance;
        if !in_length_bounds(length) || length <= tol {
            return Err(EditorError::invalid_argument("length", format!("{length} is out of range")));
        }
        let w = self.wall(id).cloned().ok_or_else(|| EditorError::not_found("wall", id))?;
        let Some(walls) = resized(&self.state.walls, &w, length, anchor, tol) else {
            return Ok(());
        };
        self.cancel();
        self.record();
        // Ids are kept by `resized`, so openings bind against the moved set.
        let previous = self.state.rooms.clone();
        self.normalize_from(&walls, walls.clone(), &previous);
        debug!(%id, length, ?anchor, "wall length set");
        Ok(())
    }
}

/// The wall set after resizing `w`, or `None` when nothing moves.
fn resized(walls: &[Wall], w: &Wall, length: f64, anchor: AnchorSide, tol: f64) -> Option<Vec<Wall>> {
    let anchor_is_start = left_first(w) == (anchor == AnchorSide::Left);
    let (fixed, moving) = if anchor_is_start { (w.start, w.end) } else { (w.end, w.start) };
    let v = moving.sub(fixed);
    let dir = match w.orientation() {
        Orientation::Horizontal => Point::new(v.x.signum(), 0.0),
        Orientation::Vertical => Point::new(0.0, v.y.signum()),
        Orientation::Diagonal => unit(v)?,
    };
    let target = fixed.add(dir.scale(length));
    let delta = target.sub(moving);

    let mut out = walls.to_vec();
    let mut done = vec![false; out.len()];
    let me = out.iter().position(|x| x.id == w.id)?;
    done[me] = true;
    if anchor_is_start {
        out[me].end = target;
    } else {
        out[me].start = target;
    }
    // Straighten the anchor side of a near-axis wall as well.
    if anchor_is_start {
        out[me].start = fixed;
    } else {
        out[me].end = fixed;
    }
    if delta.norm() <= EPS_LEN {
        return (out[me] != *w).then_some(out);
    }

    let delta_dir = unit(delta)?;
    let mut queue = VecDeque::from([moving]);
    while let Some(v) = queue.pop_front() {
        for i in 0..out.len() {
            if done[i] {
                continue;
            }
            let at_start = walls[i].start.dist(v) <= tol;
            let at_end = walls[i].end.dist(v) <= tol;
            if !at_start && !at_end {
                continue;
            }
            done[i] = true;
            let other = if at_start { walls[i].end } else { walls[i].start };
            let perpendicular = unit(walls[i].direction())
                .map_or(false, |u| u.dot(delta_dir).abs() <= AXIS_SLOPE);
            if perpendicular && other.dist(fixed) > tol {
                out[i].start = walls[i].start.add(delta);
                out[i].end = walls[i].end.add(delta);
                queue.push_back(other);
            } else if at_start {
                out[i].start = walls[i].start.add(delta);
            } else {
                out[i].end = walls[i].end.add(delta);
            }
        }
    }
    Some(out)
}
