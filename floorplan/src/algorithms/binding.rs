//! Keeps doors and windows attached to the wall graph.
//!
//! An opening is stored as `(wall_id, t)`. Fragmentation retires ids and
//! moves change geometry, so after every topology change each opening is
//! turned back into an absolute point on the wall it was bound to before the
//! change, and that point is looked up again among the new walls.

use tracing::warn;

use crate::geometry::math::{are_parallel, closest_point_on_segment, is_point_on_segment};
use crate::model::{Door, Point, Wall, WallId, Window};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Binding {
    pub wall_id: WallId,
    pub t: f64,
    /// New host runs opposite to the old one.
    pub reversed: bool,
}

/// Absolute position and host direction of an opening on `walls`.
pub fn anchor(walls: &[Wall], wall_id: WallId, t: f64) -> Option<(Point, Point)> {
    let w = walls.iter().find(|w| w.id == wall_id)?;
    Some((w.point_at(t), w.direction()))
}

/// Finds the wall containing `point` within `tol`. Among several hosts (the
/// point sits on a shared vertex) walls parallel to `dir` win, then the
/// closest one.
pub fn resolve(walls: &[Wall], point: Point, dir: Point, tol: f64) -> Option<Binding> {
    let mut best: Option<(u8, f64, Binding)> = None;
    for w in walls {
        if !is_point_on_segment(point, w.start, w.end, tol) {
            continue;
        }
        let pr = closest_point_on_segment(point, w.start, w.end);
        let rank = if are_parallel(dir, w.direction()) { 0 } else { 1 };
        let d = pr.point.dist(point);
        let better = best.map_or(true, |(br, bd, _)| rank < br || (rank == br && d < bd));
        if better {
            best = Some((
                rank,
                d,
                Binding {
                    wall_id: w.id,
                    t: pr.t,
                    reversed: dir.dot(w.direction()) < 0.0,
                },
            ));
        }
    }
    best.map(|(_, _, b)| b)
}

/// Re-resolves every opening from `before` onto `after`. Openings whose host
/// cannot be found are removed. Returns how many were dropped.
pub fn rebind_openings(
    before: &[Wall],
    after: &[Wall],
    doors: &mut Vec<Door>,
    windows: &mut Vec<Window>,
    tol: f64,
) -> usize {
    let mut dropped = 0usize;
    doors.retain_mut(|d| {
        let found = anchor(before, d.wall_id, d.t).and_then(|(p, dir)| resolve(after, p, dir, tol));
        match found {
            Some(b) => {
                d.wall_id = b.wall_id;
                d.t = b.t;
                if b.reversed {
                    d.flip_x = !d.flip_x;
                }
                true
            }
            None => {
                warn!(door = %d.id, "door lost its wall; removed");
                dropped += 1;
                false
            }
        }
    });
    windows.retain_mut(|w| {
        let found = anchor(before, w.wall_id, w.t).and_then(|(p, dir)| resolve(after, p, dir, tol));
        match found {
            Some(b) => {
                w.wall_id = b.wall_id;
                w.t = b.t;
                true
            }
            None => {
                warn!(window = %w.id, "window lost its wall; removed");
                dropped += 1;
                false
            }
        }
    });
    dropped
}
