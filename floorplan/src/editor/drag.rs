// Select-mode gestures: whole-wall drag and vertex drag.
//
// Every move is computed from the gesture-start snapshot, never from the
// previous move, so long drags do not accumulate error. Rooms shown during a
// drag come from the unfragmented walls; the exact plan is only produced on
// pointer-up.

use tracing::trace;

use super::Editor;
use crate::algorithms::picking::{pick, pick_wall, Pick, WallEnd};
use crate::algorithms::rooms::detect_rooms_with_tolerance;
use crate::geometry::math::are_parallel;
use crate::geometry::tolerance::EPS_LEN;
use crate::model::{EditorSnapshot, Orientation, Point, Wall, WallId};

pub(super) struct DragState {
    origin: Point,
    start: EditorSnapshot,
    kind: DragKind,
}

impl DragState {
    pub(super) fn into_start(self) -> EditorSnapshot {
        self.start
    }
}

enum DragKind {
    Wall {
        id: WallId,
        orientation: Orientation,
        links: Vec<Link>,
    },
    Vertex {
        vertex: Point,
        walls: Vec<WallId>,
    },
}

// A wall attached to one end of the dragged wall.
struct Link {
    neighbour: WallId,
    end: WallEnd,
    parallel: bool,
    // Id reserved for the jog wall so every move emits the same one.
    jog: WallId,
}

fn endpoint(w: &Wall, end: WallEnd) -> Point {
    match end {
        WallEnd::Start => w.start,
        WallEnd::End => w.end,
    }
}

fn endpoint_mut(w: &mut Wall, end: WallEnd) -> &mut Point {
    match end {
        WallEnd::Start => &mut w.start,
        WallEnd::End => &mut w.end,
    }
}

fn links_of(walls: &[Wall], dragged: &Wall, tol: f64) -> Vec<Link> {
    let mut links = Vec::new();
    for w in walls.iter().filter(|w| w.id != dragged.id) {
        for end in [WallEnd::Start, WallEnd::End] {
            if dragged.has_endpoint(endpoint(w, end), tol) {
                links.push(Link {
                    neighbour: w.id,
                    end,
                    parallel: are_parallel(w.direction(), dragged.direction()),
                    jog: WallId::new(),
                });
            }
        }
    }
    links
}

/// Axis-aligned walls only move along their normal.
fn constrain(delta: Point, orientation: Orientation) -> Point {
    match orientation {
        Orientation::Horizontal => Point::new(0.0, delta.y),
        Orientation::Vertical => Point::new(delta.x, 0.0),
        Orientation::Diagonal => delta,
    }
}

impl Editor {
    pub(super) fn select_down(&mut self, p: Point) {
        let tol = self.config.point_tolerance;
        match pick(&self.state.walls, p, self.config.pick_tolerance) {
            Some(Pick::Vertex { wall, point, .. }) => {
                self.hovered = Some(wall);
                let walls = self.vertex_group(wall, point);
                self.drag = Some(DragState {
                    origin: p,
                    start: self.state.clone(),
                    kind: DragKind::Vertex { vertex: point, walls },
                });
            }
            Some(Pick::Wall { id, .. }) => {
                self.hovered = Some(id);
                if !self.selected.contains(&id) {
                    self.selected = vec![id];
                }
                let Some(dragged) = self.wall(id).cloned() else {
                    return;
                };
                let links = links_of(&self.state.walls, &dragged, tol);
                self.drag = Some(DragState {
                    origin: p,
                    start: self.state.clone(),
                    kind: DragKind::Wall { id, orientation: dragged.orientation(), links },
                });
            }
            None => {
                self.selected.clear();
                self.hovered = None;
            }
        }
    }

    // Selected walls touching the vertex; the picked wall alone when none of
    // the selection does.
    fn vertex_group(&self, picked: WallId, vertex: Point) -> Vec<WallId> {
        let tol = self.config.point_tolerance;
        let group: Vec<WallId> = self
            .state
            .walls
            .iter()
            .filter(|w| self.selected.contains(&w.id) && w.has_endpoint(vertex, tol))
            .map(|w| w.id)
            .collect();
        if group.is_empty() {
            vec![picked]
        } else {
            group
        }
    }

    pub(super) fn select_move(&mut self, p: Point) {
        let Some(drag) = self.drag.take() else {
            self.hovered = match pick_wall(&self.state.walls, p, self.config.pick_tolerance) {
                Some(Pick::Wall { id, .. }) => Some(id),
                _ => None,
            };
            return;
        };
        let walls = match &drag.kind {
            DragKind::Wall { id, orientation, links } => {
                let delta = constrain(p.sub(drag.origin), *orientation);
                Some(move_wall(&drag.start.walls, *id, links, delta))
            }
            DragKind::Vertex { vertex, walls } => {
                let raw = vertex.add(p.sub(drag.origin));
                let target = self.snap_vertex_target(raw, *vertex, walls, &drag.start.walls);
                move_vertex(&drag.start.walls, *vertex, walls, target, self.config.point_tolerance)
            }
        };
        if let Some(walls) = walls {
            trace!(x = p.x, y = p.y, walls = walls.len(), "drag move");
            if self.config.live_room_preview {
                self.state.rooms =
                    detect_rooms_with_tolerance(&walls, &drag.start.rooms, self.config.point_tolerance);
            }
            self.state.walls = walls;
        }
        self.drag = Some(drag);
    }

    pub(super) fn select_up(&mut self, p: Point) {
        if self.drag.is_none() {
            return;
        }
        self.select_move(p);
        let Some(drag) = self.drag.take() else {
            return;
        };
        if self.state.walls == drag.start.walls {
            self.state = drag.start;
            return;
        }
        let moved = std::mem::take(&mut self.state.walls);
        self.history.record(drag.start.clone());
        self.normalize_from(&moved.clone(), moved, &drag.start.rooms);
    }

    // Vertex snap first, then per-axis snap onto the fixed ends of the
    // dragged walls.
    fn snap_vertex_target(&self, raw: Point, vertex: Point, ids: &[WallId], walls: &[Wall]) -> Point {
        if !self.config.snapping {
            return raw;
        }
        let tol = self.config.point_tolerance;
        let r = self.config.snap_radius;
        let mut best: Option<(f64, Point)> = None;
        for w in walls.iter().filter(|w| !ids.contains(&w.id)) {
            for q in [w.start, w.end] {
                let d = q.dist(raw);
                if d <= r && best.map_or(true, |(bd, _)| d < bd) {
                    best = Some((d, q));
                }
            }
        }
        if let Some((_, q)) = best {
            return q;
        }
        let mut out = raw;
        let (mut bx, mut by) = (r, r);
        for w in walls.iter().filter(|w| ids.contains(&w.id)) {
            let fixed = if w.start.dist(vertex) <= tol { w.end } else { w.start };
            let dx = (raw.x - fixed.x).abs();
            if dx <= bx {
                bx = dx;
                out.x = fixed.x;
            }
            let dy = (raw.y - fixed.y).abs();
            if dy <= by {
                by = dy;
                out.y = fixed.y;
            }
        }
        out
    }
}

fn move_wall(start: &[Wall], id: WallId, links: &[Link], delta: Point) -> Vec<Wall> {
    let mut walls = start.to_vec();
    if delta.norm() <= EPS_LEN {
        return walls;
    }
    if let Some(w) = walls.iter_mut().find(|w| w.id == id) {
        w.start = w.start.add(delta);
        w.end = w.end.add(delta);
    }
    let mut jogs = Vec::new();
    for link in links {
        let Some(n) = walls.iter_mut().find(|w| w.id == link.neighbour) else {
            continue;
        };
        let at = endpoint(n, link.end);
        if link.parallel {
            jogs.push(Wall {
                id: link.jog,
                start: at,
                end: at.add(delta),
                thickness: n.thickness,
            });
        } else {
            *endpoint_mut(n, link.end) = at.add(delta);
        }
    }
    walls.extend(jogs);
    walls
}

// None when the move would collapse one of the dragged walls.
fn move_vertex(start: &[Wall], vertex: Point, ids: &[WallId], target: Point, tol: f64) -> Option<Vec<Wall>> {
    let mut walls = start.to_vec();
    for w in walls.iter_mut().filter(|w| ids.contains(&w.id)) {
        if w.start.dist(vertex) <= tol {
            w.start = target;
        }
        if w.end.dist(vertex) <= tol {
            w.end = target;
        }
        if w.length() <= tol {
            return None;
        }
    }
    Some(walls)
}
