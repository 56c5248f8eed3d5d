//! Room detection over the wall graph.
//!
//! Walls are merged into a planar graph (endpoints within tolerance become one
//! vertex), every undirected edge yields two half-edges, and faces are traced
//! by always leaving a vertex through the next outgoing half-edge
//! counter-clockwise from the one we arrived on. Under that rule a bounded
//! face is walked clockwise (negative signed area) and the outline of each
//! connected component is walked counter-clockwise (positive), so rooms are
//! exactly the negative walks.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::geometry::math::{
    drop_collinear, point_in_polygon, polygon_centroid, polygon_signed_area, visual_center,
};
use crate::geometry::tolerance::{
    CM2_PER_M2, MIN_ROOM_AREA_CM2, POINT_TOL, ROOM_MATCH_AREA_RATIO, ROOM_MATCH_CENTROID_DIST,
};
use crate::model::{Color, Point, Room, RoomId, Wall};

#[cfg(feature = "region_prof")]
use std::time::Instant;

pub const ROOM_PALETTE: [Color; 8] = [
    Color::rgb(0xE3, 0xF2, 0xFD),
    Color::rgb(0xFF, 0xF3, 0xE0),
    Color::rgb(0xE8, 0xF5, 0xE9),
    Color::rgb(0xF3, 0xE5, 0xF5),
    Color::rgb(0xFF, 0xEB, 0xEE),
    Color::rgb(0xE0, 0xF7, 0xFA),
    Color::rgb(0xFF, 0xFD, 0xE7),
    Color::rgb(0xEF, 0xEB, 0xE9),
];

/// Planar graph built from wall endpoints.
#[derive(Debug, Clone, Default)]
pub struct WallGraph {
    pub verts: Vec<Point>,
    pub half_from: Vec<usize>,
    pub half_to: Vec<usize>,
}

impl WallGraph {
    pub fn from_walls(walls: &[Wall], tol: f64) -> Self {
        let mut g = WallGraph::default();
        let mut seen: HashSet<(usize, usize)> = HashSet::new();
        for w in walls {
            if !w.start.is_finite() || !w.end.is_finite() {
                continue;
            }
            let u = g.vertex_for(w.start, tol);
            let v = g.vertex_for(w.end, tol);
            if u == v {
                continue;
            }
            let key = if u < v { (u, v) } else { (v, u) };
            if !seen.insert(key) {
                continue;
            }
            // Half-edges come in twin pairs: 2k and 2k+1
            g.half_from.push(u);
            g.half_to.push(v);
            g.half_from.push(v);
            g.half_to.push(u);
        }
        g
    }

    fn vertex_for(&mut self, p: Point, tol: f64) -> usize {
        if let Some(i) = self.verts.iter().position(|q| q.dist(p) <= tol) {
            return i;
        }
        self.verts.push(p);
        self.verts.len() - 1
    }

    pub fn edge_count(&self) -> usize {
        self.half_from.len() / 2
    }

    pub fn degrees(&self) -> Vec<usize> {
        let mut deg = vec![0usize; self.verts.len()];
        for &u in &self.half_from {
            deg[u] += 1;
        }
        deg
    }

    /// Connected component label per vertex.
    pub fn components(&self) -> Vec<usize> {
        let mut parent: Vec<usize> = (0..self.verts.len()).collect();
        fn find(parent: &mut [usize], mut x: usize) -> usize {
            while parent[x] != x {
                parent[x] = parent[parent[x]];
                x = parent[x];
            }
            x
        }
        for h in (0..self.half_from.len()).step_by(2) {
            let a = find(&mut parent, self.half_from[h]);
            let b = find(&mut parent, self.half_to[h]);
            if a != b {
                parent[a] = b;
            }
        }
        (0..self.verts.len()).map(|v| find(&mut parent, v)).collect()
    }

    /// Half-edge cycles of every face walk.
    fn half_edge_walks(&self) -> Vec<Vec<usize>> {
        let m = self.half_from.len();
        let verts = &self.verts;
        let mut adj: Vec<Vec<(f64, usize)>> = vec![Vec::new(); verts.len()];
        for h in 0..m {
            let (u, v) = (self.half_from[h], self.half_to[h]);
            let ang = (verts[v].y - verts[u].y).atan2(verts[v].x - verts[u].x);
            adj[u].push((ang, h));
        }
        let mut pos_in_adj = vec![0usize; m];
        for lst in &mut adj {
            lst.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
            for (i, &(_, h)) in lst.iter().enumerate() {
                pos_in_adj[h] = i;
            }
        }

        let mut used = vec![false; m];
        let mut walks = Vec::new();
        for start in 0..m {
            if used[start] {
                continue;
            }
            let mut h = start;
            let mut cycle: Vec<usize> = Vec::new();
            let mut guard = 0usize;
            loop {
                used[h] = true;
                cycle.push(h);
                let v = self.half_to[h];
                let twin = h ^ 1;
                let lst = &adj[v];
                let next = lst[(pos_in_adj[twin] + 1) % lst.len()].1;
                h = next;
                guard += 1;
                if h == start || used[h] || guard > m {
                    break;
                }
            }
            walks.push(cycle);
        }
        walks
    }

    /// The same graph minus every edge that has one face on both sides:
    /// dangling walls, free-standing walls and bridges to inner loops.
    /// Removing such an edge never merges two faces, so one pass is enough.
    pub fn without_bridges(&self) -> WallGraph {
        let mut walk_of = vec![usize::MAX; self.half_from.len()];
        for (i, walk) in self.half_edge_walks().iter().enumerate() {
            for &h in walk {
                walk_of[h] = i;
            }
        }
        let mut g = WallGraph { verts: self.verts.clone(), ..WallGraph::default() };
        for h in (0..self.half_from.len()).step_by(2) {
            if walk_of[h] == walk_of[h + 1] {
                continue;
            }
            g.half_from.extend([self.half_from[h], self.half_from[h + 1]]);
            g.half_to.extend([self.half_to[h], self.half_to[h + 1]]);
        }
        g
    }

    /// Vertex cycles of every face walk. Run on a bridge-free graph each one
    /// is a simple polygon.
    pub fn face_walks(&self) -> Vec<Vec<usize>> {
        self.half_edge_walks()
            .into_iter()
            .map(|walk| walk.into_iter().map(|h| self.half_from[h]).collect::<Vec<_>>())
            .filter(|cycle| cycle.len() >= 3)
            .collect()
    }
}

#[derive(Clone, Debug)]
struct Face {
    polygon: Vec<Point>,
    area_cm2: f64,
    center: Option<Point>,
    centroid: Point,
}

/// Derives rooms from an already fragmented wall set, carrying id, name and
/// color over from `previous` where a detected face matches a known room.
pub fn detect_rooms(walls: &[Wall], previous: &[Room]) -> Vec<Room> {
    detect_rooms_with_tolerance(walls, previous, POINT_TOL)
}

pub fn detect_rooms_with_tolerance(walls: &[Wall], previous: &[Room], tol: f64) -> Vec<Room> {
    #[cfg(feature = "region_prof")]
    let t_all = Instant::now();

    // An inner loop tied to its room by a bridge becomes its own component
    // here, so it is subtracted as a hole like a free-standing one.
    let graph = WallGraph::from_walls(walls, tol).without_bridges();
    let comp = graph.components();

    let mut faces: Vec<(Face, usize)> = Vec::new();
    let mut outlines: Vec<(Vec<Point>, f64, usize)> = Vec::new();
    for walk in graph.face_walks() {
        let mut poly: Vec<Point> = walk.iter().map(|&v| graph.verts[v]).collect();
        let signed = polygon_signed_area(&poly);
        let component = comp[walk[0]];
        if signed > 0.0 {
            outlines.push((poly, signed, component));
            continue;
        }
        if -signed < MIN_ROOM_AREA_CM2 {
            trace!(area_cm2 = -signed, "sliver face dropped");
            continue;
        }
        poly.reverse();
        drop_collinear(&mut poly, tol);
        let centroid = polygon_centroid(&poly);
        let center = visual_center(&poly);
        faces.push((
            Face {
                polygon: poly,
                area_cm2: -signed,
                center,
                centroid,
            },
            component,
        ));
    }

    // An outline nested inside a room of another component is a hole in it.
    for (outline, area, component) in &outlines {
        let parent = faces
            .iter_mut()
            .filter(|(f, c)| {
                c != component && outline.iter().all(|p| point_in_polygon(*p, &f.polygon))
            })
            .min_by(|a, b| a.0.area_cm2.total_cmp(&b.0.area_cm2));
        if let Some((f, _)) = parent {
            f.area_cm2 = (f.area_cm2 - area).max(0.0);
        }
    }

    let faces: Vec<Face> = faces.into_iter().map(|(f, _)| f).collect();
    let rooms = assign_identity(faces, previous);

    #[cfg(feature = "region_prof")]
    debug!(
        walls = walls.len(),
        edges = graph.edge_count(),
        rooms = rooms.len(),
        ms = t_all.elapsed().as_secs_f64() * 1000.0,
        "rooms detected"
    );
    #[cfg(not(feature = "region_prof"))]
    debug!(walls = walls.len(), edges = graph.edge_count(), rooms = rooms.len(), "rooms detected");
    rooms
}

fn room_anchor(r: &Room) -> Point {
    r.visual_center.unwrap_or_else(|| polygon_centroid(&r.polygon))
}

fn assign_identity(faces: Vec<Face>, previous: &[Room]) -> Vec<Room> {
    let mut pairs: Vec<(usize, usize, f64, f64)> = Vec::new();
    for (i, f) in faces.iter().enumerate() {
        let area = f.area_cm2 / CM2_PER_M2;
        let anchor = f.center.unwrap_or(f.centroid);
        for (j, old) in previous.iter().enumerate() {
            let hi = area.max(old.area);
            if hi <= 0.0 || area.min(old.area) / hi < ROOM_MATCH_AREA_RATIO {
                continue;
            }
            let old_centroid = polygon_centroid(&old.polygon);
            let d = f.centroid.dist(old_centroid);
            let overlap = point_in_polygon(anchor, &old.polygon)
                || point_in_polygon(room_anchor(old), &f.polygon);
            if !overlap && d > ROOM_MATCH_CENTROID_DIST {
                continue;
            }
            pairs.push((i, j, d, (area - old.area).abs()));
        }
    }
    pairs.sort_by(|a, b| a.2.total_cmp(&b.2).then(a.3.total_cmp(&b.3)).then(a.0.cmp(&b.0)));

    let mut matched: Vec<Option<usize>> = vec![None; faces.len()];
    let mut claimed = vec![false; previous.len()];
    for (i, j, _, _) in pairs {
        if matched[i].is_none() && !claimed[j] {
            matched[i] = Some(j);
            claimed[j] = true;
        }
    }

    let mut used_names: HashSet<String> = matched
        .iter()
        .flatten()
        .map(|&j| previous[j].name.clone())
        .collect();
    let mut rooms = Vec::with_capacity(faces.len());
    for (f, m) in faces.into_iter().zip(matched) {
        let area = f.area_cm2 / CM2_PER_M2;
        let room = match m {
            Some(j) => {
                let old = &previous[j];
                Room {
                    id: old.id,
                    name: old.name.clone(),
                    polygon: f.polygon,
                    area,
                    color: old.color,
                    visual_center: f.center,
                }
            }
            None => {
                let n = (1..).find(|n| !used_names.contains(&format!("Room {n}"))).unwrap_or(1);
                let name = format!("Room {n}");
                used_names.insert(name.clone());
                Room {
                    id: RoomId::new(),
                    name,
                    polygon: f.polygon,
                    area,
                    color: ROOM_PALETTE[(n - 1) % ROOM_PALETTE.len()],
                    visual_center: f.center,
                }
            }
        };
        rooms.push(room);
    }
    rooms
}
