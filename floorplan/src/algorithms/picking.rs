use crate::geometry::math::seg_distance_sq;
use crate::model::{Point, Wall, WallId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WallEnd {
    Start,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pick {
    Vertex { wall: WallId, end: WallEnd, point: Point, dist: f64 },
    Wall { id: WallId, t: f64, point: Point, dist: f64 },
}

pub fn pick_vertex(walls: &[Wall], p: Point, tol: f64) -> Option<Pick> {
    let tol2 = tol * tol;
    let mut best: Option<(WallId, WallEnd, Point, f64)> = None;
    for w in walls {
        for (end, q) in [(WallEnd::Start, w.start), (WallEnd::End, w.end)] {
            let d2 = q.dist_sq(p);
            if d2 <= tol2 && best.map_or(true, |(_, _, _, bd)| d2 < bd) {
                best = Some((w.id, end, q, d2));
            }
        }
    }
    best.map(|(wall, end, point, d2)| Pick::Vertex { wall, end, point, dist: d2.sqrt() })
}

pub fn pick_wall(walls: &[Wall], p: Point, tol: f64) -> Option<Pick> {
    let tol2 = tol * tol;
    let mut best: Option<(WallId, f64, f64, Point)> = None;
    for w in walls {
        let (d2, t) = seg_distance_sq(p, w.start, w.end);
        if d2 <= tol2 && best.map_or(true, |(_, bd, _, _)| d2 < bd) {
            best = Some((w.id, d2, t, w.point_at(t)));
        }
    }
    best.map(|(id, d2, t, point)| Pick::Wall { id, t, point, dist: d2.sqrt() })
}

/// Vertices win over wall bodies, as handles sit on top of the strokes.
pub fn pick(walls: &[Wall], p: Point, tol: f64) -> Option<Pick> {
    pick_vertex(walls, p, tol).or_else(|| pick_wall(walls, p, tol))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_before_wall() {
        let w = Wall::new(Point::new(0.0, 0.0), Point::new(400.0, 0.0), 15.0);
        let ws = vec![w.clone()];
        match pick(&ws, Point::new(5.0, 3.0), 20.0) {
            Some(Pick::Vertex { wall, end, .. }) => {
                assert_eq!(wall, w.id);
                assert_eq!(end, WallEnd::Start);
            }
            other => panic!("expected vertex, got {other:?}"),
        }
        match pick(&ws, Point::new(200.0, 12.0), 20.0) {
            Some(Pick::Wall { id, t, .. }) => {
                assert_eq!(id, w.id);
                assert!((t - 0.5).abs() < 1e-12);
            }
            other => panic!("expected wall, got {other:?}"),
        }
        assert!(pick(&ws, Point::new(200.0, 40.0), 20.0).is_none());
    }
}
