use super::tolerance::{clamp01, AXIS_SLOPE, EPS_LEN, EPS_PARALLEL};
use crate::model::{Orientation, Point};

/// Projection of a point onto a segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub point: Point,
    pub t: f64,
}

/// Projects `p` onto segment `ab`, clamping the parameter to `[0, 1]`.
/// A degenerate segment projects everything onto `a` with `t = 0`.
pub fn closest_point_on_segment(p: Point, a: Point, b: Point) -> Projection {
    let v = b.sub(a);
    let vv = v.dot(v);
    let t = if vv > EPS_LEN { clamp01(p.sub(a).dot(v) / vv) } else { 0.0 };
    Projection { point: a.lerp(b, t), t }
}

pub fn seg_distance_sq(p: Point, a: Point, b: Point) -> (f64, f64) {
    let pr = closest_point_on_segment(p, a, b);
    (p.dist_sq(pr.point), pr.t)
}

pub fn dist_point_to_seg(p: Point, a: Point, b: Point) -> f64 {
    seg_distance_sq(p, a, b).0.sqrt()
}

/// True when `p` lies within `tolerance` of the segment itself (not just its
/// supporting line).
pub fn is_point_on_segment(p: Point, a: Point, b: Point, tolerance: f64) -> bool {
    dist_point_to_seg(p, a, b) <= tolerance
}

/// Unclamped parameter of `p` along `ab`.
pub fn param_along(p: Point, a: Point, b: Point) -> f64 {
    let v = b.sub(a);
    let vv = v.dot(v);
    if vv <= EPS_LEN { 0.0 } else { p.sub(a).dot(v) / vv }
}

pub fn orientation_of(a: Point, b: Point) -> Orientation {
    let dx = (b.x - a.x).abs();
    let dy = (b.y - a.y).abs();
    if dx <= EPS_LEN && dy <= EPS_LEN {
        Orientation::Diagonal
    } else if dy <= dx * AXIS_SLOPE {
        Orientation::Horizontal
    } else if dx <= dy * AXIS_SLOPE {
        Orientation::Vertical
    } else {
        Orientation::Diagonal
    }
}

/// Directions parallel (or anti-parallel) within `EPS_PARALLEL` of sine.
pub fn are_parallel(u: Point, v: Point) -> bool {
    let lu = u.norm();
    let lv = v.norm();
    if lu <= EPS_LEN || lv <= EPS_LEN {
        return false;
    }
    (u.cross(v) / (lu * lv)).abs() <= EPS_PARALLEL
}

pub fn unit(v: Point) -> Option<Point> {
    let l = v.norm();
    if l > EPS_LEN { Some(v.scale(1.0 / l)) } else { None }
}

// Polygon helpers. Polygons are implicitly closed (last point joins first).

pub fn polygon_signed_area(poly: &[Point]) -> f64 {
    let mut a = 0.0;
    for i in 0..poly.len() {
        let j = (i + 1) % poly.len();
        a += poly[i].x * poly[j].y - poly[j].x * poly[i].y;
    }
    0.5 * a
}

pub fn polygon_centroid(poly: &[Point]) -> Point {
    if poly.is_empty() {
        return Point::default();
    }
    let mut cx = 0.0;
    let mut cy = 0.0;
    let mut a = 0.0;
    for i in 0..poly.len() {
        let j = (i + 1) % poly.len();
        let cross = poly[i].x * poly[j].y - poly[j].x * poly[i].y;
        a += cross;
        cx += (poly[i].x + poly[j].x) * cross;
        cy += (poly[i].y + poly[j].y) * cross;
    }
    let a = a * 0.5;
    if a.abs() <= EPS_LEN {
        // Degenerate: average of the vertices
        let n = poly.len() as f64;
        let sx: f64 = poly.iter().map(|p| p.x).sum();
        let sy: f64 = poly.iter().map(|p| p.y).sum();
        return Point::new(sx / n, sy / n);
    }
    Point::new(cx / (6.0 * a), cy / (6.0 * a))
}

/// Even-odd containment test. Points on the boundary may go either way.
pub fn point_in_polygon(p: Point, poly: &[Point]) -> bool {
    let n = poly.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (poly[i], poly[j]);
        if (pi.y > p.y) != (pj.y > p.y) {
            let x = pi.x + (p.y - pi.y) * (pj.x - pi.x) / (pj.y - pi.y);
            if p.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

pub fn polygon_bbox(poly: &[Point]) -> (f64, f64, f64, f64) {
    let mut minx = f64::INFINITY;
    let mut miny = f64::INFINITY;
    let mut maxx = f64::NEG_INFINITY;
    let mut maxy = f64::NEG_INFINITY;
    for p in poly {
        minx = minx.min(p.x);
        miny = miny.min(p.y);
        maxx = maxx.max(p.x);
        maxy = maxy.max(p.y);
    }
    (minx, miny, maxx, maxy)
}

/// A label anchor guaranteed to be inside the polygon: the centroid when it
/// is inside, otherwise the middle of the widest interior span on a
/// horizontal scanline through the centroid (or the bbox middle).
pub fn visual_center(poly: &[Point]) -> Option<Point> {
    if poly.len() < 3 {
        return None;
    }
    let c = polygon_centroid(poly);
    if point_in_polygon(c, poly) {
        return Some(c);
    }
    let (_, miny, _, maxy) = polygon_bbox(poly);
    for y in [c.y, 0.5 * (miny + maxy)] {
        if let Some(p) = widest_span_midpoint(poly, y) {
            return Some(p);
        }
    }
    None
}

fn widest_span_midpoint(poly: &[Point], y: f64) -> Option<Point> {
    let n = poly.len();
    let mut xs: Vec<f64> = Vec::new();
    for i in 0..n {
        let a = poly[i];
        let b = poly[(i + 1) % n];
        if (a.y > y) != (b.y > y) {
            xs.push(a.x + (y - a.y) * (b.x - a.x) / (b.y - a.y));
        }
    }
    xs.sort_by(|a, b| a.total_cmp(b));
    xs.chunks_exact(2)
        .map(|w| (w[0], w[1]))
        .filter(|(x0, x1)| x1 - x0 > EPS_LEN)
        .max_by(|a, b| (a.1 - a.0).total_cmp(&(b.1 - b.0)))
        .map(|(x0, x1)| Point::new(0.5 * (x0 + x1), y))
}

/// Drops vertices that sit on a straight run between their neighbours.
pub fn drop_collinear(poly: &mut Vec<Point>, tol: f64) {
    let mut changed = true;
    while changed && poly.len() > 3 {
        changed = false;
        let n = poly.len();
        for i in 0..n {
            let prev = poly[(i + n - 1) % n];
            let cur = poly[i];
            let next = poly[(i + 1) % n];
            let going = next.sub(prev);
            if going.norm() <= EPS_LEN {
                continue;
            }
            let straight = dist_point_to_seg(cur, prev, next) <= tol * 0.5
                && cur.sub(prev).dot(going) > 0.0
                && next.sub(cur).dot(going) > 0.0;
            if straight {
                poly.remove(i);
                changed = true;
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn closest_point_clamps() {
        let r = closest_point_on_segment(p(-50.0, 10.0), p(0.0, 0.0), p(100.0, 0.0));
        assert_eq!(r.t, 0.0);
        assert_eq!(r.point, p(0.0, 0.0));
        let r = closest_point_on_segment(p(25.0, 10.0), p(0.0, 0.0), p(100.0, 0.0));
        assert!((r.t - 0.25).abs() < 1e-12);
        assert_eq!(r.point, p(25.0, 0.0));
    }

    #[test]
    fn on_segment_rejects_line_extension() {
        let (a, b) = (p(0.0, 0.0), p(100.0, 0.0));
        assert!(is_point_on_segment(p(50.0, 0.5), a, b, 1.0));
        assert!(!is_point_on_segment(p(50.0, 3.0), a, b, 1.0));
        // On the infinite line: only a tolerance's worth past the end counts
        assert!(is_point_on_segment(p(100.5, 0.0), a, b, 1.0));
        assert!(!is_point_on_segment(p(102.0, 0.0), a, b, 1.0));
    }

    #[test]
    fn orientation_classes() {
        assert_eq!(orientation_of(p(0.0, 0.0), p(100.0, 2.0)), Orientation::Horizontal);
        assert_eq!(orientation_of(p(0.0, 0.0), p(-2.0, 100.0)), Orientation::Vertical);
        assert_eq!(orientation_of(p(0.0, 0.0), p(50.0, 50.0)), Orientation::Diagonal);
    }

    #[test]
    fn rectangle_area_and_centroid() {
        let sq = [p(0.0, 0.0), p(400.0, 0.0), p(400.0, 300.0), p(0.0, 300.0)];
        assert_eq!(polygon_signed_area(&sq), 120_000.0);
        let c = polygon_centroid(&sq);
        assert!((c.x - 200.0).abs() < 1e-9 && (c.y - 150.0).abs() < 1e-9);
    }

    #[test]
    fn visual_center_inside_u_shape() {
        // U shape whose centroid falls in the notch
        let u = [
            p(0.0, 0.0),
            p(300.0, 0.0),
            p(300.0, 300.0),
            p(200.0, 300.0),
            p(200.0, 50.0),
            p(100.0, 50.0),
            p(100.0, 300.0),
            p(0.0, 300.0),
        ];
        let c = visual_center(&u).unwrap();
        assert!(point_in_polygon(c, &u));
    }

    #[test]
    fn collinear_vertices_dropped() {
        let mut poly = vec![p(0.0, 0.0), p(200.0, 0.0), p(400.0, 0.0), p(400.0, 300.0), p(0.0, 300.0)];
        drop_collinear(&mut poly, 1.0);
        assert_eq!(poly.len(), 4);
    }
}
