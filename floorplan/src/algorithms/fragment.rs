use crate::geometry::intersect::{intersect_segments, SegIntersection};
use crate::geometry::tolerance::POINT_TOL;
use crate::model::{Point, Wall, WallId};

// Break points per wall: parameter along the wall plus the exact point to
// emit there. Points are snapped to the other wall's endpoint whenever the
// break comes from that endpoint so both sides share a bit-identical vertex.
type Breaks = Vec<(f64, Point)>;

fn usable(w: &Wall, tol: f64) -> bool {
    w.start.is_finite() && w.end.is_finite() && w.length() > tol
}

fn push_interior(breaks: &mut Breaks, t: f64, p: Point, len: f64, tol: f64) {
    if t * len > tol && (1.0 - t) * len > tol {
        breaks.push((t, p));
    }
}

fn nearest_of(p: Point, a: Point, b: Point) -> Point {
    if p.dist_sq(a) <= p.dist_sq(b) { a } else { b }
}

fn bbox_disjoint(a: &Wall, b: &Wall, pad: f64) -> bool {
    let (minx1, maxx1) = (a.start.x.min(a.end.x), a.start.x.max(a.end.x));
    let (miny1, maxy1) = (a.start.y.min(a.end.y), a.start.y.max(a.end.y));
    let (minx2, maxx2) = (b.start.x.min(b.end.x), b.start.x.max(b.end.x));
    let (miny2, maxy2) = (b.start.y.min(b.end.y), b.start.y.max(b.end.y));
    maxx1 < minx2 - pad || maxx2 < minx1 - pad || maxy1 < miny2 - pad || maxy2 < miny1 - pad
}

/// Splits walls at every crossing, T-junction and collinear overlap boundary
/// so that no two output walls meet except at shared endpoints.
///
/// Thickness is inherited from the source wall. A wall that needed no split
/// keeps its id; every sub-segment of a split wall gets a fresh id. Walls with
/// non-finite coordinates or no length are dropped. Collinear duplicates are
/// kept; see [`merge_duplicates`].
pub fn fragment(walls: &[Wall]) -> Vec<Wall> {
    fragment_with_tolerance(walls, POINT_TOL)
}

pub fn fragment_with_tolerance(walls: &[Wall], tol: f64) -> Vec<Wall> {
    let segs: Vec<&Wall> = walls.iter().filter(|w| usable(w, tol)).collect();
    let n = segs.len();
    let mut splits: Vec<Breaks> = segs
        .iter()
        .map(|w| vec![(0.0, w.start), (1.0, w.end)])
        .collect();

    for i in 0..n {
        for j in (i + 1)..n {
            let (wi, wj) = (segs[i], segs[j]);
            if bbox_disjoint(wi, wj, tol) {
                continue;
            }
            let (a, b, c, d) = (wi.start, wi.end, wj.start, wj.end);
            let (li, lj) = (wi.length(), wj.length());
            match intersect_segments(a, b, c, d, tol) {
                SegIntersection::None => {}
                SegIntersection::Proper { t, u, at } => {
                    push_interior(&mut splits[i], t, at, li, tol);
                    push_interior(&mut splits[j], u, at, lj, tol);
                }
                SegIntersection::Touch { t, u, at } => {
                    let on_i = if u * lj <= tol {
                        c
                    } else if (1.0 - u) * lj <= tol {
                        d
                    } else {
                        at
                    };
                    let on_j = if t * li <= tol {
                        a
                    } else if (1.0 - t) * li <= tol {
                        b
                    } else {
                        at
                    };
                    push_interior(&mut splits[i], t, on_i, li, tol);
                    push_interior(&mut splits[j], u, on_j, lj, tol);
                }
                SegIntersection::CollinearOverlap { t0, t1, u0, u1 } => {
                    for t in [t0, t1] {
                        let p = nearest_of(a.lerp(b, t), c, d);
                        push_interior(&mut splits[i], t, p, li, tol);
                    }
                    for u in [u0, u1] {
                        let p = nearest_of(c.lerp(d, u), a, b);
                        push_interior(&mut splits[j], u, p, lj, tol);
                    }
                }
            }
        }
    }

    let mut out = Vec::with_capacity(n);
    for (idx, w) in segs.iter().enumerate() {
        let mut ts = std::mem::take(&mut splits[idx]);
        ts.sort_by(|x, y| x.0.total_cmp(&y.0));
        let len = w.length();
        let mut kept: Breaks = Vec::with_capacity(ts.len());
        for (t, p) in ts {
            if let Some(&(lt, _)) = kept.last() {
                if (t - lt) * len <= tol {
                    continue;
                }
            }
            kept.push((t, p));
        }
        if kept.len() <= 2 {
            out.push((*w).clone());
            continue;
        }
        for win in kept.windows(2) {
            let (s, e) = (win[0].1, win[1].1);
            if s.dist(e) <= tol {
                continue;
            }
            out.push(Wall {
                id: WallId::new(),
                start: s,
                end: e,
                thickness: w.thickness,
            });
        }
    }
    out
}

/// Removes walls that duplicate an earlier wall's geometry (same endpoints in
/// either order, within `tol`). The first occurrence wins.
pub fn merge_duplicates(walls: Vec<Wall>, tol: f64) -> Vec<Wall> {
    let mut kept: Vec<Wall> = Vec::with_capacity(walls.len());
    for w in walls {
        let dup = kept.iter().any(|k| {
            (k.start.dist(w.start) <= tol && k.end.dist(w.end) <= tol)
                || (k.start.dist(w.end) <= tol && k.end.dist(w.start) <= tol)
        });
        if !dup {
            kept.push(w);
        }
    }
    kept
}

/// Canonical, id-free geometry key used to compare wall sets.
pub fn geometry_key(w: &Wall) -> (i64, i64, i64, i64) {
    let a = (w.start.x.round() as i64, w.start.y.round() as i64);
    let b = (w.end.x.round() as i64, w.end.y.round() as i64);
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    (lo.0, lo.1, hi.0, hi.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall(x0: f64, y0: f64, x1: f64, y1: f64) -> Wall {
        Wall::new(Point::new(x0, y0), Point::new(x1, y1), 15.0)
    }

    fn keys(ws: &[Wall]) -> Vec<(i64, i64, i64, i64)> {
        let mut k: Vec<_> = ws.iter().map(geometry_key).collect();
        k.sort_unstable();
        k
    }

    #[test]
    fn cross_becomes_four() {
        let out = fragment(&[wall(0.0, 100.0, 200.0, 100.0), wall(100.0, 0.0, 100.0, 200.0)]);
        assert_eq!(out.len(), 4);
        assert!(out.iter().all(|w| (w.length() - 100.0).abs() < 1e-9));
    }

    #[test]
    fn t_junction_splits_host_only() {
        let host = wall(0.0, 0.0, 400.0, 0.0);
        let stem = wall(150.0, 0.0, 150.0, 300.0);
        let stem_id = stem.id;
        let out = fragment(&[host, stem]);
        assert_eq!(out.len(), 3);
        assert!(out.iter().any(|w| w.id == stem_id), "unsplit wall keeps its id");
        assert_eq!(
            keys(&out),
            vec![(0, 0, 150, 0), (150, 0, 150, 300), (150, 0, 400, 0)]
        );
    }

    #[test]
    fn overlap_leaves_duplicate_for_callers() {
        let out = fragment(&[wall(0.0, 0.0, 400.0, 0.0), wall(200.0, 0.0, 600.0, 0.0)]);
        assert_eq!(out.len(), 4);
        let merged = merge_duplicates(out, POINT_TOL);
        assert_eq!(keys(&merged), vec![(0, 0, 200, 0), (200, 0, 400, 0), (400, 0, 600, 0)]);
    }

    #[test]
    fn thickness_inherited_and_degenerates_dropped() {
        let mut thick = wall(0.0, 50.0, 300.0, 50.0);
        thick.thickness = 30.0;
        let zero = wall(10.0, 10.0, 10.0, 10.0);
        let nan = wall(f64::NAN, 0.0, 10.0, 0.0);
        let out = fragment(&[thick, wall(100.0, 0.0, 100.0, 100.0), zero, nan]);
        assert_eq!(out.len(), 4);
        for w in out.iter().filter(|w| w.start.y == 50.0 && w.end.y == 50.0) {
            assert_eq!(w.thickness, 30.0);
        }
    }
}
