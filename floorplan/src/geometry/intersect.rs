// Segment-segment intersection with distance tolerances.
// Classifies proper crossings, endpoint touches, and collinear overlaps.

use super::math::param_along;
use super::tolerance::{clamp01, EPS_LEN, EPS_PARALLEL};
use crate::model::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegIntersection {
    None,
    // Proper interior intersection (away from every endpoint by more than tol)
    Proper { t: f64, u: f64, at: Point },
    // At least one of the segments is met within tol of one of its endpoints
    Touch { t: f64, u: f64, at: Point },
    // Collinear overlapping span: parameter ranges on each segment (ordered)
    CollinearOverlap { t0: f64, t1: f64, u0: f64, u1: f64 },
}

fn collinear_overlap(a: Point, b: Point, c: Point, d: Point, tol: f64) -> SegIntersection {
    let lr = a.dist(b);
    let tc = param_along(c, a, b);
    let td = param_along(d, a, b);
    let lo = tc.min(td);
    let hi = tc.max(td);
    let slack = tol / lr;
    if hi < -slack || lo > 1.0 + slack {
        return SegIntersection::None;
    }
    let lo = clamp01(lo);
    let hi = clamp01(hi);
    if (hi - lo) * lr <= tol {
        // Collinear but only kissing at a point
        let at = a.lerp(b, 0.5 * (lo + hi));
        return SegIntersection::Touch {
            t: 0.5 * (lo + hi),
            u: clamp01(param_along(at, c, d)),
            at,
        };
    }
    let u_lo = clamp01(param_along(a.lerp(b, lo), c, d));
    let u_hi = clamp01(param_along(a.lerp(b, hi), c, d));
    let (u0, u1) = if u_lo <= u_hi { (u_lo, u_hi) } else { (u_hi, u_lo) };
    SegIntersection::CollinearOverlap { t0: lo, t1: hi, u0, u1 }
}

pub fn intersect_segments(a: Point, b: Point, c: Point, d: Point, tol: f64) -> SegIntersection {
    let r = b.sub(a);
    let s = d.sub(c);
    let lr = r.norm();
    let ls = s.norm();
    if lr <= EPS_LEN || ls <= EPS_LEN {
        return SegIntersection::None;
    }

    let denom = r.cross(s);
    if denom.abs() <= EPS_PARALLEL * lr * ls {
        // Parallel: collinear when C sits on AB's supporting line
        let off = (r.cross(c.sub(a)) / lr).abs();
        if off <= tol {
            return collinear_overlap(a, b, c, d, tol);
        }
        return SegIntersection::None;
    }

    let qp = c.sub(a);
    let t = qp.cross(s) / denom;
    let u = qp.cross(r) / denom;
    let (st, su) = (tol / lr, tol / ls);
    if t < -st || t > 1.0 + st || u < -su || u > 1.0 + su {
        return SegIntersection::None;
    }
    let at = a.add(r.scale(t));

    let is_touch = t * lr <= tol || (1.0 - t) * lr <= tol || u * ls <= tol || (1.0 - u) * ls <= tol;
    if is_touch {
        SegIntersection::Touch { t: clamp01(t), u: clamp01(u), at }
    } else {
        SegIntersection::Proper { t, u, at }
    }
}
