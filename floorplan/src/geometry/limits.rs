// Bounds applied to anything entering the plan from the outside (pointer
// events, loaded documents, typed values).

use crate::model::Point;

pub const COORD_MIN: f64 = -10_000_000.0;
pub const COORD_MAX: f64 = 10_000_000.0;
pub const THICKNESS_MAX: f64 = 1_000.0;
pub const LENGTH_MAX: f64 = 1_000_000.0;
pub const OPENING_MAX: f64 = 10_000.0;

#[inline]
pub fn in_coord_bounds(x: f64) -> bool { x.is_finite() && (COORD_MIN..=COORD_MAX).contains(&x) }

#[inline]
pub fn point_in_bounds(p: Point) -> bool { in_coord_bounds(p.x) && in_coord_bounds(p.y) }

#[inline]
pub fn in_thickness_bounds(w: f64) -> bool { w.is_finite() && w > 0.0 && w <= THICKNESS_MAX }

#[inline]
pub fn in_length_bounds(l: f64) -> bool { l.is_finite() && l > 0.0 && l <= LENGTH_MAX }

#[inline]
pub fn in_opening_bounds(w: f64) -> bool { w.is_finite() && w > 0.0 && w <= OPENING_MAX }
