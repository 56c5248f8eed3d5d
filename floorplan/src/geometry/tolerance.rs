// Centralized tolerances for plan geometry. Units are centimeters unless noted.

pub const EPS_LEN: f64 = 1e-9;            // zero-length vector threshold
pub const EPS_PARALLEL: f64 = 1e-6;       // |sin| below which two directions are parallel

pub const POINT_TOL: f64 = 1.0;           // vertex coincidence / point-on-wall slack
pub const PICK_TOL: f64 = 20.0;           // cursor-to-wall hit radius
pub const SNAP_RADIUS: f64 = 15.0;        // vertex and axis snap radius
pub const MIN_WALL_LENGTH: f64 = 10.0;    // shorter draft walls are not committed

// A wall whose minor axis extent is below this fraction of its major axis
// counts as axis-aligned.
pub const AXIS_SLOPE: f64 = 0.05;

pub const MIN_ROOM_AREA_CM2: f64 = 100.0; // smaller faces are slivers, not rooms
pub const CM2_PER_M2: f64 = 10_000.0;

// Room identity matching
pub const ROOM_MATCH_AREA_RATIO: f64 = 0.5;     // min(area)/max(area) floor
pub const ROOM_MATCH_CENTROID_DIST: f64 = 100.0; // centroid proximity fallback

#[inline] pub fn clamp01(x: f64) -> f64 { x.clamp(0.0, 1.0) }
