use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! id_type {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                $name(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

id_type!(WallId);
id_type!(RoomId);
id_type!(OpeningId);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }
}

/// Plan coordinates in centimeters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
    pub fn add(self, o: Point) -> Point {
        Point::new(self.x + o.x, self.y + o.y)
    }
    pub fn sub(self, o: Point) -> Point {
        Point::new(self.x - o.x, self.y - o.y)
    }
    pub fn scale(self, s: f64) -> Point {
        Point::new(self.x * s, self.y * s)
    }
    pub fn dot(self, o: Point) -> f64 {
        self.x * o.x + self.y * o.y
    }
    pub fn cross(self, o: Point) -> f64 {
        self.x * o.y - self.y * o.x
    }
    pub fn norm(self) -> f64 {
        self.x.hypot(self.y)
    }
    pub fn dist(self, o: Point) -> f64 {
        self.sub(o).norm()
    }
    pub fn dist_sq(self, o: Point) -> f64 {
        let d = self.sub(o);
        d.x * d.x + d.y * d.y
    }
    pub fn lerp(self, o: Point, t: f64) -> Point {
        Point::new(self.x + (o.x - self.x) * t, self.y + (o.y - self.y) * t)
    }
    pub fn round(self) -> Point {
        Point::new(self.x.round(), self.y.round())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
    Diagonal,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub id: WallId,
    pub start: Point,
    pub end: Point,
    pub thickness: f64,
}

impl Wall {
    pub fn new(start: Point, end: Point, thickness: f64) -> Self {
        Wall {
            id: WallId::new(),
            start,
            end,
            thickness,
        }
    }
    pub fn length(&self) -> f64 {
        self.start.dist(self.end)
    }
    pub fn direction(&self) -> Point {
        self.end.sub(self.start)
    }
    pub fn point_at(&self, t: f64) -> Point {
        self.start.lerp(self.end, t)
    }
    pub fn midpoint(&self) -> Point {
        self.point_at(0.5)
    }
    pub fn orientation(&self) -> Orientation {
        crate::geometry::math::orientation_of(self.start, self.end)
    }
    /// True when `p` coincides with either endpoint within `tol`.
    pub fn has_endpoint(&self, p: Point, tol: f64) -> bool {
        self.start.dist(p) <= tol || self.end.dist(p) <= tol
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub polygon: Vec<Point>,
    /// Square meters.
    pub area: f64,
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_center: Option<Point>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningKind {
    Door,
    Window,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Door {
    pub id: OpeningId,
    pub wall_id: WallId,
    pub t: f64,
    pub width: f64,
    #[serde(default)]
    pub flip_x: bool,
    #[serde(default)]
    pub flip_y: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub id: OpeningId,
    pub wall_id: WallId,
    pub t: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub flip_y: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipAxis {
    X,
    Y,
}

/// The unit of undo/redo and the drag reference frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorSnapshot {
    pub walls: Vec<Wall>,
    pub rooms: Vec<Room>,
    pub doors: Vec<Door>,
    pub windows: Vec<Window>,
}
