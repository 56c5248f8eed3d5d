pub mod model;
pub mod geometry {
    pub mod intersect;
    pub mod limits;
    pub mod math;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod binding;
    pub mod fragment;
    pub mod picking;
    pub mod rooms;
}
pub mod config;
pub mod editor;
pub mod error;
pub mod history;
pub mod json;

pub use algorithms::fragment::{fragment, merge_duplicates};
pub use algorithms::rooms::detect_rooms;
pub use config::EditorConfig;
pub use editor::{AnchorSide, DraftWall, Editor, EditorView, RoomPatch, RulerSegment, Tool};
pub use error::EditorError;
pub use history::History;
pub use model::{
    Color, Door, EditorSnapshot, FlipAxis, OpeningId, OpeningKind, Orientation, Point, Room, RoomId,
    Wall, WallId, Window,
};
