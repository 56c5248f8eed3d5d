use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{DraftWall, Editor, RulerSegment};
use crate::algorithms::picking::{pick_wall, Pick};
use crate::error::EditorError;
use crate::model::{OpeningKind, Point};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Select,
    Wall,
    Door,
    Window,
    Ruler,
}

impl Tool {
    pub fn as_str(self) -> &'static str {
        match self {
            Tool::Select => "select",
            Tool::Wall => "wall",
            Tool::Door => "door",
            Tool::Window => "window",
            Tool::Ruler => "ruler",
        }
    }
}

impl FromStr for Tool {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "select" => Ok(Tool::Select),
            "wall" => Ok(Tool::Wall),
            "door" => Ok(Tool::Door),
            "window" => Ok(Tool::Window),
            "ruler" => Ok(Tool::Ruler),
            other => Err(EditorError::invalid_argument("tool", format!("unknown tool '{other}'"))),
        }
    }
}

impl Editor {
    pub fn on_pointer_down(&mut self, p: Point) {
        if !p.is_finite() {
            trace!("non-finite pointer ignored");
            return;
        }
        match self.tool {
            Tool::Select => self.select_down(p),
            Tool::Wall => self.wall_down(p),
            Tool::Door => self.opening_down(OpeningKind::Door, p),
            Tool::Window => self.opening_down(OpeningKind::Window, p),
            Tool::Ruler => self.ruler = Some(RulerSegment::at(p)),
        }
    }

    pub fn on_pointer_move(&mut self, p: Point) {
        if !p.is_finite() {
            return;
        }
        match self.tool {
            Tool::Select => self.select_move(p),
            Tool::Wall => {
                let end = self.snap_to_vertex(p);
                if let Some(d) = self.draft.as_mut() {
                    d.end = end;
                }
            }
            Tool::Door | Tool::Window => {}
            Tool::Ruler => {
                if let Some(r) = self.ruler.as_mut().filter(|r| !r.finished) {
                    r.stretch(p);
                }
            }
        }
    }

    pub fn on_pointer_up(&mut self, p: Point) {
        if !p.is_finite() {
            return;
        }
        match self.tool {
            Tool::Select => self.select_up(p),
            Tool::Ruler => {
                if let Some(r) = self.ruler.as_mut().filter(|r| !r.finished) {
                    r.stretch(p);
                    r.finished = true;
                }
            }
            Tool::Wall | Tool::Door | Tool::Window => {}
        }
    }

    /// First click starts a draft; each further click commits it and chains
    /// the next draft from its end, until a commit closes a new room.
    fn wall_down(&mut self, p: Point) {
        let p = self.snap_to_vertex(p);
        let Some(d) = self.draft else {
            self.draft = Some(DraftWall { start: p, end: p });
            return;
        };
        if d.start.dist(p) <= self.config.min_wall_length {
            trace!(len = d.start.dist(p), "draft too short");
            return;
        }
        let rooms_before = self.state.rooms.len();
        self.record();
        self.commit_wall(d.start, p);
        let closed = self.state.rooms.len() > rooms_before;
        debug!(walls = self.state.walls.len(), rooms = self.state.rooms.len(), closed, "wall committed");
        self.draft = if closed {
            None
        } else {
            let next = if self.config.grid_rounding { p.round() } else { p };
            Some(DraftWall { start: next, end: next })
        };
    }

    fn opening_down(&mut self, kind: OpeningKind, p: Point) {
        let Some(Pick::Wall { id, t, .. }) = pick_wall(&self.state.walls, p, self.config.pick_tolerance) else {
            trace!(?kind, "opening placement missed every wall");
            return;
        };
        if self.attach_opening(kind, id, t).is_some() {
            self.tool = Tool::Select;
        }
    }

    /// Nearest existing vertex within the snap radius, when snapping is on.
    pub(super) fn snap_to_vertex(&self, p: Point) -> Point {
        if !self.config.snapping {
            return p;
        }
        let r2 = self.config.snap_radius * self.config.snap_radius;
        let mut best: Option<(f64, Point)> = None;
        for w in &self.state.walls {
            for q in [w.start, w.end] {
                let d2 = q.dist_sq(p);
                if d2 <= r2 && best.map_or(true, |(bd, _)| d2 < bd) {
                    best = Some((d2, q));
                }
            }
        }
        best.map_or(p, |(_, q)| q)
    }
}
