use floorplan::algorithms::rooms::WallGraph;
use floorplan::{Color, Editor, OpeningKind, Point, RoomPatch, Tool, Wall, WallId};

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn rectangle() -> Editor {
    let mut ed = Editor::new();
    assert!(ed.add_wall(p(0.0, 0.0), p(400.0, 0.0)));
    assert!(ed.add_wall(p(400.0, 0.0), p(400.0, 300.0)));
    assert!(ed.add_wall(p(400.0, 300.0), p(0.0, 300.0)));
    assert!(ed.add_wall(p(0.0, 300.0), p(0.0, 0.0)));
    assert_eq!(ed.rooms().len(), 1);
    ed
}

fn wall_between(ed: &Editor, a: Point, b: Point) -> WallId {
    ed.walls()
        .iter()
        .find(|w| (w.start == a && w.end == b) || (w.start == b && w.end == a))
        .map(|w| w.id)
        .unwrap_or_else(|| panic!("no wall {a:?}-{b:?}"))
}

fn assert_closed(walls: &[Wall]) {
    let g = WallGraph::from_walls(walls, 1.0);
    assert!(g.degrees().iter().all(|&d| d >= 2), "dangling vertex in {walls:?}");
}

#[test]
fn chained_drawing_stops_when_room_closes() {
    let mut ed = Editor::new();
    ed.set_tool(Tool::Wall);
    ed.on_pointer_down(p(0.0, 0.0));
    ed.on_pointer_down(p(400.0, 0.0));
    assert_eq!(ed.current_wall().map(|d| d.start), Some(p(400.0, 0.0)));
    ed.on_pointer_down(p(400.0, 300.0));
    ed.on_pointer_down(p(0.0, 300.0));
    assert!(ed.current_wall().is_some());
    ed.on_pointer_down(p(0.0, 0.0));

    assert_eq!(ed.walls().len(), 4);
    assert_eq!(ed.rooms().len(), 1);
    assert!((ed.rooms()[0].area - 12.0).abs() < 1e-9);
    assert!(ed.current_wall().is_none(), "chaining must stop after closing a room");
    assert_eq!(ed.tool(), Tool::Wall);
}

#[test]
fn dragging_a_wall_keeps_the_room_closed() {
    let mut ed = rectangle();
    ed.on_pointer_down(p(200.0, 0.0));
    assert!(ed.is_dragging());
    ed.on_pointer_move(p(200.0, 25.0));
    ed.on_pointer_move(p(213.0, 50.0));
    ed.on_pointer_up(p(213.0, 50.0));

    assert!(!ed.is_dragging());
    assert_eq!(ed.rooms().len(), 1);
    assert!((ed.rooms()[0].area - 10.0).abs() < 1e-9);
    assert_closed(ed.walls());
    // Horizontal walls only move vertically.
    wall_between(&ed, p(0.0, 50.0), p(400.0, 50.0));
}

#[test]
fn dragging_half_of_a_split_wall_inserts_a_jog() {
    let mut ed = rectangle();
    let bottom = wall_between(&ed, p(0.0, 0.0), p(400.0, 0.0));
    assert!(ed.split_wall(bottom, None));
    assert_eq!(ed.walls().len(), 5);

    ed.on_pointer_down(p(100.0, 0.0));
    ed.on_pointer_move(p(100.0, 40.0));
    ed.on_pointer_up(p(100.0, 40.0));

    assert_eq!(ed.walls().len(), 6);
    wall_between(&ed, p(200.0, 0.0), p(200.0, 40.0));
    assert_closed(ed.walls());
    assert_eq!(ed.rooms().len(), 1);
    assert!((ed.rooms()[0].area - 11.2).abs() < 1e-9);
}

#[test]
fn door_survives_split() {
    let mut ed = rectangle();
    let bottom = wall_between(&ed, p(0.0, 0.0), p(400.0, 0.0));
    let door = ed.add_door(bottom, 0.5).unwrap();
    assert!(ed.split_wall(bottom, Some(p(100.0, 3.0))));

    let d = ed.doors().iter().find(|d| d.id == door).unwrap();
    let host = ed.wall(d.wall_id).unwrap();
    assert_ne!(host.id, bottom);
    assert!(host.point_at(d.t).dist(p(200.0, 0.0)) < 1e-9);
    assert!((d.t - 1.0 / 3.0).abs() < 1e-9);
}

#[test]
fn room_identity_survives_vertex_nudge() {
    let mut ed = rectangle();
    ed.set_snapping(false);
    let room = ed.rooms()[0].id;
    assert!(ed.update_room(
        room,
        RoomPatch { name: Some("Kitchen".into()), color: Some(Color::rgb(10, 20, 30)) },
    ));
    let right = wall_between(&ed, p(400.0, 0.0), p(400.0, 300.0));
    let top = wall_between(&ed, p(400.0, 300.0), p(0.0, 300.0));
    assert!(ed.select_wall(right));
    assert!(ed.toggle_wall_selection(top));

    ed.on_pointer_down(p(400.0, 300.0));
    ed.on_pointer_move(p(412.0, 306.0));
    ed.on_pointer_up(p(412.0, 306.0));

    assert_eq!(ed.rooms().len(), 1);
    let r = &ed.rooms()[0];
    assert_eq!(r.id, room);
    assert_eq!(r.name, "Kitchen");
    assert_eq!(r.color, Color::rgb(10, 20, 30));
    assert!((r.area - 12.3).abs() < 1e-9);
}

#[test]
fn vertex_drag_snaps_to_fixed_ends() {
    let mut ed = rectangle();
    let right = wall_between(&ed, p(400.0, 0.0), p(400.0, 300.0));
    let top = wall_between(&ed, p(400.0, 300.0), p(0.0, 300.0));
    ed.select_wall(right);
    ed.toggle_wall_selection(top);
    ed.on_pointer_down(p(400.0, 300.0));
    ed.on_pointer_move(p(450.0, 306.0));
    ed.on_pointer_up(p(450.0, 306.0));
    // y snaps back onto the top wall's fixed end.
    wall_between(&ed, p(450.0, 300.0), p(0.0, 300.0));
}

#[test]
fn door_tool_places_then_returns_to_select() {
    let mut ed = rectangle();
    ed.set_tool(Tool::Door);
    ed.on_pointer_down(p(200.0, 8.0));
    assert_eq!(ed.doors().len(), 1);
    assert!((ed.doors()[0].t - 0.5).abs() < 1e-9);
    assert_eq!(ed.tool(), Tool::Select);

    ed.set_tool(Tool::Window);
    ed.on_pointer_down(p(200.0, 150.0));
    assert!(ed.windows().is_empty());
    assert_eq!(ed.tool(), Tool::Window, "a miss leaves the tool as is");
}

#[test]
fn deleting_a_wall_cascades() {
    let mut ed = rectangle();
    let bottom = wall_between(&ed, p(0.0, 0.0), p(400.0, 0.0));
    let door = ed.add_door(bottom, 0.25).unwrap();
    let top = wall_between(&ed, p(400.0, 300.0), p(0.0, 300.0));
    ed.add_window(top, 0.5).unwrap();
    assert!(ed.delete_wall(bottom));
    assert!(ed.doors().iter().all(|d| d.id != door));
    assert_eq!(ed.windows().len(), 1);
    assert!(ed.rooms().is_empty());
    assert!(!ed.delete_opening(OpeningKind::Door, door));
}

#[test]
fn typed_length_moves_the_far_side() {
    let mut ed = rectangle();
    let bottom = wall_between(&ed, p(0.0, 0.0), p(400.0, 0.0));
    let top = wall_between(&ed, p(400.0, 300.0), p(0.0, 300.0));
    let window = ed.add_window(top, 0.5).unwrap();
    assert!(ed.set_wall_length(bottom, 500.0, floorplan::AnchorSide::Left));

    wall_between(&ed, p(500.0, 0.0), p(500.0, 300.0));
    assert_eq!(ed.rooms().len(), 1);
    assert!((ed.rooms()[0].area - 15.0).abs() < 1e-9);
    let w = ed.windows().iter().find(|w| w.id == window).unwrap();
    assert!(ed.wall(w.wall_id).is_some());
}

#[test]
fn escape_rolls_back_a_drag() {
    let mut ed = rectangle();
    let before = ed.snapshot().clone();
    ed.on_pointer_down(p(200.0, 0.0));
    ed.on_pointer_move(p(200.0, 80.0));
    assert_ne!(ed.walls(), before.walls.as_slice());
    ed.cancel();
    assert_eq!(ed.snapshot(), &before);
    ed.on_pointer_up(p(200.0, 80.0));
    assert_eq!(ed.snapshot(), &before);
}

#[test]
fn click_without_motion_is_not_an_edit() {
    let mut ed = rectangle();
    ed.undo();
    ed.redo();
    let settled = ed.snapshot().clone();
    ed.on_pointer_down(p(200.0, 0.0));
    ed.on_pointer_up(p(200.0, 0.0));
    assert_eq!(ed.snapshot(), &settled);
    assert!(!ed.can_redo());
    assert!(ed.undo());
    assert_eq!(ed.walls().len(), 3);
}

#[test]
fn selection_follows_fragments() {
    let mut ed = rectangle();
    let bottom = wall_between(&ed, p(0.0, 0.0), p(400.0, 0.0));
    ed.select_wall(bottom);
    // A divider meeting the bottom wall splits it in two.
    assert!(ed.add_wall(p(150.0, 0.0), p(150.0, 300.0)));
    assert_eq!(ed.rooms().len(), 2);
    assert_eq!(ed.selected_walls().len(), 2);
    for id in ed.selected_walls() {
        let w = ed.wall(*id).unwrap();
        assert_eq!(w.start.y, 0.0);
        assert_eq!(w.end.y, 0.0);
    }
}

#[test]
fn toolbar_edit_mid_drag_ends_the_drag_first() {
    let mut ed = rectangle();
    let before = ed.snapshot().clone();
    let left = wall_between(&ed, p(0.0, 300.0), p(0.0, 0.0));
    ed.on_pointer_down(p(200.0, 0.0));
    ed.on_pointer_move(p(200.0, 50.0));
    assert!(ed.is_dragging());

    assert!(ed.set_wall_thickness(left, 40.0));
    assert!(!ed.is_dragging());
    ed.on_pointer_move(p(200.0, 80.0));
    ed.on_pointer_up(p(200.0, 80.0));
    assert_eq!(ed.wall(left).map(|w| w.thickness), Some(40.0));
    wall_between(&ed, p(0.0, 0.0), p(400.0, 0.0));

    // The only step back is the committed rectangle, not a half-moved plan.
    assert!(ed.undo());
    assert_eq!(ed.snapshot(), &before);
}

#[test]
fn add_wall_mid_drag_is_kept() {
    let mut ed = rectangle();
    ed.on_pointer_down(p(200.0, 0.0));
    ed.on_pointer_move(p(200.0, 50.0));
    assert!(ed.add_wall(p(1000.0, 0.0), p(1200.0, 0.0)));
    ed.on_pointer_up(p(200.0, 50.0));

    assert_eq!(ed.walls().len(), 5);
    wall_between(&ed, p(1000.0, 0.0), p(1200.0, 0.0));
    wall_between(&ed, p(0.0, 0.0), p(400.0, 0.0));
    assert!(ed.undo());
    assert_eq!(ed.walls().len(), 4);
    wall_between(&ed, p(0.0, 0.0), p(400.0, 0.0));
}
