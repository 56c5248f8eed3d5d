use floorplan::{
    detect_rooms, fragment, AnchorSide, Editor, FlipAxis, OpeningKind, Point, RoomPatch, Tool, Wall,
};

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// RUST_LOG=floorplan=trace shows which inputs were dropped and why.
fn init_logs() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn zero_length_and_nan_walls_are_rejected() {
    init_logs();
    let mut ed = Editor::new();
    assert!(!ed.add_wall(p(10.0, 10.0), p(10.0, 10.0)));
    assert!(!ed.add_wall(p(f64::NAN, 0.0), p(10.0, 0.0)));
    assert!(!ed.add_wall(p(0.0, 0.0), p(f64::INFINITY, 0.0)));
    assert!(ed.walls().is_empty());
    assert!(!ed.can_undo());
}

#[test]
fn non_finite_pointer_events_are_ignored() {
    init_logs();
    let mut ed = Editor::new();
    ed.set_tool(Tool::Wall);
    ed.on_pointer_down(p(f64::NAN, 0.0));
    assert!(ed.current_wall().is_none());
    ed.on_pointer_down(p(0.0, 0.0));
    ed.on_pointer_move(p(f64::NAN, f64::NAN));
    assert_eq!(ed.current_wall().unwrap().end, p(0.0, 0.0));
    ed.on_pointer_down(p(f64::NEG_INFINITY, 0.0));
    assert!(ed.walls().is_empty());
}

#[test]
fn history_underflow_is_a_noop() {
    let mut ed = Editor::new();
    assert!(!ed.undo());
    assert!(!ed.redo());
}

#[test]
fn collinear_triangle_has_no_room() {
    let walls = vec![
        Wall::new(p(0.0, 0.0), p(100.0, 0.0), 15.0),
        Wall::new(p(100.0, 0.0), p(200.0, 0.0), 15.0),
        Wall::new(p(200.0, 0.0), p(0.0, 0.0), 15.0),
    ];
    assert!(detect_rooms(&fragment(&walls), &[]).is_empty());
}

#[test]
fn sliver_room_is_dropped() {
    // 50 cm² of enclosed area is below the room threshold.
    let walls = vec![
        Wall::new(p(0.0, 0.0), p(50.0, 0.0), 15.0),
        Wall::new(p(50.0, 0.0), p(50.0, 1.0), 15.0),
        Wall::new(p(50.0, 1.0), p(0.0, 1.0), 15.0),
        Wall::new(p(0.0, 1.0), p(0.0, 0.0), 15.0),
    ];
    assert!(detect_rooms(&walls, &[]).is_empty());
}

#[test]
fn split_targets_are_validated() {
    let mut ed = Editor::new();
    ed.add_wall(p(0.0, 0.0), p(400.0, 0.0));
    let id = ed.walls()[0].id;
    assert_eq!(ed.try_split_wall(id, Some(p(200.0, 80.0))).unwrap_err().code(), "invalid_argument");
    assert!(!ed.split_wall(id, Some(p(0.5, 0.0))));
    assert!(!ed.split_wall(floorplan::WallId::new(), None));
    assert_eq!(ed.walls().len(), 1);
}

#[test]
fn bad_numeric_arguments_do_nothing() {
    let mut ed = Editor::new();
    ed.add_wall(p(0.0, 0.0), p(400.0, 0.0));
    let id = ed.walls()[0].id;
    let undo_depth = ed.can_undo();
    assert!(!ed.set_wall_thickness(id, -5.0));
    assert!(!ed.set_wall_thickness(id, f64::NAN));
    assert!(!ed.set_wall_length(id, 0.0, AnchorSide::Left));
    assert!(!ed.set_wall_length(id, f64::INFINITY, AnchorSide::Right));
    assert_eq!(ed.walls()[0].length(), 400.0);
    assert_eq!(ed.walls()[0].thickness, 15.0);
    assert_eq!(ed.can_undo(), undo_depth);

    let door = ed.add_door(id, 0.5).unwrap();
    assert!(!ed.set_opening_width(OpeningKind::Door, door, 0.0));
    assert!(ed.set_opening_width(OpeningKind::Door, door, 80.0));
    assert_eq!(ed.doors()[0].width, 80.0);
    assert!(ed.add_door(id, f64::NAN).is_none());
}

#[test]
fn flips_toggle_and_windows_reject_x() {
    let mut ed = Editor::new();
    ed.add_wall(p(0.0, 0.0), p(400.0, 0.0));
    let id = ed.walls()[0].id;
    let door = ed.add_door(id, 0.5).unwrap();
    let window = ed.add_window(id, 0.2).unwrap();
    assert!(ed.flip_opening(OpeningKind::Door, door, FlipAxis::X));
    assert!(ed.doors()[0].flip_x);
    assert!(ed.flip_opening(OpeningKind::Door, door, FlipAxis::X));
    assert!(!ed.doors()[0].flip_x);
    assert!(!ed.flip_opening(OpeningKind::Window, window, FlipAxis::X));
    assert!(ed.flip_opening(OpeningKind::Window, window, FlipAxis::Y));
    assert!(ed.windows()[0].flip_y);
}

#[test]
fn unknown_ids_are_reported() {
    let mut ed = Editor::new();
    let e = ed.try_update_room(floorplan::RoomId::new(), RoomPatch::default()).unwrap_err();
    assert_eq!(e.code(), "not_found");
    let e = ed.try_delete_wall(floorplan::WallId::new()).unwrap_err();
    assert_eq!(e.code(), "not_found");
    let e = ed.try_delete_opening(OpeningKind::Window, floorplan::OpeningId::new()).unwrap_err();
    assert!(e.to_string().contains("window"));
}
