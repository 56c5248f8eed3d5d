use floorplan::{Editor, EditorConfig, EditorSnapshot, Point};

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

#[test]
fn undo_redo_symmetry_over_mixed_edits() {
    let mut ed = Editor::new();
    let mut states: Vec<EditorSnapshot> = vec![ed.snapshot().clone()];

    assert!(ed.add_wall(p(0.0, 0.0), p(400.0, 0.0)));
    states.push(ed.snapshot().clone());
    assert!(ed.add_wall(p(400.0, 0.0), p(400.0, 300.0)));
    states.push(ed.snapshot().clone());
    assert!(ed.add_wall(p(400.0, 300.0), p(0.0, 300.0)));
    states.push(ed.snapshot().clone());
    assert!(ed.add_wall(p(0.0, 300.0), p(0.0, 0.0)));
    states.push(ed.snapshot().clone());

    let bottom = ed.walls().iter().find(|w| w.start.y == 0.0 && w.end.y == 0.0).unwrap().id;
    ed.add_door(bottom, 0.5).unwrap();
    states.push(ed.snapshot().clone());
    assert!(ed.split_wall(bottom, Some(p(100.0, 0.0))));
    states.push(ed.snapshot().clone());

    // Drag the right wall out by 50.
    ed.on_pointer_down(p(400.0, 150.0));
    ed.on_pointer_move(p(450.0, 150.0));
    ed.on_pointer_up(p(450.0, 150.0));
    states.push(ed.snapshot().clone());
    assert!((ed.rooms()[0].area - 13.5).abs() < 1e-9);

    let n = states.len() - 1;
    for i in (0..n).rev() {
        assert!(ed.undo());
        assert_eq!(ed.snapshot(), &states[i], "undo to state {i}");
    }
    assert!(!ed.undo());
    for i in 1..=n {
        assert!(ed.redo());
        assert_eq!(ed.snapshot(), &states[i], "redo to state {i}");
    }
    assert!(!ed.redo());
}

#[test]
fn fresh_edit_after_undo_drops_redo() {
    let mut ed = Editor::new();
    ed.add_wall(p(0.0, 0.0), p(100.0, 0.0));
    ed.add_wall(p(0.0, 100.0), p(100.0, 100.0));
    assert!(ed.undo());
    assert!(ed.can_redo());
    ed.add_wall(p(0.0, 200.0), p(100.0, 200.0));
    assert!(!ed.can_redo());
    assert!(!ed.redo());
    assert_eq!(ed.walls().len(), 2);
}

#[test]
fn history_depth_is_bounded() {
    let cfg = EditorConfig { history_depth: 3, ..EditorConfig::default() };
    let mut ed = Editor::with_config(cfg).unwrap();
    for i in 0..6 {
        let y = i as f64 * 100.0;
        ed.add_wall(p(0.0, y), p(100.0, y));
    }
    let mut undone = 0;
    while ed.undo() {
        undone += 1;
    }
    assert_eq!(undone, 3);
    assert_eq!(ed.walls().len(), 3);
}

#[test]
fn clear_is_undoable_and_noop_when_empty() {
    let mut ed = Editor::new();
    ed.clear_all();
    assert!(!ed.can_undo());
    ed.add_wall(p(0.0, 0.0), p(100.0, 0.0));
    ed.clear_all();
    assert!(ed.walls().is_empty());
    assert!(ed.undo());
    assert_eq!(ed.walls().len(), 1);
}
