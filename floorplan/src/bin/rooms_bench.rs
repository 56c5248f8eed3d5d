#[cfg(feature = "bench_rooms")]
use floorplan::{detect_rooms, fragment, merge_duplicates, Point, Wall};
#[cfg(feature = "bench_rooms")]
use std::time::Instant;

#[cfg(not(feature = "bench_rooms"))]
fn main() {
    panic!("rooms_bench requires --features bench_rooms");
}

// Long walls spanning the whole grid, so fragmentation has to cut every one
// of them at each crossing.
#[cfg(feature = "bench_rooms")]
fn grid_walls(w: usize, h: usize, cell: f64) -> Vec<Wall> {
    let mut walls = Vec::with_capacity(w + h + 2);
    for j in 0..=h {
        let y = j as f64 * cell;
        walls.push(Wall::new(Point::new(0.0, y), Point::new(w as f64 * cell, y), 15.0));
    }
    for i in 0..=w {
        let x = i as f64 * cell;
        walls.push(Wall::new(Point::new(x, 0.0), Point::new(x, h as f64 * cell), 15.0));
    }
    walls
}

#[cfg(feature = "bench_rooms")]
fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut w = 8usize;
    let mut h = 6usize;
    let mut repeats = 20usize;
    for a in &args[1..] {
        if let Some(val) = a.strip_prefix("--w=") {
            if let Ok(v) = val.parse() {
                w = v;
            }
        } else if let Some(val) = a.strip_prefix("--h=") {
            if let Ok(v) = val.parse() {
                h = v;
            }
        } else if let Some(val) = a.strip_prefix("--repeats=") {
            if let Ok(v) = val.parse() {
                repeats = v;
            }
        }
    }

    let raw = grid_walls(w, h, 300.0);
    let t0 = Instant::now();
    let mut frags = Vec::new();
    for _ in 0..repeats {
        frags = merge_duplicates(fragment(&raw), 1.0);
    }
    let frag_ms = t0.elapsed().as_secs_f64() * 1000.0 / repeats.max(1) as f64;

    // First pass names every room; later passes exercise identity matching.
    let mut rooms = detect_rooms(&frags, &[]);
    let t1 = Instant::now();
    for _ in 0..repeats {
        rooms = detect_rooms(&frags, &rooms);
    }
    let rooms_ms = t1.elapsed().as_secs_f64() * 1000.0 / repeats.max(1) as f64;

    println!(
        "grid={}x{} walls={} fragments={} rooms={} fragment_ms={:.3} detect_ms={:.3}",
        w,
        h,
        raw.len(),
        frags.len(),
        rooms.len(),
        frag_ms,
        rooms_ms
    );
}
