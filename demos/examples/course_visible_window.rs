// Copyright 2025 the Detour Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Course visible window.
//!
//! Load a course, scroll across it the way the game loop does, and list the
//! obstacles on screen at each step. Then edit it with the mouse rules and save.
//!
//! Run:
//! - `cargo run -p detour_demos --example course_visible_window`

use detour_course::{Buttons, Course, CourseConfig, Editor, Record};
use kurbo::Point;

fn main() {
    let config = CourseConfig {
        cull_margin: 8.0,
        ..Default::default()
    };
    let mut course = Course::new(config).unwrap();
    let loaded = course.load((0..40).map(|i| Record {
        x: i * 45,
        y: 96 + (i % 3) * 24,
        kind: (i % 5) as u8,
    }));
    println!("loaded {loaded} obstacles");

    for offset in [0.0, 300.0, 900.0, 1700.0] {
        let names: Vec<_> = course
            .visible(offset)
            .map(|p| format!("{}@{}", p.kind.name(), p.x))
            .collect();
        println!("offset {offset:>6}: {}", names.join(", "));
    }

    // Place a cone where nothing is, then delete what sits under another cursor.
    let mut editor = Editor::new();
    editor.cycle_kind();
    let empty_spot = Point::new(20.0, 40.0);
    editor.hover(&course, empty_spot, 300.0);
    let edits = editor.press(Buttons::PRIMARY, &mut course, empty_spot, 300.0);
    println!("edits: {edits:?}");

    let occupied = Point::new(15.0, 100.0);
    if let Some(focused) = editor.hover(&course, occupied, 0.0) {
        println!(
            "hovering {} at ({}, {})",
            focused.kind.name(),
            focused.x,
            focused.y
        );
        let edits = editor.press(Buttons::SECONDARY, &mut course, occupied, 0.0);
        println!("edits: {edits:?}");
    }

    let saved = course.records();
    println!("saved {} records, first {:?}", saved.len(), saved.first());
}
