// Copyright 2025 the Detour Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-game level editor: palette selection, hover focus, and mouse edits.

use alloc::vec::Vec;

use kurbo::{Point, Vec2};

use crate::course::Course;
use crate::types::{ObstacleKind, Placement};

bitflags::bitflags! {
    /// Mouse buttons pressed in one input event.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Buttons: u8 {
        /// Place the selected kind under the cursor.
        const PRIMARY   = 0b0000_0001;
        /// Advance the palette.
        const MIDDLE    = 0b0000_0010;
        /// Delete the focused obstacle.
        const SECONDARY = 0b0000_0100;
    }
}

/// A change made by the editor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Edit {
    /// A new obstacle was placed.
    Placed(Placement),
    /// An obstacle was deleted.
    Removed(Placement),
    /// The palette moved to a new kind.
    Selected(ObstacleKind),
}

/// Editor state layered over a [`Course`].
///
/// Call [`hover`](Self::hover) once per frame with the cursor position, then
/// feed button presses to [`press`](Self::press) (or the single-button methods).
#[derive(Clone, Debug, Default)]
pub struct Editor {
    selected: ObstacleKind,
    focused: Option<Placement>,
}

impl Editor {
    /// Editor with the first palette kind selected and nothing focused.
    pub fn new() -> Self {
        Self::default()
    }

    /// Kind that the primary button places.
    pub fn selected(&self) -> ObstacleKind {
        self.selected
    }

    /// Select a palette kind directly.
    pub fn select(&mut self, kind: ObstacleKind) {
        self.selected = kind;
    }

    /// Advance the palette, wrapping around. Returns the new selection.
    pub fn cycle_kind(&mut self) -> ObstacleKind {
        self.selected = self.selected.next();
        self.selected
    }

    /// Obstacle under the cursor as of the last [`hover`](Self::hover).
    pub fn focused(&self) -> Option<Placement> {
        self.focused
    }

    /// Refocus on the topmost obstacle under the screen-space `cursor`.
    pub fn hover(&mut self, course: &Course, cursor: Point, offset: f64) -> Option<Placement> {
        self.focused = course.obstacle_at(cursor, offset);
        self.focused
    }

    /// Place the selected kind at the cursor's world position, snapped to whole
    /// pixels. Does nothing while an obstacle is focused or if the position is
    /// taken.
    pub fn primary(
        &mut self,
        course: &mut Course,
        cursor: Point,
        offset: f64,
    ) -> Option<Placement> {
        if self.focused.is_some() {
            return None;
        }
        let world = (cursor + Vec2::new(offset, 0.0)).round();
        #[allow(
            clippy::cast_possible_truncation,
            reason = "World positions are bounded by the course length, far inside i32."
        )]
        let placement = Placement::new(self.selected, world.x as i32, world.y as i32);
        course.place(placement).then_some(placement)
    }

    /// Delete the focused obstacle and clear the focus.
    pub fn secondary(&mut self, course: &mut Course) -> Option<Placement> {
        let focused = self.focused.take()?;
        course.remove(focused.x, focused.y)
    }

    /// Apply every pressed button: primary, then middle, then secondary.
    pub fn press(
        &mut self,
        buttons: Buttons,
        course: &mut Course,
        cursor: Point,
        offset: f64,
    ) -> Vec<Edit> {
        let mut edits = Vec::new();
        if buttons.contains(Buttons::PRIMARY)
            && let Some(placed) = self.primary(course, cursor, offset)
        {
            edits.push(Edit::Placed(placed));
        }
        if buttons.contains(Buttons::MIDDLE) {
            edits.push(Edit::Selected(self.cycle_kind()));
        }
        if buttons.contains(Buttons::SECONDARY)
            && let Some(removed) = self.secondary(course)
        {
            edits.push(Edit::Removed(removed));
        }
        edits
    }
}
