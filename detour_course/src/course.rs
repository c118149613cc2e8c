// Copyright 2025 the Detour Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`Course`]: the placed obstacles of one level, ordered by position.

use alloc::vec::Vec;
use core::cmp::Ordering;

use detour_index::{BalancedIndex, InOrder};
use kurbo::{Point, Vec2};

use crate::config::{ConfigError, CourseConfig};
use crate::types::{ObstacleKind, Placement, Record, contains_inclusive};

/// Obstacles of one level, kept sorted by `(x, y)`.
///
/// A course is created when a level loads and dropped when it unloads.
///
/// Screen-space inputs take the horizontal scroll `offset`: a world point
/// `(x, y)` shows at screen `(x - offset, y)`.
#[derive(Clone, Debug)]
pub struct Course {
    index: BalancedIndex<Placement>,
    config: CourseConfig,
}

impl Course {
    /// Create an empty course.
    pub fn new(config: CourseConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            index: BalancedIndex::new(),
            config,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &CourseConfig {
        &self.config
    }

    /// The underlying ordered index.
    pub fn index(&self) -> &BalancedIndex<Placement> {
        &self.index
    }

    /// Number of placed obstacles.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether nothing is placed.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Remove every obstacle.
    pub fn clear(&mut self) {
        self.index.clear();
    }

    /// All placements, ascending by `(x, y)`.
    pub fn iter(&self) -> InOrder<'_, Placement> {
        self.index.in_order()
    }

    /// Add an obstacle. Returns `false` if `(x, y)` is already occupied.
    pub fn place(&mut self, placement: Placement) -> bool {
        let placed = self.index.insert(placement);
        if placed {
            log::debug!(
                "placed {} at ({}, {})",
                placement.kind.name(),
                placement.x,
                placement.y
            );
        } else {
            log::debug!(
                "({}, {}) is occupied, dropped {}",
                placement.x,
                placement.y,
                placement.kind.name()
            );
        }
        placed
    }

    /// Remove the obstacle at `(x, y)`, if any.
    pub fn remove(&mut self, x: i32, y: i32) -> Option<Placement> {
        let removed = self.index.delete(&Placement::at(x, y));
        if let Some(placement) = &removed {
            log::debug!("removed {} at ({x}, {y})", placement.kind.name());
        }
        removed
    }

    /// The obstacle at exactly `(x, y)`.
    pub fn get(&self, x: i32, y: i32) -> Option<&Placement> {
        self.index
            .search(&Placement::at(x, y))
            .map(|node| node.key())
    }

    /// Obstacles whose sprite overlaps the viewport (widened by the cull
    /// margin) at scroll `offset`, ascending.
    ///
    /// Two boundary searches find the first and last candidates; only the keys
    /// between them are visited.
    pub fn visible(&self, offset: f64) -> impl Iterator<Item = &Placement> + '_ {
        let left = offset - self.config.cull_margin;
        let right = offset + self.config.viewport.width + self.config.cull_margin;
        // Any sprite starting further left than this ends before `left`.
        let reach = ObstacleKind::widest();
        log::trace!("visible window x in [{left}, {right}]");

        let lower = move |p: &Placement| {
            if f64::from(p.x) + reach >= left {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        };
        let upper = move |p: &Placement| {
            if f64::from(p.x) <= right {
                Ordering::Greater
            } else {
                Ordering::Less
            }
        };
        self.index.window(lower, upper).filter(move |p| {
            let bounds = p.bounds();
            bounds.x1 >= left && bounds.x0 <= right
        })
    }

    /// The topmost visible obstacle whose sprite contains the screen-space
    /// `cursor`. Later keys draw on top.
    pub fn obstacle_at(&self, cursor: Point, offset: f64) -> Option<Placement> {
        let scroll = Vec2::new(offset, 0.0);
        self.visible(offset)
            .filter(|p| contains_inclusive(p.bounds() - scroll, cursor))
            .last()
            .copied()
    }

    /// Visible obstacles whose hitbox contains the screen-space point `pt`.
    pub fn hits(&self, pt: Point, offset: f64) -> impl Iterator<Item = &Placement> + '_ {
        let scroll = Vec2::new(offset, 0.0);
        self.visible(offset)
            .filter(move |p| contains_inclusive(p.hitbox() - scroll, pt))
    }

    /// Replace the course with `records`, inserted in order.
    ///
    /// Unknown type indices load as [`ObstacleKind::Hole`]. Records at an
    /// occupied position are dropped. Returns how many were placed.
    pub fn load<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = Record>,
    {
        self.index.clear();
        let mut seen = 0_usize;
        let mut placed = 0_usize;
        for record in records {
            seen += 1;
            let kind = ObstacleKind::from_index(record.kind).unwrap_or_else(|| {
                log::warn!(
                    "unknown obstacle type {} at ({}, {}), loading a hole",
                    record.kind,
                    record.x,
                    record.y
                );
                ObstacleKind::Hole
            });
            if self.index.insert(Placement::new(kind, record.x, record.y)) {
                placed += 1;
            }
        }
        log::debug!("loaded {placed} of {seen} obstacle records");
        placed
    }

    /// Records for every obstacle, ascending by `(x, y)`.
    pub fn records(&self) -> Vec<Record> {
        self.iter().copied().map(Record::from).collect()
    }
}

impl Default for Course {
    fn default() -> Self {
        Self {
            index: BalancedIndex::new(),
            config: CourseConfig::default(),
        }
    }
}
