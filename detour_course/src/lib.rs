// Copyright 2025 the Detour Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Detour Course: the obstacle layout of a side-scrolling level.
//!
//! A [`Course`] keeps every placed obstacle in a [`detour_index::BalancedIndex`]
//! ordered by world position, so the game can:
//!
//! - find the obstacles on screen each frame with two boundary searches and a
//!   short forward walk ([`Course::visible`]);
//! - test the player against padded hitboxes ([`Course::hits`]);
//! - load and save the layout as flat [`Record`]s in position order.
//!
//! The [`Editor`] adds the in-game editing rules on top: a palette of
//! [`ObstacleKind`]s, hover focus, and place/delete on mouse buttons.
//!
//! Geometry uses Kurbo types. World `x` grows along the road; a horizontal
//! scroll `offset` maps it to screen `x - offset`.
//!
//! # Example
//!
//! ```rust
//! use detour_course::{Course, CourseConfig, ObstacleKind, Placement, Record};
//! use kurbo::Point;
//!
//! let mut course = Course::new(CourseConfig::default()).unwrap();
//! course.place(Placement::new(ObstacleKind::Cone, 60, 100));
//! course.place(Placement::new(ObstacleKind::EvilTaxi, 500, 120));
//!
//! // Only the cone is on screen at the start of the road.
//! let on_screen: Vec<_> = course.visible(0.0).collect();
//! assert_eq!(on_screen.len(), 1);
//! assert_eq!(on_screen[0].kind, ObstacleKind::Cone);
//!
//! // Scroll the taxi into view and run into it.
//! let hits: Vec<_> = course.hits(Point::new(10.0, 125.0), 490.0).collect();
//! assert_eq!(hits[0].kind.damage(), 30);
//!
//! // Save, then restore into a fresh course.
//! let saved: Vec<Record> = course.records();
//! let mut restored = Course::default();
//! restored.load(saved.iter().copied());
//! assert_eq!(restored.records(), saved);
//! ```
//!
//! ## Features
//!
//! - `std` (enabled by default): Use the Rust standard library.
//! - `libm`: Use floating point implementations from `libm` in `no_std` builds.
//!
//! This crate logs through the [`log`] facade and never installs a logger.

#![no_std]

extern crate alloc;

mod config;
mod course;
mod editor;
mod types;

pub use config::{ConfigError, CourseConfig};
pub use course::Course;
pub use editor::{Buttons, Edit, Editor};
pub use types::{ObstacleKind, Placement, Record};
