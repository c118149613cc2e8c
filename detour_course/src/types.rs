// Copyright 2025 the Detour Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Obstacle catalog, the ordered placement key, and persisted records.

use core::cmp::Ordering;

use kurbo::{Insets, Point, Rect, Size};

/// The kinds of obstacle an editor can place, in registration order.
///
/// The discriminant is the persisted type index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ObstacleKind {
    /// A hole in the road.
    #[default]
    Hole = 0,
    /// A traffic cone.
    Cone = 1,
    /// An oncoming taxi.
    EvilTaxi = 2,
    /// A petrol tanker parked across the lane.
    SolidPetro = 3,
}

impl ObstacleKind {
    /// Every kind, in index order.
    pub const ALL: [Self; 4] = [Self::Hole, Self::Cone, Self::EvilTaxi, Self::SolidPetro];

    /// Number of registered kinds.
    pub const fn count() -> usize {
        Self::ALL.len()
    }

    /// Persisted type index.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Kind for a persisted type index, or `None` if the index is unknown.
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Hole),
            1 => Some(Self::Cone),
            2 => Some(Self::EvilTaxi),
            3 => Some(Self::SolidPetro),
            _ => None,
        }
    }

    /// The next kind in the palette, wrapping back to the first.
    pub const fn next(self) -> Self {
        match self {
            Self::Hole => Self::Cone,
            Self::Cone => Self::EvilTaxi,
            Self::EvilTaxi => Self::SolidPetro,
            Self::SolidPetro => Self::Hole,
        }
    }

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hole => "hole",
            Self::Cone => "cone",
            Self::EvilTaxi => "evil taxi",
            Self::SolidPetro => "solid petro",
        }
    }

    /// Damage dealt on contact.
    pub const fn damage(self) -> u32 {
        match self {
            Self::Hole => 20,
            Self::Cone => 10,
            Self::EvilTaxi | Self::SolidPetro => 30,
        }
    }

    /// Sprite size in world pixels.
    pub const fn size(self) -> Size {
        match self {
            Self::Hole => Size::new(16.0, 8.0),
            Self::Cone => Size::new(8.0, 12.0),
            Self::EvilTaxi => Size::new(32.0, 16.0),
            Self::SolidPetro => Size::new(24.0, 16.0),
        }
    }

    /// How far the hitbox sits inside the sprite on each side.
    ///
    /// Negative values grow the hitbox past the sprite edge.
    pub fn hitbox_padding(self) -> Insets {
        match self {
            // The cone's base is wider than its tip.
            Self::Cone => Insets::new(2.0, 8.0, 2.0, -4.0),
            Self::Hole | Self::EvilTaxi | Self::SolidPetro => Insets::ZERO,
        }
    }

    /// Width of the widest sprite.
    pub fn widest() -> f64 {
        Self::ALL
            .iter()
            .map(|kind| kind.size().width)
            .fold(0.0, f64::max)
    }
}

/// An obstacle at integer world coordinates.
///
/// Ordered and compared by `(x, y)` only; `kind` is payload. Two placements at
/// the same coordinates are therefore equal even if their kinds differ.
#[derive(Copy, Clone, Debug)]
pub struct Placement {
    /// Left edge in world pixels.
    pub x: i32,
    /// Top edge in world pixels.
    pub y: i32,
    /// What sits here.
    pub kind: ObstacleKind,
}

impl Placement {
    /// Create a placement.
    pub const fn new(kind: ObstacleKind, x: i32, y: i32) -> Self {
        Self { x, y, kind }
    }

    /// A lookup key for `(x, y)`; its kind is irrelevant to ordering.
    pub(crate) const fn at(x: i32, y: i32) -> Self {
        Self::new(ObstacleKind::Hole, x, y)
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(f64::from(self.x), f64::from(self.y))
    }

    /// Sprite rectangle in world space.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.origin(), self.kind.size())
    }

    /// Collision rectangle in world space: the bounds shrunk by the kind's padding.
    pub fn hitbox(&self) -> Rect {
        self.bounds() - self.kind.hitbox_padding()
    }
}

impl PartialEq for Placement {
    fn eq(&self, other: &Self) -> bool {
        (self.x, self.y) == (other.x, other.y)
    }
}

impl Eq for Placement {}

impl PartialOrd for Placement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Placement {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.x, self.y).cmp(&(other.x, other.y))
    }
}

/// One persisted obstacle: coordinates plus the kind's type index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Record {
    /// Left edge in world pixels.
    pub x: i32,
    /// Top edge in world pixels.
    pub y: i32,
    /// [`ObstacleKind::index`] of the obstacle.
    pub kind: u8,
}

impl From<Placement> for Record {
    fn from(placement: Placement) -> Self {
        Self {
            x: placement.x,
            y: placement.y,
            kind: placement.kind.index(),
        }
    }
}

/// Whether `pt` lies in `rect`, counting all four edges as inside.
pub(crate) fn contains_inclusive(rect: Rect, pt: Point) -> bool {
    pt.x >= rect.x0 && pt.x <= rect.x1 && pt.y >= rect.y0 && pt.y <= rect.y1
}
