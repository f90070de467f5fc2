// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Drop-target collision resolution.
//!
//! Resolution prefers the drop zone under the pointer; when the pointer
//! is over no zone (fast drags can outrun it), it falls back to the zone
//! with the largest bounding-rect overlap with the dragged card. The
//! first/best colliding target wins.

use crate::drag::DropTarget;

/// A point in board coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

/// An axis-aligned bounding rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Creates a new `Rect`.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns whether a point lies inside this rectangle (inclusive
    /// edges).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Returns the overlap area with another rectangle, zero when
    /// disjoint.
    #[must_use]
    pub fn intersection_area(&self, other: &Self) -> f64 {
        let overlap_x: f64 =
            (self.x + self.width).min(other.x + other.width) - self.x.max(other.x);
        let overlap_y: f64 =
            (self.y + self.height).min(other.y + other.height) - self.y.max(other.y);
        if overlap_x > 0.0 && overlap_y > 0.0 {
            overlap_x * overlap_y
        } else {
            0.0
        }
    }
}

/// A droppable region of the board: a column or a card, with its
/// bounding rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct DropZone {
    /// What dropping here resolves to.
    pub target: DropTarget,
    /// The zone's bounding rectangle.
    pub rect: Rect,
}

/// Resolves the drop target for a drag position.
///
/// Pointer intersection first: the first zone containing the pointer.
/// Otherwise the zone with the largest overlap with the dragged card's
/// rectangle. `None` when nothing collides.
#[must_use]
pub fn resolve_drop_target(
    pointer: Point,
    dragged: &Rect,
    zones: &[DropZone],
) -> Option<DropTarget> {
    if let Some(zone) = zones.iter().find(|zone| zone.rect.contains(pointer)) {
        return Some(zone.target.clone());
    }

    zones
        .iter()
        .map(|zone| (zone, zone.rect.intersection_area(dragged)))
        .filter(|(_, area)| *area > 0.0)
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(zone, _)| zone.target.clone())
}
