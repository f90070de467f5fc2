// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use journey_board_domain::{JourneyId, StageId};

use crate::collision::{DropZone, Point, Rect, resolve_drop_target};
use crate::drag::DropTarget;

fn create_test_zones() -> Vec<DropZone> {
    vec![
        DropZone {
            target: DropTarget::Column(StageId::Lead),
            rect: Rect::new(0.0, 0.0, 100.0, 400.0),
        },
        DropZone {
            target: DropTarget::Card(JourneyId::new("7")),
            rect: Rect::new(110.0, 10.0, 80.0, 50.0),
        },
        DropZone {
            target: DropTarget::Column(StageId::Qualified),
            rect: Rect::new(110.0, 0.0, 100.0, 400.0),
        },
    ]
}

#[test]
fn test_pointer_intersection_wins() {
    let zones: Vec<DropZone> = create_test_zones();
    let pointer: Point = Point { x: 50.0, y: 50.0 };
    let dragged: Rect = Rect::new(40.0, 40.0, 80.0, 50.0);

    assert_eq!(
        resolve_drop_target(pointer, &dragged, &zones),
        Some(DropTarget::Column(StageId::Lead))
    );
}

#[test]
fn test_first_pointer_collision_is_taken() {
    let zones: Vec<DropZone> = create_test_zones();
    // Pointer inside both the card and its column; the card is listed
    // first and wins.
    let pointer: Point = Point { x: 120.0, y: 20.0 };
    let dragged: Rect = Rect::new(115.0, 15.0, 10.0, 10.0);

    let zones_card_first: Vec<DropZone> = vec![zones[1].clone(), zones[2].clone()];
    assert_eq!(
        resolve_drop_target(pointer, &dragged, &zones_card_first),
        Some(DropTarget::Card(JourneyId::new("7")))
    );
}

#[test]
fn test_rect_intersection_fallback() {
    let zones: Vec<DropZone> = create_test_zones();
    // Pointer outside every zone; the dragged rect overlaps the
    // Qualified column the most.
    let pointer: Point = Point { x: 500.0, y: 500.0 };
    let dragged: Rect = Rect::new(150.0, 100.0, 100.0, 50.0);

    assert_eq!(
        resolve_drop_target(pointer, &dragged, &zones),
        Some(DropTarget::Column(StageId::Qualified))
    );
}

#[test]
fn test_no_collision_resolves_to_none() {
    let zones: Vec<DropZone> = create_test_zones();
    let pointer: Point = Point { x: 999.0, y: 999.0 };
    let dragged: Rect = Rect::new(900.0, 900.0, 10.0, 10.0);

    assert_eq!(resolve_drop_target(pointer, &dragged, &zones), None);
}

#[test]
fn test_rect_contains_is_inclusive() {
    let rect: Rect = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(rect.contains(Point { x: 0.0, y: 0.0 }));
    assert!(rect.contains(Point { x: 10.0, y: 10.0 }));
    assert!(!rect.contains(Point { x: 10.1, y: 10.0 }));
}

#[test]
fn test_intersection_area() {
    let a: Rect = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b: Rect = Rect::new(5.0, 5.0, 10.0, 10.0);
    let c: Rect = Rect::new(20.0, 20.0, 5.0, 5.0);

    assert!((a.intersection_area(&b) - 25.0).abs() < f64::EPSILON);
    assert!(a.intersection_area(&c).abs() < f64::EPSILON);
}
