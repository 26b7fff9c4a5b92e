// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drives a drawer from raw pointer samples.

use kurbo::Point;
use understory_drawer::{
    BottomPosition, Drawer, DrawerCase, DrawerConfig, DrawerPositions, FixedEnvironment,
    MidPosition, TopPosition,
};
use understory_event_state::drag::DragState;

fn drawer() -> Drawer<FixedEnvironment> {
    Drawer::new(
        DrawerCase::Closed,
        DrawerPositions::new(
            BottomPosition::Absolute(0.0),
            Some(MidPosition::Absolute(250.0)),
            TopPosition::Absolute(500.0),
        ),
        FixedEnvironment::with_screen_size(390.0, 844.0),
        DrawerConfig::default(),
    )
}

/// Plays `samples` (y, timestamp) as one press and returns the resting case.
fn play(drawer: &mut Drawer<FixedEnvironment>, samples: &[(f64, u64)]) -> DrawerCase {
    let mut drag = DragState::new();
    let (first, rest) = samples.split_first().expect("at least one sample");
    drag.on_down(None, Point::new(200.0, first.0), first.1);
    for &(y, t) in rest {
        let update = drag.on_move(None, Point::new(200.0, y), t).expect("active drag");
        drawer.drag_changed(update.translation.y);
    }
    let &(y, t) = samples.last().expect("at least one sample");
    let end = drag.on_up(None, Point::new(200.0, y), t).expect("active drag");
    drawer.drag_ended(end.start, end.end, end.velocity)
}

#[test]
fn flick_up_from_closed_stops_at_mid() {
    let mut drawer = drawer();
    let case = play(&mut drawer, &[(800.0, 0), (780.0, 16), (750.0, 32)]);
    assert_eq!(case, DrawerCase::PartiallyOpened);
    assert_eq!(drawer.current_position(), 250.0);
}

#[test]
fn flick_down_from_top_stops_at_mid() {
    let mut drawer = drawer();
    drawer.set_case(DrawerCase::FullyOpened);
    let case = play(&mut drawer, &[(400.0, 0), (420.0, 16), (460.0, 32)]);
    assert_eq!(case, DrawerCase::PartiallyOpened);
}

#[test]
fn slow_drag_snaps_to_nearest() {
    let mut drawer = drawer();
    // 420 points over two seconds, then a pause.
    let case = play(
        &mut drawer,
        &[(800.0, 0), (590.0, 1000), (380.0, 2000), (380.0, 2300)],
    );
    assert_eq!(case, DrawerCase::FullyOpened);
    assert_eq!(drawer.current_position(), 500.0);
}

#[test]
fn over_drag_is_clamped_before_release() {
    let mut drawer = drawer();
    let mut drag = DragState::new();
    drag.on_down(None, Point::new(0.0, 800.0), 0);
    let update = drag.on_move(None, Point::new(0.0, 0.0), 500).expect("active drag");
    drawer.drag_changed(update.translation.y);
    assert_eq!(drawer.current_position(), 500.0);
}
