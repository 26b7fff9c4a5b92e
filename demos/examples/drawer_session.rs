// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless drawer session: raw pointer samples in, snap positions out.
//!
//! This example shows how to combine:
//! - `understory_event_state` to turn pointer samples into drag translations and release velocity,
//! - `understory_drawer` to follow the drag, settle it, and hand touches to scrolling content,
//! - a sticky header whose measured height drives the closed position.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example drawer_session`

use kurbo::{Insets, Point, Rect};
use tracing_subscriber::EnvFilter;
use understory_drawer::{
    BottomPosition, Drawer, DrawerCase, DrawerConfig, DrawerPositions, FixedEnvironment,
    MidPosition, TopPosition,
};
use understory_event_state::drag::DragState;

/// A phone-sized screen with a notch, a home indicator, and a tab bar.
fn phone() -> FixedEnvironment {
    FixedEnvironment {
        screen_bounds: Rect::new(0.0, 0.0, 390.0, 844.0),
        safe_area_insets: Insets::new(0.0, 47.0, 0.0, 34.0),
        tab_bar_frame: Rect::new(0.0, 761.0, 390.0, 810.0),
    }
}

/// Feeds one press worth of `(y, timestamp)` samples into the drawer.
fn gesture(drawer: &mut Drawer<FixedEnvironment>, label: &str, samples: &[(f64, u64)]) {
    let mut drag = DragState::new();
    let Some((&(y0, t0), rest)) = samples.split_first() else {
        return;
    };
    drag.on_down(None, Point::new(195.0, y0), t0);
    for &(y, t) in rest {
        if let Some(update) = drag.on_move(None, Point::new(195.0, y), t) {
            drawer.drag_changed(update.translation.y);
        }
    }
    let (y, t) = samples[samples.len() - 1];
    if let Some(end) = drag.on_up(None, Point::new(195.0, y), t) {
        let case = drawer.drag_ended(end.start, end.end, end.velocity);
        report(drawer, &format!("{label} -> {case}"));
    }
}

fn report(drawer: &Drawer<FixedEnvironment>, label: &str) {
    println!(
        "{label:<40} position={:>6.1} padding_top={:>6.1} content_bottom={:>6.1} fab_opacity={:.2}",
        drawer.current_position(),
        drawer.padding_top(),
        drawer.content_bottom_padding(),
        drawer.floating_buttons_opacity(),
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let positions = DrawerPositions::new(
        BottomPosition::MatchesHeaderHeightAlignedToTabBar(0.0),
        Some(MidPosition::RelativeToTabBar(280.0)),
        TopPosition::RelativeToSafeAreaTop(12.0),
    );
    let config = DrawerConfig {
        drag_handle_height: 20.0,
        ..DrawerConfig::default()
    };
    let mut drawer = match Drawer::try_new(DrawerCase::Closed, positions, phone(), config) {
        Ok(drawer) => drawer,
        Err(err) => {
            eprintln!("invalid drawer configuration: {err}");
            return;
        }
    };
    report(&drawer, "appeared");

    // Layout measured the sticky header.
    drawer.set_header_height(64.0);
    report(&drawer, "header measured");

    gesture(&mut drawer, "flick up", &[(700.0, 0), (680.0, 16), (640.0, 32)]);
    gesture(&mut drawer, "flick up again", &[(500.0, 0), (470.0, 16), (420.0, 32)]);

    // Content scrolled down a bit: scrolling it back up stays with the content.
    let content_scrolls = drawer.should_content_begin_dragging(120.0, 30.0);
    println!("content scrolls with offset 120 and finger moving down: {content_scrolls}");
    drawer.scroll_handoff_mut().on_did_scroll(0.0);
    drawer.scroll_handoff_mut().on_dragging_ended(false);

    // At the top of the content a downward pull moves the drawer instead.
    let content_scrolls = drawer.should_content_begin_dragging(0.0, 30.0);
    println!("content scrolls with offset 0 and finger moving down: {content_scrolls}");

    gesture(
        &mut drawer,
        "slow pull down",
        &[(100.0, 0), (300.0, 900), (500.0, 1800), (500.0, 2100)],
    );

    // A render pass asks to close; apply it once the pass is over.
    drawer.request_case(DrawerCase::Closed);
    report(&drawer, "close requested");
    drawer.flush();
    report(&drawer, "flushed");
}
