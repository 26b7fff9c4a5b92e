// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Drawer: the headless core of a draggable bottom sheet.
//!
//! A drawer is a panel anchored to the bottom of the screen that rests at one
//! of up to three snap positions (closed, partially opened, fully opened) and
//! follows the finger in between. This crate owns the logic only; rendering,
//! theming, and the scroll view hosted inside the panel belong to the host.
//!
//! The core concepts are:
//!
//! - Position specs ([`BottomPosition`], [`MidPosition`], [`TopPosition`]):
//!   declarative descriptions of where each resting edge sits, relative to
//!   the screen, the safe area, the tab bar, or a measured header.
//! - [`PositionCalculator`]: resolves specs against an [`Environment`] into
//!   heights measured from the bottom of the container, and derives padding
//!   and floating-button opacity.
//! - [`DrawerState`]: a [`DrawerCase`] plus the continuous current position.
//! - [`DrawerReducer`]: the state machine. It follows drags, clamped to the
//!   resting range, settles released drags via [`DragDirection`], and
//!   re-syncs the position when the case or a spec changes.
//! - [`ScrollHandoff`]: decides whether a touch inside the content scrolls the
//!   content or moves the drawer.
//! - [`Drawer`]: a controller composing all of the above, with a deferred
//!   command queue for transitions requested during a render pass.
//!
//! All heights are distances from the bottom of the container to the drawer's
//! top edge. Gesture coordinates are screen space, with `y` growing downward.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use understory_drawer::{
//!     BottomPosition, Drawer, DrawerCase, DrawerConfig, DrawerPositions, FixedEnvironment,
//!     MidPosition, TopPosition,
//! };
//!
//! let positions = DrawerPositions::new(
//!     BottomPosition::Absolute(0.0),
//!     Some(MidPosition::Absolute(250.0)),
//!     TopPosition::Absolute(500.0),
//! );
//! let env = FixedEnvironment::with_screen_size(390.0, 844.0);
//! let mut drawer = Drawer::new(DrawerCase::Closed, positions, env, DrawerConfig::default());
//!
//! // Drag the finger up by 50 points…
//! drawer.drag_changed(-20.0);
//! drawer.drag_changed(-50.0);
//! assert_eq!(drawer.current_position(), 50.0);
//!
//! // …and release it quickly: the drawer moves on to the mid stop.
//! let case = drawer.drag_ended(
//!     Point::new(0.0, 600.0),
//!     Point::new(0.0, 550.0),
//!     Vec2::new(0.0, -400.0),
//! );
//! assert_eq!(case, DrawerCase::PartiallyOpened);
//! assert_eq!(drawer.current_position(), 250.0);
//!
//! // Programmatic close, deferred until the host's update pass is over.
//! drawer.request_case(DrawerCase::Closed);
//! drawer.flush();
//! assert_eq!(drawer.current_position(), 0.0);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds of `kurbo` that rely on `libm`.
//! - `serde`: derives `Serialize`/`Deserialize` for position specs,
//!   [`DrawerCase`], and [`DrawerConfig`].
//!
//! This crate is `no_std` and does not allocate.

#![no_std]

mod calculator;
mod direction;
mod drawer;
mod env;
mod error;
mod position;
mod reducer;
mod scroll_handoff;
mod state;

pub use calculator::{DEFAULT_FLOATING_BUTTONS_OFFSET, PositionCalculator};
pub use direction::{DEFAULT_VELOCITY_THRESHOLD, DragDirection};
pub use drawer::{Drawer, DrawerCommand, DrawerConfig};
pub use env::{
    Environment, FixedEnvironment, SafeAreaInsetsProviding, ScreenBoundsProviding,
    TabBarFrameProviding,
};
pub use error::{Measurement, PositionEdge, PositionError};
pub use position::{BottomPosition, DrawerPositions, MidPosition, TopPosition};
pub use reducer::DrawerReducer;
pub use scroll_handoff::{HandoffFlags, ScrollHandoff};
pub use state::{DrawerCase, DrawerState};
