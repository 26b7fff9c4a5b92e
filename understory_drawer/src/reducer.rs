// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawer state machine.
//!
//! [`DrawerReducer`] is the only place that moves
//! [`DrawerState::current_position`]. It has three jobs:
//!
//! 1. Follow the finger while a drag is in progress, clamped to
//!    `[bottom, top]`.
//! 2. Pick a resting case when the finger lifts, either from the release
//!    direction or, for slow releases, from the nearest resting position.
//! 3. Re-sync the position whenever the case or a spec changes.
//!
//! ## Release rules
//!
//! A fast release moves one stop in the direction of travel, measured from the
//! zone the drawer was released in:
//!
//! | Direction | Below mid        | At mid       | Above mid        |
//! |-----------|------------------|--------------|------------------|
//! | Up        | partially opened | fully opened | fully opened     |
//! | Down      | closed           | closed       | partially opened |
//!
//! Without a mid position every upward release opens fully and every
//! downward release closes.
//!
//! A slow release snaps to the nearest of bottom, mid, and top. Ties go to
//! the lower candidate.

use kurbo::{Point, Vec2};

use crate::calculator::PositionCalculator;
use crate::direction::{DEFAULT_VELOCITY_THRESHOLD, DragDirection};
use crate::env::Environment;
use crate::position::{BottomPosition, DrawerPositions, MidPosition, TopPosition};
use crate::state::{DrawerCase, DrawerState};

/// Reduces gestures and spec changes into drawer state updates.
#[derive(Clone, Debug)]
pub struct DrawerReducer<E> {
    positions: DrawerPositions,
    calculator: PositionCalculator<E>,
    velocity_threshold: f64,
}

impl<E: Environment> DrawerReducer<E> {
    /// Creates a reducer for one drawer.
    #[must_use]
    pub fn new(positions: DrawerPositions, calculator: PositionCalculator<E>) -> Self {
        Self {
            positions,
            calculator,
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
        }
    }

    /// Sets the minimum release speed for a directional snap.
    #[must_use]
    pub fn with_velocity_threshold(mut self, threshold: f64) -> Self {
        self.velocity_threshold = threshold;
        self
    }

    /// Returns the minimum release speed for a directional snap.
    #[must_use]
    pub const fn velocity_threshold(&self) -> f64 {
        self.velocity_threshold
    }

    /// Returns the configured specs.
    #[must_use]
    pub const fn positions(&self) -> &DrawerPositions {
        &self.positions
    }

    /// Returns the calculator.
    #[must_use]
    pub const fn calculator(&self) -> &PositionCalculator<E> {
        &self.calculator
    }

    /// Returns the calculator mutably; re-sync afterwards if measurements changed.
    pub fn calculator_mut(&mut self) -> &mut PositionCalculator<E> {
        &mut self.calculator
    }

    /// Rebinds the bottom spec.
    pub fn set_bottom_position(&mut self, bottom: BottomPosition) {
        self.positions.bottom = bottom;
    }

    /// Rebinds (or removes) the mid spec.
    pub fn set_mid_position(&mut self, mid: Option<MidPosition>) {
        self.positions.mid = mid;
    }

    /// Rebinds the top spec.
    pub fn set_top_position(&mut self, top: TopPosition) {
        self.positions.top = top;
    }

    /// Resolved bottom position.
    #[must_use]
    pub fn bottom_value(&self) -> f64 {
        self.calculator.bottom_value(self.positions.bottom)
    }

    /// Resolved mid position, if configured.
    #[must_use]
    pub fn mid_value(&self) -> Option<f64> {
        self.positions.mid.map(|mid| self.calculator.mid_value(mid))
    }

    /// Resolved top position.
    #[must_use]
    pub fn top_value(&self) -> f64 {
        self.calculator.top_value(self.positions.top)
    }

    /// Resolved position for a resting case, or `None` while dragging.
    ///
    /// # Panics
    ///
    /// Panics if `case` is [`DrawerCase::PartiallyOpened`] and no mid position is configured.
    #[must_use]
    pub fn value_for_case(&self, case: DrawerCase) -> Option<f64> {
        match case {
            DrawerCase::Dragging => None,
            DrawerCase::Closed => Some(self.bottom_value()),
            DrawerCase::PartiallyOpened => {
                let Some(mid) = self.mid_value() else {
                    panic!("drawer is partially opened but has no mid position");
                };
                Some(mid)
            }
            DrawerCase::FullyOpened => Some(self.top_value()),
        }
    }

    /// Follows the finger during a drag.
    ///
    /// Translations are in screen space (`y` grows downward), so moving the
    /// finger down lowers the drawer. The result is clamped to `[bottom, top]`.
    pub fn on_drag_changed(
        &self,
        state: &mut DrawerState,
        y_translation: f64,
        last_y_translation: f64,
    ) {
        state.set_case(DrawerCase::Dragging);
        let delta = y_translation - last_y_translation;
        let position = (state.current_position() - delta)
            .max(self.bottom_value())
            .min(self.top_value());
        tracing::trace!(delta, position, "drawer drag changed");
        state.set_current_position(position);
    }

    /// Settles the drawer after the finger lifts and returns the new case.
    pub fn on_dragging_ended(
        &self,
        state: &mut DrawerState,
        start_location: Point,
        end_location: Point,
        velocity: Vec2,
    ) -> DrawerCase {
        let direction = DragDirection::classify_with_threshold(
            start_location.y,
            end_location.y,
            velocity.y,
            self.velocity_threshold,
        );
        let position = state.current_position();
        let target = self.directional_case(position, direction);
        tracing::debug!(
            ?direction,
            position,
            to = %target,
            "drawer drag ended"
        );
        state.set_case(target);
        self.sync_current_position(state);
        target
    }

    /// Resting case reached by a release at `position` travelling in `direction`.
    ///
    /// [`DragDirection::Undefined`] falls back to [`nearest_case`](Self::nearest_case).
    #[must_use]
    pub fn directional_case(&self, position: f64, direction: DragDirection) -> DrawerCase {
        match (direction, self.mid_value()) {
            (DragDirection::Up, Some(mid)) if position < mid => DrawerCase::PartiallyOpened,
            (DragDirection::Up, _) => DrawerCase::FullyOpened,
            (DragDirection::Down, Some(mid)) if position > mid => DrawerCase::PartiallyOpened,
            (DragDirection::Down, _) => DrawerCase::Closed,
            (DragDirection::Undefined, _) => self.nearest_case(position),
        }
    }

    /// Resting case whose resolved position is closest to `position`.
    ///
    /// Candidates are compared bottom, mid, top; only a strictly smaller
    /// distance replaces the current best, so ties go to the lower case.
    #[must_use]
    pub fn nearest_case(&self, position: f64) -> DrawerCase {
        let mid_distance = self
            .mid_value()
            .map_or(f64::INFINITY, |mid| (position - mid).abs());
        let candidates = [
            (DrawerCase::Closed, (position - self.bottom_value()).abs()),
            (DrawerCase::PartiallyOpened, mid_distance),
            (DrawerCase::FullyOpened, (position - self.top_value()).abs()),
        ];

        let mut best = candidates[0];
        for candidate in &candidates[1..] {
            if candidate.1 < best.1 {
                best = *candidate;
            }
        }
        best.0
    }

    /// Moves the position to the resolved value for the current case.
    ///
    /// Does nothing while dragging.
    ///
    /// # Panics
    ///
    /// Panics if the state is partially opened and no mid position is configured.
    pub fn sync_current_position(&self, state: &mut DrawerState) {
        if let Some(position) = self.value_for_case(state.case()) {
            state.set_current_position(position);
        }
    }
}
