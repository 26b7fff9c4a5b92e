// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolves position specs into offsets from the bottom of the container.
//!
//! All values produced here are heights: the distance from the bottom edge of
//! the container to the drawer's top edge. Bottom specs always add the drag
//! handle's measured height so the handle clears the reference line; an
//! absolute mid spec describes the whole panel and is returned unmodified.

use crate::env::Environment;
use crate::error::Measurement;
use crate::position::{BottomPosition, MidPosition, TopPosition};
use crate::state::{DrawerCase, DrawerState};

/// Divisor for the floating-button fade.
const FADE_DISTANCE: f64 = 100.0;

/// Default pixel distance above the resting point over which floating buttons fade.
pub const DEFAULT_FLOATING_BUTTONS_OFFSET: f64 = 100.0;

/// Resolves specs against live environment measurements.
#[derive(Clone, Debug)]
pub struct PositionCalculator<E> {
    env: E,
    drag_handle_height: f64,
    floating_buttons_offset: f64,
}

impl<E: Environment> PositionCalculator<E> {
    /// Creates a calculator over `env` with a measured drag-handle height.
    #[must_use]
    pub fn new(env: E, drag_handle_height: f64) -> Self {
        Self {
            env,
            drag_handle_height,
            floating_buttons_offset: DEFAULT_FLOATING_BUTTONS_OFFSET,
        }
    }

    /// Sets the fade modifier used by [`floating_buttons_opacity`](Self::floating_buttons_opacity).
    #[must_use]
    pub fn with_floating_buttons_offset(mut self, offset: f64) -> Self {
        self.floating_buttons_offset = offset;
        self
    }

    /// Returns the environment.
    #[must_use]
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Returns the environment mutably, for hosts that store measurements by value.
    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    /// Returns the measured drag-handle height.
    #[must_use]
    pub const fn drag_handle_height(&self) -> f64 {
        self.drag_handle_height
    }

    /// Updates the measured drag-handle height.
    pub fn set_drag_handle_height(&mut self, height: f64) {
        self.drag_handle_height = height;
    }

    /// Returns the fade modifier.
    #[must_use]
    pub const fn floating_buttons_offset(&self) -> f64 {
        self.floating_buttons_offset
    }

    fn screen_height(&self) -> f64 {
        self.env.bounds().height()
    }

    fn safe_area_top(&self) -> f64 {
        self.env.insets().y0
    }

    fn safe_area_bottom(&self) -> f64 {
        self.env.insets().y1
    }

    fn tab_bar_height(&self) -> f64 {
        self.env.frame().height()
    }

    /// Returns the first measurement that is NaN or infinite, if any.
    #[must_use]
    pub fn non_finite_measurement(&self) -> Option<Measurement> {
        [
            (Measurement::DragHandleHeight, self.drag_handle_height),
            (Measurement::FloatingButtonsOffset, self.floating_buttons_offset),
            (Measurement::ScreenHeight, self.screen_height()),
            (Measurement::SafeAreaTop, self.safe_area_top()),
            (Measurement::SafeAreaBottom, self.safe_area_bottom()),
            (Measurement::TabBarHeight, self.tab_bar_height()),
        ]
        .into_iter()
        .find_map(|(measurement, value)| (!value.is_finite()).then_some(measurement))
    }

    /// Resolves a bottom spec.
    #[must_use]
    pub fn bottom_value(&self, position: BottomPosition) -> f64 {
        let base = match position {
            BottomPosition::Absolute(v) => v,
            BottomPosition::RelativeToSafeAreaBottom(offset) => self.safe_area_bottom() + offset,
            BottomPosition::RelativeToTabBar(offset) => {
                self.safe_area_bottom() + self.tab_bar_height() + offset
            }
            BottomPosition::MatchesHeaderHeightAlignedToSafeAreaBottom(height) => {
                self.safe_area_bottom() + height
            }
            BottomPosition::MatchesHeaderHeightAlignedToTabBar(height) => {
                self.safe_area_bottom() + self.tab_bar_height() + height
            }
        };
        base + self.drag_handle_height
    }

    /// Resolves a mid spec.
    #[must_use]
    pub fn mid_value(&self, position: MidPosition) -> f64 {
        match position {
            MidPosition::Absolute(v) => v,
            MidPosition::RelativeToSafeAreaBottom(offset) => {
                self.safe_area_bottom() + offset + self.drag_handle_height
            }
            MidPosition::RelativeToTabBar(offset) => {
                self.safe_area_bottom() + self.tab_bar_height() + offset + self.drag_handle_height
            }
        }
    }

    /// Resolves a top spec.
    #[must_use]
    pub fn top_value(&self, position: TopPosition) -> f64 {
        match position {
            TopPosition::Absolute(v) => v,
            TopPosition::RelativeToSafeAreaTop(offset) => {
                self.screen_height() - self.safe_area_top() - offset
            }
        }
    }

    /// Top inset that places the panel at the state's current position.
    #[must_use]
    pub fn padding_top(&self, state: &DrawerState) -> f64 {
        self.screen_height() - state.current_position()
    }

    /// Bottom padding for the scrollable content.
    ///
    /// Nonzero only while fully opened, so the tab bar and home indicator do
    /// not cover the end of the content.
    #[must_use]
    pub fn content_bottom_padding(&self, state: &DrawerState, bottom: BottomPosition) -> f64 {
        if state.case() != DrawerCase::FullyOpened {
            return 0.0;
        }
        let padding = self.padding_top(state) + self.safe_area_bottom();
        if bottom.is_tab_bar_aligned() {
            padding + self.tab_bar_height()
        } else {
            padding
        }
    }

    /// Opacity for floating buttons that sit above the drawer.
    ///
    /// Fades linearly as the drawer rises past its lowest resting point (the
    /// mid position if configured, else the bottom). The result is not
    /// clamped.
    #[must_use]
    pub fn floating_buttons_opacity(
        &self,
        current_position: f64,
        bottom: BottomPosition,
        mid: Option<MidPosition>,
    ) -> f64 {
        let threshold = match mid {
            Some(mid) => self.mid_value(mid),
            None => self.bottom_value(bottom),
        };
        (threshold + self.floating_buttons_offset - current_position) / FADE_DISTANCE
    }
}
