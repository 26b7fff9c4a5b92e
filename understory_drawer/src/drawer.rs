// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A drawer controller that composes the reducer, state, and scroll handoff.
//!
//! Programmatic transitions come in two flavors. [`Drawer::set_case`] applies
//! immediately. [`Drawer::request_case`] queues a [`DrawerCommand`] that takes
//! effect on the next [`Drawer::flush`], which hosts call once the current
//! update pass has finished. This keeps a render pass from mutating the state
//! it is reading. The queue holds at most one pending case and one pending
//! re-sync; a later request replaces an earlier one of the same kind.

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

use crate::calculator::{DEFAULT_FLOATING_BUTTONS_OFFSET, PositionCalculator};
use crate::direction::DEFAULT_VELOCITY_THRESHOLD;
use crate::env::Environment;
use crate::error::PositionError;
use crate::position::{BottomPosition, DrawerPositions, MidPosition, TopPosition};
use crate::reducer::DrawerReducer;
use crate::scroll_handoff::ScrollHandoff;
use crate::state::{DrawerCase, DrawerState};

/// Tunables for a [`Drawer`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DrawerConfig {
    /// Minimum release speed, in units per second, for a directional snap.
    pub velocity_threshold: f64,
    /// Distance above the lowest resting point over which floating buttons fade.
    pub floating_buttons_offset: f64,
    /// Initial drag-handle height, before it is measured.
    pub drag_handle_height: f64,
}

impl DrawerConfig {
    /// Fade modifier for hosts rendering at high pixel density.
    pub const HIGH_DENSITY_FLOATING_BUTTONS_OFFSET: f64 = 200.0;
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
            floating_buttons_offset: DEFAULT_FLOATING_BUTTONS_OFFSET,
            drag_handle_height: 0.0,
        }
    }
}

/// A state change deferred until [`Drawer::flush`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DrawerCommand {
    /// Move to a resting case and re-sync the position.
    SetCase(DrawerCase),
    /// Re-sync the position for the current case.
    Sync,
}

/// One bottom-sheet drawer.
#[derive(Clone, Debug)]
pub struct Drawer<E> {
    state: DrawerState,
    reducer: DrawerReducer<E>,
    handoff: ScrollHandoff,
    last_translation: Option<f64>,
    pending: SmallVec<[DrawerCommand; 2]>,
}

impl<E: Environment> Drawer<E> {
    /// Creates a drawer and syncs it to `initial`.
    ///
    /// # Panics
    ///
    /// Panics if `initial` is [`DrawerCase::PartiallyOpened`] and `positions`
    /// has no mid position.
    #[must_use]
    pub fn new(
        initial: DrawerCase,
        positions: DrawerPositions,
        env: E,
        config: DrawerConfig,
    ) -> Self {
        let calculator = PositionCalculator::new(env, config.drag_handle_height)
            .with_floating_buttons_offset(config.floating_buttons_offset);
        let reducer = DrawerReducer::new(positions, calculator)
            .with_velocity_threshold(config.velocity_threshold);
        let mut state = DrawerState::new(initial);
        reducer.sync_current_position(&mut state);
        tracing::debug!(
            case = %initial,
            position = state.current_position(),
            "drawer appeared"
        );
        Self {
            state,
            reducer,
            handoff: ScrollHandoff::new(),
            last_translation: None,
            pending: SmallVec::new(),
        }
    }

    /// Validates `positions` before creating the drawer.
    pub fn try_new(
        initial: DrawerCase,
        positions: DrawerPositions,
        env: E,
        config: DrawerConfig,
    ) -> Result<Self, PositionError> {
        if initial == DrawerCase::PartiallyOpened && positions.mid.is_none() {
            return Err(PositionError::MissingMidPosition);
        }
        let calculator = PositionCalculator::new(&env, config.drag_handle_height)
            .with_floating_buttons_offset(config.floating_buttons_offset);
        positions.validate(&calculator)?;
        Ok(Self::new(initial, positions, env, config))
    }

    /// Returns the state.
    #[must_use]
    pub const fn state(&self) -> &DrawerState {
        &self.state
    }

    /// Returns the current case.
    #[must_use]
    pub const fn case(&self) -> DrawerCase {
        self.state.case()
    }

    /// Returns the current visible height.
    #[must_use]
    pub const fn current_position(&self) -> f64 {
        self.state.current_position()
    }

    /// Returns the reducer.
    #[must_use]
    pub const fn reducer(&self) -> &DrawerReducer<E> {
        &self.reducer
    }

    /// Returns the configured specs.
    #[must_use]
    pub const fn positions(&self) -> &DrawerPositions {
        self.reducer.positions()
    }

    /// Returns the scroll handoff arbiter.
    #[must_use]
    pub const fn scroll_handoff(&self) -> &ScrollHandoff {
        &self.handoff
    }

    /// Returns the scroll handoff arbiter mutably, for lifecycle callbacks.
    pub fn scroll_handoff_mut(&mut self) -> &mut ScrollHandoff {
        &mut self.handoff
    }

    /// Asks whether the embedded content should scroll for this touch.
    pub fn should_content_begin_dragging(
        &mut self,
        vertical_content_offset: f64,
        vertical_translation: f64,
    ) -> bool {
        self.handoff.should_begin_dragging(
            self.state.case(),
            vertical_content_offset,
            vertical_translation,
        )
    }

    /// Feeds the cumulative vertical translation of the active drag.
    ///
    /// The first call of a drag uses zero as the previous translation.
    /// Ignored while the content owns the touch.
    pub fn drag_changed(&mut self, y_translation: f64) {
        if !self.handoff.drawer_drag_enabled() {
            return;
        }
        let last = self.last_translation.unwrap_or(0.0);
        self.reducer
            .on_drag_changed(&mut self.state, y_translation, last);
        self.last_translation = Some(y_translation);
    }

    /// Finishes the active drag and returns the resting case.
    pub fn drag_ended(&mut self, start: Point, end: Point, velocity: Vec2) -> DrawerCase {
        self.last_translation = None;
        if self.state.case() != DrawerCase::Dragging {
            return self.state.case();
        }
        let released_at = self.state.current_position();
        let to = self
            .reducer
            .on_dragging_ended(&mut self.state, start, end, velocity);
        tracing::debug!(
            released_at,
            to = %to,
            position = self.state.current_position(),
            "drawer settled"
        );
        to
    }

    /// Moves to `case` now and re-syncs the position.
    ///
    /// Requests to enter [`DrawerCase::Dragging`] are ignored; only a touch
    /// starts a drag. Interrupting a drag keeps its last translation, so the
    /// next [`drag_changed`](Self::drag_changed) of the same touch moves the
    /// drawer by that frame's delta only.
    ///
    /// # Panics
    ///
    /// Panics if `case` is [`DrawerCase::PartiallyOpened`] and no mid position is configured.
    pub fn set_case(&mut self, case: DrawerCase) {
        if !case.is_resting() {
            return;
        }
        let from = self.state.case();
        if from != DrawerCase::Dragging {
            self.last_translation = None;
        }
        self.state.set_case(case);
        self.reducer.sync_current_position(&mut self.state);
        tracing::debug!(
            from = %from,
            to = %case,
            position = self.state.current_position(),
            "drawer case set"
        );
    }

    /// Queues a move to `case` for the next [`flush`](Self::flush).
    ///
    /// Replaces any case requested earlier in the same pass.
    pub fn request_case(&mut self, case: DrawerCase) {
        self.pending
            .retain(|command| !matches!(command, DrawerCommand::SetCase(_)));
        self.pending.push(DrawerCommand::SetCase(case));
    }

    /// Queues a re-sync for the next [`flush`](Self::flush).
    ///
    /// Repeated requests collapse into one.
    pub fn request_sync(&mut self) {
        if !self.pending.contains(&DrawerCommand::Sync) {
            self.pending.push(DrawerCommand::Sync);
        }
    }

    /// Returns `true` if commands are waiting for [`flush`](Self::flush).
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Applies queued commands in order and returns how many ran.
    ///
    /// Commands stay queued while a drag is in progress.
    pub fn flush(&mut self) -> usize {
        if self.state.case() == DrawerCase::Dragging || self.pending.is_empty() {
            return 0;
        }
        let pending = core::mem::take(&mut self.pending);
        for command in &pending {
            match *command {
                DrawerCommand::SetCase(case) => self.set_case(case),
                DrawerCommand::Sync => self.sync(),
            }
        }
        tracing::debug!(count = pending.len(), "drawer commands flushed");
        pending.len()
    }

    /// Re-syncs the position for the current case; no-op while dragging.
    pub fn sync(&mut self) {
        self.reducer.sync_current_position(&mut self.state);
    }

    /// Rebinds the bottom spec and re-syncs.
    pub fn set_bottom_position(&mut self, bottom: BottomPosition) {
        tracing::debug!(?bottom, "drawer bottom position rebound");
        self.reducer.set_bottom_position(bottom);
        self.sync();
    }

    /// Rebinds (or removes) the mid spec and re-syncs.
    ///
    /// # Panics
    ///
    /// Panics if the drawer is partially opened and `mid` is `None`.
    pub fn set_mid_position(&mut self, mid: Option<MidPosition>) {
        tracing::debug!(?mid, "drawer mid position rebound");
        self.reducer.set_mid_position(mid);
        self.sync();
    }

    /// Rebinds the top spec and re-syncs.
    pub fn set_top_position(&mut self, top: TopPosition) {
        tracing::debug!(?top, "drawer top position rebound");
        self.reducer.set_top_position(top);
        self.sync();
    }

    /// Feeds a newly measured sticky-header height.
    ///
    /// A bottom spec that matches the header height takes the new value,
    /// keeping its variant. Other specs are untouched. Returns `true` if the
    /// bottom spec changed.
    pub fn set_header_height(&mut self, height: f64) -> bool {
        let bottom = self.reducer.positions().bottom;
        if !bottom.matches_header_height() || bottom.value() == height {
            return false;
        }
        tracing::debug!(height, "drawer header height updated");
        self.set_bottom_position(bottom.with_updated_value(height));
        true
    }

    /// Feeds a newly measured drag-handle height and re-syncs.
    pub fn set_drag_handle_height(&mut self, height: f64) {
        self.reducer.calculator_mut().set_drag_handle_height(height);
        self.sync();
    }

    /// Gives access to the environment, then re-syncs.
    pub fn update_env(&mut self, f: impl FnOnce(&mut E)) {
        f(self.reducer.calculator_mut().env_mut());
        self.sync();
    }

    /// Top inset that places the panel.
    #[must_use]
    pub fn padding_top(&self) -> f64 {
        self.reducer.calculator().padding_top(&self.state)
    }

    /// Bottom padding for the scrollable content.
    #[must_use]
    pub fn content_bottom_padding(&self) -> f64 {
        self.reducer
            .calculator()
            .content_bottom_padding(&self.state, self.positions().bottom)
    }

    /// Floating-button opacity, clamped to `0.0..=1.0` for rendering.
    #[must_use]
    pub fn floating_buttons_opacity(&self) -> f64 {
        let positions = self.positions();
        self.reducer
            .calculator()
            .floating_buttons_opacity(
                self.state.current_position(),
                positions.bottom,
                positions.mid,
            )
            .clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Insets, Rect};

    use super::*;
    use crate::env::FixedEnvironment;
    use crate::error::Measurement;

    fn env() -> FixedEnvironment {
        FixedEnvironment {
            screen_bounds: Rect::new(0.0, 0.0, 390.0, 844.0),
            safe_area_insets: Insets::new(0.0, 47.0, 0.0, 34.0),
            tab_bar_frame: Rect::new(0.0, 761.0, 390.0, 810.0),
        }
    }

    fn simple() -> Drawer<FixedEnvironment> {
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

    #[test]
    fn appears_synced() {
        let drawer = simple();
        assert_eq!(drawer.case(), DrawerCase::Closed);
        assert_eq!(drawer.current_position(), 0.0);
        assert!(!drawer.has_pending());
    }

    #[test]
    fn drag_session_tracks_last_translation() {
        let mut drawer = simple();
        drawer.drag_changed(-20.0);
        drawer.drag_changed(-50.0);
        assert_eq!(drawer.case(), DrawerCase::Dragging);
        assert_eq!(drawer.current_position(), 50.0);

        let case = drawer.drag_ended(
            Point::new(0.0, 600.0),
            Point::new(0.0, 550.0),
            Vec2::new(0.0, -400.0),
        );
        assert_eq!(case, DrawerCase::PartiallyOpened);
        assert_eq!(drawer.current_position(), 250.0);

        // A new drag starts from zero translation again.
        drawer.drag_changed(-10.0);
        assert_eq!(drawer.current_position(), 260.0);
    }

    #[test]
    fn release_without_drag_keeps_case() {
        let mut drawer = simple();
        let case = drawer.drag_ended(Point::ZERO, Point::ZERO, Vec2::ZERO);
        assert_eq!(case, DrawerCase::Closed);
    }

    #[test]
    fn content_owned_touch_does_not_move_drawer() {
        let mut drawer = simple();
        drawer.set_case(DrawerCase::FullyOpened);
        assert!(drawer.should_content_begin_dragging(40.0, 10.0));
        drawer.drag_changed(30.0);
        assert_eq!(drawer.case(), DrawerCase::FullyOpened);
        assert_eq!(drawer.current_position(), 500.0);

        drawer.scroll_handoff_mut().on_dragging_ended(false);
        drawer.drag_changed(30.0);
        assert_eq!(drawer.current_position(), 470.0);
    }

    #[test]
    fn deferred_requests_apply_on_flush() {
        let mut drawer = simple();
        drawer.request_case(DrawerCase::FullyOpened);
        drawer.request_case(DrawerCase::PartiallyOpened);
        assert_eq!(drawer.current_position(), 0.0);

        assert_eq!(drawer.flush(), 1);
        assert_eq!(drawer.case(), DrawerCase::PartiallyOpened);
        assert_eq!(drawer.current_position(), 250.0);
        assert_eq!(drawer.flush(), 0);
    }

    #[test]
    fn flush_waits_for_drag_to_finish() {
        let mut drawer = simple();
        drawer.drag_changed(-100.0);
        drawer.request_case(DrawerCase::FullyOpened);
        assert_eq!(drawer.flush(), 0);
        assert!(drawer.has_pending());

        drawer.drag_ended(
            Point::new(0.0, 500.0),
            Point::new(0.0, 400.0),
            Vec2::new(0.0, -10.0),
        );
        assert_eq!(drawer.case(), DrawerCase::Closed);
        assert_eq!(drawer.flush(), 1);
        assert_eq!(drawer.case(), DrawerCase::FullyOpened);
    }

    #[test]
    fn repeated_requests_collapse() {
        let mut drawer = simple();
        drawer.drag_changed(-100.0);
        for _ in 0..1000 {
            drawer.request_sync();
        }
        drawer.request_case(DrawerCase::FullyOpened);
        drawer.request_sync();
        drawer.request_case(DrawerCase::Closed);

        drawer.drag_ended(
            Point::new(0.0, 500.0),
            Point::new(0.0, 400.0),
            Vec2::new(0.0, -10.0),
        );
        assert_eq!(drawer.flush(), 2);
        assert_eq!(drawer.case(), DrawerCase::Closed);
        assert!(!drawer.has_pending());
    }

    #[test]
    fn set_case_mid_drag_keeps_frame_delta() {
        let mut drawer = simple();
        drawer.drag_changed(-100.0);
        assert_eq!(drawer.current_position(), 100.0);

        drawer.set_case(DrawerCase::Closed);
        assert_eq!(drawer.current_position(), 0.0);

        // The same touch moves 5 more points up.
        drawer.drag_changed(-105.0);
        assert_eq!(drawer.case(), DrawerCase::Dragging);
        assert_eq!(drawer.current_position(), 5.0);
    }

    #[test]
    fn header_height_updates_bottom_in_place() {
        let mut drawer = Drawer::new(
            DrawerCase::Closed,
            DrawerPositions::new(
                BottomPosition::MatchesHeaderHeightAlignedToTabBar(0.0),
                None,
                TopPosition::RelativeToSafeAreaTop(0.0),
            ),
            env(),
            DrawerConfig {
                drag_handle_height: 12.0,
                ..DrawerConfig::default()
            },
        );
        assert_eq!(drawer.current_position(), 34.0 + 49.0 + 12.0);

        assert!(drawer.set_header_height(60.0));
        assert_eq!(
            drawer.positions().bottom,
            BottomPosition::MatchesHeaderHeightAlignedToTabBar(60.0)
        );
        assert_eq!(drawer.current_position(), 34.0 + 49.0 + 60.0 + 12.0);
        assert!(!drawer.set_header_height(60.0));
    }

    #[test]
    fn header_height_is_ignored_by_fixed_bottom() {
        let mut drawer = simple();
        assert!(!drawer.set_header_height(80.0));
        assert_eq!(drawer.positions().bottom, BottomPosition::Absolute(0.0));
    }

    #[test]
    fn header_height_during_drag_defers_position() {
        let mut drawer = Drawer::new(
            DrawerCase::Closed,
            DrawerPositions::new(
                BottomPosition::MatchesHeaderHeightAlignedToSafeAreaBottom(20.0),
                None,
                TopPosition::Absolute(600.0),
            ),
            env(),
            DrawerConfig::default(),
        );
        drawer.drag_changed(-100.0);
        let dragging_at = drawer.current_position();
        assert!(drawer.set_header_height(40.0));
        assert_eq!(drawer.current_position(), dragging_at);
    }

    #[test]
    fn measurement_updates_resync() {
        let mut drawer = simple();
        drawer.set_drag_handle_height(16.0);
        assert_eq!(drawer.current_position(), 16.0);

        drawer.set_case(DrawerCase::FullyOpened);
        drawer.set_top_position(TopPosition::RelativeToSafeAreaTop(0.0));
        assert_eq!(drawer.current_position(), 844.0);

        drawer.update_env(|env| env.safe_area_insets = Insets::new(0.0, 44.0, 0.0, 0.0));
        assert_eq!(drawer.current_position(), 800.0);
    }

    #[test]
    fn render_read_outs() {
        let mut drawer = simple();
        assert_eq!(drawer.padding_top(), 844.0);
        assert_eq!(drawer.content_bottom_padding(), 0.0);
        assert_eq!(drawer.floating_buttons_opacity(), 1.0);

        drawer.set_case(DrawerCase::FullyOpened);
        assert_eq!(drawer.padding_top(), 344.0);
        assert_eq!(drawer.content_bottom_padding(), 344.0);
        assert_eq!(drawer.floating_buttons_opacity(), 0.0);
    }

    #[test]
    fn try_new_reports_configuration_errors() {
        let missing = Drawer::try_new(
            DrawerCase::PartiallyOpened,
            DrawerPositions::new(
                BottomPosition::Absolute(0.0),
                None,
                TopPosition::Absolute(500.0),
            ),
            env(),
            DrawerConfig::default(),
        );
        assert_eq!(missing.err(), Some(PositionError::MissingMidPosition));

        let inverted = Drawer::try_new(
            DrawerCase::Closed,
            DrawerPositions::new(
                BottomPosition::Absolute(700.0),
                None,
                TopPosition::Absolute(500.0),
            ),
            env(),
            DrawerConfig::default(),
        );
        assert!(matches!(
            inverted.err(),
            Some(PositionError::InvertedRange { .. })
        ));

        let unmeasured = Drawer::try_new(
            DrawerCase::Closed,
            DrawerPositions::new(
                BottomPosition::Absolute(0.0),
                None,
                TopPosition::Absolute(500.0),
            ),
            env(),
            DrawerConfig {
                drag_handle_height: f64::NAN,
                ..DrawerConfig::default()
            },
        );
        assert_eq!(
            unmeasured.err(),
            Some(PositionError::NonFiniteMeasurement {
                measurement: Measurement::DragHandleHeight
            })
        );
    }

    #[test]
    #[should_panic(expected = "no mid position")]
    fn removing_mid_while_partially_opened_panics() {
        let mut drawer = simple();
        drawer.set_case(DrawerCase::PartiallyOpened);
        drawer.set_mid_position(None);
    }
}
