// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative position specs for the bottom, mid, and top drawer edges.
//!
//! Each spec is a tagged value: the variant names the reference frame and the
//! payload carries exactly one number. Measured inputs (for example a sticky
//! header's height) update the payload through `with_updated_value`, which
//! always keeps the variant.

use crate::calculator::PositionCalculator;
use crate::env::Environment;
use crate::error::{PositionEdge, PositionError};

/// Where the drawer rests when it is closed.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BottomPosition {
    /// Fixed height above the bottom of the container.
    Absolute(f64),
    /// Offset above the bottom safe-area inset.
    RelativeToSafeAreaBottom(f64),
    /// Offset above the top of the tab bar.
    RelativeToTabBar(f64),
    /// Tall enough to show a sticky header of the given height above the safe area.
    MatchesHeaderHeightAlignedToSafeAreaBottom(f64),
    /// Tall enough to show a sticky header of the given height above the tab bar.
    MatchesHeaderHeightAlignedToTabBar(f64),
}

impl BottomPosition {
    /// Returns the associated value regardless of variant.
    #[must_use]
    pub const fn value(&self) -> f64 {
        match *self {
            Self::Absolute(v)
            | Self::RelativeToSafeAreaBottom(v)
            | Self::RelativeToTabBar(v)
            | Self::MatchesHeaderHeightAlignedToSafeAreaBottom(v)
            | Self::MatchesHeaderHeightAlignedToTabBar(v) => v,
        }
    }

    /// Returns the same variant carrying `value`.
    #[must_use]
    pub const fn with_updated_value(self, value: f64) -> Self {
        match self {
            Self::Absolute(_) => Self::Absolute(value),
            Self::RelativeToSafeAreaBottom(_) => Self::RelativeToSafeAreaBottom(value),
            Self::RelativeToTabBar(_) => Self::RelativeToTabBar(value),
            Self::MatchesHeaderHeightAlignedToSafeAreaBottom(_) => {
                Self::MatchesHeaderHeightAlignedToSafeAreaBottom(value)
            }
            Self::MatchesHeaderHeightAlignedToTabBar(_) => {
                Self::MatchesHeaderHeightAlignedToTabBar(value)
            }
        }
    }

    /// Returns `true` if this position sits on top of the tab bar.
    #[must_use]
    pub const fn is_tab_bar_aligned(&self) -> bool {
        matches!(
            self,
            Self::RelativeToTabBar(_) | Self::MatchesHeaderHeightAlignedToTabBar(_)
        )
    }

    /// Returns `true` if the value tracks a measured header height.
    #[must_use]
    pub const fn matches_header_height(&self) -> bool {
        matches!(
            self,
            Self::MatchesHeaderHeightAlignedToSafeAreaBottom(_)
                | Self::MatchesHeaderHeightAlignedToTabBar(_)
        )
    }
}

/// Optional intermediate resting height.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MidPosition {
    /// Resting height of the whole panel; the drag handle is not added.
    Absolute(f64),
    /// Offset above the bottom safe-area inset.
    RelativeToSafeAreaBottom(f64),
    /// Offset above the top of the tab bar.
    RelativeToTabBar(f64),
}

impl MidPosition {
    /// Returns the associated value regardless of variant.
    #[must_use]
    pub const fn value(&self) -> f64 {
        match *self {
            Self::Absolute(v) | Self::RelativeToSafeAreaBottom(v) | Self::RelativeToTabBar(v) => v,
        }
    }

    /// Returns the same variant carrying `value`.
    #[must_use]
    pub const fn with_updated_value(self, value: f64) -> Self {
        match self {
            Self::Absolute(_) => Self::Absolute(value),
            Self::RelativeToSafeAreaBottom(_) => Self::RelativeToSafeAreaBottom(value),
            Self::RelativeToTabBar(_) => Self::RelativeToTabBar(value),
        }
    }
}

/// Where the drawer rests when it is fully opened.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TopPosition {
    /// Fixed height above the bottom of the container.
    Absolute(f64),
    /// Offset below the top safe-area inset.
    RelativeToSafeAreaTop(f64),
}

impl TopPosition {
    /// Returns the associated value regardless of variant.
    #[must_use]
    pub const fn value(&self) -> f64 {
        match *self {
            Self::Absolute(v) | Self::RelativeToSafeAreaTop(v) => v,
        }
    }

    /// Returns the same variant carrying `value`.
    #[must_use]
    pub const fn with_updated_value(self, value: f64) -> Self {
        match self {
            Self::Absolute(_) => Self::Absolute(value),
            Self::RelativeToSafeAreaTop(_) => Self::RelativeToSafeAreaTop(value),
        }
    }
}

/// The three edge specs of one drawer.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DrawerPositions {
    /// Closed resting position.
    pub bottom: BottomPosition,
    /// Partially opened resting position, if the drawer has one.
    pub mid: Option<MidPosition>,
    /// Fully opened resting position.
    pub top: TopPosition,
}

impl DrawerPositions {
    /// Creates a set of positions.
    #[must_use]
    pub const fn new(bottom: BottomPosition, mid: Option<MidPosition>, top: TopPosition) -> Self {
        Self { bottom, mid, top }
    }

    /// Checks that the specs resolve to a usable range under `calculator`.
    ///
    /// The bottom must resolve at or below the top, and a mid position, when
    /// present, must lie between them. All associated values and the
    /// calculator's measurements must be finite.
    pub fn validate<E: Environment>(
        &self,
        calculator: &PositionCalculator<E>,
    ) -> Result<(), PositionError> {
        if let Some(measurement) = calculator.non_finite_measurement() {
            return Err(PositionError::NonFiniteMeasurement { measurement });
        }
        if !self.bottom.value().is_finite() {
            return Err(PositionError::NonFiniteValue {
                edge: PositionEdge::Bottom,
            });
        }
        if self.mid.is_some_and(|mid| !mid.value().is_finite()) {
            return Err(PositionError::NonFiniteValue {
                edge: PositionEdge::Mid,
            });
        }
        if !self.top.value().is_finite() {
            return Err(PositionError::NonFiniteValue {
                edge: PositionEdge::Top,
            });
        }

        let bottom = calculator.bottom_value(self.bottom);
        let top = calculator.top_value(self.top);
        if bottom > top {
            return Err(PositionError::InvertedRange { bottom, top });
        }
        if let Some(mid) = self.mid.map(|mid| calculator.mid_value(mid))
            && (mid < bottom || mid > top)
        {
            return Err(PositionError::MidOutOfRange { mid, bottom, top });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Insets, Rect};

    use super::*;
    use crate::env::FixedEnvironment;
    use crate::error::Measurement;

    #[test]
    fn updates_preserve_the_variant() {
        let bottom = BottomPosition::MatchesHeaderHeightAlignedToTabBar(10.0);
        assert_eq!(
            bottom.with_updated_value(44.0),
            BottomPosition::MatchesHeaderHeightAlignedToTabBar(44.0)
        );

        let mid = MidPosition::RelativeToSafeAreaBottom(120.0);
        assert_eq!(
            mid.with_updated_value(80.0),
            MidPosition::RelativeToSafeAreaBottom(80.0)
        );

        let top = TopPosition::RelativeToSafeAreaTop(20.0);
        assert_eq!(top.with_updated_value(0.0).value(), 0.0);
        assert!(matches!(
            top.with_updated_value(0.0),
            TopPosition::RelativeToSafeAreaTop(_)
        ));
    }

    #[test]
    fn tab_bar_alignment() {
        assert!(BottomPosition::RelativeToTabBar(0.0).is_tab_bar_aligned());
        assert!(BottomPosition::MatchesHeaderHeightAlignedToTabBar(0.0).is_tab_bar_aligned());
        assert!(!BottomPosition::Absolute(0.0).is_tab_bar_aligned());
        assert!(
            !BottomPosition::MatchesHeaderHeightAlignedToSafeAreaBottom(0.0).is_tab_bar_aligned()
        );
    }

    fn calculator() -> PositionCalculator<FixedEnvironment> {
        PositionCalculator::new(
            FixedEnvironment {
                screen_bounds: Rect::new(0.0, 0.0, 400.0, 800.0),
                safe_area_insets: Insets::new(0.0, 40.0, 0.0, 30.0),
                tab_bar_frame: Rect::new(0.0, 720.0, 400.0, 770.0),
            },
            0.0,
        )
    }

    #[test]
    fn validate_accepts_ordered_positions() {
        let positions = DrawerPositions::new(
            BottomPosition::Absolute(0.0),
            Some(MidPosition::Absolute(250.0)),
            TopPosition::Absolute(500.0),
        );
        assert_eq!(positions.validate(&calculator()), Ok(()));
    }

    #[test]
    fn validate_rejects_inverted_and_stray_mid() {
        let inverted = DrawerPositions::new(
            BottomPosition::Absolute(600.0),
            None,
            TopPosition::Absolute(500.0),
        );
        assert_eq!(
            inverted.validate(&calculator()),
            Err(PositionError::InvertedRange {
                bottom: 600.0,
                top: 500.0
            })
        );

        let stray = DrawerPositions::new(
            BottomPosition::Absolute(0.0),
            Some(MidPosition::Absolute(900.0)),
            TopPosition::RelativeToSafeAreaTop(0.0),
        );
        assert_eq!(
            stray.validate(&calculator()),
            Err(PositionError::MidOutOfRange {
                mid: 900.0,
                bottom: 0.0,
                top: 760.0
            })
        );
    }

    #[test]
    fn validate_rejects_nan() {
        let positions = DrawerPositions::new(
            BottomPosition::Absolute(0.0),
            Some(MidPosition::Absolute(f64::NAN)),
            TopPosition::Absolute(500.0),
        );
        assert_eq!(
            positions.validate(&calculator()),
            Err(PositionError::NonFiniteValue {
                edge: PositionEdge::Mid
            })
        );
    }

    #[test]
    fn validate_rejects_non_finite_measurements() {
        let positions = DrawerPositions::new(
            BottomPosition::Absolute(0.0),
            Some(MidPosition::Absolute(250.0)),
            TopPosition::Absolute(500.0),
        );

        let mut nan_handle = calculator();
        nan_handle.set_drag_handle_height(f64::NAN);
        assert_eq!(
            positions.validate(&nan_handle),
            Err(PositionError::NonFiniteMeasurement {
                measurement: Measurement::DragHandleHeight
            })
        );

        let mut unbounded_inset = calculator();
        unbounded_inset.env_mut().safe_area_insets.y1 = f64::INFINITY;
        assert_eq!(
            positions.validate(&unbounded_inset),
            Err(PositionError::NonFiniteMeasurement {
                measurement: Measurement::SafeAreaBottom
            })
        );
    }
}
