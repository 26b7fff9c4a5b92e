// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Classifies a finished drag as up, down, or without clear intent.

/// Minimum vertical release speed, in units per second, for a drag to count as directional.
pub const DEFAULT_VELOCITY_THRESHOLD: f64 = 200.0;

/// Intent of a finished drag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DragDirection {
    /// Finger moved toward the top of the screen.
    Up,
    /// Finger moved toward the bottom of the screen.
    Down,
    /// Too slow to express a direction; snap to the nearest position instead.
    Undefined,
}

impl DragDirection {
    /// Classifies with [`DEFAULT_VELOCITY_THRESHOLD`].
    ///
    /// Coordinates use screen space, where `y` grows downward.
    ///
    /// ```
    /// use understory_drawer::DragDirection;
    ///
    /// assert_eq!(DragDirection::classify(50.0, 30.0, 200.0), DragDirection::Up);
    /// assert_eq!(DragDirection::classify(30.0, 50.0, 199.0), DragDirection::Undefined);
    /// ```
    #[must_use]
    pub fn classify(start_y: f64, end_y: f64, velocity_y: f64) -> Self {
        Self::classify_with_threshold(start_y, end_y, velocity_y, DEFAULT_VELOCITY_THRESHOLD)
    }

    /// Classifies against a custom threshold. A speed equal to the threshold is directional.
    #[must_use]
    pub fn classify_with_threshold(
        start_y: f64,
        end_y: f64,
        velocity_y: f64,
        threshold: f64,
    ) -> Self {
        if velocity_y.abs() < threshold {
            Self::Undefined
        } else if end_y > start_y {
            Self::Down
        } else {
            Self::Up
        }
    }
}
