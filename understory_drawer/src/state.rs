// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawer state: a discrete case plus a continuous position.

use core::fmt;

/// Discrete state of a drawer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DrawerCase {
    /// A touch is actively moving the drawer.
    Dragging,
    /// Resting at the bottom position.
    Closed,
    /// Resting at the mid position.
    PartiallyOpened,
    /// Resting at the top position.
    FullyOpened,
}

impl DrawerCase {
    /// Returns `true` for the three resting cases.
    #[must_use]
    pub const fn is_resting(self) -> bool {
        !matches!(self, Self::Dragging)
    }
}

impl fmt::Display for DrawerCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dragging => "dragging",
            Self::Closed => "closed",
            Self::PartiallyOpened => "partially opened",
            Self::FullyOpened => "fully opened",
        })
    }
}

/// Mutable state of one drawer.
///
/// `current_position` is the drawer's visible height: the distance from the
/// bottom of the container to the drawer's top edge. Callers may change the
/// case; only the reducer moves the position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DrawerState {
    case: DrawerCase,
    current_position: f64,
}

impl DrawerState {
    /// Creates a state in `case` at position zero.
    ///
    /// The position is meaningless until the reducer syncs it.
    #[must_use]
    pub const fn new(case: DrawerCase) -> Self {
        Self {
            case,
            current_position: 0.0,
        }
    }

    /// Returns the discrete case.
    #[must_use]
    pub const fn case(&self) -> DrawerCase {
        self.case
    }

    /// Requests a new discrete case.
    ///
    /// The position is left alone until the next sync.
    pub fn set_case(&mut self, case: DrawerCase) {
        self.case = case;
    }

    /// Returns the current visible height.
    #[must_use]
    pub const fn current_position(&self) -> f64 {
        self.current_position
    }

    pub(crate) fn set_current_position(&mut self, position: f64) {
        self.current_position = position;
    }
}
