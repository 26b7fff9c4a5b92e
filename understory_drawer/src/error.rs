// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors that can be detected before a drawer is shown.

use core::fmt;

/// Which edge spec an error refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PositionEdge {
    /// The closed (bottom) spec.
    Bottom,
    /// The partially opened (mid) spec.
    Mid,
    /// The fully opened (top) spec.
    Top,
}

impl fmt::Display for PositionEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bottom => "bottom",
            Self::Mid => "mid",
            Self::Top => "top",
        })
    }
}

/// An environment or layout measurement fed into position resolution.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Measurement {
    /// The measured drag-handle height.
    DragHandleHeight,
    /// The floating-button fade modifier.
    FloatingButtonsOffset,
    /// The screen height.
    ScreenHeight,
    /// The top safe-area inset.
    SafeAreaTop,
    /// The bottom safe-area inset.
    SafeAreaBottom,
    /// The tab bar height.
    TabBarHeight,
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::DragHandleHeight => "drag handle height",
            Self::FloatingButtonsOffset => "floating buttons offset",
            Self::ScreenHeight => "screen height",
            Self::SafeAreaTop => "top safe area inset",
            Self::SafeAreaBottom => "bottom safe area inset",
            Self::TabBarHeight => "tab bar height",
        })
    }
}

/// A drawer configuration that cannot be resolved into a usable range.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum PositionError {
    /// The initial case is partially opened but no mid position is configured.
    #[error("drawer starts partially opened but has no mid position")]
    MissingMidPosition,
    /// A spec carries a NaN or infinite value.
    #[error("{edge} position value is not finite")]
    NonFiniteValue {
        /// Offending edge.
        edge: PositionEdge,
    },
    /// A measurement the specs resolve against is NaN or infinite.
    #[error("{measurement} is not finite")]
    NonFiniteMeasurement {
        /// Offending measurement.
        measurement: Measurement,
    },
    /// The bottom resolves above the top.
    #[error("bottom position {bottom} resolves above top position {top}")]
    InvertedRange {
        /// Resolved bottom value.
        bottom: f64,
        /// Resolved top value.
        top: f64,
    },
    /// The mid position resolves outside of `[bottom, top]`.
    #[error("mid position {mid} lies outside [{bottom}, {top}]")]
    MidOutOfRange {
        /// Resolved mid value.
        mid: f64,
        /// Resolved bottom value.
        bottom: f64,
        /// Resolved top value.
        top: f64,
    },
}
