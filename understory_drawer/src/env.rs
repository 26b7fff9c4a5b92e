// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Environment measurements supplied by the host.
//!
//! The core never reads screen metrics from a global. Hosts implement the
//! provider traits over whatever their platform exposes and hand the result to
//! [`PositionCalculator`](crate::PositionCalculator). Tests usually reach for
//! [`FixedEnvironment`].

use kurbo::{Insets, Rect};

/// Supplies the bounds of the screen (or container) hosting the drawer.
pub trait ScreenBoundsProviding {
    /// Current screen bounds.
    fn bounds(&self) -> Rect;
}

/// Supplies the safe-area insets of the screen.
///
/// Only the vertical insets are consulted: `y0` is the top inset and `y1`
/// the bottom inset.
pub trait SafeAreaInsetsProviding {
    /// Current safe-area insets.
    fn insets(&self) -> Insets;
}

/// Supplies the frame of the tab bar, or [`Rect::ZERO`] if there is none.
pub trait TabBarFrameProviding {
    /// Current tab bar frame.
    fn frame(&self) -> Rect;
}

/// Everything the position calculator needs to know about its surroundings.
pub trait Environment: ScreenBoundsProviding + SafeAreaInsetsProviding + TabBarFrameProviding {}

impl<T> Environment for T where
    T: ScreenBoundsProviding + SafeAreaInsetsProviding + TabBarFrameProviding + ?Sized
{
}

impl<T: ScreenBoundsProviding + ?Sized> ScreenBoundsProviding for &T {
    fn bounds(&self) -> Rect {
        (**self).bounds()
    }
}

impl<T: SafeAreaInsetsProviding + ?Sized> SafeAreaInsetsProviding for &T {
    fn insets(&self) -> Insets {
        (**self).insets()
    }
}

impl<T: TabBarFrameProviding + ?Sized> TabBarFrameProviding for &T {
    fn frame(&self) -> Rect {
        (**self).frame()
    }
}

/// A snapshot of environment measurements.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedEnvironment {
    /// Screen bounds.
    pub screen_bounds: Rect,
    /// Safe-area insets.
    pub safe_area_insets: Insets,
    /// Tab bar frame.
    pub tab_bar_frame: Rect,
}

impl FixedEnvironment {
    /// A screen of the given size with no safe area and no tab bar.
    #[must_use]
    pub fn with_screen_size(width: f64, height: f64) -> Self {
        Self {
            screen_bounds: Rect::new(0.0, 0.0, width, height),
            safe_area_insets: Insets::ZERO,
            tab_bar_frame: Rect::ZERO,
        }
    }
}

impl ScreenBoundsProviding for FixedEnvironment {
    fn bounds(&self) -> Rect {
        self.screen_bounds
    }
}

impl SafeAreaInsetsProviding for FixedEnvironment {
    fn insets(&self) -> Insets {
        self.safe_area_insets
    }
}

impl TabBarFrameProviding for FixedEnvironment {
    fn frame(&self) -> Rect {
        self.tab_bar_frame
    }
}
