// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag tracking: translation during a press and velocity at release.
//!
//! [`DragState`] records one press per pointer. Each move reports the
//! cumulative translation from the press point together with the previous
//! translation, which is exactly what a continuous drag reducer needs to
//! compute a per-frame delta. Releasing reports where the drag started and
//! ended and how fast the pointer was travelling.
//!
//! ## Usage
//!
//! ```
//! use understory_event_state::drag::DragState;
//! use kurbo::Point;
//!
//! let mut state = DragState::new();
//!
//! state.on_down(None, Point::new(100.0, 600.0), 1000);
//!
//! let update = state.on_move(None, Point::new(100.0, 580.0), 1016).unwrap();
//! assert_eq!(update.translation.y, -20.0);
//! assert_eq!(update.last_translation.y, 0.0);
//!
//! let update = state.on_move(None, Point::new(100.0, 550.0), 1032).unwrap();
//! assert_eq!(update.translation.y, -50.0);
//! assert_eq!(update.last_translation.y, -20.0);
//!
//! let end = state.on_up(None, Point::new(100.0, 550.0), 1032).unwrap();
//! assert_eq!(end.start, Point::new(100.0, 600.0));
//! assert_eq!(end.end, Point::new(100.0, 550.0));
//! // 30 points in 16 ms.
//! assert_eq!(end.velocity.y, -1875.0);
//! ```
//!
//! ## Velocity
//!
//! Velocity is measured in units per second between the two most recent
//! samples with distinct timestamps. Samples that share a timestamp with the
//! previous one replace its position but keep the last measured velocity, so
//! a release delivered in the same frame as the final move does not read as
//! a stop.
//!
//! ## Multi-Pointer Support
//!
//! Each pointer is tracked independently; `None` stands for pointer 1:
//! ```
//! # use understory_event_state::drag::{DragState, PointerId};
//! # use kurbo::Point;
//! let mut state = DragState::new();
//!
//! let pointer2 = PointerId::new(2).unwrap();
//!
//! state.on_down(None, Point::new(10.0, 20.0), 1000);
//! state.on_down(Some(pointer2), Point::new(50.0, 60.0), 1010);
//!
//! assert!(state.on_up(Some(pointer2), Point::new(52.0, 62.0), 1080).is_some());
//! assert!(state.is_dragging(None));
//! ```

use alloc::collections::BTreeMap;
use core::num::NonZeroU64;
use kurbo::{Point, Vec2};

/// Pointer identifier for tracking multiple concurrent drags.
pub type PointerId = NonZeroU64;

const DEFAULT_POINTER: PointerId = NonZeroU64::MIN;

/// Per-pointer drag bookkeeping.
#[derive(Clone, Debug, Default)]
pub struct DragState {
    /// Active drags per pointer
    drags: BTreeMap<PointerId, Drag>,
}

/// State for an active drag.
#[derive(Clone, Debug)]
pub struct Drag {
    /// Pointer position at press time
    pub start_position: Point,
    /// Timestamp when press occurred
    pub start_time: u64,
    /// Most recent pointer position
    pub last_position: Point,
    /// Timestamp of the most recent sample
    pub last_time: u64,
    /// Velocity between the two most recent distinct samples, in units per second
    pub velocity: Vec2,
}

impl Drag {
    /// Translation of the latest sample from the press point.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        self.last_position - self.start_position
    }

    fn record(&mut self, position: Point, timestamp: u64) {
        let elapsed = timestamp.saturating_sub(self.last_time);
        if elapsed > 0 {
            self.velocity = (position - self.last_position) * 1000.0 / elapsed as f64;
            self.last_time = timestamp;
        }
        self.last_position = position;
    }
}

/// Result of a move sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragUpdate {
    /// Cumulative translation from the press point.
    pub translation: Vec2,
    /// Cumulative translation reported by the previous sample.
    pub last_translation: Vec2,
}

/// Result of a release.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragEnd {
    /// Pointer position at press time.
    pub start: Point,
    /// Pointer position at release time.
    pub end: Point,
    /// Release velocity in units per second.
    pub velocity: Vec2,
}

impl DragState {
    /// Create an empty drag state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer down event.
    ///
    /// A second press on the same pointer restarts its drag.
    ///
    /// # Arguments
    /// * `pointer_id` - Unique pointer identifier, defaults to 1 if None
    /// * `position` - Pointer position at press time
    /// * `timestamp` - Event timestamp in milliseconds
    pub fn on_down(&mut self, pointer_id: Option<PointerId>, position: Point, timestamp: u64) {
        let pointer_id = pointer_id.unwrap_or(DEFAULT_POINTER);
        tracing::trace!(pointer = pointer_id.get(), ?position, "drag down");
        self.drags.insert(
            pointer_id,
            Drag {
                start_position: position,
                start_time: timestamp,
                last_position: position,
                last_time: timestamp,
                velocity: Vec2::ZERO,
            },
        );
    }

    /// Process a pointer move event.
    ///
    /// # Returns
    /// The new and previous cumulative translations, or `None` if the pointer
    /// has no active drag.
    pub fn on_move(
        &mut self,
        pointer_id: Option<PointerId>,
        position: Point,
        timestamp: u64,
    ) -> Option<DragUpdate> {
        let pointer_id = pointer_id.unwrap_or(DEFAULT_POINTER);
        let drag = self.drags.get_mut(&pointer_id)?;
        let last_translation = drag.translation();
        drag.record(position, timestamp);
        Some(DragUpdate {
            translation: drag.translation(),
            last_translation,
        })
    }

    /// Process a pointer up event and finish the drag.
    ///
    /// # Returns
    /// Start, end, and release velocity, or `None` if the pointer has no
    /// active drag.
    pub fn on_up(
        &mut self,
        pointer_id: Option<PointerId>,
        position: Point,
        timestamp: u64,
    ) -> Option<DragEnd> {
        let pointer_id = pointer_id.unwrap_or(DEFAULT_POINTER);
        let mut drag = self.drags.remove(&pointer_id)?;
        drag.record(position, timestamp);
        let end = DragEnd {
            start: drag.start_position,
            end: drag.last_position,
            velocity: drag.velocity,
        };
        tracing::trace!(pointer = pointer_id.get(), velocity = ?end.velocity, "drag up");
        Some(end)
    }

    /// Cancel the drag for a pointer.
    ///
    /// # Returns
    /// `true` if a drag was canceled, `false` if no drag was active
    pub fn cancel(&mut self, pointer_id: Option<PointerId>) -> bool {
        let pointer_id = pointer_id.unwrap_or(DEFAULT_POINTER);
        self.drags.remove(&pointer_id).is_some()
    }

    /// Check if a pointer has an active drag.
    pub fn is_dragging(&self, pointer_id: Option<PointerId>) -> bool {
        let pointer_id = pointer_id.unwrap_or(DEFAULT_POINTER);
        self.drags.contains_key(&pointer_id)
    }

    /// Get the active drag for a specific pointer ID.
    pub fn get_drag(&self, pointer_id: PointerId) -> Option<&Drag> {
        self.drags.get(&pointer_id)
    }

    /// Clear all active drags.
    pub fn clear(&mut self) {
        self.drags.clear();
    }
}
