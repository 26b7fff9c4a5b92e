// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decides who owns a touch that starts inside the drawer's scrollable content.
//!
//! The host's scroll view asks [`ScrollHandoff::should_begin_dragging`] before
//! it starts scrolling. A `false` answer means the drawer handles the touch
//! instead. The remaining callbacks mirror the scroll view's lifecycle and
//! keep two flags current:
//!
//! - [`HandoffFlags::DRAWER_DRAG_ENABLED`]: the drawer's own drag gesture may run.
//! - [`HandoffFlags::HEADER_ELEVATED`]: content has scrolled under the sticky
//!   header, which should render raised.
//!
//! ```
//! use understory_drawer::{DrawerCase, ScrollHandoff};
//!
//! let mut handoff = ScrollHandoff::new();
//!
//! // Content never scrolls while the drawer is only partially open.
//! assert!(!handoff.should_begin_dragging(DrawerCase::PartiallyOpened, 0.0, -20.0));
//!
//! // Fully open: pushing content up scrolls it and locks the drawer.
//! assert!(handoff.should_begin_dragging(DrawerCase::FullyOpened, 0.0, -20.0));
//! assert!(!handoff.drawer_drag_enabled());
//!
//! handoff.on_did_scroll(40.0);
//! assert!(handoff.header_elevated());
//!
//! handoff.on_dragging_ended(false);
//! assert!(handoff.drawer_drag_enabled());
//! ```

use crate::state::DrawerCase;

bitflags::bitflags! {
    /// Flags maintained by [`ScrollHandoff`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct HandoffFlags: u8 {
        /// The drawer's own drag gesture is allowed to start.
        const DRAWER_DRAG_ENABLED = 0b0000_0001;
        /// Content is scrolled past its top; the sticky header is raised.
        const HEADER_ELEVATED     = 0b0000_0010;
    }
}

impl Default for HandoffFlags {
    fn default() -> Self {
        Self::DRAWER_DRAG_ENABLED
    }
}

/// Gesture arbitration between the drawer and its scrollable content.
#[derive(Clone, Debug, Default)]
pub struct ScrollHandoff {
    flags: HandoffFlags,
}

impl ScrollHandoff {
    /// Creates an arbiter with drawer dragging enabled and the header flat.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current flags.
    #[must_use]
    pub const fn flags(&self) -> HandoffFlags {
        self.flags
    }

    /// Returns `true` if the drawer's drag gesture may start.
    #[must_use]
    pub const fn drawer_drag_enabled(&self) -> bool {
        self.flags.contains(HandoffFlags::DRAWER_DRAG_ENABLED)
    }

    /// Returns `true` if the sticky header should render raised.
    #[must_use]
    pub const fn header_elevated(&self) -> bool {
        self.flags.contains(HandoffFlags::HEADER_ELEVATED)
    }

    /// Returns `true` if the content should scroll instead of the drawer moving.
    ///
    /// `vertical_content_offset` is the scroll offset of the content (zero at
    /// its top, negative when bounced past it). `vertical_translation` is the
    /// pan translation in screen space, positive when the finger moves down.
    ///
    /// The drawer keeps the touch when it is not fully opened, when the
    /// content is already bounced past its top, or when the finger pulls down
    /// while the content sits at its top.
    pub fn should_begin_dragging(
        &mut self,
        case: DrawerCase,
        vertical_content_offset: f64,
        vertical_translation: f64,
    ) -> bool {
        let content_owns = case == DrawerCase::FullyOpened
            && vertical_content_offset >= 0.0
            && !(vertical_translation > 0.0 && vertical_content_offset <= 0.0);
        self.flags
            .set(HandoffFlags::DRAWER_DRAG_ENABLED, !content_owns);
        tracing::trace!(
            %case,
            vertical_content_offset,
            vertical_translation,
            content_owns,
            "scroll handoff decision"
        );
        content_owns
    }

    /// The content's drag ended; if it will not coast, the drawer may drag again.
    pub fn on_dragging_ended(&mut self, will_decelerate: bool) {
        if !will_decelerate {
            self.flags.insert(HandoffFlags::DRAWER_DRAG_ENABLED);
        }
    }

    /// The content finished coasting.
    pub fn on_deceleration_ended(&mut self) {
        self.flags.insert(HandoffFlags::DRAWER_DRAG_ENABLED);
    }

    /// The content scrolled to `vertical_content_offset`.
    pub fn on_did_scroll(&mut self, vertical_content_offset: f64) {
        self.flags
            .set(HandoffFlags::HEADER_ELEVATED, vertical_content_offset > 0.0);
    }

    /// The content was programmatically scrolled back to its top.
    pub fn on_content_offset_reset(&mut self) {
        self.flags.insert(HandoffFlags::DRAWER_DRAG_ENABLED);
        self.flags.remove(HandoffFlags::HEADER_ELEVATED);
    }
}
