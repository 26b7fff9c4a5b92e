// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Event State: small state machines over raw pointer events.
//!
//! Hosts feed pointer down/move/up samples with millisecond timestamps; the
//! state machines here turn them into gesture-level values that widget cores
//! consume.
//!
//! - [`drag`]: tracks one press per pointer and reports cumulative
//!   translation while moving and `(start, end, velocity)` on release. This is
//!   the input shape expected by `understory_drawer`'s reducer.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod drag;
