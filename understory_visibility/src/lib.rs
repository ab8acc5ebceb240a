// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Visibility: a deterministic, `no_std` tracker for whether an element is in view.
//!
//! ## Overview
//!
//! This crate watches one element inside a scrollable viewport and tells you when it reaches
//! a visibility state you care about. Typical uses are lazy loading, entrance animations, and
//! impression analytics.
//!
//! It does not do layout or listen to a windowing system.
//! Instead, implement the [host traits](crate::host) for whatever owns layout in your toolkit:
//! [`GeometrySource`](crate::host::GeometrySource) for the element's bounds,
//! [`ViewportSource`](crate::host::ViewportSource) for the viewport size, and
//! [`ChangeStream`](crate::host::ChangeStream) for scroll/resize subscriptions.
//!
//! ## Status
//!
//! Each evaluation classifies the element's bounding box into a
//! [`VisibilityStatus`](crate::types::VisibilityStatus): four edge flags, whether the center is
//! visible, and a coarse [`Visibility`](crate::types::Visibility) of `Full`, `Overflow`,
//! `Partial`, or `Hidden`.
//!
//! ## Conditions and gating
//!
//! A [`Condition`](crate::condition::Condition) is either `All` (notify on any status change) or a
//! set of per-field targets. The [`VisibilityEvaluator`](crate::evaluator::VisibilityEvaluator)
//! fires its `on_true`/`on_false` callbacks on transitions of the match result, not on every
//! scroll, unless `notify_every_event` is set. See the [`evaluator`] module for the exact policy.
//!
//! ## Minimal example
//!
//! ```
//! use std::{cell::Cell, rc::Rc};
//!
//! use kurbo::{Rect, Size};
//! use understory_visibility::condition::{Condition, FieldCondition};
//! use understory_visibility::evaluator::{Configured, Outcome, VisibilityEvaluator, callback};
//! use understory_visibility::host::{ChangeStream, GeometrySource, ViewportSource};
//!
//! struct Page {
//!     scroll_y: f64,
//! }
//!
//! impl GeometrySource<u32> for Page {
//!     fn bounding_rect(&self, _element: &u32) -> Option<Rect> {
//!         Some(Rect::new(0.0, 1000.0 - self.scroll_y, 200.0, 1100.0 - self.scroll_y))
//!     }
//! }
//!
//! impl ViewportSource for Page {
//!     fn viewport_size(&self) -> Size {
//!         Size::new(800.0, 600.0)
//!     }
//! }
//!
//! impl ChangeStream for Page {
//!     type Event = ();
//!     type Subscription = ();
//!     fn subscribe(&mut self) {}
//!     fn unsubscribe(&mut self, _subscription: ()) {}
//! }
//!
//! let loaded = Rc::new(Cell::new(false));
//! let flag = loaded.clone();
//!
//! let mut eval = VisibilityEvaluator::bound(Page { scroll_y: 0.0 }, 7_u32);
//! let configured = eval.configure(
//!     Condition::Fields(FieldCondition::new().center_is_visible(true)),
//!     Some(callback(move |_, _, _, _| {
//!         flag.set(true);
//!         Outcome::Stop
//!     })),
//!     None,
//!     false,
//! );
//! assert_eq!(configured, Configured::Attached);
//! assert!(!loaded.get());
//!
//! eval.host_mut().scroll_y = 600.0;
//! eval.handle_change(&());
//! assert!(loaded.get());
//! assert!(!eval.is_attached());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.
//! Diagnostics are emitted through [`tracing`] at `debug` and `trace` levels.

#![no_std]

extern crate alloc;

pub mod condition;
pub mod evaluator;
pub mod host;
pub mod types;
