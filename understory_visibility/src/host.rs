// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host collaborators: geometry, viewport size, and viewport change notifications.
//!
//! The evaluator never talks to a windowing system or document directly.
//! Implement these traits for whatever owns layout in your toolkit (a box tree, a scroll
//! container, a web view) and hand that value to
//! [`VisibilityEvaluator`](crate::evaluator::VisibilityEvaluator).

use kurbo::{Rect, Size};

/// Look up an element's axis-aligned bounding box in viewport coordinates.
pub trait GeometrySource<E> {
    /// Returns the bounds of `element`, or `None` if it currently has no layout
    /// (for example because it was removed).
    fn bounding_rect(&self, element: &E) -> Option<Rect>;
}

/// Report the current viewport dimensions.
pub trait ViewportSource {
    /// Width and height of the visible region.
    fn viewport_size(&self) -> Size;
}

/// Subscription to viewport scroll and resize notifications.
///
/// The host calls
/// [`VisibilityEvaluator::handle_change`](crate::evaluator::VisibilityEvaluator::handle_change)
/// for every change while a subscription is live. The event token is passed through to
/// callbacks untouched.
pub trait ChangeStream {
    /// Opaque token describing the triggering scroll or resize.
    type Event;
    /// Handle returned by [`subscribe`](Self::subscribe) and consumed by
    /// [`unsubscribe`](Self::unsubscribe).
    type Subscription;

    /// Begin delivering change notifications.
    fn subscribe(&mut self) -> Self::Subscription;

    /// Stop delivering change notifications for `subscription`.
    fn unsubscribe(&mut self, subscription: Self::Subscription);
}
