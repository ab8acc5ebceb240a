// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Evaluator: recompute status, match the condition, and decide which callback fires.
//!
//! ## Gating
//!
//! Every evaluation recomputes the [`VisibilityStatus`], but a callback only fires when one of
//! these holds:
//!
//! - The condition is [`Condition::Fields`] and its match result differs from the last recorded
//!   one (edge-triggered).
//! - The condition is [`Condition::All`] and any status field changed, including the first
//!   evaluation after binding.
//! - `notify_every_event` is set (level-triggered).
//!
//! When gating passes, the recorded match is updated and exactly one callback slot is
//! consulted: `on_true` for a match, `on_false` otherwise. [`Condition::All`] always reports as
//! matching.
//!
//! The recorded match starts out unset and is cleared by every
//! [`configure`](VisibilityEvaluator::configure) and [`bind`](VisibilityEvaluator::bind), so the
//! first evaluation of a field condition always notifies: `on_true` if it holds, `on_false` if not.
//!
//! ## Lifecycle
//!
//! 1) Construct with [`VisibilityEvaluator::bound`] (or [`new`](VisibilityEvaluator::new) then
//!    [`bind`](VisibilityEvaluator::bind)).
//! 2) [`configure`](VisibilityEvaluator::configure) subscribes to the host's
//!    [`ChangeStream`] and evaluates once.
//! 3) Forward each viewport change to [`handle_change`](VisibilityEvaluator::handle_change).
//! 4) [`stop`](VisibilityEvaluator::stop) unsubscribes; later changes are ignored. A callback
//!    can request the same by returning [`Outcome::Stop`], which suits one-shot uses such as
//!    lazy loading.

use alloc::boxed::Box;

use tracing::{debug, trace};

use crate::condition::Condition;
use crate::host::{ChangeStream, GeometrySource, ViewportSource};
use crate::types::VisibilityStatus;

/// Notification sink.
///
/// Called with the observed element, the triggering event (absent for evaluations that were not
/// caused by the change stream), the current status, and the evaluator itself.
/// While it runs, the callback's own slot on the evaluator is empty.
///
/// The returned [`Outcome`] decides whether the evaluator stays subscribed.
pub type Callback<E, H> = Box<
    dyn FnMut(
        &E,
        Option<&<H as ChangeStream>::Event>,
        &VisibilityStatus,
        &VisibilityEvaluator<E, H>,
    ) -> Outcome,
>;

/// Box a closure as a [`Callback`].
///
/// Helps closure signature inference; prefer this over a bare `Box::new`.
pub fn callback<E, H, F>(f: F) -> Callback<E, H>
where
    H: ChangeStream,
    F: FnMut(&E, Option<&H::Event>, &VisibilityStatus, &VisibilityEvaluator<E, H>) -> Outcome
        + 'static,
{
    Box::new(f)
}

/// Callback outcome controlling the subscription.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Keep observing.
    Continue,
    /// Unsubscribe once the callback returns; later changes are ignored until
    /// [`start`](VisibilityEvaluator::start) or [`configure`](VisibilityEvaluator::configure).
    Stop,
}

/// Result of one evaluation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Evaluation {
    /// No element is bound.
    Unbound,
    /// The element currently has no layout; the status was left untouched.
    NoLayout,
    /// Status was recomputed but no condition is configured.
    Unconfigured,
    /// Change notification arrived while not subscribed.
    Inactive,
    /// Status was recomputed; gating suppressed notification.
    Quiet,
    /// Gating passed. The callback for `matched` was invoked if one is installed.
    Fired {
        /// Match result that selected the callback.
        matched: bool,
    },
}

/// Result of a reconfiguration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Configured {
    /// No element is bound; nothing was changed.
    Unbound,
    /// Configuration was stored and evaluated once, but there is nothing to notify, so the
    /// evaluator is not subscribed (any earlier subscription was released).
    Idle,
    /// Subscribed to the change stream and evaluated once.
    Attached,
}

/// Tracks the visibility of one element and notifies on condition transitions.
///
/// `E` is the host's element handle; `H` supplies geometry, viewport size, and change
/// notifications.
pub struct VisibilityEvaluator<E, H: ChangeStream> {
    host: H,
    element: Option<E>,
    condition: Option<Condition>,
    on_true: Option<Callback<E, H>>,
    on_false: Option<Callback<E, H>>,
    notify_every_event: bool,
    status: Option<VisibilityStatus>,
    previous: Option<VisibilityStatus>,
    conditions_match: Option<bool>,
    subscription: Option<H::Subscription>,
}

impl<E: core::fmt::Debug, H: ChangeStream> core::fmt::Debug for VisibilityEvaluator<E, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VisibilityEvaluator")
            .field("element", &self.element)
            .field("condition", &self.condition)
            .field("notify_every_event", &self.notify_every_event)
            .field("status", &self.status)
            .field("conditions_match", &self.conditions_match)
            .field("attached", &self.subscription.is_some())
            .finish_non_exhaustive()
    }
}

impl<E, H: ChangeStream> VisibilityEvaluator<E, H> {
    /// Create an evaluator with no element bound.
    pub fn new(host: H) -> Self {
        Self {
            host,
            element: None,
            condition: None,
            on_true: None,
            on_false: None,
            notify_every_event: false,
            status: None,
            previous: None,
            conditions_match: None,
            subscription: None,
        }
    }

    /// Create an evaluator bound to `element`.
    pub fn bound(host: H, element: E) -> Self {
        let mut this = Self::new(host);
        this.element = Some(element);
        this
    }

    /// Bind to `element`, forgetting any status computed for a previous element.
    pub fn bind(&mut self, element: E) {
        self.element = Some(element);
        self.status = None;
        self.previous = None;
        self.conditions_match = None;
    }

    /// Unsubscribe and release the bound element.
    pub fn unbind(&mut self) -> Option<E> {
        self.stop();
        self.status = None;
        self.previous = None;
        self.conditions_match = None;
        self.element.take()
    }

    /// The bound element, if any.
    pub fn element(&self) -> Option<&E> {
        self.element.as_ref()
    }

    /// The host collaborators.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host collaborators (e.g. to scroll or resize in tests).
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The configured condition, if any.
    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }

    /// Whether every evaluation notifies regardless of change.
    pub fn notify_every_event(&self) -> bool {
        self.notify_every_event
    }

    /// Status from the most recent evaluation; `None` before the first one.
    pub fn status(&self) -> Option<&VisibilityStatus> {
        self.status.as_ref()
    }

    /// Status from the evaluation before the most recent one.
    pub fn previous_status(&self) -> Option<&VisibilityStatus> {
        self.previous.as_ref()
    }

    /// Match result recorded by the last notification; `None` until the first one.
    pub fn conditions_match(&self) -> Option<bool> {
        self.conditions_match
    }

    /// Whether the evaluator is subscribed to the host's change stream.
    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// Subscribe to the host's change stream.
    ///
    /// Returns `true` if subscribed afterwards. Subscription is skipped while there is no
    /// element, no condition, or no callback at all.
    pub fn start(&mut self) -> bool {
        if self.subscription.is_some() {
            return true;
        }
        if self.element.is_none()
            || self.condition.is_none()
            || (self.on_true.is_none() && self.on_false.is_none())
        {
            debug!("not configured to notify; skipping subscription");
            return false;
        }
        self.subscription = Some(self.host.subscribe());
        debug!("subscribed to viewport changes");
        true
    }

    /// Unsubscribe from the host's change stream.
    ///
    /// Returns `true` if a subscription was released.
    pub fn stop(&mut self) -> bool {
        match self.subscription.take() {
            Some(subscription) => {
                self.host.unsubscribe(subscription);
                debug!("unsubscribed from viewport changes");
                true
            }
            None => false,
        }
    }
}

impl<E, H> VisibilityEvaluator<E, H>
where
    H: GeometrySource<E> + ViewportSource + ChangeStream,
{
    /// Replace the condition and callbacks, subscribe if needed, and evaluate once.
    ///
    /// With neither callback the evaluator is left unsubscribed, but the evaluation still runs.
    pub fn configure(
        &mut self,
        condition: Condition,
        on_true: Option<Callback<E, H>>,
        on_false: Option<Callback<E, H>>,
        notify_every_event: bool,
    ) -> Configured {
        if self.element.is_none() {
            debug!("no element bound; ignoring configuration");
            return Configured::Unbound;
        }
        self.condition = Some(condition);
        self.on_true = on_true;
        self.on_false = on_false;
        self.notify_every_event = notify_every_event;
        self.conditions_match = None;
        let attached = if self.on_true.is_none() && self.on_false.is_none() {
            debug!("no callbacks; releasing any subscription");
            self.stop();
            false
        } else {
            self.start()
        };
        self.evaluate(None);
        if attached {
            Configured::Attached
        } else {
            Configured::Idle
        }
    }

    /// Notify `on_true` on every status change.
    pub fn configure_always(&mut self, on_true: Option<Callback<E, H>>) -> Configured {
        self.configure(Condition::All, on_true, None, false)
    }

    /// Handler for the host's change stream. Ignored unless subscribed.
    pub fn handle_change(&mut self, event: &H::Event) -> Evaluation {
        if self.subscription.is_none() {
            trace!("change while unsubscribed; ignoring");
            return Evaluation::Inactive;
        }
        self.evaluate(Some(event))
    }

    /// Recompute the status and notify if gating allows.
    pub fn evaluate(&mut self, event: Option<&H::Event>) -> Evaluation {
        let Some(element) = self.element.as_ref() else {
            return Evaluation::Unbound;
        };
        let Some(rect) = self.host.bounding_rect(element) else {
            debug!("element has no layout; skipping evaluation");
            return Evaluation::NoLayout;
        };
        let status = VisibilityStatus::compute(rect, self.host.viewport_size());
        self.previous = self.status.replace(status);
        let changed = self.previous != Some(status);

        let (matched, gated) = match &self.condition {
            None => return Evaluation::Unconfigured,
            Some(Condition::All) => (true, changed),
            Some(Condition::Fields(fields)) => {
                let matched = fields.matches(&status);
                (matched, self.conditions_match != Some(matched))
            }
        };
        if !(gated || self.notify_every_event) {
            trace!(?status, matched, "no notification");
            return Evaluation::Quiet;
        }
        self.conditions_match = Some(matched);
        trace!(?status, matched, "notifying");

        let taken = if matched {
            self.on_true.take()
        } else {
            self.on_false.take()
        };
        if let Some(mut callback) = taken {
            let outcome = callback(element, event, &status, &*self);
            let slot = if matched {
                &mut self.on_true
            } else {
                &mut self.on_false
            };
            *slot = Some(callback);
            if outcome == Outcome::Stop {
                self.stop();
            }
        }
        Evaluation::Fired { matched }
    }
}
