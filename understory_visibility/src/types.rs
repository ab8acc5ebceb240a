// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visibility status: edge flags, center visibility, and the coarse classification.
//!
//! ## Coordinates
//!
//! Element bounds are a [`Rect`] in viewport coordinates, so the viewport itself spans
//! `0..=width` horizontally and `0..=height` vertically.
//! `x0`/`x1` are the left/right edges and `y0`/`y1` are the top/bottom edges.
//! Both ends of each range are inclusive; an edge lying exactly on the viewport border counts as visible.

use kurbo::{Rect, Size};

bitflags::bitflags! {
    /// Edges of an element's bounding box that lie within the viewport on their axis.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Edges: u8 {
        /// Top edge is within `0..=height`.
        const TOP    = 0b0000_0001;
        /// Right edge is within `0..=width`.
        const RIGHT  = 0b0000_0010;
        /// Bottom edge is within `0..=height`.
        const BOTTOM = 0b0000_0100;
        /// Left edge is within `0..=width`.
        const LEFT   = 0b0000_1000;
        /// Edges on the vertical axis.
        const VERTICAL = Self::TOP.bits() | Self::BOTTOM.bits();
        /// Edges on the horizontal axis.
        const HORIZONTAL = Self::LEFT.bits() | Self::RIGHT.bits();
    }
}

/// Coarse classification of how an element relates to the viewport.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// All four edges are inside the viewport.
    Full,
    /// At least one vertical and one horizontal edge are inside the viewport.
    Partial,
    /// The element strictly encloses the viewport on both axes.
    Overflow,
    /// None of the above.
    #[default]
    Hidden,
}

impl Visibility {
    /// Parse the lowercase name used in textual conditions (`full`, `partial`, `overflow`, `hidden`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "full" => Some(Self::Full),
            "partial" => Some(Self::Partial),
            "overflow" => Some(Self::Overflow),
            "hidden" => Some(Self::Hidden),
            _ => None,
        }
    }

    /// Lowercase name of this classification.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Partial => "partial",
            Self::Overflow => "overflow",
            Self::Hidden => "hidden",
        }
    }
}

/// Visibility of one element against one viewport at one point in time.
///
/// Computed by [`VisibilityStatus::compute`]. The evaluator keeps the current and previous
/// status as plain values and compares them structurally.
///
/// ```
/// use kurbo::{Rect, Size};
/// use understory_visibility::types::{Visibility, VisibilityStatus};
///
/// let status = VisibilityStatus::compute(
///     Rect::new(10.0, 10.0, 50.0, 50.0),
///     Size::new(800.0, 600.0),
/// );
/// assert_eq!(status.visibility, Visibility::Full);
/// assert!(status.center_is_visible);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct VisibilityStatus {
    /// Edge flags.
    pub edges: Edges,
    /// Whether the midpoint of the bounding box lies inside the viewport.
    pub center_is_visible: bool,
    /// Coarse classification.
    pub visibility: Visibility,
}

impl VisibilityStatus {
    /// Classify `rect` against a viewport of `viewport` size anchored at the origin.
    ///
    /// Classification order is `Full`, `Overflow`, `Partial`, then `Hidden`.
    /// `Overflow` is decided on the raw coordinates: the box must start above and left of the
    /// origin and end below and right of the far viewport corner.
    pub fn compute(rect: Rect, viewport: Size) -> Self {
        let within_y = |y: f64| (0.0..=viewport.height).contains(&y);
        let within_x = |x: f64| (0.0..=viewport.width).contains(&x);

        let mut edges = Edges::empty();
        edges.set(Edges::TOP, within_y(rect.y0));
        edges.set(Edges::BOTTOM, within_y(rect.y1));
        edges.set(Edges::LEFT, within_x(rect.x0));
        edges.set(Edges::RIGHT, within_x(rect.x1));

        let center = rect.center();
        let center_is_visible = within_x(center.x) && within_y(center.y);

        let overflows = rect.y0 < 0.0
            && rect.y1 > viewport.height
            && rect.x0 < 0.0
            && rect.x1 > viewport.width;

        let visibility = if edges.is_all() {
            Visibility::Full
        } else if overflows {
            Visibility::Overflow
        } else if edges.intersects(Edges::VERTICAL) && edges.intersects(Edges::HORIZONTAL) {
            Visibility::Partial
        } else {
            Visibility::Hidden
        };

        Self {
            edges,
            center_is_visible,
            visibility,
        }
    }

    /// Top edge flag.
    pub fn top(&self) -> bool {
        self.edges.contains(Edges::TOP)
    }

    /// Right edge flag.
    pub fn right(&self) -> bool {
        self.edges.contains(Edges::RIGHT)
    }

    /// Bottom edge flag.
    pub fn bottom(&self) -> bool {
        self.edges.contains(Edges::BOTTOM)
    }

    /// Left edge flag.
    pub fn left(&self) -> bool {
        self.edges.contains(Edges::LEFT)
    }
}
