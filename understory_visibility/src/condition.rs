// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conditions: what status an observer is waiting for.
//!
//! ## Overview
//!
//! A [`Condition`] is either [`Condition::All`], which reacts to any change of the status,
//! or [`Condition::Fields`], a conjunction of per-field targets held in a [`FieldCondition`].
//!
//! ## Textual form
//!
//! [`Condition::parse`] accepts `all`, or a list of `key:value` (or `key=value`) pairs
//! separated by commas or whitespace:
//!
//! ```
//! use understory_visibility::condition::{Condition, FieldCondition, FlagTarget};
//! use understory_visibility::types::Visibility;
//!
//! assert_eq!(Condition::parse("all"), Condition::All);
//! assert_eq!(
//!     Condition::parse("centerIsVisible: true, visibility: partial"),
//!     Condition::Fields(
//!         FieldCondition::new()
//!             .center_is_visible(FlagTarget::Is(true))
//!             .visibility(Visibility::Partial)
//!     ),
//! );
//! ```
//!
//! Unknown keys and values are dropped and never take part in matching.

use crate::types::{Visibility, VisibilityStatus};

/// Target value for one boolean field of a [`VisibilityStatus`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FlagTarget {
    /// The flag must equal this value.
    Is(bool),
    /// The flag must be `false`.
    Hidden,
}

impl FlagTarget {
    /// Whether `flag` satisfies this target.
    pub const fn accepts(self, flag: bool) -> bool {
        match self {
            Self::Is(want) => flag == want,
            Self::Hidden => !flag,
        }
    }
}

impl From<bool> for FlagTarget {
    fn from(value: bool) -> Self {
        Self::Is(value)
    }
}

/// Per-field targets; every configured field must be satisfied.
///
/// Fields left as `None` are not consulted. An empty condition matches every status.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FieldCondition {
    /// Target for the top edge flag.
    pub top: Option<FlagTarget>,
    /// Target for the right edge flag.
    pub right: Option<FlagTarget>,
    /// Target for the bottom edge flag.
    pub bottom: Option<FlagTarget>,
    /// Target for the left edge flag.
    pub left: Option<FlagTarget>,
    /// Target for the center flag.
    pub center_is_visible: Option<FlagTarget>,
    /// Target classification.
    pub visibility: Option<Visibility>,
}

impl FieldCondition {
    /// Create a condition with no fields configured.
    pub const fn new() -> Self {
        Self {
            top: None,
            right: None,
            bottom: None,
            left: None,
            center_is_visible: None,
            visibility: None,
        }
    }

    /// Set the top edge target.
    #[must_use]
    pub fn top(mut self, target: impl Into<FlagTarget>) -> Self {
        self.top = Some(target.into());
        self
    }

    /// Set the right edge target.
    #[must_use]
    pub fn right(mut self, target: impl Into<FlagTarget>) -> Self {
        self.right = Some(target.into());
        self
    }

    /// Set the bottom edge target.
    #[must_use]
    pub fn bottom(mut self, target: impl Into<FlagTarget>) -> Self {
        self.bottom = Some(target.into());
        self
    }

    /// Set the left edge target.
    #[must_use]
    pub fn left(mut self, target: impl Into<FlagTarget>) -> Self {
        self.left = Some(target.into());
        self
    }

    /// Set the center target.
    #[must_use]
    pub fn center_is_visible(mut self, target: impl Into<FlagTarget>) -> Self {
        self.center_is_visible = Some(target.into());
        self
    }

    /// Set the classification target.
    #[must_use]
    pub fn visibility(mut self, target: Visibility) -> Self {
        self.visibility = Some(target);
        self
    }

    /// Returns `true` if no field is configured.
    pub fn is_empty(&self) -> bool {
        *self == Self::new()
    }

    /// Whether `status` satisfies every configured field.
    pub fn matches(&self, status: &VisibilityStatus) -> bool {
        let flags = [
            (self.top, status.top()),
            (self.right, status.right()),
            (self.bottom, status.bottom()),
            (self.left, status.left()),
            (self.center_is_visible, status.center_is_visible),
        ];
        flags
            .iter()
            .all(|&(target, flag)| target.is_none_or(|t| t.accepts(flag)))
            && self.visibility.is_none_or(|v| v == status.visibility)
    }

    /// Apply one `key`/`value` pair from the textual form; unknown input is ignored.
    fn apply(&mut self, key: &str, value: &str) {
        if key == "visibility" {
            if let Some(v) = Visibility::from_name(value) {
                self.visibility = Some(v);
            }
            return;
        }
        let target = match value {
            "true" => FlagTarget::Is(true),
            "false" => FlagTarget::Is(false),
            "hidden" => FlagTarget::Hidden,
            _ => return,
        };
        let slot = match key {
            "top" => &mut self.top,
            "right" => &mut self.right,
            "bottom" => &mut self.bottom,
            "left" => &mut self.left,
            "centerIsVisible" | "center_is_visible" => &mut self.center_is_visible,
            _ => return,
        };
        *slot = Some(target);
    }
}

/// What an evaluator is waiting for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Condition {
    /// React to any change of the status; always reports as matching.
    All,
    /// React when the conjunction of field targets starts or stops holding.
    Fields(FieldCondition),
}

impl Condition {
    /// Parse the textual form described in the [module docs](self).
    ///
    /// Never fails: malformed pairs are skipped, so the worst case is an empty
    /// [`FieldCondition`], which matches every status.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text == "all" {
            return Self::All;
        }
        let is_sep = |c: char| c == ':' || c == '=';
        let mut fields = FieldCondition::new();
        let mut tokens = text
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .peekable();
        while let Some(token) = tokens.next() {
            let (key, value) = match token.split_once(is_sep) {
                // `key: value`
                Some((key, "")) => (key, tokens.next().unwrap_or_default()),
                Some(pair) => pair,
                // `key :value` or `key : value`
                None if tokens.peek().is_some_and(|t| t.starts_with(is_sep)) => {
                    let rest = tokens.next().map(|t| &t[1..]).unwrap_or_default();
                    if rest.is_empty() {
                        (token, tokens.next().unwrap_or_default())
                    } else {
                        (token, rest)
                    }
                }
                None => continue,
            };
            fields.apply(key, value);
        }
        Self::Fields(fields)
    }

    /// Returns `true` for [`Condition::All`].
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl From<FieldCondition> for Condition {
    fn from(fields: FieldCondition) -> Self {
        Self::Fields(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Edges;

    fn status(edges: Edges, center: bool, visibility: Visibility) -> VisibilityStatus {
        VisibilityStatus {
            edges,
            center_is_visible: center,
            visibility,
        }
    }

    #[test]
    fn flag_targets() {
        assert!(FlagTarget::Is(true).accepts(true));
        assert!(!FlagTarget::Is(true).accepts(false));
        assert!(FlagTarget::Is(false).accepts(false));
        assert!(FlagTarget::Hidden.accepts(false));
        assert!(!FlagTarget::Hidden.accepts(true));
    }

    #[test]
    fn empty_condition_matches_anything() {
        let c = FieldCondition::new();
        assert!(c.is_empty());
        assert!(c.matches(&status(Edges::empty(), false, Visibility::Hidden)));
        assert!(c.matches(&status(Edges::all(), true, Visibility::Full)));
    }

    #[test]
    fn single_unsatisfied_field_fails_the_match() {
        let c = FieldCondition::new()
            .top(true)
            .left(true)
            .center_is_visible(true);
        let s = status(Edges::TOP | Edges::LEFT, true, Visibility::Partial);
        assert!(c.matches(&s));
        let s = status(Edges::TOP, true, Visibility::Partial);
        assert!(!c.matches(&s));
    }

    #[test]
    fn hidden_marker_requires_false_flag() {
        let c = FieldCondition::new().bottom(FlagTarget::Hidden);
        assert!(c.matches(&status(Edges::TOP, false, Visibility::Hidden)));
        assert!(!c.matches(&status(Edges::BOTTOM, false, Visibility::Hidden)));
    }

    #[test]
    fn visibility_field_compares_classification() {
        let c = FieldCondition::new().visibility(Visibility::Hidden);
        assert!(c.matches(&status(Edges::HORIZONTAL, false, Visibility::Hidden)));
        assert!(!c.matches(&status(Edges::all(), true, Visibility::Full)));
    }

    #[test]
    fn parse_all_and_fields() {
        assert_eq!(Condition::parse("  all "), Condition::All);
        assert!(Condition::parse("all").is_all());
        assert_eq!(
            Condition::parse("top:true,bottom=false left : hidden center_is_visible= true"),
            Condition::Fields(
                FieldCondition::new()
                    .top(true)
                    .bottom(false)
                    .left(FlagTarget::Hidden)
                    .center_is_visible(true)
            )
        );
        assert_eq!(
            Condition::parse("visibility: overflow"),
            Condition::Fields(FieldCondition::new().visibility(Visibility::Overflow))
        );
    }

    #[test]
    fn parse_ignores_malformed_input() {
        assert_eq!(
            Condition::parse("color:red, top:maybe, visibility:sideways, right:true, stray"),
            Condition::Fields(FieldCondition::new().right(true))
        );
        assert_eq!(
            Condition::parse(""),
            Condition::Fields(FieldCondition::new())
        );
        assert_eq!(
            Condition::parse("top:"),
            Condition::Fields(FieldCondition::new())
        );
    }
}
