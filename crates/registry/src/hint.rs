//! Relative placement requests.

use crate::Identifier;

/// Requested insertion point of an item among its siblings.
///
/// A hint is a request, not a guarantee: a missing anchor or several items
/// competing for the same spot degrade quietly. Variant order is significant;
/// the derived [`Ord`] compares `(kind, name)` and sorts
/// [`OrderingHint::Unspecified`] last.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OrderingHint {
	/// Immediately before the named sibling.
	Before(Identifier),
	/// Immediately after the named sibling.
	After(Identifier),
	/// At the front of the sibling sequence.
	Begin,
	/// At the back of the sibling sequence.
	End,
	/// Like [`OrderingHint::End`], except that a delegating item (indirect,
	/// computed, or anonymous group) substitutes its own hint.
	#[default]
	Unspecified,
}

impl OrderingHint {
	pub fn before(name: impl Into<Identifier>) -> Self {
		Self::Before(name.into())
	}

	pub fn after(name: impl Into<Identifier>) -> Self {
		Self::After(name.into())
	}

	pub fn is_unspecified(&self) -> bool {
		matches!(self, Self::Unspecified)
	}

	/// The sibling named by a `Before`/`After` hint.
	pub fn anchor(&self) -> Option<&Identifier> {
		match self {
			Self::Before(name) | Self::After(name) => Some(name),
			_ => None,
		}
	}

	/// Returns `self`, or `fallback` when `self` is unspecified.
	pub fn or<'a>(&'a self, fallback: &'a OrderingHint) -> &'a OrderingHint {
		if self.is_unspecified() { fallback } else { self }
	}
}
