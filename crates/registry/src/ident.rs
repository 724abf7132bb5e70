//! Item identifiers.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Immutable, cheaply clonable item name.
///
/// Names are unique among the non-empty names of one sibling list. The empty
/// identifier marks anonymous or delegating items, which never match by name.
/// Names used in paths or stored orderings must not contain `/` or `,`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(Arc<str>);

impl Identifier {
	pub fn new(name: impl AsRef<str>) -> Self {
		Self(Arc::from(name.as_ref()))
	}

	/// The empty identifier.
	pub fn empty() -> Self {
		Self(Arc::from(""))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl Default for Identifier {
	fn default() -> Self {
		Self::empty()
	}
}

impl From<&str> for Identifier {
	fn from(name: &str) -> Self {
		Self::new(name)
	}
}

impl From<String> for Identifier {
	fn from(name: String) -> Self {
		Self(Arc::from(name))
	}
}

impl AsRef<str> for Identifier {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl Borrow<str> for Identifier {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl PartialEq<str> for Identifier {
	fn eq(&self, other: &str) -> bool {
		&*self.0 == other
	}
}

impl PartialEq<&str> for Identifier {
	fn eq(&self, other: &&str) -> bool {
		&*self.0 == *other
	}
}

impl fmt::Display for Identifier {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl fmt::Debug for Identifier {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&*self.0, f)
	}
}

/// Joins identifiers into a `/`-separated path string for diagnostics.
pub fn display_path(path: &[Identifier]) -> String {
	let mut out = String::new();
	for segment in path {
		out.push('/');
		out.push_str(segment.as_str());
	}
	out
}
