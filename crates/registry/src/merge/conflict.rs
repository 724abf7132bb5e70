//! Configuration conflicts found while merging.
//!
//! Conflicts never abort a traversal. Each is resolved by a deterministic
//! fallback, recorded on the [`Traversal`](crate::Traversal), and logged.

use std::fmt;

use crate::Identifier;
use crate::ident::display_path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConflictKind {
	/// Two strongly ordered groups met at one path. The earlier one (the
	/// default tree's, when present) keeps its child sequence.
	StrongGroups,
	/// A leaf and a group share a name. The leaf is merged into the group.
	ItemGroup,
	/// Two leaves share a name. Both are kept; the later one is placed by its
	/// hint and excluded from persisted orderings.
	DuplicateItems,
}

impl fmt::Display for ConflictKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::StrongGroups => write!(f, "strong_groups"),
			Self::ItemGroup => write!(f, "item_group"),
			Self::DuplicateItems => write!(f, "duplicate_items"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
	/// Path of the group whose children collided, including its own name.
	pub path: Vec<Identifier>,
	/// The colliding name.
	pub name: Identifier,
	pub kind: ConflictKind,
}

impl fmt::Display for Conflict {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{} collision on {:?} under {}",
			self.kind,
			self.name.as_str(),
			display_path(&self.path)
		)
	}
}
