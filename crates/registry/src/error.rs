use crate::Identifier;

/// Irrecoverable problems with a single registration request.
///
/// The registry is left unchanged when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
	/// The placement path contains an empty segment (`a//b`, `/a`, `a/`).
	#[error("empty segment in placement path {path:?}")]
	EmptySegment { path: String },

	/// A path segment names a leaf item where a group was expected.
	#[error("path {path:?} descends through leaf item {segment:?}")]
	LeafInPath { path: String, segment: Identifier },

	/// A path segment names a shared (indirect) subtree, which is immutable.
	#[error("path {path:?} descends through shared item {segment:?}")]
	SharedInPath { path: String, segment: Identifier },

	/// The terminal group already holds an incompatible item with this name.
	#[error("item {name:?} already registered at {path:?}")]
	DuplicateName { path: String, name: Identifier },

	/// A name contains `/` or `,`, which cannot be addressed by path or kept
	/// in a stored ordering.
	#[error("name {name:?} at {path:?} contains a reserved character")]
	ReservedCharacter { path: String, name: Identifier },
}

/// Failure raised by a [`Visitor`](crate::Visitor) callback.
#[derive(Debug, thiserror::Error)]
pub enum VisitError {
	#[error("visitor aborted: {0}")]
	Aborted(#[source] Box<dyn std::error::Error + Send + Sync>),

	#[error("visitor aborted: {0}")]
	Message(String),
}

impl VisitError {
	pub fn aborted(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
		Self::Aborted(err.into())
	}
}
