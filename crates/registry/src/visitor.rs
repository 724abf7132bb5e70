//! Traversal callbacks.

use crate::{GroupItem, Identifier, SingleItem, VisitError};

/// Result of one visitor callback.
pub type VisitResult = Result<(), VisitError>;

/// Callbacks invoked by a traversal in final merged order.
///
/// The `path` holds the names of all named ancestors and excludes the item's
/// own name. Every method defaults to a no-op, so consumers override only what
/// they need. An `Err` aborts the traversal and reaches the caller of
/// [`Traversal::run`](crate::Traversal::run).
pub trait Visitor<T> {
	fn begin_group(&mut self, group: &GroupItem<T>, path: &[Identifier]) -> VisitResult {
		let _ = (group, path);
		Ok(())
	}

	fn end_group(&mut self, group: &GroupItem<T>, path: &[Identifier]) -> VisitResult {
		let _ = (group, path);
		Ok(())
	}

	fn visit(&mut self, item: &SingleItem<T>, path: &[Identifier]) -> VisitResult {
		let _ = (item, path);
		Ok(())
	}
}

/// Visitor that does nothing; useful to settle persisted orderings.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullVisitor;

impl<T> Visitor<T> for NullVisitor {}
