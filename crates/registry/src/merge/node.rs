//! Handles to items reached during a traversal.

use std::sync::Arc;

use smallvec::SmallVec;

use crate::item::{ComputedItem, IndirectItem};
use crate::{GroupItem, GroupOrdering, Identifier, Item, OrderingHint, SingleItem};

/// Reference to an item that is either borrowed from a caller's tree or
/// lives inside a shared subtree (indirect delegate or computed result).
///
/// Shared nodes are addressed by the subtree root plus the child indices
/// leading down to them, so a handle never borrows from a temporary.
pub(crate) enum Node<'a, T> {
	Borrowed(&'a Item<T>),
	Group(&'a GroupItem<T>),
	Shared {
		root: Arc<Item<T>>,
		path: SmallVec<[usize; 4]>,
	},
}

/// Borrowed view of the item behind a [`Node`].
pub(crate) enum View<'n, T> {
	Single(&'n SingleItem<T>),
	Group(&'n GroupItem<T>),
	Indirect(&'n IndirectItem<T>),
	Computed(&'n ComputedItem<T>),
}

impl<'n, T> View<'n, T> {
	fn of(item: &'n Item<T>) -> Self {
		match item {
			Item::Single(item) => Self::Single(item),
			Item::Group(group) => Self::Group(group),
			Item::Indirect(item) => Self::Indirect(item),
			Item::Computed(item) => Self::Computed(item),
		}
	}
}

impl<'a, T> Node<'a, T> {
	pub(crate) fn shared(root: Arc<Item<T>>) -> Self {
		Self::Shared {
			root,
			path: SmallVec::new(),
		}
	}

	pub(crate) fn view(&self) -> View<'_, T> {
		match self {
			Self::Borrowed(item) => View::of(*item),
			Self::Group(group) => View::Group(*group),
			Self::Shared { root, path } => View::of(descend(root, path)),
		}
	}

	/// Own name of the item; empty for delegating items.
	pub(crate) fn name(&self) -> Identifier {
		match self.view() {
			View::Single(item) => item.name.clone(),
			View::Group(group) => group.name.clone(),
			View::Indirect(_) | View::Computed(_) => Identifier::empty(),
		}
	}

	pub(crate) fn ordering(&self) -> Option<GroupOrdering> {
		match self.view() {
			View::Group(group) => Some(group.ordering),
			_ => None,
		}
	}

	/// Handles to the children of a group node; empty for anything else.
	pub(crate) fn children(&self) -> Vec<Node<'a, T>> {
		match *self {
			Self::Borrowed(item) => match item {
				Item::Group(group) => group.children.iter().map(Node::Borrowed).collect(),
				_ => Vec::new(),
			},
			Self::Group(group) => group.children.iter().map(Node::Borrowed).collect(),
			Self::Shared { ref root, ref path } => match descend(root, path) {
				Item::Group(group) => (0..group.children.len())
					.map(|index| {
						let mut child_path = path.clone();
						child_path.push(index);
						Node::Shared {
							root: Arc::clone(root),
							path: child_path,
						}
					})
					.collect(),
				_ => Vec::new(),
			},
		}
	}
}

impl<T> Clone for Node<'_, T> {
	fn clone(&self) -> Self {
		match self {
			Self::Borrowed(item) => Self::Borrowed(*item),
			Self::Group(group) => Self::Group(*group),
			Self::Shared { root, path } => Self::Shared {
				root: Arc::clone(root),
				path: path.clone(),
			},
		}
	}
}

fn descend<'r, T>(root: &'r Item<T>, path: &[usize]) -> &'r Item<T> {
	let mut item = root;
	for &index in path {
		match item {
			Item::Group(group) => item = &group.children[index],
			_ => break,
		}
	}
	item
}

/// A resolved child together with the hint that governs its placement.
pub(crate) struct Entry<'a, T> {
	pub(crate) node: Node<'a, T>,
	pub(crate) hint: OrderingHint,
}

impl<T> Clone for Entry<'_, T> {
	fn clone(&self) -> Self {
		Self {
			node: self.node.clone(),
			hint: self.hint.clone(),
		}
	}
}
