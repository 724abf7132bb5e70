//! Item model: the closed set of node kinds forming registry trees.

use std::fmt;
use std::sync::Arc;

use crate::{Identifier, OrderingHint, Visitor};

/// Factory producing a substitute item each time a traversal reaches it.
pub type Factory<T> = Arc<dyn Fn(&dyn Visitor<T>) -> Option<Arc<Item<T>>> + Send + Sync>;

/// Treatment of a group's children when merging trees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GroupOrdering {
	/// Name omitted from paths; children merge individually into the
	/// parent's sequence.
	Anonymous,
	/// Name significant, but the child sequence may be overridden by a
	/// same-path merge partner.
	Weak,
	/// Name significant and the child sequence is authoritative. Two strong
	/// groups at one path are a reported conflict.
	#[default]
	Strong,
}

/// A node of a registry or default tree.
#[derive(Debug)]
pub enum Item<T> {
	Single(SingleItem<T>),
	Group(GroupItem<T>),
	Indirect(IndirectItem<T>),
	Computed(ComputedItem<T>),
}

/// Leaf item carrying one visitable payload.
#[derive(Debug)]
pub struct SingleItem<T> {
	pub name: Identifier,
	pub hint: OrderingHint,
	pub value: T,
}

/// Item exclusively owning an ordered list of children.
#[derive(Debug)]
pub struct GroupItem<T> {
	pub name: Identifier,
	pub hint: OrderingHint,
	pub ordering: GroupOrdering,
	pub children: Vec<Item<T>>,
}

/// Item delegating to a subtree shared with other trees.
///
/// The delegate's name is used for path calculations. The indirect item's
/// own hint applies when the delegate's hint is unspecified.
#[derive(Debug)]
pub struct IndirectItem<T> {
	pub hint: OrderingHint,
	pub target: Arc<Item<T>>,
}

/// Item computing its substitute anew on every traversal.
pub struct ComputedItem<T> {
	pub hint: OrderingHint,
	pub factory: Factory<T>,
}

impl<T> fmt::Debug for ComputedItem<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ComputedItem")
			.field("hint", &self.hint)
			.finish_non_exhaustive()
	}
}

impl<T> Item<T> {
	pub fn single(name: impl Into<Identifier>, value: T) -> Self {
		Self::Single(SingleItem {
			name: name.into(),
			hint: OrderingHint::Unspecified,
			value,
		})
	}

	/// A strongly ordered group.
	pub fn group(name: impl Into<Identifier>, children: impl IntoIterator<Item = Item<T>>) -> Self {
		Self::Group(GroupItem::new(name).with_children(children))
	}

	/// A transparent group whose children merge into the parent's sequence.
	pub fn anonymous(children: impl IntoIterator<Item = Item<T>>) -> Self {
		Self::Group(
			GroupItem::new(Identifier::empty())
				.with_ordering(GroupOrdering::Anonymous)
				.with_children(children),
		)
	}

	pub fn indirect(target: Arc<Item<T>>) -> Self {
		Self::Indirect(IndirectItem {
			hint: OrderingHint::Unspecified,
			target,
		})
	}

	pub fn computed<F>(factory: F) -> Self
	where
		F: Fn(&dyn Visitor<T>) -> Option<Arc<Item<T>>> + Send + Sync + 'static,
	{
		Self::Computed(ComputedItem {
			hint: OrderingHint::Unspecified,
			factory: Arc::new(factory),
		})
	}

	/// Own name; empty for delegating items.
	pub fn name(&self) -> Identifier {
		match self {
			Self::Single(item) => item.name.clone(),
			Self::Group(group) => group.name.clone(),
			Self::Indirect(_) | Self::Computed(_) => Identifier::empty(),
		}
	}

	pub fn hint(&self) -> &OrderingHint {
		match self {
			Self::Single(item) => &item.hint,
			Self::Group(group) => &group.hint,
			Self::Indirect(item) => &item.hint,
			Self::Computed(item) => &item.hint,
		}
	}

	pub fn hint_mut(&mut self) -> &mut OrderingHint {
		match self {
			Self::Single(item) => &mut item.hint,
			Self::Group(group) => &mut group.hint,
			Self::Indirect(item) => &mut item.hint,
			Self::Computed(item) => &mut item.hint,
		}
	}

	pub fn with_hint(mut self, hint: OrderingHint) -> Self {
		*self.hint_mut() = hint;
		self
	}

	/// Sets the ordering policy. No effect on non-group items.
	pub fn with_ordering(mut self, ordering: GroupOrdering) -> Self {
		if let Self::Group(group) = &mut self {
			group.ordering = ordering;
		}
		self
	}

	pub fn as_group(&self) -> Option<&GroupItem<T>> {
		match self {
			Self::Group(group) => Some(group),
			_ => None,
		}
	}

	pub fn as_group_mut(&mut self) -> Option<&mut GroupItem<T>> {
		match self {
			Self::Group(group) => Some(group),
			_ => None,
		}
	}

	pub fn is_group(&self) -> bool {
		matches!(self, Self::Group(_))
	}
}

impl<T> GroupItem<T> {
	/// An empty, strongly ordered group.
	pub fn new(name: impl Into<Identifier>) -> Self {
		Self {
			name: name.into(),
			hint: OrderingHint::Unspecified,
			ordering: GroupOrdering::default(),
			children: Vec::new(),
		}
	}

	pub fn with_ordering(mut self, ordering: GroupOrdering) -> Self {
		self.ordering = ordering;
		self
	}

	pub fn with_hint(mut self, hint: OrderingHint) -> Self {
		self.hint = hint;
		self
	}

	pub fn with_children(mut self, children: impl IntoIterator<Item = Item<T>>) -> Self {
		self.children.extend(children);
		self
	}

	pub fn push(&mut self, item: Item<T>) {
		self.children.push(item);
	}

	pub fn extend(&mut self, items: impl IntoIterator<Item = Item<T>>) {
		self.children.extend(items);
	}

	pub fn is_empty(&self) -> bool {
		self.children.is_empty()
	}

	pub fn len(&self) -> usize {
		self.children.len()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Item<T>> {
		self.children.iter()
	}

	/// Child with the given non-empty own name.
	pub fn find(&self, name: &str) -> Option<&Item<T>> {
		if name.is_empty() {
			return None;
		}
		self.children.iter().find(|child| child.name() == name)
	}

	pub(crate) fn position(&self, name: &str) -> Option<usize> {
		if name.is_empty() {
			return None;
		}
		self.children.iter().position(|child| child.name() == name)
	}
}

impl<T> From<GroupItem<T>> for Item<T> {
	fn from(group: GroupItem<T>) -> Self {
		Self::Group(group)
	}
}

impl<T> From<SingleItem<T>> for Item<T> {
	fn from(item: SingleItem<T>) -> Self {
		Self::Single(item)
	}
}

impl<'a, T> IntoIterator for &'a GroupItem<T> {
	type Item = &'a Item<T>;
	type IntoIter = std::slice::Iter<'a, Item<T>>;

	fn into_iter(self) -> Self::IntoIter {
		self.children.iter()
	}
}
