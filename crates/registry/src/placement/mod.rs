//! Placement resolver: puts registered items into a registry tree.
//!
//! Registration only shapes the tree. Ordering is decided later, at traversal
//! time, so the sequence of [`register_item`] calls has no bearing on the
//! final order: children of weakly ordered groups are kept sorted by name,
//! and the tree comes out the same whatever order items arrive in. When
//! sequence matters, register a strongly ordered group; items registered into
//! one later are appended to its authored sequence.
//!
//! Names must not contain `/` (the path separator) or `,` (the separator of
//! stored orderings).

use rustc_hash::FxHashSet;

use crate::{GroupItem, GroupOrdering, Identifier, Item, OrderingHint, PlacementError};

/// Where, under a registry root, an item is registered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Placement {
	/// `/`-separated group names relative to the registry root; empty for the
	/// root itself.
	pub path: String,
	/// Applied to the item when its own hint is unspecified.
	pub hint: OrderingHint,
}

impl Placement {
	pub fn new(path: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			hint: OrderingHint::Unspecified,
		}
	}

	pub fn with_hint(mut self, hint: OrderingHint) -> Self {
		self.hint = hint;
		self
	}

	/// Splits the path into identifiers.
	pub fn segments(&self) -> Result<Vec<Identifier>, PlacementError> {
		if self.path.is_empty() {
			return Ok(Vec::new());
		}
		self.path
			.split('/')
			.map(|segment| {
				if segment.is_empty() {
					Err(PlacementError::EmptySegment {
						path: self.path.clone(),
					})
				} else if segment.contains(',') {
					Err(PlacementError::ReservedCharacter {
						path: self.path.clone(),
						name: Identifier::new(segment),
					})
				} else {
					Ok(Identifier::new(segment))
				}
			})
			.collect()
	}
}

/// Explicit root of one registry namespace (one menu bar, one toolbar).
///
/// Owned by the application's startup code and passed by reference to
/// registration and traversal.
#[derive(Debug)]
pub struct Registry<T> {
	root: GroupItem<T>,
}

impl<T> Registry<T> {
	pub fn new(name: impl Into<Identifier>) -> Self {
		Self {
			root: GroupItem::new(name).with_ordering(GroupOrdering::Weak),
		}
	}

	pub fn name(&self) -> &Identifier {
		&self.root.name
	}

	pub fn root(&self) -> &GroupItem<T> {
		&self.root
	}

	pub fn is_empty(&self) -> bool {
		self.root.is_empty()
	}

	pub fn register(&mut self, placement: &Placement, item: Item<T>) -> Result<(), PlacementError> {
		let name = item.name();
		let result = register_item(&mut self.root, placement, item);
		match &result {
			Ok(()) => tracing::trace!(
				registry = %self.root.name,
				path = %placement.path,
				name = %name,
				"registered item",
			),
			Err(err) => tracing::error!(
				registry = %self.root.name,
				error = %err,
				"registration rejected",
			),
		}
		result
	}
}

/// Registers `item` under `registry` at `placement`.
///
/// Missing intermediate groups are created as weak placeholders. On error the
/// registry is left unchanged and the item is dropped.
pub fn register_item<T>(
	registry: &mut GroupItem<T>,
	placement: &Placement,
	mut item: Item<T>,
) -> Result<(), PlacementError> {
	let segments = placement.segments()?;
	check_names(&item, &placement.path)?;
	check_path(registry, &segments, &item, &placement.path)?;

	if item.hint().is_unspecified() {
		*item.hint_mut() = placement.hint.clone();
	}

	let mut group = registry;
	for segment in &segments {
		let index = match group.position(segment.as_str()) {
			Some(index) => index,
			None => attach(
				group,
				Item::Group(GroupItem::new(segment.clone()).with_ordering(GroupOrdering::Weak)),
			),
		};
		let Some(next) = group.children[index].as_group_mut() else {
			return Err(PlacementError::LeafInPath {
				path: placement.path.clone(),
				segment: segment.clone(),
			});
		};
		group = next;
	}

	insert_child(group, item, &placement.path)
}

/// Validates the whole request before anything is mutated.
fn check_path<T>(
	registry: &GroupItem<T>,
	segments: &[Identifier],
	item: &Item<T>,
	path: &str,
) -> Result<(), PlacementError> {
	let mut current = Some(registry);
	for segment in segments {
		let Some(group) = current else {
			return Ok(());
		};
		if shares_name(group, segment) {
			return Err(PlacementError::SharedInPath {
				path: path.to_owned(),
				segment: segment.clone(),
			});
		}
		current = match group.find(segment.as_str()) {
			Some(Item::Group(next)) => Some(next),
			Some(_) => {
				return Err(PlacementError::LeafInPath {
					path: path.to_owned(),
					segment: segment.clone(),
				});
			}
			None => None,
		};
	}
	match current {
		Some(group) => check_insert(group, item, path),
		None => Ok(()),
	}
}

/// Checks that `item` can join `group` without two children of `group`
/// answering to the same name.
///
/// Indirect items answer to their delegate's name and anonymous groups to the
/// names of their children, since both dissolve into `group` when traversed.
fn check_insert<T>(group: &GroupItem<T>, item: &Item<T>, path: &str) -> Result<(), PlacementError> {
	if let Item::Group(incoming) = item
		&& incoming.ordering != GroupOrdering::Anonymous
		&& let Some(Item::Group(existing)) = group.find(incoming.name.as_str())
	{
		for child in &incoming.children {
			check_insert(existing, child, path)?;
		}
		return Ok(());
	}

	let mut taken = FxHashSet::default();
	for child in &group.children {
		answers_to(child, &mut |name| {
			taken.insert(name.clone());
		});
	}
	let mut clash = None;
	answers_to(item, &mut |name| {
		if clash.is_none() && taken.contains(name) {
			clash = Some(name.clone());
		}
	});
	match clash {
		Some(name) => Err(PlacementError::DuplicateName {
			path: path.to_owned(),
			name,
		}),
		None => Ok(()),
	}
}

/// Calls `f` with every non-empty name `item` occupies in its parent's
/// sequence.
fn answers_to<T>(item: &Item<T>, f: &mut dyn FnMut(&Identifier)) {
	let name = match item {
		Item::Single(single) => &single.name,
		Item::Group(group) if group.ordering == GroupOrdering::Anonymous => {
			for child in &group.children {
				answers_to(child, f);
			}
			return;
		}
		Item::Group(group) => &group.name,
		Item::Indirect(indirect) => return answers_to(&indirect.target, f),
		Item::Computed(_) => return,
	};
	if !name.is_empty() {
		f(name);
	}
}

/// Rejects reserved characters anywhere in `item` and repeated names among
/// the children of any group inside it.
fn check_names<T>(item: &Item<T>, path: &str) -> Result<(), PlacementError> {
	let name = item.name();
	if name.as_str().contains(['/', ',']) {
		return Err(PlacementError::ReservedCharacter {
			path: path.to_owned(),
			name,
		});
	}
	let Item::Group(group) = item else {
		return Ok(());
	};
	let mut seen = FxHashSet::default();
	let mut repeated = None;
	for child in &group.children {
		check_names(child, path)?;
		answers_to(child, &mut |name| {
			if repeated.is_none() && !seen.insert(name.clone()) {
				repeated = Some(name.clone());
			}
		});
	}
	match repeated {
		Some(name) => Err(PlacementError::DuplicateName {
			path: path.to_owned(),
			name,
		}),
		None => Ok(()),
	}
}

/// Whether an indirect child of `group` delegates to an item called `name`.
fn shares_name<T>(group: &GroupItem<T>, name: &Identifier) -> bool {
	group.children.iter().any(|child| match child {
		Item::Indirect(indirect) => delegate_name(&indirect.target) == Some(name),
		_ => false,
	})
}

fn delegate_name<T>(item: &Item<T>) -> Option<&Identifier> {
	match item {
		Item::Indirect(indirect) => delegate_name(&indirect.target),
		Item::Computed(_) => None,
		Item::Single(single) => Some(&single.name),
		Item::Group(group) => Some(&group.name).filter(|name| !name.is_empty()),
	}
}

/// Adds `item` to `group`, returning its index.
///
/// Weakly ordered groups keep their children sorted by the name each child
/// answers to; unnamed children sort first and keep arrival order among
/// themselves. Strongly ordered groups append.
fn attach<T>(group: &mut GroupItem<T>, item: Item<T>) -> usize {
	if group.ordering == GroupOrdering::Strong {
		group.push(item);
		return group.children.len() - 1;
	}
	let key = sort_key(&item);
	let at = group.children.partition_point(|child| sort_key(child) <= key);
	group.children.insert(at, item);
	at
}

fn sort_key<T>(item: &Item<T>) -> &str {
	delegate_name(item).map_or("", Identifier::as_str)
}

fn insert_child<T>(group: &mut GroupItem<T>, item: Item<T>, path: &str) -> Result<(), PlacementError> {
	let Some(index) = group.position(item.name().as_str()) else {
		attach(group, item);
		return Ok(());
	};
	match (&mut group.children[index], item) {
		(Item::Group(existing), Item::Group(incoming)) => fold_groups(existing, incoming, path),
		(_, item) => Err(PlacementError::DuplicateName {
			path: path.to_owned(),
			name: item.name(),
		}),
	}
}

/// Folds a re-registered group into the existing one of the same name.
fn fold_groups<T>(
	existing: &mut GroupItem<T>,
	mut incoming: GroupItem<T>,
	path: &str,
) -> Result<(), PlacementError> {
	if existing.ordering == GroupOrdering::Weak && incoming.ordering == GroupOrdering::Strong {
		let adopted = std::mem::take(&mut existing.children);
		if incoming.hint.is_unspecified() {
			incoming.hint = existing.hint.clone();
		}
		*existing = incoming;
		for child in adopted {
			insert_child(existing, child, path)?;
		}
		return Ok(());
	}

	if existing.ordering == GroupOrdering::Strong && incoming.ordering == GroupOrdering::Strong {
		tracing::warn!(
			path,
			name = %existing.name,
			"strongly ordered group registered twice; appending children",
		);
	}
	if existing.hint.is_unspecified() {
		existing.hint = incoming.hint;
	}
	for child in incoming.children {
		insert_child(existing, child, path)?;
	}
	Ok(())
}

#[cfg(test)]
mod tests;
