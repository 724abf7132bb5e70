#![cfg_attr(doc, allow(rustdoc::private_intra_doc_links))]
//! Merge engine: visits a default tree merged with a registry tree.
//!
//! # Purpose
//!
//! Menus and toolbars are described twice: an optional author-written
//! *default tree* fixing the preferred shape, and a *registry tree* filled by
//! independent [`register_item`](crate::register_item) calls whose sequence
//! carries no meaning. A traversal reconciles both, group by group, and calls
//! a [`Visitor`] in the resulting order. The merge is recomputed on every
//! traversal and neither input tree is modified.
//!
//! # Mental Model
//!
//! 1. **Collect:** the children of a group and of its merge partners are
//!    resolved into entries. Anonymous groups dissolve into their parent,
//!    indirect items are replaced by their delegates, and computed items by
//!    the result of their factory, invoked once per occurrence.
//! 2. **Match:** entries with equal non-empty names share one slot. Two
//!    groups become merge partners; their children meet one level down.
//! 3. **Sequence:** a strongly ordered primary group fixes the baseline.
//!    Everything else is placed from the stored ordering, then by hint (see
//!    [`order`]). Items left for hint placement are first stably sorted by
//!    hint, so the outcome depends on the hints and not on which item the
//!    registry happened to receive first.
//! 4. **Remember:** when a named item had to be placed by hint, the resolved
//!    order is staged in the [`OrderingStore`] and flushed after the
//!    traversal, so later runs reproduce it.
//! 5. **Dispatch:** `begin_group`, children in order, `end_group`.
//!
//! # Invariants
//!
//! - Every item reachable from a traversed group is visited exactly once.
//!   - Enforced in: [`Traversal::absorb`], [`order::place_by_hint`].
//!   - Tested by: `merge::tests::every_registered_item_visited_once`.
//! - Same inputs and store state give the same visitation order, whatever
//!   order the registry items were registered in.
//!   - Enforced in: [`Traversal::sequence`] and weak-group insertion in
//!     [`register_item`](crate::register_item).
//!   - Tested by: `merge::tests::registration_order_is_irrelevant`,
//!     `tests/properties.rs`.
//! - Re-running with no new registrations does not change the order.
//!   - Tested by: `merge::tests::rerun_is_stable`.

mod conflict;
mod node;
mod order;

pub use conflict::{Conflict, ConflictKind};
use node::{Entry, Node, View};
use order::{Partner, Slot};

use crate::ident::display_path;
use crate::store::{OrderingStore, PreferenceBackend};
use crate::{
	GroupItem, GroupOrdering, Identifier, Item, OrderingHint, VisitError, VisitResult, Visitor,
};

/// One or more traversals sharing an [`OrderingStore`].
///
/// Conflicts accumulate across runs. Staged orderings are flushed at the end
/// of every [`Traversal::run`], whether or not the visitor failed.
pub struct Traversal<'p> {
	store: OrderingStore<'p>,
	conflicts: Vec<Conflict>,
	persisted: Vec<String>,
}

impl<'p> Traversal<'p> {
	pub fn new(store: OrderingStore<'p>) -> Self {
		Self {
			store,
			conflicts: Vec::new(),
			persisted: Vec::new(),
		}
	}

	/// Conflicts reported so far.
	pub fn conflicts(&self) -> &[Conflict] {
		&self.conflicts
	}

	/// Preference keys written so far.
	pub fn persisted(&self) -> &[String] {
		&self.persisted
	}

	pub fn into_conflicts(self) -> Vec<Conflict> {
		self.conflicts
	}

	/// Visits `default` merged with `registry`.
	///
	/// Without a default tree, the registry is merged into an empty weak
	/// group named like the registry root. A default tree that resolves to a
	/// single leaf is visited alone, followed by the registry on its own.
	pub fn run<T>(
		&mut self,
		visitor: &mut dyn Visitor<T>,
		default: Option<&Item<T>>,
		registry: Option<&GroupItem<T>>,
	) -> VisitResult {
		let result = self.run_merged(visitor, default, registry);
		let written = self.store.flush();
		self.persisted.extend(written);
		result
	}

	fn run_merged<T>(
		&mut self,
		visitor: &mut dyn Visitor<T>,
		default: Option<&Item<T>>,
		registry: Option<&GroupItem<T>>,
	) -> VisitResult {
		let partners: Vec<Partner<'_, T>> = registry
			.map(|root| Partner::Group(Node::Group(root)))
			.into_iter()
			.collect();
		let mut path = Vec::new();

		let top = default.and_then(|item| {
			self.resolve(&*visitor, Node::Borrowed(item), &OrderingHint::Unspecified)
		});
		if let Some(top) = top {
			if top.node.ordering().is_some() {
				return self.visit_group(visitor, &top.node, &partners, &mut path);
			}
			if let View::Single(item) = top.node.view() {
				visitor.visit(item, &path)?;
			}
		}

		let Some(root) = registry else {
			return Ok(());
		};
		let shell = GroupItem::new(root.name.clone()).with_ordering(GroupOrdering::Weak);
		self.visit_group(visitor, &Node::Group(&shell), &partners, &mut path)
	}

	fn visit_group<'a, T>(
		&mut self,
		visitor: &mut dyn Visitor<T>,
		node: &Node<'a, T>,
		partners: &[Partner<'a, T>],
		path: &mut Vec<Identifier>,
	) -> VisitResult {
		let View::Group(group) = node.view() else {
			return Ok(());
		};
		let named = group.ordering != GroupOrdering::Anonymous;

		visitor.begin_group(group, path)?;
		if named {
			path.push(group.name.clone());
		}

		let slots = self.merge_children(&*visitor, node, group.ordering, partners, path);
		for slot in &slots {
			match slot.entry.node.view() {
				View::Single(item) => visitor.visit(item, path)?,
				View::Group(_) => self.visit_group(visitor, &slot.entry.node, &slot.partners, path)?,
				// Delegating items are replaced during collection.
				View::Indirect(_) | View::Computed(_) => {}
			}
		}

		if named {
			path.pop();
		}
		visitor.end_group(group, path)
	}

	/// Computes the final child sequence of one group.
	fn merge_children<'a, T>(
		&mut self,
		visitor: &dyn Visitor<T>,
		node: &Node<'a, T>,
		ordering: GroupOrdering,
		partners: &[Partner<'a, T>],
		path: &[Identifier],
	) -> Vec<Slot<'a, T>> {
		let mut placed = Vec::new();
		let mut pending = Vec::new();

		let mut own = Vec::new();
		for child in node.children() {
			self.collect(visitor, child, &OrderingHint::Unspecified, &mut own);
		}
		let baseline = ordering == GroupOrdering::Strong;
		for entry in own {
			self.absorb(&mut placed, &mut pending, entry, baseline, path);
		}

		for partner in partners {
			match partner {
				Partner::Group(group) => {
					let mut theirs = Vec::new();
					for child in group.children() {
						self.collect(visitor, child, &OrderingHint::Unspecified, &mut theirs);
					}
					for entry in theirs {
						self.absorb(&mut placed, &mut pending, entry, false, path);
					}
				}
				Partner::Item(entry) => {
					self.absorb(&mut placed, &mut pending, entry.clone(), false, path);
				}
			}
		}

		if pending.is_empty() {
			return placed;
		}
		self.sequence(placed, pending, path)
	}

	/// Places pending slots into `placed` and stages the resolved order.
	fn sequence<'a, T>(
		&mut self,
		mut placed: Vec<Slot<'a, T>>,
		pending: Vec<Slot<'a, T>>,
		path: &[Identifier],
	) -> Vec<Slot<'a, T>> {
		let stored = self.store.get(path);
		let (known, mut fresh): (Vec<_>, Vec<_>) = pending
			.into_iter()
			.partition(|slot| slot.named && stored.contains(&slot.name));
		fresh.sort_by(|a, b| a.entry.hint.cmp(&b.entry.hint));
		let settles_new_names = fresh.iter().any(|slot| slot.named);

		order::place_by_preference(&mut placed, known, &stored);
		let missing = order::place_by_hint(&mut placed, fresh);
		for anchor in missing {
			tracing::debug!(
				domain = "registry",
				path = %display_path(path),
				anchor = %anchor,
				"ordering hint anchor not found; placed as unspecified",
			);
		}

		if settles_new_names {
			let resolved: Vec<Identifier> = placed
				.iter()
				.filter(|slot| slot.named)
				.map(|slot| slot.name.clone())
				.collect();
			let extended = order::extend_stored(&stored, &resolved);
			if extended != stored {
				self.store.set(path, extended);
			}
		}
		placed
	}

	/// Adds one entry, merging it into an existing slot of the same name.
	fn absorb<'a, T>(
		&mut self,
		placed: &mut Vec<Slot<'a, T>>,
		pending: &mut Vec<Slot<'a, T>>,
		entry: Entry<'a, T>,
		baseline: bool,
		path: &[Identifier],
	) {
		let mut slot = Slot::new(entry);
		if slot.named {
			let existing = placed
				.iter_mut()
				.chain(pending.iter_mut())
				.find(|other| other.named && other.name == slot.name);
			if let Some(existing) = existing {
				match self.combine(existing, slot.entry, path) {
					Some(extra) => slot = extra,
					None => return,
				}
			}
		}
		if baseline {
			placed.push(slot);
		} else {
			pending.push(slot);
		}
	}

	/// Resolves a name collision between a slot and an incoming entry.
	///
	/// Returns a slot to add separately when both sides are leaves.
	fn combine<'a, T>(
		&mut self,
		slot: &mut Slot<'a, T>,
		incoming: Entry<'a, T>,
		path: &[Identifier],
	) -> Option<Slot<'a, T>> {
		match (slot.entry.node.ordering(), incoming.node.ordering()) {
			(Some(existing), Some(theirs)) => {
				if existing == GroupOrdering::Weak && theirs == GroupOrdering::Strong {
					let demoted = std::mem::replace(&mut slot.entry.node, incoming.node);
					slot.partners.insert(0, Partner::Group(demoted));
				} else {
					if existing == GroupOrdering::Strong && theirs == GroupOrdering::Strong {
						self.report(path, &slot.name, ConflictKind::StrongGroups);
					}
					slot.partners.push(Partner::Group(incoming.node));
				}
				if slot.entry.hint.is_unspecified() {
					slot.entry.hint = incoming.hint;
				}
				None
			}
			(Some(_), None) => {
				self.report(path, &slot.name, ConflictKind::ItemGroup);
				slot.partners.push(Partner::Item(incoming));
				None
			}
			(None, Some(_)) => {
				self.report(path, &slot.name, ConflictKind::ItemGroup);
				let demoted = std::mem::replace(&mut slot.entry.node, incoming.node);
				let demoted_hint = slot.entry.hint.clone();
				if slot.entry.hint.is_unspecified() {
					slot.entry.hint = incoming.hint;
				}
				slot.partners.insert(
					0,
					Partner::Item(Entry {
						node: demoted,
						hint: demoted_hint,
					}),
				);
				None
			}
			(None, None) => {
				self.report(path, &slot.name, ConflictKind::DuplicateItems);
				Some(Slot::unnamed(incoming))
			}
		}
	}

	/// Collects the entries an item contributes to its parent's sequence.
	fn collect<'a, T>(
		&mut self,
		visitor: &dyn Visitor<T>,
		node: Node<'a, T>,
		inherited: &OrderingHint,
		out: &mut Vec<Entry<'a, T>>,
	) {
		let Some(entry) = self.resolve(visitor, node, inherited) else {
			return;
		};
		if entry.node.ordering() == Some(GroupOrdering::Anonymous) {
			for child in entry.node.children() {
				self.collect(visitor, child, &entry.hint, out);
			}
		} else {
			out.push(entry);
		}
	}

	/// Replaces indirect and computed items by their substitutes.
	///
	/// The substitute's own hint wins unless it is unspecified, in which case
	/// the delegating item's hint (or what it inherited) applies.
	fn resolve<'a, T>(
		&mut self,
		visitor: &dyn Visitor<T>,
		node: Node<'a, T>,
		inherited: &OrderingHint,
	) -> Option<Entry<'a, T>> {
		let mut node = node;
		let mut hint = inherited.clone();
		loop {
			let next = match node.view() {
				View::Single(item) => {
					hint = item.hint.or(&hint).clone();
					None
				}
				View::Group(group) => {
					hint = group.hint.or(&hint).clone();
					None
				}
				View::Indirect(item) => {
					hint = item.hint.or(&hint).clone();
					Some(Some(Node::shared(item.target.clone())))
				}
				View::Computed(item) => {
					hint = item.hint.or(&hint).clone();
					Some((item.factory)(visitor).map(Node::shared))
				}
			};
			match next {
				None => return Some(Entry { node, hint }),
				Some(Some(substitute)) => node = substitute,
				Some(None) => return None,
			}
		}
	}

	fn report(&mut self, path: &[Identifier], name: &Identifier, kind: ConflictKind) {
		let conflict = Conflict {
			path: path.to_vec(),
			name: name.clone(),
			kind,
		};
		tracing::warn!(
			domain = "registry",
			path = %display_path(path),
			name = %name,
			kind = %kind,
			"registry merge conflict",
		);
		self.conflicts.push(conflict);
	}
}

/// Visits `default` merged with `registry` using orderings stored in
/// `backend` under `root`. Returns the conflicts reported along the way.
pub fn visit<T>(
	visitor: &mut dyn Visitor<T>,
	default: Option<&Item<T>>,
	registry: Option<&GroupItem<T>>,
	backend: &mut dyn PreferenceBackend,
	root: &str,
) -> Result<Vec<Conflict>, VisitError> {
	let mut traversal = Traversal::new(OrderingStore::new(backend, root));
	traversal.run(visitor, default, registry)?;
	Ok(traversal.into_conflicts())
}
