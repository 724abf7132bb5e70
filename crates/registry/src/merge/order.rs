//! Sequencing of merged children.
//!
//! # Rules
//!
//! Children not fixed by a strongly ordered baseline are placed in two steps:
//!
//! 1. Names found in the stored ordering are inserted, in stored order,
//!    immediately before the first later-stored name already placed, or at the
//!    end when there is none.
//! 2. The rest, sorted by hint with `Unspecified` last, are placed in
//!    repeated passes. `Begin` goes to the front after earlier `Begin` items;
//!    `End` and `Unspecified` go to the back; `Before(x)` goes immediately
//!    before `x`; `After(x)` goes after `x` and after items already placed
//!    `After(x)`. An item whose anchor is not yet placed waits for the next
//!    pass. When a pass places nothing, the waiting items are appended as if
//!    unspecified.
//!
//! Several hints on one anchor keep the order the slots arrive in: `Before`
//! items line up left to right ahead of the anchor, `After` items line up
//! left to right behind it. Registry groups hold their children sorted by
//! name, so ties among registered items are broken by name.

use rustc_hash::{FxHashMap, FxHashSet};

use super::node::Entry;
use crate::{Identifier, OrderingHint};

/// Another source of children for a group at the same merged path.
pub(crate) enum Partner<'a, T> {
	/// A same-named group whose children merge into the primary group.
	Group(super::node::Node<'a, T>),
	/// A leaf that collided with the group's name and was subordinated.
	Item(Entry<'a, T>),
}

/// How a slot reached its position during hint placement.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum Run {
	#[default]
	None,
	Begin,
	After(Identifier),
}

/// One position in a merged child sequence.
pub(crate) struct Slot<'a, T> {
	pub(crate) entry: Entry<'a, T>,
	pub(crate) name: Identifier,
	pub(crate) partners: Vec<Partner<'a, T>>,
	/// Matches by name and takes part in persisted orderings.
	pub(crate) named: bool,
	pub(crate) run: Run,
}

impl<'a, T> Slot<'a, T> {
	pub(crate) fn new(entry: Entry<'a, T>) -> Self {
		let name = entry.node.name();
		Self {
			named: !name.is_empty(),
			name,
			entry,
			partners: Vec::new(),
			run: Run::None,
		}
	}

	/// A slot that is placed by hint but never matched or persisted.
	pub(crate) fn unnamed(entry: Entry<'a, T>) -> Self {
		Self {
			named: false,
			..Self::new(entry)
		}
	}
}

pub(crate) fn position<T>(slots: &[Slot<'_, T>], name: &Identifier) -> Option<usize> {
	slots.iter().position(|slot| slot.named && &slot.name == name)
}

/// Inserts slots whose names appear in `stored`, following the stored order.
pub(crate) fn place_by_preference<'a, T>(
	placed: &mut Vec<Slot<'a, T>>,
	mut slots: Vec<Slot<'a, T>>,
	stored: &[Identifier],
) {
	let rank: FxHashMap<&Identifier, usize> = stored
		.iter()
		.enumerate()
		.rev()
		.map(|(index, name)| (name, index))
		.collect();
	slots.sort_by_key(|slot| rank.get(&slot.name).copied().unwrap_or(usize::MAX));

	for slot in slots {
		let at = rank
			.get(&slot.name)
			.and_then(|&index| {
				stored[index + 1..]
					.iter()
					.find_map(|later| position(placed, later))
			})
			.unwrap_or(placed.len());
		placed.insert(at, slot);
	}
}

/// Inserts slots according to their hints. Returns names of anchors that were
/// never found.
pub(crate) fn place_by_hint<'a, T>(
	placed: &mut Vec<Slot<'a, T>>,
	slots: Vec<Slot<'a, T>>,
) -> Vec<Identifier> {
	let mut remaining = slots;
	loop {
		let attempted = remaining.len();
		let mut waiting = Vec::new();

		for mut slot in remaining {
			match slot.entry.hint.clone() {
				OrderingHint::Begin => {
					let at = placed
						.iter()
						.take_while(|other| other.run == Run::Begin)
						.count();
					slot.run = Run::Begin;
					placed.insert(at, slot);
				}
				OrderingHint::End | OrderingHint::Unspecified => placed.push(slot),
				OrderingHint::Before(anchor) => match position(placed, &anchor) {
					Some(at) => placed.insert(at, slot),
					None => waiting.push(slot),
				},
				OrderingHint::After(anchor) => match position(placed, &anchor) {
					Some(at) => {
						let run = Run::After(anchor);
						let skip = placed[at + 1..]
							.iter()
							.take_while(|other| other.run == run)
							.count();
						slot.run = run;
						placed.insert(at + 1 + skip, slot);
					}
					None => waiting.push(slot),
				},
			}
		}

		if waiting.is_empty() {
			return Vec::new();
		}
		if waiting.len() == attempted {
			let missing = waiting
				.iter()
				.filter_map(|slot| slot.entry.hint.anchor().cloned())
				.collect();
			placed.extend(waiting);
			return missing;
		}
		remaining = waiting;
	}
}

/// Extends a stored ordering with a freshly resolved one.
///
/// The result lists every resolved name in resolved order. Stored names that
/// are no longer present keep their place after the stored name preceding
/// them.
pub(crate) fn extend_stored(stored: &[Identifier], resolved: &[Identifier]) -> Vec<Identifier> {
	let mut merged = resolved.to_vec();
	let mut seen: FxHashSet<&Identifier> = resolved.iter().collect();
	let mut cursor: Option<usize> = None;
	for name in stored {
		if let Some(at) = merged.iter().position(|other| other == name) {
			cursor = Some(at);
			continue;
		}
		if !seen.insert(name) {
			continue;
		}
		let at = cursor.map_or(0, |at| at + 1);
		merged.insert(at, name.clone());
		cursor = Some(at);
	}
	merged
}
