//! Property tests for traversal determinism and completeness.

use cadence_registry::{
	GroupItem, Identifier, Item, MemoryPreferences, OrderingHint, Placement, Registry,
	SingleItem, VisitResult, Visitor, display_path, visit,
};
use proptest::prelude::*;

const PATHS: [&str; 3] = ["", "File", "File/Export"];
const NAMES: [&str; 8] = ["a", "b", "c", "d", "e", "f", "g", "h"];

#[derive(Default)]
struct Leaves(Vec<String>);

impl Visitor<()> for Leaves {
	fn visit(&mut self, item: &SingleItem<()>, path: &[Identifier]) -> VisitResult {
		self.0.push(format!("{}/{}", display_path(path), item.name));
		Ok(())
	}

	fn begin_group(&mut self, group: &GroupItem<()>, path: &[Identifier]) -> VisitResult {
		self.0.push(format!("{}/{}/", display_path(path), group.name));
		Ok(())
	}
}

type Registrations = Vec<(usize, usize, OrderingHint)>;

fn arb_hint() -> impl Strategy<Value = OrderingHint> {
	prop_oneof![
		Just(OrderingHint::Unspecified),
		Just(OrderingHint::Begin),
		Just(OrderingHint::End),
		(0..NAMES.len()).prop_map(|i| OrderingHint::before(NAMES[i])),
		(0..NAMES.len()).prop_map(|i| OrderingHint::after(NAMES[i])),
	]
}

fn arb_registrations() -> impl Strategy<Value = Registrations> {
	prop::collection::vec((0..PATHS.len(), 0..NAMES.len(), arb_hint()), 0..24)
}

/// Registrations without repeated names per path, paired with a shuffle.
fn arb_shuffled_registrations() -> impl Strategy<Value = (Registrations, Registrations)> {
	prop::collection::btree_map((0..PATHS.len(), 0..NAMES.len()), arb_hint(), 0..24)
		.prop_map(|map| {
			map.into_iter()
				.map(|((path, name), hint)| (path, name, hint))
				.collect::<Registrations>()
		})
		.prop_flat_map(|registrations| {
			(Just(registrations.clone()), Just(registrations).prop_shuffle())
		})
}

/// Builds a registry, returning it with the number of accepted leaves.
fn build(registrations: &[(usize, usize, OrderingHint)]) -> (Registry<()>, usize) {
	let mut registry = Registry::new("MenuBar");
	let mut accepted = 0;
	for (path, name, hint) in registrations {
		let placement = Placement::new(PATHS[*path]).with_hint(hint.clone());
		if registry.register(&placement, Item::single(NAMES[*name], ())).is_ok() {
			accepted += 1;
		}
	}
	(registry, accepted)
}

fn traverse(registry: &Registry<()>, prefs: &mut MemoryPreferences) -> Vec<String> {
	let mut leaves = Leaves::default();
	visit(&mut leaves, None, Some(registry.root()), prefs, "/Order").expect("traversal succeeds");
	leaves.0
}

proptest! {
	#[test]
	fn prop_every_accepted_leaf_visited_once(registrations in arb_registrations()) {
		let (registry, accepted) = build(&registrations);
		let events = traverse(&registry, &mut MemoryPreferences::new());

		let mut leaves: Vec<&String> = events.iter().filter(|e| !e.ends_with('/')).collect();
		prop_assert_eq!(leaves.len(), accepted);
		leaves.sort();
		leaves.dedup();
		prop_assert_eq!(leaves.len(), accepted, "no leaf visited twice");
	}

	#[test]
	fn prop_same_inputs_same_order(registrations in arb_registrations()) {
		let (registry, _) = build(&registrations);
		let first = traverse(&registry, &mut MemoryPreferences::new());
		let second = traverse(&registry, &mut MemoryPreferences::new());
		prop_assert_eq!(first, second);
	}

	#[test]
	fn prop_registration_order_does_not_matter(
		(registrations, shuffled) in arb_shuffled_registrations()
	) {
		let (registry, _) = build(&registrations);
		let (reordered, _) = build(&shuffled);
		let mut prefs = MemoryPreferences::new();
		let mut reordered_prefs = MemoryPreferences::new();

		prop_assert_eq!(
			traverse(&registry, &mut prefs),
			traverse(&reordered, &mut reordered_prefs)
		);
		prop_assert_eq!(prefs, reordered_prefs);
	}

	#[test]
	fn prop_rerun_with_stored_order_is_stable(registrations in arb_registrations()) {
		let (registry, _) = build(&registrations);
		let mut prefs = MemoryPreferences::new();
		let first = traverse(&registry, &mut prefs);
		let snapshot = prefs.clone();
		let second = traverse(&registry, &mut prefs);
		prop_assert_eq!(first, second);
		prop_assert_eq!(prefs, snapshot);
	}
}
