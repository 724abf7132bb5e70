use std::sync::Arc;

use pretty_assertions::assert_eq;

use super::*;

fn leaf(name: &str) -> Item<u32> {
	Item::single(name, 0)
}

fn child_names(group: &GroupItem<u32>) -> Vec<String> {
	group.iter().map(|child| child.name().to_string()).collect()
}

fn group_at<'r>(registry: &'r Registry<u32>, path: &[&str]) -> &'r GroupItem<u32> {
	let mut group = registry.root();
	for segment in path {
		group = group
			.find(segment)
			.and_then(Item::as_group)
			.unwrap_or_else(|| panic!("missing group {segment}"));
	}
	group
}

#[test]
fn segments_split_on_slash() {
	let segments = Placement::new("File/Export").segments().expect("valid path");
	assert_eq!(segments, vec![Identifier::new("File"), Identifier::new("Export")]);
	assert!(Placement::new("").segments().expect("root").is_empty());
}

#[test]
fn empty_segments_are_rejected() {
	for path in ["a//b", "/a", "a/"] {
		let err = Placement::new(path).segments().expect_err(path);
		assert_eq!(err, PlacementError::EmptySegment { path: path.to_owned() });
	}
}

#[test]
fn missing_groups_become_weak_placeholders() {
	let mut registry = Registry::new("MenuBar");
	registry
		.register(&Placement::new("Effect/Lv2"), leaf("Reverb"))
		.expect("registered");

	let effect = group_at(&registry, &["Effect"]);
	assert_eq!(effect.ordering, GroupOrdering::Weak);
	let lv2 = group_at(&registry, &["Effect", "Lv2"]);
	assert_eq!(lv2.ordering, GroupOrdering::Weak);
	assert_eq!(child_names(lv2), vec!["Reverb"]);
}

#[test]
fn placement_hint_fills_unspecified_item_hint() {
	let mut registry = Registry::new("MenuBar");
	let placement = Placement::new("").with_hint(OrderingHint::Begin);
	registry.register(&placement, leaf("Plain")).expect("registered");
	registry
		.register(&placement, leaf("Own").with_hint(OrderingHint::End))
		.expect("registered");

	let root = registry.root();
	assert_eq!(root.find("Plain").map(Item::hint), Some(&OrderingHint::Begin));
	assert_eq!(root.find("Own").map(Item::hint), Some(&OrderingHint::End));
}

#[test]
fn strong_group_replaces_placeholder_and_adopts_children() {
	let mut registry = Registry::new("MenuBar");
	registry
		.register(&Placement::new("Tools"), leaf("Macros"))
		.expect("registered");
	registry
		.register(
			&Placement::new(""),
			Item::group("Tools", [leaf("Plugins"), leaf("Nyquist")]),
		)
		.expect("registered");

	let tools = group_at(&registry, &["Tools"]);
	assert_eq!(tools.ordering, GroupOrdering::Strong);
	assert_eq!(child_names(tools), vec!["Plugins", "Nyquist", "Macros"]);
}

#[test]
fn reregistered_group_merges_children() {
	let mut registry = Registry::new("MenuBar");
	registry
		.register(&Placement::new(""), Item::group("Tools", [leaf("a")]))
		.expect("registered");
	registry
		.register(&Placement::new(""), Item::group("Tools", [leaf("b")]))
		.expect("registered");

	assert_eq!(child_names(group_at(&registry, &["Tools"])), vec!["a", "b"]);
}

#[test]
fn leaf_in_path_is_rejected() {
	let mut registry = Registry::new("MenuBar");
	registry.register(&Placement::new(""), leaf("Quit")).expect("registered");

	let err = registry
		.register(&Placement::new("Quit/Now"), leaf("x"))
		.expect_err("leaf in path");

	assert_eq!(
		err,
		PlacementError::LeafInPath {
			path: "Quit/Now".to_owned(),
			segment: Identifier::new("Quit"),
		}
	);
}

#[test]
fn shared_subtree_in_path_is_rejected() {
	let shared = Arc::new(Item::group("Export", [leaf("Wav")]));
	let mut registry = Registry::new("MenuBar");
	registry
		.register(&Placement::new("File"), Item::indirect(shared))
		.expect("registered");
	let before = format!("{:?}", registry.root());

	let err = registry
		.register(&Placement::new("File/Export"), leaf("Mp2"))
		.expect_err("shared subtree is immutable");

	assert!(matches!(err, PlacementError::SharedInPath { .. }));
	assert_eq!(format!("{:?}", registry.root()), before);
}

#[test]
fn duplicate_leaf_is_rejected() {
	let mut registry = Registry::new("MenuBar");
	registry.register(&Placement::new("File"), leaf("Save")).expect("registered");

	let err = registry
		.register(&Placement::new("File"), leaf("Save"))
		.expect_err("duplicate");

	assert_eq!(
		err,
		PlacementError::DuplicateName {
			path: "File".to_owned(),
			name: Identifier::new("Save"),
		}
	);
	assert_eq!(child_names(group_at(&registry, &["File"])), vec!["Save"]);
}

#[test]
fn failed_group_registration_leaves_registry_unchanged() {
	let mut registry = Registry::new("MenuBar");
	registry
		.register(&Placement::new(""), Item::group("Tools", [leaf("a")]))
		.expect("registered");
	let before = format!("{:?}", registry.root());

	let err = registry
		.register(&Placement::new(""), Item::group("Tools", [leaf("b"), leaf("a")]))
		.expect_err("nested duplicate");

	assert_eq!(
		err,
		PlacementError::DuplicateName {
			path: String::new(),
			name: Identifier::new("a"),
		}
	);
	assert_eq!(format!("{:?}", registry.root()), before);
}

#[test]
fn unnamed_items_never_collide() {
	let mut registry = Registry::new("MenuBar");
	for _ in 0..3 {
		registry
			.register(&Placement::new("File"), Item::computed(|_| None))
			.expect("registered");
	}
	registry
		.register(&Placement::new("File"), Item::anonymous([leaf("x")]))
		.expect("registered");

	assert_eq!(group_at(&registry, &["File"]).len(), 4);
}

#[test]
fn indirect_item_collides_through_its_delegate() {
	let mut registry = Registry::new("MenuBar");
	registry.register(&Placement::new("File"), leaf("Save")).expect("registered");

	let err = registry
		.register(&Placement::new("File"), Item::indirect(Arc::new(leaf("Save"))))
		.expect_err("delegate named like a sibling");

	assert_eq!(
		err,
		PlacementError::DuplicateName {
			path: "File".to_owned(),
			name: Identifier::new("Save"),
		}
	);
	assert_eq!(child_names(group_at(&registry, &["File"])), vec!["Save"]);
}

#[test]
fn anonymous_group_collides_through_its_children() {
	let mut registry = Registry::new("MenuBar");
	registry.register(&Placement::new("File"), leaf("Save")).expect("registered");
	let before = format!("{:?}", registry.root());

	let err = registry
		.register(&Placement::new("File"), Item::anonymous([leaf("Close"), leaf("Save")]))
		.expect_err("anonymous child named like a sibling");

	assert_eq!(
		err,
		PlacementError::DuplicateName {
			path: "File".to_owned(),
			name: Identifier::new("Save"),
		}
	);
	assert_eq!(format!("{:?}", registry.root()), before);
}

#[test]
fn leaf_collides_with_earlier_anonymous_child() {
	let mut registry = Registry::new("MenuBar");
	registry
		.register(&Placement::new("File"), Item::anonymous([leaf("Save")]))
		.expect("registered");

	let err = registry
		.register(&Placement::new("File"), leaf("Save"))
		.expect_err("name taken inside anonymous group");

	assert!(matches!(err, PlacementError::DuplicateName { .. }));
}

#[test]
fn reserved_characters_are_rejected() {
	let mut registry = Registry::new("MenuBar");

	let comma = registry
		.register(&Placement::new("File"), leaf("Save,As"))
		.expect_err("comma in name");
	let slash = registry
		.register(&Placement::new(""), Item::group("Tools", [leaf("a/b")]))
		.expect_err("slash in nested name");
	let segment = registry
		.register(&Placement::new("Edit,View"), leaf("Undo"))
		.expect_err("comma in path");

	assert_eq!(
		comma,
		PlacementError::ReservedCharacter {
			path: "File".to_owned(),
			name: Identifier::new("Save,As"),
		}
	);
	assert!(matches!(slash, PlacementError::ReservedCharacter { .. }));
	assert!(matches!(segment, PlacementError::ReservedCharacter { .. }));
	assert!(registry.is_empty());
}

#[test]
fn registry_shape_ignores_registration_order() {
	fn build(names: &[&str]) -> String {
		let mut registry = Registry::new("MenuBar");
		for name in names {
			registry
				.register(&Placement::new("Effect/Lv2"), leaf(name))
				.expect("registered");
			registry
				.register(&Placement::new(""), Item::indirect(Arc::new(leaf(&name.to_lowercase()))))
				.expect("registered");
		}
		format!("{:?}", registry.root())
	}

	assert_eq!(build(&["Reverb", "Delay", "Echo"]), build(&["Echo", "Reverb", "Delay"]));
	assert_eq!(build(&["Reverb", "Delay", "Echo"]), build(&["Delay", "Echo", "Reverb"]));
}

#[test]
fn strong_group_keeps_authored_sequence() {
	let mut registry = Registry::new("MenuBar");
	registry
		.register(&Placement::new(""), Item::group("Tools", [leaf("z"), leaf("a")]))
		.expect("registered");
	registry.register(&Placement::new("Tools"), leaf("m")).expect("registered");

	assert_eq!(child_names(group_at(&registry, &["Tools"])), vec!["z", "a", "m"]);
}
