use pretty_assertions::assert_eq;

use super::*;

fn ids(names: &[&str]) -> Vec<Identifier> {
	names.iter().copied().map(Identifier::new).collect()
}

#[test]
fn parse_skips_blank_entries() {
	assert_eq!(parse_order(" New, Open,,Save ,"), ids(&["New", "Open", "Save"]));
	assert!(parse_order("").is_empty());
}

#[test]
fn format_joins_with_commas() {
	assert_eq!(format_order(&ids(&["B", "A", "C"])), "B,A,C");
	assert_eq!(format_order(&[]), "");
}

#[test]
fn keys_are_namespaced_by_root() {
	let mut prefs = MemoryPreferences::new();
	let store = OrderingStore::new(&mut prefs, "/Menus/Order");
	assert_eq!(store.key(&ids(&["MenuBar", "File"])), "/Menus/Order/MenuBar/File");
	assert_eq!(store.key(&[]), "/Menus/Order");
}

#[test]
fn missing_key_reads_as_empty() {
	let mut prefs = MemoryPreferences::new();
	let mut store = OrderingStore::new(&mut prefs, "/Order");
	assert!(store.get(&ids(&["R"])).is_empty());
}

#[test]
fn staged_orders_are_visible_before_flush() {
	let mut prefs = MemoryPreferences::new();
	prefs.write("/Order/R", "A,B");
	let mut store = OrderingStore::new(&mut prefs, "/Order");
	let path = ids(&["R"]);

	assert_eq!(store.get(&path), ids(&["A", "B"]));
	store.set(&path, ids(&["B", "A"]));
	assert_eq!(store.get(&path), ids(&["B", "A"]));
	assert_eq!(store.pending().collect::<Vec<_>>(), vec!["/Order/R"]);

	assert_eq!(store.flush(), vec!["/Order/R".to_owned()]);
	assert_eq!(store.pending().count(), 0);
	assert_eq!(prefs.read("/Order/R").as_deref(), Some("B,A"));
}

#[test]
fn flush_without_changes_writes_nothing() {
	let mut prefs = MemoryPreferences::new();
	let mut store = OrderingStore::new(&mut prefs, "/Order");
	store.get(&ids(&["R"]));
	assert!(store.flush().is_empty());
	assert!(prefs.is_empty());
}

#[test]
fn initializer_writes_only_absent_keys() {
	let mut prefs = MemoryPreferences::new();
	prefs.write("/Order/MenuBar/Edit", "Redo,Undo");
	let seeds = OrderingPreferenceInitializer::new(
		"/Order",
		[
			("/MenuBar", "File,Edit,View"),
			("/MenuBar/Edit", "Undo,Redo"),
		],
	);

	assert!(seeds.apply(&mut prefs));
	assert!(!seeds.apply(&mut prefs), "second application is a no-op");
	assert_eq!(
		prefs.iter().collect::<Vec<_>>(),
		vec![
			("/Order/MenuBar", "File,Edit,View"),
			("/Order/MenuBar/Edit", "Redo,Undo"),
		]
	);
}
