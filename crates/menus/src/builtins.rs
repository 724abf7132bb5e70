//! Built-in default trees and contributions.

use cadence_registry::{GroupItem, GroupOrdering, Item, OrderingPreferenceInitializer};

use crate::{CommandItem, CommandSpec, HintSpec, MenuContext, ORDER_ROOT, contribute};

/// Display labels of built-in group names.
pub const GROUP_LABELS: &[(&str, &str)] = &[
	("menubar", "Menu Bar"),
	("toolbar", "Toolbar"),
	("file", "File"),
	("export", "Export"),
	("recent", "Recent Files"),
	("edit", "Edit"),
	("view", "View"),
	("transport", "Transport"),
	("tracks", "Tracks"),
	("effect", "Effect"),
	("help", "Help"),
];

const FILE: &[CommandSpec] = &[
	CommandSpec::new("new", "New", "new").with_shortcut("Ctrl+N"),
	CommandSpec::new("open", "Open...", "open").with_shortcut("Ctrl+O"),
	CommandSpec::new("save", "Save Project", "save").with_shortcut("Ctrl+S"),
];

const EXPORT: &[CommandSpec] = &[
	CommandSpec::new("export_wav", "Export as WAV...", "export-wav"),
	CommandSpec::new("export_mp3", "Export as MP3...", "export-mp3"),
];

const EDIT: &[CommandSpec] = &[
	CommandSpec::new("undo", "Undo", "undo").with_shortcut("Ctrl+Z"),
	CommandSpec::new("redo", "Redo", "redo").with_shortcut("Ctrl+Y"),
	CommandSpec::new("cut", "Cut", "cut").with_shortcut("Ctrl+X"),
	CommandSpec::new("copy", "Copy", "copy").with_shortcut("Ctrl+C"),
	CommandSpec::new("paste", "Paste", "paste").with_shortcut("Ctrl+V"),
];

const VIEW: &[CommandSpec] = &[
	CommandSpec::new("zoom_in", "Zoom In", "zoom-in").with_shortcut("Ctrl+1"),
	CommandSpec::new("zoom_out", "Zoom Out", "zoom-out").with_shortcut("Ctrl+3"),
	CommandSpec::new("zoom_fit", "Fit to Width", "zoom-fit").with_shortcut("Ctrl+F"),
];

const TRANSPORT: &[CommandSpec] = &[
	CommandSpec::new("play", "Play", "play").with_shortcut("Space"),
	CommandSpec::new("stop", "Stop", "stop"),
	CommandSpec::new("record", "Record", "record").with_shortcut("R"),
];

const TRACKS: &[CommandSpec] = &[
	CommandSpec::new("add_mono", "New Mono Track", "add-mono-track"),
	CommandSpec::new("add_stereo", "New Stereo Track", "add-stereo-track"),
];

fn group(name: &str, commands: &[CommandSpec]) -> Item<CommandItem> {
	Item::group(name, commands.iter().map(CommandSpec::item))
}

/// Author-specified shape of the menu bar.
///
/// The export submenu and the effect menu are weakly ordered so contributed
/// entries can be placed among the built-ins by hint or stored preference.
pub fn default_menu_bar() -> Item<CommandItem> {
	let exit = CommandSpec::new("exit", "Exit", "quit").with_shortcut("Ctrl+Q");
	let file = Item::group(
		"file",
		FILE.iter()
			.map(CommandSpec::item)
			.chain([
				group("export", EXPORT).with_ordering(GroupOrdering::Weak),
				exit.item(),
			]),
	);
	Item::group(
		"menubar",
		[
			file,
			group("edit", EDIT),
			group("view", VIEW),
			group("transport", TRANSPORT),
			group("tracks", TRACKS),
			Item::Group(GroupItem::new("effect").with_ordering(GroupOrdering::Weak)),
			group("help", &[CommandSpec::new("about", "About Cadence", "about")]),
		],
	)
}

/// Author-specified shape of the toolbar.
pub fn default_toolbar() -> Item<CommandItem> {
	group("toolbar", TRANSPORT)
}

/// Orderings of the effect menu before it became contribution-driven.
///
/// Applied once; existing entries are never overwritten.
pub fn legacy_ordering_seeds() -> OrderingPreferenceInitializer {
	OrderingPreferenceInitializer::new(ORDER_ROOT, [("/menubar/effect", "reverb,amplify")])
}

/// Lists recently opened projects; nothing when the list is empty.
fn recent_files_menu(context: &MenuContext) -> Option<Item<CommandItem>> {
	let recent = context.recent();
	if recent.is_empty() {
		return None;
	}
	let entries = recent.into_iter().enumerate().map(|(index, path)| {
		let command = format!("open {path}");
		Item::single(format!("recent_{index}"), CommandItem::new(path, command))
	});
	Some(Item::group("recent", entries))
}

contribute!(recent, {
	target: Menus,
	path: "file",
	hint: HintSpec::After("open"),
	computed: recent_files_menu,
});

contribute!(export_mp2, {
	target: Menus,
	path: "file/export",
	hint: HintSpec::After("export_mp3"),
	label: "Export as MP2...",
	command: "export-mp2",
});

contribute!(amplify, {
	target: Menus,
	path: "effect",
	hint: HintSpec::Begin,
	label: "Amplify...",
	command: "effect-amplify",
});

contribute!(reverb, {
	target: Menus,
	path: "effect",
	label: "Reverb...",
	command: "effect-reverb",
});

contribute!(tools, {
	target: Menus,
	path: "",
	hint: HintSpec::After("effect"),
	group: "Tools",
	commands: [
		CommandSpec::new("macros", "Macros...", "macros"),
		CommandSpec::new("plugin_manager", "Plugin Manager", "plugin-manager"),
	],
});

contribute!(loop_play, {
	target: Toolbar,
	path: "",
	hint: HintSpec::After("play"),
	label: "Loop Play",
	command: "play-looped",
	shortcut: "Shift+Space",
});
