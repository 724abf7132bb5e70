//! Command payload carried by menu and toolbar leaves.

use cadence_registry::Item;

/// What a menu entry or toolbar button invokes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandItem {
	/// Display label.
	pub label: String,
	/// Command identifier dispatched when selected.
	pub command: String,
	/// Keyboard shortcut hint (display only).
	pub shortcut: Option<String>,
}

impl CommandItem {
	pub fn new(label: impl Into<String>, command: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			command: command.into(),
			shortcut: None,
		}
	}

	pub fn with_shortcut(mut self, shortcut: impl Into<String>) -> Self {
		self.shortcut = Some(shortcut.into());
		self
	}
}

/// Static description of a command leaf, usable in `static` contribution
/// tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandSpec {
	pub name: &'static str,
	pub label: &'static str,
	pub command: &'static str,
	pub shortcut: Option<&'static str>,
}

impl CommandSpec {
	pub const fn new(name: &'static str, label: &'static str, command: &'static str) -> Self {
		Self {
			name,
			label,
			command,
			shortcut: None,
		}
	}

	pub const fn with_shortcut(mut self, shortcut: &'static str) -> Self {
		self.shortcut = Some(shortcut);
		self
	}

	pub fn payload(&self) -> CommandItem {
		let item = CommandItem::new(self.label, self.command);
		match self.shortcut {
			Some(shortcut) => item.with_shortcut(shortcut),
			None => item,
		}
	}

	pub fn item(&self) -> Item<CommandItem> {
		Item::single(self.name, self.payload())
	}
}
