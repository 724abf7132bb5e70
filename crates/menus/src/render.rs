//! Building a concrete menu tree from a traversal.

use std::fmt::{self, Write as _};

use cadence_registry::{
	Conflict, GroupItem, GroupOrdering, Identifier, SingleItem, VisitResult, Visitor,
};
use rustc_hash::FxHashMap;

use crate::CommandItem;

/// A resolved menu entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuNode {
	Menu {
		name: Identifier,
		label: String,
		children: Vec<MenuNode>,
	},
	Command {
		name: Identifier,
		item: CommandItem,
	},
}

impl MenuNode {
	pub fn name(&self) -> &Identifier {
		match self {
			Self::Menu { name, .. } | Self::Command { name, .. } => name,
		}
	}

	pub fn children(&self) -> &[MenuNode] {
		match self {
			Self::Menu { children, .. } => children,
			Self::Command { .. } => &[],
		}
	}

	fn write(&self, out: &mut String, depth: usize) -> fmt::Result {
		let indent = "  ".repeat(depth);
		match self {
			Self::Menu { label, children, .. } => {
				writeln!(out, "{indent}{label}")?;
				for child in children {
					child.write(out, depth + 1)?;
				}
				Ok(())
			}
			Self::Command { item, .. } => match &item.shortcut {
				Some(shortcut) => writeln!(out, "{indent}{} ({shortcut})", item.label),
				None => writeln!(out, "{indent}{}", item.label),
			},
		}
	}
}

/// Result of resolving one registry against its defaults.
#[derive(Debug, Default)]
pub struct MenuTree {
	pub roots: Vec<MenuNode>,
	pub conflicts: Vec<Conflict>,
	/// Preference keys written by the traversal.
	pub persisted: Vec<String>,
}

impl MenuTree {
	/// Node at a `/`-separated path of names, starting with a root name.
	pub fn find(&self, path: &str) -> Option<&MenuNode> {
		let mut segments = path.split('/');
		let first = segments.next()?;
		let mut node = self.roots.iter().find(|node| node.name() == first)?;
		for segment in segments {
			node = node.children().iter().find(|child| child.name() == segment)?;
		}
		Some(node)
	}

	/// Child names of the node at `path`, in resolved order.
	pub fn child_names(&self, path: &str) -> Vec<&str> {
		self.find(path)
			.map(|node| node.children().iter().map(|child| child.name().as_str()).collect())
			.unwrap_or_default()
	}

	/// Indented text rendering, one entry per line.
	pub fn render(&self) -> String {
		let mut out = String::new();
		for root in &self.roots {
			// Writing to a String cannot fail.
			let _ = root.write(&mut out, 0);
		}
		out
	}
}

struct Frame {
	name: Identifier,
	label: String,
	transparent: bool,
	children: Vec<MenuNode>,
}

/// Visitor assembling [`MenuNode`]s in visitation order.
pub struct MenuModel<'l> {
	labels: &'l FxHashMap<Identifier, &'static str>,
	stack: Vec<Frame>,
	roots: Vec<MenuNode>,
}

impl<'l> MenuModel<'l> {
	pub fn new(labels: &'l FxHashMap<Identifier, &'static str>) -> Self {
		Self {
			labels,
			stack: Vec::new(),
			roots: Vec::new(),
		}
	}

	/// Completed top-level nodes.
	pub fn finish(mut self) -> Vec<MenuNode> {
		while !self.stack.is_empty() {
			self.close();
		}
		self.roots
	}

	fn emit(&mut self, node: MenuNode) {
		match self.stack.last_mut() {
			Some(frame) => frame.children.push(node),
			None => self.roots.push(node),
		}
	}

	fn close(&mut self) {
		let Some(frame) = self.stack.pop() else {
			return;
		};
		if frame.transparent {
			for child in frame.children {
				self.emit(child);
			}
			return;
		}
		self.emit(MenuNode::Menu {
			name: frame.name,
			label: frame.label,
			children: frame.children,
		});
	}
}

impl Visitor<CommandItem> for MenuModel<'_> {
	fn begin_group(&mut self, group: &GroupItem<CommandItem>, _path: &[Identifier]) -> VisitResult {
		let label = self
			.labels
			.get(&group.name)
			.map_or_else(|| group.name.to_string(), |label| (*label).to_owned());
		self.stack.push(Frame {
			name: group.name.clone(),
			label,
			transparent: group.ordering == GroupOrdering::Anonymous,
			children: Vec::new(),
		});
		Ok(())
	}

	fn end_group(&mut self, _group: &GroupItem<CommandItem>, _path: &[Identifier]) -> VisitResult {
		self.close();
		Ok(())
	}

	fn visit(&mut self, item: &SingleItem<CommandItem>, _path: &[Identifier]) -> VisitResult {
		self.emit(MenuNode::Command {
			name: item.name.clone(),
			item: item.value.clone(),
		});
		Ok(())
	}
}
