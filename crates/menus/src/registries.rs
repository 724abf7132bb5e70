//! Explicit registry roots for the menu bar and the toolbar.

use std::sync::Arc;

use cadence_registry::{
	Identifier, Item, OrderingStore, Placement, PlacementError, PreferenceBackend, Registry,
	Traversal, VisitError,
};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::render::{MenuModel, MenuTree};
use crate::{CommandItem, Contribution, ContributionKind, Target, builtins};

/// Name of the menu bar registry root.
pub const MENU_BAR: &str = "menubar";
/// Name of the toolbar registry root.
pub const TOOLBAR: &str = "toolbar";
/// Preference namespace for persisted orderings of both registries.
pub const ORDER_ROOT: &str = "/Registry/Order";

/// Runtime state read by computed contributions.
#[derive(Debug, Default)]
pub struct MenuContext {
	recent: RwLock<Vec<String>>,
}

impl MenuContext {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_recent(files: impl IntoIterator<Item = impl Into<String>>) -> Self {
		let context = Self::new();
		context.set_recent(files);
		context
	}

	/// Replaces the recent-files list, most recent first.
	pub fn set_recent(&self, files: impl IntoIterator<Item = impl Into<String>>) {
		*self.recent.write() = files.into_iter().map(Into::into).collect();
	}

	pub fn recent(&self) -> Vec<String> {
		self.recent.read().clone()
	}
}

/// The application's registries, filled from contributions at startup.
pub struct Registries {
	pub menus: Registry<CommandItem>,
	pub toolbar: Registry<CommandItem>,
	menu_defaults: Item<CommandItem>,
	toolbar_defaults: Item<CommandItem>,
	labels: FxHashMap<Identifier, &'static str>,
	context: Arc<MenuContext>,
	rejected: Vec<(&'static str, PlacementError)>,
}

impl Registries {
	/// Empty registries with the built-in default trees.
	pub fn new(context: Arc<MenuContext>) -> Self {
		let labels = builtins::GROUP_LABELS
			.iter()
			.map(|&(name, label)| (Identifier::new(name), label))
			.collect();
		Self {
			menus: Registry::new(MENU_BAR),
			toolbar: Registry::new(TOOLBAR),
			menu_defaults: builtins::default_menu_bar(),
			toolbar_defaults: builtins::default_toolbar(),
			labels,
			context,
			rejected: Vec::new(),
		}
	}

	/// Registers every contribution linked into the binary.
	pub fn collect(context: Arc<MenuContext>) -> Self {
		let mut registries = Self::new(context);
		let contributions = crate::all_contributions();
		for contribution in contributions.iter().copied() {
			registries.register(contribution);
		}
		tracing::info!(
			contributions = contributions.len(),
			rejected = registries.rejected.len(),
			"collected menu contributions",
		);
		registries
	}

	/// Registers one contribution. Rejections are logged and kept.
	pub fn register(&mut self, contribution: &'static Contribution) {
		if let ContributionKind::Group { name, label, .. } = contribution.kind {
			self.labels.insert(Identifier::new(name), label);
		}
		let placement = Placement::new(contribution.path).with_hint(contribution.hint.to_hint());
		let item = contribution.item(&self.context);
		let registry = match contribution.target {
			Target::Menus => &mut self.menus,
			Target::Toolbar => &mut self.toolbar,
		};
		if let Err(err) = registry.register(&placement, item) {
			tracing::warn!(
				id = contribution.id,
				source = contribution.source,
				error = %err,
				"contribution rejected",
			);
			self.rejected.push((contribution.id, err));
		}
	}

	/// Contributions that could not be placed, with the reason.
	pub fn rejected(&self) -> &[(&'static str, PlacementError)] {
		&self.rejected
	}

	pub fn context(&self) -> &Arc<MenuContext> {
		&self.context
	}

	/// Display label for a group name, if one is known.
	pub fn label(&self, name: &str) -> Option<&'static str> {
		self.labels.get(name).copied()
	}

	/// Resolves the menu bar against the built-in defaults.
	pub fn menu_tree(&self, prefs: &mut dyn PreferenceBackend) -> Result<MenuTree, VisitError> {
		self.resolve(&self.menu_defaults, &self.menus, prefs)
	}

	/// Resolves the toolbar against the built-in defaults.
	pub fn toolbar_tree(&self, prefs: &mut dyn PreferenceBackend) -> Result<MenuTree, VisitError> {
		self.resolve(&self.toolbar_defaults, &self.toolbar, prefs)
	}

	fn resolve(
		&self,
		defaults: &Item<CommandItem>,
		registry: &Registry<CommandItem>,
		prefs: &mut dyn PreferenceBackend,
	) -> Result<MenuTree, VisitError> {
		let mut model = MenuModel::new(&self.labels);
		let mut traversal = Traversal::new(OrderingStore::new(prefs, ORDER_ROOT));
		traversal.run(&mut model, Some(defaults), Some(registry.root()))?;
		let persisted = traversal.persisted().to_vec();
		Ok(MenuTree {
			roots: model.finish(),
			conflicts: traversal.into_conflicts(),
			persisted,
		})
	}
}
