//! Static contribution records and the [`contribute!`](crate::contribute) macro.
//!
//! Any crate linked into the binary may declare contributions; they are
//! gathered through `inventory` and registered into explicit [`Registries`]
//! at startup. Declaration order across crates is unspecified and does not
//! affect the resolved menus.
//!
//! [`Registries`]: crate::Registries

use std::sync::Arc;

use cadence_registry::{GroupOrdering, Item, OrderingHint};

use crate::{CommandItem, CommandSpec, MenuContext};

/// Registry a contribution is placed into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
	Menus,
	Toolbar,
}

/// `const`-constructible form of [`OrderingHint`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HintSpec {
	Before(&'static str),
	After(&'static str),
	Begin,
	End,
	#[default]
	Unspecified,
}

impl HintSpec {
	pub fn to_hint(self) -> OrderingHint {
		match self {
			Self::Before(name) => OrderingHint::before(name),
			Self::After(name) => OrderingHint::after(name),
			Self::Begin => OrderingHint::Begin,
			Self::End => OrderingHint::End,
			Self::Unspecified => OrderingHint::Unspecified,
		}
	}
}

/// Builds a menu item from runtime state on every traversal.
pub type ComputedBuilder = fn(&MenuContext) -> Option<Item<CommandItem>>;

/// What a contribution adds.
#[derive(Clone, Copy, Debug)]
pub enum ContributionKind {
	Command(CommandSpec),
	Group {
		name: &'static str,
		label: &'static str,
		ordering: GroupOrdering,
		commands: &'static [CommandSpec],
	},
	Computed {
		build: ComputedBuilder,
	},
}

/// One statically declared registration.
#[derive(Debug)]
pub struct Contribution {
	/// Fully qualified ID: "crate_name::contribution_name".
	pub id: &'static str,
	pub target: Target,
	/// `/`-separated group path relative to the registry root.
	pub path: &'static str,
	pub hint: HintSpec,
	pub kind: ContributionKind,
	/// Declaring crate.
	pub source: &'static str,
}

impl Contribution {
	/// Materializes the registry item, binding computed builders to `context`.
	pub fn item(&self, context: &Arc<MenuContext>) -> Item<CommandItem> {
		match self.kind {
			ContributionKind::Command(spec) => spec.item(),
			ContributionKind::Group {
				name,
				ordering,
				commands,
				..
			} => Item::group(name, commands.iter().map(CommandSpec::item)).with_ordering(ordering),
			ContributionKind::Computed { build } => {
				let context = Arc::clone(context);
				Item::computed(move |_| build(&context).map(Arc::new))
			}
		}
	}
}

/// Registry wrapper for statically declared contributions.
pub struct ContributionReg(pub &'static Contribution);
inventory::collect!(ContributionReg);

/// All contributions linked into the binary, sorted by ID.
pub fn all_contributions() -> Vec<&'static Contribution> {
	let mut all: Vec<_> = inventory::iter::<ContributionReg>().map(|reg| reg.0).collect();
	all.sort_by_key(|contribution| contribution.id);
	all
}

/// Declares a menu or toolbar contribution collected via `inventory`.
///
/// # Example
///
/// ```ignore
/// contribute!(export_mp2, {
///     target: Menus,
///     path: "file/export",
///     hint: HintSpec::After("export_mp3"),  // optional
///     label: "Export as MP2...",
///     command: "export-mp2",
///     shortcut: "Ctrl+Shift+M",  // optional
/// });
///
/// contribute!(tools, {
///     target: Menus,
///     path: "",
///     group: "Tools",
///     commands: [CommandSpec::new("macros", "Macros...", "macros")],
/// });
///
/// contribute!(recent, {
///     target: Menus,
///     path: "file",
///     computed: recent_files_menu,
/// });
/// ```
#[macro_export]
macro_rules! contribute {
	($name:ident, {
		target: $target:ident,
		path: $path:expr
		$(, hint: $hint:expr)?
		, label: $label:expr,
		command: $command:expr
		$(, shortcut: $shortcut:expr)?
		$(,)?
	}) => {
		$crate::__contribute!(
			$name,
			$target,
			$path,
			$crate::__contribute_opt!($({$hint})?, $crate::HintSpec::Unspecified),
			$crate::ContributionKind::Command($crate::CommandSpec {
				name: stringify!($name),
				label: $label,
				command: $command,
				shortcut: $crate::__contribute_opt!($({Some($shortcut)})?, None),
			})
		);
	};
	($name:ident, {
		target: $target:ident,
		path: $path:expr
		$(, hint: $hint:expr)?
		, group: $label:expr
		$(, ordering: $ordering:ident)?
		, commands: [$($command:expr),* $(,)?]
		$(,)?
	}) => {
		$crate::__contribute!(
			$name,
			$target,
			$path,
			$crate::__contribute_opt!($({$hint})?, $crate::HintSpec::Unspecified),
			$crate::ContributionKind::Group {
				name: stringify!($name),
				label: $label,
				ordering: $crate::__contribute_opt!(
					$({$crate::__private::GroupOrdering::$ordering})?,
					$crate::__private::GroupOrdering::Strong
				),
				commands: &[$($command),*],
			}
		);
	};
	($name:ident, {
		target: $target:ident,
		path: $path:expr
		$(, hint: $hint:expr)?
		, computed: $build:expr
		$(,)?
	}) => {
		$crate::__contribute!(
			$name,
			$target,
			$path,
			$crate::__contribute_opt!($({$hint})?, $crate::HintSpec::Unspecified),
			$crate::ContributionKind::Computed { build: $build }
		);
	};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __contribute {
	($name:ident, $target:ident, $path:expr, $hint:expr, $kind:expr) => {
		$crate::__private::paste! {
			#[allow(non_upper_case_globals)]
			pub static [<CONTRIBUTION_ $name>]: $crate::Contribution = $crate::Contribution {
				id: concat!(env!("CARGO_PKG_NAME"), "::", stringify!($name)),
				target: $crate::Target::$target,
				path: $path,
				hint: $hint,
				kind: $kind,
				source: env!("CARGO_PKG_NAME"),
			};

			$crate::__private::inventory::submit! { $crate::ContributionReg(&[<CONTRIBUTION_ $name>]) }
		}
	};
}

/// Helper macro for optional values with defaults.
#[doc(hidden)]
#[macro_export]
macro_rules! __contribute_opt {
	({$val:expr}, $default:expr) => {
		$val
	};
	(, $default:expr) => {
		$default
	};
}
