//! Menu bar and toolbar registries for Cadence.
//!
//! Crates declare entries with [`contribute!`]. At startup
//! [`Registries::collect`] places every linked contribution into the menu bar
//! or toolbar registry; [`Registries::menu_tree`] merges the registry with the
//! built-in default tree and persisted orderings into a [`MenuTree`].
//!
//! Groups are addressed by lowercase names (`file`, `file/export`, `effect`);
//! display labels are kept separately.

mod builtins;
mod command;
mod contribution;
mod registries;
mod render;

pub use builtins::{GROUP_LABELS, default_menu_bar, default_toolbar, legacy_ordering_seeds};
pub use command::{CommandItem, CommandSpec};
pub use contribution::{
	ComputedBuilder, Contribution, ContributionKind, ContributionReg, HintSpec, Target,
	all_contributions,
};
pub use registries::{MENU_BAR, MenuContext, ORDER_ROOT, Registries, TOOLBAR};
pub use render::{MenuModel, MenuNode, MenuTree};

#[doc(hidden)]
pub mod __private {
	pub use cadence_registry::GroupOrdering;
	pub use inventory;
	pub use paste::paste;
}
