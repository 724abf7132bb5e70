//! Mergeable UI registry trees.
//!
//! Independently compiled modules contribute items (menu entries, toolbar
//! buttons, commands) to a shared hierarchical namespace. The final order of
//! every group is decided when the tree is traversed, from an optional
//! author-written default tree, per-item [`OrderingHint`]s, and orderings
//! remembered from earlier runs.
//!
//! # Modules
//!
//! - [`Item`] and friends: the closed set of node kinds.
//! - [`Registry`] / [`register_item`]: placing contributions by path.
//! - [`store`]: ordering preferences and the backend contract.
//! - [`Traversal`] / [`visit`]: the merge engine.
//! - [`Visitor`]: callbacks receiving the merged order.
//!
//! # Example
//!
//! ```
//! use cadence_registry::{
//! 	Item, MemoryPreferences, NullVisitor, OrderingHint, Placement, Registry, visit,
//! };
//!
//! let mut registry = Registry::new("MenuBar");
//! registry
//! 	.register(&Placement::new("Tools"), Item::single("Macros", ()))
//! 	.unwrap();
//! registry
//! 	.register(
//! 		&Placement::new("Tools").with_hint(OrderingHint::Begin),
//! 		Item::single("Plugins", ()),
//! 	)
//! 	.unwrap();
//!
//! let mut prefs = MemoryPreferences::new();
//! let conflicts = visit(&mut NullVisitor, None, Some(registry.root()), &mut prefs, "/Order").unwrap();
//! assert!(conflicts.is_empty());
//! ```

mod error;
mod hint;
mod ident;
mod item;
mod merge;
mod placement;
pub mod store;
mod visitor;

pub use error::{PlacementError, VisitError};
pub use hint::OrderingHint;
pub use ident::{Identifier, display_path};
pub use item::{ComputedItem, Factory, GroupItem, GroupOrdering, IndirectItem, Item, SingleItem};
pub use merge::{Conflict, ConflictKind, Traversal, visit};
pub use placement::{Placement, Registry, register_item};
pub use store::{MemoryPreferences, OrderingPreferenceInitializer, OrderingStore, PreferenceBackend};
pub use visitor::{NullVisitor, VisitResult, Visitor};
