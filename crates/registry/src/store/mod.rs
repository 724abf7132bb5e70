//! Ordering preferences: resolved child sequences remembered across runs.
//!
//! # Format
//!
//! One string entry per merged group. The key is the caller-chosen root
//! followed by `/name` for each group on the path; the value is the
//! comma-separated list of child identifiers, e.g.
//! `/Menus/Order/MenuBar/File = "New,Open,Recent,Save"`.
//!
//! A missing entry means no order has been established yet. A name containing
//! `,` cannot be stored; [`register_item`](crate::register_item) refuses such
//! names, and items of a default tree should avoid them.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use crate::Identifier;

/// Minimal string key/value contract supplied by the preferences subsystem.
pub trait PreferenceBackend {
	fn read(&self, key: &str) -> Option<String>;

	fn write(&mut self, key: &str, value: &str);

	fn contains(&self, key: &str) -> bool {
		self.read(key).is_some()
	}
}

/// In-memory backend.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryPreferences {
	values: BTreeMap<String, String>,
}

impl MemoryPreferences {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}
}

impl PreferenceBackend for MemoryPreferences {
	fn read(&self, key: &str) -> Option<String> {
		self.values.get(key).cloned()
	}

	fn write(&mut self, key: &str, value: &str) {
		self.values.insert(key.to_owned(), value.to_owned());
	}

	fn contains(&self, key: &str) -> bool {
		self.values.contains_key(key)
	}
}

/// Parses a stored comma-separated identifier list.
pub fn parse_order(value: &str) -> Vec<Identifier> {
	value
		.split(',')
		.map(str::trim)
		.filter(|name| !name.is_empty())
		.map(Identifier::new)
		.collect()
}

/// Formats an identifier list for storage.
pub fn format_order(order: &[Identifier]) -> String {
	order
		.iter()
		.map(Identifier::as_str)
		.collect::<Vec<_>>()
		.join(",")
}

/// Per-traversal view of persisted orderings under one namespace root.
///
/// Each key is read from the backend at most once; updates are staged and
/// written by [`OrderingStore::flush`].
pub struct OrderingStore<'p> {
	backend: &'p mut dyn PreferenceBackend,
	root: String,
	cache: FxHashMap<String, Vec<Identifier>>,
	staged: BTreeMap<String, Vec<Identifier>>,
}

impl<'p> OrderingStore<'p> {
	pub fn new(backend: &'p mut dyn PreferenceBackend, root: impl Into<String>) -> Self {
		Self {
			backend,
			root: root.into(),
			cache: FxHashMap::default(),
			staged: BTreeMap::new(),
		}
	}

	pub fn root(&self) -> &str {
		&self.root
	}

	pub fn key(&self, path: &[Identifier]) -> String {
		let mut key = self.root.clone();
		for segment in path {
			key.push('/');
			key.push_str(segment.as_str());
		}
		key
	}

	/// Stored order at `path`, or an empty list when none was established.
	pub fn get(&mut self, path: &[Identifier]) -> Vec<Identifier> {
		let key = self.key(path);
		if let Some(order) = self.staged.get(&key) {
			return order.clone();
		}
		if let Some(order) = self.cache.get(&key) {
			return order.clone();
		}
		let order = self
			.backend
			.read(&key)
			.map(|value| parse_order(&value))
			.unwrap_or_default();
		self.cache.insert(key, order.clone());
		order
	}

	/// Stages a new order for `path`.
	pub fn set(&mut self, path: &[Identifier], order: Vec<Identifier>) {
		let key = self.key(path);
		self.staged.insert(key, order);
	}

	/// Keys staged but not yet written.
	pub fn pending(&self) -> impl Iterator<Item = &str> {
		self.staged.keys().map(String::as_str)
	}

	/// Writes staged orders to the backend, returning the keys written.
	pub fn flush(&mut self) -> Vec<String> {
		let staged = std::mem::take(&mut self.staged);
		let mut written = Vec::with_capacity(staged.len());
		for (key, order) in staged {
			let value = format_order(&order);
			tracing::debug!(key = %key, value = %value, "persisting ordering");
			self.backend.write(&key, &value);
			self.cache.insert(key.clone(), order);
			written.push(key);
		}
		written
	}
}

/// Seeds first-run orderings so a menu migrated from a hard-coded listing
/// keeps its previous visible order.
///
/// Paths are relative to `root` and are either blank or start with `/`
/// without a trailing `/`. Values are comma-separated identifiers.
#[derive(Clone, Debug)]
pub struct OrderingPreferenceInitializer {
	root: String,
	pairs: Vec<(String, String)>,
}

impl OrderingPreferenceInitializer {
	pub fn new<P, V>(root: impl Into<String>, pairs: impl IntoIterator<Item = (P, V)>) -> Self
	where
		P: Into<String>,
		V: Into<String>,
	{
		Self {
			root: root.into(),
			pairs: pairs
				.into_iter()
				.map(|(path, value)| (path.into(), value.into()))
				.collect(),
		}
	}

	/// Writes every seed whose key is absent. Returns whether anything was
	/// written.
	pub fn apply(&self, backend: &mut dyn PreferenceBackend) -> bool {
		let mut wrote = false;
		for (path, value) in &self.pairs {
			let key = format!("{}{}", self.root, path);
			if backend.contains(&key) {
				continue;
			}
			tracing::debug!(key = %key, "seeding legacy ordering");
			backend.write(&key, value);
			wrote = true;
		}
		wrote
	}
}

#[cfg(test)]
mod tests;
