//! TOML-file preference backend.
//!
//! Stores the flat string key/value entries the registry's ordering store
//! reads and writes, in a single file:
//!
//! ```toml
//! [values]
//! "/Menus/Order/MenuBar/File" = "New,Open,Recent,Save"
//! ```
//!
//! A missing file loads as empty. Writes stay in memory until
//! [`TomlPreferences::save`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use cadence_registry::PreferenceBackend;
use serde::{Deserialize, Serialize};

/// Directory under the platform config dir holding the preferences file.
pub const APP_DIR: &str = "cadence";
/// File name of the preferences file.
pub const FILE_NAME: &str = "preferences.toml";

/// Preference file errors.
#[derive(Debug, thiserror::Error)]
pub enum PrefsError {
	/// Reading or writing the file failed.
	#[error("preferences I/O error at {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// The file exists but is not a valid preferences table.
	#[error("malformed preferences file {}: {source}", path.display())]
	Parse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("failed to serialize preferences: {0}")]
	Serialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, PrefsError>;

#[derive(Debug, Default, Serialize, Deserialize)]
struct PreferenceFile {
	#[serde(default)]
	values: BTreeMap<String, String>,
}

/// Default location: `<config dir>/cadence/preferences.toml`.
pub fn default_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join(APP_DIR).join(FILE_NAME))
}

/// Preferences backed by a TOML file.
#[derive(Debug, Default)]
pub struct TomlPreferences {
	path: Option<PathBuf>,
	values: BTreeMap<String, String>,
	dirty: bool,
}

impl TomlPreferences {
	/// Unbacked preferences; [`save`](Self::save) is a no-op.
	pub fn in_memory() -> Self {
		Self::default()
	}

	/// Loads `path`, treating a missing file as empty.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
		let path = path.into();
		let values = match std::fs::read_to_string(&path) {
			Ok(content) => parse(&content).map_err(|source| PrefsError::Parse {
				path: path.clone(),
				source,
			})?,
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
				tracing::debug!(path = %path.display(), "no preferences file yet");
				BTreeMap::new()
			}
			Err(source) => return Err(PrefsError::Io { path, source }),
		};
		tracing::debug!(path = %path.display(), entries = values.len(), "loaded preferences");
		Ok(Self {
			path: Some(path),
			values,
			dirty: false,
		})
	}

	/// Parses preferences from TOML text without a backing file.
	pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
		Ok(Self {
			values: parse(content)?,
			..Self::default()
		})
	}

	/// Serializes the current entries.
	pub fn to_toml(&self) -> Result<String> {
		let file = PreferenceFile {
			values: self.values.clone(),
		};
		Ok(toml::to_string_pretty(&file)?)
	}

	pub fn path(&self) -> Option<&Path> {
		self.path.as_deref()
	}

	/// Whether entries changed since loading or the last save.
	pub fn is_dirty(&self) -> bool {
		self.dirty
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

	/// Writes the file when entries changed, creating parent directories.
	/// Returns whether the file was written.
	pub fn save(&mut self) -> Result<bool> {
		let Some(path) = self.path.clone() else {
			return Ok(false);
		};
		if !self.dirty {
			return Ok(false);
		}
		let content = self.to_toml()?;
		if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
			std::fs::create_dir_all(parent).map_err(|source| PrefsError::Io {
				path: parent.to_path_buf(),
				source,
			})?;
		}
		std::fs::write(&path, content).map_err(|source| PrefsError::Io {
			path: path.clone(),
			source,
		})?;
		tracing::info!(path = %path.display(), entries = self.values.len(), "saved preferences");
		self.dirty = false;
		Ok(true)
	}
}

fn parse(content: &str) -> std::result::Result<BTreeMap<String, String>, toml::de::Error> {
	let file: PreferenceFile = toml::from_str(content)?;
	Ok(file.values)
}

impl PreferenceBackend for TomlPreferences {
	fn read(&self, key: &str) -> Option<String> {
		self.values.get(key).cloned()
	}

	fn write(&mut self, key: &str, value: &str) {
		if self.values.get(key).map(String::as_str) == Some(value) {
			return;
		}
		self.values.insert(key.to_owned(), value.to_owned());
		self.dirty = true;
	}

	fn contains(&self, key: &str) -> bool {
		self.values.contains_key(key)
	}
}
