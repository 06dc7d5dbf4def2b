//! Fixture data model.
//!
//! A fixture file is a mapping from collection name to the records that
//! should exist in that collection after loading:
//!
//! ```json
//! {
//!   "User": [
//!     {"name": "Alex"},
//!     {"name": "Bob"}
//!   ],
//!   "Post": {
//!     "first": {"title": "Hello"},
//!     "second": {"title": "World"}
//!   }
//! }
//! ```
//!
//! Records may be given as an ordered sequence or as a key-indexed mapping;
//! mapping keys are purely cosmetic and are discarded on load.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Supported fixture file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum FixtureFormat {
	/// JSON format (default).
	#[default]
	Json,

	/// YAML format (requires the `yaml` feature).
	Yaml,
}

impl FixtureFormat {
	/// Determines the fixture format from a file extension.
	///
	/// ```
	/// # use docstore_fixtures::format::FixtureFormat;
	/// assert_eq!(FixtureFormat::from_extension("json"), Some(FixtureFormat::Json));
	/// assert_eq!(FixtureFormat::from_extension("yml"), Some(FixtureFormat::Yaml));
	/// assert_eq!(FixtureFormat::from_extension("toml"), None);
	/// ```
	pub fn from_extension(ext: &str) -> Option<Self> {
		match ext.to_lowercase().as_str() {
			"json" => Some(Self::Json),
			"yaml" | "yml" => Some(Self::Yaml),
			_ => None,
		}
	}

	/// Determines the fixture format from a file path's extension.
	pub fn from_path(path: &Path) -> Option<Self> {
		path.extension()
			.and_then(|ext| ext.to_str())
			.and_then(Self::from_extension)
	}

	/// Returns the default file extension for this format.
	pub fn extension(&self) -> &'static str {
		match self {
			Self::Json => "json",
			Self::Yaml => "yaml",
		}
	}
}

impl std::fmt::Display for FixtureFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Json => write!(f, "JSON"),
			Self::Yaml => write!(f, "YAML"),
		}
	}
}

/// The records for one collection, as given in a fixture file.
///
/// Enumeration order of values is file order in both variants
/// (`serde_json` is built with `preserve_order`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Records {
	/// An ordered sequence of record objects.
	Sequence(Vec<Value>),

	/// A key-indexed mapping of record objects; keys are discarded on load.
	Keyed(serde_json::Map<String, Value>),
}

impl Records {
	/// Returns the number of records.
	pub fn len(&self) -> usize {
		match self {
			Self::Sequence(items) => items.len(),
			Self::Keyed(map) => map.len(),
		}
	}

	/// Returns true if there are no records.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Iterates over record values in enumeration order, keys discarded.
	pub fn values(&self) -> Box<dyn Iterator<Item = &Value> + '_> {
		match self {
			Self::Sequence(items) => Box::new(items.iter()),
			Self::Keyed(map) => Box::new(map.values()),
		}
	}

	/// Consumes the records into an ordered sequence of values.
	pub fn into_values(self) -> Vec<Value> {
		match self {
			Self::Sequence(items) => items,
			Self::Keyed(map) => map.into_iter().map(|(_, value)| value).collect(),
		}
	}
}

impl From<Vec<Value>> for Records {
	fn from(items: Vec<Value>) -> Self {
		Self::Sequence(items)
	}
}

/// An ordered mapping from collection name to its records.
///
/// This is the unit of loading: for each named collection, existing records
/// are removed and the fixture records inserted in their place. Enumeration
/// order is insertion (file) order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixtureSet {
	collections: IndexMap<String, Records>,
}

impl FixtureSet {
	/// Creates an empty fixture set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a collection, replacing any previous entry of the same name.
	pub fn insert(&mut self, name: impl Into<String>, records: impl Into<Records>) {
		self.collections.insert(name.into(), records.into());
	}

	/// Returns the records for a named collection.
	pub fn get(&self, name: &str) -> Option<&Records> {
		self.collections.get(name)
	}

	/// Iterates over collection names in enumeration order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.collections.keys().map(String::as_str)
	}

	/// Iterates over (name, records) pairs in enumeration order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Records)> {
		self.collections.iter().map(|(name, records)| (name.as_str(), records))
	}

	/// Returns the number of collections.
	pub fn len(&self) -> usize {
		self.collections.len()
	}

	/// Returns true if the set names no collections.
	pub fn is_empty(&self) -> bool {
		self.collections.is_empty()
	}

	/// Returns the total number of records across all collections.
	pub fn record_count(&self) -> usize {
		self.collections.values().map(Records::len).sum()
	}
}

impl<N: Into<String>, R: Into<Records>> FromIterator<(N, R)> for FixtureSet {
	fn from_iter<I: IntoIterator<Item = (N, R)>>(iter: I) -> Self {
		let mut set = Self::new();
		for (name, records) in iter {
			set.insert(name, records);
		}
		set
	}
}

impl IntoIterator for FixtureSet {
	type Item = (String, Records);
	type IntoIter = indexmap::map::IntoIter<String, Records>;

	fn into_iter(self) -> Self::IntoIter {
		self.collections.into_iter()
	}
}
