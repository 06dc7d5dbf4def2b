//! Fixture loading.
//!
//! Loading is destructive per collection: each named collection is cleared
//! and then repopulated with the fixture records, strictly sequentially.
//! There is no transactional guarantee across collections; a failure
//! partway through leaves earlier collections reloaded and later ones
//! untouched.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{FixtureError, FixtureResult};
use crate::format::{FixtureSet, Records};
use crate::parser::FixtureParser;
use crate::registry::ModelRegistry;

/// Options controlling how records are inserted.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
	/// When true, insert raw records directly, bypassing schema defaults,
	/// validation, and hooks.
	pub skip_validation: bool,
}

impl LoadOptions {
	/// Creates default options (validated inserts).
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the skip-validation flag.
	pub fn with_skip_validation(mut self, skip: bool) -> Self {
		self.skip_validation = skip;
		self
	}
}

/// Statistics for a completed load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadResult {
	/// Collection names processed, in load order.
	pub collections: Vec<String>,

	/// Total number of records inserted.
	pub records_loaded: usize,
}

impl LoadResult {
	fn merge(&mut self, other: LoadResult) {
		self.collections.extend(other.collections);
		self.records_loaded += other.records_loaded;
	}
}

/// A fixture source: in-memory data or a filesystem path.
#[derive(Debug, Clone)]
pub enum FixtureSource {
	/// An in-memory fixture set.
	Set(FixtureSet),

	/// A path to a fixture file or a directory of fixture files.
	Path(PathBuf),
}

impl From<FixtureSet> for FixtureSource {
	fn from(set: FixtureSet) -> Self {
		Self::Set(set)
	}
}

impl From<PathBuf> for FixtureSource {
	fn from(path: PathBuf) -> Self {
		Self::Path(path)
	}
}

impl From<&Path> for FixtureSource {
	fn from(path: &Path) -> Self {
		Self::Path(path.to_path_buf())
	}
}

impl From<&str> for FixtureSource {
	fn from(path: &str) -> Self {
		Self::Path(PathBuf::from(path))
	}
}

impl From<String> for FixtureSource {
	fn from(path: String) -> Self {
		Self::Path(PathBuf::from(path))
	}
}

/// Loads fixture sets into the collections of a document store.
///
/// # Example
///
/// ```ignore
/// let registry = Arc::new(ModelRegistry::new());
/// registry.register(UserHandle::new(db.clone()));
///
/// let loader = FixtureLoader::new(registry);
/// let result = loader.load("fixtures/users.json").await?;
/// println!("loaded {} records", result.records_loaded);
/// ```
pub struct FixtureLoader {
	registry: Arc<ModelRegistry>,
	parser: FixtureParser,
	options: LoadOptions,
}

impl FixtureLoader {
	/// Creates a loader with default options (validated inserts).
	pub fn new(registry: Arc<ModelRegistry>) -> Self {
		Self::with_options(registry, LoadOptions::default())
	}

	/// Creates a loader with explicit options.
	pub fn with_options(registry: Arc<ModelRegistry>, options: LoadOptions) -> Self {
		Self {
			registry,
			parser: FixtureParser::new(),
			options,
		}
	}

	/// Returns the configured options.
	pub fn options(&self) -> &LoadOptions {
		&self.options
	}

	/// Loads fixtures from a set, a fixture file, or a directory of fixture
	/// files.
	///
	/// Directory entries are loaded one file at a time in file-name order;
	/// every insert completes before the next begins. A failure at any stage
	/// aborts the remaining sequential work and propagates the underlying
	/// error.
	pub async fn load(&self, source: impl Into<FixtureSource>) -> FixtureResult<LoadResult> {
		let result = match source.into() {
			FixtureSource::Set(set) => self.load_set(&set).await,
			FixtureSource::Path(path) => self.load_path(&path).await,
		};

		match &result {
			Ok(loaded) => tracing::info!(
				collections = ?loaded.collections,
				records = loaded.records_loaded,
				"fixtures loaded"
			),
			Err(error) => tracing::error!(error = %error, "fixture load failed"),
		}

		result
	}

	/// Loads every collection named by the fixture set, sequentially and in
	/// enumeration order.
	pub async fn load_set(&self, set: &FixtureSet) -> FixtureResult<LoadResult> {
		let mut result = LoadResult::default();
		for (name, records) in set.iter() {
			let inserted = self.insert_collection(name, records).await?;
			result.collections.push(name.to_string());
			result.records_loaded += inserted;
		}
		Ok(result)
	}

	/// Clears the named collection, then inserts the given records one at a
	/// time in enumeration order. Returns the number of records inserted.
	///
	/// A single insert failure rejects the whole operation; records already
	/// inserted in this collection remain (no rollback).
	pub async fn insert_collection(&self, name: &str, records: &Records) -> FixtureResult<usize> {
		let handle = self.registry.handle(name)?;
		handle.clear().await?;

		let mut inserted = 0;
		for record in records.values() {
			if self.options.skip_validation {
				handle.insert_raw(record).await?;
			} else {
				handle.insert_validated(record).await?;
			}
			inserted += 1;
		}

		tracing::debug!(collection = name, records = inserted, "collection replaced");
		Ok(inserted)
	}

	/// Removes all records from the named collection.
	pub async fn clear_collection(&self, name: &str) -> FixtureResult<()> {
		self.registry.handle(name)?.clear().await
	}

	async fn load_path(&self, path: &Path) -> FixtureResult<LoadResult> {
		let metadata = std::fs::metadata(path).map_err(|e| {
			if e.kind() == std::io::ErrorKind::NotFound {
				FixtureError::NotFound(path.display().to_string())
			} else {
				FixtureError::Io(e)
			}
		})?;

		if metadata.is_dir() {
			self.load_dir(path).await
		} else if metadata.is_file() {
			self.load_file(path).await
		} else {
			Err(FixtureError::InvalidInput(format!(
				"{} is neither a file nor a directory",
				path.display()
			)))
		}
	}

	async fn load_dir(&self, path: &Path) -> FixtureResult<LoadResult> {
		let mut entries = Vec::new();
		for entry in std::fs::read_dir(path)? {
			entries.push(entry?.path());
		}
		// File-name order keeps directory loads deterministic.
		entries.sort();

		let mut result = LoadResult::default();
		for entry in entries {
			result.merge(self.load_file(&entry).await?);
		}
		Ok(result)
	}

	async fn load_file(&self, path: &Path) -> FixtureResult<LoadResult> {
		tracing::debug!(path = %path.display(), "loading fixture file");
		let set = self.parser.parse_file(path)?;
		self.load_set(&set).await
	}
}
