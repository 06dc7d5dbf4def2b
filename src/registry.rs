//! Collection handles and the model registry.
//!
//! The registry is the loader's window onto the document store: it maps a
//! collection name to a schema-aware data-access handle. The store engine
//! itself, and any schema or hook semantics, live behind the
//! [`CollectionHandle`] trait.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use crate::error::{FixtureError, FixtureResult};

/// Schema-aware data-access handle for one collection.
///
/// Implement this trait once per collection that should support fixture
/// loading and dumping.
#[async_trait]
pub trait CollectionHandle: Send + Sync {
	/// Returns the collection name (e.g. "User").
	fn name(&self) -> &str;

	/// Constructs a schema-backed document from the raw record and persists
	/// it, running field validation and any hooks.
	///
	/// A schema rejection should surface as [`FixtureError::Validation`].
	async fn insert_validated(&self, record: &Value) -> FixtureResult<()>;

	/// Inserts the raw record directly into the underlying storage,
	/// bypassing defaults, validation, and hooks.
	async fn insert_raw(&self, record: &Value) -> FixtureResult<()>;

	/// Removes all records currently in the collection.
	async fn clear(&self) -> FixtureResult<()>;

	/// Fetches all records as plain values (no schema instances, no
	/// filtering, no pagination).
	async fn find_all(&self) -> FixtureResult<Vec<Value>>;
}

/// Registry of collection handles, keyed by collection name.
///
/// The loader and dumper hold a registry via [`Arc`]; it is an injected
/// collaborator rather than process-global state.
#[derive(Default)]
pub struct ModelRegistry {
	handles: RwLock<HashMap<String, Arc<dyn CollectionHandle>>>,
}

impl ModelRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a handle under its own collection name.
	pub fn register<H: CollectionHandle + 'static>(&self, handle: H) {
		self.register_arc(Arc::new(handle));
	}

	/// Registers an already-shared handle under its own collection name.
	pub fn register_arc(&self, handle: Arc<dyn CollectionHandle>) {
		let name = handle.name().to_string();
		self.handles.write().insert(name, handle);
	}

	/// Looks up the handle for a collection name.
	///
	/// # Errors
	///
	/// Returns [`FixtureError::CollectionNotRegistered`] if no handle is
	/// registered under `name`.
	pub fn handle(&self, name: &str) -> FixtureResult<Arc<dyn CollectionHandle>> {
		self.handles
			.read()
			.get(name)
			.cloned()
			.ok_or_else(|| FixtureError::CollectionNotRegistered(name.to_string()))
	}

	/// Checks whether a handle is registered for the collection name.
	pub fn contains(&self, name: &str) -> bool {
		self.handles.read().contains_key(name)
	}

	/// Returns all registered collection names.
	pub fn names(&self) -> Vec<String> {
		self.handles.read().keys().cloned().collect()
	}

	/// Returns the number of registered handles.
	pub fn len(&self) -> usize {
		self.handles.read().len()
	}

	/// Returns true if no handles are registered.
	pub fn is_empty(&self) -> bool {
		self.handles.read().is_empty()
	}

	/// Removes all registered handles.
	pub fn clear(&self) {
		self.handles.write().clear();
	}
}

impl std::fmt::Debug for ModelRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ModelRegistry")
			.field("collections", &self.names())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	struct NullHandle {
		name: String,
	}

	impl NullHandle {
		fn new(name: &str) -> Self {
			Self {
				name: name.to_string(),
			}
		}
	}

	#[async_trait]
	impl CollectionHandle for NullHandle {
		fn name(&self) -> &str {
			&self.name
		}

		async fn insert_validated(&self, _record: &Value) -> FixtureResult<()> {
			Ok(())
		}

		async fn insert_raw(&self, _record: &Value) -> FixtureResult<()> {
			Ok(())
		}

		async fn clear(&self) -> FixtureResult<()> {
			Ok(())
		}

		async fn find_all(&self) -> FixtureResult<Vec<Value>> {
			Ok(Vec::new())
		}
	}

	#[rstest]
	fn test_register_and_lookup() {
		let registry = ModelRegistry::new();
		registry.register(NullHandle::new("User"));

		assert!(registry.contains("User"));
		assert!(!registry.contains("Post"));

		let handle = registry.handle("User").unwrap();
		assert_eq!(handle.name(), "User");
	}

	#[rstest]
	fn test_missing_handle_is_an_error() {
		let registry = ModelRegistry::new();
		let result = registry.handle("Missing");
		assert!(matches!(
			result,
			Err(FixtureError::CollectionNotRegistered(_))
		));
	}

	#[rstest]
	fn test_names_and_clear() {
		let registry = ModelRegistry::new();
		registry.register(NullHandle::new("User"));
		registry.register(NullHandle::new("Post"));

		let mut names = registry.names();
		names.sort();
		assert_eq!(names, vec!["Post".to_string(), "User".to_string()]);
		assert_eq!(registry.len(), 2);

		registry.clear();
		assert!(registry.is_empty());
	}
}
