//! Fixture dumping.
//!
//! Dumping is the inverse of loading: for each given fixture file, the live
//! contents of every collection the file names are fetched and written back
//! over the file. Restricting dump targets to existing fixture files keeps
//! arbitrary production collections out of reach; only collections with a
//! pre-existing fixture definition are eligible.
//!
//! Unlike the strictly sequential load path, dumps are read-only and
//! independent, so all per-collection fetches across all files run
//! concurrently and are joined at the end.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future;

use crate::error::FixtureResult;
use crate::format::{FixtureFormat, FixtureSet, Records};
use crate::object_id::tag_identifiers;
use crate::parser::FixtureParser;
use crate::registry::ModelRegistry;
use crate::serializer::FixtureSerializer;

/// Statistics for a completed dump.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DumpResult {
	/// Number of fixture files rewritten.
	pub files_written: usize,

	/// Total number of records written across all files.
	pub records_dumped: usize,
}

/// Dumps live collection contents back into fixture files.
///
/// # Example
///
/// ```ignore
/// let dumper = FixtureDumper::new(registry);
/// dumper.dump(&[PathBuf::from("fixtures/users.json")]).await?;
/// ```
pub struct FixtureDumper {
	registry: Arc<ModelRegistry>,
	parser: FixtureParser,
	serializer: FixtureSerializer,
}

impl FixtureDumper {
	/// Creates a dumper with the default serializer (pretty-printed JSON;
	/// per-file format still follows each file's extension).
	pub fn new(registry: Arc<ModelRegistry>) -> Self {
		Self {
			registry,
			parser: FixtureParser::new(),
			serializer: FixtureSerializer::new(),
		}
	}

	/// Replaces the default serializer settings.
	pub fn with_serializer(mut self, serializer: FixtureSerializer) -> Self {
		self.serializer = serializer;
		self
	}

	/// Dumps the collections named by each fixture file back into that file.
	///
	/// Every path must be an existing, parsable fixture file. All files and
	/// all collections within them are fetched concurrently; the result
	/// resolves once every write has completed, or rejects with the first
	/// error.
	pub async fn dump(&self, paths: &[PathBuf]) -> FixtureResult<DumpResult> {
		let outcome =
			future::try_join_all(paths.iter().map(|path| self.dump_file(path))).await;

		match outcome {
			Ok(per_file) => {
				let result = DumpResult {
					files_written: per_file.len(),
					records_dumped: per_file.iter().sum(),
				};
				tracing::info!(
					files = result.files_written,
					records = result.records_dumped,
					"fixtures dumped"
				);
				Ok(result)
			}
			Err(error) => {
				tracing::error!(error = %error, "fixture dump failed");
				Err(error)
			}
		}
	}

	/// Fetches all records of the named collection as plain data, with bare
	/// 24-hex identifier strings tagged as `{"$oid": ...}` so they re-load
	/// with the correct type.
	pub async fn dump_collection(&self, name: &str) -> FixtureResult<Records> {
		let handle = self.registry.handle(name)?;
		let mut records = handle.find_all().await?;
		for record in &mut records {
			tag_identifiers(record);
		}
		Ok(Records::Sequence(records))
	}

	async fn dump_file(&self, path: &Path) -> FixtureResult<usize> {
		// The file must already be a parsable fixture definition; its
		// collection names decide what gets dumped.
		let existing = self.parser.parse_file(path)?;
		let names: Vec<String> = existing.names().map(str::to_string).collect();

		let fetched =
			future::try_join_all(names.iter().map(|name| self.dump_collection(name))).await?;

		let mut set = FixtureSet::new();
		for (name, records) in names.into_iter().zip(fetched) {
			set.insert(name, records);
		}

		let format = FixtureFormat::from_path(path).unwrap_or(self.serializer.format());
		let content = self.serializer.clone().with_format(format).serialize(&set)?;
		tokio::fs::write(path, content).await?;

		let records_dumped = set.record_count();
		tracing::debug!(
			path = %path.display(),
			collections = set.len(),
			records = records_dumped,
			"fixture file dumped"
		);
		Ok(records_dumped)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use async_trait::async_trait;
	use rstest::rstest;
	use serde_json::{Value, json};

	use crate::error::FixtureError;
	use crate::registry::CollectionHandle;

	const HEX: &str = "5f2a1bc4de3f9a0012345678";

	struct FrozenHandle {
		name: String,
		records: Vec<Value>,
	}

	#[async_trait]
	impl CollectionHandle for FrozenHandle {
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
			Ok(self.records.clone())
		}
	}

	#[rstest]
	#[tokio::test]
	async fn test_dump_collection_tags_identifiers() {
		let registry = Arc::new(ModelRegistry::new());
		registry.register(FrozenHandle {
			name: "User".to_string(),
			records: vec![json!({"_id": HEX, "name": "Alex"})],
		});

		let dumper = FixtureDumper::new(registry);
		let records = dumper.dump_collection("User").await.unwrap();

		let values: Vec<_> = records.values().cloned().collect();
		assert_eq!(values, vec![json!({"_id": {"$oid": HEX}, "name": "Alex"})]);
	}

	#[rstest]
	#[tokio::test]
	async fn test_dump_collection_unregistered() {
		let registry = Arc::new(ModelRegistry::new());
		let dumper = FixtureDumper::new(registry);

		let result = dumper.dump_collection("Missing").await;
		assert!(matches!(
			result,
			Err(FixtureError::CollectionNotRegistered(_))
		));
	}

	#[rstest]
	#[tokio::test]
	async fn test_dump_requires_existing_fixture_file() {
		let registry = Arc::new(ModelRegistry::new());
		let dumper = FixtureDumper::new(registry);

		let result = dumper.dump(&[PathBuf::from("/nonexistent/users.json")]).await;
		assert!(matches!(result, Err(FixtureError::NotFound(_))));
	}

	#[rstest]
	#[tokio::test]
	async fn test_dump_overwrites_file_with_live_records() {
		let registry = Arc::new(ModelRegistry::new());
		registry.register(FrozenHandle {
			name: "User".to_string(),
			records: vec![json!({"name": "Live"})],
		});

		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("users.json");
		std::fs::write(&path, r#"{"User": [{"name": "Stale"}]}"#).unwrap();

		let dumper = FixtureDumper::new(registry);
		let result = dumper.dump(&[path.clone()]).await.unwrap();

		assert_eq!(result.files_written, 1);
		assert_eq!(result.records_dumped, 1);

		let content = std::fs::read_to_string(&path).unwrap();
		assert!(content.contains("Live"));
		assert!(!content.contains("Stale"));
	}
}
