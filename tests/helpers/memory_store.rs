//! In-memory document-store backend for tests.
//!
//! [`MemoryCollection`] implements the collection-handle contract over a
//! plain `Vec`, with an optional required-fields schema for the validated
//! insert path and an optional shared journal for asserting operation
//! order. [`FailingCollection`] rejects writes so abort semantics can be
//! exercised.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use docstore_fixtures::error::{FixtureError, FixtureResult};
use docstore_fixtures::registry::CollectionHandle;

/// Shared log of storage operations, in execution order.
pub type Journal = Arc<Mutex<Vec<String>>>;

/// Creates an empty operation journal.
pub fn journal() -> Journal {
	Arc::new(Mutex::new(Vec::new()))
}

/// An in-memory collection with an optional required-fields schema.
pub struct MemoryCollection {
	name: String,
	required: Vec<String>,
	records: Mutex<Vec<Value>>,
	journal: Option<Journal>,
}

impl MemoryCollection {
	/// Creates an empty collection with no schema.
	pub fn new(name: &str) -> Arc<Self> {
		Arc::new(Self {
			name: name.to_string(),
			required: Vec::new(),
			records: Mutex::new(Vec::new()),
			journal: None,
		})
	}

	/// Creates a collection whose validated insert path requires the given
	/// fields to be present.
	pub fn with_required(name: &str, fields: &[&str]) -> Arc<Self> {
		Arc::new(Self {
			name: name.to_string(),
			required: fields.iter().map(|f| f.to_string()).collect(),
			records: Mutex::new(Vec::new()),
			journal: None,
		})
	}

	/// Creates a collection that appends each operation to `journal`.
	pub fn with_journal(name: &str, journal: Journal) -> Arc<Self> {
		Arc::new(Self {
			name: name.to_string(),
			required: Vec::new(),
			records: Mutex::new(Vec::new()),
			journal: Some(journal),
		})
	}

	/// Creates a collection pre-populated with existing records.
	pub fn with_records(name: &str, records: Vec<Value>) -> Arc<Self> {
		let collection = Self::new(name);
		collection.seed(records);
		collection
	}

	/// Replaces the stored records wholesale, bypassing the handle contract.
	pub fn seed(&self, records: Vec<Value>) {
		*self.records.lock() = records;
	}

	/// Returns a snapshot of the stored records.
	pub fn records(&self) -> Vec<Value> {
		self.records.lock().clone()
	}

	fn log(&self, op: &str) {
		if let Some(journal) = &self.journal {
			journal.lock().push(format!("{}:{}", op, self.name));
		}
	}
}

#[async_trait]
impl CollectionHandle for MemoryCollection {
	fn name(&self) -> &str {
		&self.name
	}

	async fn insert_validated(&self, record: &Value) -> FixtureResult<()> {
		for field in &self.required {
			if record.get(field).is_none() {
				return Err(FixtureError::Validation {
					collection: self.name.clone(),
					message: format!("missing required field '{}'", field),
				});
			}
		}
		self.log("insert");
		self.records.lock().push(record.clone());
		Ok(())
	}

	async fn insert_raw(&self, record: &Value) -> FixtureResult<()> {
		self.log("insert");
		self.records.lock().push(record.clone());
		Ok(())
	}

	async fn clear(&self) -> FixtureResult<()> {
		self.log("clear");
		self.records.lock().clear();
		Ok(())
	}

	async fn find_all(&self) -> FixtureResult<Vec<Value>> {
		Ok(self.records())
	}
}

/// A collection whose writes always fail with a storage error.
pub struct FailingCollection {
	name: String,
	fail_clear: bool,
}

impl FailingCollection {
	/// Creates a collection that clears fine but refuses every insert.
	pub fn new(name: &str) -> Self {
		Self {
			name: name.to_string(),
			fail_clear: false,
		}
	}

	/// Creates a collection that fails already on clear.
	pub fn failing_clear(name: &str) -> Self {
		Self {
			name: name.to_string(),
			fail_clear: true,
		}
	}
}

#[async_trait]
impl CollectionHandle for FailingCollection {
	fn name(&self) -> &str {
		&self.name
	}

	async fn insert_validated(&self, _record: &Value) -> FixtureResult<()> {
		Err(FixtureError::Storage(format!("{}: insert refused", self.name)))
	}

	async fn insert_raw(&self, _record: &Value) -> FixtureResult<()> {
		Err(FixtureError::Storage(format!("{}: insert refused", self.name)))
	}

	async fn clear(&self) -> FixtureResult<()> {
		if self.fail_clear {
			return Err(FixtureError::Storage(format!("{}: clear refused", self.name)));
		}
		Ok(())
	}

	async fn find_all(&self) -> FixtureResult<Vec<Value>> {
		Err(FixtureError::Storage(format!("{}: find refused", self.name)))
	}
}
