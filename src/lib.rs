//! Fixture loading and dumping for document-store collections.
//!
//! This crate replaces the contents of named collections with fixture data
//! (test/seed records) and dumps live collection contents back into fixture
//! files. The document store itself stays behind the
//! [`CollectionHandle`](registry::CollectionHandle) trait; this crate only
//! coordinates clear/insert/find calls and the fixture file format.
//!
//! # Fixture files
//!
//! A fixture file is declarative data: a mapping from collection name to an
//! array (or key-indexed mapping) of record objects. Object identifiers are
//! written as an explicit tagged value:
//!
//! ```json
//! {
//!   "User": [
//!     {"_id": {"$oid": "5f2a1bc4de3f9a0012345678"}, "name": "Alex"},
//!     {"name": "Bob"}
//!   ]
//! }
//! ```
//!
//! # Quick start
//!
//! ```ignore
//! use std::sync::Arc;
//! use docstore_fixtures::prelude::*;
//!
//! let registry = Arc::new(ModelRegistry::new());
//! registry.register(UserHandle::new(db.clone()));
//!
//! // Clear and repopulate every collection the fixture names.
//! let loader = FixtureLoader::new(registry.clone());
//! loader.load("fixtures/users.json").await?;
//!
//! // Write live collection contents back over the fixture file.
//! let dumper = FixtureDumper::new(registry);
//! dumper.dump(&["fixtures/users.json".into()]).await?;
//! ```
//!
//! # Semantics
//!
//! Loading is destructive per collection (clear, then insert) and strictly
//! sequential: every insert, file, and directory entry completes before the
//! next begins, so insert order is deterministic. There is no transactional
//! guarantee across collections and no rollback. Dumping is the one
//! concurrent path: per-collection fetches across all files fan out and
//! join, which is safe because dumps are read-only.
//!
//! # Features
//!
//! - `json` - JSON fixture format (enabled by default)
//! - `yaml` - YAML fixture format
//! - `full` - all of the above

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod dumper;
pub mod error;
pub mod format;
pub mod loader;
pub mod object_id;
pub mod parser;
pub mod prelude;
pub mod registry;
pub mod serializer;

// Re-export commonly used types at crate root
pub use dumper::{DumpResult, FixtureDumper};
pub use error::{FixtureError, FixtureResult};
pub use format::{FixtureFormat, FixtureSet, Records};
pub use loader::{FixtureLoader, FixtureSource, LoadOptions, LoadResult};
pub use object_id::ObjectId;
pub use parser::FixtureParser;
pub use registry::{CollectionHandle, ModelRegistry};
pub use serializer::FixtureSerializer;
