//! Convenience re-exports for common usage.
//!
//! ```ignore
//! use docstore_fixtures::prelude::*;
//! ```

// Error types
pub use crate::error::{FixtureError, FixtureResult};

// Fixture data model
pub use crate::format::{FixtureFormat, FixtureSet, Records};
pub use crate::object_id::ObjectId;

// Parsing and serialization
pub use crate::parser::FixtureParser;
pub use crate::serializer::FixtureSerializer;

// Registry and collection contract
pub use crate::registry::{CollectionHandle, ModelRegistry};

// Load and dump operations
pub use crate::dumper::{DumpResult, FixtureDumper};
pub use crate::loader::{FixtureLoader, FixtureSource, LoadOptions, LoadResult};
