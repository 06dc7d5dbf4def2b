//! Error types for fixture operations.
//!
//! This module defines the error taxonomy used throughout the
//! docstore-fixtures crate.

use thiserror::Error;

/// Errors that can occur while loading or dumping fixtures.
#[derive(Debug, Error)]
pub enum FixtureError {
	/// The fixture source is structurally unsupported (e.g. a path that is
	/// neither a regular file nor a directory).
	#[error("Invalid input: {0}")]
	InvalidInput(String),

	/// A fixture path does not exist.
	#[error("Not found: {0}")]
	NotFound(String),

	/// No handle is registered for the named collection.
	#[error("Collection not registered: {0}")]
	CollectionNotRegistered(String),

	/// A record was rejected by schema validation.
	#[error("Validation error: {collection}: {message}")]
	Validation {
		/// Collection whose handle rejected the record.
		collection: String,
		/// Validation error message.
		message: String,
	},

	/// The underlying storage engine failed a clear/insert/find operation.
	#[error("Storage error: {0}")]
	Storage(String),

	/// Fixture content could not be parsed into a fixture set.
	#[error("Parse error: {0}")]
	Parse(String),

	/// A fixture set could not be serialized.
	#[error("Serialization error: {0}")]
	Serialization(String),

	/// Unsupported fixture file extension.
	#[error("Unsupported file extension: {0}")]
	UnsupportedExtension(String),

	/// I/O operation failed.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	/// JSON serialization/deserialization error.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	/// YAML serialization/deserialization error (when the `yaml` feature is
	/// enabled).
	#[cfg(feature = "yaml")]
	#[error("YAML error: {0}")]
	Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for fixture operations.
pub type FixtureResult<T> = Result<T, FixtureError>;
