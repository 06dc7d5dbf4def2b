//! Fixture serialization.
//!
//! Turns a [`FixtureSet`] back into fixture file text. The dumper composes
//! this with identifier tagging so dumped files can be re-loaded.

use std::path::Path;

use crate::error::{FixtureError, FixtureResult};
use crate::format::{FixtureFormat, FixtureSet};

/// Serializer for writing fixture sets out as fixture files.
#[derive(Debug, Clone)]
pub struct FixtureSerializer {
	format: FixtureFormat,
	indent: usize,
}

impl FixtureSerializer {
	/// Creates a serializer with default settings (pretty-printed JSON).
	pub fn new() -> Self {
		Self {
			format: FixtureFormat::Json,
			indent: 2,
		}
	}

	/// Sets the output format.
	pub fn with_format(mut self, format: FixtureFormat) -> Self {
		self.format = format;
		self
	}

	/// Sets the indentation level; `0` produces compact output.
	pub fn with_indent(mut self, indent: usize) -> Self {
		self.indent = indent;
		self
	}

	/// Returns the configured output format.
	pub fn format(&self) -> FixtureFormat {
		self.format
	}

	/// Serializes a fixture set to a string.
	pub fn serialize(&self, set: &FixtureSet) -> FixtureResult<String> {
		match self.format {
			FixtureFormat::Json => self.serialize_json(set),
			FixtureFormat::Yaml => self.serialize_yaml(set),
		}
	}

	fn serialize_json(&self, set: &FixtureSet) -> FixtureResult<String> {
		if self.indent > 0 {
			serde_json::to_string_pretty(set)
				.map_err(|e| FixtureError::Serialization(e.to_string()))
		} else {
			serde_json::to_string(set).map_err(|e| FixtureError::Serialization(e.to_string()))
		}
	}

	#[cfg(feature = "yaml")]
	fn serialize_yaml(&self, set: &FixtureSet) -> FixtureResult<String> {
		serde_yaml::to_string(set).map_err(|e| FixtureError::Serialization(e.to_string()))
	}

	/// Stub for YAML serialization when the feature is not enabled.
	#[cfg(not(feature = "yaml"))]
	fn serialize_yaml(&self, _set: &FixtureSet) -> FixtureResult<String> {
		Err(FixtureError::UnsupportedExtension(
			"YAML support requires the 'yaml' feature".to_string(),
		))
	}

	/// Serializes a fixture set and writes it to a file, overwriting any
	/// existing content.
	pub fn write_to_file(&self, set: &FixtureSet, path: &Path) -> FixtureResult<()> {
		let content = self.serialize(set)?;
		std::fs::write(path, content)?;
		Ok(())
	}
}

impl Default for FixtureSerializer {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;
	use tempfile::tempdir;

	fn sample_set() -> FixtureSet {
		[("User", vec![json!({"name": "Alex"})])].into_iter().collect()
	}

	#[rstest]
	fn test_serialize_json_pretty() {
		let serializer = FixtureSerializer::new();
		let output = serializer.serialize(&sample_set()).unwrap();
		assert!(output.contains("\"User\""));
		assert!(output.contains('\n'));
	}

	#[rstest]
	fn test_serialize_json_compact() {
		let serializer = FixtureSerializer::new().with_indent(0);
		let output = serializer.serialize(&sample_set()).unwrap();
		assert_eq!(output, r#"{"User":[{"name":"Alex"}]}"#);
	}

	#[rstest]
	fn test_write_to_file() {
		let serializer = FixtureSerializer::new();
		let dir = tempdir().unwrap();
		let path = dir.path().join("users.json");

		serializer.write_to_file(&sample_set(), &path).unwrap();

		let content = std::fs::read_to_string(&path).unwrap();
		assert!(content.contains("Alex"));
	}

	#[cfg(feature = "yaml")]
	#[rstest]
	fn test_serialize_yaml() {
		let serializer = FixtureSerializer::new().with_format(FixtureFormat::Yaml);
		let output = serializer.serialize(&sample_set()).unwrap();
		assert!(output.contains("User:"));
	}
}
