//! Fixture parsing.
//!
//! Fixture files are declarative data, never executable code: a file is a
//! JSON (or YAML, behind the `yaml` feature) mapping from collection name
//! to an array or key-indexed mapping of record objects. The parser
//! validates that shape and produces a [`FixtureSet`].

use std::path::Path;

use serde_json::Value;

use crate::error::{FixtureError, FixtureResult};
use crate::format::{FixtureFormat, FixtureSet, Records};

/// Parser for fixture files and strings.
#[derive(Debug, Clone, Default)]
pub struct FixtureParser;

impl FixtureParser {
	/// Creates a new fixture parser.
	pub fn new() -> Self {
		Self
	}

	/// Parses a fixture file, detecting the format from the file extension.
	///
	/// # Errors
	///
	/// - [`FixtureError::UnsupportedExtension`] if the extension is not
	///   recognized
	/// - [`FixtureError::NotFound`] if the file does not exist
	/// - [`FixtureError::Parse`] if the content is not a valid fixture set
	pub fn parse_file(&self, path: &Path) -> FixtureResult<FixtureSet> {
		let format = FixtureFormat::from_path(path).ok_or_else(|| {
			FixtureError::UnsupportedExtension(
				path.extension()
					.and_then(|e| e.to_str())
					.unwrap_or("(none)")
					.to_string(),
			)
		})?;

		let content = std::fs::read_to_string(path).map_err(|e| {
			if e.kind() == std::io::ErrorKind::NotFound {
				FixtureError::NotFound(path.display().to_string())
			} else {
				FixtureError::Io(e)
			}
		})?;

		self.parse_str(&content, format)
	}

	/// Parses fixture data from a string in the given format.
	pub fn parse_str(&self, content: &str, format: FixtureFormat) -> FixtureResult<FixtureSet> {
		let value = match format {
			FixtureFormat::Json => serde_json::from_str(content)?,
			FixtureFormat::Yaml => self.yaml_to_value(content)?,
		};
		self.from_value(value)
	}

	/// Converts a parsed document into a validated fixture set.
	fn from_value(&self, value: Value) -> FixtureResult<FixtureSet> {
		let Value::Object(map) = value else {
			return Err(FixtureError::Parse(
				"fixture root must be a mapping from collection name to records".to_string(),
			));
		};

		let mut set = FixtureSet::new();
		for (name, records) in map {
			let records = self.collection_records(&name, records)?;
			set.insert(name, records);
		}
		Ok(set)
	}

	/// Validates the records value for one collection.
	fn collection_records(&self, name: &str, value: Value) -> FixtureResult<Records> {
		match value {
			Value::Array(items) => {
				for (idx, item) in items.iter().enumerate() {
					if !item.is_object() {
						return Err(FixtureError::Parse(format!(
							"collection '{}': record at index {} is not an object",
							name, idx
						)));
					}
				}
				Ok(Records::Sequence(items))
			}
			Value::Object(map) => {
				for (key, item) in &map {
					if !item.is_object() {
						return Err(FixtureError::Parse(format!(
							"collection '{}': record under key '{}' is not an object",
							name, key
						)));
					}
				}
				Ok(Records::Keyed(map))
			}
			_ => Err(FixtureError::Parse(format!(
				"collection '{}': records must be an array or a mapping",
				name
			))),
		}
	}

	/// Parses YAML content into a JSON value.
	#[cfg(feature = "yaml")]
	fn yaml_to_value(&self, content: &str) -> FixtureResult<Value> {
		Ok(serde_yaml::from_str(content)?)
	}

	/// Stub for YAML parsing when the feature is not enabled.
	#[cfg(not(feature = "yaml"))]
	fn yaml_to_value(&self, _content: &str) -> FixtureResult<Value> {
		Err(FixtureError::UnsupportedExtension(
			"YAML support requires the 'yaml' feature".to_string(),
		))
	}
}
