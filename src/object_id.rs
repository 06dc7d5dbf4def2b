//! Object identifier tagged-value support.
//!
//! Document stores identify records with 24-hex-character object
//! identifiers. In fixture files these are represented as an explicit
//! tagged value, `{"$oid": "<24 hex chars>"}`, rather than a bare string,
//! so a round-trip through dump and load keeps the identifier type intact.

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::error::{FixtureError, FixtureResult};

/// Map key marking a tagged object identifier in fixture data.
pub const OID_KEY: &str = "$oid";

/// A 24-lowercase-hex-character object identifier.
///
/// Serializes to the tagged form recognized by the fixture parser:
///
/// ```
/// # use docstore_fixtures::object_id::ObjectId;
/// let id = ObjectId::new("5f2a1bc4de3f9a0012345678").unwrap();
/// let json = serde_json::to_string(&id).unwrap();
/// assert_eq!(json, r#"{"$oid":"5f2a1bc4de3f9a0012345678"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectId(String);

impl ObjectId {
	/// Creates an object identifier from a hex string.
	///
	/// # Errors
	///
	/// Returns [`FixtureError::InvalidInput`] if the string is not exactly
	/// 24 lowercase hexadecimal characters.
	pub fn new(hex: impl Into<String>) -> FixtureResult<Self> {
		let hex = hex.into();
		if !is_object_id_hex(&hex) {
			return Err(FixtureError::InvalidInput(format!(
				"'{}' is not a 24-hex-character object identifier",
				hex
			)));
		}
		Ok(Self(hex))
	}

	/// Returns the identifier as a hex string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl std::fmt::Display for ObjectId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

impl std::str::FromStr for ObjectId {
	type Err = FixtureError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

impl Serialize for ObjectId {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(1))?;
		map.serialize_entry(OID_KEY, &self.0)?;
		map.end()
	}
}

impl<'de> Deserialize<'de> for ObjectId {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		#[derive(serde::Deserialize)]
		struct Tagged {
			#[serde(rename = "$oid")]
			oid: String,
		}

		let tagged = Tagged::deserialize(deserializer)?;
		ObjectId::new(tagged.oid).map_err(de::Error::custom)
	}
}

/// Returns true if `s` is exactly 24 lowercase hexadecimal characters.
pub fn is_object_id_hex(s: &str) -> bool {
	s.len() == 24 && s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

/// Returns the identifier hex if `value` is a tagged object identifier.
pub fn as_object_id(value: &Value) -> Option<&str> {
	let map = value.as_object()?;
	if map.len() != 1 {
		return None;
	}
	map.get(OID_KEY)?.as_str().filter(|s| is_object_id_hex(s))
}

/// Recursively replaces bare 24-hex string values with tagged identifiers.
///
/// Used by the dumper so identifier fields fetched as plain strings are
/// written back in the tagged form. Values that are already tagged are left
/// untouched; strings that are not identifier-shaped are left as strings.
pub fn tag_identifiers(value: &mut Value) {
	match value {
		Value::String(s) if is_object_id_hex(s) => {
			let hex = std::mem::take(s);
			let mut map = serde_json::Map::with_capacity(1);
			map.insert(OID_KEY.to_string(), Value::String(hex));
			*value = Value::Object(map);
		}
		Value::Array(items) => {
			for item in items {
				tag_identifiers(item);
			}
		}
		Value::Object(map) => {
			// Already-tagged identifiers must not be wrapped a second time.
			if map.len() == 1 && map.contains_key(OID_KEY) {
				return;
			}
			for item in map.values_mut() {
				tag_identifiers(item);
			}
		}
		_ => {}
	}
}
