//! The OpenAPI document as a dynamically-typed, order-preserving tree.

use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};

use crate::error::BoreaError;
use crate::model::SchemaMetadata;

/// A single node of the document tree.
///
/// Unlike `serde_json::Value`, integers and floats are kept distinct, and
/// object iteration order always matches the order keys first appeared in
/// the source document — later stages (tag aggregation, operation
/// extraction) rely on that order to produce reproducible output.
///
/// `Metadata` never appears in a freshly-loaded document: it is the node
/// the nested-type walker (spec.md §4.5) substitutes in place of a `$ref`
/// or combinator subtree once that subtree has been resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Null,
	Bool(bool),
	Integer(i64),
	Float(f64),
	String(String),
	Array(Vec<Value>),
	Object(IndexMap<String, Value>),
	Metadata(Box<SchemaMetadata>),
}

impl Value {
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Value::Bool(b) => Some(*b),
			_ => None,
		}
	}

	pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
		match self {
			Value::Object(m) => Some(m),
			_ => None,
		}
	}

	pub fn as_object_mut(&mut self) -> Option<&mut IndexMap<String, Value>> {
		match self {
			Value::Object(m) => Some(m),
			_ => None,
		}
	}

	pub fn as_array(&self) -> Option<&[Value]> {
		match self {
			Value::Array(a) => Some(a),
			_ => None,
		}
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.as_object().and_then(|m| m.get(key))
	}

	pub fn has_key(&self, key: &str) -> bool {
		self.as_object().is_some_and(|m| m.contains_key(key))
	}

	pub fn is_truthy(&self) -> bool {
		match self {
			Value::Null => false,
			Value::Bool(b) => *b,
			Value::Array(a) => !a.is_empty(),
			Value::Object(m) => !m.is_empty(),
			_ => true,
		}
	}

	pub fn empty_object() -> Value {
		Value::Object(IndexMap::new())
	}

	pub fn as_metadata(&self) -> Option<&SchemaMetadata> {
		match self {
			Value::Metadata(m) => Some(m),
			_ => None,
		}
	}

	/// Description of this node, whether it's a raw schema object or a
	/// resolved [`SchemaMetadata`] node.
	pub fn description(&self) -> Option<&str> {
		match self {
			Value::Metadata(m) => m.description.as_deref(),
			_ => self.get("description").and_then(Value::as_str),
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Null => write!(f, "null"),
			Value::Bool(b) => write!(f, "{b}"),
			Value::Integer(n) => write!(f, "{n}"),
			Value::Float(n) => write!(f, "{n}"),
			Value::String(s) => write!(f, "{s}"),
			Value::Array(_) => write!(f, "[array]"),
			Value::Object(_) => write!(f, "[object]"),
			Value::Metadata(m) => write!(f, "[schema {}]", m.r#type),
		}
	}
}

impl serde::Serialize for Value {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		use serde::ser::{SerializeMap, SerializeSeq};
		match self {
			Value::Null => serializer.serialize_unit(),
			Value::Bool(b) => serializer.serialize_bool(*b),
			Value::Integer(n) => serializer.serialize_i64(*n),
			Value::Float(n) => serializer.serialize_f64(*n),
			Value::String(s) => serializer.serialize_str(s),
			Value::Array(items) => {
				let mut seq = serializer.serialize_seq(Some(items.len()))?;
				for item in items {
					seq.serialize_element(item)?;
				}
				seq.end()
			},
			Value::Object(map) => {
				let mut out = serializer.serialize_map(Some(map.len()))?;
				for (k, v) in map {
					out.serialize_entry(k, v)?;
				}
				out.end()
			},
			// Never present in a freshly-loaded or verbatim-copied document;
			// serialized as its resolved type descriptor as a fallback.
			Value::Metadata(m) => serializer.serialize_str(&m.r#type),
		}
	}
}

impl<'de> Deserialize<'de> for Value {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		struct ValueVisitor;

		impl<'de> Visitor<'de> for ValueVisitor {
			type Value = Value;

			fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str("a JSON value")
			}

			fn visit_bool<E>(self, v: bool) -> Result<Value, E> {
				Ok(Value::Bool(v))
			}

			fn visit_i64<E>(self, v: i64) -> Result<Value, E> {
				Ok(Value::Integer(v))
			}

			fn visit_u64<E>(self, v: u64) -> Result<Value, E> {
				match i64::try_from(v) {
					Ok(n) => Ok(Value::Integer(n)),
					Err(_) => Ok(Value::Float(v as f64)),
				}
			}

			fn visit_f64<E>(self, v: f64) -> Result<Value, E> {
				Ok(Value::Float(v))
			}

			fn visit_str<E>(self, v: &str) -> Result<Value, E> {
				Ok(Value::String(v.to_string()))
			}

			fn visit_string<E>(self, v: String) -> Result<Value, E> {
				Ok(Value::String(v))
			}

			fn visit_none<E>(self) -> Result<Value, E> {
				Ok(Value::Null)
			}

			fn visit_unit<E>(self) -> Result<Value, E> {
				Ok(Value::Null)
			}

			fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
			where
				D: Deserializer<'de>,
			{
				Deserialize::deserialize(deserializer)
			}

			fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
			where
				A: SeqAccess<'de>,
			{
				let mut out = Vec::with_capacity(seq.size_hint().unwrap_or(0));
				while let Some(elem) = seq.next_element()? {
					out.push(elem);
				}
				Ok(Value::Array(out))
			}

			fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
			where
				A: MapAccess<'de>,
			{
				let mut out = IndexMap::with_capacity(map.size_hint().unwrap_or(0));
				while let Some((key, value)) = map.next_entry::<String, Value>()? {
					out.insert(key, value);
				}
				Ok(Value::Object(out))
			}
		}

		deserializer.deserialize_any(ValueVisitor)
	}
}

/// The decoded OpenAPI document. Read-only except for the in-place
/// replacement the nested-type walker performs inside operation subtrees.
#[derive(Debug, Clone)]
pub struct RawDocument {
	pub root: Value,
}

impl RawDocument {
	/// Reads and parses a JSON file from a local path.
	///
	/// Fails with [`BoreaError::Io`] on missing/unreadable files and
	/// [`BoreaError::Parse`] on malformed JSON.
	pub fn load(path: &Path) -> Result<Self, BoreaError> {
		let contents = fs_err::read_to_string(path).map_err(|e| BoreaError::Io {
			path: path.display().to_string(),
			source: e.into(),
		})?;
		Self::parse(&contents, path)
	}

	pub fn parse(contents: &str, path: &Path) -> Result<Self, BoreaError> {
		let mut de = serde_json::Deserializer::from_str(contents);
		let root: Value = serde_path_to_error::deserialize(&mut de).map_err(|e| BoreaError::Parse {
			path: path.display().to_string(),
			source: e.to_string(),
		})?;
		Ok(RawDocument { root })
	}

	pub fn components_schemas(&self) -> Option<&IndexMap<String, Value>> {
		self.root.get("components")?.get("schemas")?.as_object()
	}

	pub fn paths(&self) -> Option<&IndexMap<String, Value>> {
		self.root.get("paths")?.as_object()
	}
}
