//! Immutable records produced by the normalizer and consumed by the planner
//! and template adapter. Mirrors `spec.md` §3 exactly.

use indexmap::IndexMap;

use crate::document::Value;

/// Read-only mapping from component name to its raw schema subtree.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
	pub schemas: IndexMap<String, Value>,
}

impl ComponentRegistry {
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.schemas.get(name)
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct SchemaMetadata {
	pub required: Option<Vec<String>>,
	pub nullable: Option<bool>,
	pub r#type: String,
	pub nested_json_schema_refs: Vec<String>,
	pub nested_json_schemas: Vec<Value>,
	pub description: Option<String>,
}

impl SchemaMetadata {
	pub fn length_nested_json_schemas(&self) -> usize {
		self.nested_json_schemas.len()
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamLocation {
	Path,
	Query,
	Header,
	Cookie,
}

impl serde::Serialize for ParamLocation {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_str(self.as_str())
	}
}

impl ParamLocation {
	pub fn parse(s: &str) -> Option<Self> {
		match s {
			"path" => Some(Self::Path),
			"query" => Some(Self::Query),
			"header" => Some(Self::Header),
			"cookie" => Some(Self::Cookie),
			_ => None,
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Path => "path",
			Self::Query => "query",
			Self::Header => "header",
			Self::Cookie => "cookie",
		}
	}
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct HttpParameter {
	pub name: String,
	pub original_name: String,
	pub r#in: ParamLocation,
	pub required: bool,
	pub r#type: String,
	pub description: String,
}

/// Same shape as [`HttpParameter`], guaranteed `in = header`.
pub type HttpHeader = HttpParameter;

#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
	pub tag: String,
	pub operation_id: String,
	pub method: String,
	pub path: String,
	pub summary: String,
	pub description: String,
	pub parameters: Vec<HttpParameter>,
	pub request_body: Option<SchemaMetadata>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MethodParameter {
	pub required: bool,
	pub name: String,
	pub original_name: Option<String>,
	pub r#type: String,
	pub description: String,
}

#[derive(Debug, Clone, Default)]
pub struct OpenAPIMetadata {
	pub openapi: String,
	pub info: Value,
	pub servers: Vec<Value>,
	pub components: ComponentRegistry,
	pub tags: Vec<Value>,
	pub headers: Vec<HttpHeader>,
	pub operations: Vec<Operation>,
	pub source_file: String,
}

impl OpenAPIMetadata {
	/// `info.title`, required to be present by the schema error policy.
	pub fn title(&self) -> Option<&str> {
		self.info.get("title")?.as_str()
	}

	/// First server URL, or empty string if none are declared.
	pub fn base_url(&self) -> &str {
		self
			.servers
			.first()
			.and_then(|s| s.get("url"))
			.and_then(Value::as_str)
			.unwrap_or("")
	}

	/// Looks up a tag's `description` from the document's top-level `tags`
	/// array by comparing the tag's `name` field (spec.md §9 Open Question,
	/// resolved in favor of the intended behavior).
	pub fn tag_description(&self, tag_name: &str) -> String {
		self
			.tags
			.iter()
			.find(|t| t.get("name").and_then(Value::as_str) == Some(tag_name))
			.and_then(|t| t.get("description"))
			.and_then(Value::as_str)
			.unwrap_or("")
			.to_string()
	}
}
