//! The plan-to-template adapter (spec.md §4.8): a pure projection from the
//! planner's output into render contexts. Adds no new semantics beyond
//! name normalization.

use crate::document::Value;
use crate::model::{HttpHeader, HttpParameter, MethodParameter, OpenAPIMetadata, Operation};
use crate::naming::{class_name, file_name};
use crate::planner::plan_parameters;

/// Maps a canonical type descriptor (spec.md §4.2) onto a concrete Rust
/// type. Scalars map to their obvious Rust counterpart; component names are
/// class-name-normalized (they name a generated model struct); anything
/// polymorphic (`a | b`, `a & b`, `Not[x]`) has no single Rust type, so it
/// collapses to `serde_json::Value` the way an untyped field would.
pub fn render_type(descriptor: &str) -> String {
	match descriptor {
		"string" => "String".to_string(),
		"integer" => "i64".to_string(),
		"number" => "f64".to_string(),
		"boolean" => "bool".to_string(),
		"array" => "Vec<serde_json::Value>".to_string(),
		"object" | "any" | "null" | "" => "serde_json::Value".to_string(),
		other if other.contains(" | ") || other.contains(" & ") || other.starts_with("Not[") => {
			"serde_json::Value".to_string()
		},
		other => class_name(other),
	}
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct RenderedParameter {
	pub required: bool,
	pub name: String,
	pub original_name: Option<String>,
	pub rust_type: String,
	pub description: String,
}

impl From<&MethodParameter> for RenderedParameter {
	fn from(p: &MethodParameter) -> Self {
		RenderedParameter {
			required: p.required,
			name: p.name.clone(),
			original_name: p.original_name.clone(),
			rust_type: render_type(&p.r#type),
			description: p.description.clone(),
		}
	}
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct HandlerContext {
	pub parent_class_name: String,
	pub parent_filename: String,
	pub class_name: String,
	pub method_name: String,
	pub description: String,
	pub required_params: Vec<RenderedParameter>,
	pub optional_params: Vec<RenderedParameter>,
	pub http_method: String,
	pub path: String,
	pub http_params: Vec<HttpParameter>,
}

pub fn build_handler_context(operation: &Operation, parent_class_name: &str, parent_filename: &str) -> HandlerContext {
	let plan = plan_parameters(operation);
	let handler_name = file_name(&operation.operation_id);
	HandlerContext {
		parent_class_name: parent_class_name.to_string(),
		parent_filename: parent_filename.to_string(),
		class_name: class_name(&operation.operation_id),
		method_name: handler_name,
		description: if operation.description.is_empty() {
			operation.summary.clone()
		} else {
			operation.description.clone()
		},
		required_params: plan.required.iter().map(RenderedParameter::from).collect(),
		optional_params: plan.optional.iter().map(RenderedParameter::from).collect(),
		http_method: operation.method.clone(),
		path: operation.path.clone(),
		http_params: operation.parameters.clone(),
	}
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct OperationSummary {
	pub handler_class_name: String,
	pub handler_filename: String,
	pub method_name: String,
	pub summary: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct TagContext {
	pub parent_class_name: String,
	pub parent_filename: String,
	pub tag_dir: String,
	pub class_name: String,
	pub description: String,
	pub operations: Vec<OperationSummary>,
}

pub fn build_tag_context(tag: &str, operations: &[&Operation], metadata: &OpenAPIMetadata, root_class_name: &str, root_filename: &str) -> TagContext {
	let tag_dir = file_name(tag);
	TagContext {
		parent_class_name: root_class_name.to_string(),
		parent_filename: root_filename.to_string(),
		tag_dir: tag_dir.clone(),
		class_name: class_name(tag),
		description: metadata.tag_description(tag),
		operations: operations
			.iter()
			.map(|op| OperationSummary {
				handler_class_name: class_name(&op.operation_id),
				handler_filename: file_name(&op.operation_id),
				method_name: file_name(&op.operation_id),
				summary: op.summary.clone(),
			})
			.collect(),
	}
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct TagSummary {
	pub tag_dir: String,
	pub class_name: String,
	pub filename: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct RootContext {
	pub class_name: String,
	pub filename: String,
	pub base_url: String,
	pub headers: Vec<HttpHeader>,
	pub tags: Vec<TagSummary>,
}

pub fn build_root_context(metadata: &OpenAPIMetadata, tag_names_in_order: &[String]) -> RootContext {
	let title = metadata.title().unwrap_or("api");
	RootContext {
		class_name: class_name(title),
		filename: file_name(title),
		base_url: metadata.base_url().to_string(),
		headers: metadata.headers.clone(),
		tags: tag_names_in_order
			.iter()
			.map(|tag| TagSummary {
				tag_dir: file_name(tag),
				class_name: class_name(tag),
				filename: file_name(tag),
			})
			.collect(),
	}
}

/// Thin per-component schema wrapper context. Actual schema-to-record
/// translation is delegated to an external model-file generator (out of
/// scope); this adapter only supplies the normalized names that generator
/// would need.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SchemaContext {
	pub class_name: String,
	pub filename: String,
	#[serde(skip)]
	pub raw: Value,
}

pub fn build_schema_context(name: &str, schema: &Value) -> SchemaContext {
	SchemaContext {
		class_name: class_name(name),
		filename: file_name(name),
		raw: schema.clone(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use test_case::test_case;

	#[test_case("string", "String")]
	#[test_case("integer", "i64")]
	#[test_case("User", "User")]
	#[test_case("A | null", "serde_json::Value")]
	#[test_case("Not[string]", "serde_json::Value")]
	fn type_rendering(descriptor: &str, expected: &str) {
		assert_eq!(render_type(descriptor), expected);
	}
}
