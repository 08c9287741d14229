//! The operation extractor (spec.md §4.6): iterates paths × methods and
//! yields `Operation` records, plus the header-deduplication post-pass.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::document::Value;
use crate::metadata::build_schema_metadata;
use crate::model::{ComponentRegistry, HttpHeader, HttpParameter, Operation, ParamLocation};
use crate::naming::parameter_name;
use crate::resolver::resolve_type;

const HTTP_METHODS: [&str; 7] = ["get", "put", "post", "delete", "options", "head", "patch"];

pub struct ExtractFilter<'a> {
	pub tag: &'a str,
	pub operation_id: &'a str,
}

/// Iterates `paths` in document order (and methods within each path in
/// document order), filtering by tag/operation-id, and parses each matching
/// operation.
pub fn extract_operations(
	paths: &indexmap::IndexMap<String, Value>,
	registry: &ComponentRegistry,
	filter: &ExtractFilter,
) -> Vec<Operation> {
	let mut operations = Vec::new();

	for (path, methods) in paths {
		let Some(methods) = methods.as_object() else {
			continue;
		};
		for (method, details) in methods {
			if !HTTP_METHODS.contains(&method.as_str()) {
				continue;
			}
			let Some(operation_id) = details.get("operationId").and_then(Value::as_str) else {
				debug!(path, method, "skipping operation without operationId");
				continue;
			};
			if !filter.tag.is_empty() && !has_tag(details, filter.tag) {
				continue;
			}
			if !filter.operation_id.is_empty() && filter.operation_id != operation_id {
				continue;
			}
			operations.push(parse_operation(path, method, operation_id, details, registry));
		}
	}

	operations
}

fn has_tag(details: &Value, tag: &str) -> bool {
	details
		.get("tags")
		.and_then(Value::as_array)
		.map(|tags| tags.iter().filter_map(Value::as_str).any(|t| t == tag))
		.unwrap_or(false)
}

fn parse_operation(path: &str, method: &str, operation_id: &str, details: &Value, registry: &ComponentRegistry) -> Operation {
	let tag = details
		.get("tags")
		.and_then(Value::as_array)
		.and_then(|tags| tags.first())
		.and_then(Value::as_str)
		.unwrap_or("")
		.to_string();

	let parameters = details
		.get("parameters")
		.and_then(Value::as_array)
		.unwrap_or(&[])
		.iter()
		.filter_map(|p| parse_parameter(p))
		.collect();

	let request_body = details
		.get("requestBody")
		.and_then(|rb| rb.get("content"))
		.and_then(|c| c.get("application/json"))
		.and_then(|mt| mt.get("schema"))
		.map(|schema| build_schema_metadata(schema, registry));

	Operation {
		tag,
		operation_id: operation_id.to_string(),
		method: method.to_uppercase(),
		path: path.to_string(),
		summary: details.get("summary").and_then(Value::as_str).unwrap_or("").to_string(),
		description: details
			.get("description")
			.and_then(Value::as_str)
			.unwrap_or("")
			.to_string(),
		parameters,
		request_body,
	}
}

fn parse_parameter(param: &Value) -> Option<HttpParameter> {
	let name = param.get("name").and_then(Value::as_str)?;
	let location = param.get("in").and_then(Value::as_str).and_then(ParamLocation::parse);
	let Some(location) = location else {
		warn!(name, "skipping parameter with unknown `in`");
		return None;
	};
	let schema = param.get("schema").cloned().unwrap_or_else(Value::empty_object);
	Some(HttpParameter {
		name: parameter_name(name),
		original_name: name.to_string(),
		r#in: location,
		required: param.get("required").and_then(Value::as_bool).unwrap_or(false),
		r#type: resolve_type(&schema),
		description: param.get("description").and_then(Value::as_str).unwrap_or("").to_string(),
	})
}

/// Deduplicates header parameters across the full operation set by
/// (cleaned `name`, `in`); first occurrence wins. Keying on the cleaned
/// name (rather than the verbatim wire name) matches spec.md's dedup
/// invariant: two wire-distinct headers that normalize to the same
/// identifier (e.g. `X-Tenant` and `X.Tenant`) must collapse to one
/// emitted field, since both land on the same generated struct member.
pub fn dedupe_headers(operations: &[Operation]) -> Vec<HttpHeader> {
	let mut seen = HashSet::new();
	let mut headers = Vec::new();
	for op in operations {
		for param in &op.parameters {
			if param.r#in != ParamLocation::Header {
				continue;
			}
			let key = (param.name.clone(), param.r#in);
			if seen.insert(key) {
				headers.push(param.clone());
			}
		}
	}
	headers
}

#[cfg(test)]
mod tests {
	use super::*;
	use indexmap::IndexMap;

	fn obj(pairs: Vec<(&str, Value)>) -> Value {
		let mut m = IndexMap::new();
		for (k, v) in pairs {
			m.insert(k.to_string(), v);
		}
		Value::Object(m)
	}

	fn ping_path() -> IndexMap<String, Value> {
		let mut paths = IndexMap::new();
		paths.insert(
			"/ping".to_string(),
			obj(vec![(
				"get",
				obj(vec![
					("operationId", Value::String("ping".into())),
					("tags", Value::Array(vec![Value::String("health".into())])),
				]),
			)]),
		);
		paths
	}

	#[test]
	fn single_get_no_body() {
		let paths = ping_path();
		let registry = ComponentRegistry::default();
		let ops = extract_operations(&paths, &registry, &ExtractFilter { tag: "", operation_id: "" });
		assert_eq!(ops.len(), 1);
		assert_eq!(ops[0].operation_id, "ping");
		assert_eq!(ops[0].tag, "health");
		assert!(ops[0].request_body.is_none());
		assert!(ops[0].parameters.is_empty());
	}

	#[test]
	fn missing_operation_id_is_skipped_silently() {
		let mut paths = IndexMap::new();
		paths.insert("/x".to_string(), obj(vec![("get", Value::empty_object())]));
		let registry = ComponentRegistry::default();
		let ops = extract_operations(&paths, &registry, &ExtractFilter { tag: "", operation_id: "" });
		assert!(ops.is_empty());
	}

	#[test]
	fn operation_id_filter_selects_exactly_one() {
		let paths = ping_path();
		let registry = ComponentRegistry::default();
		let ops = extract_operations(
			&paths,
			&registry,
			&ExtractFilter {
				tag: "",
				operation_id: "ping",
			},
		);
		assert_eq!(ops.len(), 1);

		let none = extract_operations(
			&paths,
			&registry,
			&ExtractFilter {
				tag: "",
				operation_id: "missing",
			},
		);
		assert!(none.is_empty());
	}

	#[test]
	fn header_dedup_keeps_first_occurrence() {
		let header = |desc: &str| HttpParameter {
			name: "x_tenant".to_string(),
			original_name: "X-Tenant".to_string(),
			r#in: ParamLocation::Header,
			required: true,
			r#type: "string".to_string(),
			description: desc.to_string(),
		};
		let op1 = Operation {
			tag: "a".into(),
			operation_id: "op1".into(),
			method: "GET".into(),
			path: "/a".into(),
			summary: "".into(),
			description: "".into(),
			parameters: vec![header("first")],
			request_body: None,
		};
		let op2 = Operation {
			parameters: vec![header("second")],
			operation_id: "op2".into(),
			..op1.clone()
		};
		let headers = dedupe_headers(&[op1, op2]);
		assert_eq!(headers.len(), 1);
		assert_eq!(headers[0].description, "first");
	}
}
