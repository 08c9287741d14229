//! The type resolver (spec.md §4.2): reduces a schema subtree to a single
//! canonical type descriptor string. Does not recurse into `properties` or
//! `items` — that's the walker's job.

use crate::document::Value;

const COMBINATOR_KEYS: [&str; 4] = ["allOf", "oneOf", "anyOf", "not"];

pub fn is_combinator(schema: &Value) -> bool {
	schema.has_key("$ref") || COMBINATOR_KEYS.iter().any(|k| schema.has_key(k))
}

/// Resolves a schema subtree to its canonical type descriptor.
///
/// Rules are applied in order, first match wins:
/// 1. `$ref` -> last path segment of the reference.
/// 2. `allOf` -> descriptors joined by ` & `.
/// 3. `oneOf` / `anyOf` -> both lists concatenated (oneOf first), joined by ` | `.
/// 4. `not` -> `Not[<inner>]`.
/// 5. otherwise the schema's `type` field, or `any` if absent.
pub fn resolve_type(schema: &Value) -> String {
	if let Some(r#ref) = schema.get("$ref").and_then(Value::as_str) {
		return component_name(r#ref).to_string();
	}

	if let Some(Value::Array(all_of)) = schema.get("allOf") {
		return all_of.iter().map(resolve_type).collect::<Vec<_>>().join(" & ");
	}

	let has_one_of = schema.has_key("oneOf");
	let has_any_of = schema.has_key("anyOf");
	if has_one_of || has_any_of {
		let one_of = schema
			.get("oneOf")
			.and_then(Value::as_array)
			.unwrap_or(&[]);
		let any_of = schema
			.get("anyOf")
			.and_then(Value::as_array)
			.unwrap_or(&[]);
		return one_of
			.iter()
			.chain(any_of.iter())
			.map(resolve_type)
			.collect::<Vec<_>>()
			.join(" | ");
	}

	if let Some(not) = schema.get("not") {
		return format!("Not[{}]", resolve_type(not));
	}

	schema
		.get("type")
		.and_then(Value::as_str)
		.unwrap_or("any")
		.to_string()
}

/// Last path segment of a `#/components/schemas/<Name>` style reference.
pub fn component_name(r#ref: &str) -> &str {
	r#ref.rsplit('/').next().unwrap_or(r#ref)
}
