//! The nested-type walker (spec.md §4.5): discovers concrete sub-schemas
//! beneath a schema, and mutates the schema tree in place so that every
//! `$ref` / combinator node is replaced by a [`Value::Metadata`] node.

use std::collections::HashSet;

use crate::document::Value;
use crate::metadata::build_schema_metadata_seeded;
use crate::model::ComponentRegistry;
use crate::resolver::{component_name, is_combinator};

/// Produces the list of concrete, resolved sub-schemas discovered beneath
/// `schema`, starting a fresh cycle-detection pass.
pub fn resolve_nested_types(schema: &Value, registry: &ComponentRegistry) -> Vec<Value> {
	resolve_nested_types_seeded(schema, registry, &mut HashSet::new())
}

pub(crate) fn resolve_nested_types_seeded(
	schema: &Value,
	registry: &ComponentRegistry,
	seen: &mut HashSet<String>,
) -> Vec<Value> {
	let mut out = Vec::new();

	if schema.has_key("type") {
		let mut walked = schema.clone();
		walk_in_place_seeded(&mut walked, registry, seen);
		out.push(walked);
	}

	if let Some(r#ref) = schema.get("$ref").and_then(Value::as_str) {
		let name = component_name(r#ref).to_string();
		if seen.insert(name.clone()) {
			if let Some(component) = registry.get(&name) {
				out.extend(resolve_nested_types_seeded(component, registry, seen));
			}
			// unresolved $ref: skip silently, per spec.md §4.5 step 2.
		}
		// already-visited component: cycle guard, don't recurse again.
	}

	for key in ["allOf", "oneOf", "anyOf"] {
		if let Some(Value::Array(items)) = schema.get(key) {
			for item in items {
				out.extend(resolve_nested_types_seeded(item, registry, seen));
			}
		}
	}
	if let Some(not) = schema.get("not") {
		out.extend(resolve_nested_types_seeded(not, registry, seen));
	}

	out
}

/// Rewrites every descendant mapping of `value` that carries `$ref` /
/// `allOf` / `oneOf` / `anyOf` / `not` into a [`Value::Metadata`] node,
/// bottom-up. `value` itself is never replaced, only its descendants.
pub fn walk_in_place(value: &mut Value, registry: &ComponentRegistry) {
	walk_in_place_seeded(value, registry, &mut HashSet::new());
}

pub(crate) fn walk_in_place_seeded(value: &mut Value, registry: &ComponentRegistry, seen: &mut HashSet<String>) {
	match value {
		Value::Object(map) => {
			for child in map.values_mut() {
				replace_if_combinator(child, registry, seen);
			}
		},
		Value::Array(items) => {
			for item in items.iter_mut() {
				replace_if_combinator(item, registry, seen);
			}
		},
		_ => {},
	}
}

fn replace_if_combinator(value: &mut Value, registry: &ComponentRegistry, seen: &mut HashSet<String>) {
	walk_in_place_seeded(value, registry, seen);
	if matches!(value, Value::Object(_)) && is_combinator(value) {
		let metadata = build_schema_metadata_seeded(value, registry, seen);
		*value = Value::Metadata(Box::new(metadata));
	}
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
