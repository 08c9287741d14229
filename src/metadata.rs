//! The schema metadata builder (spec.md §4.4).

use std::collections::HashSet;

use crate::document::Value;
use crate::model::{ComponentRegistry, SchemaMetadata};
use crate::refs::extract_refs;
use crate::resolver::resolve_type;
use crate::walker::resolve_nested_types_seeded;

/// Builds a [`SchemaMetadata`] for `schema`, starting a fresh cycle-detection
/// pass. Use this from call sites outside the walker (operation parsing,
/// request-body flattening).
pub fn build_schema_metadata(schema: &Value, registry: &ComponentRegistry) -> SchemaMetadata {
	build_schema_metadata_seeded(schema, registry, &mut HashSet::new())
}

/// Same as [`build_schema_metadata`], but shares the walker's visited-component
/// set so a cyclic component graph terminates instead of recursing forever
/// (spec.md §4.5 "Cycle safety").
pub(crate) fn build_schema_metadata_seeded(
	schema: &Value,
	registry: &ComponentRegistry,
	seen: &mut HashSet<String>,
) -> SchemaMetadata {
	let required = schema
		.get("required")
		.and_then(Value::as_array)
		.map(|items| items.iter().filter_map(Value::as_str).map(str::to_string).collect());
	let nullable = schema.get("nullable").and_then(Value::as_bool);
	let description = schema.get("description").and_then(Value::as_str).map(str::to_string);

	SchemaMetadata {
		required,
		nullable,
		r#type: resolve_type(schema),
		nested_json_schema_refs: extract_refs(schema, registry),
		nested_json_schemas: resolve_nested_types_seeded(schema, registry, seen),
		description,
	}
}
