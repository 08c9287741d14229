//! The reference extractor (spec.md §4.3): transitively collects component
//! names reachable from a schema, terminating on cyclic component graphs.

use std::collections::HashSet;

use crate::document::Value;
use crate::model::ComponentRegistry;
use crate::resolver::component_name;

/// Collects the transitive set of component names a schema depends on, in
/// traversal order. Duplicates are permitted; a revisited component is
/// appended once but not recursed into again.
pub fn extract_refs(schema: &Value, registry: &ComponentRegistry) -> Vec<String> {
	let mut refs = Vec::new();
	let mut seen = HashSet::new();
	visit(schema, registry, &mut refs, &mut seen);
	refs
}

fn visit(schema: &Value, registry: &ComponentRegistry, refs: &mut Vec<String>, seen: &mut HashSet<String>) {
	if let Some(r#ref) = schema.get("$ref").and_then(Value::as_str) {
		let name = component_name(r#ref).to_string();
		refs.push(name.clone());
		if seen.insert(name.clone()) {
			if let Some(component) = registry.get(&name) {
				visit(component, registry, refs, seen);
			}
		}
		return;
	}

	for key in ["allOf", "oneOf", "anyOf"] {
		if let Some(Value::Array(items)) = schema.get(key) {
			for item in items {
				visit(item, registry, refs, seen);
			}
		}
	}
	if let Some(not) = schema.get("not") {
		visit(not, registry, refs, seen);
	}
}
