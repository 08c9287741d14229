//! The parameter planner (spec.md §4.7): partitions an operation's
//! parameters into required/optional method parameters, merging HTTP
//! parameters with flattened request-body schema properties.

use crate::document::Value;
use crate::model::{HttpParameter, MethodParameter, Operation, SchemaMetadata};

const DEFAULT_DESCRIPTION: &str = "No description provided";

/// Either a concrete schema subtree or the [`SchemaMetadata`] wrapper around
/// one — whichever the single-nested-body unwrap in step 1 produced.
enum EffectiveSchema<'a> {
	Value(&'a Value),
	Metadata(&'a SchemaMetadata),
}

impl<'a> EffectiveSchema<'a> {
	fn properties(&self) -> Option<&'a indexmap::IndexMap<String, Value>> {
		match self {
			EffectiveSchema::Value(v) => v.get("properties").and_then(Value::as_object),
			EffectiveSchema::Metadata(_) => None,
		}
	}

	fn required_names(&self) -> Vec<&'a str> {
		match self {
			EffectiveSchema::Value(v) => v
				.get("required")
				.and_then(Value::as_array)
				.unwrap_or(&[])
				.iter()
				.filter_map(Value::as_str)
				.collect(),
			EffectiveSchema::Metadata(m) => m
				.required
				.as_deref()
				.unwrap_or(&[])
				.iter()
				.map(String::as_str)
				.collect(),
		}
	}

	fn is_required_truthy(&self) -> bool {
		!self.required_names().is_empty()
	}

	fn type_descriptor(&self) -> String {
		match self {
			EffectiveSchema::Value(v) => crate::resolver::resolve_type(v),
			EffectiveSchema::Metadata(m) => m.r#type.clone(),
		}
	}

	fn description(&self) -> Option<&'a str> {
		match self {
			EffectiveSchema::Value(v) => v.description(),
			EffectiveSchema::Metadata(m) => m.description.as_deref(),
		}
	}
}

/// Output of the planner for a single operation.
pub struct ParameterPlan {
	pub required: Vec<MethodParameter>,
	pub optional: Vec<MethodParameter>,
}

pub fn plan_parameters(operation: &Operation) -> ParameterPlan {
	let effective = flatten_body(operation.request_body.as_ref());

	let mut required: Vec<MethodParameter> = operation
		.parameters
		.iter()
		.filter(|p| p.required)
		.map(method_param_from_http)
		.collect();
	let mut optional: Vec<MethodParameter> = operation
		.parameters
		.iter()
		.filter(|p| !p.required)
		.map(method_param_from_http)
		.collect();

	let http_param_names: Vec<&str> = operation.parameters.iter().map(|p| p.name.as_str()).collect();

	if let Some(effective) = &effective {
		if let Some(properties) = effective.properties() {
			let schema_required = effective.required_names();
			for (name, prop) in properties {
				if http_param_names.contains(&name.as_str()) {
					continue;
				}
				let is_required = schema_required.contains(&name.as_str()) || property_self_required(prop);
				let method_param = method_param_from_property(name, prop, effective.description(), is_required);
				if is_required {
					required.push(method_param);
				} else {
					optional.push(method_param);
				}
			}
		} else {
			let method_param = MethodParameter {
				required: effective.is_required_truthy(),
				name: "request_body".to_string(),
				original_name: None,
				r#type: effective.type_descriptor(),
				description: effective.description().unwrap_or("Request body").to_string(),
			};
			if effective.is_required_truthy() {
				required.push(method_param);
			} else {
				optional.push(method_param);
			}
		}
	}

	ParameterPlan { required, optional }
}

/// Step 1: if the body has exactly one nested schema, unwrap to it.
fn flatten_body(body: Option<&SchemaMetadata>) -> Option<EffectiveSchema<'_>> {
	let body = body?;
	if body.length_nested_json_schemas() == 1 {
		Some(EffectiveSchema::Value(&body.nested_json_schemas[0]))
	} else {
		Some(EffectiveSchema::Metadata(body))
	}
}

fn method_param_from_http(param: &HttpParameter) -> MethodParameter {
	MethodParameter {
		required: param.required,
		name: param.name.clone(),
		original_name: Some(param.original_name.clone()),
		r#type: param.r#type.clone(),
		description: param.description.clone(),
	}
}

/// `property.required == true` — a literal boolean on the property node
/// itself, distinct from the enclosing schema's `required` name list.
/// (spec.md §9 Open Question: kept as literal equality, not Python's
/// truthy-list reading of the same field.)
fn property_self_required(prop: &Value) -> bool {
	matches!(prop.get("required"), Some(Value::Bool(true)))
}

fn method_param_from_property(name: &str, prop: &Value, enclosing_description: Option<&str>, required: bool) -> MethodParameter {
	let description = prop
		.description()
		.map(str::to_string)
		.or_else(|| {
			prop
				.as_metadata()
				.and_then(|m| m.nested_json_schemas.first())
				.and_then(Value::description)
				.map(str::to_string)
		})
		.or_else(|| enclosing_description.map(str::to_string))
		.unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());

	MethodParameter {
		required,
		name: name.to_string(),
		original_name: None,
		r#type: resolve_property_type(prop),
		description,
	}
}

fn resolve_property_type(prop: &Value) -> String {
	match prop.as_metadata() {
		Some(m) => m.r#type.clone(),
		None => crate::resolver::resolve_type(prop),
	}
}

#[cfg(test)]
#[path = "planner_tests.rs"]
mod tests;
