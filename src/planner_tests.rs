use super::*;
use crate::metadata::build_schema_metadata;
use crate::model::{ComponentRegistry, ParamLocation};
use indexmap::IndexMap;

fn obj(pairs: Vec<(&str, Value)>) -> Value {
	let mut m = IndexMap::new();
	for (k, v) in pairs {
		m.insert(k.to_string(), v);
	}
	Value::Object(m)
}

fn registry_with_create_user() -> ComponentRegistry {
	let mut schemas = IndexMap::new();
	schemas.insert(
		"CreateUser".to_string(),
		obj(vec![
			("type", Value::String("object".into())),
			(
				"properties",
				obj(vec![
					("name", obj(vec![("type", Value::String("string".into()))])),
					("age", obj(vec![("type", Value::String("integer".into()))])),
				]),
			),
			("required", Value::Array(vec![Value::String("name".into())])),
		]),
	);
	ComponentRegistry { schemas }
}

fn op_with_body(body: Option<SchemaMetadata>, parameters: Vec<HttpParameter>) -> Operation {
	Operation {
		tag: "users".into(),
		operation_id: "createUser".into(),
		method: "POST".into(),
		path: "/users".into(),
		summary: "".into(),
		description: "".into(),
		parameters,
		request_body: body,
	}
}

#[test]
fn s2_post_with_single_ref_body() {
	let registry = registry_with_create_user();
	let r#ref = obj(vec![("$ref", Value::String("#/components/schemas/CreateUser".into()))]);
	let body = build_schema_metadata(&r#ref, &registry);
	let op = op_with_body(Some(body), vec![]);

	let plan = plan_parameters(&op);
	assert_eq!(plan.required.len(), 1);
	assert_eq!(plan.required[0].name, "name");
	assert_eq!(plan.required[0].r#type, "string");
	assert_eq!(plan.optional.len(), 1);
	assert_eq!(plan.optional[0].name, "age");
	assert_eq!(plan.optional[0].r#type, "integer");
}

#[test]
fn s3_path_param_and_body_property_collision() {
	let mut schemas = IndexMap::new();
	schemas.insert(
		"UserUpdate".to_string(),
		obj(vec![
			("type", Value::String("object".into())),
			(
				"properties",
				obj(vec![("id", obj(vec![("type", Value::String("string".into()))]))]),
			),
			("required", Value::Array(vec![Value::String("id".into())])),
		]),
	);
	let registry = ComponentRegistry { schemas };
	let r#ref = obj(vec![("$ref", Value::String("#/components/schemas/UserUpdate".into()))]);
	let body = build_schema_metadata(&r#ref, &registry);

	let id_param = HttpParameter {
		name: "id".to_string(),
		original_name: "id".to_string(),
		r#in: ParamLocation::Path,
		required: true,
		r#type: "string".to_string(),
		description: "".to_string(),
	};
	let op = op_with_body(Some(body), vec![id_param]);

	let plan = plan_parameters(&op);
	let id_count = plan.required.iter().filter(|p| p.name == "id").count();
	assert_eq!(id_count, 1, "exactly one required `id`, from the HTTP parameter");
	assert!(plan.optional.iter().all(|p| p.name != "id"));
}

#[test]
fn disjointness_and_stability() {
	let registry = registry_with_create_user();
	let r#ref = obj(vec![("$ref", Value::String("#/components/schemas/CreateUser".into()))]);
	let body = build_schema_metadata(&r#ref, &registry);
	let http_required = HttpParameter {
		name: "org".to_string(),
		original_name: "org".to_string(),
		r#in: ParamLocation::Query,
		required: true,
		r#type: "string".to_string(),
		description: "".to_string(),
	};
	let op = op_with_body(Some(body), vec![http_required]);

	let plan = plan_parameters(&op);
	let required_names: Vec<_> = plan.required.iter().map(|p| p.name.as_str()).collect();
	let optional_names: Vec<_> = plan.optional.iter().map(|p| p.name.as_str()).collect();
	assert!(required_names.iter().all(|n| !optional_names.contains(n)));
	// required HTTP params precede required body params
	assert_eq!(required_names[0], "org");
	assert_eq!(required_names[1], "name");
}

#[test]
fn opaque_body_without_properties_emits_request_body_param() {
	let schema = obj(vec![("type", Value::String("string".into()))]);
	let registry = ComponentRegistry::default();
	let body = build_schema_metadata(&schema, &registry);
	let op = op_with_body(Some(body), vec![]);

	let plan = plan_parameters(&op);
	assert!(plan.required.is_empty());
	assert_eq!(plan.optional.len(), 1);
	assert_eq!(plan.optional[0].name, "request_body");
	assert_eq!(plan.optional[0].r#type, "string");
}

#[test]
fn no_body_produces_empty_plan() {
	let op = op_with_body(None, vec![]);
	let plan = plan_parameters(&op);
	assert!(plan.required.is_empty());
	assert!(plan.optional.is_empty());
}
