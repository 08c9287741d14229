use super::*;
use indexmap::IndexMap;

fn obj(pairs: Vec<(&str, Value)>) -> Value {
	let mut m = IndexMap::new();
	for (k, v) in pairs {
		m.insert(k.to_string(), v);
	}
	Value::Object(m)
}

fn r#ref(name: &str) -> Value {
	obj(vec![("$ref", Value::String(format!("#/components/schemas/{name}")))])
}

#[test]
fn single_ref_body_resolves_to_one_nested_schema() {
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
	let registry = ComponentRegistry { schemas };
	let nested = resolve_nested_types(&r#ref("CreateUser"), &registry);
	assert_eq!(nested.len(), 1);
	assert_eq!(nested[0].get("type").unwrap().as_str(), Some("object"));
}

#[test]
fn fixed_point_after_second_walk() {
	let mut value = obj(vec![(
		"properties",
		obj(vec![("user", r#ref("User"))]),
	)]);
	let registry = {
		let mut schemas = IndexMap::new();
		schemas.insert("User".to_string(), obj(vec![("type", Value::String("object".into()))]));
		ComponentRegistry { schemas }
	};

	walk_in_place(&mut value, &registry);
	let once = value.clone();
	walk_in_place(&mut value, &registry);
	assert_eq!(once, value);

	let props = value.get("properties").unwrap().as_object().unwrap();
	assert!(props.get("user").unwrap().as_metadata().is_some());
}

#[test]
fn cyclic_component_terminates_without_overflow() {
	let mut schemas = IndexMap::new();
	schemas.insert(
		"A".to_string(),
		obj(vec![
			("type", Value::String("object".into())),
			("properties", obj(vec![("next", r#ref("A"))])),
		]),
	);
	let registry = ComponentRegistry { schemas };
	let nested = resolve_nested_types(&r#ref("A"), &registry);
	assert_eq!(nested.len(), 1);
}
