//! Ties the document loader, operation extractor, and header dedup
//! together into the root `OpenAPIMetadata` plan (mirrors
//! `OpenAPIParser.parse()` in the original implementation).

use std::path::Path;

use crate::document::RawDocument;
use crate::error::BoreaError;
use crate::model::{ComponentRegistry, OpenAPIMetadata};
use crate::operations::{dedupe_headers, extract_operations, ExtractFilter};

pub fn parse_document(path: &Path, filter: &ExtractFilter) -> Result<OpenAPIMetadata, BoreaError> {
	let doc = RawDocument::load(path)?;
	parse(&doc, path, filter)
}

pub fn parse(doc: &RawDocument, source_path: &Path, filter: &ExtractFilter) -> Result<OpenAPIMetadata, BoreaError> {
	let registry = ComponentRegistry {
		schemas: doc.components_schemas().cloned().unwrap_or_default(),
	};

	let operations = match doc.paths() {
		Some(paths) => extract_operations(paths, &registry, filter),
		None => Vec::new(),
	};
	let headers = dedupe_headers(&operations);

	let info = doc.root.get("info").cloned().unwrap_or_else(crate::document::Value::empty_object);
	if info.get("title").is_none() {
		return Err(BoreaError::MissingTitle);
	}

	let openapi = doc.root.get("openapi").and_then(crate::document::Value::as_str).unwrap_or("").to_string();
	let servers = doc
		.root
		.get("servers")
		.and_then(crate::document::Value::as_array)
		.map(<[_]>::to_vec)
		.unwrap_or_default();
	let tags = doc
		.root
		.get("tags")
		.and_then(crate::document::Value::as_array)
		.map(<[_]>::to_vec)
		.unwrap_or_default();

	Ok(OpenAPIMetadata {
		openapi,
		info,
		servers,
		components: registry,
		tags,
		headers,
		operations,
		source_file: source_path.display().to_string(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	const DOC: &str = r#"{
		"openapi": "3.0.0",
		"info": {"title": "Demo API"},
		"servers": [{"url": "https://api.example.com"}],
		"tags": [{"name": "health", "description": "liveness"}],
		"paths": {
			"/ping": {
				"get": {
					"operationId": "ping",
					"tags": ["health"],
					"parameters": []
				}
			}
		}
	}"#;

	#[test]
	fn parses_full_document() {
		let doc = RawDocument::parse(DOC, Path::new("openapi.json")).unwrap();
		let metadata = parse(&doc, Path::new("openapi.json"), &ExtractFilter { tag: "", operation_id: "" }).unwrap();
		assert_eq!(metadata.title(), Some("Demo API"));
		assert_eq!(metadata.base_url(), "https://api.example.com");
		assert_eq!(metadata.operations.len(), 1);
		assert_eq!(metadata.tag_description("health"), "liveness");
	}

	#[test]
	fn missing_title_is_fatal() {
		let doc = RawDocument::parse(r#"{"info": {}, "paths": {}}"#, Path::new("x.json")).unwrap();
		let err = parse(&doc, Path::new("x.json"), &ExtractFilter { tag: "", operation_id: "" }).unwrap_err();
		assert!(matches!(err, BoreaError::MissingTitle));
	}
}
