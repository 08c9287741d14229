//! The output orchestrator (spec.md §6): walks the resolved plan and writes
//! the generated file tree, respecting the `ignores` glob list and the
//! layout spec.md §6 pins down. Mirrors the sequencing the teacher's
//! `agentgateway-app` binary applies around its own config/run split: load,
//! build, then a single write-everything pass, with errors annotated with
//! the stage that produced them.

use std::path::{Path, PathBuf};

use glob::Pattern;
use indexmap::IndexMap;
use tracing::{info, instrument, warn};

use crate::adapter::{build_handler_context, build_root_context, build_schema_context, build_tag_context};
use crate::aggregator::group_by_tag;
use crate::config::ResolvedConfig;
use crate::document::{RawDocument, Value};
use crate::error::BoreaError;
use crate::model::OpenAPIMetadata;
use crate::naming::{class_name, file_name};
use crate::render::Renderer;

pub struct Orchestrator<'a> {
	config: &'a ResolvedConfig,
	renderer: Renderer,
	ignores: Vec<Pattern>,
}

impl<'a> Orchestrator<'a> {
	pub fn new(config: &'a ResolvedConfig) -> Result<Self, BoreaError> {
		let ignores = config
			.ignores
			.iter()
			.filter_map(|pattern| match Pattern::new(pattern) {
				Ok(p) => Some(p),
				Err(e) => {
					warn!(pattern, %e, "ignoring malformed glob in config");
					None
				},
			})
			.collect();
		Ok(Self {
			config,
			renderer: Renderer::new()?,
			ignores,
		})
	}

	fn is_ignored(&self, relative: &Path) -> bool {
		self.ignores.iter().any(|p| p.matches_path(relative))
	}

	#[instrument(skip_all, fields(sdk_output = %self.config.sdk_output.display()))]
	pub fn run(&self, metadata: &OpenAPIMetadata, document: &RawDocument) -> anyhow::Result<()> {
		let root = &self.config.sdk_output;
		let tag_buckets = group_by_tag(&metadata.operations, &metadata.tags);
		let tag_names: Vec<String> = tag_buckets.keys().cloned().collect();
		let root_ctx = build_root_context(metadata, &tag_names);

		self.write(root, Path::new("requirements.toml"), &manifest(&root_ctx.class_name))?;
		self.write_openapi_copy(root, document)?;

		self.write(
			root,
			Path::new("src").join(format!("{}.rs", root_ctx.filename)).as_path(),
			&self.renderer.render_root(&root_ctx)?,
		)?;

		for (tag, ops) in &tag_buckets {
			self.write_tag(root, metadata, tag, ops, &root_ctx.class_name, &root_ctx.filename)?;
		}

		for (name, schema) in &metadata.components.schemas {
			self.write_schema(root, name, schema)?;
		}

		info!(tags = tag_buckets.len(), operations = metadata.operations.len(), "generation complete");
		Ok(())
	}

	#[instrument(skip_all, fields(tag))]
	fn write_tag(
		&self,
		root: &Path,
		metadata: &OpenAPIMetadata,
		tag: &str,
		ops: &[&crate::model::Operation],
		root_class_name: &str,
		root_filename: &str,
	) -> anyhow::Result<()> {
		let tag_ctx = build_tag_context(tag, ops, metadata, root_class_name, root_filename);
		let tag_path = Path::new("src").join(&tag_ctx.tag_dir);

		self
			.write(root, &tag_path.join(format!("{}.rs", tag_ctx.tag_dir)), &self.renderer.render_tag(&tag_ctx)?)
			.map_err(|e| anyhow::anyhow!("tag `{tag}`: {e}"))?;

		for op in ops {
			let handler_ctx = build_handler_context(op, root_class_name, root_filename);
			let op_dir = tag_path.join(&handler_ctx.method_name);
			self
				.write(root, &op_dir.join(format!("{}.rs", handler_ctx.method_name)), &self.renderer.render_handler(&handler_ctx)?)
				.map_err(|e| anyhow::anyhow!("operation `{}`: {e}", op.operation_id))?;

			if self.config.tests {
				let test_path = Path::new("tests").join(&tag_ctx.tag_dir).join(&handler_ctx.method_name);
				self.write(
					root,
					&test_path.join(format!("{}_test.rs", handler_ctx.method_name)),
					&self.renderer.render_handler_test(&handler_ctx)?,
				)?;
			}
		}
		Ok(())
	}

	fn write_schema(&self, root: &Path, name: &str, schema: &Value) -> anyhow::Result<()> {
		let ctx = build_schema_context(name, schema);
		let path = self.config.models_output.join(format!("{}.rs", ctx.filename));
		self.write(root, &path, &self.renderer.render_schema(&ctx)?)?;
		Ok(())
	}

	fn write_openapi_copy(&self, root: &Path, document: &RawDocument) -> anyhow::Result<()> {
		let annotated = if self.config.x_code_samples {
			annotate_code_samples(document.root.clone())
		} else {
			document.root.clone()
		};
		let json = serde_json::to_string_pretty(&annotated)?;
		self.write(root, Path::new("openapi.json"), &json)?;
		Ok(())
	}

	fn write(&self, root: &Path, relative: &Path, contents: &str) -> Result<(), BoreaError> {
		if self.is_ignored(relative) {
			info!(path = %relative.display(), "skipping write, matched an ignore glob");
			return Ok(());
		}
		let full = root.join(relative);
		if let Some(parent) = full.parent() {
			fs_err::create_dir_all(parent).map_err(|e| BoreaError::Io {
				path: parent.display().to_string(),
				source: e.into(),
			})?;
		}
		fs_err::write(&full, contents).map_err(|e| BoreaError::Io {
			path: full.display().to_string(),
			source: e.into(),
		})
	}
}

/// `requirements.<ext>` for a Rust target: a dependency-manifest fragment
/// naming the crates the generated SDK needs at runtime.
fn manifest(sdk_class_name: &str) -> String {
	format!(
		"# dependencies generated SDK `{sdk_class_name}` requires\nreqwest = {{ version = \"0.12\", features = [\"json\"] }}\nserde = {{ version = \"1\", features = [\"derive\"] }}\nserde_json = \"1\"\nanyhow = \"1\"\ntokio = {{ version = \"1\", features = [\"rt-multi-thread\", \"macros\"] }}\n"
	)
}

/// Annotates each operation in a cloned document tree with an
/// `x-codeSamples` array containing a single Rust usage snippet, the
/// supplemental feature recovered from `original_source/` (spec.md §6).
fn annotate_code_samples(mut root: Value) -> Value {
	let Some(paths) = root.as_object_mut().and_then(|m| m.get_mut("paths")).and_then(Value::as_object_mut) else {
		return root;
	};
	for (_path, methods) in paths.iter_mut() {
		let Some(methods) = methods.as_object_mut() else {
			continue;
		};
		for (_method, details) in methods.iter_mut() {
			let Some(details) = details.as_object_mut() else {
				continue;
			};
			let Some(Value::String(operation_id)) = details.get("operationId").cloned() else {
				continue;
			};
			let sample = format!("client.{}().{}(args).await?;", method_group(details), file_name(&operation_id));
			let mut sample_obj = IndexMap::new();
			sample_obj.insert("lang".to_string(), Value::String("rust".to_string()));
			sample_obj.insert("source".to_string(), Value::String(sample));
			details.insert("x-codeSamples".to_string(), Value::Array(vec![Value::Object(sample_obj)]));
		}
	}
	root
}

fn method_group(details: &IndexMap<String, Value>) -> String {
	details
		.get("tags")
		.and_then(Value::as_array)
		.and_then(|tags| tags.first())
		.and_then(Value::as_str)
		.map(file_name)
		.unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::operations::ExtractFilter;
	use crate::parse::parse;
	use std::path::Path as StdPath;
	use tempfile::tempdir;

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
		},
		"components": {"schemas": {}}
	}"#;

	fn resolved_config(sdk_output: PathBuf) -> ResolvedConfig {
		ResolvedConfig {
			openapi_input: PathBuf::from("openapi.json"),
			sdk_output,
			models_output: PathBuf::from("models"),
			tests: true,
			x_code_samples: true,
			ignores: vec!["src/ignored_tag/**".to_string()],
			tag: String::new(),
			operation_id: String::new(),
		}
	}

	#[test]
	fn writes_root_tag_handler_and_openapi_copy() {
		let dir = tempdir().unwrap();
		let doc = RawDocument::parse(DOC, StdPath::new("openapi.json")).unwrap();
		let metadata = parse(&doc, StdPath::new("openapi.json"), &ExtractFilter { tag: "", operation_id: "" }).unwrap();
		let config = resolved_config(dir.path().to_path_buf());
		let orchestrator = Orchestrator::new(&config).unwrap();
		orchestrator.run(&metadata, &doc).unwrap();

		assert!(dir.path().join("src/demo_api.rs").exists());
		assert!(dir.path().join("src/health/health.rs").exists());
		assert!(dir.path().join("src/health/ping/ping.rs").exists());
		assert!(dir.path().join("tests/health/ping/ping_test.rs").exists());
		assert!(dir.path().join("openapi.json").exists());

		let copy = fs_err::read_to_string(dir.path().join("openapi.json")).unwrap();
		assert!(copy.contains("x-codeSamples"));
	}

	#[test]
	fn ignored_glob_is_not_written() {
		let dir = tempdir().unwrap();
		let orchestrator = Orchestrator::new(&resolved_config(dir.path().to_path_buf())).unwrap();
		orchestrator.write(dir.path(), Path::new("src/ignored_tag/x.rs"), "nope").unwrap();
		assert!(!dir.path().join("src/ignored_tag/x.rs").exists());
	}
}
