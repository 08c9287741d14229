//! CLI surface and config-file merging (spec.md §6).
//!
//! Precedence is CLI flag > config file value > built-in default,
//! evaluated per option — the same per-option merge the teacher crate's own
//! `config::parse_config` performs (there: env var > config file > default).

use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

use crate::naming::file_name;

#[derive(Parser, Debug, Default)]
#[command(about = "Generate a typed client SDK from an OpenAPI document", long_about = None)]
pub struct Args {
	/// Path to the OpenAPI JSON file.
	#[arg(short = 'i', long = "openapi-input")]
	pub openapi_input: Option<PathBuf>,

	/// Output root for the generated SDK.
	#[arg(short = 'o', long = "sdk-output")]
	pub sdk_output: Option<PathBuf>,

	/// Subdirectory (relative to `sdk-output`) for generated models.
	#[arg(short = 'm', long = "models-output")]
	pub models_output: Option<PathBuf>,

	/// Emit empty test scaffolding alongside each handler.
	#[arg(short = 't', long = "tests")]
	pub tests: bool,

	/// Annotate the copied `openapi.json` with per-operation code samples.
	#[arg(short = 'x', long = "x-code-samples")]
	pub x_code_samples: bool,

	/// Path to a `borea.config.json`-shaped config file.
	#[arg(short = 'c', long = "config")]
	pub config: Option<PathBuf>,

	/// Only emit operations carrying this tag.
	#[arg(long = "tag", default_value = "")]
	pub tag: String,

	/// Only emit the operation with this `operationId`.
	#[arg(long = "operation-id", default_value = "")]
	pub operation_id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct InputSection {
	openapi: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct OutputSection {
	client_sdk: Option<String>,
	models: Option<String>,
	tests: Option<bool>,
	x_code_samples: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
	input: InputSection,
	output: OutputSection,
	ignores: Vec<String>,
}

impl FileConfig {
	pub fn load(path: &Path) -> anyhow::Result<Self> {
		let contents = fs_err::read_to_string(path)?;
		Ok(serde_json::from_str(&contents)?)
	}
}

/// Fully-resolved generator configuration, after merging CLI > config file >
/// default.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
	pub openapi_input: PathBuf,
	pub sdk_output: PathBuf,
	pub models_output: PathBuf,
	pub tests: bool,
	pub x_code_samples: bool,
	pub ignores: Vec<String>,
	pub tag: String,
	pub operation_id: String,
}

/// Merges CLI args with an optional config file, falling back to built-in
/// defaults. `sdk_title` is used for the default `sdk-output`
/// (sanitized `info.title`) when neither the CLI nor the config file
/// specify one; it's only available once the document has been loaded, so
/// callers pass it in after a first pass over the document's `info` block.
pub fn resolve(args: &Args, sdk_title_default: impl FnOnce() -> String) -> anyhow::Result<ResolvedConfig> {
	let config_path = args.config.clone().unwrap_or_else(|| PathBuf::from("borea.config.json"));
	let file = if config_path.exists() {
		Some(FileConfig::load(&config_path)?)
	} else {
		None
	};

	let openapi_input = args
		.openapi_input
		.clone()
		.or_else(|| file.as_ref().and_then(|f| f.input.openapi.clone()).map(PathBuf::from))
		.unwrap_or_else(|| PathBuf::from("openapi.json"));

	let sdk_output = args
		.sdk_output
		.clone()
		.or_else(|| file.as_ref().and_then(|f| f.output.client_sdk.clone()).map(PathBuf::from))
		.unwrap_or_else(|| PathBuf::from(file_name(&sdk_title_default())));

	let models_output = args
		.models_output
		.clone()
		.or_else(|| file.as_ref().and_then(|f| f.output.models.clone()).map(PathBuf::from))
		.unwrap_or_else(|| PathBuf::from("models"));

	let tests = args.tests || file.as_ref().and_then(|f| f.output.tests).unwrap_or(false);
	let x_code_samples = args.x_code_samples || file.as_ref().and_then(|f| f.output.x_code_samples).unwrap_or(false);
	let ignores = file.map(|f| f.ignores).unwrap_or_default();

	Ok(ResolvedConfig {
		openapi_input,
		sdk_output,
		models_output,
		tests,
		x_code_samples,
		ignores,
		tag: args.tag.clone(),
		operation_id: args.operation_id.clone(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_apply_when_nothing_set() {
		let args = Args::default();
		let cfg = resolve(&args, || "Demo API".to_string()).unwrap();
		assert_eq!(cfg.openapi_input, PathBuf::from("openapi.json"));
		assert_eq!(cfg.sdk_output, PathBuf::from("demo_api"));
		assert_eq!(cfg.models_output, PathBuf::from("models"));
		assert!(!cfg.tests);
	}

	#[test]
	fn cli_flag_overrides_everything() {
		let mut args = Args::default();
		args.sdk_output = Some(PathBuf::from("explicit_dir"));
		args.tests = true;
		let cfg = resolve(&args, || "Demo API".to_string()).unwrap();
		assert_eq!(cfg.sdk_output, PathBuf::from("explicit_dir"));
		assert!(cfg.tests);
	}
}
