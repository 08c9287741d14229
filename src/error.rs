//! Error taxonomy shared by every stage of the pipeline.
//!
//! Library code returns [`BoreaError`]; the orchestrator and `main` work in
//! `anyhow::Result` and attach operation/tag context before re-raising, per
//! the propagation rule in the spec's error handling design.

#[derive(Debug, thiserror::Error)]
pub enum BoreaError {
	#[error("failed to read {path}: {source}")]
	Io {
		path: String,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to parse {path} as JSON: {source}")]
	Parse { path: String, source: String },

	#[error("info.title is missing from the OpenAPI document")]
	MissingTitle,

	#[error("template render failed for {context}: {source}")]
	Template { context: String, source: String },
}
