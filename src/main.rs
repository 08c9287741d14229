use clap::Parser;
use tracing::info;

use borea::config::{self, Args};
use borea::document::RawDocument;
use borea::operations::ExtractFilter;
use borea::orchestrator::Orchestrator;
use borea::{parse, telemetry};

fn main() -> anyhow::Result<()> {
	telemetry::init();

	let args = Args::parse();
	let document = RawDocument::load(
		args
			.openapi_input
			.as_deref()
			.unwrap_or_else(|| std::path::Path::new("openapi.json")),
	)?;

	let filter = ExtractFilter {
		tag: args.tag.as_str(),
		operation_id: args.operation_id.as_str(),
	};
	let input_path = args.openapi_input.clone().unwrap_or_else(|| "openapi.json".into());
	let metadata = parse::parse(&document, &input_path, &filter)?;

	let resolved = config::resolve(&args, || metadata.title().unwrap_or("api").to_string())?;
	let orchestrator = Orchestrator::new(&resolved)?;
	orchestrator.run(&metadata, &document)?;

	info!(output = %resolved.sdk_output.display(), "wrote generated SDK");
	Ok(())
}
