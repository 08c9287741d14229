//! The template engine (spec.md §6, "thin" collaborator): renders plan
//! objects into generated source text with `minijinja`, the same crate and
//! `Environment`/`context!` pattern the teacher uses in
//! `http::transformation::Transformation`.

use minijinja::{context, Environment};
use serde::Serialize;

use crate::error::BoreaError;

const ROOT_CLIENT: &str = include_str!("../templates/root_client.rs.jinja");
const TAG_MODULE: &str = include_str!("../templates/tag_module.rs.jinja");
const HANDLER: &str = include_str!("../templates/handler.rs.jinja");
const HANDLER_TEST: &str = include_str!("../templates/handler_test.rs.jinja");
const SCHEMA: &str = include_str!("../templates/schema.rs.jinja");

/// Wraps a `minijinja::Environment` pre-loaded with the SDK's fixed
/// template set. One instance is built per run and shared across every
/// render call the orchestrator makes.
pub struct Renderer {
	env: Environment<'static>,
}

impl Renderer {
	pub fn new() -> Result<Self, BoreaError> {
		let mut env = Environment::new();
		env.add_template("root_client", ROOT_CLIENT).map_err(template_err("root_client"))?;
		env.add_template("tag_module", TAG_MODULE).map_err(template_err("tag_module"))?;
		env.add_template("handler", HANDLER).map_err(template_err("handler"))?;
		env.add_template("handler_test", HANDLER_TEST).map_err(template_err("handler_test"))?;
		env.add_template("schema", SCHEMA).map_err(template_err("schema"))?;
		Ok(Self { env })
	}

	pub fn render_root(&self, ctx: &impl Serialize) -> Result<String, BoreaError> {
		self.render("root_client", ctx)
	}

	pub fn render_tag(&self, ctx: &impl Serialize) -> Result<String, BoreaError> {
		self.render("tag_module", ctx)
	}

	pub fn render_handler(&self, ctx: &impl Serialize) -> Result<String, BoreaError> {
		self.render("handler", ctx)
	}

	pub fn render_handler_test(&self, ctx: &impl Serialize) -> Result<String, BoreaError> {
		self.render("handler_test", ctx)
	}

	pub fn render_schema(&self, ctx: &impl Serialize) -> Result<String, BoreaError> {
		self.render("schema", ctx)
	}

	fn render(&self, name: &str, ctx: &impl Serialize) -> Result<String, BoreaError> {
		let tmpl = self.env.get_template(name).map_err(template_err(name))?;
		tmpl.render(context! { ..minijinja::Value::from_serialize(ctx) }).map_err(|e| BoreaError::Template {
			context: name.to_string(),
			source: e.to_string(),
		})
	}
}

fn template_err(name: &str) -> impl Fn(minijinja::Error) -> BoreaError + '_ {
	move |e| BoreaError::Template {
		context: name.to_string(),
		source: e.to_string(),
	}
}
