//! Name normalization (spec.md §6), applied identically everywhere names
//! are generated.

use heck::{ToSnakeCase, ToUpperCamelCase};
use regex::Regex;

lazy_static::lazy_static! {
	static ref ILLEGAL_IDENT_CHAR: Regex = Regex::new(r"[^A-Za-z0-9_]").unwrap();
	static ref ILLEGAL_IDENT_RUN: Regex = Regex::new(r"[^A-Za-z0-9_]+").unwrap();
}

/// Class names: strip non-identifier characters, Capitalize each
/// underscore-separated token, concatenate.
pub fn class_name(raw: &str) -> String {
	let cleaned = strip_non_identifier(raw);
	if cleaned.is_empty() {
		return "Unnamed".to_string();
	}
	cleaned.to_upper_camel_case()
}

/// File and directory names: lowercase, non-identifier characters stripped
/// to underscores.
pub fn file_name(raw: &str) -> String {
	let cleaned = strip_non_identifier(raw);
	if cleaned.is_empty() {
		return "unnamed".to_string();
	}
	cleaned.to_snake_case()
}

/// Method parameter names: illegal identifier characters become
/// underscores; a leading digit gets an underscore prefix.
pub fn parameter_name(raw: &str) -> String {
	let replaced = ILLEGAL_IDENT_CHAR.replace_all(raw, "_").into_owned();
	if replaced.chars().next().is_some_and(|c| c.is_ascii_digit()) {
		format!("_{replaced}")
	} else if replaced.is_empty() {
		"_param".to_string()
	} else {
		replaced
	}
}

fn strip_non_identifier(raw: &str) -> String {
	ILLEGAL_IDENT_RUN
		.split(raw)
		.filter(|s| !s.is_empty())
		.collect::<Vec<_>>()
		.join("_")
}
