//! Placeholder templates
//!
//! Templates are plain strings with `{name}` placeholders. A placeholder name
//! made of ASCII letters, digits and underscores is substituted from a
//! [`TemplateContext`]; placeholders the context does not know are emitted
//! verbatim, and braces around anything else are plain text.
//!
//! Names declared as *blocks* when parsing delimit a repeated fragment: the
//! text between two occurrences of `{fields}` is rendered once per item the
//! context supplies for `fields`. A block marker without its partner is a
//! parse error rather than literal text.
//!
//! ```
//! use formwork_forms::template::{Template, TemplateContext};
//!
//! let template = Template::parse_with_blocks("<ul>{items}<li>{name}</li>{items}</ul>", &["items"]).unwrap();
//!
//! let mut context = TemplateContext::new();
//! for name in ["Ann", "Bob"] {
//!     context.push_item("items", TemplateContext::new().with("name", name));
//! }
//!
//! assert_eq!(template.render(&context), "<ul><li>Ann</li><li>Bob</li></ul>");
//! ```

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
	#[error("block \"{{{0}}}\" is opened but never closed")]
	UnclosedBlock(String),
	#[error("block \"{{{inner}}}\" cannot be opened inside block \"{{{outer}}}\"")]
	NestedBlock { outer: String, inner: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
	Text(String),
	Placeholder(String),
	Repeat { name: String, body: Vec<Segment> },
}

/// A parsed template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
	segments: Vec<Segment>,
}

impl Template {
	/// Parse a template without repeat blocks.
	pub fn parse(source: &str) -> Result<Self, TemplateError> {
		Self::parse_with_blocks(source, &[])
	}

	/// Parse a template, treating each name in `blocks` as a paired block
	/// delimiter.
	///
	/// # Examples
	///
	/// ```
	/// use formwork_forms::template::{Template, TemplateError};
	///
	/// assert!(Template::parse_with_blocks("{rows}<tr></tr>{rows}", &["rows"]).is_ok());
	/// assert_eq!(
	///     Template::parse_with_blocks("<table>{rows}</table>", &["rows"]),
	///     Err(TemplateError::UnclosedBlock("rows".to_string()))
	/// );
	/// ```
	pub fn parse_with_blocks(source: &str, blocks: &[&str]) -> Result<Self, TemplateError> {
		let mut root: Vec<Segment> = Vec::new();
		let mut open: Option<(String, Vec<Segment>)> = None;
		let mut text = String::new();
		let mut rest = source;

		while let Some(start) = rest.find('{') {
			text.push_str(&rest[..start]);
			let after = &rest[start + 1..];
			let name = after
				.find('}')
				.map(|end| &after[..end])
				.filter(|name| is_placeholder_name(name));

			let Some(name) = name else {
				text.push('{');
				rest = after;
				continue;
			};
			rest = &after[name.len() + 1..];

			let target = match open.as_mut() {
				Some((_, body)) => body,
				None => &mut root,
			};
			flush_text(&mut text, target);

			if blocks.contains(&name) {
				match open.take() {
					Some((outer, body)) if outer == name => {
						root.push(Segment::Repeat { name: outer, body });
					}
					Some((outer, _)) => {
						return Err(TemplateError::NestedBlock {
							outer,
							inner: name.to_string(),
						});
					}
					None => open = Some((name.to_string(), Vec::new())),
				}
			} else {
				target.push(Segment::Placeholder(name.to_string()));
			}
		}
		text.push_str(rest);

		if let Some((name, _)) = open {
			return Err(TemplateError::UnclosedBlock(name));
		}
		flush_text(&mut text, &mut root);

		Ok(Self { segments: root })
	}

	/// Whether the template contains a repeat block with the given name.
	pub fn has_block(&self, name: &str) -> bool {
		self.segments
			.iter()
			.any(|segment| matches!(segment, Segment::Repeat { name: n, .. } if n == name))
	}

	pub fn render(&self, context: &TemplateContext) -> String {
		let mut output = String::new();
		render_segments(&self.segments, &[context], &mut output);
		output
	}
}

fn is_placeholder_name(name: &str) -> bool {
	!name.is_empty()
		&& name
			.chars()
			.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn flush_text(text: &mut String, target: &mut Vec<Segment>) {
	if !text.is_empty() {
		target.push(Segment::Text(std::mem::take(text)));
	}
}

fn render_segments(segments: &[Segment], scopes: &[&TemplateContext], output: &mut String) {
	for segment in segments {
		match segment {
			Segment::Text(text) => output.push_str(text),
			Segment::Placeholder(name) => {
				match scopes.iter().rev().find_map(|scope| scope.values.get(name)) {
					Some(value) => output.push_str(value),
					None => {
						output.push('{');
						output.push_str(name);
						output.push('}');
					}
				}
			}
			Segment::Repeat { name, body } => {
				let items = scopes
					.iter()
					.rev()
					.find_map(|scope| scope.blocks.get(name));
				for item in items.into_iter().flatten() {
					let mut nested = scopes.to_vec();
					nested.push(item);
					render_segments(body, &nested, output);
				}
			}
		}
	}
}

/// Values and block items for rendering a [`Template`]
///
/// Lookups inside a block check the item first and fall back to the
/// enclosing context.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
	values: HashMap<String, String>,
	blocks: HashMap<String, Vec<TemplateContext>>,
}

impl TemplateContext {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.set(name, value);
		self
	}

	pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.values.insert(name.into(), value.into());
	}

	pub fn push_item(&mut self, block: impl Into<String>, item: TemplateContext) {
		self.blocks.entry(block.into()).or_default().push(item);
	}
}
