//! HTML escaping and tag serialization
//!
//! Escaped characters for [`escape_html`]:
//! - `<` → `&lt;`
//! - `>` → `&gt;`
//! - `&` → `&amp;`
//! - `"` → `&quot;`
//! - `'` → `&#x27;`

use crate::value::{Attributes, value_to_string};
use serde_json::Value;

/// Escape HTML special characters
///
/// # Examples
///
/// ```
/// use formwork_forms::html::escape_html;
///
/// assert_eq!(escape_html("<b>\"Tom\" & 'Jerry'</b>"),
///            "&lt;b&gt;&quot;Tom&quot; &amp; &#x27;Jerry&#x27;&lt;/b&gt;");
/// ```
pub fn escape_html(s: &str) -> String {
	let mut escaped = String::with_capacity(s.len());
	for c in s.chars() {
		match c {
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'&' => escaped.push_str("&amp;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#x27;"),
			_ => escaped.push(c),
		}
	}
	escaped
}

/// Escape double quotes so a value can sit inside `key="..."`.
///
/// Values are expected to have been prepared already, so only the quote
/// delimiter is touched.
pub fn escape_attribute(s: &str) -> String {
	s.replace('"', "&quot;")
}

/// Serialize attributes as `key="value"` pairs separated by spaces.
///
/// `Null` and `false` values are skipped; `true` renders as `key="key"`.
///
/// # Examples
///
/// ```
/// use formwork_forms::html::render_attributes;
/// use formwork_forms::value::attrs;
/// use serde_json::json;
///
/// let attributes = attrs(json!({
///     "name": "agree",
///     "checked": true,
///     "disabled": false,
///     "id": null,
///     "title": "say \"yes\""
/// }));
/// assert_eq!(
///     render_attributes(&attributes),
///     "name=\"agree\" checked=\"checked\" title=\"say &quot;yes&quot;\""
/// );
/// ```
pub fn render_attributes(attributes: &Attributes) -> String {
	attributes
		.iter()
		.filter_map(|(key, value)| match value {
			Value::Null | Value::Bool(false) => None,
			Value::Bool(true) => Some(format!("{}=\"{}\"", key, key)),
			other => Some(format!(
				"{}=\"{}\"",
				key,
				escape_attribute(&value_to_string(other))
			)),
		})
		.collect::<Vec<_>>()
		.join(" ")
}

/// Build an element.
///
/// With `content == None` a self-closing tag is produced; otherwise the
/// content (possibly empty) is wrapped in an open/close pair.
///
/// # Examples
///
/// ```
/// use formwork_forms::html::tag;
/// use formwork_forms::value::attrs;
/// use serde_json::json;
///
/// let attributes = attrs(json!({"type": "text", "name": "q"}));
/// assert_eq!(tag("input", &attributes, None), "<input type=\"text\" name=\"q\" />");
/// assert_eq!(tag("textarea", &attributes, Some("")), "<textarea type=\"text\" name=\"q\"></textarea>");
/// assert_eq!(tag("span", &Default::default(), Some("hi")), "<span>hi</span>");
/// ```
pub fn tag(name: &str, attributes: &Attributes, content: Option<&str>) -> String {
	let rendered = render_attributes(attributes);
	let mut html = format!("<{}", name);
	if !rendered.is_empty() {
		html.push(' ');
		html.push_str(&rendered);
	}
	match content {
		Some(content) => {
			html.push('>');
			html.push_str(content);
			html.push_str(&format!("</{}>", name));
		}
		None => html.push_str(" />"),
	}
	html
}

/// Opening tag only, for wrappers whose content is produced separately.
pub fn open_tag(name: &str, attributes: &Attributes) -> String {
	let rendered = render_attributes(attributes);
	if rendered.is_empty() {
		format!("<{}>", name)
	} else {
		format!("<{} {}>", name, rendered)
	}
}
