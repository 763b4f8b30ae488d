//! Rendering settings and dotted-key lookup
//!
//! [`FormSettings`] carries the defaults every fieldset falls back to when its
//! own configuration does not set a key. Settings can be overridden in code
//! or loaded from a TOML document:
//!
//! ```toml
//! [form]
//! auto_id_prefix = "signup_"
//! required_mark = "(required)"
//! ```

use crate::error::FormResult;
use indexmap::IndexMap;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Per-fieldset configuration map
pub type ConfigMap = IndexMap<String, Value>;

/// Source of default configuration values
pub trait ConfigProvider: Send + Sync {
	/// Look up a (possibly dotted) key.
	fn get(&self, key: &str) -> Option<Value>;
}

/// Look up `key` in `map`.
///
/// An exact match wins. Otherwise the key is split on `.` and each segment
/// descends into a nested object.
///
/// # Examples
///
/// ```
/// use formwork_forms::config::{ConfigMap, lookup};
/// use serde_json::json;
///
/// let mut map = ConfigMap::new();
/// map.insert("form_attributes".to_string(), json!({"class": "wide"}));
/// map.insert("a.b".to_string(), json!("flat"));
///
/// assert_eq!(lookup(&map, "form_attributes.class"), Some(&json!("wide")));
/// assert_eq!(lookup(&map, "a.b"), Some(&json!("flat")));
/// assert_eq!(lookup(&map, "form_attributes.id"), None);
/// ```
pub fn lookup<'a>(map: &'a ConfigMap, key: &str) -> Option<&'a Value> {
	if let Some(value) = map.get(key) {
		return Some(value);
	}
	let mut segments = key.split('.');
	let first = segments.next()?;
	let mut current = map.get(first)?;
	for segment in segments {
		current = current.as_object()?.get(segment)?;
	}
	Some(current)
}

const FORM_TEMPLATE: &str = "\n\t\t{open}\n\t\t<table>\n{fields}\n\t\t</table>\n\t\t{close}\n";
const FIELDSET_TEMPLATE: &str =
	"\n\t\t<tr><td colspan=\"2\">{open}<table>\n{fields}</table></td></tr>\n\t\t{close}\n";
const FIELD_TEMPLATE: &str = "\t\t<tr>\n\t\t\t<td class=\"{error_class}\">{label}{required}</td>\n\t\t\t<td class=\"{error_class}\">{field} <span>{description}</span> {error_msg}</td>\n\t\t</tr>\n";
const MULTI_FIELD_TEMPLATE: &str = "\t\t<tr>\n\t\t\t<td class=\"{error_class}\">{group_label}{required}</td>\n\t\t\t<td class=\"{error_class}\">{fields}\n\t\t\t\t{field} {label}<br />\n{fields}<span>{description}</span>\t\t\t{error_msg}\n\t\t\t</td>\n\t\t</tr>\n";

/// Default form settings
///
/// # Examples
///
/// ```
/// use formwork_forms::config::{ConfigProvider, FormSettings};
/// use serde_json::json;
///
/// let settings = FormSettings::default().with_value("required_mark", json!("(req)"));
/// assert_eq!(settings.get("required_mark"), Some(json!("(req)")));
/// assert_eq!(settings.get("form_method"), Some(json!("post")));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FormSettings {
	values: ConfigMap,
}

impl Default for FormSettings {
	fn default() -> Self {
		let defaults = [
			("auto_id", Value::Bool(true)),
			("auto_id_prefix", Value::from("form_")),
			("prep_value", Value::Bool(true)),
			("form_method", Value::from("post")),
			("charset", Value::from("utf-8")),
			("form_template", Value::from(FORM_TEMPLATE)),
			("fieldset_template", Value::from(FIELDSET_TEMPLATE)),
			("field_template", Value::from(FIELD_TEMPLATE)),
			("multi_field_template", Value::from(MULTI_FIELD_TEMPLATE)),
			("group_label", Value::from("<span>{label}</span>")),
			("required_mark", Value::from("*")),
			("inline_errors", Value::Bool(false)),
			("error_template", Value::from("<span>{error_msg}</span>")),
			("error_class", Value::from("validation_error")),
			("label_class", Value::Null),
		];
		Self {
			values: defaults
				.into_iter()
				.map(|(key, value)| (key.to_string(), value))
				.collect(),
		}
	}
}

impl FormSettings {
	/// Settings with nothing set at all
	pub fn empty() -> Self {
		Self {
			values: ConfigMap::new(),
		}
	}

	pub fn with_value(mut self, key: impl Into<String>, value: Value) -> Self {
		self.values.insert(key.into(), value);
		self
	}

	pub fn values(&self) -> &ConfigMap {
		&self.values
	}

	/// Load settings from a TOML document on top of the defaults.
	///
	/// Keys are read from the `[form]` table when the document has one, and
	/// from the top level otherwise.
	///
	/// # Examples
	///
	/// ```
	/// use formwork_forms::config::{ConfigProvider, FormSettings};
	/// use serde_json::json;
	///
	/// let settings = FormSettings::from_toml_str("[form]\nauto_id = false\n").unwrap();
	/// assert_eq!(settings.get("auto_id"), Some(json!(false)));
	/// assert_eq!(settings.get("charset"), Some(json!("utf-8")));
	/// ```
	pub fn from_toml_str(content: &str) -> FormResult<Self> {
		let toml_value: toml::Value = toml::from_str(content)?;
		let json_value = serde_json::to_value(&toml_value)?;

		let table = match json_value {
			Value::Object(mut root) => match root.remove("form") {
				Some(Value::Object(form)) => form,
				Some(other) => {
					root.insert("form".to_string(), other);
					root
				}
				None => root,
			},
			_ => serde_json::Map::new(),
		};

		let mut settings = Self::default();
		settings.values.extend(table);
		Ok(settings)
	}

	/// Load settings from a TOML file. A missing file yields the defaults.
	pub fn from_toml_file(path: impl AsRef<Path>) -> FormResult<Self> {
		let path = path.as_ref();
		if !path.exists() {
			tracing::debug!(path = %path.display(), "form settings file not found, using defaults");
			return Ok(Self::default());
		}
		let content = fs::read_to_string(path)?;
		Self::from_toml_str(&content)
	}
}

impl ConfigProvider for FormSettings {
	fn get(&self, key: &str) -> Option<Value> {
		lookup(&self.values, key).cloned()
	}
}
