//! Attribute maps and scalar coercion helpers
//!
//! Field values and HTML attributes are stored as [`serde_json::Value`] so
//! that strings, numbers, booleans and multi-value selections share one
//! representation. A `Null` attribute value means "unset".

use indexmap::IndexMap;
use serde_json::Value;

/// Ordered attribute map. Insertion order is the order attributes are
/// serialized in.
pub type Attributes = IndexMap<String, Value>;

/// Build an [`Attributes`] map from a JSON object.
///
/// Anything other than an object yields an empty map.
///
/// # Examples
///
/// ```
/// use formwork_forms::value::attrs;
/// use serde_json::json;
///
/// let attributes = attrs(json!({"class": "wide", "maxlength": 40}));
/// assert_eq!(attributes.len(), 2);
/// assert_eq!(attributes.get_index(0).map(|(k, _)| k.as_str()), Some("class"));
///
/// assert!(attrs(json!("not a map")).is_empty());
/// ```
pub fn attrs(value: Value) -> Attributes {
	match value {
		Value::Object(map) => map.into_iter().collect(),
		_ => Attributes::new(),
	}
}

/// Coerce a value to the string that ends up in markup.
///
/// `Null` and `false` become the empty string, `true` becomes `"1"`, arrays
/// are joined with commas and objects render as nothing.
///
/// # Examples
///
/// ```
/// use formwork_forms::value::value_to_string;
/// use serde_json::json;
///
/// assert_eq!(value_to_string(&json!("Ann")), "Ann");
/// assert_eq!(value_to_string(&json!(42)), "42");
/// assert_eq!(value_to_string(&json!(null)), "");
/// assert_eq!(value_to_string(&json!(true)), "1");
/// assert_eq!(value_to_string(&json!(["a", "b"])), "a,b");
/// ```
pub fn value_to_string(value: &Value) -> String {
	match value {
		Value::Null | Value::Bool(false) => String::new(),
		Value::Bool(true) => "1".to_string(),
		Value::Number(n) => n.to_string(),
		Value::String(s) => s.clone(),
		Value::Array(items) => items
			.iter()
			.map(value_to_string)
			.collect::<Vec<_>>()
			.join(","),
		Value::Object(_) => String::new(),
	}
}

/// Whether a value counts as "set" for flags such as `required`.
///
/// `Null`, `false`, `0`, `""`, `"0"` and empty arrays/objects are falsy.
pub fn is_truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(b) => *b,
		Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
		Value::String(s) => !s.is_empty() && s != "0",
		Value::Array(items) => !items.is_empty(),
		Value::Object(map) => !map.is_empty(),
	}
}

/// Whether an attribute is absent or holds a falsy value.
pub(crate) fn is_blank(attributes: &Attributes, key: &str) -> bool {
	attributes.get(key).is_none_or(|v| !is_truthy(v))
}

/// Scalar equality after string coercion. `Null` never matches.
pub(crate) fn scalar_eq(a: &Value, b: &Value) -> bool {
	if a.is_null() || b.is_null() {
		return false;
	}
	value_to_string(a) == value_to_string(b)
}

/// Whether `candidate` is selected by `value`: membership for arrays,
/// equality for scalars.
pub(crate) fn value_selects(value: &Value, candidate: &Value) -> bool {
	match value {
		Value::Array(items) => items.iter().any(|item| scalar_eq(item, candidate)),
		other => scalar_eq(other, candidate),
	}
}

/// Coerce a selection to the list of strings it selects.
pub(crate) fn selection_strings(value: &Value) -> Vec<String> {
	match value {
		Value::Null => Vec::new(),
		Value::Array(items) => items.iter().map(value_to_string).collect(),
		other => vec![value_to_string(other)],
	}
}
