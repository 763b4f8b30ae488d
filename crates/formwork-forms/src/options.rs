//! Option lists for selects, radio groups and checkbox groups
//!
//! Options are an ordered `value → label` mapping. An entry may itself be a
//! nested mapping, which a select renders as an `<optgroup>`.

use crate::value::value_to_string;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry in an option list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionEntry {
	/// A selectable option's display label
	Label(String),
	/// A named group of options
	Group(SelectOptions),
}

impl OptionEntry {
	pub fn as_label(&self) -> Option<&str> {
		match self {
			OptionEntry::Label(label) => Some(label),
			OptionEntry::Group(_) => None,
		}
	}

	pub fn as_group(&self) -> Option<&SelectOptions> {
		match self {
			OptionEntry::Group(group) => Some(group),
			OptionEntry::Label(_) => None,
		}
	}
}

impl From<&str> for OptionEntry {
	fn from(label: &str) -> Self {
		OptionEntry::Label(label.to_string())
	}
}

impl From<String> for OptionEntry {
	fn from(label: String) -> Self {
		OptionEntry::Label(label)
	}
}

impl From<SelectOptions> for OptionEntry {
	fn from(group: SelectOptions) -> Self {
		OptionEntry::Group(group)
	}
}

/// Ordered option list
///
/// # Examples
///
/// ```
/// use formwork_forms::options::SelectOptions;
///
/// let mut options = SelectOptions::new();
/// options.insert("nl", "Netherlands");
/// options.set("europe.de", "Germany");
///
/// assert_eq!(options.len(), 2);
/// assert_eq!(options.label("nl"), Some("Netherlands"));
/// assert_eq!(options.get("europe").and_then(|g| g.as_group()).and_then(|g| g.label("de")), Some("Germany"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectOptions(IndexMap<String, OptionEntry>);

impl SelectOptions {
	pub fn new() -> Self {
		Self(IndexMap::new())
	}

	/// Convert a JSON value into an option list.
	///
	/// Objects keep their key order and nest into groups. Arrays are keyed by
	/// position. Scalar labels are coerced to strings. A scalar at the top
	/// level yields an empty list.
	///
	/// # Examples
	///
	/// ```
	/// use formwork_forms::options::SelectOptions;
	/// use serde_json::json;
	///
	/// let options = SelectOptions::from_value(&json!({"1": "One", "g": {"2": 2}}));
	/// assert_eq!(options.label("1"), Some("One"));
	/// assert_eq!(options.get("g").and_then(|g| g.as_group()).and_then(|g| g.label("2")), Some("2"));
	///
	/// let listed = SelectOptions::from_value(&json!(["red", "green"]));
	/// assert_eq!(listed.label("1"), Some("green"));
	/// ```
	pub fn from_value(value: &Value) -> Self {
		match value {
			Value::Object(map) => map
				.iter()
				.map(|(key, entry)| (key.clone(), Self::entry_from_value(entry)))
				.collect(),
			Value::Array(items) => items
				.iter()
				.enumerate()
				.map(|(i, entry)| (i.to_string(), Self::entry_from_value(entry)))
				.collect(),
			_ => Self::new(),
		}
	}

	fn entry_from_value(value: &Value) -> OptionEntry {
		match value {
			Value::Object(_) | Value::Array(_) => OptionEntry::Group(Self::from_value(value)),
			other => OptionEntry::Label(value_to_string(other)),
		}
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn get(&self, key: &str) -> Option<&OptionEntry> {
		self.0.get(key)
	}

	/// Label of a flat (non-group) entry
	pub fn label(&self, key: &str) -> Option<&str> {
		self.0.get(key).and_then(OptionEntry::as_label)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&String, &OptionEntry)> {
		self.0.iter()
	}

	pub fn insert(&mut self, key: impl Into<String>, entry: impl Into<OptionEntry>) {
		self.0.insert(key.into(), entry.into());
	}

	/// Set an entry by dotted path, creating (or replacing labels with)
	/// groups along the way.
	pub fn set(&mut self, path: &str, label: impl Into<String>) {
		let label = label.into();
		match path.split_once('.') {
			None => {
				self.0.insert(path.to_string(), OptionEntry::Label(label));
			}
			Some((head, rest)) => {
				let entry = self
					.0
					.entry(head.to_string())
					.or_insert_with(|| OptionEntry::Group(SelectOptions::new()));
				if matches!(entry, OptionEntry::Label(_)) {
					*entry = OptionEntry::Group(SelectOptions::new());
				}
				if let OptionEntry::Group(group) = entry {
					group.set(rest, label);
				}
			}
		}
	}

	/// Deep merge: groups present on both sides merge recursively, anything
	/// else is overwritten by `other`.
	///
	/// # Examples
	///
	/// ```
	/// use formwork_forms::options::SelectOptions;
	/// use serde_json::json;
	///
	/// let mut options = SelectOptions::from_value(&json!({"a": "A", "g": {"x": "X"}}));
	/// options.merge(SelectOptions::from_value(&json!({"a": "Alpha", "g": {"y": "Y"}})));
	///
	/// assert_eq!(options.label("a"), Some("Alpha"));
	/// let group = options.get("g").and_then(|g| g.as_group()).unwrap();
	/// assert_eq!(group.len(), 2);
	/// ```
	pub fn merge(&mut self, other: SelectOptions) {
		for (key, entry) in other.0 {
			match entry {
				OptionEntry::Group(incoming) => {
					if let Some(OptionEntry::Group(existing)) = self.0.get_mut(&key) {
						existing.merge(incoming);
					} else {
						self.0.insert(key, OptionEntry::Group(incoming));
					}
				}
				label => {
					self.0.insert(key, label);
				}
			}
		}
	}
}

impl<K, V> FromIterator<(K, V)> for SelectOptions
where
	K: Into<String>,
	V: Into<OptionEntry>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(
			iter.into_iter()
				.map(|(key, entry)| (key.into(), entry.into()))
				.collect(),
		)
	}
}

impl<'a> IntoIterator for &'a SelectOptions {
	type Item = (&'a String, &'a OptionEntry);
	type IntoIter = indexmap::map::Iter<'a, String, OptionEntry>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_set_replaces_label_with_group() {
		let mut options = SelectOptions::new();
		options.insert("fruit", "Fruit");
		options.set("fruit.apple", "Apple");

		let group = options.get("fruit").and_then(OptionEntry::as_group).unwrap();
		assert_eq!(group.label("apple"), Some("Apple"));
	}

	#[rstest]
	fn test_merge_overwrites_group_with_label() {
		let mut options = SelectOptions::from_value(&json!({"g": {"x": "X"}}));
		options.merge(SelectOptions::from_value(&json!({"g": "flat"})));
		assert_eq!(options.label("g"), Some("flat"));
	}

	#[rstest]
	fn test_merge_keeps_insertion_order() {
		let mut options = SelectOptions::from_value(&json!({"b": "B", "a": "A"}));
		options.merge(SelectOptions::from_value(&json!({"c": "C", "b": "Bee"})));
		let keys: Vec<_> = options.iter().map(|(k, _)| k.as_str()).collect();
		assert_eq!(keys, vec!["b", "a", "c"]);
	}

	#[rstest]
	fn test_deserialize_nested() {
		let options: SelectOptions =
			serde_json::from_value(json!({"a": "Alpha", "g": {"b": "Beta"}})).unwrap();
		assert_eq!(options.label("a"), Some("Alpha"));
		assert!(options.get("g").and_then(OptionEntry::as_group).is_some());
	}

	#[rstest]
	fn test_from_iterator() {
		let options: SelectOptions = vec![("1", "One"), ("2", "Two")].into_iter().collect();
		assert_eq!(options.len(), 2);
		assert_eq!(options.label("2"), Some("Two"));
	}
}
