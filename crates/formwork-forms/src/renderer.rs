//! HTML tag factory
//!
//! A [`Renderer`] borrows a fieldset's configuration and collaborators and
//! turns attribute maps into markup. It holds no state of its own, so one is
//! created whenever a fieldset or field needs to render.
//!
//! Configuration keys are looked up in the fieldset's own map first and in
//! the [`FormServices`] defaults second.

use crate::config::{ConfigMap, lookup};
use crate::error::{FormError, FormResult};
use crate::html::{open_tag, tag};
use crate::options::{OptionEntry, SelectOptions};
use crate::services::FormServices;
use crate::value::{Attributes, is_blank, is_truthy, scalar_eq, selection_strings, value_to_string};
use serde_json::Value;

/// Input types accepted by [`Renderer::input`]
pub const VALID_INPUT_TYPES: [&str; 23] = [
	"button",
	"checkbox",
	"color",
	"date",
	"datetime",
	"datetime-local",
	"email",
	"file",
	"hidden",
	"image",
	"month",
	"number",
	"password",
	"radio",
	"range",
	"reset",
	"search",
	"submit",
	"tel",
	"text",
	"time",
	"url",
	"week",
];

/// Borrowed view of a fieldset's configuration and collaborators
///
/// # Examples
///
/// ```
/// use formwork_forms::config::ConfigMap;
/// use formwork_forms::renderer::Renderer;
/// use formwork_forms::services::FormServices;
/// use formwork_forms::value::Attributes;
/// use serde_json::json;
///
/// let config = ConfigMap::new();
/// let services = FormServices::default();
/// let renderer = Renderer::new(&config, &services);
///
/// assert_eq!(
///     renderer.input("email", &json!("a@b.c"), &Attributes::new()).unwrap(),
///     "<input name=\"email\" value=\"a@b.c\" type=\"text\" id=\"form_email\" />"
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
	config: &'a ConfigMap,
	services: &'a FormServices,
}

impl<'a> Renderer<'a> {
	pub fn new(config: &'a ConfigMap, services: &'a FormServices) -> Self {
		Self { config, services }
	}

	pub fn services(&self) -> &'a FormServices {
		self.services
	}

	/// Look up a configuration value, local settings first.
	pub fn get_config(&self, key: &str) -> Option<Value> {
		lookup(self.config, key)
			.cloned()
			.or_else(|| self.services.defaults().get(key))
	}

	/// String configuration value. Unset and `Null` both yield `None`.
	pub fn config_str(&self, key: &str) -> Option<String> {
		self.get_config(key)
			.filter(|value| !value.is_null())
			.map(|value| value_to_string(&value))
	}

	pub fn config_bool(&self, key: &str, default: bool) -> bool {
		self.get_config(key)
			.map(|value| is_truthy(&value))
			.unwrap_or(default)
	}

	pub fn auto_id(&self) -> bool {
		self.config_bool("auto_id", false)
	}

	pub fn auto_id_prefix(&self) -> String {
		self.config_str("auto_id_prefix").unwrap_or_default()
	}

	pub fn prep_value(&self) -> bool {
		self.config_bool("prep_value", true)
	}

	/// Opening `<form>` tag, followed by hidden inputs and the CSRF field.
	///
	/// A missing action posts back to the current URL and a relative one is
	/// resolved through the URL provider.
	pub fn open(&self, attributes: &Attributes, hidden: &Attributes) -> FormResult<String> {
		let mut attributes = attributes.clone();

		let action = match attributes.get("action") {
			None | Some(Value::Null) => self.services.urls().current_base_url(),
			Some(action) => {
				let action = value_to_string(action);
				if action.find("://").is_some_and(|pos| pos > 0) {
					action
				} else {
					self.services.urls().create(&action)
				}
			}
		};
		attributes.insert("action".to_string(), Value::String(action));

		if is_blank(&attributes, "accept-charset") {
			let charset = self
				.config_str("charset")
				.unwrap_or_else(|| "utf-8".to_string());
			attributes.insert(
				"accept-charset".to_string(),
				Value::String(charset.to_lowercase()),
			);
		}
		if is_blank(&attributes, "method") {
			let method = self
				.config_str("form_method")
				.unwrap_or_else(|| "post".to_string());
			attributes.insert("method".to_string(), Value::String(method));
		}

		let mut form = open_tag("form", &attributes);
		for (name, value) in hidden {
			form.push('\n');
			form.push_str(&self.hidden(name, value, &Attributes::new())?);
		}

		let csrf = self.services.csrf().token_field();
		if !csrf.is_empty() {
			form.push('\n');
			form.push_str(&csrf);
		}
		Ok(form)
	}

	pub fn close(&self) -> String {
		"</form>".to_string()
	}

	/// Opening `<fieldset>` tag with an optional legend.
	///
	/// The legend may also be passed as a `legend` attribute.
	pub fn fieldset_open(&self, attributes: &Attributes, legend: Option<&str>) -> String {
		let mut attributes = attributes.clone();
		let legend_attribute = attributes.shift_remove("legend");
		let legend = legend
			.map(str::to_string)
			.or_else(|| legend_attribute.map(|value| value_to_string(&value)))
			.filter(|legend| !legend.is_empty());

		let mut html = open_tag("fieldset", &attributes);
		if let Some(legend) = legend {
			html.push_str(&format!("\n<legend>{}</legend>", legend));
		}
		html
	}

	pub fn fieldset_close(&self) -> String {
		"</fieldset>".to_string()
	}

	/// Opening tag for an arbitrary wrapper element.
	pub fn element_open(&self, element: &str, attributes: &Attributes) -> String {
		open_tag(element, attributes)
	}

	pub fn element_close(&self, element: &str) -> String {
		format!("</{}>", element)
	}

	/// An `<input>` named `name` holding `value`.
	///
	/// `type` defaults to `text` and must be one of [`VALID_INPUT_TYPES`].
	pub fn input(&self, name: &str, value: &Value, attributes: &Attributes) -> FormResult<String> {
		self.finish_input(named(name, value, attributes))
	}

	/// An `<input>` described entirely by its attribute map.
	pub fn input_with(&self, attributes: &Attributes) -> FormResult<String> {
		let mut attributes = attributes.clone();
		attributes
			.entry("value".to_string())
			.or_insert_with(|| Value::String(String::new()));
		self.finish_input(attributes)
	}

	pub fn hidden(&self, name: &str, value: &Value, attributes: &Attributes) -> FormResult<String> {
		self.typed_input("hidden", named(name, value, attributes))
	}

	pub fn password(&self, name: &str, value: &Value, attributes: &Attributes) -> FormResult<String> {
		self.typed_input("password", named(name, value, attributes))
	}

	pub fn file(&self, name: &str, attributes: &Attributes) -> FormResult<String> {
		let mut attributes = attributes.clone();
		attributes.insert("name".to_string(), Value::from(name));
		self.typed_input("file", attributes)
	}

	pub fn reset(&self, name: &str, value: &Value, attributes: &Attributes) -> FormResult<String> {
		self.typed_input("reset", named(name, value, attributes))
	}

	pub fn submit(&self, name: &str, value: &Value, attributes: &Attributes) -> FormResult<String> {
		self.typed_input("submit", named(name, value, attributes))
	}

	/// A radio button. A boolean `checked` applies as given; any other
	/// scalar checks the button when it equals `value`.
	pub fn radio(
		&self,
		name: &str,
		value: &Value,
		checked: Option<&Value>,
		attributes: &Attributes,
	) -> FormResult<String> {
		self.checkable("radio", name, value, checked, attributes)
	}

	pub fn radio_with(&self, attributes: &Attributes) -> FormResult<String> {
		self.typed_input("radio", attributes.clone())
	}

	/// A checkbox, with the same `checked` rules as [`Renderer::radio`].
	///
	/// # Examples
	///
	/// ```
	/// use formwork_forms::config::ConfigMap;
	/// use formwork_forms::renderer::Renderer;
	/// use formwork_forms::services::FormServices;
	/// use formwork_forms::value::attrs;
	/// use serde_json::json;
	///
	/// let config: ConfigMap = attrs(json!({"auto_id": false}));
	/// let services = FormServices::default();
	/// let renderer = Renderer::new(&config, &services);
	///
	/// let html = renderer.checkbox("agree", &json!("yes"), Some(&json!("yes")), &Default::default()).unwrap();
	/// assert_eq!(html, "<input name=\"agree\" value=\"yes\" checked=\"checked\" type=\"checkbox\" />");
	/// ```
	pub fn checkbox(
		&self,
		name: &str,
		value: &Value,
		checked: Option<&Value>,
		attributes: &Attributes,
	) -> FormResult<String> {
		self.checkable("checkbox", name, value, checked, attributes)
	}

	pub fn checkbox_with(&self, attributes: &Attributes) -> FormResult<String> {
		self.typed_input("checkbox", attributes.clone())
	}

	/// A `<select>` element.
	///
	/// The selection comes from the `selected` attribute, then `values`, then
	/// the `value` and `default` attributes. Passing `None` for `options` is
	/// an error; an empty option list renders an empty select.
	///
	/// # Examples
	///
	/// ```
	/// use formwork_forms::config::ConfigMap;
	/// use formwork_forms::options::SelectOptions;
	/// use formwork_forms::renderer::Renderer;
	/// use formwork_forms::services::FormServices;
	/// use formwork_forms::value::Attributes;
	/// use serde_json::json;
	///
	/// let config = ConfigMap::new();
	/// let services = FormServices::default();
	/// let renderer = Renderer::new(&config, &services);
	/// let options = SelectOptions::from_value(&json!({"nl": "Netherlands", "de": "Germany"}));
	///
	/// let html = renderer.select("country", &json!("de"), Some(&options), &Attributes::new()).unwrap();
	/// assert!(html.contains("<option value=\"de\" style=\"text-indent: 0px;\" selected=\"selected\">Germany</option>"));
	///
	/// assert!(renderer.select("country", &json!(null), None, &Attributes::new()).is_err());
	/// ```
	pub fn select(
		&self,
		name: &str,
		values: &Value,
		options: Option<&SelectOptions>,
		attributes: &Attributes,
	) -> FormResult<String> {
		let mut attributes = attributes.clone();
		attributes.insert("name".to_string(), Value::from(name));

		let options = options.ok_or_else(|| FormError::MissingOptions(name.to_string()))?;

		let selected_attribute = attributes.shift_remove("selected");
		let value_attribute = attributes.shift_remove("value");
		let default_attribute = attributes.shift_remove("default");
		let selected = [
			selected_attribute.as_ref(),
			Some(values),
			value_attribute.as_ref(),
			default_attribute.as_ref(),
		]
		.into_iter()
		.flatten()
		.find(|value| is_selection(value))
		.map(selection_strings)
		.unwrap_or_default();

		let prep = self.should_prep(&mut attributes);
		let list = self.list_options(options, &selected, prep, 1);

		self.apply_auto_id(&mut attributes);

		let multiple = attributes.get("multiple").is_some_and(|v| !v.is_null());
		if multiple && !name.ends_with("[]") {
			attributes.insert("name".to_string(), Value::String(format!("{}[]", name)));
		}

		Ok(tag("select", &without_label(attributes), Some(&list)))
	}

	fn list_options(&self, options: &SelectOptions, selected: &[String], prep: bool, level: usize) -> String {
		let indent = "\t".repeat(level);
		let style = format!("text-indent: {}px;", 10 * (level - 1));
		let mut html = String::from("\n");

		for (key, entry) in options {
			match entry {
				OptionEntry::Group(group) => {
					let mut inner = self.list_options(group, selected, prep, level + 1);
					inner.push_str(&indent);

					let mut group_attributes = Attributes::new();
					group_attributes.insert("label".to_string(), Value::from(key.as_str()));
					group_attributes.insert("style".to_string(), Value::from(style.as_str()));

					html.push_str(&indent);
					html.push_str(&tag("optgroup", &group_attributes, Some(&inner)));
					html.push('\n');
				}
				OptionEntry::Label(label) => {
					let (value, label) = if prep {
						let prep = self.services.value_prep();
						(prep.prep(key), prep.prep(label))
					} else {
						(key.clone(), label.clone())
					};

					let mut option_attributes = Attributes::new();
					option_attributes.insert("value".to_string(), Value::String(value));
					option_attributes.insert("style".to_string(), Value::from(style.as_str()));
					if selected.iter().any(|s| s == key) {
						option_attributes.insert("selected".to_string(), Value::Bool(true));
					}

					html.push_str(&indent);
					html.push_str(&tag("option", &option_attributes, Some(&label)));
					html.push('\n');
				}
			}
		}
		html
	}

	/// A `<textarea>`; the value becomes its content.
	pub fn textarea(&self, name: &str, value: &Value, attributes: &Attributes) -> FormResult<String> {
		let mut attributes = attributes.clone();
		attributes.insert("name".to_string(), Value::from(name));
		attributes.shift_remove("value");

		let content = match value {
			Value::Array(_) | Value::Object(_) => String::new(),
			other => value_to_string(other),
		};
		let content = if self.should_prep(&mut attributes) {
			self.services.value_prep().prep(&content)
		} else {
			content
		};

		self.apply_auto_id(&mut attributes);
		Ok(tag("textarea", &without_label(attributes), Some(&content)))
	}

	/// A `<button>`; its content is `value`, or the name when no value is
	/// given.
	pub fn button(&self, name: &str, value: Option<&Value>, attributes: &Attributes) -> FormResult<String> {
		let mut attributes = attributes.clone();
		attributes.insert("name".to_string(), Value::from(name));

		let content = value
			.filter(|value| !value.is_null())
			.map(value_to_string)
			.unwrap_or_else(|| name.to_string());

		self.apply_auto_id(&mut attributes);
		Ok(tag("button", &without_label(attributes), Some(&content)))
	}

	/// A `<label>`.
	///
	/// When `for` is unset, auto-id is on and `id` is given, `for` points at
	/// the prefixed id. The text is looked up in the translator and falls
	/// back to `label` itself.
	///
	/// # Examples
	///
	/// ```
	/// use formwork_forms::config::ConfigMap;
	/// use formwork_forms::renderer::Renderer;
	/// use formwork_forms::services::FormServices;
	/// use formwork_forms::value::Attributes;
	///
	/// let config = ConfigMap::new();
	/// let services = FormServices::default();
	/// let renderer = Renderer::new(&config, &services);
	///
	/// assert_eq!(
	///     renderer.label("Email", Some("email"), &Attributes::new()),
	///     "<label for=\"form_email\">Email</label>"
	/// );
	/// ```
	pub fn label(&self, label: &str, id: Option<&str>, attributes: &Attributes) -> String {
		let mut attributes = attributes.clone();
		if is_blank(&attributes, "for") && self.auto_id() {
			if let Some(id) = id.filter(|id| !id.is_empty()) {
				attributes.insert(
					"for".to_string(),
					Value::String(format!("{}{}", self.auto_id_prefix(), id)),
				);
			}
		}

		let text = self
			.services
			.translator()
			.translate(label)
			.filter(|text| !text.is_empty())
			.unwrap_or_else(|| label.to_string());

		tag("label", &without_label(attributes), Some(&text))
	}

	fn checkable(
		&self,
		input_type: &str,
		name: &str,
		value: &Value,
		checked: Option<&Value>,
		attributes: &Attributes,
	) -> FormResult<String> {
		let mut attributes = named(name, value, attributes);
		let is_checked = match checked {
			None | Some(Value::Null) => false,
			Some(Value::Bool(flag)) => *flag,
			Some(Value::Array(_)) | Some(Value::Object(_)) => false,
			Some(candidate) => scalar_eq(candidate, value),
		};
		if is_checked {
			attributes.insert("checked".to_string(), Value::from("checked"));
		}
		self.typed_input(input_type, attributes)
	}

	fn typed_input(&self, input_type: &str, mut attributes: Attributes) -> FormResult<String> {
		attributes.insert("type".to_string(), Value::from(input_type));
		self.input_with(&attributes)
	}

	fn finish_input(&self, mut attributes: Attributes) -> FormResult<String> {
		let input_type = match attributes.get("type") {
			Some(value) if is_truthy(value) => value_to_string(value),
			_ => "text".to_string(),
		};
		if !VALID_INPUT_TYPES.contains(&input_type.as_str()) {
			return Err(FormError::InvalidInputType(input_type));
		}
		attributes.insert("type".to_string(), Value::String(input_type));

		let element = attributes
			.shift_remove("tag")
			.filter(is_truthy)
			.map(|value| value_to_string(&value))
			.unwrap_or_else(|| "input".to_string());

		if self.should_prep(&mut attributes) {
			let raw = attributes
				.get("value")
				.map(value_to_string)
				.unwrap_or_default();
			let prepped = self.services.value_prep().prep(&raw);
			attributes.insert("value".to_string(), Value::String(prepped));
		}

		self.apply_auto_id(&mut attributes);
		Ok(tag(&element, &without_label(attributes), None))
	}

	/// Consume the `dont_prep` flag and report whether values get prepared.
	fn should_prep(&self, attributes: &mut Attributes) -> bool {
		let dont_prep = attributes
			.shift_remove("dont_prep")
			.is_some_and(|value| is_truthy(&value));
		!dont_prep && self.prep_value()
	}

	fn apply_auto_id(&self, attributes: &mut Attributes) {
		if !is_blank(attributes, "id") || !self.auto_id() {
			return;
		}
		let name = attributes.get("name").map(value_to_string).unwrap_or_default();
		attributes.insert(
			"id".to_string(),
			Value::String(format!("{}{}", self.auto_id_prefix(), name)),
		);
	}
}

/// Copy `attributes` with `name` and `value` set. Keys already present keep
/// their position.
fn named(name: &str, value: &Value, attributes: &Attributes) -> Attributes {
	let mut attributes = attributes.clone();
	attributes.insert("name".to_string(), Value::from(name));
	attributes.insert("value".to_string(), Value::String(value_to_string(value)));
	attributes
}

fn without_label(mut attributes: Attributes) -> Attributes {
	attributes.shift_remove("label");
	attributes
}

fn is_selection(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Array(items) => !items.is_empty(),
		_ => true,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::services::{CsrfTokenField, EscapeHtml, StaticUrl};
	use crate::value::attrs;
	use rstest::{fixture, rstest};
	use serde_json::json;

	#[fixture]
	fn services() -> FormServices {
		FormServices::default().with_urls(StaticUrl::new("https://example.com/"))
	}

	fn no_auto_id() -> ConfigMap {
		attrs(json!({"auto_id": false}))
	}

	#[rstest]
	fn test_open_defaults(services: FormServices) {
		let config = ConfigMap::new();
		let renderer = Renderer::new(&config, &services);
		assert_eq!(
			renderer.open(&Attributes::new(), &Attributes::new()).unwrap(),
			"<form action=\"https://example.com/\" accept-charset=\"utf-8\" method=\"post\">"
		);
	}

	#[rstest]
	fn test_open_resolves_relative_action(services: FormServices) {
		let config = no_auto_id();
		let renderer = Renderer::new(&config, &services);
		let attributes = attrs(json!({"action": "users/save", "method": "get"}));
		let hidden = attrs(json!({"step": 2}));
		assert_eq!(
			renderer.open(&attributes, &hidden).unwrap(),
			"<form action=\"https://example.com/users/save\" method=\"get\" accept-charset=\"utf-8\">\n<input name=\"step\" value=\"2\" type=\"hidden\" />"
		);
	}

	#[rstest]
	fn test_open_keeps_absolute_action_and_appends_csrf(services: FormServices) {
		let services = services.with_csrf(CsrfTokenField::new("xyz"));
		let config = ConfigMap::new();
		let renderer = Renderer::new(&config, &services);
		let html = renderer
			.open(&attrs(json!({"action": "http://other.test/post"})), &Attributes::new())
			.unwrap();
		assert!(html.starts_with("<form action=\"http://other.test/post\""));
		assert!(html.ends_with("\n<input type=\"hidden\" name=\"_token\" value=\"xyz\" />"));
	}

	#[rstest]
	#[case("email")]
	#[case("datetime-local")]
	#[case("week")]
	fn test_input_accepts_valid_types(services: FormServices, #[case] input_type: &str) {
		let config = no_auto_id();
		let renderer = Renderer::new(&config, &services);
		let html = renderer
			.input("f", &json!(""), &attrs(json!({"type": input_type})))
			.unwrap();
		assert!(html.contains(&format!("type=\"{}\"", input_type)));
	}

	#[rstest]
	fn test_input_rejects_unknown_type(services: FormServices) {
		let config = ConfigMap::new();
		let renderer = Renderer::new(&config, &services);
		let result = renderer.input("f", &json!(""), &attrs(json!({"type": "bogus"})));
		assert!(matches!(result, Err(FormError::InvalidInputType(t)) if t == "bogus"));
	}

	#[rstest]
	fn test_input_prep_and_dont_prep(services: FormServices) {
		let services = services.with_value_prep(EscapeHtml);
		let config = no_auto_id();
		let renderer = Renderer::new(&config, &services);

		let prepped = renderer.input("q", &json!("<b>"), &Attributes::new()).unwrap();
		assert_eq!(prepped, "<input name=\"q\" value=\"&lt;b&gt;\" type=\"text\" />");

		let raw = renderer
			.input("q", &json!("<b>"), &attrs(json!({"dont_prep": true})))
			.unwrap();
		assert_eq!(raw, "<input name=\"q\" value=\"<b>\" type=\"text\" />");
	}

	#[rstest]
	fn test_input_prep_disabled_by_config(services: FormServices) {
		let services = services.with_value_prep(EscapeHtml);
		let config = attrs(json!({"auto_id": false, "prep_value": false}));
		let renderer = Renderer::new(&config, &services);
		let html = renderer.input("q", &json!("a&b"), &Attributes::new()).unwrap();
		assert_eq!(html, "<input name=\"q\" value=\"a&b\" type=\"text\" />");
	}

	#[rstest]
	fn test_input_tag_override_and_label_dropped(services: FormServices) {
		let config = no_auto_id();
		let renderer = Renderer::new(&config, &services);
		let html = renderer
			.input("q", &json!("v"), &attrs(json!({"tag": "custom", "label": "Q"})))
			.unwrap();
		assert_eq!(html, "<custom name=\"q\" value=\"v\" type=\"text\" />");
	}

	#[rstest]
	fn test_radio_checked_rules(services: FormServices) {
		let config = no_auto_id();
		let renderer = Renderer::new(&config, &services);
		let none = Attributes::new();

		let forced = renderer.radio("r", &json!("a"), Some(&json!(true)), &none).unwrap();
		assert!(forced.contains("checked=\"checked\""));

		let matched = renderer.radio("r", &json!(1), Some(&json!("1")), &none).unwrap();
		assert!(matched.contains("checked=\"checked\""));

		let unmatched = renderer.radio("r", &json!("a"), Some(&json!("b")), &none).unwrap();
		assert!(!unmatched.contains("checked"));
	}

	#[rstest]
	fn test_select_with_groups_and_multiple(services: FormServices) {
		let config = ConfigMap::new();
		let renderer = Renderer::new(&config, &services);
		let options = SelectOptions::from_value(&json!({
			"a": "A",
			"Group": {"b": "B", "c": "C"}
		}));
		let html = renderer
			.select("pick", &json!(["a", "c"]), Some(&options), &attrs(json!({"multiple": "multiple"})))
			.unwrap();
		assert_eq!(
			html,
			"<select multiple=\"multiple\" name=\"pick[]\" id=\"form_pick\">\n\
			 \t<option value=\"a\" style=\"text-indent: 0px;\" selected=\"selected\">A</option>\n\
			 \t<optgroup label=\"Group\" style=\"text-indent: 0px;\">\n\
			 \t\t<option value=\"b\" style=\"text-indent: 10px;\">B</option>\n\
			 \t\t<option value=\"c\" style=\"text-indent: 10px;\" selected=\"selected\">C</option>\n\
			 \t</optgroup>\n\
			 </select>"
		);
	}

	#[rstest]
	fn test_select_empty_options_versus_missing(services: FormServices) {
		let config = no_auto_id();
		let renderer = Renderer::new(&config, &services);
		let empty = SelectOptions::new();
		assert_eq!(
			renderer.select("s", &json!(null), Some(&empty), &Attributes::new()).unwrap(),
			"<select name=\"s\">\n</select>"
		);
		assert!(matches!(
			renderer.select("s", &json!(null), None, &Attributes::new()),
			Err(FormError::MissingOptions(name)) if name == "s"
		));
	}

	#[rstest]
	fn test_select_selected_attribute_beats_values(services: FormServices) {
		let config = no_auto_id();
		let renderer = Renderer::new(&config, &services);
		let options = SelectOptions::from_value(&json!({"a": "Alpha", "b": "Beta"}));
		let html = renderer
			.select("s", &json!("a"), Some(&options), &attrs(json!({"selected": ["b"]})))
			.unwrap();
		assert!(html.contains("<option value=\"a\" style=\"text-indent: 0px;\">Alpha</option>"));
		assert!(html.contains("<option value=\"b\" style=\"text-indent: 0px;\" selected=\"selected\">Beta</option>"));
		assert!(html.starts_with("<select name=\"s\">"));
	}

	#[rstest]
	#[case("password")]
	#[case("file")]
	#[case("reset")]
	#[case("submit")]
	fn test_fixed_type_inputs(services: FormServices, #[case] input_type: &str) {
		let config = no_auto_id();
		let renderer = Renderer::new(&config, &services);
		let attributes = attrs(json!({"type": "text", "class": "wide"}));
		let value = json!("v");
		let html = match input_type {
			"password" => renderer.password("f", &value, &attributes),
			"file" => renderer.file("f", &attributes),
			"reset" => renderer.reset("f", &value, &attributes),
			_ => renderer.submit("f", &value, &attributes),
		}
		.unwrap();
		assert!(html.contains(&format!("type=\"{}\"", input_type)));
		assert!(!html.contains("type=\"text\""));
		assert!(html.contains("name=\"f\""));
		assert!(html.contains("class=\"wide\""));
	}

	#[rstest]
	fn test_select_falls_back_to_default(services: FormServices) {
		let config = no_auto_id();
		let renderer = Renderer::new(&config, &services);
		let options = SelectOptions::from_value(&json!({"x": "X", "y": "Y"}));
		let html = renderer
			.select("s", &json!([]), Some(&options), &attrs(json!({"default": "y"})))
			.unwrap();
		assert!(html.contains("<option value=\"y\" style=\"text-indent: 0px;\" selected=\"selected\">Y</option>"));
		assert!(!html.contains("default="));
	}

	#[rstest]
	fn test_textarea_and_button(services: FormServices) {
		let config = no_auto_id();
		let renderer = Renderer::new(&config, &services);
		assert_eq!(
			renderer
				.textarea("bio", &json!("hello"), &attrs(json!({"value": "hello", "rows": 3})))
				.unwrap(),
			"<textarea rows=\"3\" name=\"bio\">hello</textarea>"
		);
		assert_eq!(
			renderer.button("go", None, &Attributes::new()).unwrap(),
			"<button name=\"go\">go</button>"
		);
	}

	#[rstest]
	fn test_label_translation_and_explicit_for(services: FormServices) {
		let mut catalog = std::collections::HashMap::new();
		catalog.insert("name".to_string(), "Naam".to_string());
		let services = services.with_translator(catalog);
		let config = ConfigMap::new();
		let renderer = Renderer::new(&config, &services);
		assert_eq!(
			renderer.label("name", Some("ignored"), &attrs(json!({"for": "x"}))),
			"<label for=\"x\">Naam</label>"
		);
	}

	#[rstest]
	fn test_fieldset_open_with_legend(services: FormServices) {
		let config = ConfigMap::new();
		let renderer = Renderer::new(&config, &services);
		assert_eq!(
			renderer.fieldset_open(&attrs(json!({"class": "box", "legend": "Address"})), None),
			"<fieldset class=\"box\">\n<legend>Address</legend>"
		);
		assert_eq!(renderer.fieldset_open(&Attributes::new(), None), "<fieldset>");
		assert_eq!(renderer.fieldset_close(), "</fieldset>");
	}

	#[rstest]
	fn test_local_config_overrides_defaults(services: FormServices) {
		let config = attrs(json!({"auto_id_prefix": "x_", "nested": {"key": 1}}));
		let renderer = Renderer::new(&config, &services);
		assert_eq!(renderer.auto_id_prefix(), "x_");
		assert_eq!(renderer.get_config("nested.key"), Some(json!(1)));
		assert_eq!(renderer.config_str("form_method").as_deref(), Some("post"));
	}
}
