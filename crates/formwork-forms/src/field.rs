//! Form fields
//!
//! A [`Field`] is one control: its name, type, label, value, HTML attributes
//! and, for choice controls, its options. `type`, `value` and `label` are
//! mirrored into the attribute map so that the renderer only ever looks at
//! attributes.

use crate::error::{FormError, FormResult};
use crate::options::SelectOptions;
use crate::renderer::Renderer;
use crate::template::{Template, TemplateContext};
use crate::value::{Attributes, is_blank, is_truthy, scalar_eq, value_selects, value_to_string};
use serde_json::Value;
use std::fmt;

/// Kind of control a field renders as
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldType {
	#[default]
	Text,
	Hidden,
	Radio,
	Checkbox,
	Select,
	Textarea,
	Button,
	/// Any other `<input>` type, such as `email` or `password`
	Input(String),
	/// Kept in the data model but rendered as nothing
	Suppressed,
}

impl FieldType {
	/// Parse a type name.
	///
	/// `"false"` suppresses rendering, and so does the empty string, which is
	/// what a boolean `false` type attribute coerces to.
	///
	/// # Examples
	///
	/// ```
	/// use formwork_forms::field::FieldType;
	///
	/// assert_eq!(FieldType::parse("select"), FieldType::Select);
	/// assert_eq!(FieldType::parse("email"), FieldType::Input("email".to_string()));
	/// assert_eq!(FieldType::parse("false"), FieldType::Suppressed);
	/// assert_eq!(FieldType::parse(""), FieldType::Suppressed);
	/// ```
	pub fn parse(name: &str) -> Self {
		match name {
			"" | "false" => FieldType::Suppressed,
			"text" => FieldType::Text,
			"hidden" => FieldType::Hidden,
			"radio" => FieldType::Radio,
			"checkbox" => FieldType::Checkbox,
			"select" => FieldType::Select,
			"textarea" => FieldType::Textarea,
			"button" => FieldType::Button,
			other => FieldType::Input(other.to_string()),
		}
	}

	/// Interpret an attribute value: `false` suppresses, `null` means text.
	pub fn from_value(value: &Value) -> Self {
		match value {
			Value::Bool(false) => FieldType::Suppressed,
			Value::Null => FieldType::Text,
			other => FieldType::parse(&value_to_string(other)),
		}
	}

	/// The `type` attribute value, if the type has one.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			FieldType::Text => Some("text"),
			FieldType::Hidden => Some("hidden"),
			FieldType::Radio => Some("radio"),
			FieldType::Checkbox => Some("checkbox"),
			FieldType::Select => Some("select"),
			FieldType::Textarea => Some("textarea"),
			FieldType::Button => Some("button"),
			FieldType::Input(name) => Some(name),
			FieldType::Suppressed => None,
		}
	}
}

impl fmt::Display for FieldType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.as_str().unwrap_or("false"))
	}
}

impl From<&str> for FieldType {
	fn from(name: &str) -> Self {
		FieldType::parse(name)
	}
}

/// Markup produced for a field before templating
enum Built {
	Single(String),
	/// `(label markup, control markup)` per option
	Multi(Vec<(String, String)>),
}

/// A single form control
///
/// # Examples
///
/// ```
/// use formwork_forms::field::{Field, FieldType};
/// use formwork_forms::value::attrs;
/// use serde_json::json;
///
/// let field = Field::new("address[city]", "City", attrs(json!({
///     "type": "text",
///     "value": "Utrecht",
///     "maxlength": 40
/// })))
/// .unwrap();
///
/// assert_eq!(field.base_name(), "city");
/// assert_eq!(field.field_type(), &FieldType::Text);
/// assert_eq!(field.value(), &json!("Utrecht"));
/// assert_eq!(field.attribute("label"), Some(&json!("City")));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
	name: String,
	base_name: String,
	field_type: FieldType,
	label: Option<String>,
	value: Value,
	description: Option<String>,
	attributes: Attributes,
	options: SelectOptions,
	template: Option<String>,
	error: Option<String>,
	fieldset: Option<String>,
}

impl Field {
	/// Create a field.
	///
	/// Attributes that have a setter (`label`, `type`, `value`, `options`,
	/// `description`, `template`) go through it; everything else is kept as
	/// a plain HTML attribute. A `name` attribute is ignored, and a
	/// non-empty `label` argument wins over a `label` attribute.
	pub fn new(
		name: impl Into<String>,
		label: impl Into<String>,
		attributes: Attributes,
	) -> FormResult<Self> {
		let name = name.into();
		if name.is_empty() {
			return Err(FormError::InvalidField(
				"field name may not be empty".to_string(),
			));
		}

		let mut field = Self {
			base_name: derive_base_name(&name),
			name,
			field_type: FieldType::default(),
			label: None,
			value: Value::Null,
			description: None,
			attributes: Attributes::new(),
			options: SelectOptions::new(),
			template: None,
			error: None,
			fieldset: None,
		};

		let mut attributes = attributes;
		attributes.shift_remove("name");

		for key in ["label", "type", "value", "options", "description", "template"] {
			let Some(value) = attributes.shift_remove(key) else {
				continue;
			};
			match key {
				"label" => {
					field.set_label(value_to_string(&value));
				}
				"type" => {
					field.set_type(FieldType::from_value(&value));
				}
				"value" => {
					field.set_value(value, false);
				}
				"options" => {
					field.set_options(SelectOptions::from_value(&value), true);
				}
				"description" => {
					field.set_description(value_to_string(&value));
				}
				_ => {
					field.set_template(Some(value_to_string(&value)).filter(|t| !t.is_empty()));
				}
			}
		}

		let field_type = field.field_type.clone();
		field.set_type(field_type);

		let label = label.into();
		if !label.is_empty() {
			field.set_label(label);
		}

		field.attributes.extend(attributes);
		Ok(field)
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// The last bracketed group of the name, or the name itself
	pub fn base_name(&self) -> &str {
		&self.base_name
	}

	pub fn field_type(&self) -> &FieldType {
		&self.field_type
	}

	pub fn label(&self) -> Option<&str> {
		self.label.as_deref()
	}

	pub fn value(&self) -> &Value {
		&self.value
	}

	pub fn description(&self) -> Option<&str> {
		self.description.as_deref()
	}

	pub fn attributes(&self) -> &Attributes {
		&self.attributes
	}

	pub fn attribute(&self, key: &str) -> Option<&Value> {
		self.attributes.get(key)
	}

	pub fn options(&self) -> &SelectOptions {
		&self.options
	}

	pub fn template(&self) -> Option<&str> {
		self.template.as_deref()
	}

	pub fn error(&self) -> Option<&str> {
		self.error.as_deref()
	}

	/// Name of the fieldset this field is registered in
	pub fn fieldset(&self) -> Option<&str> {
		self.fieldset.as_deref()
	}

	pub(crate) fn set_owner(&mut self, fieldset: Option<String>) {
		self.fieldset = fieldset;
	}

	pub fn set_type(&mut self, field_type: impl Into<FieldType>) -> &mut Self {
		self.field_type = field_type.into();
		let mirrored = self.field_type.as_str().map(Value::from).unwrap_or(Value::Null);
		self.set_attribute("type", mirrored)
	}

	/// Set one attribute. `Null` removes it.
	pub fn set_attribute(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
		let key = key.into();
		if value.is_null() {
			self.attributes.shift_remove(&key);
		} else {
			self.attributes.insert(key, value);
		}
		self
	}

	/// Set several attributes at once, with the same `Null` rule as
	/// [`Field::set_attribute`].
	pub fn set_attributes(&mut self, attributes: Attributes) -> &mut Self {
		for (key, value) in attributes {
			self.set_attribute(key, value);
		}
		self
	}

	pub fn set_label(&mut self, label: impl Into<String>) -> &mut Self {
		let label = label.into();
		self.set_attribute("label", Value::String(label.clone()));
		self.label = Some(label);
		self
	}

	/// Set the value.
	///
	/// With `repopulate` on a radio or checkbox that has no options, the
	/// stored value is left alone and the control is marked `checked` when
	/// `value` matches it.
	///
	/// # Examples
	///
	/// ```
	/// use formwork_forms::field::Field;
	/// use formwork_forms::value::attrs;
	/// use serde_json::json;
	///
	/// let mut field = Field::new("agree", "", attrs(json!({"type": "checkbox", "value": "1"}))).unwrap();
	///
	/// field.set_value(json!("2"), true);
	/// assert_eq!(field.attribute("checked"), None);
	///
	/// field.set_value(json!("1"), true);
	/// assert_eq!(field.attribute("checked"), Some(&json!("checked")));
	/// assert_eq!(field.value(), &json!("1"));
	/// ```
	pub fn set_value(&mut self, value: Value, repopulate: bool) -> &mut Self {
		let checkable = matches!(self.field_type, FieldType::Radio | FieldType::Checkbox);
		if repopulate && checkable && self.options.is_empty() {
			if self.value == value || scalar_eq(&self.value, &value) {
				self.set_attribute("checked", Value::from("checked"));
			}
			return self;
		}

		self.set_attribute("value", value.clone());
		self.value = value;
		self
	}

	pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
		self.description = Some(description.into());
		self
	}

	/// Override the field template; `None` falls back to configuration.
	pub fn set_template(&mut self, template: Option<String>) -> &mut Self {
		self.template = template;
		self
	}

	/// Set a single option. A dotted `value` such as `"fruit.apple"` writes
	/// into the `fruit` group.
	pub fn set_option(&mut self, value: &str, label: impl Into<String>) -> &mut Self {
		self.options.set(value, label);
		self
	}

	/// Replace the options wholesale when `replace` is set or none exist yet,
	/// deep-merge them otherwise.
	pub fn set_options(&mut self, options: SelectOptions, replace: bool) -> &mut Self {
		if replace || self.options.is_empty() {
			self.options = options;
		} else {
			self.options.merge(options);
		}
		self
	}

	/// Attach a validation message, shown when inline errors are enabled.
	pub fn set_error(&mut self, error: Option<String>) -> &mut Self {
		self.error = error;
		self
	}

	/// Render the field through `renderer`.
	///
	/// Hidden fields and fields that produce no markup are returned as is;
	/// everything else is wrapped in the field template.
	pub fn build(&self, renderer: &Renderer<'_>) -> FormResult<String> {
		let mut attributes = self.attributes.clone();
		if renderer.auto_id() && is_blank(&attributes, "id") {
			let id = format!(
				"{}{}",
				renderer.auto_id_prefix(),
				self.name.replace('[', "-").replace(']', "")
			);
			attributes.insert("id".to_string(), Value::String(id));
		}

		let kind = match attributes.get("tag").filter(|tag| is_truthy(tag)) {
			Some(tag) => FieldType::parse(&value_to_string(tag)),
			None => self.field_type.clone(),
		};
		if !matches!(kind, FieldType::Text | FieldType::Input(_)) {
			attributes.shift_remove("tag");
		}

		let built = match &kind {
			FieldType::Hidden => Built::Single(renderer.hidden(&self.name, &self.value, &attributes)?),
			FieldType::Radio | FieldType::Checkbox if !self.options.is_empty() => {
				Built::Multi(self.build_choices(&kind, renderer, &attributes)?)
			}
			FieldType::Radio => Built::Single(renderer.radio(&self.name, &self.value, None, &attributes)?),
			FieldType::Checkbox => {
				Built::Single(renderer.checkbox(&self.name, &self.value, None, &attributes)?)
			}
			FieldType::Select => {
				attributes.shift_remove("type");
				let mut name = self.name.clone();
				if attributes.get("multiple").is_some_and(|v| !v.is_null()) {
					name.push_str("[]");
				}
				Built::Single(renderer.select(&name, &self.value, Some(&self.options), &attributes)?)
			}
			FieldType::Textarea => {
				attributes.shift_remove("type");
				Built::Single(renderer.textarea(&self.name, &self.value, &attributes)?)
			}
			FieldType::Button => {
				Built::Single(renderer.button(&self.name, Some(&self.value), &attributes)?)
			}
			FieldType::Suppressed => Built::Single(String::new()),
			FieldType::Text | FieldType::Input(_) => {
				Built::Single(renderer.input(&self.name, &self.value, &attributes)?)
			}
		};

		match built {
			Built::Single(markup) if markup.is_empty() || self.field_type == FieldType::Hidden => {
				Ok(markup)
			}
			built => self.apply_template(built, renderer, &attributes),
		}
	}

	/// One labelled control per option.
	fn build_choices(
		&self,
		kind: &FieldType,
		renderer: &Renderer<'_>,
		attributes: &Attributes,
	) -> FormResult<Vec<(String, String)>> {
		let mut controls = Vec::with_capacity(self.options.len());

		for (i, (option_value, entry)) in self.options.iter().enumerate() {
			let option_label = entry.as_label().unwrap_or(option_value.as_str());

			let mut control = attributes.clone();
			let name = match kind {
				FieldType::Checkbox => format!("{}[{}]", self.name, i),
				_ => self.name.clone(),
			};
			control.insert("name".to_string(), Value::String(name));
			control.insert("value".to_string(), Value::from(option_value.as_str()));
			control.insert("label".to_string(), Value::from(option_label));
			if value_selects(&self.value, &Value::from(option_value.as_str())) {
				control.insert("checked".to_string(), Value::from("checked"));
			}

			let id = match control.get("id").filter(|id| is_truthy(id)) {
				Some(id) => Value::String(format!("{}_{}", value_to_string(id), i)),
				None => Value::Null,
			};
			control.insert("id".to_string(), id.clone());

			let mut label_attributes = Attributes::new();
			label_attributes.insert("for".to_string(), id);
			let label = renderer.label(option_label, None, &label_attributes);

			let markup = match kind {
				FieldType::Checkbox => renderer.checkbox_with(&control)?,
				_ => renderer.radio_with(&control)?,
			};
			controls.push((label, markup));
		}

		Ok(controls)
	}

	fn apply_template(
		&self,
		built: Built,
		renderer: &Renderer<'_>,
		attributes: &Attributes,
	) -> FormResult<String> {
		let required = if attributes.get("required").is_some_and(is_truthy) {
			renderer.config_str("required_mark").unwrap_or_default()
		} else {
			String::new()
		};
		let description = self.description.clone().unwrap_or_default();
		let (error_msg, error_class) = self.error_fragments(renderer)?;
		let label_text = self.label.as_deref().filter(|label| !label.is_empty());

		let (label, field) = match built {
			Built::Single(markup) => {
				let label = match label_text {
					Some(text) => {
						let mut label_attributes = Attributes::new();
						label_attributes.insert(
							"id".to_string(),
							Value::String(format!("label_{}", self.name)),
						);
						label_attributes.insert(
							"for".to_string(),
							attributes.get("id").cloned().unwrap_or(Value::Null),
						);
						label_attributes.insert(
							"class".to_string(),
							renderer.get_config("label_class").unwrap_or(Value::Null),
						);
						renderer.label(text, None, &label_attributes)
					}
					None => String::new(),
				};
				(label, markup)
			}
			Built::Multi(controls) => {
				let group_label = match label_text {
					Some(text) => {
						let source = renderer
							.config_str("group_label")
							.unwrap_or_else(|| "<span>{label}</span>".to_string());
						Template::parse(&source)?.render(&TemplateContext::new().with("label", text))
					}
					None => String::new(),
				};

				let source = self
					.template
					.clone()
					.or_else(|| renderer.config_str("multi_field_template"))
					.unwrap_or_default();
				let template = Template::parse_with_blocks(&source, &["fields"])?;

				if template.has_block("fields") {
					let mut context = TemplateContext::new()
						.with("group_label", group_label)
						.with("required", required.as_str())
						.with("description", description)
						.with("error_msg", error_msg)
						.with("error_class", error_class);
					for (label, field) in controls {
						context.push_item(
							"fields",
							TemplateContext::new()
								.with("label", label)
								.with("required", required.as_str())
								.with("field", field),
						);
					}
					return Ok(template.render(&context));
				}

				let joined = controls
					.into_iter()
					.map(|(_, field)| field)
					.collect::<Vec<_>>()
					.join(" ");
				(group_label, joined)
			}
		};

		let source = self
			.template
			.clone()
			.or_else(|| renderer.config_str("field_template"))
			.unwrap_or_else(|| "{label}{required} {field} {description}".to_string());
		let context = TemplateContext::new()
			.with("label", label)
			.with("required", required)
			.with("field", field)
			.with("description", description)
			.with("field_id", format!("col_{}", self.name))
			.with("error_msg", error_msg)
			.with("error_class", error_class);

		Ok(Template::parse(&source)?.render(&context))
	}

	/// `(error_msg, error_class)` placeholder values.
	fn error_fragments(&self, renderer: &Renderer<'_>) -> FormResult<(String, String)> {
		let Some(error) = self.error.as_deref() else {
			return Ok((String::new(), String::new()));
		};

		let error_msg = if renderer.config_bool("inline_errors", false) {
			let source = renderer.config_str("error_template").unwrap_or_default();
			Template::parse(&source)?.render(&TemplateContext::new().with("error_msg", error))
		} else {
			String::new()
		};
		let error_class = renderer.config_str("error_class").unwrap_or_default();

		Ok((error_msg, error_class))
	}
}

fn derive_base_name(name: &str) -> String {
	match (name.find('['), name.rfind('[')) {
		(Some(first), Some(last)) if first > 0 => {
			name[last + 1..].trim_end_matches(']').to_string()
		}
		_ => name.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::ConfigMap;
	use crate::services::FormServices;
	use crate::value::attrs;
	use rstest::rstest;
	use serde_json::json;

	fn render(field: &Field, config: serde_json::Value) -> FormResult<String> {
		let config: ConfigMap = attrs(config);
		let services = FormServices::default();
		field.build(&Renderer::new(&config, &services))
	}

	#[rstest]
	#[case("email", "email")]
	#[case("addr[city]", "city")]
	#[case("rows[0][name]", "name")]
	#[case("tags[]", "")]
	#[case("[odd]", "[odd]")]
	fn test_base_name(#[case] name: &str, #[case] expected: &str) {
		assert_eq!(derive_base_name(name), expected);
	}

	#[rstest]
	fn test_empty_name_rejected() {
		assert!(matches!(
			Field::new("", "Label", Attributes::new()),
			Err(FormError::InvalidField(_))
		));
	}

	#[rstest]
	fn test_constructor_attribute_order() {
		let field = Field::new(
			"username",
			"User",
			attrs(json!({"class": "wide", "name": "ignored", "value": "ann", "required": true})),
		)
		.unwrap();
		let keys: Vec<_> = field.attributes().keys().map(String::as_str).collect();
		assert_eq!(keys, vec!["value", "type", "label", "class", "required"]);
		assert_eq!(field.name(), "username");
	}

	#[rstest]
	fn test_label_argument_wins() {
		let field = Field::new("a", "Argument", attrs(json!({"label": "Attribute"}))).unwrap();
		assert_eq!(field.label(), Some("Argument"));
		assert_eq!(field.attribute("label"), Some(&json!("Argument")));

		let field = Field::new("a", "", attrs(json!({"label": "Attribute"}))).unwrap();
		assert_eq!(field.label(), Some("Attribute"));
	}

	#[rstest]
	#[case(json!(false))]
	#[case(json!("false"))]
	fn test_false_type_suppresses(#[case] field_type: Value) {
		let field = Field::new("secret", "", attrs(json!({"type": field_type}))).unwrap();
		assert_eq!(field.field_type(), &FieldType::Suppressed);
		assert_eq!(field.attribute("type"), None);
		assert_eq!(render(&field, json!({})).unwrap(), "");
	}

	#[rstest]
	fn test_set_type_false_renders_nothing() {
		let mut field = Field::new("secret", "Secret", attrs(json!({"value": "x"}))).unwrap();
		field.set_type("false");
		assert_eq!(field.field_type(), &FieldType::Suppressed);
		assert_eq!(render(&field, json!({})).unwrap(), "");
	}

	#[rstest]
	fn test_set_attributes_null_removes() {
		let mut field = Field::new("a", "", attrs(json!({"class": "x", "title": "old"}))).unwrap();
		field.set_attributes(attrs(json!({"class": null, "title": "new", "rows": 3})));
		assert_eq!(field.attribute("class"), None);
		assert_eq!(field.attribute("title"), Some(&json!("new")));
		assert_eq!(field.attribute("rows"), Some(&json!(3)));
	}

	#[rstest]
	fn test_build_tag_override_dispatches() {
		let field = Field::new("bio", "", attrs(json!({"tag": "textarea", "value": "hello"}))).unwrap();
		assert_eq!(field.field_type(), &FieldType::Text);
		let html = render(&field, json!({"auto_id": false, "field_template": "{field}"})).unwrap();
		assert_eq!(html, "<textarea name=\"bio\">hello</textarea>");
	}

	#[rstest]
	fn test_set_attribute_null_removes() {
		let mut field = Field::new("a", "", attrs(json!({"class": "x"}))).unwrap();
		field.set_attribute("class", Value::Null);
		assert_eq!(field.attribute("class"), None);
	}

	#[rstest]
	fn test_set_value_null_removes_mirror() {
		let mut field = Field::new("a", "", attrs(json!({"value": "x"}))).unwrap();
		field.set_value(Value::Null, false);
		assert_eq!(field.value(), &Value::Null);
		assert_eq!(field.attribute("value"), None);
	}

	#[rstest]
	fn test_set_options_merge_and_replace() {
		let mut field = Field::new("c", "", attrs(json!({"type": "select"}))).unwrap();
		field.set_options(SelectOptions::from_value(&json!({"a": "A"})), false);
		field.set_options(SelectOptions::from_value(&json!({"b": "B"})), false);
		assert_eq!(field.options().len(), 2);

		field.set_options(SelectOptions::from_value(&json!({"z": "Z"})), true);
		assert_eq!(field.options().len(), 1);

		field.set_option("grp.y", "Y");
		assert!(field.options().get("grp").and_then(|e| e.as_group()).is_some());
	}

	#[rstest]
	fn test_build_text_with_label_and_required() {
		let field = Field::new("email", "Email", attrs(json!({"required": true}))).unwrap();
		let html = render(&field, json!({"field_template": "{label}{required}|{field}|{field_id}"})).unwrap();
		assert_eq!(
			html,
			"<label id=\"label_email\" for=\"form_email\">Email</label>*|\
			 <input type=\"text\" required=\"required\" id=\"form_email\" name=\"email\" value=\"\" />|col_email"
		);
	}

	#[rstest]
	fn test_build_hidden_skips_template() {
		let field = Field::new("token", "", attrs(json!({"type": "hidden", "value": "abc"}))).unwrap();
		assert_eq!(
			render(&field, json!({"auto_id": false})).unwrap(),
			"<input type=\"hidden\" value=\"abc\" name=\"token\" />"
		);
	}

	#[rstest]
	fn test_build_bracketed_auto_id() {
		let field = Field::new("addr[city]", "", Attributes::new()).unwrap();
		let html = render(&field, json!({"field_template": "{field}"})).unwrap();
		assert_eq!(
			html,
			"<input type=\"text\" id=\"form_addr-city\" name=\"addr[city]\" value=\"\" />"
		);
	}

	#[rstest]
	fn test_build_checkbox_group() {
		let mut field = Field::new("colors", "Colors", attrs(json!({"type": "checkbox"}))).unwrap();
		field
			.set_options(SelectOptions::from_value(&json!({"r": "Red", "g": "Green"})), true)
			.set_value(json!(["g"]), false);

		let html = render(
			&field,
			json!({"multi_field_template": "{group_label}:{fields}[{label}{field}]{fields}"}),
		)
		.unwrap();
		assert_eq!(
			html,
			"<span>Colors</span>:\
			 [<label for=\"form_colors_0\">Red</label><input type=\"checkbox\" value=\"r\" id=\"form_colors_0\" name=\"colors[0]\" />]\
			 [<label for=\"form_colors_1\">Green</label><input type=\"checkbox\" value=\"g\" id=\"form_colors_1\" name=\"colors[1]\" checked=\"checked\" />]"
		);
	}

	#[rstest]
	fn test_build_radio_group_without_block_falls_back() {
		let mut field = Field::new("size", "Size", attrs(json!({"type": "radio"}))).unwrap();
		field.set_options(SelectOptions::from_value(&json!({"s": "S", "m": "M"})), true);

		let html = render(
			&field,
			json!({
				"auto_id": false,
				"multi_field_template": "no block here",
				"field_template": "{label}={field}"
			}),
		)
		.unwrap();
		assert_eq!(
			html,
			"<span>Size</span>=<input type=\"radio\" name=\"size\" value=\"s\" /> <input type=\"radio\" name=\"size\" value=\"m\" />"
		);
	}

	#[rstest]
	fn test_build_unpaired_block_is_error() {
		let mut field = Field::new("size", "", attrs(json!({"type": "radio"}))).unwrap();
		field.set_options(SelectOptions::from_value(&json!({"s": "S"})), true);
		let result = render(&field, json!({"multi_field_template": "{fields} only once"}));
		assert!(matches!(result, Err(FormError::Template(_))));
	}

	#[rstest]
	fn test_inline_errors() {
		let mut field = Field::new("age", "", Attributes::new()).unwrap();
		field.set_error(Some("Too young".to_string()));
		let template = json!({"field_template": "{error_class}|{error_msg}"});

		assert_eq!(render(&field, template.clone()).unwrap(), "validation_error|");

		let mut config = template;
		config["inline_errors"] = json!(true);
		assert_eq!(
			render(&field, config).unwrap(),
			"validation_error|<span>Too young</span>"
		);
	}

	#[rstest]
	fn test_field_template_override() {
		let mut field = Field::new("q", "", Attributes::new()).unwrap();
		field.set_template(Some("<p>{field}</p>".to_string()));
		assert_eq!(
			render(&field, json!({"auto_id": false})).unwrap(),
			"<p><input type=\"text\" name=\"q\" value=\"\" /></p>"
		);
	}
}
