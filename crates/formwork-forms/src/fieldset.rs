//! Fieldsets
//!
//! A [`Fieldset`] is an ordered, named collection of [`Field`]s with its own
//! rendering configuration. Parent/child links between fieldsets are kept by
//! name and managed through the [`FieldsetRegistry`](crate::registry::FieldsetRegistry).
//!
//! ## Example
//!
//! ```
//! use formwork_forms::fieldset::Fieldset;
//! use formwork_forms::config::ConfigMap;
//! use formwork_forms::value::attrs;
//! use serde_json::json;
//!
//! let mut fieldset = Fieldset::new("signup", ConfigMap::new());
//! fieldset.add("email", "Email", attrs(json!({"type": "email"}))).unwrap();
//! fieldset.add("password", "Password", attrs(json!({"type": "password"}))).unwrap();
//!
//! let mut input = serde_json::Map::new();
//! input.insert("email".to_string(), json!("ann@example.com"));
//! fieldset.populate(&input, false);
//!
//! assert_eq!(fieldset.field("email").unwrap().value(), &json!("ann@example.com"));
//! assert!(fieldset.build(Some("signup/save")).unwrap().contains("name=\"password\""));
//! ```

use crate::config::{ConfigMap, lookup};
use crate::error::{FormError, FormResult};
use crate::field::Field;
use crate::renderer::Renderer;
use crate::services::{CSRF_FIELD_NAME, FormServices};
use crate::template::{Template, TemplateContext};
use crate::value::{Attributes, attrs, value_to_string};
use indexmap::map::Entry;
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Element a fieldset wraps its fields in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WrapperTag {
	/// A top-level `<form>`
	Form,
	/// A nested `<fieldset>`
	Fieldset,
	/// Any other element
	Custom(String),
}

impl WrapperTag {
	pub fn parse(tag: &str) -> Self {
		match tag {
			"" | "form" => WrapperTag::Form,
			"fieldset" => WrapperTag::Fieldset,
			other => WrapperTag::Custom(other.to_string()),
		}
	}

	pub fn as_str(&self) -> &str {
		match self {
			WrapperTag::Form => "form",
			WrapperTag::Fieldset => "fieldset",
			WrapperTag::Custom(tag) => tag,
		}
	}

	/// Configuration key holding the structural template for this wrapper.
	pub fn template_key(&self) -> String {
		format!("{}_template", self.as_str())
	}
}

/// Keyed input that fields can be populated from
///
/// Lookups try the exact key first and then walk nested objects (and
/// arrays, by index) along a dotted path.
pub trait InputSource {
	fn get_value(&self, key: &str) -> Option<&Value>;

	fn get_path(&self, path: &str) -> Option<&Value> {
		if let Some(value) = self.get_value(path) {
			return Some(value);
		}
		let mut segments = path.split('.');
		let mut current = self.get_value(segments.next()?)?;
		for segment in segments {
			current = match current {
				Value::Object(map) => map.get(segment)?,
				Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
				_ => return None,
			};
		}
		Some(current)
	}
}

impl InputSource for serde_json::Map<String, Value> {
	fn get_value(&self, key: &str) -> Option<&Value> {
		self.get(key)
	}
}

impl InputSource for HashMap<String, Value> {
	fn get_value(&self, key: &str) -> Option<&Value> {
		self.get(key)
	}
}

impl InputSource for IndexMap<String, Value> {
	fn get_value(&self, key: &str) -> Option<&Value> {
		self.get(key)
	}
}

/// Argument to [`Fieldset::add_entry`]
#[derive(Debug, Clone)]
pub enum FieldEntry {
	/// Create (or fetch) a field by name
	Name {
		name: String,
		label: String,
		attributes: Attributes,
	},
	/// A field definition with `name`, `label` and `attributes` keys
	Config(Attributes),
	/// An already built field to register
	Field(Field),
	/// Fieldsets nest through the registry, so this adds nothing
	Fieldset(String),
}

/// Types that know which fields describe them
///
/// # Examples
///
/// ```
/// use formwork_forms::config::ConfigMap;
/// use formwork_forms::error::FormResult;
/// use formwork_forms::fieldset::{Fieldset, FormModel};
/// use formwork_forms::value::Attributes;
/// use serde::Serialize;
/// use serde_json::json;
///
/// #[derive(Serialize)]
/// struct Profile {
///     nickname: String,
/// }
///
/// impl FormModel for Profile {
///     fn form_fields(fieldset: &mut Fieldset) -> FormResult<()> {
///         fieldset.add("nickname", "Nickname", Attributes::new())?;
///         Ok(())
///     }
/// }
///
/// let mut fieldset = Fieldset::new("profile", ConfigMap::new());
/// let profile = Profile { nickname: "annie".to_string() };
/// fieldset.add_model(Some(&profile)).unwrap();
///
/// assert_eq!(fieldset.field("nickname").unwrap().value(), &json!("annie"));
/// ```
pub trait FormModel: Serialize {
	fn form_fields(fieldset: &mut Fieldset) -> FormResult<()>;
}

/// Ordered collection of fields with rendering configuration
#[derive(Debug, Clone)]
pub struct Fieldset {
	name: String,
	fields: IndexMap<String, Field>,
	disabled: IndexSet<String>,
	config: ConfigMap,
	wrapper_tag: Option<WrapperTag>,
	parent: Option<String>,
	children: IndexSet<String>,
	services: Arc<FormServices>,
}

impl Fieldset {
	/// A fieldset using default collaborators.
	pub fn new(name: impl Into<String>, config: ConfigMap) -> Self {
		Self::with_services(name, config, Arc::new(FormServices::default()))
	}

	pub fn with_services(
		name: impl Into<String>,
		config: ConfigMap,
		services: Arc<FormServices>,
	) -> Self {
		Self {
			name: name.into(),
			fields: IndexMap::new(),
			disabled: IndexSet::new(),
			config,
			wrapper_tag: None,
			parent: None,
			children: IndexSet::new(),
			services,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn services(&self) -> &FormServices {
		&self.services
	}

	/// Renderer bound to this fieldset's configuration.
	pub fn renderer(&self) -> Renderer<'_> {
		Renderer::new(&self.config, &self.services)
	}

	pub fn wrapper_tag(&self) -> Option<&WrapperTag> {
		self.wrapper_tag.as_ref()
	}

	pub fn set_wrapper_tag(&mut self, tag: Option<WrapperTag>) -> &mut Self {
		self.wrapper_tag = tag;
		self
	}

	pub fn parent(&self) -> Option<&str> {
		self.parent.as_deref()
	}

	pub fn children(&self) -> impl Iterator<Item = &str> {
		self.children.iter().map(String::as_str)
	}

	pub(crate) fn link_parent(&mut self, parent: &str) {
		self.parent = Some(parent.to_string());
		if self.wrapper_tag.is_none() {
			self.wrapper_tag = Some(WrapperTag::Fieldset);
		}
	}

	pub(crate) fn link_child(&mut self, child: &str) {
		self.children.insert(child.to_string());
	}

	pub(crate) fn unlink_parent(&mut self) {
		self.parent = None;
	}

	pub(crate) fn unlink_child(&mut self, child: &str) {
		self.children.shift_remove(child);
	}

	/// Add a field, or return the existing one with the same name.
	///
	/// # Examples
	///
	/// ```
	/// use formwork_forms::config::ConfigMap;
	/// use formwork_forms::fieldset::Fieldset;
	/// use formwork_forms::value::Attributes;
	///
	/// let mut fieldset = Fieldset::new("search", ConfigMap::new());
	/// fieldset.add("q", "Query", Attributes::new()).unwrap();
	/// let again = fieldset.add("q", "Other label", Attributes::new()).unwrap();
	///
	/// assert_eq!(again.label(), Some("Query"));
	/// assert_eq!(fieldset.fields().len(), 1);
	/// ```
	pub fn add(
		&mut self,
		name: impl Into<String>,
		label: impl Into<String>,
		attributes: Attributes,
	) -> FormResult<&mut Field> {
		let name = name.into();
		if name.is_empty() {
			return Err(FormError::InvalidField(
				"cannot create field without name".to_string(),
			));
		}

		match self.fields.entry(name) {
			Entry::Occupied(entry) => {
				tracing::warn!(
					fieldset = %self.name,
					field = %entry.key(),
					"field already exists in this fieldset"
				);
				Ok(entry.into_mut())
			}
			Entry::Vacant(entry) => {
				let mut field = Field::new(entry.key().clone(), label, attributes)?;
				field.set_owner(Some(self.name.clone()));
				Ok(entry.insert(field))
			}
		}
	}

	/// Add a field from a definition map with `name`, `label` and
	/// `attributes` keys. Without an `attributes` object, every key other
	/// than `name` and `label` is taken as an attribute.
	pub fn add_config(&mut self, definition: Attributes) -> FormResult<&mut Field> {
		let mut definition = definition;
		let name = definition
			.shift_remove("name")
			.filter(|name| !name.is_null())
			.map(|name| value_to_string(&name))
			.unwrap_or_default();
		let label = definition
			.shift_remove("label")
			.filter(|label| !label.is_null())
			.map(|label| value_to_string(&label))
			.unwrap_or_default();
		let attributes = match definition.shift_remove("attributes") {
			Some(value @ Value::Object(_)) => attrs(value),
			_ => definition,
		};
		self.add(name, label, attributes)
	}

	/// Register an existing field.
	///
	/// Fails when the name is empty or already taken; the field's owner is
	/// only updated once it is in the map.
	pub fn attach(&mut self, field: Field) -> FormResult<&mut Field> {
		if field.name().is_empty() || self.fields.contains_key(field.name()) {
			return Err(FormError::InvalidField(format!(
				"field \"{}\" is unnamed or already exists in fieldset \"{}\"",
				field.name(),
				self.name
			)));
		}
		let owner = self.name.clone();
		let field = self.fields.entry(field.name().to_string()).or_insert(field);
		field.set_owner(Some(owner));
		Ok(field)
	}

	/// Remove a field and hand it back without an owner.
	pub fn detach(&mut self, name: &str) -> Option<Field> {
		self.disabled.shift_remove(name);
		let mut field = self.fields.shift_remove(name)?;
		field.set_owner(None);
		Some(field)
	}

	/// Dispatch on the kind of entry. Fieldset entries are ignored and
	/// yield `Ok(None)`.
	pub fn add_entry(&mut self, entry: FieldEntry) -> FormResult<Option<&mut Field>> {
		match entry {
			FieldEntry::Name {
				name,
				label,
				attributes,
			} => self.add(name, label, attributes).map(Some),
			FieldEntry::Config(definition) => self.add_config(definition).map(Some),
			FieldEntry::Field(field) => self.attach(field).map(Some),
			FieldEntry::Fieldset(name) => {
				tracing::debug!(fieldset = %self.name, child = %name, "fieldsets are nested through the registry, not added");
				Ok(None)
			}
		}
	}

	pub fn field(&self, name: &str) -> Option<&Field> {
		self.fields.get(name)
	}

	pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
		self.fields.get_mut(name)
	}

	/// All fields in insertion order.
	pub fn fields(&self) -> &IndexMap<String, Field> {
		&self.fields
	}

	/// Remove a field if present.
	pub fn delete(&mut self, name: &str) -> &mut Self {
		self.detach(name);
		self
	}

	pub fn enable(&mut self, name: &str) -> FormResult<&mut Self> {
		self.ensure_field(name)?;
		self.disabled.shift_remove(name);
		Ok(self)
	}

	/// Keep a field in the fieldset but leave it out of the rendered output.
	pub fn disable(&mut self, name: &str) -> FormResult<&mut Self> {
		self.ensure_field(name)?;
		self.disabled.insert(name.to_string());
		Ok(self)
	}

	pub fn is_disabled(&self, name: &str) -> bool {
		self.disabled.contains(name)
	}

	fn ensure_field(&self, name: &str) -> FormResult<()> {
		if self.fields.contains_key(name) {
			Ok(())
		} else {
			Err(FormError::UnknownField(name.to_string()))
		}
	}

	/// Set field values from keyed input.
	///
	/// Each field is looked up by its name in dotted form (`a[b]` becomes
	/// `a.b`) and then by its base name. Found values are applied with
	/// repopulate semantics; missing keys leave the field untouched.
	pub fn populate<I>(&mut self, input: &I, repopulate: bool) -> &mut Self
	where
		I: InputSource + ?Sized,
	{
		for field in self.fields.values_mut() {
			let dotted = field.name().replace('[', ".").replace(']', "");
			let found = input
				.get_path(&dotted)
				.filter(|value| !value.is_null())
				.or_else(|| input.get_value(field.base_name()))
				.filter(|value| !value.is_null())
				.cloned();
			if let Some(value) = found {
				field.set_value(value, true);
			}
		}

		if repopulate {
			self.repopulate();
		}
		self
	}

	/// Set field values from the properties of a serializable model,
	/// matched by base name.
	pub fn populate_from<T>(&mut self, model: &T, repopulate: bool) -> FormResult<&mut Self>
	where
		T: Serialize + ?Sized,
	{
		let properties = match serde_json::to_value(model)? {
			Value::Object(map) => map,
			_ => serde_json::Map::new(),
		};

		for field in self.fields.values_mut() {
			if let Some(value) = properties.get(field.base_name()) {
				field.set_value(value.clone(), true);
			}
		}

		if repopulate {
			self.repopulate();
		}
		Ok(self)
	}

	/// Refresh values from the request input collaborator. The CSRF field is
	/// never touched.
	pub fn repopulate(&mut self) -> &mut Self {
		for field in self.fields.values_mut() {
			if field.name() == CSRF_FIELD_NAME {
				continue;
			}
			let value = self.services.input().get(field.name());
			if let Some(value) = value.filter(|v| !v.is_null()) {
				field.set_value(value, true);
			}
		}
		self
	}

	/// Let a model declare its fields, then populate from the instance when
	/// one is given.
	pub fn add_model<M: FormModel>(&mut self, instance: Option<&M>) -> FormResult<&mut Self> {
		M::form_fields(self)?;
		if let Some(instance) = instance {
			self.populate_from(instance, false)?;
		}
		Ok(self)
	}

	/// Local configuration value, or `default` when unset.
	pub fn get_config(&self, key: &str, default: Value) -> Value {
		lookup(&self.config, key).cloned().unwrap_or(default)
	}

	pub fn config(&self) -> &ConfigMap {
		&self.config
	}

	pub fn set_config(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
		self.config.insert(key.into(), value);
		self
	}

	/// Shallow merge; later keys win.
	pub fn set_config_map(&mut self, config: ConfigMap) -> &mut Self {
		self.config.extend(config);
		self
	}

	/// Render the fieldset.
	///
	/// `action` only applies to fieldsets that render as a `<form>`.
	pub fn build(&self, action: Option<&str>) -> FormResult<String> {
		self.build_with_children(action, "")
	}

	pub(crate) fn build_with_children(&self, action: Option<&str>, children: &str) -> FormResult<String> {
		let renderer = self.renderer();
		let wrapper = self.wrapper_tag.clone().unwrap_or(WrapperTag::Form);

		let mut attributes = match renderer.get_config("form_attributes") {
			Some(value @ Value::Object(_)) => attrs(value),
			_ => Attributes::new(),
		};
		if let (Some(action), WrapperTag::Form) = (action, &wrapper)
			&& !action.is_empty()
		{
			attributes.insert("action".to_string(), Value::from(action));
		}

		let (open, close) = match &wrapper {
			WrapperTag::Form => (
				format!("{}\n", renderer.open(&attributes, &Attributes::new())?),
				format!("{}\n", renderer.close()),
			),
			WrapperTag::Fieldset => (
				renderer.fieldset_open(&attributes, None),
				renderer.fieldset_close(),
			),
			WrapperTag::Custom(tag) => (
				renderer.element_open(tag, &attributes),
				renderer.element_close(tag),
			),
		};

		let mut fields = String::new();
		for field in self.fields.values() {
			if self.disabled.contains(field.name()) {
				continue;
			}
			fields.push_str(&field.build(&renderer)?);
			fields.push('\n');
		}
		fields.push_str(children);

		let source = renderer
			.config_str(&wrapper.template_key())
			.or_else(|| renderer.config_str("form_template"))
			.unwrap_or_else(|| "{open}{fields}{close}".to_string());

		let context = TemplateContext::new()
			.with("open", open.as_str())
			.with("form_open", open)
			.with("fields", fields)
			.with("close", close.as_str())
			.with("form_close", close);

		tracing::debug!(fieldset = %self.name, wrapper = wrapper.as_str(), "built fieldset");
		Ok(Template::parse(&source)?.render(&context))
	}
}

impl fmt::Display for Fieldset {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.build(None) {
			Ok(html) => write!(f, "{}", html),
			Err(err) => write!(f, "{}", err),
		}
	}
}
