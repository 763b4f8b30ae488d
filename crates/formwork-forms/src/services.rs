//! Collaborators consumed by the renderer and fieldsets
//!
//! Request parsing, URL generation, CSRF tokens, translations and value
//! escaping live outside this crate. Each concern is a small trait with a
//! do-nothing default, and [`FormServices`] bundles one of each.

use crate::config::{ConfigProvider, FormSettings};
use crate::html::{escape_html, tag};
use crate::value::Attributes;
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Name of the hidden input that carries the CSRF token
pub const CSRF_FIELD_NAME: &str = "_token";

/// Submitted request data used by repopulation
pub trait RequestInput: Send + Sync {
	fn get(&self, name: &str) -> Option<Value>;
}

impl RequestInput for HashMap<String, Value> {
	fn get(&self, name: &str) -> Option<Value> {
		HashMap::get(self, name).cloned()
	}
}

impl RequestInput for IndexMap<String, Value> {
	fn get(&self, name: &str) -> Option<Value> {
		IndexMap::get(self, name).cloned()
	}
}

/// No request data at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRequestInput;

impl RequestInput for NoRequestInput {
	fn get(&self, _name: &str) -> Option<Value> {
		None
	}
}

/// URL resolution for form actions
pub trait UrlProvider: Send + Sync {
	/// URL of the current request, used when a form has no action.
	fn current_base_url(&self) -> String;

	/// Turn a relative path into an absolute URL.
	fn create(&self, path: &str) -> String {
		let base = self.current_base_url();
		format!(
			"{}/{}",
			base.trim_end_matches('/'),
			path.trim_start_matches('/')
		)
	}
}

/// Fixed base URL
///
/// # Examples
///
/// ```
/// use formwork_forms::services::{StaticUrl, UrlProvider};
///
/// let urls = StaticUrl::new("https://example.com/");
/// assert_eq!(urls.create("/login"), "https://example.com/login");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticUrl {
	base: String,
}

impl StaticUrl {
	pub fn new(base: impl Into<String>) -> Self {
		Self { base: base.into() }
	}
}

impl Default for StaticUrl {
	fn default() -> Self {
		Self::new("/")
	}
}

impl UrlProvider for StaticUrl {
	fn current_base_url(&self) -> String {
		self.base.clone()
	}
}

/// Markup for the CSRF token appended to every opened form
pub trait CsrfProvider: Send + Sync {
	/// Hidden-field markup, or an empty string when CSRF is off.
	fn token_field(&self) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoCsrf;

impl CsrfProvider for NoCsrf {
	fn token_field(&self) -> String {
		String::new()
	}
}

/// Renders a fixed token as a hidden input
///
/// # Examples
///
/// ```
/// use formwork_forms::services::{CsrfProvider, CsrfTokenField};
///
/// let csrf = CsrfTokenField::new("abc123");
/// assert_eq!(
///     csrf.token_field(),
///     "<input type=\"hidden\" name=\"_token\" value=\"abc123\" />"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfTokenField {
	name: String,
	token: String,
}

impl CsrfTokenField {
	pub fn new(token: impl Into<String>) -> Self {
		Self {
			name: CSRF_FIELD_NAME.to_string(),
			token: token.into(),
		}
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = name.into();
		self
	}

	pub fn token(&self) -> &str {
		&self.token
	}
}

impl CsrfProvider for CsrfTokenField {
	fn token_field(&self) -> String {
		let mut attributes = Attributes::new();
		attributes.insert("type".to_string(), Value::from("hidden"));
		attributes.insert("name".to_string(), Value::from(self.name.as_str()));
		attributes.insert("value".to_string(), Value::from(escape_html(&self.token)));
		tag("input", &attributes, None)
	}
}

/// Label translation
pub trait Translator: Send + Sync {
	fn translate(&self, key: &str) -> Option<String>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoTranslation;

impl Translator for NoTranslation {
	fn translate(&self, _key: &str) -> Option<String> {
		None
	}
}

impl Translator for HashMap<String, String> {
	fn translate(&self, key: &str) -> Option<String> {
		self.get(key).cloned()
	}
}

/// Preparation applied to values before they are written into markup
pub trait ValuePrep: Send + Sync {
	fn prep(&self, value: &str) -> String;
}

/// Leaves values untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct RawValue;

impl ValuePrep for RawValue {
	fn prep(&self, value: &str) -> String {
		value.to_string()
	}
}

/// HTML-escapes values
#[derive(Debug, Clone, Copy, Default)]
pub struct EscapeHtml;

impl ValuePrep for EscapeHtml {
	fn prep(&self, value: &str) -> String {
		escape_html(value)
	}
}

/// The collaborators a fieldset renders with
///
/// # Examples
///
/// ```
/// use formwork_forms::services::{CsrfTokenField, EscapeHtml, FormServices, StaticUrl};
///
/// let services = FormServices::default()
///     .with_urls(StaticUrl::new("https://example.com"))
///     .with_csrf(CsrfTokenField::new("t0k3n"))
///     .with_value_prep(EscapeHtml);
///
/// assert_eq!(services.urls().current_base_url(), "https://example.com");
/// assert!(services.csrf().token_field().contains("t0k3n"));
/// ```
#[derive(Clone)]
pub struct FormServices {
	input: Arc<dyn RequestInput>,
	urls: Arc<dyn UrlProvider>,
	csrf: Arc<dyn CsrfProvider>,
	translator: Arc<dyn Translator>,
	value_prep: Arc<dyn ValuePrep>,
	defaults: Arc<dyn ConfigProvider>,
}

impl Default for FormServices {
	fn default() -> Self {
		Self {
			input: Arc::new(NoRequestInput),
			urls: Arc::new(StaticUrl::default()),
			csrf: Arc::new(NoCsrf),
			translator: Arc::new(NoTranslation),
			value_prep: Arc::new(RawValue),
			defaults: Arc::new(FormSettings::default()),
		}
	}
}

impl fmt::Debug for FormServices {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FormServices").finish_non_exhaustive()
	}
}

impl FormServices {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_input(mut self, input: impl RequestInput + 'static) -> Self {
		self.input = Arc::new(input);
		self
	}

	pub fn with_urls(mut self, urls: impl UrlProvider + 'static) -> Self {
		self.urls = Arc::new(urls);
		self
	}

	pub fn with_csrf(mut self, csrf: impl CsrfProvider + 'static) -> Self {
		self.csrf = Arc::new(csrf);
		self
	}

	pub fn with_translator(mut self, translator: impl Translator + 'static) -> Self {
		self.translator = Arc::new(translator);
		self
	}

	pub fn with_value_prep(mut self, value_prep: impl ValuePrep + 'static) -> Self {
		self.value_prep = Arc::new(value_prep);
		self
	}

	pub fn with_defaults(mut self, defaults: impl ConfigProvider + 'static) -> Self {
		self.defaults = Arc::new(defaults);
		self
	}

	pub fn input(&self) -> &dyn RequestInput {
		self.input.as_ref()
	}

	pub fn urls(&self) -> &dyn UrlProvider {
		self.urls.as_ref()
	}

	pub fn csrf(&self) -> &dyn CsrfProvider {
		self.csrf.as_ref()
	}

	pub fn translator(&self) -> &dyn Translator {
		self.translator.as_ref()
	}

	pub fn value_prep(&self) -> &dyn ValuePrep {
		self.value_prep.as_ref()
	}

	pub fn defaults(&self) -> &dyn ConfigProvider {
		self.defaults.as_ref()
	}
}
