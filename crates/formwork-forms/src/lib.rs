//! Form fields and fieldsets with template-driven HTML rendering
//!
//! This crate provides:
//! - Fields for text inputs, selects, radio and checkbox groups, textareas and buttons
//! - Fieldsets that order, enable, disable and populate fields
//! - A registry of named fieldsets with parent/child nesting
//! - A renderer producing HTML tags from attribute maps
//! - Configurable placeholder templates for fields and wrappers
//!
//! ## Example
//!
//! ```
//! use formwork_forms::{FieldsetRegistry, attrs};
//! use formwork_forms::config::ConfigMap;
//! use serde_json::json;
//!
//! let mut registry = FieldsetRegistry::new();
//! let form = registry.forge("login", ConfigMap::new());
//! form.add("username", "Username", attrs(json!({"required": true}))).unwrap();
//! form.add("remember", "Remember me", attrs(json!({"type": "checkbox", "value": "1"}))).unwrap();
//!
//! let html = registry.build("login", Some("session/create")).unwrap();
//! assert!(html.contains("<form action=\"/session/create\""));
//! assert!(html.contains("id=\"form_username\""));
//! ```

pub mod config;
pub mod error;
pub mod field;
pub mod fieldset;
pub mod html;
pub mod options;
pub mod registry;
pub mod renderer;
pub mod services;
pub mod template;
pub mod value;

pub use config::{ConfigMap, ConfigProvider, FormSettings};
pub use error::{FormError, FormResult};
pub use field::{Field, FieldType};
pub use fieldset::{FieldEntry, Fieldset, FormModel, InputSource, WrapperTag};
pub use options::{OptionEntry, SelectOptions};
pub use registry::{DEFAULT_FIELDSET, FieldsetRegistry};
pub use renderer::{Renderer, VALID_INPUT_TYPES};
pub use services::{
	CSRF_FIELD_NAME, CsrfProvider, CsrfTokenField, EscapeHtml, FormServices, NoCsrf,
	NoRequestInput, NoTranslation, RawValue, RequestInput, StaticUrl, Translator, UrlProvider,
	ValuePrep,
};
pub use template::{Template, TemplateContext, TemplateError};
pub use value::{Attributes, attrs};
