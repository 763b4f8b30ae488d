//! # Formwork
//!
//! Form definitions rendered to HTML through configurable templates.
//!
//! Declare named fields, group them into fieldsets, nest fieldsets, populate
//! them from submitted data or models, and render the whole tree to markup.
//!
//! ## Feature Flags
//!
//! - `forms` (default) - Fields, fieldsets, the registry and the renderer
//! - `full` - All features enabled
//!
//! ## Quick Example
//!
//! ```
//! use formwork::prelude::*;
//! use serde_json::json;
//!
//! let mut registry = FieldsetRegistry::new();
//! let contact = registry.forge("contact", ConfigMap::new());
//! contact.add("email", "Email", attrs(json!({"type": "email"}))).unwrap();
//! contact
//!     .add("topic", "Topic", attrs(json!({"type": "select"})))
//!     .unwrap()
//!     .set_options(SelectOptions::from_value(&json!({"sales": "Sales", "support": "Support"})), true);
//!
//! let html = registry.build("contact", Some("contact/send")).unwrap();
//! assert!(html.contains("<select"));
//! ```

#[cfg(feature = "forms")]
pub use formwork_forms as forms;

/// Commonly used types
#[cfg(feature = "forms")]
pub mod prelude {
	pub use formwork_forms::{
		Attributes, ConfigMap, Field, FieldType, Fieldset, FieldsetRegistry, FormError, FormModel,
		FormResult, FormServices, FormSettings, SelectOptions, WrapperTag, attrs,
	};
}
