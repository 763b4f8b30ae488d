//! Named fieldset registry
//!
//! The registry owns every [`Fieldset`] by name, hands out the distinguished
//! default instance, and keeps parent/child links consistent. Nested
//! fieldsets are built and populated through the registry so that children
//! render inside their parent.
//!
//! ```
//! use formwork_forms::config::ConfigMap;
//! use formwork_forms::registry::FieldsetRegistry;
//! use formwork_forms::value::Attributes;
//!
//! let mut registry = FieldsetRegistry::new();
//! registry.forge("order", ConfigMap::new()).add("reference", "Reference", Attributes::new()).unwrap();
//! registry.forge("shipping", ConfigMap::new()).add("street", "Street", Attributes::new()).unwrap();
//! registry.set_parent("shipping", "order").unwrap();
//!
//! let html = registry.build("order", Some("orders/save")).unwrap();
//! assert!(html.contains("<fieldset>"));
//! assert!(html.find("name=\"reference\"") < html.find("name=\"street\""));
//! ```

use crate::config::ConfigMap;
use crate::error::{FormError, FormResult};
use crate::fieldset::{Fieldset, InputSource};
use crate::services::FormServices;
use indexmap::IndexMap;
use indexmap::map::Entry;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

/// Name of the instance returned by [`FieldsetRegistry::default_instance`]
pub const DEFAULT_FIELDSET: &str = "default";

/// Owner of all named fieldsets
///
/// Fieldsets refer to their parent and children by name; the registry
/// owns the values and resolves those names.
///
/// ```mermaid
/// graph TD
///     Registry["FieldsetRegistry"] --> Order["Fieldset: order"]
///     Registry --> Shipping["Fieldset: shipping"]
///     Order -- "children" --> Shipping
///     Shipping -- "parent" --> Order
///     Order --> F1["Field: reference"]
///     Shipping --> F2["Field: street"]
/// ```
#[cfg_attr(doc, aquamarine::aquamarine)]
#[derive(Debug, Default)]
pub struct FieldsetRegistry {
	fieldsets: IndexMap<String, Fieldset>,
	services: Arc<FormServices>,
}

impl FieldsetRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// A registry whose fieldsets share `services`.
	pub fn with_services(services: FormServices) -> Self {
		Self {
			fieldsets: IndexMap::new(),
			services: Arc::new(services),
		}
	}

	pub fn services(&self) -> &FormServices {
		&self.services
	}

	/// Fetch the named fieldset, creating it with `config` if needed.
	///
	/// An existing fieldset is returned unchanged; `config` is ignored in
	/// that case. The empty name refers to [`DEFAULT_FIELDSET`].
	pub fn forge(&mut self, name: &str, config: ConfigMap) -> &mut Fieldset {
		let name = if name.is_empty() { DEFAULT_FIELDSET } else { name };
		match self.fieldsets.entry(name.to_string()) {
			Entry::Occupied(entry) => {
				tracing::warn!(fieldset = %entry.key(), "fieldset already exists and cannot be overwritten");
				entry.into_mut()
			}
			Entry::Vacant(entry) => {
				tracing::debug!(fieldset = %entry.key(), "creating fieldset");
				let fieldset =
					Fieldset::with_services(entry.key().clone(), config, Arc::clone(&self.services));
				entry.insert(fieldset)
			}
		}
	}

	pub fn instance(&self, name: &str) -> Option<&Fieldset> {
		self.fieldsets.get(name)
	}

	pub fn instance_mut(&mut self, name: &str) -> Option<&mut Fieldset> {
		self.fieldsets.get_mut(name)
	}

	/// The default fieldset, created on first use.
	pub fn default_instance(&mut self) -> &mut Fieldset {
		let services = &self.services;
		self.fieldsets
			.entry(DEFAULT_FIELDSET.to_string())
			.or_insert_with(|| {
				Fieldset::with_services(DEFAULT_FIELDSET, ConfigMap::new(), Arc::clone(services))
			})
	}

	pub fn contains(&self, name: &str) -> bool {
		self.fieldsets.contains_key(name)
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.fieldsets.keys().map(String::as_str)
	}

	/// Drop a fieldset, unlinking it from its parent and children.
	pub fn remove(&mut self, name: &str) -> Option<Fieldset> {
		let mut removed = self.fieldsets.shift_remove(name)?;

		if let Some(parent_name) = removed.parent().map(str::to_string)
			&& let Some(parent) = self.fieldsets.get_mut(&parent_name)
		{
			parent.unlink_child(name);
		}
		let children: Vec<String> = removed.children().map(str::to_string).collect();
		for child in &children {
			if let Some(child) = self.fieldsets.get_mut(child) {
				child.unlink_parent();
			}
			removed.unlink_child(child);
		}
		removed.unlink_parent();

		tracing::debug!(fieldset = %name, "removed fieldset");
		Some(removed)
	}

	/// Nest `child` inside `parent`.
	///
	/// Fails when `child` already has a parent, when both names are the
	/// same, or when `parent` sits somewhere below `child`. Nothing is
	/// changed on failure. A child without a wrapper tag renders as a
	/// `<fieldset>`.
	///
	/// # Examples
	///
	/// ```
	/// use formwork_forms::config::ConfigMap;
	/// use formwork_forms::error::FormError;
	/// use formwork_forms::registry::FieldsetRegistry;
	///
	/// let mut registry = FieldsetRegistry::new();
	/// for name in ["a", "b"] {
	///     registry.forge(name, ConfigMap::new());
	/// }
	/// registry.set_parent("b", "a").unwrap();
	///
	/// assert!(matches!(registry.set_parent("a", "b"), Err(FormError::Hierarchy(_))));
	/// assert_eq!(registry.parent("a"), None);
	/// ```
	pub fn set_parent(&mut self, child: &str, parent: &str) -> FormResult<()> {
		let existing = self.existing(child)?.parent();
		self.existing(parent)?;

		if let Some(existing) = existing {
			return Err(FormError::Hierarchy(format!(
				"fieldset \"{}\" already has parent \"{}\"",
				child, existing
			)));
		}
		if child == parent {
			return Err(FormError::Hierarchy(format!(
				"fieldset \"{}\" cannot be its own parent",
				child
			)));
		}
		if self.is_descendant(parent, child) {
			return Err(FormError::Hierarchy(format!(
				"fieldset \"{}\" is already nested inside \"{}\"",
				parent, child
			)));
		}

		if let Some(child_set) = self.fieldsets.get_mut(child) {
			child_set.link_parent(parent);
		}
		if let Some(parent_set) = self.fieldsets.get_mut(parent) {
			parent_set.link_child(child);
		}
		tracing::debug!(child = %child, parent = %parent, "nested fieldset");
		Ok(())
	}

	/// Breadth-first search for `needle` below `root`.
	fn is_descendant(&self, needle: &str, root: &str) -> bool {
		let mut queue: VecDeque<&str> = VecDeque::from([root]);
		let mut seen: HashSet<&str> = HashSet::new();

		while let Some(current) = queue.pop_front() {
			if !seen.insert(current) {
				continue;
			}
			let Some(fieldset) = self.fieldsets.get(current) else {
				continue;
			};
			for child in fieldset.children() {
				if child == needle {
					return true;
				}
				queue.push_back(child);
			}
		}
		false
	}

	pub fn parent(&self, name: &str) -> Option<&str> {
		self.fieldsets.get(name)?.parent()
	}

	pub fn children(&self, name: &str) -> Vec<&str> {
		self.fieldsets
			.get(name)
			.map(|fieldset| fieldset.children().collect())
			.unwrap_or_default()
	}

	/// Move a field from one fieldset to another.
	///
	/// The target is checked before anything is detached, so the field ends
	/// up in exactly one of the two fieldsets.
	pub fn move_field(&mut self, field: &str, from: &str, to: &str) -> FormResult<()> {
		if from == to {
			self.existing(from)?;
			return Ok(());
		}
		if self.existing(to)?.field(field).is_some() {
			return Err(FormError::InvalidField(format!(
				"field \"{}\" already exists in fieldset \"{}\"",
				field, to
			)));
		}
		let detached = self
			.existing_mut(from)?
			.detach(field)
			.ok_or_else(|| FormError::UnknownField(field.to_string()))?;

		self.existing_mut(to)?.attach(detached)?;
		tracing::debug!(field = %field, from = %from, to = %to, "moved field");
		Ok(())
	}

	/// Populate a fieldset and, recursively, its children.
	pub fn populate<I>(&mut self, name: &str, input: &I, repopulate: bool) -> FormResult<()>
	where
		I: InputSource + ?Sized,
	{
		let fieldset = self.existing_mut(name)?;
		fieldset.populate(input, repopulate);
		let children: Vec<String> = fieldset.children().map(str::to_string).collect();

		for child in children {
			self.populate(&child, input, repopulate)?;
		}
		Ok(())
	}

	/// Render a fieldset with its children nested inside it.
	pub fn build(&self, name: &str, action: Option<&str>) -> FormResult<String> {
		let fieldset = self.existing(name)?;

		let mut children = String::new();
		for child in fieldset.children() {
			children.push_str(&self.build(child, None)?);
			children.push('\n');
		}

		fieldset.build_with_children(action, &children)
	}

	fn existing(&self, name: &str) -> FormResult<&Fieldset> {
		self.fieldsets
			.get(name)
			.ok_or_else(|| FormError::UnknownFieldset(name.to_string()))
	}

	fn existing_mut(&mut self, name: &str) -> FormResult<&mut Fieldset> {
		self.fieldsets
			.get_mut(name)
			.ok_or_else(|| FormError::UnknownFieldset(name.to_string()))
	}
}
