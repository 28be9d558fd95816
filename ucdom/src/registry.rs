//! Custom element definitions.
//!
//! A custom element is a Rust type attached to an element node whose tag was
//! defined in the document's [`CustomElementRegistry`]. Definitions can be made
//! explicitly with [`CustomElementRegistry::define`] or submitted at link time
//! through `inventory` and picked up by
//! [`CustomElementRegistry::with_registered`].

use std::any::Any;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::dom::{Document, NodeId};
use crate::error::DomError;

/// Behaviour attached to an element node of a defined tag.
///
/// Callbacks receive the document mutably; the element itself is detached
/// from the document for the duration of the call, so re-entrant attribute
/// changes on the same host made from inside a callback are not reported
/// back to it.
pub trait CustomElement: Any {
    /// Attributes whose changes are reported to [`attribute_changed`](Self::attribute_changed).
    fn observed_attributes(&self) -> &'static [&'static str] {
        &[]
    }

    /// Called once, right after the host node has been created.
    fn constructed(&mut self, doc: &mut Document, host: NodeId) {
        let _ = (doc, host);
    }

    /// Called synchronously after an observed attribute was added, changed or removed.
    fn attribute_changed(
        &mut self,
        doc: &mut Document,
        host: NodeId,
        name: &str,
        old: Option<&str>,
        new: Option<&str>,
    ) {
        let _ = (doc, host, name, old, new);
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Factory producing a fresh element instance.
pub type Constructor = Rc<dyn Fn() -> Box<dyn CustomElement>>;

/// Link-time registration entry for inventory.
pub struct ElementRegistration {
    /// Tag name, e.g. `uc-modal`.
    pub name: &'static str,
    /// Factory function for new instances.
    pub constructor: fn() -> Box<dyn CustomElement>,
}

impl ElementRegistration {
    pub const fn new(name: &'static str, constructor: fn() -> Box<dyn CustomElement>) -> Self {
        Self { name, constructor }
    }
}

inventory::collect!(ElementRegistration);

/// Get all link-time registrations.
pub fn registered_elements() -> impl Iterator<Item = &'static ElementRegistration> {
    inventory::iter::<ElementRegistration>()
}

/// Process-wide map of tag name to constructor.
#[derive(Default, Clone)]
pub struct CustomElementRegistry {
    definitions: BTreeMap<String, Constructor>,
}

impl std::fmt::Debug for CustomElementRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.definitions.keys()).finish()
    }
}

impl CustomElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with every inventory registration.
    pub fn with_registered() -> Result<Self, DomError> {
        let mut registry = Self::new();
        for registration in registered_elements() {
            registry.define(registration.name, registration.constructor)?;
        }
        Ok(registry)
    }

    /// Define `name` with a plain constructor function.
    pub fn define(
        &mut self,
        name: &str,
        constructor: fn() -> Box<dyn CustomElement>,
    ) -> Result<(), DomError> {
        self.define_with(name, move || constructor())
    }

    /// Define `name` with a capturing factory.
    pub fn define_with(
        &mut self,
        name: &str,
        factory: impl Fn() -> Box<dyn CustomElement> + 'static,
    ) -> Result<(), DomError> {
        validate_name(name)?;
        if self.definitions.contains_key(name) {
            return Err(DomError::AlreadyDefined(name.to_string()));
        }
        log::debug!("defined custom element <{name}>");
        self.definitions.insert(name.to_string(), Rc::new(factory));
        Ok(())
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<Constructor> {
        self.definitions.get(name).cloned()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }
}

/// Custom element names start with a lowercase ASCII letter, contain a hyphen
/// and have no uppercase letters or whitespace.
fn validate_name(name: &str) -> Result<(), DomError> {
    let starts_lower = name.chars().next().is_some_and(|c| c.is_ascii_lowercase());
    let valid_chars = name
        .chars()
        .all(|c| !c.is_ascii_uppercase() && !c.is_whitespace());
    if starts_lower && valid_chars && name.contains('-') {
        Ok(())
    } else {
        Err(DomError::InvalidName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_validation() {
        assert!(validate_name("uc-modal").is_ok());
        assert!(validate_name("x-1").is_ok());
        assert_eq!(
            validate_name("modal"),
            Err(DomError::InvalidName("modal".into()))
        );
        assert!(validate_name("Uc-modal").is_err());
        assert!(validate_name("-modal").is_err());
        assert!(validate_name("uc modal-x").is_err());
    }
}
