//! Registry of the entity types a query may reference.

use std::collections::BTreeSet;

use crate::ast::{Constant, Literal};
use crate::error::UnknownTypeError;

/// The set of entity-type names known to a parse.
///
/// Names are kept sorted so listings are stable across runs.
///
/// # Examples
///
/// ```
/// use rql_ast::TypeRegistry;
///
/// let registry: TypeRegistry = ["Person", "Company"].into_iter().collect();
/// assert!(registry.has_type("Person"));
/// assert!(registry.get_type("Planet").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeRegistry {
    types: BTreeSet<String>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a type name. Adding a known name again is a no-op.
    pub fn add_type(&mut self, name: impl Into<String>) {
        self.types.insert(name.into());
    }

    pub fn has_type(&self, name: &str) -> bool {
        self.types.contains(name)
    }

    /// Materializes a reference to `name` as an entity-type constant.
    ///
    /// Fails without creating anything when the name is not registered.
    pub fn get_type(&self, name: &str) -> Result<Constant, UnknownTypeError> {
        if !self.has_type(name) {
            return Err(UnknownTypeError::new(name));
        }
        Ok(Constant::new(Literal::EntityType(name.to_string())))
    }

    /// Registered names in sorted order.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registers every key of a JSON object, e.g. a schema map keyed by
    /// entity type. Values are ignored; non-object input registers nothing.
    #[cfg(feature = "json")]
    pub fn from_json_keys(schema: &serde_json::Value) -> Self {
        match schema.as_object() {
            Some(map) => map.keys().cloned().collect(),
            None => Self::default(),
        }
    }
}

impl<S: Into<String>> FromIterator<S> for TypeRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut registry = TypeRegistry::new();
        registry.extend(iter);
        registry
    }
}

impl<S: Into<String>> Extend<S> for TypeRegistry {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.add_type(name);
        }
    }
}

/// Resolves a type name against an optional registry.
///
/// Without a registry every name is accepted.
pub fn resolve_type(
    registry: Option<&TypeRegistry>,
    name: &str,
) -> Result<Constant, UnknownTypeError> {
    match registry {
        Some(registry) => registry.get_type(name),
        None => Ok(Constant::new(Literal::EntityType(name.to_string()))),
    }
}
